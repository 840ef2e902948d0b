use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ratewatch_extract::{CorridorCatalog, RateKey};

/// One observed exchange rate for one corridor.
///
/// `observed_at` is the start of the cycle that actually fetched the value.
/// When a quote is carried forward across failed cycles it keeps its original
/// `observed_at`, so consumers can always tell how stale a rate is.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    key: RateKey,
    value: Decimal,
    observed_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(key: RateKey, value: Decimal, observed_at: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            observed_at,
        }
    }

    pub fn key(&self) -> &RateKey {
        &self.key
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// An immutable view of every tracked corridor at one instant.
///
/// Each catalog corridor is always present as a map entry; a corridor that has
/// never produced a value maps to `None` rather than disappearing, so "absent"
/// and "untracked" stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    rates: BTreeMap<RateKey, Option<Quote>>,
    taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(rates: BTreeMap<RateKey, Option<Quote>>, taken_at: DateTime<Utc>) -> Self {
        Self { rates, taken_at }
    }

    /// Start of the cycle that assembled this snapshot.
    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// The quote for a corridor, or `None` when the corridor has no value yet.
    pub fn get(&self, key: &RateKey) -> Option<&Quote> {
        self.rates.get(key).and_then(|quote| quote.as_ref())
    }

    /// Whether the corridor is tracked by this snapshot at all.
    pub fn tracks(&self, key: &RateKey) -> bool {
        self.rates.contains_key(key)
    }

    /// Every tracked corridor with its (possibly absent) quote.
    pub fn rates(&self) -> &BTreeMap<RateKey, Option<Quote>> {
        &self.rates
    }

    /// Number of tracked corridors.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Number of corridors that currently hold a value.
    pub fn present_count(&self) -> usize {
        self.rates.values().filter(|quote| quote.is_some()).count()
    }

    /// Rebuilds a snapshot from its persisted form.
    ///
    /// Only corridors in `catalog` are loaded; stray file keys are dropped by
    /// the caller's accounting. Every loaded quote is stamped with `taken_at`
    /// because the file format keeps a single whole-snapshot timestamp.
    pub fn from_persisted(
        persisted: &PersistedSnapshot,
        taken_at: DateTime<Utc>,
        catalog: &CorridorCatalog,
    ) -> Self {
        let rates = catalog
            .keys()
            .map(|key| {
                let quote = persisted
                    .rates
                    .get(&key.canonical())
                    .copied()
                    .flatten()
                    .map(|value| Quote::new(key.clone(), value, taken_at));
                (key.clone(), quote)
            })
            .collect();
        Self { rates, taken_at }
    }
}

/// Wire form of the snapshot file: one whole-file timestamp plus a flat
/// `<PROVIDER>_<FROM>_<TO>` map where a corridor without a value is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub timestamp: i64,
    pub rates: BTreeMap<String, Option<Decimal>>,
}

impl PersistedSnapshot {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let rates = snapshot
            .rates()
            .iter()
            .map(|(key, quote)| (key.canonical(), quote.as_ref().map(Quote::value)))
            .collect();
        Self {
            timestamp: snapshot.taken_at().timestamp(),
            rates,
        }
    }
}

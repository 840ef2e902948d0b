//! The static corridor catalog.
//!
//! The catalog is the closed registry of every corridor this service
//! tracks: identity, provider-specific fetch parameters and decimal policy.
//! It is loaded exactly once at startup, either from the built-in set
//! embedded at compile time or from an operator-supplied JSON file, and
//! validated eagerly. Any malformed or duplicate entry is fatal: the process must not
//! start serving against a catalog it cannot trust.
//!
//! All [`RateKey`] values in the system originate here.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::CatalogError;
use crate::models::{
    CorridorEntry, Currency, DecimalStyle, FetchParams, MoneygramParams, Provider, RateKey,
    WesternUnionParams,
};

/// Built-in corridor set: Western Union and MoneyGram, CAD/USD/EUR into
/// TND/MAD.
const BUILTIN_CORRIDORS: &str = include_str!("corridors.json");

#[derive(Debug, Deserialize)]
struct RawCatalog {
    corridors: Vec<RawCorridor>,
}

/// One corridor definition as authored in JSON, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCorridor {
    provider: String,
    from: String,
    to: String,
    url: String,
    #[serde(default)]
    selector: Option<String>,
    decimal_style: String,
}

/// Validated, immutable registry of tracked corridors.
#[derive(Debug)]
pub struct CorridorCatalog {
    entries: Vec<CorridorEntry>,
    by_key: HashMap<RateKey, usize>,
}

impl CorridorCatalog {
    /// Loads the compile-time embedded corridor set.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CORRIDORS).expect("built-in corridors.json must be valid")
    }

    /// Parses and validates a catalog from JSON.
    ///
    /// The first invalid entry aborts the load; there is no partial
    /// catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        if raw.corridors.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut entries = Vec::with_capacity(raw.corridors.len());
        let mut by_key = HashMap::with_capacity(raw.corridors.len());
        for raw_corridor in raw.corridors {
            let entry = validate_corridor(raw_corridor)?;
            let key = entry.key().clone();
            if by_key.insert(key.clone(), entries.len()).is_some() {
                return Err(CatalogError::DuplicateCorridor(key.to_string()));
            }
            entries.push(entry);
        }

        Ok(Self { entries, by_key })
    }

    /// The full corridor sequence, in catalog order. Restartable: callers
    /// iterate it once per refresh cycle.
    pub fn entries(&self) -> &[CorridorEntry] {
        &self.entries
    }

    /// All tracked keys, in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &RateKey> {
        self.entries.iter().map(|e| e.key())
    }

    /// Looks up the entry for an exact key.
    pub fn get(&self, key: &RateKey) -> Option<&CorridorEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    /// Resolves loosely-typed request input to a tracked corridor.
    ///
    /// Currency case is normalized; anything that does not name a corridor
    /// in the catalog resolves to `None`.
    pub fn resolve(&self, provider: Provider, from: &str, to: &str) -> Option<&CorridorEntry> {
        let from = Currency::parse(from)?;
        let to = Currency::parse(to)?;
        self.get(&RateKey::new(provider, from, to))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_corridor(raw: RawCorridor) -> Result<CorridorEntry, CatalogError> {
    let provider = Provider::from_code(&raw.provider)
        .ok_or_else(|| CatalogError::UnknownProvider(raw.provider.clone()))?;
    let from =
        Currency::parse(&raw.from).ok_or_else(|| CatalogError::InvalidCurrency(raw.from.clone()))?;
    let to =
        Currency::parse(&raw.to).ok_or_else(|| CatalogError::InvalidCurrency(raw.to.clone()))?;
    let key = RateKey::new(provider, from, to);

    if !raw.url.starts_with("http://") && !raw.url.starts_with("https://") {
        return Err(CatalogError::InvalidEntry {
            corridor: key.to_string(),
            detail: format!("url '{}' is not http(s)", raw.url),
        });
    }

    let decimal_style = DecimalStyle::from_symbol(&raw.decimal_style).ok_or_else(|| {
        CatalogError::InvalidEntry {
            corridor: key.to_string(),
            detail: format!("decimalStyle '{}' must be '.' or ','", raw.decimal_style),
        }
    })?;

    let params = match provider {
        Provider::Moneygram => {
            if raw.selector.is_some() {
                return Err(CatalogError::InvalidEntry {
                    corridor: key.to_string(),
                    detail: "MoneyGram entries take no selector".to_string(),
                });
            }
            FetchParams::Moneygram(MoneygramParams { url: raw.url })
        }
        Provider::WesternUnion => {
            let selector = raw
                .selector
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| CatalogError::InvalidEntry {
                    corridor: key.to_string(),
                    detail: "Western Union entries require a selector".to_string(),
                })?;
            FetchParams::WesternUnion(WesternUnionParams {
                url: raw.url,
                selector,
            })
        }
    };

    Ok(CorridorEntry::new(key, params, decimal_style))
}

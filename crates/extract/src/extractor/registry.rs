//! Provider dispatch and deadline enforcement.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;
use tokio::time::timeout;

use crate::errors::FetchError;
use crate::extractor::{Extractor, MoneygramExtractor, WesternUnionExtractor};
use crate::models::{CorridorEntry, FetchParams};
use crate::source::DocumentSource;

/// Routes corridor entries to their provider's extractor and bounds every
/// fetch with the configured hard deadline.
///
/// The registry is itself an [`Extractor`], so callers hold one capability
/// object covering the whole catalog. Dispatch is an exhaustive match over
/// the parameter variant: a corridor that passed catalog validation always
/// has an adapter, and adding a provider variant fails compilation here
/// until one exists.
///
/// The deadline is authoritative: when it elapses the in-flight fetch
/// future is dropped, which releases whatever session the source had
/// acquired, and the corridor resolves to [`FetchError::Timeout`].
pub struct ExtractorRegistry {
    moneygram: Arc<dyn Extractor>,
    western_union: Arc<dyn Extractor>,
    fetch_timeout: Duration,
}

impl ExtractorRegistry {
    /// Builds the production registry: one adapter per provider, all
    /// sharing one document source.
    pub fn new(source: Arc<dyn DocumentSource>, fetch_timeout: Duration) -> Self {
        Self {
            moneygram: Arc::new(MoneygramExtractor::new(source.clone())),
            western_union: Arc::new(WesternUnionExtractor::new(source)),
            fetch_timeout,
        }
    }

    /// Builds a registry from explicit adapters. Intended for tests and
    /// bespoke wiring.
    pub fn with_extractors(
        moneygram: Arc<dyn Extractor>,
        western_union: Arc<dyn Extractor>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            moneygram,
            western_union,
            fetch_timeout,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
}

#[async_trait]
impl Extractor for ExtractorRegistry {
    async fn fetch(&self, entry: &CorridorEntry) -> Result<Decimal, FetchError> {
        let extractor = match entry.params() {
            FetchParams::Moneygram(_) => &self.moneygram,
            FetchParams::WesternUnion(_) => &self.western_union,
        };

        match timeout(self.fetch_timeout, extractor.fetch(entry)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "{}: fetch exceeded {}ms deadline, dropping",
                    entry.key(),
                    self.fetch_timeout.as_millis()
                );
                Err(FetchError::Timeout {
                    corridor: entry.key().to_string(),
                    timeout_ms: self.fetch_timeout.as_millis() as u64,
                })
            }
        }
    }
}

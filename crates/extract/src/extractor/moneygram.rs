//! MoneyGram rate extraction.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::FetchError;
use crate::extractor::Extractor;
use crate::models::{CorridorEntry, FetchParams, Provider};
use crate::parse::parse_rate;
use crate::source::DocumentSource;

/// Extractor for MoneyGram corridor pages.
///
/// MoneyGram renders the rate as an equation, `1 USD = 10.05 MAD`; the
/// value is taken from the right-hand side before numeric parsing.
pub struct MoneygramExtractor {
    source: Arc<dyn DocumentSource>,
}

impl MoneygramExtractor {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Extractor for MoneygramExtractor {
    async fn fetch(&self, entry: &CorridorEntry) -> Result<Decimal, FetchError> {
        if !matches!(entry.params(), FetchParams::Moneygram(_)) {
            return Err(FetchError::Unsupported {
                provider: Provider::Moneygram.code().to_string(),
                corridor: entry.key().to_string(),
            });
        }

        let document = self.source.fetch_document(entry).await?;

        // Take the right-hand side of the first '='; pages occasionally
        // drop the equation wrapper and show the bare value.
        let rate_text = match document.split_once('=') {
            Some((_, tail)) => tail,
            None => document.as_str(),
        };
        let value = parse_rate(entry.key(), rate_text, entry.decimal_style())?;
        debug!("{}: parsed rate {}", entry.key(), value);
        Ok(value)
    }
}

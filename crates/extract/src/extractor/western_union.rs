//! Western Union rate extraction.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::FetchError;
use crate::extractor::Extractor;
use crate::models::{CorridorEntry, FetchParams, Provider};
use crate::parse::parse_rate;
use crate::source::DocumentSource;

/// Extractor for Western Union send-money and converter pages.
///
/// The configured selector points at the element whose text is the bare
/// rate value, so the document goes straight to numeric parsing.
pub struct WesternUnionExtractor {
    source: Arc<dyn DocumentSource>,
}

impl WesternUnionExtractor {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Extractor for WesternUnionExtractor {
    async fn fetch(&self, entry: &CorridorEntry) -> Result<Decimal, FetchError> {
        if !matches!(entry.params(), FetchParams::WesternUnion(_)) {
            return Err(FetchError::Unsupported {
                provider: Provider::WesternUnion.code().to_string(),
                corridor: entry.key().to_string(),
            });
        }

        let document = self.source.fetch_document(entry).await?;
        let value = parse_rate(entry.key(), &document, entry.decimal_style())?;
        debug!("{}: parsed rate {}", entry.key(), value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, DecimalStyle, MoneygramParams, RateKey, WesternUnionParams};
    use rust_decimal_macros::dec;

    struct StubSource {
        document: String,
    }

    #[async_trait]
    impl DocumentSource for StubSource {
        async fn fetch_document(&self, _entry: &CorridorEntry) -> Result<String, FetchError> {
            Ok(self.document.clone())
        }
    }

    fn wu_entry(style: DecimalStyle) -> CorridorEntry {
        CorridorEntry::new(
            RateKey::new(
                Provider::WesternUnion,
                Currency::parse("CAD").unwrap(),
                Currency::parse("TND").unwrap(),
            ),
            FetchParams::WesternUnion(WesternUnionParams {
                url: "https://example.com/send-money-to-tunisia".to_string(),
                selector: "xpath=//span[1]".to_string(),
            }),
            style,
        )
    }

    #[tokio::test]
    async fn test_parses_bare_selector_text() {
        let source = Arc::new(StubSource {
            document: "2.2931".to_string(),
        });
        let extractor = WesternUnionExtractor::new(source);
        let value = extractor.fetch(&wu_entry(DecimalStyle::Dot)).await.unwrap();
        assert_eq!(value, dec!(2.2931));
    }

    #[tokio::test]
    async fn test_honors_comma_decimal_style() {
        let source = Arc::new(StubSource {
            document: "2,2931 TND".to_string(),
        });
        let extractor = WesternUnionExtractor::new(source);
        let value = extractor
            .fetch(&wu_entry(DecimalStyle::Comma))
            .await
            .unwrap();
        assert_eq!(value, dec!(2.2931));
    }

    #[tokio::test]
    async fn test_rejects_foreign_entry_as_unsupported() {
        let source = Arc::new(StubSource {
            document: "2.2931".to_string(),
        });
        let extractor = WesternUnionExtractor::new(source);
        let mg_entry = CorridorEntry::new(
            RateKey::new(
                Provider::Moneygram,
                Currency::parse("CAD").unwrap(),
                Currency::parse("TND").unwrap(),
            ),
            FetchParams::Moneygram(MoneygramParams {
                url: "https://example.com/corridor/tunisia".to_string(),
            }),
            DecimalStyle::Dot,
        );
        let err = extractor.fetch(&mg_entry).await.unwrap_err();
        assert!(matches!(err, FetchError::Unsupported { .. }));
    }
}

//! Read-side access to the current snapshot.

use std::sync::Arc;

use thiserror::Error;

use ratewatch_extract::RateKey;

use crate::snapshot::{Quote, Snapshot, SnapshotStore};

/// Raised when a rate is requested before any snapshot has been published.
///
/// This only happens in a cold-started process between boot and the end of
/// the first refresh cycle; a warm start is ready immediately.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No snapshot has been published yet")]
pub struct NotReadyError;

/// Serves point and whole-snapshot reads against whatever snapshot is
/// current. Reads are constant-time and never wait on a refresh cycle.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<SnapshotStore>,
}

impl QueryService {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }

    /// The whole current snapshot.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, NotReadyError> {
        self.store.get().ok_or(NotReadyError)
    }

    /// The quote for one corridor.
    ///
    /// `Ok(None)` means the corridor is tracked but has produced no value
    /// yet; it is a real answer, not an error.
    pub fn get(&self, key: &RateKey) -> Result<Option<Quote>, NotReadyError> {
        Ok(self.snapshot()?.get(key).cloned())
    }

    /// Whether at least one snapshot has been published.
    pub fn is_ready(&self) -> bool {
        self.store.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use chrono::Utc;
    use ratewatch_extract::CorridorCatalog;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn catalog() -> CorridorCatalog {
        CorridorCatalog::from_json(
            r#"{
                "corridors": [
                    {
                        "provider": "MG",
                        "from": "USD",
                        "to": "MAD",
                        "url": "https://example.com/usd-mad",
                        "decimalStyle": "."
                    },
                    {
                        "provider": "MG",
                        "from": "EUR",
                        "to": "TND",
                        "url": "https://example.com/eur-tnd",
                        "decimalStyle": "."
                    }
                ]
            }"#,
        )
        .expect("test catalog must parse")
    }

    #[tokio::test]
    async fn test_not_ready_before_first_publish() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let store = Arc::new(
            SnapshotStore::open(dir.path().join("fx_rates.json"), &catalog)
                .await
                .unwrap(),
        );
        let query = QueryService::new(store);

        assert!(!query.is_ready());
        assert_eq!(query.snapshot().unwrap_err(), NotReadyError);
        let key = catalog.keys().next().unwrap();
        assert_eq!(query.get(key).unwrap_err(), NotReadyError);
    }

    #[tokio::test]
    async fn test_present_and_absent_are_distinct_answers() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let store = Arc::new(
            SnapshotStore::open(dir.path().join("fx_rates.json"), &catalog)
                .await
                .unwrap(),
        );
        let query = QueryService::new(store.clone());

        let taken_at = Utc::now();
        let keys: Vec<_> = catalog.keys().cloned().collect();
        let mut rates = BTreeMap::new();
        rates.insert(
            keys[0].clone(),
            Some(Quote::new(keys[0].clone(), dec!(10.05), taken_at)),
        );
        rates.insert(keys[1].clone(), None);
        store.publish(Snapshot::new(rates, taken_at)).await.unwrap();

        assert!(query.is_ready());
        let quote = query.get(&keys[0]).unwrap().expect("present quote");
        assert_eq!(quote.value(), dec!(10.05));
        assert_eq!(query.get(&keys[1]).unwrap(), None);
    }

    #[tokio::test]
    async fn test_warm_start_is_ready_immediately() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog();
        let path = dir.path().join("fx_rates.json");
        std::fs::write(
            &path,
            r#"{"timestamp": 1700000000, "rates": {"MG_USD_MAD": 10.05, "MG_EUR_TND": null}}"#,
        )
        .unwrap();

        let store = Arc::new(SnapshotStore::open(&path, &catalog).await.unwrap());
        let query = QueryService::new(store);

        assert!(query.is_ready());
        let key = catalog.keys().next().unwrap();
        let quote = query.get(key).unwrap().expect("restored quote");
        assert_eq!(quote.value(), dec!(10.05));
        assert_eq!(quote.observed_at().timestamp(), 1_700_000_000);
    }
}

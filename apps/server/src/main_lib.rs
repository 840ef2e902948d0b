use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Notify;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use ratewatch_core::{QueryService, RefreshSettings, SnapshotStore};
use ratewatch_extract::{CorridorCatalog, Extractor, ExtractorRegistry, HttpDocumentSource};

pub struct AppState {
    pub catalog: Arc<CorridorCatalog>,
    pub store: Arc<SnapshotStore>,
    pub query_service: Arc<QueryService>,
    pub extractor: Arc<dyn Extractor>,
    pub refresh_settings: RefreshSettings,
    /// Wakes the refresh loop for an out-of-schedule cycle.
    pub refresh_now: Arc<Notify>,
}

pub fn init_tracing() {
    let log_format = std::env::var("RW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let catalog = match &config.catalog_file {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read corridor catalog {}", path))?;
            let catalog = CorridorCatalog::from_json(&contents)
                .with_context(|| format!("Invalid corridor catalog {}", path))?;
            tracing::info!("Corridor catalog loaded from {}: {} corridors", path, catalog.len());
            Arc::new(catalog)
        }
        None => {
            let catalog = CorridorCatalog::builtin();
            tracing::info!("Using built-in corridor catalog: {} corridors", catalog.len());
            Arc::new(catalog)
        }
    };

    let refresh_settings = RefreshSettings::new(
        config.cycle_interval,
        config.fetch_timeout,
        config.max_concurrent_fetches,
    )?;

    let source = Arc::new(HttpDocumentSource::new(refresh_settings.fetch_timeout()));
    let extractor: Arc<dyn Extractor> =
        Arc::new(ExtractorRegistry::new(source, refresh_settings.fetch_timeout()));

    let store = Arc::new(
        SnapshotStore::open(config.snapshot_path.as_str(), &catalog)
            .await
            .with_context(|| format!("Cannot use snapshot path {}", config.snapshot_path))?,
    );
    let query_service = Arc::new(QueryService::new(store.clone()));

    Ok(Arc::new(AppState {
        catalog,
        store,
        query_service,
        extractor,
        refresh_settings,
        refresh_now: Arc::new(Notify::new()),
    }))
}

mod api;
mod config;
mod error;
mod main_lib;
mod scheduler;

use api::app_router;
use config::Config;
use main_lib::{build_state, init_tracing};
use ratewatch_core::RefreshCoordinator;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let coordinator = RefreshCoordinator::new(
        state.catalog.clone(),
        state.extractor.clone(),
        state.store.clone(),
        state.refresh_settings.clone(),
        shutdown_rx.clone(),
        state.refresh_now.clone(),
    );
    let refresh_handle = scheduler::start_refresh_scheduler(coordinator);

    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = signal_tx.send(true);
        }
    });

    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    let mut serve_rx = shutdown_rx;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = serve_rx.changed().await;
        })
        .await?;

    // The refresh loop saw the same signal; let it finish at a cycle
    // boundary before the process exits.
    refresh_handle.await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

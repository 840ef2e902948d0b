use std::collections::BTreeMap;
use std::time::Duration;

use axum::{body::Body, http::Request};
use chrono::Utc;
use ratewatch_core::Snapshot;
use ratewatch_server::{api::app_router, build_state, config::Config};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        snapshot_path: tmp
            .path()
            .join("fx_rates.json")
            .to_string_lossy()
            .into_owned(),
        catalog_file: None,
        cycle_interval: Duration::from_secs(300),
        fetch_timeout: Duration::from_millis(25_000),
        max_concurrent_fetches: 4,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_millis(30_000),
    }
}

#[tokio::test]
async fn healthz_works() {
    let tmp = tempdir().unwrap();
    std::env::set_var("RW_SNAPSHOT_PATH", tmp.path().join("fx_rates.json"));
    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readyz_flips_once_a_snapshot_exists() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 503);

    // A published snapshot makes the process ready even if every corridor
    // is still absent.
    let taken_at = Utc::now();
    let rates: BTreeMap<_, _> = state.catalog.keys().map(|k| (k.clone(), None)).collect();
    state
        .store
        .publish(Snapshot::new(rates, taken_at))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

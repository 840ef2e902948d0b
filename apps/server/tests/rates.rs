use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use ratewatch_core::{Quote, Snapshot};
use ratewatch_server::{api::app_router, build_state, config::Config, AppState};
use rust_decimal_macros::dec;
use serde_json::Value;
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

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Plain-text bodies (the health probes) come back as Null.
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Publishes a snapshot where MG USD->MAD has a value and every other
/// corridor is tracked but absent.
async fn publish_sample(state: &Arc<AppState>) -> DateTime<Utc> {
    let taken_at = Utc::now();
    let rates: BTreeMap<_, _> = state
        .catalog
        .keys()
        .map(|key| {
            let quote = (key.canonical() == "MG_USD_MAD")
                .then(|| Quote::new(key.clone(), dec!(10.05), taken_at));
            (key.clone(), quote)
        })
        .collect();
    state
        .store
        .publish(Snapshot::new(rates, taken_at))
        .await
        .unwrap();
    taken_at
}

#[tokio::test]
async fn rates_are_unavailable_before_the_first_snapshot() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let (status, json) = get(&app, "/api/v1/rates").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], 503);

    let (status, json) = get(&app, "/api/v1/rates/MG/USD/MAD").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], 503);
}

#[tokio::test]
async fn unknown_provider_or_corridor_is_not_found() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let (status, json) = get(&app, "/api/v1/rates/XE/USD/MAD").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);

    // Tracked currencies, untracked pairing.
    let (status, _) = get(&app, "/api/v1/rates/MG/GBP/JPY").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn point_read_returns_rate_and_observation_time() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);
    let taken_at = publish_sample(&state).await;

    let (status, json) = get(&app, "/api/v1/rates/MG/USD/MAD").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["corridor"], "MG_USD_MAD");
    assert_eq!(json["provider"], "MG");
    assert_eq!(json["from"], "USD");
    assert_eq!(json["to"], "MAD");
    assert!((json["rate"].as_f64().unwrap() - 10.05).abs() < 1e-9);
    let observed: DateTime<Utc> = json["observedAt"].as_str().unwrap().parse().unwrap();
    assert_eq!(observed, taken_at);
}

#[tokio::test]
async fn tracked_corridor_without_a_value_answers_with_null() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);
    publish_sample(&state).await;

    let (status, json) = get(&app, "/api/v1/rates/WU/CAD/TND").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["corridor"], "WU_CAD_TND");
    assert!(json["rate"].is_null());
    assert!(json["observedAt"].is_null());
}

#[tokio::test]
async fn provider_names_and_case_are_accepted() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);
    publish_sample(&state).await;

    let (status, json) = get(&app, "/api/v1/rates/moneygram/usd/mad").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["corridor"], "MG_USD_MAD");
}

#[tokio::test]
async fn snapshot_lists_every_tracked_corridor() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state.clone(), &config);
    let taken_at = publish_sample(&state).await;

    let (status, json) = get(&app, "/api/v1/rates").await;
    assert_eq!(status, StatusCode::OK);

    let reported: DateTime<Utc> = json["takenAt"].as_str().unwrap().parse().unwrap();
    assert_eq!(reported, taken_at);

    let rates = json["rates"].as_object().unwrap();
    assert_eq!(rates.len(), state.catalog.len());
    assert!((rates["MG_USD_MAD"]["rate"].as_f64().unwrap() - 10.05).abs() < 1e-9);
    assert!(rates["WU_CAD_TND"].is_null());
}

#[tokio::test]
async fn warm_start_serves_rates_from_the_mirror_file() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    std::fs::write(
        &config.snapshot_path,
        r#"{"timestamp": 1700000000, "rates": {"MG_USD_MAD": 10.05}}"#,
    )
    .unwrap();

    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let (status, _) = get(&app, "/api/v1/readyz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get(&app, "/api/v1/rates/MG/USD/MAD").await;
    assert_eq!(status, StatusCode::OK);
    assert!((json["rate"].as_f64().unwrap() - 10.05).abs() < 1e-9);
    let observed: DateTime<Utc> = json["observedAt"].as_str().unwrap().parse().unwrap();
    assert_eq!(observed.timestamp(), 1_700_000_000);
}

#[tokio::test]
async fn refresh_trigger_is_accepted() {
    let tmp = tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

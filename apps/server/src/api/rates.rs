use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use ratewatch_core::Quote;
use ratewatch_extract::Provider;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CorridorRateResponse {
    corridor: String,
    provider: String,
    from: String,
    to: String,
    /// `null` while the corridor has produced no value yet.
    rate: Option<Decimal>,
    observed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RateEntry {
    rate: Decimal,
    observed_at: DateTime<Utc>,
}

impl From<&Quote> for RateEntry {
    fn from(quote: &Quote) -> Self {
        Self {
            rate: quote.value(),
            observed_at: quote.observed_at(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotResponse {
    taken_at: DateTime<Utc>,
    rates: BTreeMap<String, Option<RateEntry>>,
}

/// Point read for one corridor. Unknown providers and untracked corridors
/// are 404; a tracked corridor without a value answers with a null rate.
async fn get_rate(
    Path((provider, from, to)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CorridorRateResponse>> {
    let entry = Provider::from_code(&provider)
        .and_then(|provider| state.catalog.resolve(provider, &from, &to))
        .ok_or(ApiError::NotFound)?;

    let key = entry.key();
    let quote = state.query_service.get(key)?;
    Ok(Json(CorridorRateResponse {
        corridor: key.canonical(),
        provider: key.provider().code().to_string(),
        from: key.from_currency().to_string(),
        to: key.to_currency().to_string(),
        rate: quote.as_ref().map(Quote::value),
        observed_at: quote.as_ref().map(Quote::observed_at),
    }))
}

/// The whole current snapshot, every tracked corridor included.
async fn get_snapshot(State(state): State<Arc<AppState>>) -> ApiResult<Json<SnapshotResponse>> {
    let snapshot = state.query_service.snapshot()?;
    let rates = snapshot
        .rates()
        .iter()
        .map(|(key, quote)| (key.canonical(), quote.as_ref().map(RateEntry::from)))
        .collect();
    Ok(Json(SnapshotResponse {
        taken_at: snapshot.taken_at(),
        rates,
    }))
}

/// Wakes the refresh loop for an immediate out-of-schedule cycle. The
/// cycle runs in the background; callers poll `/rates` for the result.
async fn trigger_refresh(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.refresh_now.notify_one();
    Ok(StatusCode::ACCEPTED)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rates", get(get_snapshot))
        .route("/rates/{provider}/{from}/{to}", get(get_rate))
        .route("/refresh", post(trigger_refresh))
}

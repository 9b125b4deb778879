//! HTTP routes for the weight feeds

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use trend_core::{DailyRecord, WeightRecord, daily_export, weights_since};

use crate::mock::WeightStore;

/// Lookback used when a request has no `days` parameter
pub const DEFAULT_DAYS: i64 = 365;

pub struct ServerState {
    pub store: WeightStore,
    pub default_user: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub days: Option<String>,
    pub user: Option<String>,
}

pub fn router(state: Arc<ServerState>, static_dir: &str) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/data", get(data))
        .route("/weights", get(weights))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Smoothed daily feed
pub async fn data(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<DailyRecord>> {
    Json(daily_feed(&state, &query, Utc::now()))
}

/// Raw weighings in the lookback window
pub async fn weights(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<FeedQuery>,
) -> Json<Vec<WeightRecord>> {
    Json(raw_feed(&state, &query, Utc::now()))
}

/// Resolve the query to (user's weights, days). Any problem is logged and
/// answered with an empty feed rather than an error status.
fn resolve<'a>(state: &'a ServerState, query: &FeedQuery) -> Option<(&'a [WeightRecord], i64)> {
    let user = query.user.as_deref().unwrap_or(&state.default_user);

    let days = match query.days.as_deref().filter(|d| !d.is_empty()) {
        None => DEFAULT_DAYS,
        Some(raw) => match raw.parse::<i64>() {
            Ok(days) => days,
            Err(e) => {
                tracing::warn!("getting data for user={:?} days={:?}: {}", user, raw, e);
                return None;
            }
        },
    };

    match state.store.weights(user) {
        Some(weights) => {
            tracing::debug!("user {:?} has {} weights", user, weights.len());
            Some((weights, days))
        }
        None => {
            tracing::warn!("getting data for user={:?} days={}: no such user", user, days);
            None
        }
    }
}

pub fn daily_feed(state: &ServerState, query: &FeedQuery, now: DateTime<Utc>) -> Vec<DailyRecord> {
    let Some((weights, days)) = resolve(state, query) else {
        return Vec::new();
    };

    let records = daily_export(weights, days, now);
    tracing::debug!("returning {} days", records.len());
    records
}

pub fn raw_feed(state: &ServerState, query: &FeedQuery, now: DateTime<Utc>) -> Vec<WeightRecord> {
    resolve(state, query)
        .map(|(weights, days)| weights_since(weights, days, now))
        .unwrap_or_default()
}

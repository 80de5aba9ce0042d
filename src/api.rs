// src/api.rs
//! Read-only HTTP surface for the display surfaces (banner, popups,
//! homework badge, updates drawer). All views derive from the same
//! broadcaster snapshot; nothing here re-runs the pipeline except the
//! explicit refresh endpoint.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::broadcast::{FeedState, Snapshot, UpdatesHandle};
use crate::feed::types::Update;

#[derive(Clone)]
pub struct AppState {
    pub updates: UpdatesHandle,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/updates", get(list_updates))
        .route("/api/updates/summary", get(summary))
        .route("/api/refresh", post(refresh))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn list_updates(State(state): State<AppState>) -> Json<Vec<Update>> {
    Json(state.updates.snapshot().updates.as_ref().clone())
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOut {
    state: FeedState,
    count: usize,
    homework_count: usize,
    last_refresh_unix: Option<i64>,
}

impl From<Snapshot> for SummaryOut {
    fn from(snap: Snapshot) -> Self {
        Self {
            state: snap.state,
            count: snap.updates.len(),
            homework_count: snap.homework_count(),
            last_refresh_unix: snap.last_refresh_unix,
        }
    }
}

async fn summary(State(state): State<AppState>) -> Json<SummaryOut> {
    Json(state.updates.snapshot().into())
}

/// Pull-to-refresh: runs a cycle and answers only after the fresh
/// snapshot is published.
async fn refresh(State(state): State<AppState>) -> Json<SummaryOut> {
    Json(state.updates.refresh().await.into())
}

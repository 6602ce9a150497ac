//! Readiness endpoint
//!
//! Reports whether the queue store answers. A store that cannot be reached
//! turns the response into a 503 so load balancers stop routing to us.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `postgres` or `memory`
    pub store: &'static str,
    pub store_ready: bool,
    pub require_page: bool,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let store_ready = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(store = state.store.backend(), "store ping failed: {}", e);
            false
        }
    };

    let (code, status) = if store_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        code,
        Json(HealthResponse {
            status,
            store: state.store.backend(),
            store_ready,
            require_page: state.require_page,
        }),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::warn;

use super::{AppState, HealthResponse};

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.store().ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!(error = %e, "Health check database ping failed");
            "error"
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        database,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

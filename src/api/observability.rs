use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;
use crate::constants::cabinet::OWNER_HEADER;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Feature a route belongs to, used as a bounded metrics label.
fn area(route: Option<&str>) -> &'static str {
    match route.map(|r| r.trim_start_matches("/api")) {
        Some(r) if r.starts_with("/fda") => "drug_search",
        Some(r) if r.starts_with("/safety") => "interactions",
        Some(r) if r.starts_with("/user") => "cabinet",
        Some(r) if r.starts_with("/medicines") => "catalog",
        Some(_) => "system",
        None => "unmatched",
    }
}

/// Maps a status to what it means for the caller of this API.
fn outcome(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "ok",
        400 => "rejected",
        404 => "not_found",
        409 => "conflict",
        500..=599 => "failed",
        _ => "other",
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let area = area(route.as_deref());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        area,
        route = route.as_deref().unwrap_or("unmatched"),
        owner = req.headers().get(OWNER_HEADER).and_then(|h| h.to_str().ok()),
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let outcome = outcome(status);
        let elapsed = start.elapsed();

        let labels = [("area", area), ("outcome", outcome)];
        metrics::counter!("medguide_requests_total", &labels).increment(1);
        metrics::histogram!("medguide_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            warn!(status = status.as_u16(), outcome, duration_ms, "Request failed");
        } else {
            info!(status = status.as_u16(), outcome, duration_ms, "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}

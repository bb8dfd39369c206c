use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use leave_intel::intelligence::{leave_router, InferenceGateway, LeaveIntelligence};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_leave_routes<G>(engine: Arc<LeaveIntelligence<G>>) -> axum::Router
where
    G: InferenceGateway + 'static,
{
    leave_router(engine)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let inference = if state.delegating { "remote" } else { "local" };
    let payload = if ready {
        json!({ "status": "ready", "inference": inference })
    } else {
        json!({ "status": "initializing", "inference": inference })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

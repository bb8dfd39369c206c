use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{AssistantQuery, ExtractionRequest, LeaveRequestDraft};
use super::facade::LeaveIntelligence;
use super::gateway::InferenceGateway;

/// Router builder exposing the three leave capabilities over HTTP.
pub fn leave_router<G>(engine: Arc<LeaveIntelligence<G>>) -> Router
where
    G: InferenceGateway + 'static,
{
    Router::new()
        .route("/api/v1/leave/extract", post(extract_handler::<G>))
        .route("/api/v1/leave/assess", post(assess_handler::<G>))
        .route("/api/v1/leave/respond", post(respond_handler::<G>))
        .with_state(engine)
}

pub(crate) async fn extract_handler<G>(
    State(engine): State<Arc<LeaveIntelligence<G>>>,
    axum::Json(request): axum::Json<ExtractionRequest>,
) -> Response
where
    G: InferenceGateway + 'static,
{
    let draft = engine.extract(&request.text, &request.sender_email).await;
    (StatusCode::OK, axum::Json(draft)).into_response()
}

pub(crate) async fn assess_handler<G>(
    State(engine): State<Arc<LeaveIntelligence<G>>>,
    axum::Json(draft): axum::Json<LeaveRequestDraft>,
) -> Response
where
    G: InferenceGateway + 'static,
{
    if let Err(reason) = draft.validate() {
        let payload = json!({
            "error": reason,
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let assessment = engine.assess(&draft).await;
    (StatusCode::OK, axum::Json(assessment)).into_response()
}

pub(crate) async fn respond_handler<G>(
    State(engine): State<Arc<LeaveIntelligence<G>>>,
    axum::Json(query): axum::Json<AssistantQuery>,
) -> Response
where
    G: InferenceGateway + 'static,
{
    let reply = engine.respond(&query.query, query.context.as_ref()).await;
    (StatusCode::OK, axum::Json(reply)).into_response()
}

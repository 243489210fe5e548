use crate::domain::transaction::TransactionRecord;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::Instrument;
use uuid::Uuid;

pub async fn handle_request(
    State(state): State<AppState>,
    Json(req): Json<TransactionRecord>,
) -> impl IntoResponse {
    let span = tracing::info_span!(
        "offer_request",
        request_id = %Uuid::new_v4(),
        member_id = %req.member_id
    );

    match state.offer_service.process(req).instrument(span).await {
        Ok(outcome) => (axum::http::StatusCode::OK, Json(outcome.response)).into_response(),
        Err(e) => (e.status_code(), Json(e.envelope())).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({"status": "ok"})),
    )
}

use crate::domain::offer::err;
use crate::domain::transaction::TransactionRecord;
use crate::HistoryState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

pub async fn store_member_data(
    State(state): State<HistoryState>,
    Json(record): Json<TransactionRecord>,
) -> impl IntoResponse {
    if let Err(message) = record.validate() {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(err("INVALID_TRANSACTION", &message)),
        )
            .into_response();
    }

    match state.store.append(record.clone()).await {
        Ok(()) => (axum::http::StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            tracing::error!("storing member data failed: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(err("STORE_UNAVAILABLE", &e.to_string())),
            )
                .into_response()
        }
    }
}

pub async fn get_member_data(
    State(state): State<HistoryState>,
    Path(member_id): Path<String>,
) -> impl IntoResponse {
    match state.store.list(&member_id).await {
        Ok(Some(records)) => (axum::http::StatusCode::OK, Json(records)).into_response(),
        Ok(None) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(err("MEMBER_NOT_FOUND", "Member not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("reading member data failed: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(err("STORE_UNAVAILABLE", &e.to_string())),
            )
                .into_response()
        }
    }
}

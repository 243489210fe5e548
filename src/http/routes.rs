use crate::http::handlers::{member_data, model, requests};
use crate::{AppState, HistoryState};
use axum::routing::{get, post};
use axum::Router;

pub fn offer_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(requests::health))
        .route("/api/requests/v1", post(requests::handle_request))
        .with_state(state)
}

pub fn history_router(state: HistoryState) -> Router {
    Router::new()
        .route("/health", get(requests::health))
        .route("/member_data", post(member_data::store_member_data))
        .route("/member_data/:member_id", get(member_data::get_member_data))
        .with_state(state)
}

pub fn model_router() -> Router {
    Router::new()
        .route("/health", get(requests::health))
        .route("/ml/ats/predict", post(model::predict_ats))
        .route("/ml/resp/predict", post(model::predict_resp))
        .route("/offer/assign", post(model::assign))
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

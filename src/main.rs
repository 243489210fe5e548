use perk_offers::clients::http::{HttpMemberHistory, HttpScoringModel, OutboundClient};
use perk_offers::clients::local::LocalScoringModel;
use perk_offers::clients::ScoringModel;
use perk_offers::config::AppConfig;
use perk_offers::http::routes::{offer_router, shutdown_signal};
use perk_offers::metrics::sink::CsvMetricsSink;
use perk_offers::service::offer_service::OfferService;
use perk_offers::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env();
    perk_offers::logging::init(cfg.log_file.as_deref())?;

    let outbound = OutboundClient::open(cfg.outbound_timeout())?;

    let model: Arc<dyn ScoringModel> = match cfg.scoring_mode.as_str() {
        "local" => Arc::new(LocalScoringModel),
        _ => Arc::new(HttpScoringModel::new(&cfg.model_url, &outbound)),
    };
    let offer_service = OfferService {
        history: Arc::new(HttpMemberHistory::new(&cfg.member_history_url, &outbound)),
        model,
        metrics: Arc::new(CsvMetricsSink::open(&cfg.metrics_csv_path)?),
    };

    let app = offer_router(AppState { offer_service });

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        "listening on {} (history: {}, scoring: {})",
        cfg.bind_addr,
        cfg.member_history_url,
        cfg.scoring_mode
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    outbound.close();
    Ok(())
}

use anyhow::Result;
use perk_offers::config::AppConfig;
use perk_offers::http::routes::{model_router, shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::from_env();
    perk_offers::logging::init(cfg.log_file.as_deref())?;

    let listener = tokio::net::TcpListener::bind(&cfg.model_bind_addr).await?;
    tracing::info!("model server listening on {}", cfg.model_bind_addr);
    axum::serve(listener, model_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

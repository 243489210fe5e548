use anyhow::Result;
use perk_offers::config::AppConfig;
use perk_offers::history::memory::InMemoryHistoryStore;
use perk_offers::history::store_redis::RedisHistoryStore;
use perk_offers::history::HistoryStore;
use perk_offers::http::routes::{history_router, shutdown_signal};
use perk_offers::HistoryState;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppConfig::from_env();
    perk_offers::logging::init(cfg.log_file.as_deref())?;

    let store: Arc<dyn HistoryStore> = match cfg.history_backend.as_str() {
        "redis" => Arc::new(RedisHistoryStore::new(&cfg.redis_url)?),
        _ => Arc::new(InMemoryHistoryStore::new()),
    };

    let app = history_router(HistoryState { store });

    let listener = tokio::net::TcpListener::bind(&cfg.history_bind_addr).await?;
    tracing::info!(
        "member history listening on {} (backend: {})",
        cfg.history_bind_addr,
        cfg.history_backend
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub history_bind_addr: String,
    pub model_bind_addr: String,
    pub member_history_url: String,
    pub model_url: String,
    pub scoring_mode: String,
    pub history_backend: String,
    pub redis_url: String,
    pub metrics_csv_path: String,
    pub log_file: Option<String>,
    pub outbound_timeout_ms: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:6000".to_string()),
            history_bind_addr: std::env::var("HISTORY_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:6001".to_string()),
            model_bind_addr: std::env::var("MODEL_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:6002".to_string()),
            member_history_url: std::env::var("MEMBER_HISTORY_URL")
                .unwrap_or_else(|_| "http://localhost:6001".to_string()),
            model_url: std::env::var("MODEL_URL").unwrap_or_else(|_| "http://localhost:6002".to_string()),
            scoring_mode: std::env::var("SCORING_MODE").unwrap_or_else(|_| "http".to_string()),
            history_backend: std::env::var("HISTORY_BACKEND").unwrap_or_else(|_| "memory".to_string()),
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string()),
            metrics_csv_path: std::env::var("METRICS_CSV_PATH")
                .unwrap_or_else(|_| "logs/transactions.csv".to_string()),
            log_file: std::env::var("LOG_FILE").ok().filter(|s| !s.is_empty()),
            outbound_timeout_ms: std::env::var("OUTBOUND_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok()),
        }
    }

    /// `None` leaves outbound calls without a deadline.
    pub fn outbound_timeout(&self) -> Option<Duration> {
        self.outbound_timeout_ms.map(Duration::from_millis)
    }
}

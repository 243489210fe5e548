use crate::metrics::row::{RequestMetrics, CSV_COLUMNS};
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait::async_trait]
pub trait MetricsSink: Send + Sync {
    async fn record(&self, row: &RequestMetrics) -> Result<()>;
}

/// Appends request rows to a CSV file, writing the header only when the file is new.
#[derive(Clone)]
pub struct CsvMetricsSink {
    pub path: PathBuf,
    writer: Arc<Mutex<csv::Writer<File>>>,
}

impl CsvMetricsSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating metrics directory {}", parent.display()))?;
        }

        let needs_header = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening metrics file {}", path.display()))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer.write_record(CSV_COLUMNS)?;
            writer.flush()?;
            tracing::info!("created metrics log {}", path.display());
        }

        Ok(Self {
            path,
            writer: Arc::new(Mutex::new(writer)),
        })
    }
}

#[async_trait::async_trait]
impl MetricsSink for CsvMetricsSink {
    async fn record(&self, row: &RequestMetrics) -> Result<()> {
        let mut writer = self.writer.lock().await;
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryMetricsSink {
    rows: Arc<Mutex<Vec<RequestMetrics>>>,
}

impl MemoryMetricsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn rows(&self) -> Vec<RequestMetrics> {
        self.rows.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl MetricsSink for MemoryMetricsSink {
    async fn record(&self, row: &RequestMetrics) -> Result<()> {
        self.rows.lock().await.push(row.clone());
        Ok(())
    }
}

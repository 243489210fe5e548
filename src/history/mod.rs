use crate::domain::transaction::TransactionRecord;
use anyhow::Result;

pub mod memory;
pub mod store_redis;

/// Append-only per-member transaction log behind the member history service.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, record: TransactionRecord) -> Result<()>;

    /// Records in insertion order, `None` when nothing was ever stored for the member.
    async fn list(&self, member_id: &str) -> Result<Option<Vec<TransactionRecord>>>;
}

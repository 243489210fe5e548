use crate::clients::MemberHistoryGateway;
use crate::domain::transaction::TransactionRecord;
use crate::error::ClientError;
use crate::history::HistoryStore;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    inner: Arc<RwLock<HashMap<String, Vec<TransactionRecord>>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, records: Vec<TransactionRecord>) {
        for record in records {
            self.push(record).await;
        }
    }

    async fn push(&self, record: TransactionRecord) {
        let mut write = self.inner.write().await;
        write.entry(record.member_id.clone()).or_default().push(record);
    }

    async fn snapshot(&self, member_id: &str) -> Option<Vec<TransactionRecord>> {
        self.inner.read().await.get(member_id).cloned()
    }
}

#[async_trait::async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, record: TransactionRecord) -> Result<()> {
        self.push(record).await;
        Ok(())
    }

    async fn list(&self, member_id: &str) -> Result<Option<Vec<TransactionRecord>>> {
        Ok(self.snapshot(member_id).await)
    }
}

// Lets the orchestrator run against the store without the HTTP hop.
#[async_trait::async_trait]
impl MemberHistoryGateway for InMemoryHistoryStore {
    async fn fetch_history(&self, member_id: &str) -> Result<Option<Vec<TransactionRecord>>, ClientError> {
        Ok(self.snapshot(member_id).await)
    }

    async fn save_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError> {
        self.push(record.clone()).await;
        Ok(())
    }
}

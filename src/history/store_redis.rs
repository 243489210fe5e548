use crate::domain::transaction::TransactionRecord;
use crate::history::HistoryStore;
use anyhow::{Context, Result};
use redis::AsyncCommands;

#[derive(Clone)]
pub struct RedisHistoryStore {
    pub client: redis::Client,
}

impl RedisHistoryStore {
    pub fn new(redis_url: &str) -> Result<Self> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
        })
    }

    pub fn member_key(member_id: &str) -> String {
        format!("member_history:{}", member_id)
    }
}

#[async_trait::async_trait]
impl HistoryStore for RedisHistoryStore {
    async fn append(&self, record: TransactionRecord) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(&record)?;
        let _: i64 = conn.rpush(Self::member_key(&record.member_id), payload).await?;
        Ok(())
    }

    async fn list(&self, member_id: &str) -> Result<Option<Vec<TransactionRecord>>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = Self::member_key(member_id);
        let payloads: Vec<String> = conn.lrange(&key, 0, -1).await?;
        if payloads.is_empty() {
            return Ok(None);
        }

        let records = payloads
            .iter()
            .map(|p| serde_json::from_str::<TransactionRecord>(p).with_context(|| format!("decoding entry of {}", key)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(records))
    }
}

use crate::domain::features::MemberFeatures;
use crate::domain::transaction::TransactionRecord;
use crate::error::ClientError;

pub mod http;
pub mod local;

#[async_trait::async_trait]
pub trait MemberHistoryGateway: Send + Sync {
    /// Ordered history for the member, `None` when the member is unknown.
    async fn fetch_history(&self, member_id: &str) -> Result<Option<Vec<TransactionRecord>>, ClientError>;

    async fn save_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError>;
}

#[async_trait::async_trait]
pub trait ScoringModel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn predict_ats(&self, features: &MemberFeatures) -> Result<f64, ClientError>;

    async fn predict_resp(&self, features: &MemberFeatures) -> Result<f64, ClientError>;
}

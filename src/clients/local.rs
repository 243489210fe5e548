use crate::clients::ScoringModel;
use crate::domain::features::MemberFeatures;
use crate::error::ClientError;
use crate::scoring::model::{predict_ats, predict_resp};

/// Scores in-process instead of calling the model server.
pub struct LocalScoringModel;

#[async_trait::async_trait]
impl ScoringModel for LocalScoringModel {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn predict_ats(&self, features: &MemberFeatures) -> Result<f64, ClientError> {
        Ok(predict_ats(features))
    }

    async fn predict_resp(&self, features: &MemberFeatures) -> Result<f64, ClientError> {
        Ok(predict_resp(features))
    }
}

use crate::clients::{MemberHistoryGateway, ScoringModel};
use crate::domain::features::MemberFeatures;
use crate::domain::offer::{Offer, OfferResponse, ScorePair};
use crate::domain::transaction::TransactionRecord;
use crate::error::{ModelKind, PipelineError};
use crate::metrics::row::{RequestMetrics, StageLatencies};
use crate::metrics::sink::MetricsSink;
use crate::scoring::features::compute_features_now;
use crate::scoring::offer_policy::assign_offer;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct OfferService {
    pub history: Arc<dyn MemberHistoryGateway>,
    pub model: Arc<dyn ScoringModel>,
    pub metrics: Arc<dyn MetricsSink>,
}

/// Everything the scored stages produced for one request.
#[derive(Debug, Clone)]
pub struct CalculatedOffer {
    pub features: MemberFeatures,
    pub scores: ScorePair,
    pub offer: Offer,
    pub latencies: StageLatencies,
}

#[derive(Debug, Clone)]
pub struct OfferOutcome {
    pub response: OfferResponse,
    pub metrics: RequestMetrics,
}

impl OfferService {
    pub async fn process(&self, transaction: TransactionRecord) -> Result<OfferOutcome, PipelineError> {
        transaction.validate().map_err(PipelineError::Validation)?;

        let calculated = self.calculate_offer(&transaction).await?;
        let persisted = self.save_transaction(&transaction).await;

        let row = RequestMetrics::new(
            &transaction.member_id,
            &calculated.features,
            &calculated.scores,
            calculated.offer,
            &calculated.latencies,
            persisted,
        );
        self.metrics.record(&row).await.map_err(|e| {
            tracing::error!("recording metrics for member {} failed: {}", transaction.member_id, e);
            PipelineError::Metrics(e)
        })?;

        Ok(OfferOutcome {
            response: OfferResponse {
                member_id: transaction.member_id,
                offer: calculated.offer,
            },
            metrics: row,
        })
    }

    /// Fetch, aggregate, predict and assign. Any error here aborts the request.
    pub async fn calculate_offer(&self, transaction: &TransactionRecord) -> Result<CalculatedOffer, PipelineError> {
        let member_id = transaction.member_id.as_str();

        let start = Instant::now();
        let mut transactions = match self.history.fetch_history(member_id).await {
            Ok(Some(history)) => {
                tracing::info!("member history fetched: {} records", history.len());
                history
            }
            Ok(None) => {
                tracing::info!("member {} does not have purchase history", member_id);
                Vec::new()
            }
            Err(e) => {
                tracing::error!(
                    "member history fetch failed after {:?}: {}",
                    start.elapsed(),
                    e
                );
                return Err(PipelineError::HistoryFetch(e));
            }
        };
        let fetch_member_data = start.elapsed();

        let start = Instant::now();
        transactions.push(transaction.clone());
        let features = compute_features_now(&transactions)?;
        let calculate_features = start.elapsed();

        let start = Instant::now();
        let scores = self.predict(&features).await?;
        let get_predictions = start.elapsed();

        let start = Instant::now();
        let offer = assign_offer(&scores);
        let assign_offer_latency = start.elapsed();

        tracing::info!(
            "offer {} assigned (ats={:.4}, resp={:.4})",
            offer,
            scores.ats,
            scores.resp
        );

        Ok(CalculatedOffer {
            features,
            scores,
            offer,
            latencies: StageLatencies {
                fetch_member_data,
                calculate_features,
                get_predictions,
                assign_offer: assign_offer_latency,
            },
        })
    }

    // ATS strictly before RESP; RESP is never attempted when ATS fails.
    async fn predict(&self, features: &MemberFeatures) -> Result<ScorePair, PipelineError> {
        let ats = self.model.predict_ats(features).await.map_err(|source| {
            tracing::warn!("ATS fetching failed: {}", source);
            PipelineError::Prediction {
                model: ModelKind::Ats,
                source,
            }
        })?;
        tracing::info!("ATS fetched successfully via {} model", self.model.name());

        let resp = self.model.predict_resp(features).await.map_err(|source| {
            tracing::warn!("RESP fetching failed: {}", source);
            PipelineError::Prediction {
                model: ModelKind::Resp,
                source,
            }
        })?;
        tracing::info!("RESP fetched successfully via {} model", self.model.name());

        Ok(ScorePair { ats, resp })
    }

    async fn save_transaction(&self, transaction: &TransactionRecord) -> bool {
        match self.history.save_transaction(transaction).await {
            Ok(()) => {
                tracing::info!("member {} transaction saved", transaction.member_id);
                true
            }
            Err(e) => {
                tracing::error!(
                    "saving transaction for member {} failed, continuing: {}",
                    transaction.member_id,
                    e
                );
                false
            }
        }
    }
}

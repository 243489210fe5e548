use crate::domain::features::MemberFeatures;
use crate::domain::offer::{Offer, ScorePair};
use serde::Serialize;
use std::time::Duration;

pub const CSV_COLUMNS: [&str; 18] = [
    "memberId",
    "AVG_POINTS_BOUGHT",
    "AVG_REVENUE_USD",
    "LAST_3_TRANSACTIONS_AVG_POINTS_BOUGHT",
    "LAST_3_TRANSACTIONS_AVG_REVENUE_USD",
    "PCT_BUY_TRANSACTIONS",
    "PCT_GIFT_TRANSACTIONS",
    "PCT_REDEEM_TRANSACTIONS",
    "DAYS_SINCE_LAST_TRANSACTION",
    "ats",
    "resp",
    "offer",
    "fetch_member_data_latency",
    "calculate_features_latency",
    "get_predictions_latency",
    "assign_offer_latency",
    "total_latency",
    "persisted",
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageLatencies {
    pub fetch_member_data: Duration,
    pub calculate_features: Duration,
    pub get_predictions: Duration,
    pub assign_offer: Duration,
}

impl StageLatencies {
    /// Sum of the four scored stages; persistence and the metrics write are not included.
    pub fn total(&self) -> Duration {
        self.fetch_member_data + self.calculate_features + self.get_predictions + self.assign_offer
    }
}

/// One row of the request log. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestMetrics {
    #[serde(rename = "memberId")]
    pub member_id: String,
    #[serde(rename = "AVG_POINTS_BOUGHT")]
    pub avg_points_bought: f64,
    #[serde(rename = "AVG_REVENUE_USD")]
    pub avg_revenue_usd: f64,
    #[serde(rename = "LAST_3_TRANSACTIONS_AVG_POINTS_BOUGHT")]
    pub last_3_transactions_avg_points_bought: f64,
    #[serde(rename = "LAST_3_TRANSACTIONS_AVG_REVENUE_USD")]
    pub last_3_transactions_avg_revenue_usd: f64,
    #[serde(rename = "PCT_BUY_TRANSACTIONS")]
    pub pct_buy_transactions: f64,
    #[serde(rename = "PCT_GIFT_TRANSACTIONS")]
    pub pct_gift_transactions: f64,
    #[serde(rename = "PCT_REDEEM_TRANSACTIONS")]
    pub pct_redeem_transactions: f64,
    #[serde(rename = "DAYS_SINCE_LAST_TRANSACTION")]
    pub days_since_last_transaction: i64,
    pub ats: f64,
    pub resp: f64,
    pub offer: Offer,
    pub fetch_member_data_latency: f64,
    pub calculate_features_latency: f64,
    pub get_predictions_latency: f64,
    pub assign_offer_latency: f64,
    pub total_latency: f64,
    pub persisted: bool,
}

impl RequestMetrics {
    pub fn new(
        member_id: &str,
        features: &MemberFeatures,
        scores: &ScorePair,
        offer: Offer,
        latencies: &StageLatencies,
        persisted: bool,
    ) -> Self {
        Self {
            member_id: member_id.to_string(),
            avg_points_bought: features.avg_points_bought,
            avg_revenue_usd: features.avg_revenue_usd,
            last_3_transactions_avg_points_bought: features.last_3_transactions_avg_points_bought,
            last_3_transactions_avg_revenue_usd: features.last_3_transactions_avg_revenue_usd,
            pct_buy_transactions: features.pct_buy_transactions,
            pct_gift_transactions: features.pct_gift_transactions,
            pct_redeem_transactions: features.pct_redeem_transactions,
            days_since_last_transaction: features.days_since_last_transaction,
            ats: scores.ats,
            resp: scores.resp,
            offer,
            fetch_member_data_latency: latencies.fetch_member_data.as_secs_f64(),
            calculate_features_latency: latencies.calculate_features.as_secs_f64(),
            get_predictions_latency: latencies.get_predictions.as_secs_f64(),
            assign_offer_latency: latencies.assign_offer.as_secs_f64(),
            total_latency: latencies.total().as_secs_f64(),
            persisted,
        }
    }
}

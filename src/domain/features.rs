use serde::{Deserialize, Serialize};

/// Statistical summary of a member's transactions, sent as the body of both
/// prediction calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct MemberFeatures {
    pub avg_points_bought: f64,
    pub avg_revenue_usd: f64,
    pub last_3_transactions_avg_points_bought: f64,
    pub last_3_transactions_avg_revenue_usd: f64,
    pub pct_buy_transactions: f64,
    pub pct_gift_transactions: f64,
    pub pct_redeem_transactions: f64,
    pub days_since_last_transaction: i64,
}

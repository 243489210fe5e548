use crate::domain::features::MemberFeatures;
use crate::domain::transaction::{TransactionRecord, TransactionType};
use crate::error::PipelineError;
use chrono::NaiveDateTime;

const RECENT_WINDOW: usize = 3;
const SECONDS_PER_DAY: i64 = 86_400;

/// Aggregates a member's transactions, current one last, into features.
/// `now` is the naive local wall-clock time used for the recency feature.
pub fn compute_features(
    transactions: &[TransactionRecord],
    now: NaiveDateTime,
) -> Result<MemberFeatures, PipelineError> {
    let last = transactions.last().ok_or(PipelineError::EmptyHistory)?;
    let recent = &transactions[transactions.len().saturating_sub(RECENT_WINDOW)..];

    Ok(MemberFeatures {
        avg_points_bought: mean(transactions, |t| t.points_bought),
        avg_revenue_usd: mean(transactions, |t| t.revenue_usd),
        last_3_transactions_avg_points_bought: mean(recent, |t| t.points_bought),
        last_3_transactions_avg_revenue_usd: mean(recent, |t| t.revenue_usd),
        pct_buy_transactions: share(transactions, &TransactionType::Buy),
        pct_gift_transactions: share(transactions, &TransactionType::Gift),
        pct_redeem_transactions: share(transactions, &TransactionType::Redeem),
        days_since_last_transaction: whole_days_between(last.timestamp, now),
    })
}

pub fn compute_features_now(transactions: &[TransactionRecord]) -> Result<MemberFeatures, PipelineError> {
    compute_features(transactions, chrono::Local::now().naive_local())
}

fn mean(transactions: &[TransactionRecord], field: impl Fn(&TransactionRecord) -> f64) -> f64 {
    transactions.iter().map(field).sum::<f64>() / transactions.len() as f64
}

fn share(transactions: &[TransactionRecord], kind: &TransactionType) -> f64 {
    let matching = transactions
        .iter()
        .filter(|t| &t.transaction_type == kind)
        .count();
    matching as f64 / transactions.len() as f64
}

// Floors towards negative infinity, so a timestamp 1h (or 300ms) in the future is -1 days.
fn whole_days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let elapsed = to - from;
    // num_seconds truncates towards zero
    let mut seconds = elapsed.num_seconds();
    if elapsed.subsec_nanos() < 0 {
        seconds -= 1;
    }
    seconds.div_euclid(SECONDS_PER_DAY)
}

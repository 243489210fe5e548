use crate::domain::features::MemberFeatures;

pub const RESP_CEILING: f64 = 0.9;

/// Expected transaction volume, skewed by the buy/gift vs redeem balance.
pub fn predict_ats(f: &MemberFeatures) -> f64 {
    let expected_volume =
        f.last_3_transactions_avg_points_bought * 0.7 + f.avg_points_bought * 0.3;
    let weight = floor0(f.pct_buy_transactions + f.pct_gift_transactions - f.pct_redeem_transactions);
    (expected_volume * weight).abs()
}

/// Responsiveness score, capped at [`RESP_CEILING`].
pub fn predict_resp(f: &MemberFeatures) -> f64 {
    let product_weight = f.pct_buy_transactions * 0.4
        + f.pct_gift_transactions * 0.3
        + f.pct_redeem_transactions * 0.3;
    let revenue_weight =
        (f.avg_revenue_usd * 0.3 + f.last_3_transactions_avg_revenue_usd * 0.7) / 100.0;
    let product = product_weight * revenue_weight * day_weight(f.days_since_last_transaction);
    (1000.0 * product).min(RESP_CEILING)
}

// Future-dated transactions (negative day counts) score like same-day ones.
pub fn day_weight(days_since_last: i64) -> f64 {
    1.0 / (days_since_last.saturating_add(1)).max(1) as f64
}

fn floor0(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else {
        v
    }
}

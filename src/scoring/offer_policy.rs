use crate::domain::offer::{Offer, ScorePair};

pub const DISCOUNT_THRESHOLD: f64 = 200.0;

pub fn assign_offer(scores: &ScorePair) -> Offer {
    if scores.ats * scores.resp >= DISCOUNT_THRESHOLD {
        Offer::Discount50
    } else {
        Offer::Bonus35
    }
}

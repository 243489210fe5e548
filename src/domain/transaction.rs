use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of loyalty transaction. Strings outside the three known kinds are kept
/// verbatim and count towards none of the type shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Buy,
    Gift,
    Redeem,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Buy => "buy",
            TransactionType::Gift => "gift",
            TransactionType::Redeem => "redeem",
            TransactionType::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "buy" => TransactionType::Buy,
            "gift" => TransactionType::Gift,
            "redeem" => TransactionType::Redeem,
            _ => TransactionType::Other(raw),
        }
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionRecord {
    #[serde(rename = "memberId")]
    pub member_id: String,
    #[serde(rename = "lastTransactionUtcTs", with = "naive_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "lastTransactionType")]
    pub transaction_type: TransactionType,
    #[serde(rename = "lastTransactionPointsBought", deserialize_with = "number_or_string")]
    pub points_bought: f64,
    #[serde(rename = "lastTransactionRevenueUsd")]
    pub revenue_usd: f64,
}

impl TransactionRecord {
    pub fn validate(&self) -> Result<(), String> {
        if self.member_id.trim().is_empty() {
            return Err("memberId must not be empty".to_string());
        }
        if !self.points_bought.is_finite() || self.points_bought < 0.0 {
            return Err("lastTransactionPointsBought must be a finite number >= 0".to_string());
        }
        if !self.revenue_usd.is_finite() || self.revenue_usd < 0.0 {
            return Err("lastTransactionRevenueUsd must be a finite number >= 0".to_string());
        }
        Ok(())
    }
}

pub fn parse_timestamp(raw: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
}

pub mod naive_timestamp {
    use super::{parse_timestamp, TIMESTAMP_FORMAT};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp {raw:?}, expected YYYY-MM-DD HH:MM:SS: {e}"))
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(v) => Ok(v),
        NumberOrString::Text(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number {raw:?}: {e}"))),
    }
}

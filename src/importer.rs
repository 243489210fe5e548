//! Replays a CSV export of member transactions into the offer endpoint, one
//! request per row. Row failures are tallied and never stop the run.

use crate::clients::http::OutboundClient;
use crate::domain::transaction::{parse_timestamp, TransactionRecord, TransactionType};
use anyhow::Result;
use indicatif::ProgressBar;
use reqwest::StatusCode;
use serde::Deserialize;
use std::io;

/// Raw CSV row. Note the producer spells the revenue column `USD`.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "memberId")]
    pub member_id: String,
    #[serde(rename = "lastTransactionUtcTs")]
    pub timestamp: String,
    #[serde(rename = "lastTransactionType")]
    pub transaction_type: String,
    #[serde(rename = "lastTransactionPointsBought")]
    pub points_bought: String,
    #[serde(rename = "lastTransactionRevenueUSD")]
    pub revenue_usd: String,
}

impl CsvRow {
    /// Only truly empty cells count; whitespace is left for conversion to reject.
    pub fn has_blank_field(&self) -> bool {
        [
            &self.member_id,
            &self.timestamp,
            &self.transaction_type,
            &self.points_bought,
            &self.revenue_usd,
        ]
        .iter()
        .any(|f| f.is_empty())
    }

    pub fn into_record(self) -> Result<TransactionRecord, String> {
        let timestamp = parse_timestamp(&self.timestamp)
            .map_err(|e| format!("lastTransactionUtcTs {:?}: {}", self.timestamp, e))?;
        let points_bought = self
            .points_bought
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("lastTransactionPointsBought {:?}: {}", self.points_bought, e))?;
        let revenue_usd = self
            .revenue_usd
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("lastTransactionRevenueUSD {:?}: {}", self.revenue_usd, e))?;

        Ok(TransactionRecord {
            member_id: self.member_id,
            timestamp,
            transaction_type: TransactionType::from(self.transaction_type),
            points_bought,
            revenue_usd,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportTally {
    pub sent: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[async_trait::async_trait]
pub trait RequestSender: Send + Sync {
    async fn send(&self, record: &TransactionRecord) -> Result<StatusCode>;
}

pub struct HttpSender {
    pub endpoint: String,
    pub outbound: OutboundClient,
}

#[async_trait::async_trait]
impl RequestSender for HttpSender {
    async fn send(&self, record: &TransactionRecord) -> Result<StatusCode> {
        let resp = self
            .outbound
            .handle()?
            .post(&self.endpoint)
            .json(record)
            .send()
            .await?;
        Ok(resp.status())
    }
}

pub async fn replay<R: io::Read>(
    mut reader: csv::Reader<R>,
    sender: &dyn RequestSender,
    progress: &ProgressBar,
) -> ImportTally {
    let mut tally = ImportTally::default();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row_no = index + 1;
        progress.inc(1);

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::error!("row {} unreadable: {}", row_no, e);
                tally.failed += 1;
                continue;
            }
        };

        if row.has_blank_field() {
            tracing::info!("row {} skipped: empty fields found", row_no);
            tally.skipped += 1;
            continue;
        }

        let record = match row.into_record() {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("row {} could not be converted: {}", row_no, e);
                tally.failed += 1;
                continue;
            }
        };

        match sender.send(&record).await {
            Ok(status) if status.is_success() => {
                tracing::info!("row {} sent successfully: {}", row_no, status);
                tally.sent += 1;
            }
            Ok(status) => {
                tracing::warn!("row {} rejected: {}", row_no, status);
                tally.failed += 1;
            }
            Err(e) => {
                tracing::error!("exception sending row {}: {}", row_no, e);
                tally.failed += 1;
            }
        }
    }

    tracing::info!("successfully sent rows: {}", tally.sent);
    tracing::info!("skipped rows: {}", tally.skipped);
    tracing::info!("unsuccessful rows: {}", tally.failed);
    tally
}

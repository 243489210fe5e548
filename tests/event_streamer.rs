use indicatif::ProgressBar;
use perk_offers::domain::transaction::{TransactionRecord, TransactionType};
use perk_offers::importer::{replay, ImportTally, RequestSender};
use reqwest::StatusCode;
use tokio::sync::Mutex;

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<TransactionRecord>>,
    reject_member: Option<String>,
}

#[async_trait::async_trait]
impl RequestSender for RecordingSender {
    async fn send(&self, record: &TransactionRecord) -> anyhow::Result<StatusCode> {
        if self.reject_member.as_deref() == Some(record.member_id.as_str()) {
            return Ok(StatusCode::BAD_GATEWAY);
        }
        self.sent.lock().await.push(record.clone());
        Ok(StatusCode::OK)
    }
}

const HEADER: &str = "memberId,lastTransactionUtcTs,lastTransactionType,lastTransactionPointsBought,lastTransactionRevenueUSD\n";

fn reader(rows: &str) -> csv::Reader<&[u8]> {
    csv::Reader::from_reader(rows.as_bytes())
}

#[tokio::test]
async fn rows_are_cast_and_sent_in_order() {
    let data = format!(
        "{HEADER}m1,2025-12-14 10:00:00,buy,100,50.5\nm2,2025-12-15 11:00:00,redeem,150.0,100\n"
    );
    let sender = RecordingSender::default();

    let tally = replay(reader(&data), &sender, &ProgressBar::hidden()).await;

    assert_eq!(tally, ImportTally { sent: 2, skipped: 0, failed: 0 });
    let sent = sender.sent.lock().await;
    assert_eq!(sent[0].member_id, "m1");
    assert_eq!(sent[0].points_bought, 100.0);
    assert_eq!(sent[0].revenue_usd, 50.5);
    assert_eq!(sent[1].transaction_type, TransactionType::Redeem);
}

#[tokio::test]
async fn blank_fields_are_skipped() {
    let data = format!(
        "{HEADER}m1,2025-12-14 10:00:00,buy,,50\n,2025-12-14 10:00:00,buy,1,1\nm3,2025-12-16 12:00:00,gift,200,150\n"
    );
    let sender = RecordingSender::default();

    let tally = replay(reader(&data), &sender, &ProgressBar::hidden()).await;

    assert_eq!(tally, ImportTally { sent: 1, skipped: 2, failed: 0 });
    assert_eq!(sender.sent.lock().await[0].member_id, "m3");
}

#[tokio::test]
async fn bad_rows_and_rejections_do_not_stop_the_run() {
    let data = format!(
        "{HEADER}m1,yesterday,buy,100,50\nm2,2025-12-15 11:00:00,buy,lots,50\nm3,2025-12-16 12:00:00,gift,200,150\nm4,2025-12-17 13:00:00,buy,10,5\n"
    );
    let sender = RecordingSender {
        reject_member: Some("m3".to_string()),
        ..Default::default()
    };

    let tally = replay(reader(&data), &sender, &ProgressBar::hidden()).await;

    assert_eq!(tally, ImportTally { sent: 1, skipped: 0, failed: 3 });
    assert_eq!(sender.sent.lock().await[0].member_id, "m4");
}

#[tokio::test]
async fn whitespace_only_field_fails_conversion_instead_of_skipping() {
    let data = format!("{HEADER}m1,2025-12-14 10:00:00,buy,\" \",50\nm2,2025-12-15 11:00:00,buy,10,5\n");
    let sender = RecordingSender::default();

    let tally = replay(reader(&data), &sender, &ProgressBar::hidden()).await;

    assert_eq!(tally, ImportTally { sent: 1, skipped: 0, failed: 1 });
    assert_eq!(sender.sent.lock().await[0].member_id, "m2");
}

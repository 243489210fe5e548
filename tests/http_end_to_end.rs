use perk_offers::clients::http::{HttpMemberHistory, HttpScoringModel, OutboundClient};
use perk_offers::domain::offer::{ErrorEnvelope, Offer, OfferResponse};
use perk_offers::domain::transaction::TIMESTAMP_FORMAT;
use perk_offers::history::memory::InMemoryHistoryStore;
use perk_offers::http::routes::{history_router, model_router, offer_router};
use perk_offers::metrics::sink::MemoryMetricsSink;
use perk_offers::service::offer_service::OfferService;
use perk_offers::{AppState, HistoryState};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

struct Stack {
    offers: SocketAddr,
    history: SocketAddr,
    sink: MemoryMetricsSink,
}

async fn stack() -> Stack {
    let history = spawn(history_router(HistoryState {
        store: Arc::new(InMemoryHistoryStore::new()),
    }))
    .await;
    let model = spawn(model_router()).await;
    let offers = offers_against(&format!("http://{history}"), &format!("http://{model}"), MemoryMetricsSink::new()).await;
    Stack {
        offers: offers.0,
        history,
        sink: offers.1,
    }
}

async fn offers_against(history_url: &str, model_url: &str, sink: MemoryMetricsSink) -> (SocketAddr, MemoryMetricsSink) {
    let outbound = OutboundClient::open(Some(std::time::Duration::from_secs(5))).unwrap();
    let service = OfferService {
        history: Arc::new(HttpMemberHistory::new(history_url, &outbound)),
        model: Arc::new(HttpScoringModel::new(model_url, &outbound)),
        metrics: Arc::new(sink.clone()),
    };
    let addr = spawn(offer_router(AppState { offer_service: service })).await;
    (addr, sink)
}

fn hours_ago(hours: i64) -> String {
    (chrono::Local::now().naive_local() - chrono::Duration::hours(hours))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

fn request(member: &str, kind: &str, points: f64, revenue: f64) -> serde_json::Value {
    json!({
        "memberId": member,
        "lastTransactionUtcTs": hours_ago(2),
        "lastTransactionType": kind,
        "lastTransactionPointsBought": points,
        "lastTransactionRevenueUsd": revenue,
    })
}

#[tokio::test]
async fn second_request_sees_persisted_history() {
    let stack = stack().await;
    let client = reqwest::Client::new();
    let endpoint = format!("http://{}/api/requests/v1", stack.offers);

    let first: OfferResponse = client
        .post(&endpoint)
        .json(&request("m1", "buy", 1000.0, 100.0))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first.member_id, "m1");
    assert_eq!(first.offer, Offer::Discount50);

    // On its own this gift scores 10 * 0.9; with the earlier buy the average lifts it over the line.
    let resp = client
        .post(&endpoint)
        .json(&request("m1", "gift", 10.0, 100.0))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let second: OfferResponse = resp.json().await.unwrap();
    assert_eq!(second.offer, Offer::Discount50);

    let stored: Vec<serde_json::Value> = client
        .get(format!("http://{}/member_data/m1", stack.history))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1]["lastTransactionType"], "gift");

    let rows = stack.sink.rows().await;
    assert_eq!(rows.len(), 2);
    assert!((rows[1].avg_points_bought - 505.0).abs() < 1e-9);
    assert!(rows.iter().all(|r| r.persisted));
}

#[tokio::test]
async fn member_ids_are_path_encoded() {
    let stack = stack().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{}/api/requests/v1", stack.offers))
        .json(&request("team/a b", "buy", 50.0, 10.0))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    let stored: Vec<serde_json::Value> = client
        .get(format!("http://{}/member_data/team%2Fa%20b", stack.history))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["memberId"], "team/a b");
}

#[tokio::test]
async fn unknown_member_is_not_found() {
    let history = spawn(history_router(HistoryState {
        store: Arc::new(InMemoryHistoryStore::new()),
    }))
    .await;

    let resp = reqwest::get(format!("http://{history}/member_data/nobody")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(body.error.code, "MEMBER_NOT_FOUND");
}

#[tokio::test]
async fn history_rejects_invalid_transaction() {
    let history = spawn(history_router(HistoryState {
        store: Arc::new(InMemoryHistoryStore::new()),
    }))
    .await;

    let resp = reqwest::Client::new()
        .post(format!("http://{history}/member_data"))
        .json(&request("m1", "buy", -5.0, 10.0))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(body.error.code, "INVALID_TRANSACTION");
}

#[tokio::test]
async fn malformed_request_body_is_rejected() {
    let stack = stack().await;
    let client = reqwest::Client::new();
    let endpoint = format!("http://{}/api/requests/v1", stack.offers);

    let mut bad_ts = request("m1", "buy", 50.0, 10.0);
    bad_ts["lastTransactionUtcTs"] = json!("2025-12-28T10:00:00Z");
    let resp = client.post(&endpoint).json(&bad_ts).send().await.unwrap();
    assert!(resp.status().is_client_error());

    let mut extra = request("m1", "buy", 50.0, 10.0);
    extra["couponCode"] = json!("X");
    let resp = client.post(&endpoint).json(&extra).send().await.unwrap();
    assert!(resp.status().is_client_error());

    assert!(stack.sink.rows().await.is_empty());
}

#[tokio::test]
async fn infinite_points_are_a_bad_request() {
    let stack = stack().await;
    let mut body = request("m1", "buy", 50.0, 10.0);
    body["lastTransactionPointsBought"] = json!("inf");

    let resp = reqwest::Client::new()
        .post(format!("http://{}/api/requests/v1", stack.offers))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.error.code, "INVALID_TRANSACTION");
    assert!(stack.sink.rows().await.is_empty());
}

#[tokio::test]
async fn unreachable_history_is_bad_gateway() {
    let model = spawn(model_router()).await;
    let dead = unused_addr().await;
    let (offers, sink) = offers_against(&format!("http://{dead}"), &format!("http://{model}"), MemoryMetricsSink::new()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{offers}/api/requests/v1"))
        .json(&request("m1", "buy", 50.0, 10.0))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);
    let body: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(body.error.code, "MEMBER_HISTORY_UNAVAILABLE");
    assert!(sink.rows().await.is_empty());
}

#[tokio::test]
async fn model_endpoints_score_and_assign() {
    let model = spawn(model_router()).await;
    let client = reqwest::Client::new();
    let features = json!({
        "AVG_POINTS_BOUGHT": 200.0,
        "AVG_REVENUE_USD": 150.0,
        "LAST_3_TRANSACTIONS_AVG_POINTS_BOUGHT": 250.0,
        "LAST_3_TRANSACTIONS_AVG_REVENUE_USD": 200.0,
        "PCT_BUY_TRANSACTIONS": 0.4,
        "PCT_GIFT_TRANSACTIONS": 0.2,
        "PCT_REDEEM_TRANSACTIONS": 0.4,
        "DAYS_SINCE_LAST_TRANSACTION": 10
    });

    let ats: serde_json::Value = client
        .post(format!("http://{model}/ml/ats/predict"))
        .json(&features)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!((ats["prediction"].as_f64().unwrap() - 47.0).abs() < 1e-9);

    let resp: serde_json::Value = client
        .post(format!("http://{model}/ml/resp/predict"))
        .json(&features)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(resp["prediction"].as_f64().unwrap() <= 0.9);

    let assigned: serde_json::Value = client
        .post(format!("http://{model}/offer/assign"))
        .json(&json!({"ats_prediction": 10.0, "resp_prediction": 20.0}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(assigned["offer"], "50% Discount");
}

#[tokio::test]
async fn health_endpoints_respond() {
    let stack = stack().await;
    for addr in [stack.offers, stack.history] {
        let body: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }
}

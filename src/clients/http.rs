use crate::clients::{MemberHistoryGateway, ScoringModel};
use crate::domain::features::MemberFeatures;
use crate::domain::offer::PredictionResponse;
use crate::domain::transaction::TransactionRecord;
use crate::error::ClientError;
use anyhow::Result;
use reqwest::{StatusCode, Url};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Shared outbound HTTP connection pool. Opened once by the process entry point
/// and cloned into every HTTP collaborator. `close` drops the pool for all of
/// them; calls made afterwards fail with [`ClientError::Closed`].
#[derive(Clone)]
pub struct OutboundClient {
    inner: Arc<RwLock<Option<reqwest::Client>>>,
}

impl OutboundClient {
    pub fn open(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        tracing::info!("outbound http client opened (timeout: {:?})", timeout);
        Ok(Self {
            inner: Arc::new(RwLock::new(Some(client))),
        })
    }

    /// Client for a single call. In-flight calls keep their handle until they finish.
    pub fn handle(&self) -> Result<reqwest::Client, ClientError> {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone().ok_or(ClientError::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    pub fn close(&self) {
        let taken = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if taken.is_some() {
            tracing::info!("outbound http client closed");
        }
    }
}

pub struct HttpMemberHistory {
    pub base_url: String,
    outbound: OutboundClient,
}

impl HttpMemberHistory {
    pub fn new(base_url: &str, outbound: &OutboundClient) -> Self {
        Self {
            base_url: base_url.to_string(),
            outbound: outbound.clone(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        join_segments(&self.base_url, segments)
    }
}

#[async_trait::async_trait]
impl MemberHistoryGateway for HttpMemberHistory {
    async fn fetch_history(&self, member_id: &str) -> Result<Option<Vec<TransactionRecord>>, ClientError> {
        let url = self.endpoint(&["member_data", member_id])?;
        let resp = self
            .outbound
            .handle()?
            .get(url.clone())
            .send()
            .await
            .map_err(|source| transport(&url, source))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resp = ensure_success(&url, resp).await?;
        let records = resp
            .json::<Vec<TransactionRecord>>()
            .await
            .map_err(|e| decode(&url, e))?;
        Ok(Some(records))
    }

    async fn save_transaction(&self, record: &TransactionRecord) -> Result<(), ClientError> {
        let url = self.endpoint(&["member_data"])?;
        let resp = self
            .outbound
            .handle()?
            .post(url.clone())
            .json(record)
            .send()
            .await
            .map_err(|source| transport(&url, source))?;
        ensure_success(&url, resp).await?;
        Ok(())
    }
}

pub struct HttpScoringModel {
    pub base_url: String,
    outbound: OutboundClient,
}

impl HttpScoringModel {
    pub fn new(base_url: &str, outbound: &OutboundClient) -> Self {
        Self {
            base_url: base_url.to_string(),
            outbound: outbound.clone(),
        }
    }

    async fn predict(&self, model: &str, features: &MemberFeatures) -> Result<f64, ClientError> {
        let url = join_segments(&self.base_url, &["ml", model, "predict"])?;
        let resp = self
            .outbound
            .handle()?
            .post(url.clone())
            .json(features)
            .send()
            .await
            .map_err(|source| transport(&url, source))?;
        let resp = ensure_success(&url, resp).await?;
        let body = resp
            .json::<PredictionResponse>()
            .await
            .map_err(|e| decode(&url, e))?;
        Ok(body.prediction)
    }
}

#[async_trait::async_trait]
impl ScoringModel for HttpScoringModel {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn predict_ats(&self, features: &MemberFeatures) -> Result<f64, ClientError> {
        self.predict("ats", features).await
    }

    async fn predict_resp(&self, features: &MemberFeatures) -> Result<f64, ClientError> {
        self.predict("resp", features).await
    }
}

fn join_segments(base_url: &str, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn ensure_success(url: &Url, resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status {
        endpoint: url.to_string(),
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

fn transport(url: &Url, source: reqwest::Error) -> ClientError {
    ClientError::Transport {
        endpoint: url.to_string(),
        source,
    }
}

fn decode(url: &Url, e: reqwest::Error) -> ClientError {
    ClientError::Decode {
        endpoint: url.to_string(),
        message: e.to_string(),
    }
}

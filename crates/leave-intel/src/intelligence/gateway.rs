use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::domain::{
    AssistantQuery, AssistantReply, ExtractionRequest, LeaveRequestDraft, OutcomeAssessment,
};
use crate::config::InferenceConfig;

pub const EXTRACT_PATH: &str = "extract";
pub const ASSESS_PATH: &str = "assess";
pub const RESPOND_PATH: &str = "respond";

/// Outbound contract of the external inference service, one call per capability.
pub trait InferenceGateway: Debug + Send + Sync {
    fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = Result<LeaveRequestDraft, InferenceError>> + Send;

    fn assess(
        &self,
        draft: &LeaveRequestDraft,
    ) -> impl Future<Output = Result<OutcomeAssessment, InferenceError>> + Send;

    fn respond(
        &self,
        query: &AssistantQuery,
    ) -> impl Future<Output = Result<AssistantReply, InferenceError>> + Send;
}

/// Reasons a single remote attempt is treated as "service unavailable".
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("failed to build inference client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("inference service timed out after {0:?}")]
    Timeout(Duration),
    #[error("inference service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("inference service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("inference service sent malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("inference service sent an out-of-range payload: {0}")]
    InvalidPayload(String),
}

/// Response bodies the gateway accepts only after their range invariants hold.
trait Validated {
    fn check(&self) -> Result<(), String>;
}

impl Validated for LeaveRequestDraft {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

impl Validated for OutcomeAssessment {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

impl Validated for AssistantReply {
    fn check(&self) -> Result<(), String> {
        self.validate()
    }
}

/// JSON-over-HTTP client for the inference service, bounded by a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpInferenceGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpInferenceGateway {
    /// `base_url` should be like `http://localhost:8080/api/v1/leave` (trailing slash optional).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(InferenceError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Builds a gateway when a base URL is configured; `None` means local rules only.
    pub fn from_config(config: &InferenceConfig) -> Result<Option<Self>, InferenceError> {
        config
            .base_url
            .as_deref()
            .map(|base_url| Self::new(base_url, config.timeout))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.timeout)
        } else {
            InferenceError::Transport(err)
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, InferenceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Validated,
    {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(url = %url, "delegating to inference service");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|err| self.classify(err))?;
        let payload: T = serde_json::from_slice(&bytes)?;
        payload.check().map_err(InferenceError::InvalidPayload)?;
        Ok(payload)
    }
}

impl InferenceGateway for HttpInferenceGateway {
    async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<LeaveRequestDraft, InferenceError> {
        self.post(EXTRACT_PATH, request).await
    }

    async fn assess(&self, draft: &LeaveRequestDraft) -> Result<OutcomeAssessment, InferenceError> {
        self.post(ASSESS_PATH, draft).await
    }

    async fn respond(&self, query: &AssistantQuery) -> Result<AssistantReply, InferenceError> {
        self.post(RESPOND_PATH, query).await
    }
}

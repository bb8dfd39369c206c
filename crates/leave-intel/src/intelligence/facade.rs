use std::future::Future;

use tracing::{debug, warn};

use super::assistant::IntentResponder;
use super::domain::{
    AssistantContext, AssistantQuery, AssistantReply, ExtractionRequest, LeaveRequestDraft,
    OutcomeAssessment,
};
use super::extraction::HeuristicExtractor;
use super::gateway::{HttpInferenceGateway, InferenceError, InferenceGateway};
use super::scoring::{OutcomeScorer, ScoringConfig};
use crate::config::InferenceConfig;

/// Entry point for callers: remote inference first, local rules on any failure.
///
/// Every operation returns a best-effort result; gateway failures are logged and
/// absorbed here and never reach the caller.
#[derive(Debug)]
pub struct LeaveIntelligence<G = HttpInferenceGateway> {
    gateway: Option<G>,
    extractor: HeuristicExtractor,
    scorer: OutcomeScorer,
    responder: IntentResponder,
}

impl LeaveIntelligence<HttpInferenceGateway> {
    /// Engine that never leaves the process.
    pub fn local_only() -> Self {
        Self::new(None, ScoringConfig::default())
    }

    pub fn from_config(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let gateway = HttpInferenceGateway::from_config(config)?;
        Ok(Self::new(gateway, ScoringConfig::default()))
    }
}

impl<G> LeaveIntelligence<G>
where
    G: InferenceGateway,
{
    pub fn new(gateway: Option<G>, scoring: ScoringConfig) -> Self {
        Self {
            gateway,
            extractor: HeuristicExtractor::new(),
            scorer: OutcomeScorer::new(scoring),
            responder: IntentResponder::new(),
        }
    }

    pub fn is_delegating(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn scorer(&self) -> &OutcomeScorer {
        &self.scorer
    }

    /// Extract a structured leave request from correspondence.
    pub async fn extract(&self, text: &str, sender_email: &str) -> LeaveRequestDraft {
        if let Some(gateway) = &self.gateway {
            let request = ExtractionRequest {
                text: text.to_string(),
                sender_email: sender_email.to_string(),
            };
            if let Some(draft) = attempt("extract", gateway.extract(&request)).await {
                return draft;
            }
        }

        self.extractor.extract(text, sender_email)
    }

    /// Score the likely outcome of a draft.
    pub async fn assess(&self, draft: &LeaveRequestDraft) -> OutcomeAssessment {
        if let Some(gateway) = &self.gateway {
            if let Some(assessment) = attempt("assess", gateway.assess(draft)).await {
                return assessment;
            }
        }

        self.scorer.assess(draft)
    }

    /// Answer a free-form question about the leave process.
    pub async fn respond(&self, query: &str, context: Option<&AssistantContext>) -> AssistantReply {
        if let Some(gateway) = &self.gateway {
            let request = AssistantQuery {
                query: query.to_string(),
                context: context.cloned(),
            };
            if let Some(reply) = attempt("respond", gateway.respond(&request)).await {
                return reply;
            }
        }

        self.responder.respond(query, context)
    }
}

/// Await a single remote attempt, turning any failure into `None`.
async fn attempt<T, F>(capability: &'static str, call: F) -> Option<T>
where
    F: Future<Output = Result<T, InferenceError>>,
{
    match call.await {
        Ok(value) => {
            debug!(capability, "inference service answered");
            Some(value)
        }
        Err(error) => {
            warn!(capability, %error, "inference service failed, falling back to local rules");
            None
        }
    }
}

//! Leave-request intelligence: heuristic extraction, outcome scoring and
//! assistant replies, fronted by a delegation facade that prefers the remote
//! inference service and falls back to the local rules.

mod assistant;
mod domain;
mod extraction;
mod facade;
mod gateway;
mod normalizer;
mod patterns;
mod router;
mod scoring;

pub use assistant::{classify_intent, Intent, IntentResponder};
pub use domain::{
    AssistantContext, AssistantQuery, AssistantReply, ConversationTurn, EmployeeIdentity,
    ExtractionRequest, LeaveDetails, LeaveRequestDraft, LeaveType, OutcomeAssessment, Rank,
    UNSPECIFIED_MOTIVE,
};
pub use extraction::HeuristicExtractor;
pub use facade::LeaveIntelligence;
pub use gateway::{
    HttpInferenceGateway, InferenceError, InferenceGateway, ASSESS_PATH, EXTRACT_PATH,
    RESPOND_PATH,
};
pub use patterns::leave_type_priority;
pub use router::leave_router;
pub use scoring::{OutcomeScorer, ScoreComponent, ScoringConfig, ScoringRule};

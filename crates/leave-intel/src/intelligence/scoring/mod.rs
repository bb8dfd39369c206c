mod config;
mod rules;

pub use config::ScoringConfig;

use serde::Serialize;

use super::domain::{LeaveRequestDraft, OutcomeAssessment};

/// Stateless scorer applying the additive rule table to an extracted draft.
#[derive(Debug, Clone, Default)]
pub struct OutcomeScorer {
    config: ScoringConfig,
}

impl OutcomeScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, draft: &LeaveRequestDraft) -> OutcomeAssessment {
        let (components, total) = rules::score_draft(draft, &self.config);

        let mut risk_factors: Vec<String> = Vec::new();
        for risk in components.iter().filter_map(|c| c.risk_factor.as_ref()) {
            if !risk_factors.contains(risk) {
                risk_factors.push(risk.clone());
            }
        }

        let probability = total.clamp(self.config.min_probability, self.config.max_probability);

        OutcomeAssessment {
            approval_probability: f64::from(probability),
            recommendations: rules::recommendations(draft, &self.config, !risk_factors.is_empty()),
            risk_factors,
            estimated_resolution_days: rules::resolution_days(draft, &self.config),
            precedent_count: rules::precedent_estimate(draft, &self.config),
        }
    }

    /// Rule-by-rule breakdown behind an assessment, for audit output.
    pub fn explain(&self, draft: &LeaveRequestDraft) -> Vec<ScoreComponent> {
        rules::score_draft(draft, &self.config).0
    }
}

/// Named rule in the scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    LongDuration,
    LowConfidence,
    UnspecifiedType,
    MagistrateRank,
    StatedMotive,
}

/// Discrete adjustment applied while scoring, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub rule: ScoringRule,
    pub adjustment: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_factor: Option<String>,
    pub notes: String,
}

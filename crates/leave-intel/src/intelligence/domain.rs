use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Seniority tier of the requesting employee, used as a scoring input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Magistrate,
    Official,
    Staff,
}

/// Canonical leave categories recognised in correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    #[serde(rename = "Annual Leave")]
    Annual,
    #[serde(rename = "Sick Leave")]
    Sick,
    #[serde(rename = "Compensatory Leave")]
    Compensatory,
    #[serde(rename = "Compensatory Day Off")]
    CompensatoryDayOff,
    #[serde(rename = "Maternity Leave")]
    Maternity,
    #[serde(rename = "Paternity Leave")]
    Paternity,
    #[serde(rename = "Study Leave")]
    Study,
    /// Fallback label used when no keyword pattern matched.
    #[serde(rename = "General Leave")]
    General,
}

impl LeaveType {
    pub fn is_generic(&self) -> bool {
        matches!(self, LeaveType::General)
    }
}

/// Placeholder motive recorded when the correspondence names none.
pub const UNSPECIFIED_MOTIVE: &str = "Not specified";

/// Identity of the requesting employee as derived from the sender address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    pub name: String,
    pub email: String,
    pub area: String,
    pub rank: Rank,
}

/// Requested absence window and its stated justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDetails {
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub day_count: u32,
    pub motive: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LeaveDetails {
    pub fn has_motive(&self) -> bool {
        self.motive != UNSPECIFIED_MOTIVE
    }
}

/// Structured leave request recovered from free-text correspondence, prior to human review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequestDraft {
    pub employee: EmployeeIdentity,
    pub leave: LeaveDetails,
    pub confidence: f64,
    pub needs_review: bool,
}

impl LeaveRequestDraft {
    /// Checks the range invariants a draft must satisfy regardless of who produced it.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }
        if self.leave.day_count == 0 {
            return Err("day_count must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Heuristic estimate of how a leave request is likely to be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeAssessment {
    pub approval_probability: f64,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub estimated_resolution_days: u32,
    pub precedent_count: u32,
}

impl OutcomeAssessment {
    pub fn validate(&self) -> Result<(), String> {
        if !(10.0..=95.0).contains(&self.approval_probability) {
            return Err(format!(
                "approval_probability {} outside [10, 95]",
                self.approval_probability
            ));
        }
        if self.estimated_resolution_days == 0 {
            return Err("estimated_resolution_days must be at least 1".to_string());
        }
        for (index, risk) in self.risk_factors.iter().enumerate() {
            if self.risk_factors[..index].contains(risk) {
                return Err(format!("risk factor '{risk}' listed more than once"));
            }
        }
        Ok(())
    }
}

/// Answer produced for a free-form question about the leave process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub answer: String,
    pub suggested_actions: Vec<String>,
    pub related_documents: Vec<String>,
    pub confidence: f64,
}

impl AssistantReply {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }
        Ok(())
    }
}

/// Single prior exchange in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
}

/// Read-only context a caller may attach to an assistant query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_balance_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_requests: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ConversationTurn>,
}

/// Wire body of an extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub text: String,
    pub sender_email: String,
}

/// Wire body of an assistant query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AssistantContext>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_type_serializes_to_label() {
        let json = serde_json::to_string(&LeaveType::CompensatoryDayOff).expect("serialize");
        assert_eq!(json, "\"Compensatory Day Off\"");
    }

    #[test]
    fn rank_uses_upper_case_wire_names() {
        let rank: Rank = serde_json::from_str("\"MAGISTRATE\"").expect("deserialize");
        assert_eq!(rank, Rank::Magistrate);
        assert_eq!(
            serde_json::to_string(&Rank::Official).expect("serialize"),
            "\"OFFICIAL\""
        );
    }

    #[test]
    fn assessment_validation_rejects_out_of_range_probability() {
        let assessment = OutcomeAssessment {
            approval_probability: 99.0,
            risk_factors: Vec::new(),
            recommendations: Vec::new(),
            estimated_resolution_days: 3,
            precedent_count: 0,
        };
        assert!(assessment.validate().is_err());
    }

    #[test]
    fn assessment_validation_rejects_repeated_risk_factors() {
        let mut assessment = OutcomeAssessment {
            approval_probability: 60.0,
            risk_factors: vec![
                "long-duration request".to_string(),
                "unspecified leave type".to_string(),
            ],
            recommendations: Vec::new(),
            estimated_resolution_days: 4,
            precedent_count: 2,
        };
        assert!(assessment.validate().is_ok());

        assessment
            .risk_factors
            .push("long-duration request".to_string());
        assert!(assessment.validate().is_err());
    }

    #[test]
    fn missing_notes_are_omitted_from_wire_format() {
        let details = LeaveDetails {
            leave_type: LeaveType::Annual,
            start_date: None,
            end_date: None,
            day_count: 1,
            motive: UNSPECIFIED_MOTIVE.to_string(),
            notes: None,
        };
        let value = serde_json::to_value(&details).expect("serialize");
        assert!(value.get("notes").is_none());
        assert_eq!(value["type"], "Annual Leave");
        assert!(value["start_date"].is_null());
        assert!(!details.has_motive());
    }
}

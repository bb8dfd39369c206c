use super::super::domain::{LeaveRequestDraft, LeaveType, Rank};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoringRule};

pub(crate) const LONG_DURATION_RISK: &str = "long-duration request";
pub(crate) const LOW_CONFIDENCE_RISK: &str = "low-confidence extraction";
pub(crate) const UNSPECIFIED_TYPE_RISK: &str = "unspecified leave type";

pub(crate) const REVIEW_DOCUMENTATION: &str = "review supporting documentation";
pub(crate) const VERIFY_BALANCE: &str = "verify remaining leave balance";

/// Applies the additive rules in evaluation order; the order fixes the risk-factor listing.
pub(crate) fn score_draft(
    draft: &LeaveRequestDraft,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, i32) {
    let mut components = Vec::new();
    let mut total = config.base_probability;
    let day_count = draft.leave.day_count;

    if day_count > config.long_duration_days {
        components.push(ScoreComponent {
            rule: ScoringRule::LongDuration,
            adjustment: -config.long_duration_penalty,
            risk_factor: Some(LONG_DURATION_RISK.to_string()),
            notes: format!(
                "{day_count} days exceeds the {}-day threshold",
                config.long_duration_days
            ),
        });
        total -= config.long_duration_penalty;
    }

    if draft.confidence < config.confidence_threshold {
        components.push(ScoreComponent {
            rule: ScoringRule::LowConfidence,
            adjustment: -config.low_confidence_penalty,
            risk_factor: Some(LOW_CONFIDENCE_RISK.to_string()),
            notes: format!(
                "extraction confidence {:.2} below {:.2}",
                draft.confidence, config.confidence_threshold
            ),
        });
        total -= config.low_confidence_penalty;
    }

    if draft.leave.leave_type.is_generic() {
        components.push(ScoreComponent {
            rule: ScoringRule::UnspecifiedType,
            adjustment: -config.unspecified_type_penalty,
            risk_factor: Some(UNSPECIFIED_TYPE_RISK.to_string()),
            notes: "no recognised leave type in correspondence".to_string(),
        });
        total -= config.unspecified_type_penalty;
    }

    if draft.employee.rank == Rank::Magistrate {
        components.push(ScoreComponent {
            rule: ScoringRule::MagistrateRank,
            adjustment: config.magistrate_bonus,
            risk_factor: None,
            notes: "magistrate-level requester".to_string(),
        });
        total += config.magistrate_bonus;
    }

    if draft.leave.has_motive() {
        components.push(ScoreComponent {
            rule: ScoringRule::StatedMotive,
            adjustment: config.stated_motive_bonus,
            risk_factor: None,
            notes: format!("motive stated: {}", draft.leave.motive),
        });
        total += config.stated_motive_bonus;
    }

    (components, total)
}

pub(crate) fn recommendations(
    draft: &LeaveRequestDraft,
    config: &ScoringConfig,
    any_risk: bool,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if any_risk {
        recommendations.push(REVIEW_DOCUMENTATION.to_string());
    }
    if draft.leave.day_count > config.balance_check_days {
        recommendations.push(VERIFY_BALANCE.to_string());
    }
    recommendations
}

pub(crate) fn resolution_days(draft: &LeaveRequestDraft, config: &ScoringConfig) -> u32 {
    let mut days = config.base_resolution_days;
    if draft.employee.rank == Rank::Magistrate {
        days += config.magistrate_resolution_days;
    }
    if draft.leave.day_count > config.long_duration_days {
        days += config.long_duration_resolution_days;
    }
    if draft.needs_review {
        days += config.review_resolution_days;
    }
    u32::try_from(days.max(1)).unwrap_or(1)
}

/// Advisory count of comparable past requests, from a static per-type table.
pub(crate) fn precedent_estimate(draft: &LeaveRequestDraft, config: &ScoringConfig) -> u32 {
    let typical = match draft.leave.leave_type {
        LeaveType::Annual => 42,
        LeaveType::Sick => 35,
        LeaveType::CompensatoryDayOff => 24,
        LeaveType::Compensatory => 18,
        LeaveType::Maternity => 9,
        LeaveType::Paternity => 7,
        LeaveType::Study => 5,
        LeaveType::General => 3,
    };

    if draft.leave.day_count > config.long_duration_days {
        typical / 2
    } else {
        typical
    }
}

use serde::{Deserialize, Serialize};

use super::domain::{AssistantContext, AssistantReply};
use super::normalizer::normalize_text;

const FALLBACK_CONFIDENCE: f64 = 0.3;
pub(crate) const CONTACT_HR_ACTION: &str = "Contact Human Resources";

static NO_CONTEXT: AssistantContext = AssistantContext {
    employee_name: None,
    remaining_balance_days: None,
    pending_requests: None,
    history: Vec::new(),
};

/// Question categories the responder can answer without the inference service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    HowToRequest,
    BalanceInquiry,
    StatusInquiry,
    Cancellation,
    RequiredDocuments,
    LeaveTypes,
    ApprovalTime,
}

struct IntentCategory {
    intent: Intent,
    keywords: &'static [&'static str],
    confidence: f64,
}

/// Tested in order against the normalized query; the first category with a hit wins.
const INTENT_CATEGORIES: &[IntentCategory] = &[
    IntentCategory {
        intent: Intent::HowToRequest,
        keywords: &[
            "how to request",
            "how do i request",
            "how can i request",
            "apply for leave",
            "request a leave",
            "cómo solicito",
            "como solicito",
            "cómo solicitar",
            "como solicitar",
            "cómo pido",
            "como pido",
        ],
        confidence: 0.95,
    },
    IntentCategory {
        intent: Intent::BalanceInquiry,
        keywords: &[
            "balance",
            "how many days",
            "days left",
            "remaining days",
            "saldo",
            "cuántos días",
            "cuantos dias",
            "días disponibles",
            "dias disponibles",
        ],
        confidence: 0.9,
    },
    IntentCategory {
        intent: Intent::StatusInquiry,
        keywords: &[
            "status",
            "pending",
            "approved yet",
            "been approved",
            "estado de mi",
            "pendiente",
        ],
        confidence: 0.85,
    },
    IntentCategory {
        intent: Intent::Cancellation,
        keywords: &["cancel", "withdraw", "cancelar", "anular"],
        confidence: 0.85,
    },
    IntentCategory {
        intent: Intent::RequiredDocuments,
        keywords: &[
            "document",
            "certificate",
            "paperwork",
            "documentación",
            "documentacion",
            "certificado",
        ],
        confidence: 0.9,
    },
    IntentCategory {
        intent: Intent::LeaveTypes,
        keywords: &[
            "types of leave",
            "kinds of leave",
            "leave types",
            "tipos de licencia",
        ],
        confidence: 0.9,
    },
    IntentCategory {
        intent: Intent::ApprovalTime,
        keywords: &[
            "how long",
            "take to approve",
            "approval time",
            "cuánto tarda",
            "cuanto tarda",
            "demora",
        ],
        confidence: 0.85,
    },
];

/// Resolve the first matching intent for a raw query.
pub fn classify_intent(query: &str) -> Option<Intent> {
    let normalized = normalize_text(query);
    match_category(&normalized).map(|category| category.intent)
}

fn match_category(normalized: &str) -> Option<&'static IntentCategory> {
    INTENT_CATEGORIES.iter().find(|category| {
        category
            .keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
    })
}

/// Pattern-matched responder for questions about the leave process.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentResponder;

impl IntentResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(&self, query: &str, context: Option<&AssistantContext>) -> AssistantReply {
        let normalized = normalize_text(query);
        let context = context.unwrap_or(&NO_CONTEXT);

        let Some(category) = match_category(&normalized) else {
            return fallback_reply(context);
        };

        let canned = canned_reply(category.intent, context);
        AssistantReply {
            answer: address(context, canned.answer),
            suggested_actions: to_strings(canned.actions),
            related_documents: to_strings(canned.documents),
            confidence: category.confidence,
        }
    }
}

struct CannedReply {
    answer: String,
    actions: &'static [&'static str],
    documents: &'static [&'static str],
}

fn canned_reply(intent: Intent, context: &AssistantContext) -> CannedReply {
    match intent {
        Intent::HowToRequest => CannedReply {
            answer: "Send an email to Human Resources stating the leave type, the exact dates \
                     (from DD/MM/YYYY to DD/MM/YYYY) and the motive. The request is registered \
                     as a draft and routed to your supervisor for approval."
                .to_string(),
            actions: &["Draft a leave request email", "Check your leave balance"],
            documents: &["Leave Policy Handbook", "Leave Request Template"],
        },
        Intent::BalanceInquiry => CannedReply {
            answer: match context.remaining_balance_days {
                Some(days) => format!(
                    "You currently have {days} {} of leave available. Balances are updated \
                     once a request is approved.",
                    plural(days, "day", "days")
                ),
                None => "Your leave balance is shown in the employee portal under \
                         \"My Leave\". Balances are updated once a request is approved."
                    .to_string(),
            },
            actions: &["Open the employee portal", "Request leave"],
            documents: &["Leave Policy Handbook"],
        },
        Intent::StatusInquiry => CannedReply {
            answer: match context.pending_requests {
                Some(0) => "You have no pending leave requests.".to_string(),
                Some(count) => format!(
                    "You have {count} pending leave {}. Requests are usually resolved \
                     within three business days.",
                    plural(count, "request", "requests")
                ),
                None => "Request status is visible in the employee portal. Requests are \
                         usually resolved within three business days."
                    .to_string(),
            },
            actions: &["View my requests", CONTACT_HR_ACTION],
            documents: &[],
        },
        Intent::Cancellation => CannedReply {
            answer: "A pending request can be withdrawn from the employee portal. Approved \
                     leave must be cancelled by Human Resources before its start date."
                .to_string(),
            actions: &["View my requests", CONTACT_HR_ACTION],
            documents: &["Leave Policy Handbook"],
        },
        Intent::RequiredDocuments => CannedReply {
            answer: "Sick and maternity leave require a medical certificate. Study leave \
                     requires proof of enrolment. Annual leave needs no supporting documents."
                .to_string(),
            actions: &["Upload supporting documents"],
            documents: &["Supporting Documentation Guide", "Leave Policy Handbook"],
        },
        Intent::LeaveTypes => CannedReply {
            answer: "Available leave types are annual, sick, compensatory, compensatory day \
                     off, maternity, paternity and study leave."
                .to_string(),
            actions: &["Request leave", "Check your leave balance"],
            documents: &["Leave Policy Handbook"],
        },
        Intent::ApprovalTime => CannedReply {
            answer: "Most requests are resolved within three business days. Long requests or \
                     requests missing information can take up to a week."
                .to_string(),
            actions: &["View my requests"],
            documents: &["Leave Policy Handbook"],
        },
    }
}

fn fallback_reply(context: &AssistantContext) -> AssistantReply {
    AssistantReply {
        answer: address(
            context,
            "I have no specific information about that question. Human Resources can help \
             with anything not covered by the leave policy."
                .to_string(),
        ),
        suggested_actions: to_strings(&[CONTACT_HR_ACTION, "Browse the leave policy FAQ"]),
        related_documents: to_strings(&["Leave Policy Handbook"]),
        confidence: FALLBACK_CONFIDENCE,
    }
}

fn address(context: &AssistantContext, answer: String) -> String {
    match context.employee_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("Hi {name}. {answer}"),
        _ => answer,
    }
}

fn plural(count: u32, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 {
        singular
    } else {
        plural
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_intent_is_answered_with_high_confidence() {
        let reply = IntentResponder::new().respond("  How to request annual leave?", None);

        assert!(reply.confidence >= 0.8);
        assert!(!reply.suggested_actions.is_empty());
        assert!(reply.answer.contains("Human Resources"));
    }

    #[test]
    fn unknown_query_falls_back_to_contact_hr() {
        let reply = IntentResponder::new().respond("xyzzy random text", None);

        assert!(reply.confidence < 0.5);
        assert!(reply
            .suggested_actions
            .iter()
            .any(|action| action == CONTACT_HR_ACTION));
    }

    #[test]
    fn intents_are_matched_in_priority_order() {
        assert_eq!(classify_intent("HOW TO REQUEST"), Some(Intent::HowToRequest));
        assert_eq!(
            classify_intent("How to request more days when my balance is low?"),
            Some(Intent::HowToRequest)
        );
        assert_eq!(
            classify_intent("What is the status of my balance adjustment?"),
            Some(Intent::BalanceInquiry)
        );
        assert_eq!(classify_intent("¿Cuántos días me quedan?"), Some(Intent::BalanceInquiry));
        assert_eq!(classify_intent("can I cancel it"), Some(Intent::Cancellation));
        assert_eq!(classify_intent("how long does it take?"), Some(Intent::ApprovalTime));
        assert_eq!(classify_intent(""), None);
    }

    #[test]
    fn context_parameterizes_the_answer() {
        let context = AssistantContext {
            employee_name: Some("Lucía".to_string()),
            remaining_balance_days: Some(12),
            pending_requests: Some(1),
            history: Vec::new(),
        };
        let responder = IntentResponder::new();

        let balance = responder.respond("what is my balance", Some(&context));
        assert!(balance.answer.starts_with("Hi Lucía."));
        assert!(balance.answer.contains("12 days"));

        let status = responder.respond("status please", Some(&context));
        assert!(status.answer.contains("1 pending leave request."));
    }

    #[test]
    fn missing_context_behaves_like_empty_context() {
        let responder = IntentResponder::new();
        let empty = AssistantContext::default();

        for query in ["what is my balance", "status?", "xyzzy"] {
            assert_eq!(
                responder.respond(query, None),
                responder.respond(query, Some(&empty))
            );
        }
    }

    #[test]
    fn respond_is_idempotent_and_leaves_context_untouched() {
        let context = AssistantContext {
            remaining_balance_days: Some(3),
            ..AssistantContext::default()
        };
        let snapshot = context.clone();
        let responder = IntentResponder::new();

        let first = responder.respond("balance?", Some(&context));
        let second = responder.respond("balance?", Some(&context));

        assert_eq!(first, second);
        assert_eq!(context, snapshot);
    }
}

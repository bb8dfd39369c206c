use chrono::{Local, NaiveDate};
use tracing::trace;

use super::domain::{
    EmployeeIdentity, LeaveDetails, LeaveRequestDraft, LeaveType, Rank, UNSPECIFIED_MOTIVE,
};
use super::normalizer::title_case;
use super::patterns::{
    date_range_patterns, leave_type_patterns, motive_pattern, notes_pattern, AREA_RULES,
    DEFAULT_AREA, MOTIVE_ABBREVIATIONS, RANK_RULES,
};

/// Confidence is accumulated in whole percentage points to keep thresholds exact.
const BASE_CONFIDENCE_PCT: u8 = 50;
const DATES_PARSED_BONUS_PCT: u8 = 30;
const KNOWN_TYPE_BONUS_PCT: u8 = 20;
const MAX_CONFIDENCE_PCT: u8 = 100;

const UNKNOWN_EMPLOYEE: &str = "Unknown";

/// Pattern-driven extractor turning leave correspondence into a reviewable draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a draft using the local calendar day as the reference date.
    pub fn extract(&self, text: &str, sender_email: &str) -> LeaveRequestDraft {
        self.extract_on(text, sender_email, Local::now().date_naive())
    }

    /// Extract a draft, substituting `today` for both bounds when no range is found.
    pub fn extract_on(&self, text: &str, sender_email: &str, today: NaiveDate) -> LeaveRequestDraft {
        let range = find_date_range(text);
        let recovered = range.map(|range| range.is_complete()).unwrap_or(false);
        let (start_date, end_date) = match range {
            Some(range) => (range.start, range.end),
            None => (Some(today), Some(today)),
        };

        let day_count = match (recovered, start_date, end_date) {
            (true, Some(start), Some(end)) => inclusive_days(start, end),
            _ => 1,
        };

        let leave_type = detect_leave_type(text);
        let needs_review = !recovered || leave_type.is_generic();

        let mut confidence_pct = BASE_CONFIDENCE_PCT;
        if recovered {
            confidence_pct += DATES_PARSED_BONUS_PCT;
        }
        if !leave_type.is_generic() {
            confidence_pct += KNOWN_TYPE_BONUS_PCT;
        }
        let confidence = f64::from(confidence_pct.min(MAX_CONFIDENCE_PCT)) / 100.0;

        LeaveRequestDraft {
            employee: identify_employee(sender_email),
            leave: LeaveDetails {
                leave_type,
                start_date,
                end_date,
                day_count,
                motive: extract_motive(text),
                notes: extract_notes(text),
            },
            confidence,
            needs_review,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

fn find_date_range(text: &str) -> Option<DateRange> {
    let (pattern, raw_start, raw_end) = date_range_patterns().iter().find_map(|pattern| {
        pattern
            .captures(text)
            .map(|(start, end)| (pattern.name, start, end))
    })?;
    trace!(pattern, raw_start, raw_end, "date range matched");

    let start = parse_date(raw_start);
    let end = parse_date(raw_end).filter(|end| start.map_or(true, |start| *end >= start));

    Some(DateRange { start, end })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split(['/', '-', '.']);
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    u32::try_from(span).unwrap_or(1).max(1)
}

fn detect_leave_type(text: &str) -> LeaveType {
    leave_type_patterns()
        .iter()
        .find(|pattern| pattern.is_match(text))
        .map(|pattern| pattern.leave_type)
        .unwrap_or(LeaveType::General)
}

fn extract_motive(text: &str) -> String {
    capture_field(motive_pattern(), text)
        .map(|motive| first_sentence(&motive).trim().to_string())
        .filter(|motive| !motive.is_empty())
        .unwrap_or_else(|| UNSPECIFIED_MOTIVE.to_string())
}

/// Cuts at the first period followed by whitespace or end of text, skipping abbreviations.
fn first_sentence(value: &str) -> &str {
    let mut search_from = 0;
    while let Some(offset) = value[search_from..].find('.') {
        let dot = search_from + offset;
        let ends_sentence = value[dot + 1..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace);
        if ends_sentence && !ends_with_abbreviation(&value[..dot]) {
            return &value[..dot];
        }
        search_from = dot + 1;
    }
    value
}

fn ends_with_abbreviation(before_dot: &str) -> bool {
    let word = before_dot
        .rsplit(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default();
    MOTIVE_ABBREVIATIONS
        .iter()
        .any(|abbreviation| word.eq_ignore_ascii_case(abbreviation))
}

fn extract_notes(text: &str) -> Option<String> {
    capture_field(notes_pattern(), text)
}

fn capture_field(pattern: &regex::Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn identify_employee(sender_email: &str) -> EmployeeIdentity {
    let email = sender_email.trim().to_lowercase();
    let local_part = email.split('@').next().unwrap_or_default();

    let segments: Vec<String> = local_part
        .split(['.', '_', '-', '+'])
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect();
    let name = if segments.is_empty() {
        UNKNOWN_EMPLOYEE.to_string()
    } else {
        segments.join(" ")
    };

    let area = AREA_RULES
        .iter()
        .find(|(needle, _)| email.contains(needle))
        .map(|(_, area)| *area)
        .unwrap_or(DEFAULT_AREA)
        .to_string();

    let rank = RANK_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| local_part.contains(keyword)))
        .map(|(_, rank)| *rank)
        .unwrap_or(Rank::Staff);

    EmployeeIdentity {
        name,
        email,
        area,
        rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
    }

    fn extract(text: &str, sender: &str) -> LeaveRequestDraft {
        HeuristicExtractor::new().extract_on(text, sender, reference_day())
    }

    #[test]
    fn extracts_spanish_annual_leave_request() {
        let draft = extract(
            "solicito licencia anual desde el 15/03/2024 hasta el 22/03/2024",
            "maria.gonzalez@defensoria.gob.ar",
        );

        assert_eq!(draft.leave.leave_type, LeaveType::Annual);
        assert_eq!(draft.leave.start_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(draft.leave.end_date, NaiveDate::from_ymd_opt(2024, 3, 22));
        assert_eq!(draft.leave.day_count, 8);
        assert_eq!(draft.confidence, 1.0);
        assert!(!draft.needs_review);
    }

    #[test]
    fn empty_input_yields_fully_defaulted_draft() {
        let draft = extract("", "");

        assert_eq!(draft.leave.start_date, Some(reference_day()));
        assert_eq!(draft.leave.end_date, Some(reference_day()));
        assert_eq!(draft.leave.day_count, 1);
        assert_eq!(draft.leave.leave_type, LeaveType::General);
        assert_eq!(draft.leave.motive, UNSPECIFIED_MOTIVE);
        assert_eq!(draft.leave.notes, None);
        assert_eq!(draft.confidence, 0.5);
        assert!(draft.needs_review);
        assert_eq!(draft.employee.name, "Unknown");
        assert_eq!(draft.employee.area, "Administration");
        assert_eq!(draft.employee.rank, Rank::Staff);
    }

    #[test]
    fn invalid_calendar_date_nulls_that_bound() {
        let draft = extract(
            "sick leave from 31/02/2024 to 04/03/2024",
            "staff@rrhh.gob.ar",
        );

        assert_eq!(draft.leave.start_date, None);
        assert_eq!(draft.leave.end_date, NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(draft.leave.day_count, 1);
        assert_eq!(draft.confidence, 0.7);
        assert!(draft.needs_review);
    }

    #[test]
    fn reversed_range_drops_end_bound() {
        let draft = extract("annual leave from 10/05/2024 to 01/05/2024", "a@b.c");

        assert_eq!(draft.leave.start_date, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(draft.leave.end_date, None);
        assert_eq!(draft.leave.day_count, 1);
        assert!(draft.needs_review);
    }

    #[test]
    fn generic_type_with_dates_still_needs_review() {
        let draft = extract("I will be away 01/04/2024 - 03/04/2024", "x@y.z");

        assert_eq!(draft.leave.leave_type, LeaveType::General);
        assert_eq!(draft.leave.day_count, 3);
        assert_eq!(draft.confidence, 0.8);
        assert!(draft.needs_review);
    }

    #[test]
    fn leave_type_priority_is_fixed() {
        assert_eq!(
            crate::intelligence::patterns::leave_type_priority(),
            vec![
                LeaveType::Annual,
                LeaveType::Sick,
                LeaveType::Compensatory,
                LeaveType::CompensatoryDayOff,
                LeaveType::Maternity,
                LeaveType::Paternity,
                LeaveType::Study,
            ]
        );

        let draft = extract(
            "Requesting compensatory leave, or sick leave if that is not possible.",
            "x@y.z",
        );
        assert_eq!(draft.leave.leave_type, LeaveType::Sick);
    }

    #[test]
    fn motive_and_notes_are_captured() {
        let text = "Licencia por maternidad del 01/09/2024 al 30/11/2024\n\
Motivo: nacimiento de mi hija.\n\
Observaciones: adjunto certificado médico";
        let draft = extract(text, "ana.perez@penal.gob.ar");

        assert_eq!(draft.leave.leave_type, LeaveType::Maternity);
        assert_eq!(draft.leave.motive, "nacimiento de mi hija");
        assert_eq!(
            draft.leave.notes.as_deref(),
            Some("adjunto certificado médico")
        );
        assert_eq!(draft.leave.day_count, 91);
    }

    #[test]
    fn motive_keeps_abbreviations_and_stops_at_sentence_end() {
        let cases = [
            (
                "Sick leave. Motivo: consulta con el Dr. Pérez. Gracias",
                "consulta con el Dr. Pérez",
            ),
            ("Reason: exam at 9.30 with Prof. Smith", "exam at 9.30 with Prof. Smith"),
            ("Reason: moving house. Thanks!", "moving house"),
            ("Motivo: .", UNSPECIFIED_MOTIVE),
        ];

        for (text, expected) in cases {
            assert_eq!(extract(text, "x@y.z").leave.motive, expected, "text: {text}");
        }
    }

    #[test]
    fn employee_identity_follows_ordered_rules() {
        let draft = extract("", "Juan_Carlos.Defensor@defensoria-civil.gob.ar");
        assert_eq!(draft.employee.name, "Juan Carlos Defensor");
        assert_eq!(draft.employee.email, "juan_carlos.defensor@defensoria-civil.gob.ar");
        assert_eq!(draft.employee.area, "Defensoría");
        assert_eq!(draft.employee.rank, Rank::Magistrate);

        let draft = extract("", "secretaria.lopez@civil.gob.ar");
        assert_eq!(draft.employee.area, "Defensoría Civil");
        assert_eq!(draft.employee.rank, Rank::Official);

        let draft = extract("", "pedro@rrhh.gob.ar");
        assert_eq!(draft.employee.area, "Human Resources");
        assert_eq!(draft.employee.rank, Rank::Staff);
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "compensatory day off from 02/02/2024 to 02/02/2024. Reason: overtime";
        let first = extract(text, "someone@civil.gob");
        let second = extract(text, "someone@civil.gob");
        assert_eq!(first, second);
        assert_eq!(first.leave.leave_type, LeaveType::CompensatoryDayOff);
        assert_eq!(first.leave.motive, "overtime");
    }
}

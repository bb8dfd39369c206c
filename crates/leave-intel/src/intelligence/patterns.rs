//! Static, priority-ordered matchers used by the heuristic extractor.
//!
//! Every list is scanned front to back and the first hit wins, so the order of
//! the tables below is part of the extraction contract.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::{LeaveType, Rank};

/// Day/month/four-digit-year with `/`, `-` or `.` separators.
const DATE: &str = r"(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4})";

static DATE_RANGE_PATTERNS: OnceLock<Vec<DateRangePattern>> = OnceLock::new();
static LEAVE_TYPE_PATTERNS: OnceLock<Vec<LeaveTypePattern>> = OnceLock::new();
static MOTIVE_PATTERN: OnceLock<Regex> = OnceLock::new();
static NOTES_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Named matcher capturing the raw start and end date of a requested range.
#[derive(Debug)]
pub(crate) struct DateRangePattern {
    pub(crate) name: &'static str,
    regex: Regex,
}

impl DateRangePattern {
    /// Returns the raw `(start, end)` tokens of the first match in `text`.
    pub(crate) fn captures<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        let captures = self.regex.captures(text)?;
        let start = captures.get(1)?.as_str();
        let end = captures.get(2)?.as_str();
        Some((start, end))
    }
}

#[derive(Debug)]
pub(crate) struct LeaveTypePattern {
    pub(crate) leave_type: LeaveType,
    regex: Regex,
}

impl LeaveTypePattern {
    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

pub(crate) fn date_range_patterns() -> &'static [DateRangePattern] {
    DATE_RANGE_PATTERNS.get_or_init(|| {
        let templates: &[(&'static str, String)] = &[
            (
                "from-to",
                format!(r"(?i)\b(?:from|desde(?:\s+el)?)\s+{DATE}\s+(?:to|until|hasta(?:\s+el)?)\s+{DATE}"),
            ),
            (
                "from-through",
                format!(r"(?i)\b(?:from|desde(?:\s+el)?)\s+{DATE}\s+(?:through|thru|al)\s+{DATE}"),
            ),
            ("del-al", format!(r"(?i)\bdel\s+{DATE}\s+al\s+{DATE}")),
            ("between-and", format!(r"(?i)\bbetween\s+{DATE}\s+and\s+{DATE}")),
            (
                "entre-y",
                format!(r"(?i)\bentre(?:\s+el)?\s+{DATE}\s+y(?:\s+el)?\s+{DATE}"),
            ),
            ("bare-dash", format!(r"{DATE}\s*[-\x{{2013}}]\s*{DATE}")),
        ];

        templates
            .iter()
            .map(|(name, source)| DateRangePattern {
                name: *name,
                regex: Regex::new(source).expect("static date-range pattern compiles"),
            })
            .collect()
    })
}

pub(crate) fn leave_type_patterns() -> &'static [LeaveTypePattern] {
    LEAVE_TYPE_PATTERNS.get_or_init(|| {
        const KEYWORDS: &[(LeaveType, &str)] = &[
            (
                LeaveType::Annual,
                r"(?i)\b(?:annual\s+leave|vacations?|licencia\s+anual|vacaciones)\b",
            ),
            (
                LeaveType::Sick,
                r"(?i)\b(?:sick\s+leave|medical\s+leave|licencia\s+m[ée]dica|licencia\s+por\s+enfermedad)\b",
            ),
            (
                LeaveType::Compensatory,
                r"(?i)\b(?:compensatory\s+leave|licencia\s+compensatoria)\b",
            ),
            (
                LeaveType::CompensatoryDayOff,
                r"(?i)\b(?:compensatory\s+day\s+off|d[íi]a\s+compensatorio)\b",
            ),
            (
                LeaveType::Maternity,
                r"(?i)\b(?:maternity\s+leave|licencia\s+por\s+maternidad)\b",
            ),
            (
                LeaveType::Paternity,
                r"(?i)\b(?:paternity\s+leave|licencia\s+por\s+paternidad)\b",
            ),
            (
                LeaveType::Study,
                r"(?i)\b(?:study\s+leave|licencia\s+por\s+estudios?)\b",
            ),
        ];

        KEYWORDS
            .iter()
            .map(|(leave_type, source)| LeaveTypePattern {
                leave_type: *leave_type,
                regex: Regex::new(source).expect("static leave-type pattern compiles"),
            })
            .collect()
    })
}

/// Leave types in the order they are tested against correspondence.
pub fn leave_type_priority() -> Vec<LeaveType> {
    leave_type_patterns()
        .iter()
        .map(|pattern| pattern.leave_type)
        .collect()
}

pub(crate) fn motive_pattern() -> &'static Regex {
    MOTIVE_PATTERN.get_or_init(|| {
        Regex::new(r"(?im)\b(?:motive|motivo|reason)\s*:\s*([^\n;]+)")
            .expect("static motive pattern compiles")
    })
}

pub(crate) fn notes_pattern() -> &'static Regex {
    NOTES_PATTERN.get_or_init(|| {
        Regex::new(r"(?im)\b(?:observations?|observaciones|notes?)\s*:\s*([^\n]+)")
            .expect("static notes pattern compiles")
    })
}

/// Abbreviations whose trailing period does not end a motive sentence.
pub(crate) const MOTIVE_ABBREVIATIONS: &[&str] = &[
    "dr", "dra", "sr", "sra", "srta", "lic", "ing", "prof", "mr", "mrs", "ms", "art", "nro",
    "etc", "approx",
];

/// Ordered `(substring, area)` rules tested against the lower-cased sender address.
pub(crate) const AREA_RULES: &[(&str, &str)] = &[
    ("defensoria", "Defensoría"),
    ("civil", "Defensoría Civil"),
    ("penal", "Defensoría Penal"),
    ("rrhh", "Human Resources"),
];

/// Catch-all area when no rule matches.
pub(crate) const DEFAULT_AREA: &str = "Administration";

/// Ordered `(keywords, rank)` rules tested against the sender local part.
pub(crate) const RANK_RULES: &[(&[&str], Rank)] = &[
    (
        &["defensor", "magistrad", "magistrate", "juez", "judge"],
        Rank::Magistrate,
    ),
    (
        &["secretari", "secretary", "oficial", "official", "funcionari"],
        Rank::Official,
    ),
];

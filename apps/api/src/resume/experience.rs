//! Experience heuristics.
//!
//! Rules run in a fixed order and the first one that fires wins:
//! explicit "N years" phrasings, work-history date ranges, then seniority keywords.

use std::sync::LazyLock;

use regex::Regex;

/// Phrasings tried in order. Patterns with a second group capture months.
const PHRASE_PATTERNS: &[&str] = &[
    r"(?i)(\d+)\s*years?\s*of\s*experience",
    r"(?i)(\d+)\s*years?\s*experience",
    r"(?i)experience:\s*(\d+)\s*years?",
    r"(?i)(\d+)\+\s*years?",
    r"(?i)(\d+)\s*years?\s*in\s*the\s*field",
    r"(?i)(\d+)\s*years?\s*of\s*work",
    r"(?i)(\d+)\s*years?\s*professional",
    r"(?i)(\d+)\s*years?\s*industry",
    r"(?i)(\d+)\s*years?\s*(\d+)\s*months?\s*experience",
    r"(?i)(\d+)\s*years?\s*(\d+)\s*months?",
    r"(?i)experience.*?(\d+)\s*years?",
    r"(?i)(\d+)\s*years?.*?experience",
    r"(?i)worked\s*for\s*(\d+)\s*years?",
    r"(?i)(\d+)\s*years?\s*of\s*work\s*history",
    r"(?i)(\d+)\s*years?\s*internship",
    r"(?i)(\d+)\s*years?\s*part.?time",
    r"(?i)(\d+)\s*years?\s*project\s*experience",
];

const DATE_RANGE_PATTERNS: &[&str] = &[
    r"(?i)(\d{4})\s*[-–]\s*(\d{4}|\bpresent\b|\bcurrent\b)",
    r"(?i)(\d{4})\s*to\s*(\d{4}|\bpresent\b|\bcurrent\b)",
];

/// Date ranges only count when one of these headings appears in the text.
const WORK_HISTORY_HEADINGS: &[&str] = &[
    "work experience",
    "employment history",
    "professional experience",
    "career history",
    "work history",
    "employment",
];

const MAX_RANGE_YEARS: i32 = 50;

/// Seniority keyword → experience band, checked in order.
const EXPERIENCE_BANDS: &[(&str, &str)] = &[
    ("entry level", "0-1 years"),
    ("junior", "1-3 years"),
    ("mid level", "3-5 years"),
    ("senior", "5-10 years"),
    ("lead", "5-10 years"),
    ("principal", "10+ years"),
    ("expert", "10+ years"),
    ("fresher", "0-1 years"),
    ("new graduate", "0-1 years"),
    ("student", "0-1 years"),
    ("undergraduate", "0-1 years"),
    ("bachelor", "0-1 years"),
    ("final year", "0-1 years"),
    ("graduating", "0-1 years"),
    ("internship", "0-1 years"),
    ("project", "0-1 years"),
];

static PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(PHRASE_PATTERNS));
static DATE_RANGES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile_all(DATE_RANGE_PATTERNS));
static RE_YEARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*years?").unwrap());

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// Best-effort experience summary such as "5 years", "2 years 6 months" or "5-10 years".
/// `current_year` resolves open-ended ranges ("2019 - present").
pub fn extract_experience(text: &str, current_year: i32) -> Option<String> {
    from_phrases(text)
        .or_else(|| from_date_ranges(text, current_year))
        .or_else(|| from_keywords(text))
}

/// First "N year(s)" count in `text`, 0 when there is none.
///
/// Shared by scoring and filtering so both read experience the same way.
pub fn extract_years(text: &str) -> u32 {
    RE_YEARS
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

fn from_phrases(text: &str) -> Option<String> {
    PHRASES.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let years = caps.get(1)?.as_str();
        Some(match caps.get(2) {
            Some(months) => format!("{years} years {} months", months.as_str()),
            None => format!("{years} years"),
        })
    })
}

fn from_date_ranges(text: &str, current_year: i32) -> Option<String> {
    let lowered = text.to_lowercase();
    if !WORK_HISTORY_HEADINGS.iter().any(|h| lowered.contains(h)) {
        return None;
    }

    DATE_RANGES.iter().find_map(|re| {
        re.captures_iter(text).find_map(|caps| {
            let start: i32 = caps[1].parse().ok()?;
            let end_raw = &caps[2];
            let end = if end_raw.eq_ignore_ascii_case("present")
                || end_raw.eq_ignore_ascii_case("current")
            {
                current_year
            } else {
                end_raw.parse().ok()?
            };
            let years = end - start;
            (0..=MAX_RANGE_YEARS)
                .contains(&years)
                .then(|| format!("{years} years"))
        })
    })
}

fn from_keywords(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    EXPERIENCE_BANDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, band)| band.to_string())
}

//! Field extraction: regex and keyword heuristics over unstructured resume text.
//!
//! Every extractor is best-effort: a field that cannot be found resolves to
//! `None` (or an empty set) rather than an error. Only empty input fails.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{Datelike, Local};
use regex::Regex;
use serde::Serialize;

use super::experience::extract_experience;
use super::ExtractionError;

/// Skill vocabulary matched by case-insensitive substring.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "rust",
    // Web
    "react", "angular", "vue", "html", "css", "node.js", "express", "django", "flask",
    // Databases
    "sql", "mysql", "postgresql", "mongodb", "redis", "oracle",
    // Cloud / DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "jenkins", "ci/cd",
    // Data science
    "machine learning", "deep learning", "tensorflow", "pytorch", "pandas", "numpy",
    // Practices
    "git", "linux", "agile", "scrum", "rest api", "microservices",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "degree", "university", "college", "b.s.", "b.a.", "m.s.",
    "m.a.", "mba", "ph.d.",
];

/// Only the first lines of a resume are considered for the name.
const NAME_SCAN_LINES: usize = 10;
const MAX_NAME_LINE_LEN: usize = 50;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// Whole-line name shapes: "First Last", "First M. Last", "First Middle Last", ALL CAPS.
static NAME_LINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^[A-Z][a-z]+\s+[A-Z][a-z]+$",
        r"^[A-Z][a-z]+\s+[A-Z]\.\s+[A-Z][a-z]+$",
        r"^[A-Z][a-z]+\s+[A-Z][a-z]+\s+[A-Z][a-z]+$",
        r"^[A-Z][A-Z\s]+$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Labelled names anywhere in the text. Name words are joined by spaces or tabs only,
/// so a capture never runs onto the next line.
static NAME_LABEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)name[:\s]+([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)",
        r"(?i)([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)\s*[-|]\s*resume",
        r"(?i)([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)\s*[-|]\s*cv",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Phone shapes in priority order. The first pattern with any hit wins.
static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // US
        r"\b\d{3}-\d{3}-\d{4}\b",
        r"\b\d{3}\.\d{3}\.\d{4}\b",
        r"\b\d{3}\s\d{3}\s\d{4}\b",
        r"\(\d{3}\)\s\d{3}-\d{4}\b",
        // International
        r"\+\d{1,3}\s\d{3}-\d{3}-\d{4}\b",
        r"\+\d{1,3}\s\d{3}\s\d{3}\s\d{4}\b",
        // Indian groupings
        r"\b\d{10}\b",
        r"\b\d{5}\s\d{5}\b",
        r"\b\d{2}\s\d{4}\s\d{4}\b",
        r"\b\d{4}\s\d{3}\s\d{3}\b",
        // Country codes
        r"\+91\s?\d{10}\b",
        r"\+1\s?\d{10}\b",
        r"\+91\s?\d{5}\s\d{5}\b",
        r"\+91\s?\d{3}\s\d{3}\s\d{4}\b",
        // Mixed separators
        r"\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b",
        r"\b\d{3}[-.\s]\d{4}[-.\s]\d{3}\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static RE_DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{10,15}\b").unwrap());

/// Structured view of a resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: BTreeSet<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub raw_text: String,
}

/// Extracts every field from `text`, resolving open-ended date ranges against
/// the current local year.
pub fn extract_fields(text: &str) -> Result<ExtractedFields, ExtractionError> {
    extract_fields_at(text, Local::now().year())
}

/// Same as [`extract_fields`] with an explicit current year.
pub fn extract_fields_at(text: &str, current_year: i32) -> Result<ExtractedFields, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::NoContent);
    }

    Ok(ExtractedFields {
        name: extract_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
        skills: extract_skills(text),
        experience: extract_experience(text, current_year),
        education: extract_education(text),
        raw_text: text.to_string(),
    })
}

pub fn extract_email(text: &str) -> Option<String> {
    RE_EMAIL.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_name(text: &str) -> Option<String> {
    let from_header = text
        .lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().count() < MAX_NAME_LINE_LEN)
        .find(|line| NAME_LINE_PATTERNS.iter().any(|re| re.is_match(line)));

    if let Some(line) = from_header {
        return Some(line.to_string());
    }

    NAME_LABEL_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .map(|caps| caps[1].trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

pub fn extract_phone(text: &str) -> Option<String> {
    if let Some(found) = PHONE_PATTERNS.iter().find_map(|re| re.find(text)) {
        return Some(found.as_str().to_string());
    }

    // Longer digit runs are usually ids or account numbers.
    RE_DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|digits| matches!(digits.len(), 10 | 11))
        .map(str::to_string)
}

pub fn extract_skills(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lowered.contains(*skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// For each education keyword present, the first `.`-delimited sentence that mentions it.
pub fn extract_education(text: &str) -> Option<String> {
    let mut sentences: Vec<&str> = Vec::new();

    for keyword in EDUCATION_KEYWORDS {
        let hit = text
            .split('.')
            .find(|sentence| sentence.to_lowercase().contains(keyword))
            .map(str::trim);

        if let Some(sentence) = hit {
            if !sentences.contains(&sentence) {
                sentences.push(sentence);
            }
        }
    }

    (!sentences.is_empty()).then(|| sentences.join("; "))
}

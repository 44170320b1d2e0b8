use once_cell::sync::Lazy;
use regex::Regex;

use super::knowledge::{EDUCATION_KEYWORDS, SUMMARY_KEYWORDS};
use super::text::window;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static PARENTHESIZED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());

static EXPERIENCE_YEARS_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)(\d+\.\d+)\+?\s*(?:years?|yrs?)(?:\s+of)?\s+(?:experience|exp)")
            .unwrap(),
        Regex::new(r"(?i)(\d+)\+?\s*(?:years?|yrs?)(?:\s+of)?\s+(?:experience|exp)").unwrap(),
    ]
});

const NAME_WINDOW: usize = 5;
const SUMMARY_WINDOW: usize = 10;
const SUMMARY_LOOKAHEAD: usize = 4;
const SUMMARY_MIN_LINE_CHARS: usize = 20;
const SUMMARY_MAX_CHARS: usize = 500;

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn guess_name(lines: &[&str]) -> Option<String> {
    for raw in window(lines, 0, NAME_WINDOW) {
        let stripped = PARENTHESIZED_RE.replace_all(raw, "");
        let line = stripped.trim();
        if line.is_empty() {
            continue;
        }

        if EMAIL_RE.is_match(line) || PHONE_RE.is_match(line) {
            continue;
        }

        let lower = line.to_lowercase();
        if lower.contains("linkedin") || lower.contains("github") {
            continue;
        }

        let words = line.split_whitespace().count();
        if !(2..=4).contains(&words) {
            continue;
        }

        let length = line.chars().count();
        if length > 3 && length < 50 {
            return Some(line.to_string());
        }
    }

    None
}

pub fn extract_experience_years(text: &str) -> Option<f64> {
    EXPERIENCE_YEARS_RES
        .iter()
        .find_map(|regex| regex.captures(text))
        .and_then(|captures| captures.get(1))
        .and_then(|years| years.as_str().parse::<f64>().ok())
}

pub fn extract_education(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .find(|line| {
            let lower = line.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(|line| line.to_string())
}

pub fn extract_summary(lines: &[&str]) -> Option<String> {
    for (index, line) in window(lines, 0, SUMMARY_WINDOW).iter().enumerate() {
        let lower = line.to_lowercase();
        if !SUMMARY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            continue;
        }

        let body: Vec<&str> = window(lines, index + 1, index + 1 + SUMMARY_LOOKAHEAD)
            .iter()
            .copied()
            .filter(|candidate| candidate.chars().count() > SUMMARY_MIN_LINE_CHARS)
            .collect();

        if !body.is_empty() {
            return Some(body.join(" ").chars().take(SUMMARY_MAX_CHARS).collect());
        }
    }

    None
}

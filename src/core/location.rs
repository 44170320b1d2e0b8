use once_cell::sync::Lazy;
use regex::Regex;

use super::knowledge::{KNOWN_CITIES, LOCATION_EXCLUSIONS};
use super::text::window;

const CITY: &str = r"[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*";

/// "City, ST", "City - 523316", "City, Country", "City, State, Country".
static LOCATION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(&format!(r"(?P<loc>{CITY},[ \t]*[A-Z]{{2}})(?:\s|\||$|\d)")).unwrap(),
        Regex::new(&format!(r"(?P<loc>{CITY}[ \t]*[-–—][ \t]*\d{{6}})")).unwrap(),
        Regex::new(&format!(r"(?P<loc>{CITY},[ \t]*[A-Z][a-z]+)(?:\s|\||$)")).unwrap(),
        Regex::new(&format!(
            r"(?P<loc>{CITY},[ \t]*[A-Z][a-z]+,[ \t]*[A-Z][a-z]+)"
        ))
        .unwrap(),
    ]
});

static CONTACT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"[\w.-]+@[\w.-]+\.\w+.*?\|.*?(?P<loc>{CITY},[ \t]*[A-Z]{{2}})"
    ))
    .unwrap()
});

static POSTAL_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{5,6}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchWindow {
    Lines { start: usize, end: usize },
    FullText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Validated,
    ValidatedKnownCity,
    ContactLine,
    StateSuffixLine,
}

#[derive(Debug, Clone, Copy)]
pub struct LocationPass {
    pub window: SearchWindow,
    pub acceptance: Acceptance,
}

pub const LOCATION_PASSES: [LocationPass; 4] = [
    LocationPass {
        window: SearchWindow::Lines { start: 0, end: 5 },
        acceptance: Acceptance::Validated,
    },
    LocationPass {
        window: SearchWindow::Lines { start: 5, end: 15 },
        acceptance: Acceptance::ValidatedKnownCity,
    },
    LocationPass {
        window: SearchWindow::FullText,
        acceptance: Acceptance::ContactLine,
    },
    LocationPass {
        window: SearchWindow::Lines { start: 0, end: 5 },
        acceptance: Acceptance::StateSuffixLine,
    },
];

impl LocationPass {
    pub fn find(&self, text: &str, lines: &[&str]) -> Option<String> {
        let scoped: Vec<&str> = match self.window {
            SearchWindow::Lines { start, end } => window(lines, start, end).to_vec(),
            SearchWindow::FullText => text.lines().collect(),
        };

        match self.acceptance {
            Acceptance::Validated => first_validated(&scoped, false),
            Acceptance::ValidatedKnownCity => first_validated(&scoped, true),
            Acceptance::ContactLine => scoped.iter().find_map(|line| {
                CONTACT_LINE_RE
                    .captures(line)
                    .and_then(|captures| captures.name("loc"))
                    .map(|m| m.as_str().trim().to_string())
            }),
            Acceptance::StateSuffixLine => scoped
                .iter()
                .find(|line| is_state_suffix_line(line))
                .map(|line| line.trim().to_string()),
        }
    }
}

pub fn extract_location(text: &str, lines: &[&str]) -> Option<String> {
    LOCATION_PASSES
        .iter()
        .find_map(|pass| pass.find(text, lines))
}

// Each pattern gets one chance: its first match in the window is accepted or
// rejected, and a rejection moves on to the next pattern.
fn first_validated(lines: &[&str], require_known_city: bool) -> Option<String> {
    for regex in LOCATION_RES.iter() {
        let Some(candidate) = lines.iter().find_map(|line| {
            regex
                .captures(line)
                .and_then(|captures| captures.name("loc"))
                .map(|m| m.as_str().trim())
        }) else {
            continue;
        };

        if !is_plausible_location(candidate) {
            continue;
        }

        if require_known_city && !names_known_city(candidate) {
            continue;
        }

        return Some(candidate.to_string());
    }

    None
}

fn is_plausible_location(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    if LOCATION_EXCLUSIONS.iter().any(|word| lower.contains(word)) {
        return false;
    }

    let length = candidate.chars().count();
    if !(5..=50).contains(&length) {
        return false;
    }

    candidate.contains(',') || candidate.contains('-') || POSTAL_CODE_RE.is_match(candidate)
}

fn names_known_city(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    KNOWN_CITIES.iter().any(|city| lower.contains(city))
}

fn is_state_suffix_line(line: &str) -> bool {
    if line.chars().count() >= 50 {
        return false;
    }

    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    matches!(parts.as_slice(), [_, state]
        if state.len() == 2 && state.chars().all(|c| c.is_ascii_uppercase()))
}

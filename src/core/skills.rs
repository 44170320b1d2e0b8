use std::collections::BTreeSet;

use super::knowledge::{matching_skills, SKILLS_SECTION_KEYWORDS, SKILLS_SECTION_TERMINATORS};
use super::text::{is_all_caps, window};

const SECTION_MAX_LINES: usize = 10;
const SHORT_HEADER_CHARS: usize = 30;

pub fn extract_skills(text: &str, lines: &[&str]) -> Vec<String> {
    let section = skills_section_text(lines);

    // An empty blob means no section was found. A section that exists but
    // matches nothing does not fall back to the full text.
    let haystack = if section.is_empty() {
        text
    } else {
        section.as_str()
    };

    let found: BTreeSet<&'static str> = matching_skills(haystack).into_iter().collect();
    drop_redundant(found)
}

pub fn skills_section_text(lines: &[&str]) -> String {
    let Some(header) = lines.iter().position(|line| is_skills_header(line)) else {
        return String::new();
    };

    // "Skills: Rust, Go" carries its list on the header line itself.
    let mut section = String::new();
    if let Some((_, inline)) = lines[header].split_once(':') {
        let inline = inline.trim();
        if !inline.is_empty() {
            section.push(' ');
            section.push_str(inline);
        }
    }

    for line in window(lines, header + 1, header + 1 + SECTION_MAX_LINES) {
        if starts_next_section(line) {
            break;
        }
        section.push(' ');
        section.push_str(line);
    }

    section
}

fn is_skills_header(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    SKILLS_SECTION_KEYWORDS.iter().any(|keyword| {
        lower == *keyword
            || lower.starts_with(&format!("{keyword}:"))
            || (lower.chars().count() < SHORT_HEADER_CHARS && lower.contains(keyword))
    })
}

fn starts_next_section(line: &str) -> bool {
    let lower = line.to_lowercase();
    if SKILLS_SECTION_TERMINATORS
        .iter()
        .any(|header| lower.starts_with(header))
    {
        return true;
    }

    let length = line.chars().count();
    is_all_caps(line) && length > 3 && length < SHORT_HEADER_CHARS
}

fn drop_redundant(found: BTreeSet<&'static str>) -> Vec<String> {
    let lowered: Vec<(&str, String)> = found.iter().map(|s| (*s, s.to_lowercase())).collect();

    lowered
        .iter()
        .filter(|(skill, lower)| {
            !lowered.iter().any(|(other, other_lower)| {
                other != skill && other.len() > skill.len() && other_lower.contains(lower.as_str())
            })
        })
        .map(|(skill, _)| skill.to_string())
        .collect()
}

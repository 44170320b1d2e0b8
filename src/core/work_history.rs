use once_cell::sync::Lazy;
use regex::Regex;

use super::models::WorkEntry;
use super::text::SectionKind;

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?";

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:{MONTH}\s+)?\d{{4}}\s*(?:-|–|—|to)\s*(?:(?:{MONTH}\s+)?\d{{4}}|present|current|now)$"
    ))
    .unwrap()
});

/// "Senior Engineer - Tech Corp (2021-Present)"
static INLINE_ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<position>.+?)\s+[-–—@]\s+(?P<company>.+?)\s*\((?P<duration>[^)]*\d{4}[^)]*)\)$",
    )
    .unwrap()
});

/// "Tech Solutions Inc., New York, NY" -> "Tech Solutions Inc."
static COMPANY_WITH_LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<company>.+?),\s*[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*,\s*[A-Z]{2}$").unwrap()
});

const BULLET_MARKERS: &[char] = &['•', '-', '*', '●', '▪', '–', '◦'];

pub fn extract_work_experience(lines: &[&str]) -> Vec<WorkEntry> {
    let Some(start) = lines
        .iter()
        .position(|line| SectionKind::classify(line) == Some(SectionKind::Experience))
    else {
        return Vec::new();
    };

    let mut jobs: Vec<WorkEntry> = Vec::new();
    let mut current: Option<WorkEntry> = None;

    for line in &lines[start + 1..] {
        if let Some(kind) = SectionKind::classify(line) {
            if kind != SectionKind::Experience {
                break;
            }
            continue;
        }

        if let Some(bullet) = strip_bullet(line) {
            if let Some(job) = current.as_mut() {
                job.description.push(bullet.to_string());
            }
            continue;
        }

        if is_date_range(line) {
            if let Some(job) = current.as_mut().filter(|job| job.duration.is_empty()) {
                job.duration = line.to_string();
            }
            continue;
        }

        if let Some(job) = parse_single_line_role(line) {
            jobs.extend(current.replace(job));
            continue;
        }

        match current.as_mut() {
            Some(job) if job.company.is_empty() && job.description.is_empty() => {
                job.company = strip_company_location(line);
            }
            _ => {
                let job = WorkEntry {
                    position: line.to_string(),
                    ..WorkEntry::default()
                };
                jobs.extend(current.replace(job));
            }
        }
    }

    jobs.extend(current);
    jobs.retain(|job| !job.position.is_empty());
    jobs
}

fn strip_bullet(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(BULLET_MARKERS)?.trim();
    (!rest.is_empty()).then_some(rest)
}

fn is_date_range(line: &str) -> bool {
    DATE_RANGE_RE.is_match(line.trim())
}

fn parse_single_line_role(line: &str) -> Option<WorkEntry> {
    if let Some(captures) = INLINE_ROLE_RE.captures(line) {
        return Some(WorkEntry {
            position: captures["position"].trim().to_string(),
            company: captures["company"].trim().to_string(),
            duration: captures["duration"].trim().to_string(),
            description: Vec::new(),
        });
    }

    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [position, company, duration] if !position.is_empty() && is_date_range(duration) => {
            Some(WorkEntry {
                position: position.to_string(),
                company: strip_company_location(company),
                duration: duration.to_string(),
                description: Vec::new(),
            })
        }
        _ => None,
    }
}

fn strip_company_location(line: &str) -> String {
    COMPANY_WITH_LOCATION_RE
        .captures(line)
        .map(|captures| captures["company"].trim().to_string())
        .unwrap_or_else(|| line.trim().to_string())
}

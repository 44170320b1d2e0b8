use tracing::debug;

use super::errors::CoreError;
use super::field_extractor::{
    extract_education, extract_email, extract_experience_years, extract_phone, extract_summary,
    guess_name,
};
use super::location::extract_location;
use super::models::ParsedResume;
use super::skills::extract_skills;
use super::text::split_lines;
use super::work_history::extract_work_experience;

pub fn extract_resume(text: &str) -> Result<ParsedResume, CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::InvalidInput("resume text is empty".to_string()));
    }

    let lines = split_lines(text);

    let parsed = ParsedResume {
        name: guess_name(&lines).unwrap_or_default(),
        email: extract_email(text).unwrap_or_default(),
        phone: extract_phone(text).unwrap_or_default(),
        skills: extract_skills(text, &lines),
        experience_years: extract_experience_years(text).unwrap_or_default(),
        education: extract_education(&lines).unwrap_or_default(),
        location: extract_location(text, &lines).unwrap_or_default(),
        summary: extract_summary(&lines).unwrap_or_default(),
        work_experience: extract_work_experience(&lines),
    };

    debug!(
        lines = lines.len(),
        skills = parsed.skills.len(),
        jobs = parsed.work_experience.len(),
        has_email = !parsed.email.is_empty(),
        has_location = !parsed.location.is_empty(),
        "extracted resume fields"
    );

    Ok(parsed)
}

use chrono::Utc;
use uuid::Uuid;

use super::errors::CoreError;
use super::models::{CandidateDraft, CandidateRecord, CandidateStatus, ParsedResume, SkillsInput};

const UNKNOWN_NAME: &str = "Unknown";
const NOT_SPECIFIED: &str = "Not Specified";

/// Form clients submit these literally when a field is left untouched.
const PLACEHOLDER_VALUES: &[&str] = &["string", "0"];

fn valid(value: Option<&String>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || PLACEHOLDER_VALUES.contains(&value) {
        return None;
    }
    Some(value.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn requested_skills(skills: Option<&SkillsInput>) -> Option<Vec<String>> {
    match skills? {
        SkillsInput::Text(text) if PLACEHOLDER_VALUES.contains(&text.trim()) => None,
        input => {
            let list = input.clone().into_list();
            (!list.is_empty()).then_some(list)
        }
    }
}

pub fn merge_candidate(
    draft: &CandidateDraft,
    parsed: &ParsedResume,
    resume_url: Option<String>,
    resume_text: Option<String>,
) -> Result<CandidateRecord, CoreError> {
    let email = valid(draft.email.as_ref())
        .or_else(|| non_empty(&parsed.email))
        .ok_or(CoreError::MissingRequiredField("Email"))?;
    let phone = valid(draft.phone.as_ref())
        .or_else(|| non_empty(&parsed.phone))
        .ok_or(CoreError::MissingRequiredField("Phone"))?;

    let experience = match draft.experience {
        Some(years) if years != 0.0 => years,
        _ => parsed.experience_years,
    };

    Ok(CandidateRecord {
        id: Uuid::new_v4(),
        name: valid(draft.name.as_ref())
            .or_else(|| non_empty(&parsed.name))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        email: email.to_lowercase(),
        phone,
        position: valid(draft.position.as_ref()).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        experience,
        status: draft
            .status
            .as_deref()
            .and_then(CandidateStatus::parse)
            .unwrap_or_default(),
        resume_url,
        resume_text,
        skills: requested_skills(draft.skills.as_ref()).unwrap_or_else(|| parsed.skills.clone()),
        location: valid(draft.location.as_ref())
            .or_else(|| non_empty(&parsed.location))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        education: non_empty(&parsed.education).or_else(|| valid(draft.education.as_ref())),
        summary: non_empty(&parsed.summary).or_else(|| valid(draft.summary.as_ref())),
        applied_date: Utc::now(),
    })
}

pub fn build_candidate(draft: &CandidateDraft) -> Result<CandidateRecord, CoreError> {
    let required = |value: Option<&String>, field: &'static str| -> Result<String, CoreError> {
        value
            .and_then(|v| non_empty(v))
            .ok_or(CoreError::MissingRequiredField(field))
    };

    let status = match draft.status.as_deref().map(str::trim) {
        None | Some("") => CandidateStatus::default(),
        Some(value) => CandidateStatus::parse(value)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown candidate status {value:?}")))?,
    };

    Ok(CandidateRecord {
        id: Uuid::new_v4(),
        name: required(draft.name.as_ref(), "Name")?,
        email: required(draft.email.as_ref(), "Email")?.to_lowercase(),
        phone: required(draft.phone.as_ref(), "Phone")?,
        position: required(draft.position.as_ref(), "Position")?,
        experience: draft.experience.unwrap_or_default(),
        status,
        resume_url: None,
        resume_text: None,
        skills: draft
            .skills
            .clone()
            .map(SkillsInput::into_list)
            .unwrap_or_default(),
        location: required(draft.location.as_ref(), "Location")?,
        education: draft.education.as_deref().and_then(non_empty),
        summary: draft.summary.as_deref().and_then(non_empty),
        applied_date: Utc::now(),
    })
}

pub fn apply_update(record: &mut CandidateRecord, patch: &CandidateDraft) -> Result<(), CoreError> {
    if let Some(name) = patch.name.as_deref().and_then(non_empty) {
        record.name = name;
    }
    if let Some(email) = patch.email.as_deref().and_then(non_empty) {
        record.email = email.to_lowercase();
    }
    if let Some(phone) = patch.phone.as_deref().and_then(non_empty) {
        record.phone = phone;
    }
    if let Some(position) = patch.position.as_deref().and_then(non_empty) {
        record.position = position;
    }
    if let Some(experience) = patch.experience {
        record.experience = experience;
    }
    if let Some(location) = patch.location.as_deref().and_then(non_empty) {
        record.location = location;
    }
    if let Some(skills) = patch.skills.clone() {
        record.skills = skills.into_list();
    }
    if let Some(status) = patch.status.as_deref() {
        record.status = CandidateStatus::parse(status)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown candidate status {status:?}")))?;
    }
    if let Some(education) = patch.education.as_deref() {
        record.education = non_empty(education);
    }
    if let Some(summary) = patch.summary.as_deref() {
        record.summary = non_empty(summary);
    }

    Ok(())
}

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub position: String,
    pub company: String,
    pub duration: String,
    #[serde(default)]
    pub description: Vec<String>,
}

/// Structured fields recovered from resume text. Every field has a default,
/// so an unrecoverable value is simply empty (or zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience_years: f64,
    pub education: String,
    pub location: String,
    pub summary: String,
    pub work_experience: Vec<WorkEntry>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CandidateStatus {
    #[default]
    New,
    Screening,
    Interview,
    Offer,
    Rejected,
}

impl CandidateStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "New" => Some(Self::New),
            "Screening" => Some(Self::Screening),
            "Interview" => Some(Self::Interview),
            "Offer" => Some(Self::Offer),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Skills arrive either as a comma-separated form field or as a JSON list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Text(String),
    List(Vec<String>),
}

impl SkillsInput {
    pub fn into_list(self) -> Vec<String> {
        match self {
            SkillsInput::Text(text) => text
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            SkillsInput::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub experience: Option<f64>,
    pub location: Option<String>,
    pub skills: Option<SkillsInput>,
    pub status: Option<String>,
    pub education: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: f64,
    pub status: CandidateStatus,
    pub resume_url: Option<String>,
    pub resume_text: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub location: String,
    pub education: Option<String>,
    pub summary: Option<String>,
    pub applied_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePreview {
    pub parsed_data: ParsedResume,
    pub resume_path: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeSettings {
    pub data_dir: PathBuf,
    pub fetch_timeout_seconds: u64,
    pub max_document_bytes: usize,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            data_dir: super::settings_store::app_data_root(),
            fetch_timeout_seconds: 30,
            max_document_bytes: 10 * 1024 * 1024,
        }
    }
}

impl IntakeSettings {
    pub fn sanitized(mut self) -> Self {
        self.fetch_timeout_seconds = self.fetch_timeout_seconds.max(1);
        self.max_document_bytes = self.max_document_bytes.max(1024);
        self
    }

    pub fn candidates_dir(&self) -> PathBuf {
        self.data_dir.join("candidates")
    }
}

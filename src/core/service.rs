use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use super::candidate_store::JsonCandidateStore;
use super::document_parser::{DocumentSource, ResumeDocumentParser};
use super::errors::CoreError;
use super::merge::{build_candidate, merge_candidate};
use super::models::{CandidateDraft, CandidateRecord, IntakeSettings, ParsedResume, ResumePreview};
use super::resume_extractor::extract_resume;

const MAX_FETCH_ATTEMPTS: u32 = 3;
const RETRY_DELAY_SECONDS: f64 = 0.5;

pub struct IntakeService {
    parser: ResumeDocumentParser,
    store: JsonCandidateStore,
}

impl IntakeService {
    pub fn new(settings: &IntakeSettings) -> anyhow::Result<Self> {
        Ok(Self {
            parser: ResumeDocumentParser::new(settings)?,
            store: JsonCandidateStore::new_with_root(settings.candidates_dir()),
        })
    }

    /// Parses an uploaded resume without creating a candidate. The upload is
    /// kept so a later `create_from_upload` can reference it.
    pub async fn preview(&self, location: &str, mime_type: &str) -> anyhow::Result<ResumePreview> {
        let result = self.read_resume(location, mime_type).await;
        match result {
            Ok((resume_text, parsed_data)) => Ok(ResumePreview {
                parsed_data,
                resume_path: location.to_string(),
                resume_text,
            }),
            Err(err) => {
                warn!(location, error = %err, "resume preview failed");
                discard_upload(location).await;
                Err(err)
            }
        }
    }

    pub async fn create_from_upload(
        &self,
        location: &str,
        mime_type: &str,
        draft: &CandidateDraft,
    ) -> anyhow::Result<CandidateRecord> {
        match self.intake(location, mime_type, draft).await {
            Ok(candidate) => {
                info!(id = %candidate.id, location, "created candidate from resume");
                Ok(candidate)
            }
            Err(err) => {
                warn!(location, error = %err, "resume intake failed");
                discard_upload(location).await;
                Err(err)
            }
        }
    }

    pub async fn create(&self, draft: &CandidateDraft) -> anyhow::Result<CandidateRecord> {
        let candidate = build_candidate(draft)?;
        self.store.insert(&candidate).await?;
        info!(id = %candidate.id, "created candidate");
        Ok(candidate)
    }

    pub async fn get(&self, id: Uuid) -> anyhow::Result<CandidateRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| CoreError::CandidateNotFound(id.to_string()).into())
    }

    pub async fn list(&self) -> anyhow::Result<Vec<CandidateRecord>> {
        self.store.list().await
    }

    pub async fn update(&self, id: Uuid, patch: &CandidateDraft) -> anyhow::Result<CandidateRecord> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: Uuid) -> anyhow::Result<CandidateRecord> {
        self.store.delete(id).await
    }

    async fn intake(
        &self,
        location: &str,
        mime_type: &str,
        draft: &CandidateDraft,
    ) -> anyhow::Result<CandidateRecord> {
        let (resume_text, parsed) = self.read_resume(location, mime_type).await?;
        let candidate = merge_candidate(
            draft,
            &parsed,
            Some(location.to_string()),
            Some(resume_text),
        )?;
        self.store.insert(&candidate).await?;
        Ok(candidate)
    }

    async fn read_resume(
        &self,
        location: &str,
        mime_type: &str,
    ) -> anyhow::Result<(String, ParsedResume)> {
        let text = self.extract_text_with_retry(location, mime_type).await?;
        let parsed = extract_resume(&text)?;
        Ok((text, parsed))
    }

    async fn extract_text_with_retry(&self, location: &str, mime_type: &str) -> anyhow::Result<String> {
        let mut attempt = 0;
        loop {
            match self.parser.extract_text(location, mime_type).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    attempt += 1;
                    if !is_retryable_error(&err) || attempt >= MAX_FETCH_ATTEMPTS {
                        return Err(err);
                    }

                    let backoff_seconds = RETRY_DELAY_SECONDS * 2_f64.powf(f64::from(attempt - 1));
                    warn!(location, attempt, error = %err, "retrying resume fetch");
                    tokio::time::sleep(Duration::from_secs_f64(backoff_seconds)).await;
                }
            }
        }
    }
}

// Remote resumes belong to the object store, so only local uploads are removed.
async fn discard_upload(location: &str) {
    let source = DocumentSource::parse(location);
    let Some(path) = source.local_path() else {
        return;
    };

    if let Err(err) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %err, "failed deleting uploaded file");
    }
}

pub fn is_retryable_error(error: &anyhow::Error) -> bool {
    if let Some(core_error) = error.downcast_ref::<CoreError>() {
        return core_error.is_retryable();
    }

    if let Some(reqwest_error) = error.downcast_ref::<reqwest::Error>() {
        if reqwest_error.is_timeout() || reqwest_error.is_connect() {
            return true;
        }

        if let Some(status) = reqwest_error.status() {
            let code = status.as_u16();
            return code == 429 || code >= 500;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::core::document_parser::tests::docx_bytes;
    use crate::core::document_parser::DOCX_MIME;
    use crate::core::models::{CandidateStatus, SkillsInput};

    fn service(root: &Path) -> IntakeService {
        IntakeService::new(&IntakeSettings {
            data_dir: root.join("data"),
            ..IntakeSettings::default()
        })
        .unwrap()
    }

    async fn upload(root: &Path, name: &str, paragraphs: &[&str]) -> String {
        let path = root.join(name);
        tokio::fs::write(&path, docx_bytes(paragraphs)).await.unwrap();
        path.to_string_lossy().to_string()
    }

    const RESUME: &[&str] = &[
        "Jane Roe",
        "Austin, TX",
        "Jane.Roe@Example.com",
        "512-555-0199",
        "SKILLS",
        "Rust, PostgreSQL, Docker",
        "EXPERIENCE",
        "Backend Engineer - Acme (2019-2023)",
        "- Built billing services",
    ];

    #[tokio::test]
    async fn preview_parses_without_persisting() {
        let temp = tempfile::tempdir().unwrap();
        let service = service(temp.path());
        let location = upload(temp.path(), "r.docx", RESUME).await;

        let preview = service.preview(&location, DOCX_MIME).await.unwrap();
        assert_eq!(preview.parsed_data.name, "Jane Roe");
        assert_eq!(preview.parsed_data.work_experience.len(), 1);
        assert_eq!(preview.resume_path, location);
        assert!(Path::new(&location).exists());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_creates_candidate_with_merged_fields() {
        let temp = tempfile::tempdir().unwrap();
        let service = service(temp.path());
        let location = upload(temp.path(), "r.docx", RESUME).await;

        let draft = CandidateDraft {
            position: Some("Platform Engineer".to_string()),
            status: Some("Screening".to_string()),
            ..CandidateDraft::default()
        };
        let candidate = service
            .create_from_upload(&location, DOCX_MIME, &draft)
            .await
            .unwrap();

        assert_eq!(candidate.email, "jane.roe@example.com");
        assert_eq!(candidate.position, "Platform Engineer");
        assert_eq!(candidate.status, CandidateStatus::Screening);
        assert_eq!(candidate.skills, vec!["Docker", "PostgreSQL", "Rust"]);
        assert_eq!(candidate.resume_url.as_deref(), Some(location.as_str()));
        assert!(candidate
            .resume_text
            .as_deref()
            .is_some_and(|text| text.contains("Acme")));

        let stored = service.get(candidate.id).await.unwrap();
        assert_eq!(stored.name, "Jane Roe");
    }

    #[tokio::test]
    async fn missing_phone_rejects_and_removes_upload() {
        let temp = tempfile::tempdir().unwrap();
        let service = service(temp.path());
        let location = upload(temp.path(), "r.docx", &["Jane Roe", "jane@example.com"]).await;

        let err = service
            .create_from_upload(&location, DOCX_MIME, &CandidateDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::MissingRequiredField("Phone"))
        ));
        assert!(!Path::new(&location).exists());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_upload_is_rejected_and_cleaned_up() {
        let temp = tempfile::tempdir().unwrap();
        let service = service(temp.path());
        let first = upload(temp.path(), "a.docx", RESUME).await;
        let second = upload(temp.path(), "b.docx", RESUME).await;

        service
            .create_from_upload(&first, DOCX_MIME, &CandidateDraft::default())
            .await
            .unwrap();
        let err = service
            .create_from_upload(&second, DOCX_MIME, &CandidateDraft::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::DuplicateEmail(_))
        ));
        assert!(Path::new(&first).exists());
        assert!(!Path::new(&second).exists());
    }

    #[tokio::test]
    async fn manual_create_then_delete() {
        let temp = tempfile::tempdir().unwrap();
        let service = service(temp.path());

        let candidate = service
            .create(&CandidateDraft {
                name: Some("Sam Lee".to_string()),
                email: Some("sam@x.io".to_string()),
                phone: Some("555-000-1111".to_string()),
                position: Some("Designer".to_string()),
                location: Some("Denver, CO".to_string()),
                skills: Some(SkillsInput::Text("Figma, Sketch".to_string())),
                ..CandidateDraft::default()
            })
            .await
            .unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);

        service.delete(candidate.id).await.unwrap();
        let err = service.get(candidate.id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::CandidateNotFound(_))
        ));
    }

    #[test]
    fn retryable_classification_follows_core_errors() {
        let throttled = anyhow::Error::new(CoreError::Fetch {
            status: 503,
            url: "https://files.example.com/r.pdf".to_string(),
        });
        let missing = anyhow::Error::new(CoreError::MissingRequiredField("Email"));

        assert!(is_retryable_error(&throttled));
        assert!(!is_retryable_error(&missing));
        assert!(!is_retryable_error(&anyhow::anyhow!("disk full")));
    }
}

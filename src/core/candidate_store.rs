use std::path::PathBuf;

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::document_parser::DocumentSource;
use super::errors::CoreError;
use super::merge::apply_update;
use super::models::{CandidateDraft, CandidateRecord};

pub struct JsonCandidateStore {
    root: PathBuf,
    mutex: Mutex<()>,
}

impl JsonCandidateStore {
    pub fn new_with_root(root: PathBuf) -> Self {
        Self {
            root,
            mutex: Mutex::new(()),
        }
    }

    pub async fn insert(&self, candidate: &CandidateRecord) -> anyhow::Result<()> {
        let _lock = self.mutex.lock().await;
        if self
            .read_all()
            .await?
            .iter()
            .any(|existing| existing.email == candidate.email)
        {
            return Err(CoreError::DuplicateEmail(candidate.email.clone()).into());
        }

        self.write(candidate).await?;
        info!(id = %candidate.id, "stored candidate");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> anyhow::Result<Option<CandidateRecord>> {
        let _lock = self.mutex.lock().await;
        self.read(id).await
    }

    /// Every stored candidate, most recently applied first.
    pub async fn list(&self) -> anyhow::Result<Vec<CandidateRecord>> {
        let _lock = self.mutex.lock().await;
        let mut candidates = self.read_all().await?;
        candidates.sort_by(|a, b| b.applied_date.cmp(&a.applied_date));
        Ok(candidates)
    }

    pub async fn update(&self, id: Uuid, patch: &CandidateDraft) -> anyhow::Result<CandidateRecord> {
        let _lock = self.mutex.lock().await;
        let mut candidate = self
            .read(id)
            .await?
            .ok_or_else(|| CoreError::CandidateNotFound(id.to_string()))?;

        apply_update(&mut candidate, patch)?;
        if self
            .read_all()
            .await?
            .iter()
            .any(|existing| existing.id != id && existing.email == candidate.email)
        {
            return Err(CoreError::DuplicateEmail(candidate.email).into());
        }

        self.write(&candidate).await?;
        Ok(candidate)
    }

    pub async fn delete(&self, id: Uuid) -> anyhow::Result<CandidateRecord> {
        let _lock = self.mutex.lock().await;
        let candidate = self
            .read(id)
            .await?
            .ok_or_else(|| CoreError::CandidateNotFound(id.to_string()))?;

        let path = self.record_path(id);
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("failed removing {}", path.display()))?;

        if let Some(resume_url) = candidate.resume_url.as_deref() {
            if let Some(resume_path) = DocumentSource::parse(resume_url).local_path() {
                if let Err(err) = tokio::fs::remove_file(resume_path).await {
                    warn!(path = %resume_path.display(), error = %err, "failed deleting resume file");
                }
            }
        }

        info!(%id, "deleted candidate");
        Ok(candidate)
    }

    async fn read(&self, id: Uuid) -> anyhow::Result<Option<CandidateRecord>> {
        let path = self.record_path(id);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }

        let json = tokio::fs::read_to_string(&path).await?;
        let candidate = serde_json::from_str::<CandidateRecord>(&json)
            .with_context(|| format!("failed parsing {}", path.display()))?;
        Ok(Some(candidate))
    }

    async fn read_all(&self) -> anyhow::Result<Vec<CandidateRecord>> {
        if !tokio::fs::try_exists(&self.root).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut dir = tokio::fs::read_dir(&self.root).await?;
        let mut candidates = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let json = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed reading {}", path.display()))?;
            match serde_json::from_str::<CandidateRecord>(&json) {
                Ok(candidate) => candidates.push(candidate),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable candidate file"),
            }
        }

        Ok(candidates)
    }

    async fn write(&self, candidate: &CandidateRecord) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string_pretty(candidate)?;
        tokio::fs::write(self.record_path(candidate.id), json).await?;
        Ok(())
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::core::models::{CandidateStatus, SkillsInput};

    fn candidate(email: &str, days_ago: i64) -> CandidateRecord {
        CandidateRecord {
            id: Uuid::new_v4(),
            name: "Jane Roe".to_string(),
            email: email.to_string(),
            phone: "555-123-4567".to_string(),
            position: "Engineer".to_string(),
            experience: 3.0,
            status: CandidateStatus::New,
            resume_url: None,
            resume_text: None,
            skills: vec!["Rust".to_string()],
            location: "Austin, TX".to_string(),
            education: None,
            summary: None,
            applied_date: Utc::now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn insert_get_and_list_newest_first() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonCandidateStore::new_with_root(temp.path().join("candidates"));

        let older = candidate("old@x.io", 10);
        let newer = candidate("new@x.io", 1);
        store.insert(&older).await.unwrap();
        store.insert(&newer).await.unwrap();

        let loaded = store.get(older.id).await.unwrap().unwrap();
        assert_eq!(loaded.email, "old@x.io");

        let listed: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.email)
            .collect();
        assert_eq!(listed, vec!["new@x.io", "old@x.io"]);

        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonCandidateStore::new_with_root(temp.path().to_path_buf());

        store.insert(&candidate("jane@x.io", 0)).await.unwrap();
        let err = store.insert(&candidate("jane@x.io", 0)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::DuplicateEmail(email)) if email == "jane@x.io"
        ));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_rewrites_fields_and_guards_email() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonCandidateStore::new_with_root(temp.path().to_path_buf());
        let first = candidate("first@x.io", 0);
        let second = candidate("second@x.io", 0);
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let updated = store
            .update(
                first.id,
                &CandidateDraft {
                    status: Some("Screening".to_string()),
                    skills: Some(SkillsInput::Text("Rust, Go".to_string())),
                    ..CandidateDraft::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, CandidateStatus::Screening);
        assert_eq!(
            store.get(first.id).await.unwrap().unwrap().skills,
            vec!["Rust", "Go"]
        );

        let clash = CandidateDraft {
            email: Some("SECOND@x.io".to_string()),
            ..CandidateDraft::default()
        };
        let err = store.update(first.id, &clash).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_record_and_local_resume() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonCandidateStore::new_with_root(temp.path().join("candidates"));
        let resume = temp.path().join("resume.pdf");
        tokio::fs::write(&resume, b"%PDF-1.4").await.unwrap();

        let mut record = candidate("jane@x.io", 0);
        record.resume_url = Some(resume.to_string_lossy().to_string());
        store.insert(&record).await.unwrap();

        store.delete(record.id).await.unwrap();
        assert!(store.get(record.id).await.unwrap().is_none());
        assert!(!resume.exists());

        let err = store.delete(record.id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::CandidateNotFound(_))
        ));
    }
}

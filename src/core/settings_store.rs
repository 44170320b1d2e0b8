use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

use super::models::IntakeSettings;

pub const DATA_DIR_ENV: &str = "RESUME_INTAKE_DATA_DIR";
pub const FETCH_TIMEOUT_ENV: &str = "RESUME_INTAKE_FETCH_TIMEOUT_SECS";

pub struct SettingsStore {
    file_path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            file_path: settings_path(),
        }
    }

    pub fn new_with_path(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub async fn load(&self) -> anyhow::Result<IntakeSettings> {
        let settings = self.load_file().await?;
        Ok(apply_overrides(settings, |key| std::env::var(key).ok()).sanitized())
    }

    pub async fn save(&self, settings: &IntakeSettings) -> anyhow::Result<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.file_path, json).await?;
        Ok(())
    }

    async fn load_file(&self) -> anyhow::Result<IntakeSettings> {
        if !tokio::fs::try_exists(&self.file_path)
            .await
            .unwrap_or(false)
        {
            return Ok(IntakeSettings::default());
        }

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .with_context(|| {
                format!("failed to read settings file {}", self.file_path.display())
            })?;

        let parsed = serde_json::from_str::<IntakeSettings>(&content).with_context(|| {
            format!("invalid JSON in settings file {}", self.file_path.display())
        })?;

        Ok(parsed)
    }
}

fn apply_overrides(
    mut settings: IntakeSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> IntakeSettings {
    if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
        settings.data_dir = PathBuf::from(dir.trim());
    }

    if let Some(raw) = lookup(FETCH_TIMEOUT_ENV) {
        match raw.trim().parse::<u64>() {
            Ok(seconds) => settings.fetch_timeout_seconds = seconds,
            Err(_) => warn!(env = FETCH_TIMEOUT_ENV, value = %raw, "ignoring invalid timeout override"),
        }
    }

    settings
}

fn settings_path() -> PathBuf {
    app_data_root().join("intake-settings.json")
}

pub fn app_data_root() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Ok(local_app_data) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(local_app_data).join("ResumeIntake");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("ResumeIntake");
        }
    }

    if let Some(path) = dirs::data_local_dir() {
        return path.join("ResumeIntake");
    }

    PathBuf::from(".").join("ResumeIntake")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults_and_save_round_trips() {
        let temp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new_with_path(temp.path().join("nested").join("settings.json"));

        let defaults = store.load_file().await.unwrap();
        assert_eq!(defaults.fetch_timeout_seconds, 30);

        let custom = IntakeSettings {
            data_dir: temp.path().join("data"),
            fetch_timeout_seconds: 5,
            max_document_bytes: 2048,
        };
        store.save(&custom).await.unwrap();

        let loaded = store.load_file().await.unwrap();
        assert_eq!(loaded.data_dir, temp.path().join("data"));
        assert_eq!(loaded.fetch_timeout_seconds, 5);
        assert_eq!(loaded.max_document_bytes, 2048);
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("settings.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = SettingsStore::new_with_path(path).load().await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn environment_overrides_replace_file_values() {
        let settings = IntakeSettings {
            data_dir: PathBuf::from("/var/lib/intake"),
            fetch_timeout_seconds: 30,
            max_document_bytes: 4096,
        };

        let overridden = apply_overrides(settings.clone(), |key| match key {
            DATA_DIR_ENV => Some("/srv/intake".to_string()),
            FETCH_TIMEOUT_ENV => Some(" 12 ".to_string()),
            _ => None,
        });
        assert_eq!(overridden.data_dir, PathBuf::from("/srv/intake"));
        assert_eq!(overridden.fetch_timeout_seconds, 12);

        let ignored = apply_overrides(settings, |key| match key {
            FETCH_TIMEOUT_ENV => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(ignored.fetch_timeout_seconds, 30);
        assert_eq!(ignored.data_dir, PathBuf::from("/var/lib/intake"));
    }
}

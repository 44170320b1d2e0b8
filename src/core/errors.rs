use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(String),
    #[error("Resume fetch failed with status {status}: {url}")]
    Fetch { status: u16, url: String },
    #[error("{0} is required. Could not extract from resume.")]
    MissingRequiredField(&'static str),
    #[error("A candidate with email {0} already exists")]
    DuplicateEmail(String),
    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),
}

impl CoreError {
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Fetch { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

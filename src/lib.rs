pub mod core;

pub use core::document_parser::ResumeDocumentParser;
pub use core::errors::CoreError;
pub use core::models::{CandidateDraft, CandidateRecord, ParsedResume, ResumePreview, WorkEntry};
pub use core::resume_extractor::extract_resume;
pub use core::service::IntakeService;

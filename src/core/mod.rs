pub mod candidate_store;
pub mod document_parser;
pub mod errors;
pub mod field_extractor;
pub mod knowledge;
pub mod location;
pub mod merge;
pub mod models;
pub mod pdf;
pub mod resume_extractor;
pub mod service;
pub mod settings_store;
pub mod skills;
pub mod text;
pub mod work_history;

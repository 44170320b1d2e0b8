use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::errors::CoreError;
use super::models::{IntakeSettings, ParsedResume};
use super::pdf::extract_pdf_text;
use super::resume_extractor::extract_resume;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MSWORD_MIME: &str = "application/msword";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    WordProcessing,
}

impl DocumentKind {
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type.trim().to_ascii_lowercase().as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME | MSWORD_MIME => Some(Self::WordProcessing),
            _ => None,
        }
    }

    pub fn mime_for_path(path: &Path) -> Option<&'static str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(PDF_MIME),
            "docx" => Some(DOCX_MIME),
            "doc" => Some(MSWORD_MIME),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Local(PathBuf),
    Remote(Url),
}

impl DocumentSource {
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(PathBuf::from(location)),
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Self::Local(path) => Some(path),
            Self::Remote(_) => None,
        }
    }
}

pub struct ResumeDocumentParser {
    client: Client,
    max_document_bytes: usize,
}

impl ResumeDocumentParser {
    pub fn new(settings: &IntakeSettings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent("ResumeIntake/1.0")
            .timeout(Duration::from_secs(settings.fetch_timeout_seconds))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self::with_client(client, settings.max_document_bytes))
    }

    pub fn with_client(client: Client, max_document_bytes: usize) -> Self {
        Self {
            client,
            max_document_bytes,
        }
    }

    /// Decodes the document at `location` to plain text. An unsupported MIME
    /// type yields empty text rather than an error.
    pub async fn extract_text(&self, location: &str, mime_type: &str) -> anyhow::Result<String> {
        let Some(kind) = DocumentKind::from_mime(mime_type) else {
            warn!(mime_type, "unsupported resume type, no text extracted");
            return Ok(String::new());
        };

        let source = DocumentSource::parse(location);
        let bytes = self.load_bytes(&source).await?;
        self.check_size(bytes.len() as u64)?;

        let text = tokio::task::spawn_blocking(move || decode_document(kind, &bytes))
            .await
            .context("document decoder task failed")??;

        debug!(location, chars = text.len(), "decoded resume document");
        Ok(text)
    }

    pub async fn parse_document(
        &self,
        location: &str,
        mime_type: &str,
    ) -> anyhow::Result<(String, ParsedResume)> {
        let text = self.extract_text(location, mime_type).await?;
        let parsed = extract_resume(&text)?;
        Ok((text, parsed))
    }

    async fn load_bytes(&self, source: &DocumentSource) -> anyhow::Result<Vec<u8>> {
        match source {
            DocumentSource::Local(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read resume file {}", path.display())),
            DocumentSource::Remote(url) => {
                info!(%url, "downloading resume");
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CoreError::Fetch {
                        status: status.as_u16(),
                        url: url.to_string(),
                    }
                    .into());
                }

                // Reject before downloading when the server announces the size.
                if let Some(length) = response.content_length() {
                    self.check_size(length)?;
                }

                let bytes = response.bytes().await?;
                Ok(bytes.to_vec())
            }
        }
    }

    fn check_size(&self, length: u64) -> Result<(), CoreError> {
        if length > self.max_document_bytes as u64 {
            return Err(CoreError::InvalidInput(format!(
                "document is {length} bytes, limit is {}",
                self.max_document_bytes
            )));
        }
        Ok(())
    }
}

pub fn decode_document(kind: DocumentKind, data: &[u8]) -> anyhow::Result<String> {
    match kind {
        DocumentKind::Pdf => extract_pdf_text(data),
        DocumentKind::WordProcessing => extract_docx_text(data).map_err(|err| {
            anyhow::Error::new(CoreError::UnsupportedDocument(format!(
                "not a readable DOCX archive: {err}"
            )))
        }),
    }
}

fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut document_file = archive.by_name("word/document.xml")?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    // Runs split words at arbitrary points, so text is only trimmed once a
    // whole paragraph has been assembled.
    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_paragraph = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                    in_paragraph = false;
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Empty(e)) if in_paragraph => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_paragraph && in_text_run {
                    let value = e.xml_content()?.into_owned();
                    current.push_str(&value);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_paragraph && in_text_run {
                    if let Some(ch) = e.resolve_char_ref()? {
                        current.push(ch);
                    } else if let Some(value) = resolve_predefined_entity(&e.decode()?) {
                        current.push_str(value);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }

        buf.clear();
    }

    Ok(lines.join("\n"))
}

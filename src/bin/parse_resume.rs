use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_intake::core::document_parser::DocumentKind;
use resume_intake::core::models::ResumePreview;
use resume_intake::core::settings_store::SettingsStore;
use resume_intake::ResumeDocumentParser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: parse_resume <path-to-resume.pdf|docx> [mime-type]");
        std::process::exit(1);
    }

    let path = &args[1];
    if !Path::new(path).exists() {
        eprintln!("File not found: {path}");
        std::process::exit(2);
    }

    let Some(mime_type) = args
        .get(2)
        .map(String::as_str)
        .or_else(|| DocumentKind::mime_for_path(Path::new(path)))
    else {
        eprintln!("Cannot infer document type of {path}; pass a MIME type");
        std::process::exit(1);
    };

    let settings = SettingsStore::new().load().await?;
    let parser = ResumeDocumentParser::new(&settings)?;
    let (resume_text, parsed_data) = parser.parse_document(path, mime_type).await?;

    let preview = ResumePreview {
        parsed_data,
        resume_path: path.clone(),
        resume_text,
    };

    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}

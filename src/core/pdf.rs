use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s<>'"\)]+"#).unwrap());

/// Text layer of a PDF. Link annotations are not part of the text layer, so
/// URLs found in the raw bytes are appended, one per line, when the text does
/// not already mention them.
pub fn extract_pdf_text(data: &[u8]) -> anyhow::Result<String> {
    let mut text =
        pdf_extract::extract_text_from_mem(data).context("failed to read PDF text layer")?;

    let links: Vec<String> = extract_hyperlinks(data)
        .into_iter()
        .filter(|link| !text.contains(link.as_str()))
        .collect();

    if !links.is_empty() {
        text.push('\n');
        text.push_str(&links.join("\n"));
    }

    Ok(text)
}

fn extract_hyperlinks(data: &[u8]) -> Vec<String> {
    let raw = String::from_utf8_lossy(data);
    let mut links: Vec<String> = Vec::new();
    for m in URL_RE.find_iter(&raw) {
        let value = m.as_str().to_string();
        if !links
            .iter()
            .any(|existing: &String| existing.eq_ignore_ascii_case(&value))
        {
            links.push(value);
        }
    }

    links
}

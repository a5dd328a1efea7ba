//! Reading and writing documents on disk.
//!
//! Writes land in a temporary file next to the destination and are renamed
//! into place, so an aborted run never leaves a partial document behind.
use super::Document;
use anyhow::{anyhow, Context, Result};
use serde_yaml::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Parse an existing document and detect its shape.
pub fn read_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(anyhow!("document {} does not exist", path.display()));
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&text)
        .with_context(|| format!("parse document YAML {}", path.display()))?;
    let document = Document::from_value(value)?;
    Ok(document)
}

/// Serialize a document with capitalized boolean literals.
pub fn render_document(document: &Document) -> Result<String> {
    let text = serde_yaml::to_string(document).context("serialize document")?;
    Ok(normalize_booleans(&text))
}

/// Rewrite `key: true`/`key: false` lines to `True`/`False`.
///
/// Downstream consumers of these documents only accept the capitalized form.
pub fn normalize_booleans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        if let Some(prefix) = body.strip_suffix(": true") {
            out.push_str(prefix);
            out.push_str(": True");
        } else if let Some(prefix) = body.strip_suffix(": false") {
            out.push_str(prefix);
            out.push_str(": False");
        } else {
            out.push_str(body);
        }
        out.push_str(newline);
    }
    out
}

/// Atomically replace `path` with the rendered document.
pub fn write_document(path: &Path, document: &Document) -> Result<()> {
    let text = render_document(document)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("create output dir {}", parent.display()))?;
    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("stage document in {}", parent.display()))?;
    staged
        .write_all(text.as_bytes())
        .context("write staged document")?;
    staged
        .persist(path)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote document");
    Ok(())
}

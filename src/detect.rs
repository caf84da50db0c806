//! Document format detection.

use crate::error::Result;
use crate::model::DocumentFormat;
use std::path::Path;

/// How many bytes of the document to sniff for HTML markers.
const SNIFF_LEN: usize = 4096;

/// Detect the format of a document from its contents.
///
/// HTML if the text opens with a doctype or `<html>` tag, or contains a
/// `<table>`/`<tr>` tag near the start. Everything else is Markdown.
///
/// # Example
/// ```
/// use metascore::detect::detect_format;
/// use metascore::DocumentFormat;
///
/// assert_eq!(detect_format("<!DOCTYPE html><html></html>"), DocumentFormat::Html);
/// assert_eq!(detect_format("| Model | Rank |\n|---|---|"), DocumentFormat::Markdown);
/// ```
pub fn detect_format(text: &str) -> DocumentFormat {
    let head = sniff_window(text).to_lowercase();
    let trimmed = head.trim_start();

    if trimmed.starts_with("<!doctype") || trimmed.starts_with("<html") {
        return DocumentFormat::Html;
    }

    if head.contains("<table") || head.contains("<tr") {
        return DocumentFormat::Html;
    }

    DocumentFormat::Markdown
}

/// Detect the format from a file extension, sniffing the contents when the
/// extension is not conclusive.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentFormat> {
    let path = path.as_ref();
    if let Some(format) = format_from_extension(path) {
        return Ok(format);
    }
    let text = std::fs::read_to_string(path)?;
    Ok(detect_format(&text))
}

/// Map a known file extension to a format.
pub fn format_from_extension(path: &Path) -> Option<DocumentFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some(DocumentFormat::Html),
        "md" | "markdown" => Some(DocumentFormat::Markdown),
        _ => None,
    }
}

fn sniff_window(text: &str) -> &str {
    if text.len() <= SNIFF_LEN {
        return text;
    }
    let mut end = SNIFF_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

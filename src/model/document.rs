//! Raw document types.

use serde::{Deserialize, Serialize};

/// Source format of a raw document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// HTML markup with `<table>` structures
    Html,
    /// GitHub-flavored Markdown with pipe tables
    #[default]
    Markdown,
}

impl DocumentFormat {
    /// File extension used for cached snapshots of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Html => "html",
            DocumentFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Html => write!(f, "HTML"),
            DocumentFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

/// An opaque text blob handed to the extractor.
///
/// Produced by a [`DocumentLoader`](crate::source::DocumentLoader) and consumed
/// once per extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Document text
    pub text: String,

    /// Document format
    pub format: DocumentFormat,
}

impl RawDocument {
    /// Create a document with an explicit format.
    pub fn new(text: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    /// Create an HTML document.
    pub fn html(text: impl Into<String>) -> Self {
        Self::new(text, DocumentFormat::Html)
    }

    /// Create a Markdown document.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self::new(text, DocumentFormat::Markdown)
    }

    /// Create a document, sniffing the format from its contents.
    pub fn detect(text: impl Into<String>) -> Self {
        let text = text.into();
        let format = crate::detect::detect_format(&text);
        Self { text, format }
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(RawDocument::html("<p>").format, DocumentFormat::Html);
        assert_eq!(RawDocument::markdown("# A").format, DocumentFormat::Markdown);
        assert_eq!(
            RawDocument::detect("<table><tr><td>1</td></tr></table>").format,
            DocumentFormat::Html
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(RawDocument::markdown("  \n ").is_empty());
        assert!(!RawDocument::markdown("x").is_empty());
    }

    #[test]
    fn test_extension() {
        assert_eq!(DocumentFormat::Html.extension(), "html");
        assert_eq!(DocumentFormat::Markdown.extension(), "md");
    }
}

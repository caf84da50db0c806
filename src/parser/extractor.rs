//! Format-independent table extraction.

use rayon::prelude::*;

use super::html::HtmlTableExtractor;
use super::markdown::MarkdownTableExtractor;
use super::options::ExtractOptions;
use crate::model::{DocumentFormat, ExtractedTable, RawDocument};

/// Extracts tables from raw documents, dispatching on document format.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    options: ExtractOptions,
}

impl TableExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Get the extractor options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every table of a document, in document order.
    pub fn extract(&self, doc: &RawDocument) -> Vec<ExtractedTable> {
        let format = self.options.format.unwrap_or(doc.format);
        match format {
            DocumentFormat::Markdown => MarkdownTableExtractor::new().extract(&doc.text),
            DocumentFormat::Html => HtmlTableExtractor::new()
                .with_loose_rows(self.options.loose_rows)
                .extract(&doc.text),
        }
    }

    /// Extract several independent documents. Output order matches input order.
    pub fn extract_all(&self, docs: &[RawDocument]) -> Vec<Vec<ExtractedTable>> {
        if self.options.parallel {
            docs.par_iter().map(|doc| self.extract(doc)).collect()
        } else {
            docs.iter().map(|doc| self.extract(doc)).collect()
        }
    }

    /// First table whose section contains `section` (case-insensitive).
    pub fn find_table(&self, doc: &RawDocument, section: &str) -> Option<ExtractedTable> {
        self.extract(doc)
            .into_iter()
            .find(|table| table.section_matches(section))
    }
}

/// Extract all tables of a document with default options.
pub fn extract_tables(doc: &RawDocument) -> Vec<ExtractedTable> {
    TableExtractor::new().extract(doc)
}

/// First table in `tables` whose section contains `section`, case-insensitively.
///
/// An empty `section` matches the first table.
pub fn first_table_by_section<'a>(
    tables: &'a [ExtractedTable],
    section: &str,
) -> Option<&'a ExtractedTable> {
    tables.iter().find(|table| table.section_matches(section))
}

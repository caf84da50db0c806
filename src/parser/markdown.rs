//! Markdown pipe-table extraction.
//!
//! Tables follow the GitHub-flavored convention: a header line containing
//! `|`, a separator line made only of dashes, colons, pipes and spaces, then
//! body lines until the first line without a pipe or a new heading. Each
//! table is tagged with the nearest preceding ATX heading (`#`…`######`) or
//! bold-only line (`**Text**`).

use crate::model::ExtractedTable;

/// Extracts pipe tables from Markdown text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTableExtractor;

impl MarkdownTableExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract all tables in document order.
    pub fn extract(&self, text: &str) -> Vec<ExtractedTable> {
        let lines: Vec<&str> = text.lines().collect();
        let mut tables = Vec::new();
        let mut section = String::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if let Some(title) = heading_title(line) {
                section = title;
                i += 1;
                continue;
            }

            if line.contains('|') && i + 1 < lines.len() && is_separator(lines[i + 1]) {
                let headers = split_row(line);
                let mut rows = Vec::new();
                let mut j = i + 2;

                while j < lines.len()
                    && lines[j].trim().contains('|')
                    && heading_title(lines[j]).is_none()
                {
                    let row = split_row(lines[j]);
                    if row.iter().any(|cell| !cell.is_empty()) {
                        rows.push(row);
                    }
                    j += 1;
                }

                let table = ExtractedTable::new(section.clone(), headers, rows);
                if has_header_cell(&table) && table.is_emittable() {
                    log::debug!(
                        "Markdown: table under '{}' with {} columns, {} rows",
                        table.section,
                        table.column_count(),
                        table.row_count()
                    );
                    tables.push(table);
                    i = j;
                    continue;
                }
                log::debug!("Markdown: dropping empty table at line {}", i + 1);
            }

            i += 1;
        }

        tables
    }
}

fn has_header_cell(table: &ExtractedTable) -> bool {
    table.headers.iter().any(|h| !h.is_empty())
}

/// Section title carried by a heading line, if the line is one.
///
/// Recognises `# Title` (any number of leading hashes) and lines wholly
/// wrapped in `**`. Headings without text are not headings.
pub fn heading_title(line: &str) -> Option<String> {
    let s = line.trim();

    if s.starts_with('#') {
        let title = s.trim_start_matches('#').trim();
        return (!title.is_empty()).then(|| title.to_string());
    }

    if s.len() >= 4 && s.starts_with("**") && s.ends_with("**") {
        let title = s.trim_matches('*').trim();
        return (!title.is_empty()).then(|| title.to_string());
    }

    None
}

/// Check if a line is a table separator such as `| --- | :---: |`.
pub fn is_separator(line: &str) -> bool {
    let s = line.trim();
    if !s.contains('|') {
        return false;
    }
    let has_rule = s.contains('-') || s.contains(':');
    has_rule
        && s
            .chars()
            .filter(|c| *c != '|')
            .all(|c| matches!(c, '-' | ':' | ' ' | '\t'))
}

/// Split a pipe-delimited line into trimmed cells.
///
/// One leading and one trailing pipe are dropped before splitting.
pub fn split_row(line: &str) -> Vec<String> {
    let s = line.trim();
    let s = s.strip_prefix('|').unwrap_or(s);
    let s = s.strip_suffix('|').unwrap_or(s);
    s.split('|').map(|cell| cell.trim().to_string()).collect()
}

//! HTML table extraction.
//!
//! Tolerant tag scanning rather than a full DOM: tables are located with
//! case-insensitive block patterns, cells are reduced to whitespace-collapsed
//! text, and each table is tagged with the last `<h1>`–`<h6>` that closes
//! before it. Nested tables are not supported.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::ExtractedTable;

static NOISE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")
        .expect("static regex")
});
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").expect("static regex"));
static TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>").expect("static regex"));
static THEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<thead\b[^>]*>.*?</thead\s*>").expect("static regex"));
static ROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("static regex"));
static CELL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(td|th)\b[^>]*>(.*?)</(?:td|th)\s*>").expect("static regex")
});
static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<li\b([^>]*)>(.*?)</li\s*>").expect("static regex"));
static DATA_RANK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)data-rank\s*=\s*["']?\s*(\d+)"#).expect("static regex")
});
static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a\s*>").expect("static regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("static regex"));

/// Extracts `<table>` structures from HTML text.
#[derive(Debug, Clone)]
pub struct HtmlTableExtractor {
    loose_rows: bool,
}

/// A row as found in the markup, before header/body split.
#[derive(Debug)]
struct RawRow {
    cells: Vec<String>,
    header_only: bool,
    in_thead: bool,
}

impl HtmlTableExtractor {
    /// Create a new extractor with the loose-row fallback enabled.
    pub fn new() -> Self {
        Self { loose_rows: true }
    }

    /// Enable or disable the loose-row fallback.
    pub fn with_loose_rows(mut self, enabled: bool) -> Self {
        self.loose_rows = enabled;
        self
    }

    /// Extract all tables in document order.
    pub fn extract(&self, html: &str) -> Vec<ExtractedTable> {
        let html = NOISE_RE.replace_all(html, " ");
        let headings = collect_headings(&html);

        let mut tables = Vec::new();
        for caps in TABLE_RE.captures_iter(&html) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let section = section_before(&headings, whole.start());
            if let Some(table) = build_table(section, inner.as_str()) {
                tables.push(table);
            }
        }

        if tables.is_empty() && self.loose_rows {
            log::debug!("HTML: no <table> found, trying loose rows");
            if let Some(table) = self.loose_table(&html, &headings) {
                tables.push(table);
            }
        }

        log::debug!("HTML: extracted {} tables", tables.len());
        tables
    }

    /// Treat stray `<tr>` rows, or failing that `<li>` items, as one table.
    fn loose_table(&self, html: &str, headings: &[(usize, String)]) -> Option<ExtractedTable> {
        let first_row = ROW_RE.find(html);
        if let Some(first) = first_row {
            let section = section_before(headings, first.start());
            return build_table(section, html);
        }

        let mut rows = Vec::new();
        let mut section_at = None;
        for caps in ITEM_RE.captures_iter(html) {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            if let Some(row) = item_row(attrs, body) {
                section_at.get_or_insert_with(|| caps.get(0).map_or(0, |m| m.start()));
                rows.push(row);
            }
        }

        let section = section_before(headings, section_at.unwrap_or(0));
        let table = ExtractedTable::new(section, vec!["rank".into(), "model".into()], rows);
        table.is_emittable().then_some(table)
    }
}

impl Default for HtmlTableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Headings as `(end offset, text)` in document order.
fn collect_headings(html: &str) -> Vec<(usize, String)> {
    HEADING_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let text = cell_text(caps.get(1)?.as_str());
            (!text.is_empty()).then_some((whole.end(), text))
        })
        .collect()
}

fn section_before(headings: &[(usize, String)], offset: usize) -> String {
    headings
        .iter()
        .take_while(|(end, _)| *end <= offset)
        .last()
        .map(|(_, text)| text.clone())
        .unwrap_or_default()
}

fn build_table(section: String, inner: &str) -> Option<ExtractedTable> {
    let thead: Option<Range<usize>> = THEAD_RE.find(inner).map(|m| m.range());

    let raw_rows: Vec<RawRow> = ROW_RE
        .captures_iter(inner)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?.as_str();
            let mut header_only = true;
            let cells: Vec<String> = CELL_RE
                .captures_iter(body)
                .map(|cell| {
                    let tag = cell.get(1).map_or("", |m| m.as_str());
                    if !tag.eq_ignore_ascii_case("th") {
                        header_only = false;
                    }
                    cell_text(cell.get(2).map_or("", |m| m.as_str()))
                })
                .collect();
            if cells.is_empty() {
                return None;
            }
            let in_thead = thead
                .as_ref()
                .is_some_and(|range| range.contains(&whole.start()));
            Some(RawRow {
                cells,
                header_only,
                in_thead,
            })
        })
        .collect();

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for row in raw_rows {
        if row.in_thead || row.header_only {
            // Repeated header rows inside the body are noise.
            if headers.is_none() {
                headers = Some(row.cells);
            }
            continue;
        }
        if row.cells.iter().any(|cell| !cell.is_empty()) {
            rows.push(row.cells);
        }
    }

    let headers = headers.unwrap_or_else(|| {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        vec![String::new(); width]
    });

    let table = ExtractedTable::new(section, headers, rows);
    if table.is_emittable() {
        log::debug!(
            "HTML: table under '{}' with {} columns, {} rows",
            table.section,
            table.column_count(),
            table.row_count()
        );
        Some(table)
    } else {
        None
    }
}

/// Turn a list item into a `[rank, name]` row.
///
/// Items need a `data-rank` attribute or a leading token with a digit;
/// anything else (navigation, footers) is skipped.
fn item_row(attrs: &str, body: &str) -> Option<Vec<String>> {
    let text = cell_text(body);
    if text.is_empty() {
        return None;
    }

    let data_rank = DATA_RANK_RE
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    let anchor = ANCHOR_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| cell_text(m.as_str()))
        .filter(|name| !name.is_empty());

    if let Some(rank) = data_rank {
        return Some(vec![rank, anchor.unwrap_or(text)]);
    }

    let (first_token, rest) = text.split_once(' ')?;
    if !first_token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let name = anchor.unwrap_or_else(|| rest.trim().to_string());
    (!name.is_empty()).then(|| vec![first_token.to_string(), name])
}

/// Reduce a fragment of markup to its visible, whitespace-collapsed text.
pub fn cell_text(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .nfc()
        .collect()
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from);
    }
    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "–",
        "mdash" => "—",
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(
            cell_text("<a href='/m'>GPT-5 <span>(high)</span></a>\n"),
            "GPT-5 (high)"
        );
        assert_eq!(cell_text("A&amp;B&nbsp;&#65;&#x42;"), "A&B AB");
        assert_eq!(cell_text("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_table_with_thead_and_section() {
        let html = r#"
            <h2>Text <em>Arena</em></h2>
            <table>
              <thead><tr><th>Rank</th><th>Model</th><th>Score</th></tr></thead>
              <tbody>
                <tr><td>1</td><td><a>gemini-2.5-pro</a></td><td>1,460</td></tr>
                <tr><td>2</td><td>claude-opus-4</td><td>1,450</td></tr>
              </tbody>
            </table>"#;

        let tables = HtmlTableExtractor::new().extract(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].section, "Text Arena");
        assert_eq!(tables[0].headers, vec!["Rank", "Model", "Score"]);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[0][1], "gemini-2.5-pro");
    }

    #[test]
    fn test_table_without_header_gets_blank_headers() {
        let html = "<TABLE><TR><TD>1</TD><TD>grok-4</TD></TR></TABLE>";
        let tables = HtmlTableExtractor::new().extract(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["", ""]);
        assert_eq!(tables[0].section, "");
    }

    #[test]
    fn test_heading_after_table_is_ignored() {
        let html = "<h1>Before</h1><table><tr><th>Model</th></tr><tr><td>a</td></tr></table>\
                    <h1>After</h1><table><tr><th>Model</th></tr><tr><td>b</td></tr></table>";
        let tables = HtmlTableExtractor::new().extract(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].section, "Before");
        assert_eq!(tables[1].section, "After");
    }

    #[test]
    fn test_empty_table_dropped() {
        let html = "<table><tr><th>Model</th></tr></table>";
        assert!(HtmlTableExtractor::new()
            .with_loose_rows(false)
            .extract(html)
            .is_empty());
    }

    #[test]
    fn test_loose_rows() {
        let html = "<div><h3>Coding</h3><tr><td>#1</td><td>o3</td></tr><tr><td>#2</td><td>gpt-4.1</td></tr></div>";
        let tables = HtmlTableExtractor::new().extract(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].section, "Coding");
        assert_eq!(tables[0].rows.len(), 2);

        assert!(HtmlTableExtractor::new()
            .with_loose_rows(false)
            .extract(html)
            .is_empty());
    }

    #[test]
    fn test_list_items() {
        let html = r#"<ol>
            <li data-rank="1"><a href="/models/anthropic/claude-sonnet-4">Claude Sonnet 4</a> 120B tokens</li>
            <li>2. <a href="/models/google/gemini-2.5-flash">Gemini 2.5 Flash</a></li>
            <li>3 grok-code-fast</li>
        </ol>"#;
        let tables = HtmlTableExtractor::new().extract(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["rank", "model"]);
        assert_eq!(
            tables[0].rows,
            vec![
                vec!["1".to_string(), "Claude Sonnet 4".to_string()],
                vec!["2.".to_string(), "Gemini 2.5 Flash".to_string()],
                vec!["3".to_string(), "grok-code-fast".to_string()],
            ]
        );
    }

    #[test]
    fn test_unranked_items_skipped() {
        let html = r#"<ul><li><a href="/">Home</a></li><li>About us</li><li>Models</li></ul>
            <h3>Coding</h3>
            <ol><li data-rank="1">Claude Sonnet 4</li><li>2 GPT 5</li><li>Gemini 2.5 Pro</li></ol>"#;
        let tables = HtmlTableExtractor::new().extract(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].section, "Coding");
        assert_eq!(
            tables[0].rows,
            vec![
                vec!["1".to_string(), "Claude Sonnet 4".to_string()],
                vec!["2".to_string(), "GPT 5".to_string()],
            ]
        );
    }

    #[test]
    fn test_scripts_are_ignored() {
        let html = "<script>var t = '<table><tr><td>x</td></tr></table>';</script><p>none</p>";
        assert!(HtmlTableExtractor::new().extract(html).is_empty());
    }
}

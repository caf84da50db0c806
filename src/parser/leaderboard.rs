//! Leaderboard parsing: from extracted tables to ranked entries.
//!
//! Column layouts are not known in advance. The name column is the first
//! header starting with "model" (else a configured default index); the rank
//! column is either a requested header or the first header mentioning
//! "rank" (else column 0). Malformed rows are skipped and unresolvable
//! columns produce an empty result; nothing here returns an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::extractor::TableExtractor;
use super::options::ParseOptions;
use crate::model::{ExtractedTable, LeaderboardEntry, RawDocument};

/// Which column carries the rank of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankColumn {
    /// First header containing "rank", else column 0
    #[default]
    Auto,
    /// Header equal to this name after case folding
    Named(String),
}

impl RankColumn {
    /// Create a named column selector.
    pub fn named(name: impl Into<String>) -> Self {
        RankColumn::Named(name.into())
    }
}

/// Independent ranking derived from one column of an overview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRanking {
    /// Column header
    pub column: String,

    /// Entries sorted by ascending value, densely ranked
    pub entries: Vec<LeaderboardEntry>,
}

/// Turns extracted tables into ranked leaderboard entries.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardParser {
    options: ParseOptions,
}

impl LeaderboardParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parser options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Index of the name column.
    pub fn name_column(&self, table: &ExtractedTable) -> usize {
        table
            .header_starting_with("model")
            .unwrap_or(self.options.default_name_column)
    }

    /// Index of the rank column, `None` when a named column is missing.
    pub fn rank_column(&self, table: &ExtractedTable, column: &RankColumn) -> Option<usize> {
        match column {
            RankColumn::Auto => Some(table.header_containing("rank").unwrap_or(0)),
            RankColumn::Named(name) => table.header_named(name),
        }
    }

    /// Parse one table into entries sorted by rank.
    ///
    /// Rows without digits in the rank cell are ranked by appearance:
    /// one past the number of rows already accepted.
    pub fn parse_table(&self, table: &ExtractedTable, column: &RankColumn) -> Vec<LeaderboardEntry> {
        let name_idx = self.name_column(table);
        let Some(rank_idx) = self.rank_column(table, column) else {
            log::debug!(
                "Leaderboard: no column {:?} in table under '{}'",
                column,
                table.section
            );
            return Vec::new();
        };
        let score_idx = table
            .header_containing("score")
            .filter(|idx| *idx != name_idx && *idx != rank_idx);
        let min_len = name_idx.max(rank_idx) + 1;

        let mut entries: Vec<LeaderboardEntry> = Vec::new();
        for row in &table.rows {
            if row.len() < min_len {
                continue;
            }
            let name = row[name_idx].trim();
            if name.is_empty() {
                continue;
            }
            let rank = parse_rank(&row[rank_idx]).unwrap_or(entries.len() as u32 + 1);

            let mut entry = LeaderboardEntry::new(name, rank, self.options.source.as_str());
            entry.score = match score_idx {
                Some(idx) => row.get(idx).and_then(|cell| parse_score(cell)),
                None => row
                    .iter()
                    .enumerate()
                    .skip(name_idx + 1)
                    .filter(|(idx, _)| *idx != rank_idx)
                    .find_map(|(_, cell)| parse_score(cell)),
            };
            entries.push(entry);
        }

        log::debug!(
            "Leaderboard: {} entries from table under '{}' (name col {}, rank col {})",
            entries.len(),
            table.section,
            name_idx,
            rank_idx
        );
        self.finish(entries)
    }

    /// Parse the first table of `doc` whose section contains `section`.
    ///
    /// A missing table yields an empty sequence.
    pub fn parse_document(
        &self,
        doc: &RawDocument,
        extractor: &TableExtractor,
        section: &str,
        column: &RankColumn,
    ) -> Vec<LeaderboardEntry> {
        match extractor.find_table(doc, section) {
            Some(table) => self.parse_table(&table, column),
            None => {
                log::debug!("Leaderboard: no table under section matching '{}'", section);
                Vec::new()
            }
        }
    }

    /// Turn every non-name column into its own ranking.
    ///
    /// Values are reduced to digits and decimal points; rows without a
    /// numeric value are left out of that column. Lower values rank better.
    pub fn parse_columns(&self, table: &ExtractedTable) -> Vec<ColumnRanking> {
        let name_idx = self.name_column(table);
        let mut rankings = Vec::new();

        for (col_idx, header) in table.headers.iter().enumerate() {
            if col_idx == name_idx {
                continue;
            }

            let mut values: Vec<(&str, f64)> = table
                .rows
                .iter()
                .filter(|row| row.len() > name_idx.max(col_idx))
                .filter_map(|row| {
                    let name = row[name_idx].trim();
                    if name.is_empty() {
                        return None;
                    }
                    parse_number(&row[col_idx]).map(|value| (name, value))
                })
                .collect();

            if values.is_empty() {
                log::debug!("Leaderboard: column '{}' has no numeric values", header);
                continue;
            }

            values.sort_by(|a, b| a.1.total_cmp(&b.1));

            let source = if self.options.source.is_empty() {
                header.clone()
            } else {
                format!("{}:{}", self.options.source, header)
            };
            let entries = values
                .into_iter()
                .enumerate()
                .map(|(i, (name, value))| {
                    LeaderboardEntry::new(name, i as u32 + 1, source.as_str()).with_score(value)
                })
                .collect();

            rankings.push(ColumnRanking {
                column: header.clone(),
                entries: self.finish(entries),
            });
        }

        rankings
    }

    fn finish(&self, mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
        entries.sort_by_key(|entry| entry.rank);
        if self.options.dedupe {
            entries = dedupe_by_name(entries);
        }
        entries
    }
}

/// Keep the first occurrence of each name, dropping later duplicates.
pub fn dedupe_by_name(entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.name.clone()))
        .collect()
}

/// Parse a rank cell such as `#1`, `3` or `12 ▲`.
///
/// All digits in the cell are kept; no digits, zero, or overflow yield `None`.
pub fn parse_rank(cell: &str) -> Option<u32> {
    let digits: String = cell
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse::<u32>().ok().filter(|rank| *rank > 0)
}

/// Parse a metric cell by keeping only digits and decimal points.
pub fn parse_number(cell: &str) -> Option<f64> {
    let numeric: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    numeric.parse::<f64>().ok()
}

/// Parse a score cell such as `1,460` or `87.5`.
pub fn parse_score(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

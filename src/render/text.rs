//! Plain text rendering for ranked output.

use crate::model::{AggregatedEntry, LeaderboardEntry};

/// One line per entry: `1. name | source rank 3 | score 1460`.
pub fn entries_to_text(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{}. {} | {} rank {} | score {}",
                i + 1,
                e.name,
                e.source,
                e.rank,
                format_score(e.score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per entry: `1. name | avg 1.50 | src:1 | src:2`.
pub fn aggregated_to_text(entries: &[AggregatedEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let ranks = e
                .ranks
                .iter()
                .map(|(source, rank)| format!("{}:{}", source, rank))
                .collect::<Vec<_>>()
                .join(" | ");
            format!("{}. {} | avg {:.2} | {}", i + 1, e.name, e.aggregated_rank, ranks)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn format_score(score: Option<f64>) -> String {
    match score {
        Some(value) => value.to_string(),
        None => "n/a".to_string(),
    }
}

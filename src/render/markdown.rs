//! Markdown rendering for ranked output.

use super::text::format_score;
use crate::model::{AggregatedEntry, LeaderboardEntry};

/// Numbered list: `1. name (source rank 3, score 1460)`.
pub fn entries_to_markdown(entries: &[LeaderboardEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{}. {} ({} rank {}, score {})",
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

/// Numbered list: `1. name (avg rank 1.50) — src #1, src #2`.
pub fn aggregated_to_markdown(entries: &[AggregatedEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let ranks = e
                .ranks
                .iter()
                .map(|(source, rank)| format!("{} #{}", source, rank))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "{}. {} (avg rank {:.2}) — {}",
                i + 1,
                e.name,
                e.aggregated_rank,
                ranks
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

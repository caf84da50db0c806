//! Rendering module for converting ranked output to text, Markdown and JSON.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{aggregated_to_markdown, entries_to_markdown};
pub use options::{OutputFormat, RenderOptions};
pub use text::{aggregated_to_text, entries_to_text};

use crate::error::Result;
use crate::model::{AggregatedEntry, LeaderboardEntry};

/// Render leaderboard entries, honouring format and top-k.
pub fn render_entries(entries: &[LeaderboardEntry], options: &RenderOptions) -> Result<String> {
    let entries = options.limit(entries);
    match options.format {
        OutputFormat::Text => Ok(entries_to_text(entries)),
        OutputFormat::Markdown => Ok(entries_to_markdown(entries)),
        OutputFormat::Json => to_json(entries, options.json_format),
    }
}

/// Render aggregated entries, honouring format and top-k.
pub fn render_aggregated(entries: &[AggregatedEntry], options: &RenderOptions) -> Result<String> {
    let entries = options.limit(entries);
    match options.format {
        OutputFormat::Text => Ok(aggregated_to_text(entries)),
        OutputFormat::Markdown => Ok(aggregated_to_markdown(entries)),
        OutputFormat::Json => to_json(entries, options.json_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entries_top_k() {
        let entries = vec![
            LeaderboardEntry::new("a", 1, "s"),
            LeaderboardEntry::new("b", 2, "s"),
            LeaderboardEntry::new("c", 3, "s"),
        ];
        let options = RenderOptions::new().with_top_k(2);
        let out = render_entries(&entries, &options).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("3. c"));
    }

    #[test]
    fn test_render_json_empty() {
        let options = RenderOptions::new()
            .with_format(OutputFormat::Json)
            .with_json_format(JsonFormat::Compact);
        assert_eq!(render_aggregated(&[], &options).unwrap(), "[]");
    }
}

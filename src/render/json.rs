//! JSON rendering for ranked output.

use serde::Serialize;

use crate::error::Result;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert entries (or any serializable value) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AggregatedEntry, LeaderboardEntry, SourceRanks};

    #[test]
    fn test_entries_pretty() {
        let entries = vec![LeaderboardEntry::new("gpt-5", 1, "lmarena:general").with_score(1460.0)];
        let json = to_json(&entries, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"name\": \"gpt-5\""));
        assert!(json.contains("\"score\": 1460.0"));
        assert!(json.contains("\"source\": \"lmarena:general\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_aggregated_compact() {
        let mut ranks = SourceRanks::new();
        ranks.push("lmarena:coding", 1);
        ranks.push("openrouter:coding", 3);
        let entries = [AggregatedEntry {
            name: "Anthropic".into(),
            ranks,
            aggregated_rank: 2.0,
        }];

        let json = to_json(&entries[..], JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Anthropic","ranks":{"lmarena:coding":1,"openrouter:coding":3},"aggregated_rank":2.0}]"#
        );
    }
}

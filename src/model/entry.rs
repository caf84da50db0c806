//! Ranked entry types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One ranked row of a single leaderboard source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Model (or creator) name, never empty
    pub name: String,

    /// 1-based rank, lower is better
    pub rank: u32,

    /// Raw score, when the source exposes one
    pub score: Option<f64>,

    /// Source label (e.g. `lmarena:coding`)
    pub source: String,
}

impl LeaderboardEntry {
    /// Create an entry without a score.
    pub fn new(name: impl Into<String>, rank: u32, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank,
            score: None,
            source: source.into(),
        }
    }

    /// Set the score and return self.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// The `(name, rank)` pair consumed by the aggregator.
    pub fn pair(&self) -> (String, u32) {
        (self.name.clone(), self.rank)
    }
}

/// Per-source ranks of one aggregated name, in source order.
///
/// Serializes as a JSON object whose keys keep source order. Ranks are
/// widened to `u64` so a penalty one past `u32::MAX` still fits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRanks(Vec<(String, u64)>);

impl SourceRanks {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source rank.
    pub fn push(&mut self, source: impl Into<String>, rank: u64) {
        self.0.push((source.into(), rank));
    }

    /// Rank for a source label.
    pub fn get(&self, source: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(label, _)| label == source)
            .map(|(_, rank)| *rank)
    }

    /// Iterate `(source, rank)` in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(label, rank)| (label.as_str(), *rank))
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no sources.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SourceRanks {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, rank) in &self.0 {
            map.serialize_entry(label, rank)?;
        }
        map.end()
    }
}

/// A name's consensus position across all sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedEntry {
    /// Model or creator name
    pub name: String,

    /// Rank per source, penalty ranks included
    pub ranks: SourceRanks,

    /// Mean of `ranks`
    pub aggregated_rank: f64,
}

/// One source's ranked `(name, rank)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRanking {
    /// Source label
    pub label: String,

    /// Ranked pairs, lower rank is better
    pub pairs: Vec<(String, u32)>,
}

impl SourceRanking {
    /// Create a source ranking.
    pub fn new(label: impl Into<String>, pairs: Vec<(String, u32)>) -> Self {
        Self {
            label: label.into(),
            pairs,
        }
    }

    /// Build a source ranking from parsed entries.
    pub fn from_entries(label: impl Into<String>, entries: &[LeaderboardEntry]) -> Self {
        Self::new(label, entries.iter().map(LeaderboardEntry::pair).collect())
    }

    /// Worst observed rank, 0 when empty.
    pub fn max_rank(&self) -> u32 {
        self.pairs.iter().map(|(_, rank)| *rank).max().unwrap_or(0)
    }

    /// Check if the source has no data.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Ordered mapping from source label to ranked pairs.
///
/// Iteration follows insertion order. Inserting an existing label replaces
/// its pairs but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSources {
    sources: Vec<SourceRanking>,
}

impl RankedSources {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a source.
    pub fn insert(&mut self, label: impl Into<String>, pairs: Vec<(String, u32)>) {
        self.push(SourceRanking::new(label, pairs));
    }

    /// Insert or replace a source ranking.
    pub fn push(&mut self, ranking: SourceRanking) {
        match self.sources.iter_mut().find(|s| s.label == ranking.label) {
            Some(existing) => existing.pairs = ranking.pairs,
            None => self.sources.push(ranking),
        }
    }

    /// Look up a source by label.
    pub fn get(&self, label: &str) -> Option<&SourceRanking> {
        self.sources.iter().find(|s| s.label == label)
    }

    /// Iterate sources in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SourceRanking> {
        self.sources.iter()
    }

    /// Source labels in insertion order.
    pub fn labels(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.label.as_str()).collect()
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if there are no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Check if every source is empty.
    pub fn has_data(&self) -> bool {
        self.sources.iter().any(|s| !s.is_empty())
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<(String, u32)>)> for RankedSources {
    fn from_iter<I: IntoIterator<Item = (L, Vec<(String, u32)>)>>(iter: I) -> Self {
        let mut sources = Self::new();
        for (label, pairs) in iter {
            sources.insert(label, pairs);
        }
        sources
    }
}

impl FromIterator<SourceRanking> for RankedSources {
    fn from_iter<I: IntoIterator<Item = SourceRanking>>(iter: I) -> Self {
        let mut sources = Self::new();
        for ranking in iter {
            sources.push(ranking);
        }
        sources
    }
}

impl<'a> IntoIterator for &'a RankedSources {
    type Item = &'a SourceRanking;
    type IntoIter = std::slice::Iter<'a, SourceRanking>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, u32)]) -> Vec<(String, u32)> {
        items.iter().map(|(n, r)| (n.to_string(), *r)).collect()
    }

    #[test]
    fn test_ranked_sources_keep_insertion_order() {
        let mut sources = RankedSources::new();
        sources.insert("b", pairs(&[("X", 1)]));
        sources.insert("a", pairs(&[("Y", 1)]));
        sources.insert("b", pairs(&[("Z", 4)]));

        assert_eq!(sources.labels(), vec!["b", "a"]);
        assert_eq!(sources.get("b").unwrap().pairs, pairs(&[("Z", 4)]));
    }

    #[test]
    fn test_max_rank() {
        assert_eq!(SourceRanking::new("s", pairs(&[("A", 1), ("B", 7)])).max_rank(), 7);
        assert_eq!(SourceRanking::new("s", vec![]).max_rank(), 0);
    }

    #[test]
    fn test_source_ranks_serialize_in_order() {
        let mut ranks = SourceRanks::new();
        ranks.push("zeta", 2);
        ranks.push("alpha", 1);
        let json = serde_json::to_string(&ranks).unwrap();
        assert_eq!(json, r#"{"zeta":2,"alpha":1}"#);
        assert_eq!(ranks.get("alpha"), Some(1));
        assert_eq!(ranks.get("beta"), None);
    }

    #[test]
    fn test_entry_score() {
        let entry = LeaderboardEntry::new("gpt-5", 1, "lmarena:general").with_score(1460.0);
        assert_eq!(entry.score, Some(1460.0));
        assert_eq!(entry.pair(), ("gpt-5".to_string(), 1));
    }
}

//! Average-rank aggregation across leaderboard sources.
//!
//! Every name seen in any source (plus the always-considered names) is
//! scored by its mean rank over all sources with data. A name missing from a
//! source takes that source's penalty rank: one worse than the worst rank
//! observed there.

use std::collections::{HashMap, HashSet};

use crate::creator::ALLOWED_CREATORS;
use crate::model::{AggregatedEntry, RankedSources, SourceRanks};

/// Ordering of names whose aggregated ranks are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Ascending by name
    #[default]
    Name,
    /// Enumeration order: first appearance across sources, then
    /// always-considered names
    Enumeration,
}

/// Options for rank aggregation.
#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    /// Names that appear in the output even without any data
    pub always_considered: Vec<String>,

    /// Tie-break policy
    pub tie_break: TieBreak,
}

impl AggregateOptions {
    /// Create options with no always-considered names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for creator rankings: [`ALLOWED_CREATORS`] are always considered.
    pub fn for_creators() -> Self {
        Self::new().with_always_considered(ALLOWED_CREATORS.iter().copied())
    }

    /// Set the always-considered names.
    pub fn with_always_considered<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_considered = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// Merges per-source rankings into one consensus ordering.
#[derive(Debug, Clone, Default)]
pub struct RankAggregator {
    options: AggregateOptions,
}

impl RankAggregator {
    /// Create an aggregator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with custom options.
    pub fn with_options(options: AggregateOptions) -> Self {
        Self { options }
    }

    /// Aggregate sources by average rank.
    ///
    /// Sources without pairs are dropped first so they cannot inject
    /// penalty ranks; with no sources left the result is empty. Within one
    /// source, a name listed twice takes its last rank.
    pub fn aggregate(&self, sources: &RankedSources) -> Vec<AggregatedEntry> {
        let sources: Vec<_> = sources.iter().filter(|s| !s.is_empty()).collect();
        if sources.is_empty() {
            log::debug!("Aggregate: no sources with data");
            return Vec::new();
        }

        let lookups: Vec<(&str, HashMap<&str, u32>, u32)> = sources
            .iter()
            .map(|source| {
                let lookup = source
                    .pairs
                    .iter()
                    .map(|(name, rank)| (name.as_str(), *rank))
                    .collect();
                (source.label.as_str(), lookup, source.max_rank())
            })
            .collect();

        let mut seen = HashSet::new();
        let candidates: Vec<&str> = sources
            .iter()
            .flat_map(|source| source.pairs.iter().map(|(name, _)| name.as_str()))
            .chain(self.options.always_considered.iter().map(String::as_str))
            .filter(|name| seen.insert(*name))
            .collect();

        let mut aggregated: Vec<AggregatedEntry> = candidates
            .into_iter()
            .map(|name| {
                let mut ranks = SourceRanks::new();
                let mut total = 0u64;
                for (label, lookup, max_rank) in &lookups {
                    let rank = lookup
                        .get(name)
                        .map_or(u64::from(*max_rank) + 1, |rank| u64::from(*rank));
                    ranks.push(*label, rank);
                    total += rank;
                }
                AggregatedEntry {
                    name: name.to_string(),
                    aggregated_rank: total as f64 / lookups.len() as f64,
                    ranks,
                }
            })
            .collect();

        match self.options.tie_break {
            TieBreak::Name => aggregated.sort_by(|a, b| {
                a.aggregated_rank
                    .total_cmp(&b.aggregated_rank)
                    .then_with(|| a.name.cmp(&b.name))
            }),
            TieBreak::Enumeration => {
                aggregated.sort_by(|a, b| a.aggregated_rank.total_cmp(&b.aggregated_rank))
            }
        }

        log::debug!(
            "Aggregate: {} names over {} sources",
            aggregated.len(),
            lookups.len()
        );
        aggregated
    }
}

/// Aggregate with default options (no always-considered names, ties by name).
pub fn aggregate_average_rank(sources: &RankedSources) -> Vec<AggregatedEntry> {
    RankAggregator::new().aggregate(sources)
}

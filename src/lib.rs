//! # metascore
//!
//! Rank AI models, and the organisations that build them, by aggregating
//! third-party leaderboard snapshots.
//!
//! Leaderboards arrive as loosely structured HTML or Markdown whose column
//! layout is not known in advance. This library extracts their tables,
//! turns them into ranked `(name, rank)` lists, and merges several such
//! lists into one consensus ranking by average rank.
//!
//! ## Quick Start
//!
//! ```
//! use metascore::{aggregate_average_rank, parse_leaderboard, RankedSources, RawDocument};
//!
//! let doc = RawDocument::markdown(
//!     "## Coding\n| Model | Rank |\n|---|---|\n| claude-opus-4 | 1 |\n| gpt-5 | 2 |\n",
//! );
//! let entries = parse_leaderboard(&doc, "coding");
//!
//! let mut sources = RankedSources::new();
//! sources.insert("arena:coding", entries.iter().map(|e| e.pair()).collect());
//! let ranking = aggregate_average_rank(&sources);
//! assert_eq!(ranking[0].name, "claude-opus-4");
//! ```
//!
//! ## Features
//!
//! - **Format-independent extraction**: HTML tables, loose HTML rows and
//!   GitHub-flavored Markdown pipe tables, each tagged with its section heading
//! - **Heuristic columns**: name and rank columns resolved from headers,
//!   with positional fallbacks
//! - **Creator identification**: model names mapped to their vendor
//! - **Average-rank aggregation**: missing names take a per-source penalty rank
//! - **Snapshot caching**: documents loaded from timestamped local snapshots

pub mod aggregate;
pub mod creator;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use aggregate::{aggregate_average_rank, AggregateOptions, RankAggregator, TieBreak};
pub use creator::{identify_creator, rank_creators, rank_creators_in, Creator, ALLOWED_CREATORS};
pub use detect::{detect_format, detect_format_from_path};
pub use error::{Error, Result};
pub use model::{
    AggregatedEntry, DocumentFormat, ExtractedTable, LeaderboardEntry, RankedSources, RawDocument,
    SourceRanking, SourceRanks,
};
pub use parser::{
    extract_tables, first_table_by_section, ColumnRanking, ExtractOptions, LeaderboardParser,
    ParseOptions, RankColumn, TableExtractor,
};
pub use render::{JsonFormat, OutputFormat, RenderOptions};
pub use source::{
    builtin_source, builtin_sources, collect_leaderboards, collect_rankings, DocumentLoader,
    Extraction, Leaderboard, LeaderboardSource, MemoryLoader, SnapshotLoader,
};

use std::path::Path;
use std::sync::Arc;

/// Read a local HTML or Markdown file.
///
/// # Example
///
/// ```no_run
/// use metascore::load_file;
///
/// let doc = load_file("data/arena.md")?;
/// println!("{} bytes of {}", doc.text.len(), doc.format);
/// # Ok::<(), metascore::Error>(())
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<RawDocument> {
    SnapshotLoader::read_file(path.as_ref(), None)
}

/// Parse the first table under a matching section into ranked entries.
///
/// The rank column is auto-detected. A missing section yields no entries.
pub fn parse_leaderboard(doc: &RawDocument, section: &str) -> Vec<LeaderboardEntry> {
    LeaderboardParser::new().parse_document(doc, &TableExtractor::new(), section, &RankColumn::Auto)
}

/// Rank the creators behind several per-model sources.
///
/// Each source is re-keyed by creator before aggregation, and
/// [`ALLOWED_CREATORS`] are always present in the output.
pub fn rank_creators_across(sources: &RankedSources) -> Vec<AggregatedEntry> {
    RankAggregator::with_options(AggregateOptions::for_creators())
        .aggregate(&rank_creators_in(sources))
}

/// Builder tying loading, extraction and aggregation together.
///
/// # Example
///
/// ```
/// use metascore::{LeaderboardSource, MemoryLoader, Metascore, RawDocument};
///
/// let loader = MemoryLoader::new().with_document(
///     "arena",
///     RawDocument::markdown("| Model | Rank |\n|---|---|\n| gemini-2.5-pro | 1 |\n"),
/// );
/// let ranking = Metascore::new(loader)
///     .with_source(LeaderboardSource::new("arena", "memory"))
///     .by_creator()
///     .rank();
/// assert_eq!(ranking[0].name, "Google");
/// assert_eq!(ranking.len(), 4);
/// ```
pub struct Metascore {
    loader: Arc<dyn DocumentLoader>,
    sources: Vec<LeaderboardSource>,
    extract_options: ExtractOptions,
    aggregate_options: AggregateOptions,
    by_creator: bool,
}

impl Metascore {
    /// Create a builder over a document loader.
    pub fn new(loader: impl DocumentLoader + 'static) -> Self {
        Self::with_loader(Arc::new(loader))
    }

    /// Create a builder over a shared document loader.
    pub fn with_loader(loader: Arc<dyn DocumentLoader>) -> Self {
        Self {
            loader,
            sources: Vec::new(),
            extract_options: ExtractOptions::default(),
            aggregate_options: AggregateOptions::default(),
            by_creator: false,
        }
    }

    /// Add a source.
    pub fn with_source(mut self, source: LeaderboardSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add several sources.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = LeaderboardSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Set aggregation options.
    pub fn with_aggregate_options(mut self, options: AggregateOptions) -> Self {
        self.aggregate_options = options;
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Rank creators instead of models.
    ///
    /// Unless always-considered names were set explicitly,
    /// [`ALLOWED_CREATORS`] are used.
    pub fn by_creator(mut self) -> Self {
        self.by_creator = true;
        if self.aggregate_options.always_considered.is_empty() {
            self.aggregate_options = self
                .aggregate_options
                .with_always_considered(ALLOWED_CREATORS.iter().copied());
        }
        self
    }

    /// Get the configured sources.
    pub fn sources(&self) -> &[LeaderboardSource] {
        &self.sources
    }

    /// Load and parse every source into labelled leaderboards.
    pub fn leaderboards(&self) -> Vec<Leaderboard> {
        collect_leaderboards(self.loader.as_ref(), &self.sources, &self.extract_options)
    }

    /// Load and parse every source into ranked pairs.
    pub fn collect(&self) -> RankedSources {
        let rankings =
            collect_rankings(self.loader.as_ref(), &self.sources, &self.extract_options);
        if self.by_creator {
            rank_creators_in(&rankings)
        } else {
            rankings
        }
    }

    /// Aggregate all sources into one consensus ranking.
    pub fn rank(&self) -> Vec<AggregatedEntry> {
        RankAggregator::with_options(self.aggregate_options.clone()).aggregate(&self.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> MemoryLoader {
        MemoryLoader::new()
            .with_document(
                "arena",
                RawDocument::markdown(
                    "| Model | Rank |\n|---|---|\n| gpt-5 | 1 |\n| claude-opus-4 | 2 |\n",
                ),
            )
            .with_document(
                "router",
                RawDocument::html(
                    "<table><tr><th>Rank</th><th>Model</th></tr>\
                     <tr><td>1</td><td>anthropic/claude-sonnet-4</td></tr>\
                     <tr><td>2</td><td>x-ai/grok-code-fast-1</td></tr></table>",
                ),
            )
    }

    #[test]
    fn test_builder_models() {
        let ranking = Metascore::new(loader())
            .with_source(LeaderboardSource::new("arena", "memory"))
            .with_source(LeaderboardSource::new("router", "memory"))
            .sequential()
            .rank();

        assert_eq!(ranking.len(), 4);
        assert!(ranking.iter().all(|e| e.ranks.len() == 2));
        // gpt-5: (1 + 3) / 2, claude-sonnet-4: (3 + 1) / 2; ties by name.
        assert_eq!(ranking[0].name, "anthropic/claude-sonnet-4");
        assert_eq!(ranking[0].aggregated_rank, 2.0);
    }

    #[test]
    fn test_builder_creators() {
        let builder = Metascore::new(loader())
            .with_sources([
                LeaderboardSource::new("arena", "memory"),
                LeaderboardSource::new("router", "memory"),
            ])
            .by_creator();
        let ranking = builder.rank();

        let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Anthropic", "OpenAI", "xAI", "Google"]);
        assert_eq!(ranking[0].aggregated_rank, 1.5);
        assert_eq!(ranking[3].aggregated_rank, 3.0);
    }

    #[test]
    fn test_builder_missing_source_is_ignored() {
        let ranking = Metascore::new(loader())
            .with_source(LeaderboardSource::new("arena", "memory"))
            .with_source(LeaderboardSource::new("gone", "memory"))
            .rank();
        assert!(ranking.iter().all(|e| e.ranks.len() == 1));
    }

    #[test]
    fn test_builder_no_data() {
        let ranking = Metascore::new(MemoryLoader::new())
            .with_source(LeaderboardSource::new("gone", "memory"))
            .by_creator()
            .rank();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_parse_leaderboard() {
        let doc = RawDocument::markdown("| Model | Rank |\n| --- | --- |\n| Foo | 2 |\n| Bar | #1 |\n");
        let entries = parse_leaderboard(&doc, "");
        let pairs: Vec<(String, u32)> = entries.iter().map(LeaderboardEntry::pair).collect();
        assert_eq!(pairs, vec![("Bar".to_string(), 1), ("Foo".to_string(), 2)]);
    }

    #[test]
    fn test_rank_creators_across() {
        let sources: RankedSources = [(
            "s1",
            vec![("o3".to_string(), 1), ("claude-opus-4".to_string(), 2)],
        )]
        .into_iter()
        .collect();
        let ranking = rank_creators_across(&sources);
        assert_eq!(ranking[0].name, "OpenAI");
        assert_eq!(ranking.len(), 4);
    }
}

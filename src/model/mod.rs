//! Data model types for leaderboard extraction and aggregation.
//!
//! Each stage produces fresh, independently owned values:
//! `RawDocument` → `ExtractedTable` → `LeaderboardEntry` → `AggregatedEntry`.

mod document;
mod entry;
mod table;

pub use document::{DocumentFormat, RawDocument};
pub use entry::{AggregatedEntry, LeaderboardEntry, RankedSources, SourceRanking, SourceRanks};
pub use table::ExtractedTable;

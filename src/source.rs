//! Leaderboard sources and document loaders.
//!
//! A [`LeaderboardSource`] says where a leaderboard lives and how to read
//! it; a [`DocumentLoader`] turns that into a [`RawDocument`]. Loaders never
//! fail outward: a missing document is `None`, which downstream becomes an
//! empty ranking that aggregation ignores.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::detect::{detect_format, format_from_extension};
use crate::error::{Error, Result};
use crate::model::{DocumentFormat, LeaderboardEntry, RankedSources, RawDocument, SourceRanking};
use crate::parser::{ExtractOptions, LeaderboardParser, ParseOptions, RankColumn, TableExtractor};

/// How to turn a source document into rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extraction {
    /// One ranking from the first table under a matching section
    Ranked {
        /// Case-insensitive section substring, empty for the first table
        section: String,
        /// Rank column selector
        column: RankColumn,
    },
    /// One ranking per non-name column of an overview table
    PerColumn {
        /// Case-insensitive section substring, empty for the first table
        section: String,
    },
}

impl Default for Extraction {
    fn default() -> Self {
        Extraction::Ranked {
            section: String::new(),
            column: RankColumn::Auto,
        }
    }
}

/// Where a leaderboard lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSource {
    /// Source label, e.g. `lmarena:coding`
    pub label: String,

    /// URL or local file path
    pub locator: String,

    /// Snapshot cache key, e.g. `lmarena-coding`
    pub snapshot: String,

    /// Document format, detected when absent
    pub format: Option<DocumentFormat>,

    /// Extraction strategy
    pub extraction: Extraction,

    /// Keep only the best-ranked row per name
    pub dedupe: bool,
}

impl LeaderboardSource {
    /// Create a source. The snapshot key defaults to the label with `:` replaced by `-`.
    pub fn new(label: impl Into<String>, locator: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            snapshot: label.replace(':', "-"),
            label,
            locator: locator.into(),
            format: None,
            extraction: Extraction::default(),
            dedupe: false,
        }
    }

    /// Set the document format.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the snapshot cache key.
    pub fn with_snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.snapshot = snapshot.into();
        self
    }

    /// Set the extraction strategy.
    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        self.extraction = extraction;
        self
    }

    /// Enable or disable per-name de-duplication.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Check the definition is usable.
    pub fn validate(&self) -> Result<()> {
        let reason = if self.label.trim().is_empty() {
            "empty label"
        } else if self.locator.trim().is_empty() && self.snapshot.trim().is_empty() {
            "neither locator nor snapshot given"
        } else {
            return Ok(());
        };
        Err(Error::InvalidSource {
            label: self.label.clone(),
            reason: reason.to_string(),
        })
    }

    /// Check if the locator is an HTTP(S) URL.
    pub fn is_remote(&self) -> bool {
        self.locator.starts_with("http://") || self.locator.starts_with("https://")
    }

    /// Parse a loaded document into labelled leaderboards.
    ///
    /// `Ranked` yields at most one leaderboard under this source's label;
    /// `PerColumn` yields one per numeric column, labelled `label:column`.
    pub fn parse(&self, doc: &RawDocument, extractor: &TableExtractor) -> Vec<Leaderboard> {
        let parser = LeaderboardParser::with_options(
            ParseOptions::new()
                .with_source(self.label.as_str())
                .with_dedupe(self.dedupe),
        );

        match &self.extraction {
            Extraction::Ranked { section, column } => {
                let entries = parser.parse_document(doc, extractor, section, column);
                vec![Leaderboard::new(self.label.as_str(), entries)]
            }
            Extraction::PerColumn { section } => match extractor.find_table(doc, section) {
                Some(table) => parser
                    .parse_columns(&table)
                    .into_iter()
                    .map(|ranking| {
                        Leaderboard::new(format!("{}:{}", self.label, ranking.column), ranking.entries)
                    })
                    .collect(),
                None => {
                    log::debug!("{}: no table under '{}'", self.label, section);
                    Vec::new()
                }
            },
        }
    }
}

/// Entries of one leaderboard, labelled by source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    /// Source label
    pub label: String,

    /// Entries sorted by rank
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create a leaderboard.
    pub fn new(label: impl Into<String>, entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }

    /// The `(name, rank)` pairs consumed by the aggregator.
    pub fn ranking(&self) -> SourceRanking {
        SourceRanking::from_entries(self.label.as_str(), &self.entries)
    }
}

/// Supplies raw documents for leaderboard sources.
///
/// Implement this trait to add a new way of obtaining documents (network,
/// cache, fixtures). Absence is `None`, never an error.
pub trait DocumentLoader: Send + Sync {
    /// Get the name of this loader.
    fn name(&self) -> &str;

    /// Load the document behind a source.
    fn load(&self, source: &LeaderboardSource) -> Option<RawDocument>;
}

/// Loads documents from local files and cached snapshots.
///
/// Snapshots are named `<snapshot>-<unix timestamp>.<ext>`; the newest wins.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    dir: PathBuf,
}

impl SnapshotLoader {
    /// Create a loader over a snapshot directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the newest snapshot for `name`.
    pub fn latest_snapshot(&self, name: &str) -> Result<PathBuf> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::SnapshotNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let stem = path.file_stem()?.to_str()?;
                let ts = stem.strip_prefix(name)?.strip_prefix('-')?;
                let ts: i64 = ts.parse().ok()?;
                Some((ts, path))
            })
            .max_by_key(|(ts, _)| *ts)
            .map(|(_, path)| path)
            .ok_or_else(|| Error::SnapshotNotFound(name.to_string()))
    }

    /// Write a timestamped snapshot and return its path.
    pub fn save_snapshot(&self, name: &str, format: DocumentFormat, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let ts = chrono::Utc::now().timestamp();
        let path = self
            .dir
            .join(format!("{}-{}.{}", name, ts, format.extension()));
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Read a document from a file, detecting its format when not given.
    ///
    /// Files that are not UTF-8 text are rejected as [`Error::UnknownFormat`].
    pub fn read_file(path: &Path, format: Option<DocumentFormat>) -> Result<RawDocument> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                Error::UnknownFormat(format!("{} is not UTF-8 text", path.display()))
            }
            _ => Error::Io(e),
        })?;
        let format = format
            .or_else(|| format_from_extension(path))
            .unwrap_or_else(|| detect_format(&text));
        Ok(RawDocument::new(text, format))
    }

    /// Load the newest snapshot of a source.
    pub fn load_snapshot(&self, source: &LeaderboardSource) -> Result<RawDocument> {
        let path = self.latest_snapshot(&source.snapshot)?;
        log::debug!("{}: using snapshot {}", source.label, path.display());
        Self::read_file(&path, source.format)
    }
}

impl DocumentLoader for SnapshotLoader {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn load(&self, source: &LeaderboardSource) -> Option<RawDocument> {
        let direct = Path::new(&source.locator);
        let result = if !source.is_remote() && direct.is_file() {
            Self::read_file(direct, source.format)
        } else {
            self.load_snapshot(source)
        };

        match result {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::debug!("{}: {}", source.label, e);
                None
            }
        }
    }
}

/// Serves documents from memory, keyed by source label.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: HashMap<String, RawDocument>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document for a source label.
    pub fn insert(&mut self, label: impl Into<String>, doc: RawDocument) {
        self.documents.insert(label.into(), doc);
    }

    /// Register a document and return self.
    pub fn with_document(mut self, label: impl Into<String>, doc: RawDocument) -> Self {
        self.insert(label, doc);
        self
    }
}

impl DocumentLoader for MemoryLoader {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, source: &LeaderboardSource) -> Option<RawDocument> {
        self.documents.get(&source.label).cloned()
    }
}

/// Load and parse every source. Output order follows `sources`.
///
/// A source whose document is missing yields an empty leaderboard under its
/// own label, so callers can still report it.
pub fn collect_leaderboards(
    loader: &dyn DocumentLoader,
    sources: &[LeaderboardSource],
    options: &ExtractOptions,
) -> Vec<Leaderboard> {
    let extractor = TableExtractor::with_options(options.clone());
    let load_one = |source: &LeaderboardSource| -> Vec<Leaderboard> {
        if let Err(e) = source.validate() {
            log::warn!("Skipping source: {}", e);
            return Vec::new();
        }
        match loader.load(source) {
            Some(doc) => source.parse(&doc, &extractor),
            None => {
                log::warn!("{}: no document from {} loader", source.label, loader.name());
                vec![Leaderboard::new(source.label.as_str(), Vec::new())]
            }
        }
    };

    let nested: Vec<Vec<Leaderboard>> = if options.parallel {
        sources.par_iter().map(load_one).collect()
    } else {
        sources.iter().map(load_one).collect()
    };
    nested.into_iter().flatten().collect()
}

/// Load, parse and reduce every source to `(name, rank)` pairs.
pub fn collect_rankings(
    loader: &dyn DocumentLoader,
    sources: &[LeaderboardSource],
    options: &ExtractOptions,
) -> RankedSources {
    collect_leaderboards(loader, sources, options)
        .iter()
        .map(Leaderboard::ranking)
        .collect()
}

/// Built-in leaderboard catalogue.
pub fn builtin_sources() -> Vec<LeaderboardSource> {
    vec![
        LeaderboardSource::new("lmarena:general", "https://lmarena.ai/leaderboard")
            .with_format(DocumentFormat::Html),
        LeaderboardSource::new("lmarena:coding", "https://lmarena.ai/leaderboard/coding")
            .with_format(DocumentFormat::Html),
        LeaderboardSource::new("openrouter:coding", "https://openrouter.ai/rankings/coding")
            .with_format(DocumentFormat::Html)
            .with_dedupe(true),
    ]
}

/// Look up a built-in source by label.
pub fn builtin_source(label: &str) -> Option<LeaderboardSource> {
    builtin_sources().into_iter().find(|s| s.label == label)
}

//! Model-to-creator identification.
//!
//! Maps a raw model name or provider slug to the organisation that produces
//! it. Matching is case-insensitive and total: anything unrecognised falls
//! back to its `provider/` prefix or to [`Creator::Other`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::model::{RankedSources, SourceRanking};

/// Creators that always appear in creator rankings, even without data.
pub const ALLOWED_CREATORS: &[&str] = &["OpenAI", "Google", "Anthropic", "xAI"];

/// Model-generation names such as `o3` or `o4-mini`.
static O_SERIES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^o\d+\b").expect("static regex"));

/// A canonical creator label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Creator {
    /// OpenAI
    OpenAI,
    /// Google
    Google,
    /// Anthropic
    Anthropic,
    /// xAI
    XAi,
    /// Unknown creator
    Other,
    /// Ad-hoc label taken from a `provider/model` prefix
    Provider(String),
}

impl Creator {
    /// Display label of the creator.
    pub fn as_str(&self) -> &str {
        match self {
            Creator::OpenAI => "OpenAI",
            Creator::Google => "Google",
            Creator::Anthropic => "Anthropic",
            Creator::XAi => "xAI",
            Creator::Other => "Other",
            Creator::Provider(name) => name,
        }
    }

    /// Look up a known provider slug such as `openai` or `x-ai`.
    pub fn from_slug(slug: &str) -> Option<Creator> {
        match slug.trim().to_lowercase().as_str() {
            "openai" => Some(Creator::OpenAI),
            "google" => Some(Creator::Google),
            "anthropic" => Some(Creator::Anthropic),
            "x-ai" | "xai" => Some(Creator::XAi),
            "others" | "other" => Some(Creator::Other),
            _ => None,
        }
    }

    /// Check if this creator is one of [`ALLOWED_CREATORS`].
    pub fn is_tracked(&self) -> bool {
        ALLOWED_CREATORS.contains(&self.as_str())
    }
}

impl std::fmt::Display for Creator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Creator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identify the creator of a model.
///
/// Precedence, first match wins:
/// 1. the whole name is a known provider slug;
/// 2. the text before the first `/` is a known provider slug;
/// 3. family heuristics (`gpt`, `o3`, `gemini`, `claude`, `grok`, ...);
/// 4. the literal `provider/` prefix, else [`Creator::Other`].
///
/// # Example
/// ```
/// use metascore::{identify_creator, Creator};
///
/// assert_eq!(identify_creator("anthropic/claude-3-opus"), Creator::Anthropic);
/// assert_eq!(identify_creator("o4-mini"), Creator::OpenAI);
/// assert_eq!(identify_creator("some-random-model"), Creator::Other);
/// ```
pub fn identify_creator(model_name: &str) -> Creator {
    if let Some(creator) = Creator::from_slug(model_name) {
        return creator;
    }

    let prefix = model_name.split_once('/').map(|(provider, _)| provider);
    if let Some(creator) = prefix.and_then(Creator::from_slug) {
        return creator;
    }

    let name = model_name.trim().to_lowercase();
    if name.contains("gpt") || name.contains("chatgpt") || O_SERIES_RE.is_match(&name) {
        return Creator::OpenAI;
    }
    if ["gemini", "imagen", "veo"].iter().any(|k| name.contains(k)) {
        return Creator::Google;
    }
    if name.contains("claude") {
        return Creator::Anthropic;
    }
    if name.contains("grok") {
        return Creator::XAi;
    }

    match prefix {
        Some(provider) if !provider.trim().is_empty() => Creator::Provider(provider.to_string()),
        _ => Creator::Other,
    }
}

/// Re-key a model ranking by creator.
///
/// Each creator keeps its best model rank; creators are then densely ranked
/// by that best rank, ties broken by first appearance.
pub fn rank_creators(pairs: &[(String, u32)]) -> Vec<(String, u32)> {
    let mut best: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (model, rank) in pairs {
        let label = identify_creator(model).as_str().to_string();
        match index.get(&label) {
            Some(&i) => best[i].1 = best[i].1.min(*rank),
            None => {
                index.insert(label.clone(), best.len());
                best.push((label, *rank));
            }
        }
    }

    best.sort_by_key(|(_, rank)| *rank);
    best.into_iter()
        .enumerate()
        .map(|(i, (label, _))| (label, i as u32 + 1))
        .collect()
}

/// Re-key every source of a model ranking by creator.
pub fn rank_creators_in(sources: &RankedSources) -> RankedSources {
    sources
        .iter()
        .map(|source| SourceRanking::new(source.label.clone(), rank_creators(&source.pairs)))
        .collect()
}

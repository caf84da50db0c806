//! End-to-end tests: snapshots on disk through to rendered rankings.

use std::fs;
use std::sync::Arc;

use metascore::render::{render_aggregated, render_entries};
use metascore::{
    builtin_sources, collect_rankings, DocumentLoader, ExtractOptions, Extraction,
    LeaderboardSource, Metascore, OutputFormat, RankColumn, RawDocument, RenderOptions,
    SnapshotLoader,
};

const GENERAL_HTML: &str = "<h2>Text</h2><table>\
<tr><th>Rank</th><th>Model</th><th>Score</th></tr>\
<tr><td>1</td><td>gemini-2.5-pro</td><td>1460</td></tr>\
<tr><td>2</td><td>gpt-5</td><td>1455</td></tr>\
<tr><td>3</td><td>claude-opus-4-1</td><td>1440</td></tr>\
</table>";

const CODING_HTML: &str = "<h2>WebDev</h2><table>\
<tr><th>Rank</th><th>Model</th></tr>\
<tr><td>1</td><td>claude-opus-4-1</td></tr>\
<tr><td>2</td><td>gpt-5</td></tr>\
</table>";

const ROUTER_HTML: &str = "<h3>Coding</h3><ol>\
<li data-rank=\"1\"><a href=\"/x\">x-ai/grok-code-fast-1</a></li>\
<li data-rank=\"2\"><a href=\"/a\">anthropic/claude-sonnet-4</a></li>\
<li data-rank=\"3\"><a href=\"/b\">anthropic/claude-sonnet-4</a></li>\
</ol>";

fn snapshot_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lmarena-general-1700000000.html"), GENERAL_HTML).unwrap();
    fs::write(dir.path().join("lmarena-coding-1700000000.html"), CODING_HTML).unwrap();
    fs::write(dir.path().join("openrouter-coding-1700000000.html"), ROUTER_HTML).unwrap();
    dir
}

#[test]
fn test_builtin_sources_from_snapshots() {
    let dir = snapshot_dir();
    let loader = SnapshotLoader::new(dir.path());

    let rankings = collect_rankings(&loader, &builtin_sources(), &ExtractOptions::default());
    assert_eq!(
        rankings.labels(),
        vec!["lmarena:general", "lmarena:coding", "openrouter:coding"]
    );
    assert!(rankings.has_data());

    // Duplicate list items collapse to their best rank.
    let router = rankings.get("openrouter:coding").unwrap();
    assert_eq!(router.pairs.len(), 2);
    assert_eq!(router.max_rank(), 2);
}

#[test]
fn test_creator_pipeline() {
    let dir = snapshot_dir();
    let ranking = Metascore::new(SnapshotLoader::new(dir.path()))
        .with_sources(builtin_sources())
        .by_creator()
        .rank();

    let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names.len(), 4);
    // Anthropic: general 3, coding 1, router 2.
    assert_eq!(names[0], "Anthropic");
    assert!(ranking.iter().all(|e| e.ranks.len() == 3));
}

#[test]
fn test_missing_snapshot_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lmarena-coding-5.html"), CODING_HTML).unwrap();

    let ranking = Metascore::with_loader(Arc::new(SnapshotLoader::new(dir.path())))
        .with_sources(builtin_sources())
        .rank();
    assert_eq!(ranking.len(), 2);
    assert!(ranking.iter().all(|e| e.ranks.len() == 1));
}

#[test]
fn test_render_top_k() {
    let dir = snapshot_dir();
    let boards = Metascore::new(SnapshotLoader::new(dir.path()))
        .with_sources(builtin_sources().into_iter().take(1))
        .leaderboards();
    assert_eq!(boards.len(), 1);

    let options = RenderOptions::new().with_top_k(2);
    let text = render_entries(&boards[0].entries, &options).unwrap();
    assert_eq!(
        text,
        "1. gemini-2.5-pro | lmarena:general rank 1 | score 1460\n\
         2. gpt-5 | lmarena:general rank 2 | score 1455"
    );
}

#[test]
fn test_render_aggregated_markdown() {
    let dir = snapshot_dir();
    let ranking = Metascore::new(SnapshotLoader::new(dir.path()))
        .with_sources(builtin_sources().into_iter().skip(1))
        .rank();

    let options = RenderOptions::new()
        .with_format(OutputFormat::Markdown)
        .with_top_k(1);
    let md = render_aggregated(&ranking, &options).unwrap();
    assert!(md.starts_with("1. "));
    assert_eq!(md.lines().count(), 1);
}

#[test]
fn test_local_files_per_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overview.md");
    fs::write(
        &path,
        "## Overview\n| Model | Text | Coding |\n|---|---|---|\n| a | 1 | 2 |\n| b | 2 | 1 |\n| c | 3 | 3 |\n",
    )
    .unwrap();

    let source = LeaderboardSource::new("overview", path.to_string_lossy())
        .with_extraction(Extraction::PerColumn {
            section: "overview".into(),
        });
    let rankings = Metascore::new(SnapshotLoader::new(dir.path()))
        .with_source(source)
        .collect();
    assert_eq!(rankings.labels(), vec!["overview:Text", "overview:Coding"]);

    let ranking = Metascore::new(SnapshotLoader::new(dir.path()))
        .with_source(
            LeaderboardSource::new("overview", path.to_string_lossy()).with_extraction(
                Extraction::Ranked {
                    section: "overview".into(),
                    column: RankColumn::named("coding"),
                },
            ),
        )
        .rank();
    assert_eq!(ranking[0].name, "b");
}

/// Loader that counts how often it is asked for a document.
struct CountingLoader {
    calls: std::sync::atomic::AtomicUsize,
}

impl DocumentLoader for CountingLoader {
    fn name(&self) -> &str {
        "counting"
    }

    fn load(&self, _source: &LeaderboardSource) -> Option<RawDocument> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Some(RawDocument::markdown("| Model | Rank |\n|---|---|\n| m | 1 |\n"))
    }
}

#[test]
fn test_custom_loader_called_once_per_source() {
    let loader = Arc::new(CountingLoader {
        calls: std::sync::atomic::AtomicUsize::new(0),
    });
    let ranking = Metascore::with_loader(loader.clone())
        .with_sources(builtin_sources())
        .rank();

    assert_eq!(loader.calls.load(std::sync::atomic::Ordering::SeqCst), 3);
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].aggregated_rank, 1.0);
}

//! Network document loader backed by the snapshot cache

use std::path::PathBuf;
use std::time::Duration;

use metascore::{detect_format, DocumentLoader, LeaderboardSource, RawDocument, SnapshotLoader};
use reqwest::blocking::Client;

const USER_AGENT: &str = concat!(
    "metascore/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/robertdamiano/llm-metascore)"
);

/// Fetches leaderboard pages over HTTP and caches them as snapshots.
///
/// Any fetch failure falls back to the newest cached snapshot. Without a
/// client (offline mode) only snapshots are used.
pub struct HttpLoader {
    client: Option<Client>,
    snapshots: SnapshotLoader,
}

impl HttpLoader {
    /// Create a loader that fetches with the given timeout.
    pub fn new(cache_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client: Some(client),
            snapshots: SnapshotLoader::new(cache_dir),
        })
    }

    /// Create a loader that never touches the network.
    pub fn offline(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            client: None,
            snapshots: SnapshotLoader::new(cache_dir),
        }
    }

    /// Check if the network is disabled.
    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    fn fetch(client: &Client, url: &str) -> Result<String, reqwest::Error> {
        client.get(url).send()?.error_for_status()?.text()
    }
}

impl DocumentLoader for HttpLoader {
    fn name(&self) -> &str {
        if self.is_offline() {
            "offline"
        } else {
            "http"
        }
    }

    fn load(&self, source: &LeaderboardSource) -> Option<RawDocument> {
        if let (Some(client), true) = (&self.client, source.is_remote()) {
            match Self::fetch(client, &source.locator) {
                Ok(body) if !body.trim().is_empty() => {
                    let format = source.format.unwrap_or_else(|| detect_format(&body));
                    match self.snapshots.save_snapshot(&source.snapshot, format, &body) {
                        Ok(path) => log::debug!("{}: saved {}", source.label, path.display()),
                        Err(e) => log::warn!("{}: could not save snapshot: {}", source.label, e),
                    }
                    return Some(RawDocument::new(body, format));
                }
                Ok(_) => log::warn!("{}: empty response, using snapshot", source.label),
                Err(e) => log::warn!("{}: fetch failed ({}), using snapshot", source.label, e),
            }
        }

        self.snapshots.load(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metascore::DocumentFormat;

    #[test]
    fn test_offline_uses_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lmarena-general-42.html"), "<table></table>").unwrap();

        let loader = HttpLoader::offline(dir.path());
        assert!(loader.is_offline());
        assert_eq!(loader.name(), "offline");

        let source = LeaderboardSource::new("lmarena:general", "https://lmarena.ai/leaderboard");
        let doc = loader.load(&source).unwrap();
        assert_eq!(doc.format, DocumentFormat::Html);
    }

    #[test]
    fn test_offline_without_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let loader = HttpLoader::offline(dir.path());
        let source = LeaderboardSource::new("openrouter:coding", "https://openrouter.ai/rankings/coding");
        assert!(loader.load(&source).is_none());
    }

    #[test]
    fn test_local_path_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.md");
        std::fs::write(&path, "| Model | Rank |\n|---|---|\n| a | 1 |\n").unwrap();

        let loader = HttpLoader::new(dir.path(), Duration::from_secs(1)).unwrap();
        let source = LeaderboardSource::new("local", path.to_string_lossy());
        let doc = loader.load(&source).unwrap();
        assert_eq!(doc.format, DocumentFormat::Markdown);
    }
}

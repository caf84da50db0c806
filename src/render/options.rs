//! Rendering options and configuration.

use super::JsonFormat;

/// Options for rendering ranked output.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Output format
    pub format: OutputFormat,

    /// Only render the first `k` entries
    pub top_k: Option<usize>,

    /// JSON layout when `format` is JSON
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Limit output to the first `k` entries.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Apply the top-k limit to a slice.
    pub fn limit<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.top_k {
            Some(k) => &items[..k.min(items.len())],
            None => items,
        }
    }
}

/// Output format for ranked output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per entry, pipe-separated fields
    #[default]
    Text,
    /// Markdown numbered list
    Markdown,
    /// JSON array
    Json,
}

impl OutputFormat {
    /// Parse a format name (`txt`, `md`, `json`).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

//! Extraction and parsing options.

use crate::model::DocumentFormat;

/// Default column holding the model name when no header starts with "model".
pub const DEFAULT_NAME_COLUMN: usize = 1;

/// Options for extracting tables from raw documents.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Force a format instead of trusting the document tag
    pub format: Option<DocumentFormat>,

    /// Treat loose `<tr>`/`<li>` elements as one table when no `<table>` exists
    pub loose_rows: bool,

    /// Whether to extract independent documents in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the document format.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Enable or disable the loose-row fallback.
    pub fn with_loose_rows(mut self, enabled: bool) -> Self {
        self.loose_rows = enabled;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            format: None,
            loose_rows: true,
            parallel: true,
        }
    }
}

/// Options for turning tables into ranked entries.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Source label stamped on every entry
    pub source: String,

    /// Name column used when no header starts with "model"
    pub default_name_column: usize,

    /// Keep only the first (best-ranked) row per name
    pub dedupe: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the fallback name column.
    pub fn with_default_name_column(mut self, index: usize) -> Self {
        self.default_name_column = index;
        self
    }

    /// Enable or disable per-name de-duplication.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source: String::new(),
            default_name_column: DEFAULT_NAME_COLUMN,
            dedupe: false,
        }
    }
}

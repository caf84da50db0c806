//! Table extraction and leaderboard parsing.

mod extractor;
mod html;
mod leaderboard;
mod markdown;
mod options;

pub use extractor::{extract_tables, first_table_by_section, TableExtractor};
pub use html::{cell_text, HtmlTableExtractor};
pub use leaderboard::{
    dedupe_by_name, parse_number, parse_rank, parse_score, ColumnRanking, LeaderboardParser,
    RankColumn,
};
pub use markdown::{heading_title, is_separator, split_row, MarkdownTableExtractor};
pub use options::{ExtractOptions, ParseOptions, DEFAULT_NAME_COLUMN};

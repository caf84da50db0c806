//! metascore CLI - rank LLMs and their creators from public leaderboards

mod fetch;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use metascore::render::{render_aggregated, render_entries, to_json};
use metascore::{
    builtin_source, builtin_sources, load_file, AggregatedEntry, DocumentLoader, Extraction,
    JsonFormat, LeaderboardSource, Metascore, OutputFormat, RankColumn, RenderOptions,
    SnapshotLoader, TableExtractor,
};

use fetch::HttpLoader;

/// Exit status when a command produced no rows.
const EXIT_NO_DATA: i32 = 3;

#[derive(Parser)]
#[command(name = "metascore")]
#[command(author = "llm-metascore contributors")]
#[command(version)]
#[command(about = "Rank LLMs and their creators by aggregating public leaderboards", long_about = None)]
struct Cli {
    /// Snapshot cache directory
    #[arg(long, global = true, env = "METASCORE_CACHE_DIR", default_value = "data/.cache")]
    cache_dir: PathBuf,

    /// Only use cached snapshots, never fetch
    #[arg(long, global = true, env = "METASCORE_OFFLINE")]
    offline: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "METASCORE_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the top models of a leaderboard
    Top {
        /// Leaderboard type
        #[arg(long = "type", value_enum, default_value = "general")]
        board: BoardType,

        /// Number of entries to show
        #[arg(short, long, default_value = "10", value_parser = positive_count)]
        k: usize,

        /// Output format (txt, md, json)
        #[arg(long, default_value = "txt", value_parser = OutputFormat::parse)]
        out: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Rank model creators across all built-in leaderboards
    Creators {
        /// Number of entries to show
        #[arg(short, long, value_parser = positive_count)]
        k: Option<usize>,

        /// Output format (txt, md, json)
        #[arg(long, default_value = "txt", value_parser = OutputFormat::parse)]
        out: OutputFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the tables extracted from a local document
    Tables {
        /// Input HTML or Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only tables whose section contains this text
        #[arg(long)]
        section: Option<String>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Aggregate rankings from local documents
    Rank {
        /// Input HTML or Markdown files, one leaderboard each
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Section heading to look for
        #[arg(long, default_value = "")]
        section: String,

        /// Rank column header (auto-detected if not specified)
        #[arg(long, conflicts_with = "per_column")]
        column: Option<String>,

        /// Rank every numeric column as its own source
        #[arg(long)]
        per_column: bool,

        /// Rank creators instead of models
        #[arg(long)]
        by_creator: bool,

        /// Number of entries to show
        #[arg(short, long, value_parser = positive_count)]
        k: Option<usize>,

        /// Output format (txt, md, json)
        #[arg(long, default_value = "txt", value_parser = OutputFormat::parse)]
        out: OutputFormat,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BoardType {
    /// LMArena general leaderboard
    General,
    /// Average of the LMArena and OpenRouter coding leaderboards
    Coding,
}

/// A command ran but found nothing to show.
#[derive(Debug)]
struct NoData(String);

impl fmt::Display for NoData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no data: {}", self.0)
    }
}

impl std::error::Error for NoData {}

/// Entry counts start at one.
fn positive_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(count) => Ok(count),
        Err(e) => Err(e.to_string()),
    }
}

/// Network settings shared by the commands that load built-in sources.
struct Network {
    cache_dir: PathBuf,
    offline: bool,
    timeout: Duration,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let network = Network {
        cache_dir: cli.cache_dir,
        offline: cli.offline,
        timeout: Duration::from_secs(cli.timeout),
    };

    let result = match cli.command {
        Commands::Top {
            board,
            k,
            out,
            output,
        } => cmd_top(&network, board, k, out, output.as_deref()),
        Commands::Creators { k, out, output } => cmd_creators(&network, k, out, output.as_deref()),
        Commands::Tables {
            input,
            section,
            json,
        } => cmd_tables(&input, section.as_deref(), json),
        Commands::Rank {
            inputs,
            section,
            column,
            per_column,
            by_creator,
            k,
            out,
        } => cmd_rank(
            &network.cache_dir,
            &inputs,
            section,
            column,
            per_column,
            by_creator,
            k,
            out,
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        if e.downcast_ref::<NoData>().is_some() {
            eprintln!("{}: {}", "Warning".yellow().bold(), e);
            std::process::exit(EXIT_NO_DATA);
        }
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn loader(network: &Network) -> Result<Arc<dyn DocumentLoader>, Box<dyn std::error::Error>> {
    if network.offline {
        log::debug!("Offline: using snapshots in {}", network.cache_dir.display());
        return Ok(Arc::new(HttpLoader::offline(&network.cache_dir)));
    }
    Ok(Arc::new(HttpLoader::new(&network.cache_dir, network.timeout)?))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn builtin(label: &str) -> Result<LeaderboardSource, Box<dyn std::error::Error>> {
    builtin_source(label).ok_or_else(|| format!("Unknown built-in source '{}'", label).into())
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

fn render_ranking(
    ranking: &[AggregatedEntry],
    k: Option<usize>,
    out: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if ranking.is_empty() {
        return Err(NoData("no source produced any rankings".into()).into());
    }
    let mut options = RenderOptions::new().with_format(out);
    if let Some(k) = k {
        options = options.with_top_k(k);
    }
    emit(&render_aggregated(ranking, &options)?, output)
}

fn cmd_top(
    network: &Network,
    board: BoardType,
    k: usize,
    out: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = loader(network)?;

    match board {
        BoardType::General => {
            let pb = spinner("Loading lmarena:general...");
            let boards = Metascore::with_loader(loader)
                .with_source(builtin("lmarena:general")?)
                .leaderboards();
            pb.finish_and_clear();

            let entries = boards
                .into_iter()
                .next()
                .map(|board| board.entries)
                .unwrap_or_default();
            if entries.is_empty() {
                return Err(NoData("lmarena:general has no entries".into()).into());
            }

            let options = RenderOptions::new().with_format(out).with_top_k(k);
            emit(&render_entries(&entries, &options)?, output)
        }
        BoardType::Coding => {
            let pb = spinner("Loading coding leaderboards...");
            let ranking = Metascore::with_loader(loader)
                .with_source(builtin("lmarena:coding")?)
                .with_source(builtin("openrouter:coding")?)
                .rank();
            pb.finish_and_clear();

            render_ranking(&ranking, Some(k), out, output)
        }
    }
}

fn cmd_creators(
    network: &Network,
    k: Option<usize>,
    out: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = loader(network)?;

    let pb = spinner("Loading leaderboards...");
    let ranking = Metascore::with_loader(loader)
        .with_sources(builtin_sources())
        .by_creator()
        .rank();
    pb.finish_and_clear();

    render_ranking(&ranking, k, out, output)
}

fn cmd_tables(
    input: &Path,
    section: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_file(input)?;
    let tables: Vec<_> = TableExtractor::new()
        .extract(&doc)
        .into_iter()
        .filter(|table| section.map_or(true, |s| table.section_matches(s)))
        .collect();

    if tables.is_empty() {
        return Err(NoData(format!("no tables in {}", input.display())).into());
    }

    if json {
        println!("{}", to_json(&tables, JsonFormat::Pretty)?);
        return Ok(());
    }

    for (i, table) in tables.iter().enumerate() {
        let title = if table.section.is_empty() {
            "(no section)"
        } else {
            table.section.as_str()
        };
        println!("{} {}", format!("Table {}:", i + 1).cyan().bold(), title);
        println!("{}", table.headers.join(" | ").bold());
        println!("{}", "─".repeat(40).dimmed());
        for row in &table.rows {
            println!("{}", row.join(" | "));
        }
        println!();
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_rank(
    cache_dir: &Path,
    inputs: &[PathBuf],
    section: String,
    column: Option<String>,
    per_column: bool,
    by_creator: bool,
    k: Option<usize>,
    out: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = if per_column {
        Extraction::PerColumn { section }
    } else {
        Extraction::Ranked {
            section,
            column: column.map(RankColumn::named).unwrap_or_default(),
        }
    };

    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        if !input.is_file() {
            return Err(format!("File not found: {}", input.display()).into());
        }
        let label = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        sources.push(
            LeaderboardSource::new(label, input.to_string_lossy()).with_extraction(extraction.clone()),
        );
    }

    let mut builder = Metascore::new(SnapshotLoader::new(cache_dir))
        .with_sources(sources);
    if by_creator {
        builder = builder.by_creator();
    }

    render_ranking(&builder.rank(), k, out, None)
}

fn cmd_version() {
    println!("{} {}", "metascore".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("LLM leaderboard aggregation tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/robertdamiano/llm-metascore".dimmed()
    );
    println!("License: MIT");
}

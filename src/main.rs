//! # Feed Harness CLI (`feedh`)
//!
//! The `feedh` binary drives the whole pipeline: collecting posts from the
//! feed API, flattening batch files into the condensed corpus, and running
//! the offline analyzers.
//!
//! ## Usage
//!
//! ```bash
//! feedh --config ./config/feed.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `feedh collect` | Page through the feed API and write JSON batch files |
//! | `feedh extract` | Flatten batch files into the condensed corpus |
//! | `feedh frequency <word>` | Chart how often a word appears per time bucket |
//! | `feedh sentiment` | Chart mean sentiment per time bucket |
//! | `feedh stats` | Summarize the archive and corpus |
//!
//! ## Examples
//!
//! ```bash
//! # Archive up to 50 pages of posts
//! FEED_AUTH_TOKEN=... feedh collect --max-batches 50
//!
//! # Rebuild the corpus from the raw batches
//! feedh extract
//!
//! # Monthly histogram of a word, normalized by bucket size
//! feedh frequency "dining hall" --granularity month --normalize
//!
//! # Weekly sentiment with all three scoring methods overlaid
//! feedh sentiment --granularity week --compare
//! ```

mod batches;
mod chart;
mod client;
mod collect;
mod config;
mod corpus;
mod extract;
mod frequency;
mod models;
mod sentiment;
mod stats;
mod timeline;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Feed Harness — a social-feed archiving and offline text-analytics toolkit.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/feed.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "feedh",
    about = "Feed Harness — a social-feed archiving and offline text-analytics toolkit",
    version,
    long_about = "Feed Harness polls a paginated social-feed API into JSON batch files, \
    flattens them into a condensed text corpus, and renders word-frequency and \
    sentiment-over-time charts from that corpus. Each command is one pipeline stage; \
    stages communicate only through files on disk."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/feed.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Collect posts from the feed API into batch files.
    ///
    /// Pages through the provider's cursor-paginated listing with the bearer
    /// token from `FEED_AUTH_TOKEN`, writing each page as `batch_NNNN.json`
    /// and (by default) mirroring condensed lines into the corpus. Stops on
    /// an exhausted feed or a configured batch/post limit. Re-running can
    /// duplicate posts: there is no cross-run deduplication.
    Collect {
        /// Stop after this many batches (overrides `collect.max_batches`).
        #[arg(long)]
        max_batches: Option<usize>,

        /// Resume pagination from this cursor.
        #[arg(long)]
        cursor: Option<String>,

        /// Fetch one page and report counts without writing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Flatten batch files into the condensed corpus.
    ///
    /// Processes batch files in numeric order, appending one `epoch:"text"`
    /// line per post. Malformed batch files are skipped with a warning.
    /// Appending is not idempotent: re-running duplicates lines unless the
    /// corpus file is cleared first.
    Extract,

    /// Chart how often a word or phrase appears per time bucket.
    ///
    /// A single-word query matches whole lowercase tokens; a query with
    /// whitespace is matched as a lowercase substring.
    Frequency {
        /// Word or phrase to search for (case-insensitive).
        word: String,

        /// Bucket size: day, week, month, or year.
        #[arg(long, default_value = "month")]
        granularity: String,

        /// Plot occurrences per 100 tokens instead of raw counts.
        #[arg(long)]
        normalize: bool,

        /// Print up to five matching posts.
        #[arg(long)]
        show_posts: bool,

        /// Output PNG path (default: `<chart.out_dir>/frequency_<word>.png`).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Chart mean sentiment per time bucket.
    ///
    /// Scores every corpus message with the chosen strategy and plots the
    /// per-bucket mean with a ±1 std band over a message-count panel.
    Sentiment {
        /// Scoring method: lexicon, heuristic, or vader.
        #[arg(long, default_value = "vader")]
        method: String,

        /// Bucket size: day, week, month, or year.
        #[arg(long, default_value = "month")]
        granularity: String,

        /// Overlay all three scoring methods on one chart.
        #[arg(long)]
        compare: bool,

        /// Output PNG path (default derived from method and granularity).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Summarize the archive: batch files, corpus size, and date range.
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Collect {
            max_batches,
            cursor,
            dry_run,
        } => {
            collect::run_collect(&cfg, max_batches, cursor, dry_run)?;
        }
        Commands::Extract => {
            extract::run_extract(&cfg)?;
        }
        Commands::Frequency {
            word,
            granularity,
            normalize,
            show_posts,
            output,
        } => {
            frequency::run_frequency(&cfg, &word, &granularity, normalize, show_posts, output)?;
        }
        Commands::Sentiment {
            method,
            granularity,
            compare,
            output,
        } => {
            sentiment::run_sentiment(&cfg, &method, &granularity, compare, output)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
    }

    Ok(())
}

//! Corpus and archive summary.
//!
//! Gives a quick overview of what has been collected and extracted: batch
//! file count, corpus size, message count, token total, and date range. Used
//! by `feedh stats` to sanity-check a run before analysis.

use anyhow::Result;

use crate::batches;
use crate::config::Config;
use crate::corpus;
use crate::frequency::tokenize;

pub fn run_stats(config: &Config) -> Result<()> {
    let batch_files = batches::scan_batch_files(&config.storage.data_dir)?;

    let corpus_path = &config.storage.corpus_file;
    let corpus_size = std::fs::metadata(corpus_path).map(|m| m.len()).unwrap_or(0);

    let (messages, skipped) = if corpus_path.exists() {
        corpus::load_corpus(corpus_path)?
    } else {
        (Vec::new(), 0)
    };

    let token_total: u64 = messages
        .iter()
        .map(|m| tokenize(&m.text.to_lowercase()).count() as u64)
        .sum();

    println!("Feed Harness — Archive Stats");
    println!("============================");
    println!();
    println!("  Data dir:    {}", config.storage.data_dir.display());
    println!("  Batch files: {}", batch_files.len());
    println!();
    println!("  Corpus:      {}", corpus_path.display());
    println!("  Size:        {}", format_bytes(corpus_size));
    println!("  Messages:    {}", messages.len());
    if skipped > 0 {
        println!("  Malformed:   {} line(s)", skipped);
    }
    println!("  Tokens:      {}", token_total);

    let first = messages.iter().map(|m| m.timestamp).min();
    let last = messages.iter().map(|m| m.timestamp).max();
    if let (Some(first), Some(last)) = (first, last) {
        println!("  Range:       {} to {}", format_ts_iso(first), format_ts_iso(last));
    }
    println!();

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

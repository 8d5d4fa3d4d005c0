//! Batch file naming, reading, and writing.
//!
//! A batch is one page of raw posts, serialized as a JSON array and named
//! `batch_<seq>.json` with a zero-padded sequence number. Batch files are
//! append-only: the collector continues numbering after existing files and
//! never rewrites one.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::Post;

/// File name for a batch sequence number, e.g. `batch_0007.json`.
pub fn batch_file_name(seq: u32) -> String {
    format!("batch_{:04}.json", seq)
}

/// Parse the sequence number out of a batch file name.
pub fn parse_batch_seq(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("batch_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// List batch files in the data directory, sorted by sequence number.
/// A missing directory yields an empty list.
pub fn scan_batch_files(data_dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    if !data_dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(data_dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(seq) = parse_batch_seq(&name) {
            files.push((seq, entry.into_path()));
        }
    }

    files.sort_by_key(|(seq, _)| *seq);
    Ok(files)
}

/// Next free sequence number in the data directory (starts at 1).
pub fn next_batch_seq(data_dir: &Path) -> Result<u32> {
    let files = scan_batch_files(data_dir)?;
    Ok(files.last().map(|(seq, _)| seq + 1).unwrap_or(1))
}

/// Write one batch as a pretty-printed JSON array of posts.
pub fn write_batch(data_dir: &Path, seq: u32, posts: &[Post]) -> Result<PathBuf> {
    let path = data_dir.join(batch_file_name(seq));
    let json = serde_json::to_string_pretty(posts)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write batch file: {}", path.display()))?;
    Ok(path)
}

/// Read one batch file back into posts.
pub fn read_batch(path: &Path) -> Result<Vec<Post>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
    let posts: Vec<Post> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse batch file: {}", path.display()))?;
    Ok(posts)
}

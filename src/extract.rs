//! Batch-to-corpus extraction.
//!
//! Reads every `batch_*.json` file in the data directory in numeric order and
//! appends one condensed line per post to the corpus file. A malformed batch
//! file is skipped with a warning; the remaining files still process.
//!
//! Extraction is deliberately not idempotent: re-running appends duplicate
//! lines unless the corpus file is cleared first.

use anyhow::Result;

use crate::batches;
use crate::collect::condensed_lines;
use crate::config::Config;
use crate::corpus;

pub fn run_extract(config: &Config) -> Result<()> {
    let files = batches::scan_batch_files(&config.storage.data_dir)?;
    if files.is_empty() {
        println!(
            "no batch files found in {}",
            config.storage.data_dir.display()
        );
        return Ok(());
    }

    let mut files_processed = 0usize;
    let mut files_skipped = 0usize;
    let mut lines_appended = 0usize;

    for (_, path) in &files {
        let posts = match batches::read_batch(path) {
            Ok(posts) => posts,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
                files_skipped += 1;
                continue;
            }
        };

        let lines = condensed_lines(&posts);
        corpus::append_lines(&config.storage.corpus_file, &lines)?;
        lines_appended += lines.len();
        files_processed += 1;
    }

    println!("extract");
    println!("  batch files processed: {}", files_processed);
    if files_skipped > 0 {
        println!("  batch files skipped: {}", files_skipped);
    }
    println!("  lines appended: {}", lines_appended);
    println!("  corpus: {}", config.storage.corpus_file.display());
    println!("ok");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::models::Post;
    use chrono::{TimeZone, Utc};

    fn test_config(dir: &std::path::Path) -> Config {
        Config {
            api: None,
            storage: StorageConfig {
                data_dir: dir.join("data"),
                corpus_file: dir.join("data").join("posts.txt"),
                save_json: true,
                save_corpus: true,
            },
            collect: Default::default(),
            chart: Default::default(),
        }
    }

    fn post(id: &str, text: &str, epoch: i64) -> Post {
        Post {
            id: id.to_string(),
            alias: Some("anon".to_string()),
            text: text.to_string(),
            created_at: Utc.timestamp_opt(epoch, 0).unwrap(),
            vote_total: 3,
            comment_count: 1,
        }
    }

    #[test]
    fn test_one_line_per_post_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.storage.data_dir).unwrap();

        let posts = vec![
            post("a", "plain text", 1700000000),
            post("b", "quoted \"text\"\nwith newline", 1700000100),
        ];
        batches::write_batch(&config.storage.data_dir, 1, &posts).unwrap();

        run_extract(&config).unwrap();

        let (messages, skipped) = corpus::load_corpus(&config.storage.corpus_file).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].timestamp, 1700000000);
        assert_eq!(messages[0].text, "plain text");
        // Round trip: text in JSON equals text in corpus, verbatim.
        assert_eq!(messages[1].text, "quoted \"text\"\nwith newline");
    }

    #[test]
    fn test_re_extract_doubles_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.storage.data_dir).unwrap();

        let posts = vec![post("a", "one", 100), post("b", "two", 200)];
        batches::write_batch(&config.storage.data_dir, 1, &posts).unwrap();

        run_extract(&config).unwrap();
        run_extract(&config).unwrap();

        let (messages, _) = corpus::load_corpus(&config.storage.corpus_file).unwrap();
        assert_eq!(messages.len(), 4);
    }

    #[test]
    fn test_malformed_batch_skipped_rest_processed() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.storage.data_dir).unwrap();

        std::fs::write(
            config.storage.data_dir.join("batch_0001.json"),
            "{ not valid json",
        )
        .unwrap();
        batches::write_batch(&config.storage.data_dir, 2, &[post("a", "survives", 300)]).unwrap();

        run_extract(&config).unwrap();

        let (messages, _) = corpus::load_corpus(&config.storage.corpus_file).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "survives");
    }
}

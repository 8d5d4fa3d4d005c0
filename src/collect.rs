//! Collection pipeline orchestration.
//!
//! Coordinates the full collect flow: paginate the feed API, write each page
//! as a batch file, optionally mirror condensed lines into the corpus, and
//! record run metadata. Pagination stops on an empty page, a missing or
//! non-advancing cursor, or a configured batch/post limit.
//!
//! Failure policy: a failed HTTP call aborts the run; batches already written
//! stay on disk (at-least-once, not exactly-once). No idempotency key is kept
//! across runs, so re-running can duplicate posts already fetched.

use anyhow::Result;
use chrono::Utc;

use crate::batches;
use crate::client::FeedClient;
use crate::config::Config;
use crate::corpus;
use crate::models::Post;

pub fn run_collect(
    config: &Config,
    max_batches: Option<usize>,
    cursor: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let api = config
        .api
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("[api] section not configured"))?;
    let client = FeedClient::new(api)?;

    let max_batches = max_batches.or(config.collect.max_batches);
    let max_posts = config.collect.max_posts;
    let mut cursor = cursor.or_else(|| config.collect.initial_cursor.clone());

    if dry_run {
        let page = client.fetch_page(cursor.as_deref())?;
        println!("collect {} (dry-run)", api.group_id);
        println!("  posts on first page: {}", page.posts.len());
        println!(
            "  next cursor: {}",
            page.cursor.as_deref().unwrap_or("none")
        );
        return Ok(());
    }

    std::fs::create_dir_all(&config.storage.data_dir)?;

    let started_at = Utc::now();
    let mut batch_seq = batches::next_batch_seq(&config.storage.data_dir)?;
    let mut batches_written = 0usize;
    let mut total_posts = 0usize;
    let mut corpus_lines = 0usize;

    loop {
        if let Some(max) = max_batches {
            if batches_written >= max {
                println!("reached batch limit: {}", max);
                break;
            }
        }

        let page = client.fetch_page(cursor.as_deref())?;
        let mut posts = page.posts;
        if posts.is_empty() {
            println!("no more posts");
            break;
        }

        let mut post_limit_hit = false;
        if let Some(max) = max_posts {
            let remaining = max.saturating_sub(total_posts);
            if posts.len() >= remaining {
                posts.truncate(remaining);
                post_limit_hit = true;
            }
        }
        if posts.is_empty() {
            println!("reached post limit: {}", max_posts.unwrap_or(0));
            break;
        }

        if config.storage.save_json {
            batches::write_batch(&config.storage.data_dir, batch_seq, &posts)?;
        }
        if config.storage.save_corpus {
            let lines = condensed_lines(&posts);
            corpus_lines += lines.len();
            corpus::append_lines(&config.storage.corpus_file, &lines)?;
        }

        println!(
            "  batch {}: {} posts",
            batches::batch_file_name(batch_seq),
            posts.len()
        );
        total_posts += posts.len();
        batches_written += 1;
        batch_seq += 1;

        if post_limit_hit {
            println!("reached post limit: {}", max_posts.unwrap_or(0));
            break;
        }

        match page.cursor {
            None => {
                println!("no more pages");
                break;
            }
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                println!("cursor did not advance; stopping");
                break;
            }
            Some(next) => cursor = Some(next),
        }
    }

    write_run_metadata(config, api, started_at, batches_written, total_posts)?;

    println!("collect {}", api.group_id);
    println!("  batches written: {}", batches_written);
    println!("  posts fetched: {}", total_posts);
    if config.storage.save_corpus {
        println!("  corpus lines appended: {}", corpus_lines);
    }
    println!("  data dir: {}", config.storage.data_dir.display());
    println!("ok");

    Ok(())
}

/// Condensed corpus lines for a page of posts. Posts with empty (whitespace
/// only) text are dropped.
pub fn condensed_lines(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .filter_map(|post| {
            let text = post.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(corpus::format_line(post.created_at.timestamp(), text))
        })
        .collect()
}

fn write_run_metadata(
    config: &Config,
    api: &crate::config::ApiConfig,
    started_at: chrono::DateTime<Utc>,
    batches: usize,
    posts: usize,
) -> Result<()> {
    let meta = serde_json::json!({
        "started_at": started_at.to_rfc3339(),
        "finished_at": Utc::now().to_rfc3339(),
        "group_id": api.group_id,
        "post_type": api.post_type,
        "total_batches": batches,
        "total_posts": posts,
    });

    let path = config.storage.data_dir.join("collect_meta.json");
    std::fs::write(&path, serde_json::to_string_pretty(&meta)?)?;
    Ok(())
}

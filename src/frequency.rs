//! Word-frequency analyzer.
//!
//! Buckets corpus messages by a time granularity and counts occurrences of a
//! target word or phrase per bucket, rendering the result as a bar chart.
//!
//! Matching semantics: text is lowercased; a single-word query matches whole
//! alphanumeric tokens (so `love` does not match `glove`) and every
//! occurrence counts; a query containing whitespace is matched as a lowercase
//! substring, counting non-overlapping occurrences. With `--normalize`, each
//! bucket's count is divided by that bucket's total token count (×100).

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::chart;
use crate::config::Config;
use crate::corpus;
use crate::models::Message;
use crate::timeline::Granularity;

/// Per-bucket tallies for one frequency run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Tally {
    pub matches: u64,
    pub tokens: u64,
    pub posts: u64,
}

/// Split lowercase text into alphanumeric tokens.
pub fn tokenize(lower: &str) -> impl Iterator<Item = &str> + '_ {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Count occurrences of the query in one text. See the module docs for the
/// token-vs-phrase rules.
pub fn count_occurrences(text: &str, query: &str) -> u64 {
    let lower = text.to_lowercase();
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return 0;
    }

    if q.split_whitespace().count() > 1 {
        // Phrase: non-overlapping substring matches.
        let mut count = 0u64;
        let mut start = 0usize;
        while let Some(pos) = lower[start..].find(&q) {
            count += 1;
            start += pos + q.len();
        }
        count
    } else {
        tokenize(&lower).filter(|t| *t == q).count() as u64
    }
}

/// Bucket every message and tally matches, token totals, and post counts.
/// The returned map contains every bucket with at least one post; buckets
/// with zero posts are omitted.
pub fn bucket_tallies(
    messages: &[Message],
    query: &str,
    granularity: Granularity,
) -> (BTreeMap<NaiveDate, Tally>, Vec<usize>) {
    let mut buckets: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    let mut matching = Vec::new();

    for (idx, msg) in messages.iter().enumerate() {
        let bucket = match granularity.bucket_of(msg.timestamp) {
            Some(b) => b,
            None => continue,
        };

        let tally = buckets.entry(bucket).or_default();
        tally.posts += 1;
        tally.tokens += tokenize(&msg.text.to_lowercase()).count() as u64;

        let hits = count_occurrences(&msg.text, query);
        if hits > 0 {
            tally.matches += hits;
            matching.push(idx);
        }
    }

    (buckets, matching)
}

/// Normalized value for one bucket: matches per hundred tokens.
pub fn normalized_value(tally: &Tally) -> f64 {
    if tally.tokens == 0 {
        0.0
    } else {
        tally.matches as f64 / tally.tokens as f64 * 100.0
    }
}

pub fn run_frequency(
    config: &Config,
    word: &str,
    granularity: &str,
    normalize: bool,
    show_posts: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let granularity = Granularity::parse(granularity)?;

    let (messages, skipped) = corpus::load_corpus(&config.storage.corpus_file)?;
    if skipped > 0 {
        eprintln!("warning: skipped {} malformed corpus line(s)", skipped);
    }
    if messages.is_empty() {
        println!(
            "no messages in corpus: {}",
            config.storage.corpus_file.display()
        );
        return Ok(());
    }

    println!("loaded {} messages", messages.len());

    let (buckets, matching) = bucket_tallies(&messages, word, granularity);
    let total_matches: u64 = buckets.values().map(|t| t.matches).sum();
    if total_matches == 0 {
        println!("No posts found containing '{}'", word);
        return Ok(());
    }

    let labels: Vec<String> = buckets.keys().map(|b| granularity.label(*b)).collect();
    let values: Vec<f64> = buckets
        .values()
        .map(|t| {
            if normalize {
                normalized_value(t)
            } else {
                t.matches as f64
            }
        })
        .collect();

    let output = match output {
        Some(path) => path,
        None => config
            .chart
            .out_dir
            .join(format!("frequency_{}.png", sanitize(word))),
    };
    let title = if normalize {
        format!("Frequency of \"{}\" per {} (normalized)", word, granularity.name())
    } else {
        format!("Frequency of \"{}\" per {}", word, granularity.name())
    };
    let y_desc = if normalize {
        "Occurrences per 100 tokens"
    } else {
        "Occurrences"
    };
    chart::render_bar_chart(&config.chart, &output, &title, y_desc, &labels, &values)?;

    println!("frequency \"{}\"", word);
    println!("  total occurrences: {}", total_matches);
    println!("  matching posts: {}", matching.len());
    println!("  buckets: {}", buckets.len());
    if let (Some(first), Some(last)) = (labels.first(), labels.last()) {
        println!("  range: {} to {}", first, last);
    }
    println!("  chart: {}", output.display());
    println!("ok");

    if show_posts {
        println!();
        println!("sample posts containing '{}':", word);
        for (i, idx) in matching.iter().take(5).enumerate() {
            let msg = &messages[*idx];
            println!("  {}. [{}] {}", i + 1, format_ts(msg.timestamp), preview(&msg.text));
        }
        if matching.len() > 5 {
            println!("  ... and {} more", matching.len() - 5);
        }
    }

    Ok(())
}

fn sanitize(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

fn format_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn preview(text: &str) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() > 100 {
        let mut cut: String = flat.chars().take(100).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(timestamp: i64, text: &str) -> Message {
        Message {
            timestamp,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_single_word_matches_whole_tokens() {
        assert_eq!(count_occurrences("I love my glove", "love"), 1);
        assert_eq!(count_occurrences("Love LOVE love!", "love"), 3);
        assert_eq!(count_occurrences("lovely gloves", "love"), 0);
    }

    #[test]
    fn test_phrase_matches_substring() {
        assert_eq!(count_occurrences("the dining hall is great", "dining hall"), 1);
        assert_eq!(
            count_occurrences("dining hall, dining hall!", "dining hall"),
            2
        );
        assert_eq!(count_occurrences("dining in the hall", "dining hall"), 0);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert_eq!(count_occurrences("anything", "   "), 0);
    }

    #[test]
    fn test_spec_example_day_bucket() {
        // 1700000000 falls on 2023-11-14 UTC.
        let messages = vec![
            msg(1700000000, "i love this campus"),
            msg(1700200000, "nothing to see here"),
        ];
        let (buckets, matching) = bucket_tallies(&messages, "love", Granularity::Day);

        let day = NaiveDate::from_ymd_opt(2023, 11, 14).unwrap();
        let other = NaiveDate::from_ymd_opt(2023, 11, 17).unwrap();
        assert_eq!(buckets[&day].matches, 1);
        assert_eq!(buckets[&other].matches, 0);
        assert_eq!(matching, vec![0]);
    }

    #[test]
    fn test_normalized_is_count_over_tokens() {
        let messages = vec![
            msg(1700000000, "love love is good"), // 4 tokens, 2 matches
            msg(1700000001, "more words here"),   // 3 tokens, 0 matches
        ];
        let (buckets, _) = bucket_tallies(&messages, "love", Granularity::Day);
        let tally = buckets.values().next().unwrap();

        assert_eq!(tally.matches, 2);
        assert_eq!(tally.tokens, 7);
        assert_eq!(tally.posts, 2);

        let normalized = normalized_value(tally);
        let expected = tally.matches as f64 / tally.tokens as f64 * 100.0;
        assert!((normalized - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_token_bucket_normalizes_to_zero() {
        let tally = Tally {
            matches: 0,
            tokens: 0,
            posts: 1,
        };
        assert_eq!(normalized_value(&tally), 0.0);
    }
}

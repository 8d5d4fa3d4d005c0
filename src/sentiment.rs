//! Sentiment-over-time analyzer.
//!
//! Scores every corpus message with one of three interchangeable, stateless
//! strategies and aggregates per-bucket mean polarity:
//!
//! - `lexicon`: positive/negative word lists, normalized by matched words
//! - `heuristic`: punctuation, caps, and emoji rules
//! - `vader`: the `vader_sentiment` crate's compound score
//!
//! Polarity is a signed scalar: sign is valence, magnitude is intensity. All
//! three strategies return values in [-1, 1]. Compare mode overlays all three
//! strategies on one chart.

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::chart;
use crate::config::Config;
use crate::corpus;
use crate::models::Message;
use crate::timeline::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Lexicon,
    Heuristic,
    Vader,
}

impl Method {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "lexicon" => Ok(Method::Lexicon),
            "heuristic" => Ok(Method::Heuristic),
            "vader" => Ok(Method::Vader),
            other => anyhow::bail!(
                "Unknown sentiment method: '{}'. Must be lexicon, heuristic, or vader.",
                other
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Lexicon => "lexicon",
            Method::Heuristic => "heuristic",
            Method::Vader => "vader",
        }
    }

    /// All methods, in comparison order.
    pub fn all() -> [Method; 3] {
        [Method::Lexicon, Method::Heuristic, Method::Vader]
    }
}

const POSITIVE_WORDS: [&str; 20] = [
    "good", "great", "awesome", "amazing", "love", "wonderful", "excellent", "fantastic",
    "perfect", "happy", "joy", "beautiful", "best", "nice", "cool", "fun", "excited", "glad",
    "pleased", "satisfied",
];

const NEGATIVE_WORDS: [&str; 20] = [
    "bad", "terrible", "awful", "horrible", "hate", "worst", "stupid", "dumb", "sucks",
    "annoying", "frustrated", "angry", "sad", "disappointed", "disgusting", "boring", "lame",
    "trash", "garbage", "crappy",
];

const POSITIVE_EMOJI: [&str; 6] = [":)", "😊", "😄", "😁", "❤️", "💕"];
const NEGATIVE_EMOJI: [&str; 5] = [":(", "😢", "😡", "😤", "💔"];

/// Lexicon polarity: (positive − negative) / (positive + negative) over the
/// fixed word lists, 0 when neither list matches.
pub fn lexicon_polarity(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let mut positive = 0i64;
    let mut negative = 0i64;

    for word in lower.split_whitespace() {
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }

    let total = positive + negative;
    if total == 0 {
        0.0
    } else {
        (positive - negative) as f64 / total as f64
    }
}

/// Heuristic polarity from punctuation, caps, and emoji, clamped to [-1, 1].
pub fn heuristic_polarity(text: &str) -> f64 {
    let text = text.trim();
    let mut score = 0.0;

    // Exclamation marks read as excitement, question marks slightly negative.
    score += text.matches('!').count() as f64 * 0.1;
    score -= text.matches('?').count() as f64 * 0.05;

    // All caps is strong emotion either way.
    let has_alpha = text.chars().any(|c| c.is_alphabetic());
    let any_lower = text.chars().any(|c| c.is_lowercase());
    if has_alpha && !any_lower && text.chars().count() > 3 {
        score += if text.contains('!') { 0.2 } else { -0.2 };
    }

    for emoji in POSITIVE_EMOJI {
        score += text.matches(emoji).count() as f64 * 0.3;
    }
    for emoji in NEGATIVE_EMOJI {
        score -= text.matches(emoji).count() as f64 * 0.3;
    }

    score.clamp(-1.0, 1.0)
}

/// Score every message with the given method, in input order.
pub fn score_messages(method: Method, messages: &[Message]) -> Vec<f64> {
    match method {
        Method::Lexicon => messages.iter().map(|m| lexicon_polarity(&m.text)).collect(),
        Method::Heuristic => messages
            .iter()
            .map(|m| heuristic_polarity(&m.text))
            .collect(),
        Method::Vader => {
            let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
            messages
                .iter()
                .map(|m| {
                    analyzer
                        .polarity_scores(&m.text)
                        .get("compound")
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        }
    }
}

/// Per-bucket aggregate for one method.
#[derive(Debug, Clone)]
pub struct BucketSentiment {
    pub bucket: NaiveDate,
    pub mean: f64,
    pub std_dev: f64,
    pub count: u64,
}

/// Aggregate scores into sorted per-bucket mean/std/count rows. Buckets with
/// zero posts are omitted.
pub fn bucket_sentiment(
    granularity: Granularity,
    messages: &[Message],
    scores: &[f64],
) -> Vec<BucketSentiment> {
    let mut acc: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for (msg, score) in messages.iter().zip(scores) {
        if let Some(bucket) = granularity.bucket_of(msg.timestamp) {
            acc.entry(bucket).or_default().push(*score);
        }
    }

    acc.into_iter()
        .map(|(bucket, vals)| {
            let (mean, std_dev) = mean_std(&vals);
            BucketSentiment {
                bucket,
                mean,
                std_dev,
                count: vals.len() as u64,
            }
        })
        .collect()
}

/// Population mean and standard deviation; (0, 0) for an empty slice.
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

pub fn run_sentiment(
    config: &Config,
    method: &str,
    granularity: &str,
    compare: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let granularity = Granularity::parse(granularity)?;

    let (messages, skipped) = corpus::load_corpus(&config.storage.corpus_file)?;
    if skipped > 0 {
        eprintln!("warning: skipped {} malformed corpus line(s)", skipped);
    }

    if compare {
        return run_compare(config, granularity, &messages, output);
    }

    let method = Method::parse(method)?;
    if messages.is_empty() {
        println!(
            "no messages in corpus: {}",
            config.storage.corpus_file.display()
        );
        return Ok(());
    }

    println!("loaded {} messages", messages.len());
    println!("scoring with {} method...", method.name());

    let scores = score_messages(method, &messages);
    let series = bucket_sentiment(granularity, &messages, &scores);

    let labels: Vec<String> = series.iter().map(|b| granularity.label(b.bucket)).collect();
    let means: Vec<f64> = series.iter().map(|b| b.mean).collect();
    let stds: Vec<f64> = series.iter().map(|b| b.std_dev).collect();
    let counts: Vec<u64> = series.iter().map(|b| b.count).collect();

    let output = match output {
        Some(path) => path,
        None => config.chart.out_dir.join(format!(
            "sentiment_{}_{}.png",
            method.name(),
            granularity.name()
        )),
    };
    let title = format!(
        "Sentiment over time ({} method, per {})",
        method.name(),
        granularity.name()
    );
    chart::render_sentiment_chart(&config.chart, &output, &title, &labels, &means, &stds, &counts)?;

    print_summary(method, &messages, &scores, &series, granularity);
    println!("  chart: {}", output.display());
    println!("ok");

    Ok(())
}

fn run_compare(
    config: &Config,
    granularity: Granularity,
    messages: &[Message],
    output: Option<PathBuf>,
) -> Result<()> {
    let output = match output {
        Some(path) => path,
        None => config
            .chart
            .out_dir
            .join(format!("sentiment_comparison_{}.png", granularity.name())),
    };
    let title = format!("Sentiment comparison (per {})", granularity.name());

    if messages.is_empty() {
        // Still render a chart so an empty corpus yields a readable artifact.
        chart::render_empty_chart(&config.chart, &output, &title)?;
        println!("no messages in corpus; wrote empty chart");
        println!("  chart: {}", output.display());
        println!("ok");
        return Ok(());
    }

    println!("loaded {} messages", messages.len());

    // All methods score the same messages, so the bucket axis is shared.
    let mut labels: Vec<String> = Vec::new();
    let mut series: Vec<(String, Vec<f64>)> = Vec::new();
    let mut overall: Vec<(Method, f64, f64)> = Vec::new();

    for method in Method::all() {
        println!("scoring with {} method...", method.name());
        let scores = score_messages(method, messages);
        let buckets = bucket_sentiment(granularity, messages, &scores);

        if labels.is_empty() {
            labels = buckets.iter().map(|b| granularity.label(b.bucket)).collect();
        }
        series.push((
            method.name().to_string(),
            buckets.iter().map(|b| b.mean).collect(),
        ));

        let (mean, std_dev) = mean_std(&scores);
        overall.push((method, mean, std_dev));
    }

    chart::render_comparison_chart(&config.chart, &output, &title, &labels, &series)?;

    println!("sentiment comparison");
    for (method, mean, std_dev) in &overall {
        println!(
            "  {:<10} avg={:+.3} std={:.3}",
            method.name(),
            mean,
            std_dev
        );
    }
    println!("  buckets: {}", labels.len());
    println!("  chart: {}", output.display());
    println!("ok");

    Ok(())
}

fn print_summary(
    method: Method,
    messages: &[Message],
    scores: &[f64],
    series: &[BucketSentiment],
    granularity: Granularity,
) {
    let (mean, std_dev) = mean_std(scores);
    let positive = scores.iter().filter(|s| **s > 0.1).count();
    let negative = scores.iter().filter(|s| **s < -0.1).count();
    let neutral = scores.len() - positive - negative;

    println!("sentiment ({} method)", method.name());
    println!("  messages analyzed: {}", messages.len());
    println!("  average sentiment: {:+.3} (std {:.3})", mean, std_dev);
    println!(
        "  distribution: {} positive / {} neutral / {} negative",
        positive, neutral, negative
    );

    let most_positive = series.iter().max_by(|a, b| a.mean.total_cmp(&b.mean));
    let most_negative = series.iter().min_by(|a, b| a.mean.total_cmp(&b.mean));
    if let (Some(hi), Some(lo)) = (most_positive, most_negative) {
        println!(
            "  most positive {}: {} ({:+.3})",
            granularity.name(),
            granularity.label(hi.bucket),
            hi.mean
        );
        println!(
            "  most negative {}: {} ({:+.3})",
            granularity.name(),
            granularity.label(lo.bucket),
            lo.mean
        );
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
    fn test_lexicon_positive_beats_negative() {
        let pos = lexicon_polarity("love this wonderful amazing campus");
        let neg = lexicon_polarity("hate this terrible awful campus");
        assert!(pos > neg);
        assert!(pos > 0.0);
        assert!(neg < 0.0);
    }

    #[test]
    fn test_lexicon_no_matches_is_zero() {
        assert_eq!(lexicon_polarity("the quick brown fox"), 0.0);
        assert_eq!(lexicon_polarity(""), 0.0);
    }

    #[test]
    fn test_lexicon_bounded() {
        let score = lexicon_polarity("love love love love");
        assert_eq!(score, 1.0);
        let score = lexicon_polarity("hate hate");
        assert_eq!(score, -1.0);
    }

    #[test]
    fn test_heuristic_exclamation_positive() {
        assert!(heuristic_polarity("what a day!!!") > 0.0);
        assert!(heuristic_polarity("why though???") < 0.0);
        assert_eq!(heuristic_polarity("nothing here"), 0.0);
    }

    #[test]
    fn test_heuristic_caps_and_emoji() {
        // All caps without exclamation reads negative.
        assert!(heuristic_polarity("NEVER AGAIN") < 0.0);
        // All caps with exclamation reads positive.
        assert!(heuristic_polarity("BEST DAY EVER!") > 0.0);
        assert!(heuristic_polarity("fine :)") > 0.0);
        assert!(heuristic_polarity("not fine :(") < 0.0);
    }

    #[test]
    fn test_heuristic_clamped() {
        let score = heuristic_polarity("!!!!!!!!!!!!!!!!!!!!!!!!!!");
        assert_eq!(score, 1.0);
        let score = heuristic_polarity(":( :( :( :( :( :( :( :(");
        assert_eq!(score, -1.0);
    }

    #[test]
    fn test_vader_orders_valence() {
        let messages = vec![
            msg(0, "I love this, it is wonderful"),
            msg(1, "I hate this, it is horrible"),
        ];
        let scores = score_messages(Method::Vader, &messages);
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_mean_std() {
        let (mean, std) = mean_std(&[1.0, -1.0]);
        assert!((mean - 0.0).abs() < 1e-9);
        assert!((std - 1.0).abs() < 1e-9);

        let (mean, std) = mean_std(&[]);
        assert_eq!((mean, std), (0.0, 0.0));
    }

    #[test]
    fn test_bucket_sentiment_groups_and_sorts() {
        // Two messages in November 2023, one in December 2023.
        let messages = vec![
            msg(1700000000, "a"),
            msg(1700000100, "b"),
            msg(1702600000, "c"),
        ];
        let scores = vec![1.0, 0.0, -0.5];
        let series = bucket_sentiment(Granularity::Month, &messages, &scores);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].count, 2);
        assert!((series[0].mean - 0.5).abs() < 1e-9);
        assert_eq!(series[1].count, 1);
        assert!((series[1].mean + 0.5).abs() < 1e-9);
        assert!(series[0].bucket < series[1].bucket);
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(Method::parse("vader").unwrap(), Method::Vader);
        assert!(Method::parse("textblob").is_err());
    }
}

//! The condensed corpus format: one `epoch:"text"` line per post.
//!
//! The corpus is the flattened text file shared by all downstream analyzers.
//! Text is stored on a single line with `\`, `"`, LF, and CR escaped, so a
//! formatted line always parses back to the original text verbatim.
//!
//! The file is append-only and appending is NOT idempotent: re-extracting the
//! same batch duplicates its lines unless the corpus is cleared first.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::models::Message;

/// Escape text for a single corpus line.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse [`escape_text`]. Unknown escape sequences keep the escaped char.
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Format one corpus line (without trailing newline).
pub fn format_line(timestamp: i64, text: &str) -> String {
    format!("{}:\"{}\"", timestamp, escape_text(text))
}

/// Parse one corpus line. Returns `None` for lines that do not match the
/// `epoch:"text"` shape.
pub fn parse_line(line: &str) -> Option<Message> {
    let line = line.trim();
    let (epoch_str, text_part) = line.split_once(':')?;
    let timestamp: i64 = epoch_str.parse().ok()?;

    let inner = text_part
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))?;

    Some(Message {
        timestamp,
        text: unescape_text(inner),
    })
}

/// Append lines to the corpus file, creating it (and its parent directory)
/// if needed.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open corpus file: {}", path.display()))?;

    for line in lines {
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to write corpus file: {}", path.display()))?;
    }

    Ok(())
}

/// Load the whole corpus. Returns the parsed messages in file order plus the
/// number of non-empty lines that failed to parse.
pub fn load_corpus(path: &Path) -> Result<(Vec<Message>, usize)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

    let mut messages = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(msg) => messages.push(msg),
            None => skipped += 1,
        }
    }

    Ok((messages, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes_and_newlines() {
        assert_eq!(escape_text(r#"she said "hi""#), r#"she said \"hi\""#);
        assert_eq!(escape_text("line one\nline two"), "line one\\nline two");
        assert_eq!(escape_text("cr\rhere"), "cr\\rhere");
    }

    #[test]
    fn test_escape_round_trip() {
        let cases = [
            "plain text",
            r#"quoted "text" here"#,
            "multi\nline\r\ntext",
            r"back\slash and \n literal",
            "",
            "emoji 😊 and \"both\"\n",
        ];
        for case in cases {
            assert_eq!(unescape_text(&escape_text(case)), case, "case: {:?}", case);
        }
    }

    #[test]
    fn test_format_then_parse_is_verbatim() {
        let text = "i \"love\" this\ncampus \\o/";
        let line = format_line(1700000000, text);
        let msg = parse_line(&line).unwrap();
        assert_eq!(msg.timestamp, 1700000000);
        assert_eq!(msg.text, text);
    }

    #[test]
    fn test_parse_spec_example() {
        let msg = parse_line("1700000000:\"i love this campus\"").unwrap();
        assert_eq!(msg.timestamp, 1700000000);
        assert_eq!(msg.text, "i love this campus");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_line("no colon here").is_none());
        assert!(parse_line("notanumber:\"text\"").is_none());
        assert!(parse_line("123:unquoted").is_none());
        assert!(parse_line("123:\"unterminated").is_none());
    }

    #[test]
    fn test_append_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("corpus.txt");

        let lines = vec![
            format_line(100, "first"),
            format_line(200, "second \"quoted\""),
        ];
        append_lines(&path, &lines).unwrap();
        append_lines(&path, &lines).unwrap();

        let (messages, skipped) = load_corpus(&path).unwrap();
        // Appending twice doubles the line count: the corpus is not idempotent.
        assert_eq!(messages.len(), 4);
        assert_eq!(skipped, 0);
        assert_eq!(messages[1].text, "second \"quoted\"");
        assert_eq!(messages[1], messages[3]);
    }

    #[test]
    fn test_load_counts_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "100:\"ok\"\ngarbage line\n\n200:\"also ok\"\n").unwrap();

        let (messages, skipped) = load_corpus(&path).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(skipped, 1);
    }
}

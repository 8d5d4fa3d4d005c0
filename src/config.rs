use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Feed API settings; only required for `collect`.
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub collect: CollectConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub group_id: String,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    /// Fixed delay between page requests, in milliseconds.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_post_type() -> String {
    "hot".to_string()
}
fn default_request_interval_ms() -> u64 {
    1000
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_corpus_file")]
    pub corpus_file: PathBuf,
    /// Write raw batch JSON files during collection.
    #[serde(default = "default_true")]
    pub save_json: bool,
    /// Append condensed corpus lines during collection.
    #[serde(default = "default_true")]
    pub save_corpus: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            corpus_file: default_corpus_file(),
            save_json: true,
            save_corpus: true,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_corpus_file() -> PathBuf {
    PathBuf::from("./data/posts.txt")
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CollectConfig {
    /// Stop after this many batches (unlimited when unset).
    pub max_batches: Option<usize>,
    /// Stop after this many posts (unlimited when unset).
    pub max_posts: Option<usize>,
    /// Cursor to resume pagination from.
    pub initial_cursor: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("./charts")
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate api
    if let Some(ref api) = config.api {
        if api.base_url.is_empty() || !api.base_url.starts_with("http") {
            anyhow::bail!("api.base_url must be an http(s) URL");
        }
        if api.group_id.is_empty() {
            anyhow::bail!("api.group_id must not be empty");
        }
        if api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be > 0");
        }
    }

    // Validate collect limits
    if config.collect.max_batches == Some(0) {
        anyhow::bail!("collect.max_batches must be > 0 when set");
    }
    if config.collect.max_posts == Some(0) {
        anyhow::bail!("collect.max_posts must be > 0 when set");
    }

    // Validate chart geometry
    if config.chart.width == 0 || config.chart.height == 0 {
        anyhow::bail!("chart.width and chart.height must be > 0");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let f = write_config("");
        let cfg = load_config(f.path()).unwrap();
        assert!(cfg.api.is_none());
        assert_eq!(cfg.storage.data_dir, PathBuf::from("./data"));
        assert!(cfg.storage.save_json);
        assert!(cfg.storage.save_corpus);
        assert_eq!(cfg.chart.width, 1280);
        assert!(cfg.collect.max_batches.is_none());
    }

    #[test]
    fn test_api_defaults() {
        let f = write_config(
            r#"
[api]
base_url = "https://feed.example.com/v1/posts"
group_id = "campus-42"
"#,
        );
        let cfg = load_config(f.path()).unwrap();
        let api = cfg.api.unwrap();
        assert_eq!(api.post_type, "hot");
        assert_eq!(api.request_interval_ms, 1000);
        assert_eq!(api.timeout_secs, 30);
    }

    #[test]
    fn test_empty_group_id_rejected() {
        let f = write_config(
            r#"
[api]
base_url = "https://feed.example.com/v1/posts"
group_id = ""
"#,
        );
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn test_zero_batch_limit_rejected() {
        let f = write_config("[collect]\nmax_batches = 0\n");
        assert!(load_config(f.path()).is_err());
    }
}

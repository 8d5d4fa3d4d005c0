//! # Feed Harness
//!
//! A social-feed archiving and offline text-analytics toolkit.
//!
//! Feed Harness polls a paginated social-feed API, persists raw posts as JSON
//! batch files plus a condensed line-oriented corpus, and runs offline
//! analytics over that corpus: word-frequency histograms and
//! sentiment-over-time charts rendered to PNG.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌─────────────────┐
//! │ Feed API │──▶│  batch_*.json │──▶│  posts.txt       │
//! │ (HTTP)   │   │  (collect)    │   │  (extract)       │
//! └──────────┘   └───────────────┘   └───────┬─────────┘
//!                                            │
//!                            ┌───────────────┤
//!                            ▼               ▼
//!                      ┌───────────┐   ┌───────────┐
//!                      │ frequency │   │ sentiment │
//!                      │  (PNG)    │   │  (PNG)    │
//!                      └───────────┘   └───────────┘
//! ```
//!
//! Every stage is a standalone subcommand; stages communicate only through
//! files on disk. There is no daemon, no concurrency, and no shared state.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`client`] | Blocking feed-API client |
//! | [`collect`] | Paginated collection into batch files |
//! | [`batches`] | Batch file naming, reading, and writing |
//! | [`corpus`] | Condensed `epoch:"text"` corpus format |
//! | [`extract`] | Batch-to-corpus extraction |
//! | [`timeline`] | Time-bucket granularity handling |
//! | [`frequency`] | Word-frequency analyzer |
//! | [`sentiment`] | Sentiment-over-time analyzer |
//! | [`chart`] | PNG chart rendering |
//! | [`stats`] | Corpus summary |

pub mod batches;
pub mod chart;
pub mod client;
pub mod collect;
pub mod config;
pub mod corpus;
pub mod extract;
pub mod frequency;
pub mod models;
pub mod sentiment;
pub mod stats;
pub mod timeline;

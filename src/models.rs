//! Core data models used throughout Feed Harness.
//!
//! These types represent the posts, API pages, and corpus messages that flow
//! through the collection and analytics pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post as returned by the feed API and stored in batch files.
///
/// Posts are immutable once fetched; identity is the API-assigned id.
/// Unknown JSON fields from the provider are ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Author handle; often absent on anonymous feeds.
    #[serde(default)]
    pub alias: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub vote_total: i64,
    #[serde(default)]
    pub comment_count: i64,
}

/// One page of the feed API's cursor-paginated post listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub posts: Vec<Post>,
    /// Cursor for the next page; absent when the feed is exhausted.
    #[serde(default)]
    pub cursor: Option<String>,
}

/// A post flattened into the condensed corpus: epoch timestamp plus text.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub timestamp: i64,
    pub text: String,
}

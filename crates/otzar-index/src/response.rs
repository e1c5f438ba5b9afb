//! Request and response types for the published search contract.
//!
//! These are the only shapes external collaborators see; the CLI emits
//! the response as a single JSON document.

use serde::{Deserialize, Serialize};

fn default_limit() -> usize {
    crate::search::DEFAULT_LIMIT
}

/// A search request from an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query text.
    pub query: String,
    /// Maximum hits to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Exact book-title filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_filter: Option<String>,
    /// Category-path substring filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,
    /// Enables `*` and `?` operators in the query.
    #[serde(default)]
    pub wildcard_mode: bool,
}

/// Response status marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The request executed and `results` is populated.
    Success,
    /// The request failed; `message` explains why.
    Error,
}

/// One returned document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    /// 1-based position within this result page.
    pub rank: usize,
    /// Source row id of the line.
    pub line_id: i64,
    /// Owning book id.
    pub book_id: i64,
    /// Position of the line within its book.
    pub line_index: i64,
    /// Title of the owning book.
    pub book_title: String,
    /// Root-to-leaf category titles joined by `/`.
    pub category_path: String,
    /// Human-readable reference, possibly empty.
    pub he_ref: String,
    /// Excerpt of the line with `<mark>` markers around query matches.
    pub snippet: String,
    /// Relevance score; higher is better.
    pub score: f32,
}

/// The complete response for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// `success` or `error`.
    pub status: Status,
    /// Human-readable failure description; present only on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Echo of the query text; present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Total matching documents, which may exceed the page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hits: Option<u64>,
    /// Wall-clock execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,
    /// Hits in descending score order.
    #[serde(default)]
    pub results: Vec<Hit>,
}

impl SearchResponse {
    /// Builds a success response.
    pub fn success(query: &str, total_hits: u64, elapsed_ms: u64, results: Vec<Hit>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            query: Some(query.to_string()),
            total_hits: Some(total_hits),
            elapsed_ms: Some(elapsed_ms),
            results,
        }
    }

    /// Builds an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            query: None,
            total_hits: None,
            elapsed_ms: None,
            results: Vec::new(),
        }
    }

    /// True when the response carries results rather than an error.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

//! Tantivy-based search index for the otzar Hebrew book corpus.
//!
//! This crate provides the whole read/write lifecycle of the index:
//! - Building from a relational source (`build_index`)
//! - Ranked keyword and wildcard search (`Searcher`)
//! - The published request/response contract (`SearchRequest`, `SearchResponse`)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use otzar_index::{SearchRequest, Searcher, build_index};
//!
//! let stats = build_index(Path::new("./library.db"), Path::new("./index")).unwrap();
//! println!("indexed {} lines", stats.documents);
//!
//! let searcher = Searcher::open(Path::new("./index")).unwrap();
//! let response = searcher.search(&SearchRequest {
//!     query: "ברא".to_string(),
//!     limit: 50,
//!     book_filter: None,
//!     category_filter: None,
//!     wildcard_mode: false,
//! });
//! assert!(response.is_success());
//! ```

#![warn(missing_docs)]

mod builder;
mod document;
mod error;
mod query;
mod response;
mod schema;
mod search;
mod snippet;
mod writer;

pub use builder::{BuildStats, build_index};
pub use document::LineDocument;
pub use error::IndexError;
pub use response::{Hit, SearchRequest, SearchResponse, Status};
pub use search::{DEFAULT_LIMIT, MAX_LIMIT, Searcher};
pub use writer::IndexWriter;

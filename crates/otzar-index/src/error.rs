//! Error types for the otzar-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when building or searching the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index directory does not exist.
    #[error("index directory not found: {path}")]
    NotFound {
        /// Path that was probed.
        path: PathBuf,
    },

    /// Failed to open or create the index.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Path to the index directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to or commit the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// The request cannot be executed as given, e.g. a wildcard term with
    /// no searchable characters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The query could not be compiled into an executable form.
    #[error("failed to parse query: {0}")]
    Parse(String),

    /// Query execution failed inside the engine.
    #[error("search failed: {0}")]
    Search(String),

    /// Missing or unreadable source database.
    #[error("source database error: {0}")]
    Source(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }
}

impl From<rusqlite::Error> for IndexError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Source(err.to_string())
    }
}

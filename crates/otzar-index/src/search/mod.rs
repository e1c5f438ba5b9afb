//! Search execution for the otzar index.
//!
//! Provides the [`Searcher`] struct, which owns a read-only snapshot of
//! the index and turns search requests into complete responses.

mod execute;
mod open;

use tantivy::IndexReader;

use crate::{query::QueryCompiler, schema::IndexSchema};

/// Number of hits returned when the request does not say otherwise.
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page a client may request; bigger values are clamped.
pub const MAX_LIMIT: usize = 100_000;

/// Primary search entry point for the index.
///
/// The reader pins one consistent snapshot for the searcher's lifetime.
/// No mutable state is held between queries, so a single searcher may
/// serve concurrent callers. Dropping the searcher releases the reader
/// and the analyzer.
pub struct Searcher {
    /// Snapshot reader used for all queries.
    pub(crate) reader: IndexReader,
    /// Schema describing indexed fields.
    pub(crate) schema: IndexSchema,
    /// Compiles requests into Tantivy queries.
    pub(crate) compiler: QueryCompiler,
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("schema", &self.schema)
            .field("compiler", &self.compiler)
            .finish_non_exhaustive()
    }
}

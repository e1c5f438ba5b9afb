//! Index schema definition for the otzar search index.
//!
//! Defines the Tantivy schema with all fields needed for line indexing:
//! - `line_id`: Source row id (stored only)
//! - `he_ref`: Human-readable reference (stored only)
//! - `line_index`: Position of the line within its book (stored only)
//! - `book_id`: Owning book id (numeric, indexed, stored)
//! - `book_title`: Exact book title (raw string, stored)
//! - `category_path`: `/`-joined category chain (raw string, stored)
//! - `content`: Tag-stripped line text (analyzed, stored)
//! - `book_title_search`: Analyzed copy of the title (not stored)

use otzar_hebrew::HEB_TOKENIZER;
use tantivy::schema::{
    Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Source row id of the line.
    pub line_id: Field,
    /// Human-readable reference, possibly empty.
    pub he_ref: Field,
    /// Position of the line within its book.
    pub line_index: Field,
    /// Owning book id.
    pub book_id: Field,
    /// Exact book title for filtering and display.
    pub book_title: Field,
    /// Root-to-leaf category titles joined by `/`.
    pub category_path: Field,
    /// Tag-stripped line text, the primary search target.
    pub content: Field,
    /// Analyzed book title, a secondary relevance signal.
    pub book_title_search: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let line_id = builder.add_i64_field("line_id", STORED);
        let he_ref = builder.add_text_field("he_ref", STORED);
        let line_index = builder.add_i64_field("line_index", STORED);
        let book_id = builder.add_i64_field("book_id", INDEXED | STORED);

        // Raw single-token fields: exact match for book titles, regex
        // match for category paths.
        let book_title = builder.add_text_field("book_title", STRING | STORED);
        let category_path = builder.add_text_field("category_path", STRING | STORED);

        let content_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_tokenizer(HEB_TOKENIZER)
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();
        let content = builder.add_text_field("content", content_options);

        // Searchable but not stored; the raw title is already stored above.
        let book_title_search_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(HEB_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let book_title_search = builder.add_text_field("book_title_search", book_title_search_options);

        let schema = builder.build();

        Self {
            schema,
            line_id,
            he_ref,
            line_index,
            book_id,
            book_title,
            category_path,
            content,
            book_title_search,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

//! Query execution and hit materialization.

use std::time::Instant;

use tantivy::{
    TantivyDocument,
    collector::{Count, TopDocs},
    schema::{Field, Value},
};

use super::{MAX_LIMIT, Searcher};
use crate::{
    error::IndexError,
    response::{Hit, SearchRequest, SearchResponse},
    snippet::build_snippet,
};

impl Searcher {
    /// Executes one search request, returning a complete response.
    ///
    /// Request-level failures (invalid wildcard terms, unparseable
    /// patterns) come back as error responses; a blank query returns an
    /// empty success without consulting the index.
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        if request.query.trim().is_empty() {
            return SearchResponse::success(&request.query, 0, 0, Vec::new());
        }

        match self.execute(request) {
            Ok(response) => response,
            Err(err) => SearchResponse::error(err.to_string()),
        }
    }

    fn execute(&self, request: &SearchRequest) -> Result<SearchResponse, IndexError> {
        let compiled = match self.compiler.compile(request)? {
            Some(compiled) => compiled,
            None => return Ok(SearchResponse::success(&request.query, 0, 0, Vec::new())),
        };

        let limit = request.limit.clamp(1, MAX_LIMIT);
        let start = Instant::now();

        let searcher = self.reader.searcher();
        let (total_hits, top_docs) = searcher
            .search(&*compiled.query, &(Count, TopDocs::with_limit(limit)))
            .map_err(|e| IndexError::Search(e.to_string()))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (idx, (score, doc_address)) in top_docs.into_iter().enumerate() {
            let doc: TantivyDocument = searcher
                .doc(doc_address)
                .map_err(|e| IndexError::Search(e.to_string()))?;
            results.push(self.doc_to_hit(&doc, idx + 1, score, &compiled.highlight_words));
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;

        Ok(SearchResponse::success(
            &request.query,
            total_hits as u64,
            elapsed_ms,
            results,
        ))
    }

    /// Converts a stored document plus scoring context into a `Hit`.
    fn doc_to_hit(
        &self,
        doc: &TantivyDocument,
        rank: usize,
        score: f32,
        highlight_words: &[String],
    ) -> Hit {
        let content = self.text_field(doc, self.schema.content);

        Hit {
            rank,
            line_id: self.i64_field(doc, self.schema.line_id),
            book_id: self.i64_field(doc, self.schema.book_id),
            line_index: self.i64_field(doc, self.schema.line_index),
            book_title: self.text_field(doc, self.schema.book_title),
            category_path: self.text_field(doc, self.schema.category_path),
            he_ref: self.text_field(doc, self.schema.he_ref),
            snippet: build_snippet(&content, highlight_words),
            score,
        }
    }

    /// Reads a text field from a document, returning an empty string if
    /// missing.
    fn text_field(&self, doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }

    /// Reads an i64 field from a document, returning zero if missing.
    fn i64_field(&self, doc: &TantivyDocument, field: Field) -> i64 {
        doc.get_first(field).and_then(|v| v.as_i64()).unwrap_or(0)
    }
}

//! Query compilation.
//!
//! Translates a search request into a Tantivy query tree plus the words
//! the snippet generator should highlight. Two modes:
//!
//! - **Default**: every character of the query is literal. The text is
//!   normalized, tokenized with the index analyzer, and each token becomes
//!   a required term on `content` (AND semantics). Each token also adds an
//!   optional term on `book_title_search`, which affects scores but never
//!   the hit set.
//! - **Wildcard**: unescaped `*` and `?` are operators; `\` escapes the
//!   next character. Wildcard terms are lowered to regex queries on
//!   `content`; leading wildcards are allowed. A term with operators but
//!   no regular characters is rejected.

use otzar_hebrew::{build_analyzer, normalize, remove_diacritics};
use tantivy::{
    Term,
    query::{BooleanQuery, Occur, Query, RegexQuery, TermQuery},
    schema::IndexRecordOption,
    tokenizer::{TextAnalyzer, TokenStream},
};

use crate::{error::IndexError, response::SearchRequest, schema::IndexSchema};

/// A compiled request: the executable query and the words to highlight.
#[derive(Debug)]
pub struct CompiledQuery {
    /// The query to execute.
    pub query: Box<dyn Query>,
    /// Normalized words for snippet highlighting, wildcard operators
    /// stripped.
    pub highlight_words: Vec<String>,
}

/// One character of a wildcard-mode term after escape resolution.
enum Segment {
    /// A regular character, matched literally.
    Literal(char),
    /// Unescaped `*`: any run of characters.
    Star,
    /// Unescaped `?`: any single character.
    Question,
}

/// Compiles search requests into Tantivy queries.
pub struct QueryCompiler {
    /// Index schema for field references.
    schema: IndexSchema,
    /// Text analyzer for tokenizing query terms.
    analyzer: TextAnalyzer,
}

impl std::fmt::Debug for QueryCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCompiler")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl QueryCompiler {
    /// Creates a new query compiler.
    pub fn new(schema: IndexSchema) -> Self {
        Self {
            schema,
            analyzer: build_analyzer(),
        }
    }

    /// Compiles a request into an executable query.
    ///
    /// Returns `None` when the query text contains no searchable terms
    /// (e.g. punctuation only), `Some` for an executable query, or an
    /// error for invalid wildcard usage.
    pub fn compile(&self, request: &SearchRequest) -> Result<Option<CompiledQuery>, IndexError> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        let mut highlight_words = Vec::new();
        let mut analyzer = self.analyzer.clone();

        if request.wildcard_mode {
            self.compile_wildcard(
                &mut analyzer,
                &request.query,
                &mut clauses,
                &mut highlight_words,
            )?;
        } else {
            self.push_plain_terms(
                &mut analyzer,
                &normalize(&request.query),
                &mut clauses,
                &mut highlight_words,
            );
        }

        if clauses.is_empty() {
            return Ok(None);
        }

        if let Some(book) = non_blank(request.book_filter.as_deref()) {
            let term = Term::from_field_text(self.schema.book_title, book);
            clauses.push((
                Occur::Must,
                Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
            ));
        }

        if let Some(category) = non_blank(request.category_filter.as_deref()) {
            let pattern = format!(".*{}.*", escape_regex(category));
            let query = RegexQuery::from_pattern(&pattern, self.schema.category_path)
                .map_err(|e| IndexError::Parse(e.to_string()))?;
            clauses.push((Occur::Must, Box::new(query)));
        }

        Ok(Some(CompiledQuery {
            query: Box::new(BooleanQuery::new(clauses)),
            highlight_words,
        }))
    }

    /// Tokenizes `text` and appends one required content term per token.
    fn push_plain_terms(
        &self,
        analyzer: &mut TextAnalyzer,
        text: &str,
        clauses: &mut Vec<(Occur, Box<dyn Query>)>,
        highlight_words: &mut Vec<String>,
    ) {
        let mut stream = analyzer.token_stream(text);
        while let Some(token) = stream.next() {
            let content_term = Term::from_field_text(self.schema.content, &token.text);
            clauses.push((
                Occur::Must,
                Box::new(TermQuery::new(content_term, IndexRecordOption::WithFreqs)),
            ));

            let title_term = Term::from_field_text(self.schema.book_title_search, &token.text);
            clauses.push((
                Occur::Should,
                Box::new(TermQuery::new(title_term, IndexRecordOption::WithFreqs)),
            ));

            highlight_words.push(token.text.clone());
        }
    }

    /// Compiles wildcard-mode query text.
    fn compile_wildcard(
        &self,
        analyzer: &mut TextAnalyzer,
        query_text: &str,
        clauses: &mut Vec<(Occur, Box<dyn Query>)>,
        highlight_words: &mut Vec<String>,
    ) -> Result<(), IndexError> {
        let stripped = remove_diacritics(query_text);
        for raw_term in stripped.split(' ') {
            if raw_term.is_empty() {
                continue;
            }

            let segments = scan_term(raw_term);
            let has_wildcard = segments
                .iter()
                .any(|s| matches!(s, Segment::Star | Segment::Question));

            if !has_wildcard {
                let literal: String = segments
                    .iter()
                    .map(|s| match s {
                        Segment::Literal(c) => *c,
                        Segment::Star | Segment::Question => unreachable!(),
                    })
                    .collect();
                self.push_plain_terms(analyzer, &literal, clauses, highlight_words);
                continue;
            }

            let has_regular = segments.iter().any(|s| matches!(s, Segment::Literal(_)));
            if !has_regular {
                return Err(IndexError::InvalidRequest(format!(
                    "wildcard term has no searchable characters: {raw_term}"
                )));
            }

            let mut pattern = String::new();
            let mut word = String::new();
            for segment in &segments {
                match segment {
                    Segment::Star => pattern.push_str(".*"),
                    Segment::Question => pattern.push('.'),
                    Segment::Literal(c) => {
                        for lower in c.to_lowercase() {
                            push_regex_char(&mut pattern, lower);
                            word.push(lower);
                        }
                    }
                }
            }

            let query = RegexQuery::from_pattern(&pattern, self.schema.content)
                .map_err(|e| IndexError::Parse(e.to_string()))?;
            clauses.push((Occur::Must, Box::new(query)));
            highlight_words.push(word);
        }
        Ok(())
    }
}

/// Resolves backslash escapes and classifies wildcard operators.
///
/// `\x` yields the literal `x` for any `x`; a trailing lone `\` is a
/// literal backslash.
fn scan_term(term: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = term.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => segments.push(Segment::Literal(chars.next().unwrap_or('\\'))),
            '*' => segments.push(Segment::Star),
            '?' => segments.push(Segment::Question),
            other => segments.push(Segment::Literal(other)),
        }
    }
    segments
}

fn push_regex_char(pattern: &mut String, c: char) {
    if c.is_ascii() && !c.is_ascii_alphanumeric() {
        pattern.push('\\');
    }
    pattern.push(c);
}

fn escape_regex(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len());
    for c in text.chars() {
        push_regex_char(&mut pattern, c);
    }
    pattern
}

fn non_blank(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    fn request(query: &str, wildcard: bool) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            limit: 50,
            book_filter: None,
            category_filter: None,
            wildcard_mode: wildcard,
        }
    }

    fn compiler() -> QueryCompiler {
        QueryCompiler::new(IndexSchema::new())
    }

    #[test]
    fn plain_terms_compile() {
        let compiled = compiler().compile(&request("ברא אלהים", false)).unwrap();
        let compiled = compiled.unwrap();
        assert_eq!(compiled.highlight_words, vec!["ברא", "אלהים"]);
    }

    #[test]
    fn plain_mode_normalizes_diacritics() {
        let compiled = compiler().compile(&request("בָּרָא", false)).unwrap().unwrap();
        assert_eq!(compiled.highlight_words, vec!["ברא"]);
    }

    #[test]
    fn operators_are_literal_in_plain_mode() {
        // '*' is punctuation to the tokenizer; only the word survives
        let compiled = compiler().compile(&request("ברא*", false)).unwrap().unwrap();
        assert_eq!(compiled.highlight_words, vec!["ברא"]);
    }

    #[test]
    fn punctuation_only_query_compiles_to_nothing() {
        assert!(compiler().compile(&request("!!! ???", false)).unwrap().is_none());
    }

    #[test]
    fn wildcard_prefix_term_is_valid() {
        let compiled = compiler().compile(&request("ברא*", true)).unwrap().unwrap();
        assert_eq!(compiled.highlight_words, vec!["ברא"]);
    }

    #[test]
    fn bare_wildcard_is_rejected() {
        for query in ["*", "?", "*?", "ברא *"] {
            let err = compiler().compile(&request(query, true)).unwrap_err();
            assert!(matches!(err, IndexError::InvalidRequest(_)), "{query}");
            assert!(err.to_string().contains('*') || err.to_string().contains('?'));
        }
    }

    #[test]
    fn escaped_wildcard_counts_as_regular() {
        // "\*" is a literal asterisk: no operators, nothing searchable
        assert!(compiler().compile(&request("\\*", true)).unwrap().is_none());

        // "\**" has a regular character (the escaped star) plus an operator
        let compiled = compiler().compile(&request("\\**", true)).unwrap();
        assert!(compiled.is_some());
    }

    #[test]
    fn trailing_backslash_is_literal() {
        // lone trailing backslash: a regular character, no operators
        assert!(compiler().compile(&request("ברא\\", true)).unwrap().is_some());
    }

    #[test]
    fn wildcard_mode_strips_diacritics_before_scanning() {
        let compiled = compiler().compile(&request("בָּרָא*", true)).unwrap().unwrap();
        assert_eq!(compiled.highlight_words, vec!["ברא"]);
    }

    #[test]
    fn mixed_plain_and_wildcard_terms() {
        let compiled = compiler()
            .compile(&request("משה הה*", true))
            .unwrap()
            .unwrap();
        assert_eq!(compiled.highlight_words, vec!["משה", "הה"]);
    }

    #[test]
    fn filters_require_non_blank_values() {
        let mut req = request("ברא", false);
        req.book_filter = Some("   ".to_string());
        req.category_filter = Some(String::new());
        // blank filters are ignored; compilation still succeeds
        assert!(compiler().compile(&req).unwrap().is_some());
    }

    #[test]
    fn category_filter_with_regex_metacharacters() {
        let mut req = request("ברא", false);
        req.category_filter = Some("תורה (חומש)".to_string());
        assert!(compiler().compile(&req).unwrap().is_some());
    }
}

//! Hebrew text normalization and analysis for the otzar search index.
//!
//! This crate provides the single lexical surface shared by the index
//! builder, the query compiler, and the snippet locator:
//! - Character-level normalization: markup stripping and diacritic removal
//! - The Tantivy analyzer used for the full-text fields
//!
//! Corpus text and query text are both passed through the same functions,
//! so a bare query term matches its diacritic-bearing corpus variant.

#![warn(missing_docs)]

mod analyzer;
mod normalize;

pub use analyzer::{HEB_TOKENIZER, build_analyzer};
pub use normalize::{is_diacritic, normalize, remove_diacritics, strip_markup};

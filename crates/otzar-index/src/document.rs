//! The indexed document record.

/// One indexed document: a single non-blank content line of a book.
///
/// `content` holds the tag-stripped line text with its diacritics intact;
/// the snippet generator highlights into it by original offsets. The
/// record is plain data with no back-references.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDocument {
    /// Source row id, stable across rebuilds of the same database.
    pub line_id: i64,
    /// Owning book id.
    pub book_id: i64,
    /// Position of the line within its book.
    pub line_index: i64,
    /// Human-readable reference, possibly empty.
    pub he_ref: String,
    /// Title of the owning book; empty when the book is unknown.
    pub book_title: String,
    /// Root-to-leaf category titles joined by `/`; empty when the book
    /// has no category.
    pub category_path: String,
    /// Tag-stripped line text.
    pub content: String,
}

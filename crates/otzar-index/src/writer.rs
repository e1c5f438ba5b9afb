//! Index writer for bulk-loading line documents.

use std::{fs, path::Path};

use otzar_hebrew::{HEB_TOKENIZER, build_analyzer};
use tantivy::{Index, IndexWriter as TantivyIndexWriter, TantivyDocument, directory::MmapDirectory};

use crate::{document::LineDocument, error::IndexError, schema::IndexSchema};

/// Heap size for the index writer (256 MB). Builds are single-shot bulk
/// inserts with one commit at the end, so the buffer is sized for
/// throughput.
const WRITER_HEAP_SIZE: usize = 256_000_000;

/// Writes line documents to a fresh Tantivy index.
///
/// Creating a writer truncates whatever was at the target path; an
/// interrupted build leaves no committed index behind.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Schema with field handles.
    schema: IndexSchema,
}

impl IndexWriter {
    /// Creates a fresh index at the given path, truncating any previous
    /// contents of the directory.
    pub fn create(path: &Path) -> Result<Self, IndexError> {
        if path.exists() {
            fs::remove_dir_all(path)?;
        }
        fs::create_dir_all(path)?;

        let schema = IndexSchema::new();

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open_or_create(dir, schema.schema().clone())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        index.tokenizers().register(HEB_TOKENIZER, build_analyzer());

        let writer = index
            .writer(WRITER_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        Ok(Self {
            index,
            writer,
            schema,
        })
    }

    /// Stages a line document for writing.
    ///
    /// Nothing is visible to readers until [`commit`](Self::commit).
    pub fn add_line(&mut self, doc: &LineDocument) -> Result<(), IndexError> {
        let mut tantivy_doc = TantivyDocument::new();

        tantivy_doc.add_i64(self.schema.line_id, doc.line_id);
        tantivy_doc.add_text(self.schema.he_ref, &doc.he_ref);
        tantivy_doc.add_i64(self.schema.line_index, doc.line_index);
        tantivy_doc.add_i64(self.schema.book_id, doc.book_id);
        tantivy_doc.add_text(self.schema.book_title, &doc.book_title);
        tantivy_doc.add_text(self.schema.category_path, &doc.category_path);
        tantivy_doc.add_text(self.schema.content, &doc.content);
        tantivy_doc.add_text(self.schema.book_title_search, &doc.book_title);

        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Commits all staged documents, making them visible to readers.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Returns the number of committed documents in the index.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self
            .index
            .reader()
            .map_err(|e| IndexError::Write(e.to_string()))?;
        Ok(reader.searcher().num_docs())
    }
}

//! Construction and filesystem checks for `Searcher`.

use std::path::Path;

use otzar_hebrew::{HEB_TOKENIZER, build_analyzer};
use tantivy::{Index, directory::MmapDirectory};

use super::Searcher;
use crate::{error::IndexError, query::QueryCompiler, schema::IndexSchema};

impl Searcher {
    /// Opens an existing index for searching.
    ///
    /// Fails with [`IndexError::NotFound`] when the directory is absent.
    pub fn open(path: &Path) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let schema = IndexSchema::new();

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        index.tokenizers().register(HEB_TOKENIZER, build_analyzer());

        let reader = index
            .reader()
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;

        let compiler = QueryCompiler::new(schema.clone());

        Ok(Self {
            reader,
            schema,
            compiler,
        })
    }

    /// Returns the number of documents in the snapshot.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

//! Corpus builder: denormalizes the relational source into the index.
//!
//! The builder streams `line` rows from a read-only SQLite database,
//! resolves each book's title and category path, and writes one document
//! per non-blank line. The whole build is a single commit; an interrupted
//! build leaves no readable index.

use std::{
    collections::HashMap,
    path::Path,
    time::{Duration, Instant},
};

use otzar_hebrew::strip_markup;
use rusqlite::{Connection, OpenFlags};

use crate::{document::LineDocument, error::IndexError, writer::IndexWriter};

/// Maximum category-chain hops when building a path. Malformed parent
/// cycles fall through the cap and yield a partial path.
const MAX_CATEGORY_DEPTH: usize = 20;

/// Statistics from a completed build.
#[derive(Debug, Clone)]
pub struct BuildStats {
    /// Number of documents written.
    pub documents: u64,
    /// Wall-clock build duration.
    pub elapsed: Duration,
}

struct BookRow {
    title: String,
    category_id: Option<i64>,
}

struct CategoryRow {
    title: String,
    parent_id: Option<i64>,
}

/// Builds a fresh index at `index_path` from the database at `db_path`.
///
/// The output directory is truncated before writing. Returns the number
/// of documents written and the elapsed time.
pub fn build_index(db_path: &Path, index_path: &Path) -> Result<BuildStats, IndexError> {
    if !db_path.exists() {
        return Err(IndexError::Source(format!(
            "database not found: {}",
            db_path.display()
        )));
    }

    let start = Instant::now();

    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let books = load_books(&conn)?;
    let categories = load_categories(&conn)?;
    let category_paths = build_category_paths(&categories);

    let mut writer = IndexWriter::create(index_path)?;
    let mut documents = 0u64;

    let mut stmt = conn.prepare(
        "SELECT id, bookId, lineIndex, content, heRef FROM line ORDER BY bookId, lineIndex",
    )?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let line_id: i64 = row.get(0)?;
        let book_id: i64 = row.get(1)?;
        let line_index: i64 = row.get(2)?;
        let content: Option<String> = row.get(3)?;
        let he_ref: Option<String> = row.get(4)?;

        let raw = content.unwrap_or_default();
        if raw.trim().is_empty() {
            continue;
        }

        let (book_title, category_path) = match books.get(&book_id) {
            Some(book) => (
                book.title.clone(),
                book.category_id
                    .and_then(|id| category_paths.get(&id).cloned())
                    .unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };

        // stored content keeps its diacritics; the analyzer strips them
        // again on the indexed side
        writer.add_line(&LineDocument {
            line_id,
            book_id,
            line_index,
            he_ref: he_ref.unwrap_or_default(),
            book_title,
            category_path,
            content: strip_markup(&raw),
        })?;
        documents += 1;
    }

    writer.commit()?;

    Ok(BuildStats {
        documents,
        elapsed: start.elapsed(),
    })
}

fn load_books(conn: &Connection) -> Result<HashMap<i64, BookRow>, IndexError> {
    let mut stmt = conn.prepare("SELECT id, title, categoryId FROM book")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            BookRow {
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                category_id: row.get(2)?,
            },
        ))
    })?;

    let mut books = HashMap::new();
    for row in rows {
        let (id, book) = row?;
        books.insert(id, book);
    }
    Ok(books)
}

fn load_categories(conn: &Connection) -> Result<HashMap<i64, CategoryRow>, IndexError> {
    let mut stmt = conn.prepare("SELECT id, title, parentId FROM category")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            CategoryRow {
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                parent_id: row.get(2)?,
            },
        ))
    })?;

    let mut categories = HashMap::new();
    for row in rows {
        let (id, category) = row?;
        categories.insert(id, category);
    }
    Ok(categories)
}

/// Precomputes the root-to-leaf path for every category.
///
/// Walks parent chains with a hop budget instead of a visited set; a
/// cycle simply exhausts the budget and yields a partial path.
fn build_category_paths(categories: &HashMap<i64, CategoryRow>) -> HashMap<i64, String> {
    let mut paths = HashMap::with_capacity(categories.len());
    for &id in categories.keys() {
        let mut titles = Vec::new();
        let mut cursor = Some(id);
        for _ in 0..MAX_CATEGORY_DEPTH {
            let Some(current) = cursor else { break };
            let Some(node) = categories.get(&current) else {
                break;
            };
            titles.push(node.title.as_str());
            cursor = node.parent_id;
        }
        titles.reverse();
        paths.insert(id, titles.join("/"));
    }
    paths
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::{response::SearchRequest, search::Searcher};

    fn fixture_db(dir: &Path) -> PathBuf {
        let path = dir.join("library.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE book(id INTEGER, title TEXT, categoryId INTEGER);
             CREATE TABLE category(id INTEGER, title TEXT, parentId INTEGER);
             CREATE TABLE line(id INTEGER, bookId INTEGER, lineIndex INTEGER, content TEXT, heRef TEXT);",
        )
        .unwrap();
        path
    }

    fn insert_line(conn: &Connection, id: i64, book_id: i64, index: i64, content: &str) {
        conn.execute(
            "INSERT INTO line VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, book_id, index, content, format!("ref {id}")],
        )
        .unwrap();
    }

    #[test]
    fn missing_database_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = build_index(&temp.path().join("nope.db"), &temp.path().join("index"))
            .unwrap_err();
        assert!(matches!(err, IndexError::Source(_)));
        assert!(err.to_string().contains("nope.db"));
    }

    #[test]
    fn counts_only_non_blank_lines() {
        let temp = TempDir::new().unwrap();
        let db = fixture_db(temp.path());
        let conn = Connection::open(&db).unwrap();
        conn.execute("INSERT INTO book VALUES (1, 'בראשית', NULL)", [])
            .unwrap();
        insert_line(&conn, 1, 1, 0, "בראשית ברא");
        insert_line(&conn, 2, 1, 1, "   ");
        insert_line(&conn, 3, 1, 2, "");
        insert_line(&conn, 4, 1, 3, "אלהים");
        conn.execute(
            "INSERT INTO line (id, bookId, lineIndex, content, heRef) VALUES (5, 1, 4, NULL, NULL)",
            [],
        )
        .unwrap();
        drop(conn);

        let stats = build_index(&db, &temp.path().join("index")).unwrap();
        assert_eq!(stats.documents, 2);
    }

    #[test]
    fn resolves_titles_and_category_paths() {
        let temp = TempDir::new().unwrap();
        let db = fixture_db(temp.path());
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "INSERT INTO category VALUES (1, 'תנך', NULL);
             INSERT INTO category VALUES (2, 'תורה', 1);
             INSERT INTO category VALUES (3, 'בראשית', 2);
             INSERT INTO book VALUES (1, 'בראשית', 3);
             INSERT INTO book VALUES (2, 'ללא קטגוריה', NULL);",
        )
        .unwrap();
        insert_line(&conn, 1, 1, 0, "בראשית ברא אלהים");
        insert_line(&conn, 2, 2, 0, "שורה ראשונה");
        insert_line(&conn, 3, 99, 0, "ספר לא מוכר");
        drop(conn);

        let index_dir = temp.path().join("index");
        build_index(&db, &index_dir).unwrap();

        let searcher = Searcher::open(&index_dir).unwrap();
        let response = searcher.search(&SearchRequest {
            query: "בראשית".to_string(),
            limit: 10,
            book_filter: None,
            category_filter: None,
            wildcard_mode: false,
        });
        let hit = &response.results[0];
        assert_eq!(hit.book_title, "בראשית");
        assert_eq!(hit.category_path, "תנך/תורה/בראשית");

        // unknown book falls back to empty strings
        let response = searcher.search(&SearchRequest {
            query: "מוכר".to_string(),
            limit: 10,
            book_filter: None,
            category_filter: None,
            wildcard_mode: false,
        });
        let hit = &response.results[0];
        assert_eq!(hit.book_title, "");
        assert_eq!(hit.category_path, "");
    }

    #[test]
    fn markup_is_stripped_but_pointing_survives() {
        let temp = TempDir::new().unwrap();
        let db = fixture_db(temp.path());
        let conn = Connection::open(&db).unwrap();
        conn.execute("INSERT INTO book VALUES (1, 'בראשית', NULL)", [])
            .unwrap();
        insert_line(&conn, 1, 1, 0, "<big>בְּרֵאשִׁית</big> בָּרָא");
        drop(conn);

        let index_dir = temp.path().join("index");
        build_index(&db, &index_dir).unwrap();

        let searcher = Searcher::open(&index_dir).unwrap();
        let response = searcher.search(&SearchRequest {
            query: "ברא".to_string(),
            limit: 10,
            book_filter: None,
            category_filter: None,
            wildcard_mode: false,
        });
        assert_eq!(response.results.len(), 1);

        // markup is gone from the stored line, diacritics are not
        let snippet = &response.results[0].snippet;
        assert!(!snippet.contains("big"));
        assert!(snippet.contains("<mark>בָּרָא</mark>"));
    }

    #[test]
    fn category_cycle_yields_partial_path() {
        let mut categories = HashMap::new();
        categories.insert(
            1,
            CategoryRow {
                title: "א".to_string(),
                parent_id: Some(2),
            },
        );
        categories.insert(
            2,
            CategoryRow {
                title: "ב".to_string(),
                parent_id: Some(1),
            },
        );

        let paths = build_category_paths(&categories);
        let path = &paths[&1];
        assert_eq!(path.split('/').count(), MAX_CATEGORY_DEPTH);
    }

    #[test]
    fn category_chain_ends_at_missing_parent() {
        let mut categories = HashMap::new();
        categories.insert(
            7,
            CategoryRow {
                title: "יתום".to_string(),
                parent_id: Some(1000),
            },
        );

        let paths = build_category_paths(&categories);
        assert_eq!(paths[&7], "יתום");
    }
}

//! Durable word storage backed by SQLite.
//!
//! One table, one row per saved word pair. Every mutating call commits
//! before returning. The connection is shared behind a mutex, so callers
//! on different threads are serialised and never race on the schema.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TangoError, TangoResult};

/// A persisted source/translation pair with its learning flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: i64,
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub known: bool,
}

/// Fields supplied when saving a new word. `known` always starts false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub source_text: String,
    pub translated_text: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
}

const SELECT_COLUMNS: &str =
    "SELECT id, source_text, translated_text, source_lang, target_lang, known FROM words";

/// SQLite-backed word store.
pub struct WordStore {
    conn: Mutex<Connection>,
}

impl WordStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(db_path: &Path) -> TangoResult<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        info!(path = %db_path.display(), "word store opened");
        Ok(store)
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> TangoResult<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the `words` table if it is not there yet. Safe to call repeatedly.
    pub fn init_schema(&self) -> TangoResult<()> {
        self.conn.lock().execute_batch(
            "CREATE TABLE IF NOT EXISTS words (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                source_text TEXT NOT NULL,
                translated_text TEXT NOT NULL,
                source_lang TEXT,
                target_lang TEXT,
                known INTEGER DEFAULT 0
            );",
        )?;
        Ok(())
    }

    /// Insert a new entry with `known = false` and return its id.
    pub fn create(&self, word: &NewWord) -> TangoResult<i64> {
        if word.source_text.trim().is_empty() || word.translated_text.trim().is_empty() {
            return Err(TangoError::Validation(
                "source_text and translated_text are required".to_string(),
            ));
        }

        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO words (source_text, translated_text, source_lang, target_lang, known)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![
                word.source_text,
                word.translated_text,
                word.source_lang,
                word.target_lang
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!(id, source = %word.source_text, "word saved");
        Ok(id)
    }

    /// Every stored entry, in insertion order.
    pub fn list_all(&self) -> TangoResult<Vec<WordEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let words = stmt
            .query_map([], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    /// Look up a single entry.
    pub fn get(&self, id: i64) -> TangoResult<Option<WordEntry>> {
        let conn = self.conn.lock();
        let entry = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    /// Pick one entry at random, drawing from unknown words first.
    ///
    /// A known word is only returned once every stored word is known.
    pub fn pick_weighted(&self) -> TangoResult<WordEntry> {
        let conn = self.conn.lock();
        conn.query_row(
            &format!("{SELECT_COLUMNS} ORDER BY CASE WHEN COALESCE(known, 0) = 0 THEN 0 ELSE 1 END, RANDOM() LIMIT 1"),
            [],
            row_to_entry,
        )
        .optional()?
        .ok_or_else(|| TangoError::NotFound("No words found".to_string()))
    }

    /// Set the learning flag. Returns whether a row matched.
    ///
    /// An unknown id is not an error: the update simply touches nothing.
    pub fn update_known(&self, id: i64, known: bool) -> TangoResult<bool> {
        let changed = self.conn.lock().execute(
            "UPDATE words SET known = ?1 WHERE id = ?2",
            params![known as i64, id],
        )?;
        if changed == 0 {
            debug!(id, "update_known matched no row");
        }
        Ok(changed > 0)
    }

    /// Remove an entry. Returns whether a row was deleted.
    pub fn delete(&self, id: i64) -> TangoResult<bool> {
        let changed = self
            .conn
            .lock()
            .execute("DELETE FROM words WHERE id = ?1", params![id])?;
        if changed == 0 {
            debug!(id, "delete matched no row");
        }
        Ok(changed > 0)
    }
}

impl std::fmt::Debug for WordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordStore").finish_non_exhaustive()
    }
}

// Older databases let the language columns and the flag be NULL.
fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<WordEntry> {
    Ok(WordEntry {
        id: row.get(0)?,
        source_text: row.get(1)?,
        translated_text: row.get(2)?,
        source_lang: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        target_lang: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        known: row.get::<_, Option<i64>>(5)?.unwrap_or(0) != 0,
    })
}

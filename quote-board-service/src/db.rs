//! SQLite-backed key-value persistence for the quote board.
//!
//! The whole collection is stored as one JSON array under a fixed key, with
//! the persisted category selection beside it.

use quote_board_types::Quote;
use rusqlite::{Connection, Result as SqliteResult};
use std::sync::Mutex;

const QUOTES_KEY: &str = "quotes";
const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn open(path: &str) -> SqliteResult<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(())
    }

    fn get_value(&self, key: &str) -> Result<Option<String>, String> {
        let conn = self.conn.lock().unwrap();
        match conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(format!("Database error: {}", e)),
        }
    }

    fn set_value(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            rusqlite::params![key, value],
        )
        .map_err(|e| format!("Failed to write {}: {}", key, e))?;
        Ok(())
    }

    /// Persist the full collection. Called after every store mutation.
    pub fn save_quotes(&self, quotes: &[Quote]) -> Result<(), String> {
        let json = serde_json::to_string(quotes)
            .map_err(|e| format!("Failed to serialize quotes: {}", e))?;
        self.set_value(QUOTES_KEY, &json)
    }

    /// `Ok(None)` when nothing has been saved yet; `Err` when the stored
    /// entry exists but does not parse.
    pub fn load_quotes(&self) -> Result<Option<Vec<Quote>>, String> {
        match self.get_value(QUOTES_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| format!("Corrupted {} entry: {}", QUOTES_KEY, e)),
            None => Ok(None),
        }
    }

    pub fn save_selected_category(&self, category: &str) -> Result<(), String> {
        self.set_value(SELECTED_CATEGORY_KEY, category)
    }

    pub fn load_selected_category(&self) -> Result<Option<String>, String> {
        self.get_value(SELECTED_CATEGORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(text: &str, category: &str) -> Quote {
        Quote {
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_quotes_roundtrip() {
        let db = Db::open(":memory:").unwrap();
        let quotes = vec![quote("One.", "A"), quote("Two.", "B")];
        db.save_quotes(&quotes).unwrap();
        assert_eq!(db.load_quotes().unwrap(), Some(quotes));
    }

    #[test]
    fn test_absent_keys_return_none() {
        let db = Db::open(":memory:").unwrap();
        assert_eq!(db.load_quotes().unwrap(), None);
        assert_eq!(db.load_selected_category().unwrap(), None);
    }

    #[test]
    fn test_corrupted_quotes_entry_is_an_error() {
        let db = Db::open(":memory:").unwrap();
        db.set_value(QUOTES_KEY, "{not valid json").unwrap();
        assert!(db.load_quotes().is_err());
    }

    #[test]
    fn test_selected_category_roundtrip() {
        let db = Db::open(":memory:").unwrap();
        db.save_selected_category("Programming").unwrap();
        assert_eq!(
            db.load_selected_category().unwrap(),
            Some("Programming".to_string())
        );
        db.save_selected_category("all").unwrap();
        assert_eq!(db.load_selected_category().unwrap(), Some("all".to_string()));
    }

    #[test]
    fn test_reopen_preserves_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote_board.db");
        let path = path.to_str().unwrap();

        let quotes = vec![quote("Persisted.", "Test")];
        {
            let db = Db::open(path).unwrap();
            db.save_quotes(&quotes).unwrap();
        }

        let db = Db::open(path).unwrap();
        assert_eq!(db.load_quotes().unwrap(), Some(quotes));
    }
}

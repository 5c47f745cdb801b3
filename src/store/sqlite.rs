use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::Backend;
use super::schema::SCHEMA;
use crate::error::{Error, Result};

/// Durable backend: a single SQLite table keyed by entity kind.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Entity kinds currently stored, in name order.
    pub fn kinds(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT kind FROM collections ORDER BY kind")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

impl Backend for SqliteBackend {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn read(&self, kind: &str) -> Result<Option<String>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT document FROM collections WHERE kind = ?1",
            params![kind],
            |row| row.get(0),
        )
        .optional()
        .map_err(Error::from)
    }

    fn write(&self, kind: &str, document: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO collections (kind, document, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(kind) DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
            params![kind, document, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, kind: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM collections WHERE kind = ?1", params![kind])?;
        Ok(rows > 0)
    }
}

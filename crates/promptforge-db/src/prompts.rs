//! Saved prompts store.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::MutexGuard;

/// A stored prompt. Immutable once created; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPrompt {
    pub id: i64,
    #[serde(rename = "prompt")]
    pub text: String,
}

/// Saved prompts store with a borrowed connection.
pub struct SavedPrompts<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> SavedPrompts<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// Insert a prompt and return its assigned id.
    pub fn insert(&self, text: &str) -> Result<i64, rusqlite::Error> {
        self.conn
            .execute("INSERT INTO prompts (prompt) VALUES (?1)", params![text])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all saved prompts in storage order.
    pub fn list(&self) -> Result<Vec<SavedPrompt>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT id, prompt FROM prompts")?;
        let rows = stmt.query_map([], |row| {
            Ok(SavedPrompt {
                id: row.get(0)?,
                text: row.get(1)?,
            })
        })?;

        let mut prompts = Vec::new();
        for row in rows {
            prompts.push(row?);
        }

        Ok(prompts)
    }

    /// Delete a prompt by id. Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prompts WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }
}

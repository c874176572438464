//! AI provider configuration store.

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::sync::MutexGuard;

/// A stored provider configuration.
///
/// The api_key is opaque to the store and held in plaintext, matching the
/// wire contract of the config listing endpoint. The store performs no
/// validation; a hosted config with a blank key is rejected at generation
/// time instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfigRecord {
    pub id: i64,
    pub llm_type: String,
    pub model: String,
    pub api_key: String,
}

/// AI configuration store with a borrowed connection.
pub struct AiConfigs<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> AiConfigs<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// Insert a configuration and return its assigned id.
    pub fn insert(&self, llm_type: &str, model: &str, api_key: &str) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO ai_configs (llm_type, model, api_key) VALUES (?1, ?2, ?3)",
            params![llm_type, model, api_key],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all configurations in storage order.
    pub fn list(&self) -> Result<Vec<AiConfigRecord>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, llm_type, model, api_key FROM ai_configs")?;
        let rows = stmt.query_map([], |row| {
            Ok(AiConfigRecord {
                id: row.get(0)?,
                llm_type: row.get(1)?,
                model: row.get(2)?,
                api_key: row.get(3)?,
            })
        })?;

        let mut configs = Vec::new();
        for row in rows {
            configs.push(row?);
        }

        Ok(configs)
    }

    /// Delete a configuration by id. Returns whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM ai_configs WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }
}

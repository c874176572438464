//! Database layer for promptforge.
//!
//! Provides a unified `Database` struct that owns the SQLite connection
//! and provides access to the two record stores: saved prompts and AI
//! provider configurations. The tables are independent; there are no
//! relationships between them.

mod configs;
mod prompts;

pub use configs::{AiConfigRecord, AiConfigs};
pub use prompts::{SavedPrompt, SavedPrompts};

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// The main database struct that owns the SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at a specific path.
    pub fn open_at(path: &Path) -> Result<Self, rusqlite::Error> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Access the saved prompts store.
    pub fn prompts(&self) -> SavedPrompts<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        SavedPrompts::new(conn)
    }

    /// Access the AI provider configuration store.
    pub fn ai_configs(&self) -> AiConfigs<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        AiConfigs::new(conn)
    }

    /// Initialize the database schema.
    ///
    /// Ids are SQLite rowid aliases, so they auto-increment on insert.
    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS prompts (
                id INTEGER PRIMARY KEY,
                prompt TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS ai_configs (
                id INTEGER PRIMARY KEY,
                llm_type TEXT NOT NULL,
                model TEXT NOT NULL,
                api_key TEXT NOT NULL
            );
            "#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_list_prompts() {
        let db = Database::open_in_memory().unwrap();

        let id = db.prompts().insert("Summarize this article").unwrap();
        assert!(id > 0);

        let prompts = db.prompts().list().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, id);
        assert_eq!(prompts[0].text, "Summarize this article");
    }

    #[test]
    fn test_prompt_ids_increment() {
        let db = Database::open_in_memory().unwrap();

        let first = db.prompts().insert("first").unwrap();
        let second = db.prompts().insert("second").unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_delete_prompt() {
        let db = Database::open_in_memory().unwrap();

        let id = db.prompts().insert("to be deleted").unwrap();
        assert!(db.prompts().delete(id).unwrap());
        assert!(db.prompts().list().unwrap().is_empty());

        // Deleting again reports no rows affected
        assert!(!db.prompts().delete(id).unwrap());
    }

    #[test]
    fn test_ai_config_round_trip() {
        let db = Database::open_in_memory().unwrap();

        let id = db
            .ai_configs()
            .insert("openai", "gpt-4o", "sk-test-key")
            .unwrap();

        let configs = db.ai_configs().list().unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].id, id);
        assert_eq!(configs[0].llm_type, "openai");
        assert_eq!(configs[0].model, "gpt-4o");
        assert_eq!(configs[0].api_key, "sk-test-key");

        assert!(db.ai_configs().delete(id).unwrap());
        assert!(db.ai_configs().list().unwrap().is_empty());
    }

    #[test]
    fn test_blank_api_key_accepted() {
        // The store is deliberately lenient; a hosted config with a blank
        // key is rejected at generation time, not at write time.
        let db = Database::open_in_memory().unwrap();
        db.ai_configs().insert("openai", "gpt-4o", "").unwrap();
        assert_eq!(db.ai_configs().list().unwrap().len(), 1);
    }

    #[test]
    fn test_tables_are_independent() {
        let db = Database::open_in_memory().unwrap();

        db.prompts().insert("a prompt").unwrap();
        let config_id = db.ai_configs().insert("ollama", "llama3", "").unwrap();

        db.ai_configs().delete(config_id).unwrap();
        assert_eq!(db.prompts().list().unwrap().len(), 1);
    }

    #[test]
    fn test_reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts.db");

        let id = {
            let db = Database::open_at(&path).unwrap();
            let id = db.prompts().insert("persisted").unwrap();
            id
        };

        let db = Database::open_at(&path).unwrap();
        let prompts = db.prompts().list().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].id, id);
        assert_eq!(prompts[0].text, "persisted");
    }
}

//! SQLite implementation of the key-value blob store.
//!
//! Each collection is serialized to JSON and stored under its name in the
//! `collections` table. Loading an absent or unparseable blob yields an
//! empty collection; only real database failures surface as errors.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{Completion, Habit};
use crate::storage::{migrations, StorageBackend, StorageError};

const HABITS_KEY: &str = "habits";
const COMPLETIONS_KEY: &str = "completions";

/// SQLite-backed blob store for the two collections
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and run migrations
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite blob store initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// In-memory database, mainly for tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn load_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StorageError> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM collections WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = blob else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                // Corrupt persisted data must never block startup.
                tracing::warn!(
                    "Collection '{}' is unparseable ({}); treating as empty",
                    name,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StorageError> {
        let blob = serde_json::to_string(items)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO collections (name, data, updated_at) VALUES (?1, ?2, ?3)",
            params![name, blob, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Saved collection '{}' ({} items)", name, items.len());
        Ok(())
    }
}

impl StorageBackend for SqliteStore {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        self.load_collection(HABITS_KEY)
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        self.save_collection(HABITS_KEY, habits)
    }

    fn load_completions(&self) -> Result<Vec<Completion>, StorageError> {
        self.load_collection(COMPLETIONS_KEY)
    }

    fn save_completions(&self, completions: &[Completion]) -> Result<(), StorageError> {
        self.save_collection(COMPLETIONS_KEY, completions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{dates, Frequency};

    fn sample_habit(name: &str) -> Habit {
        Habit::new(
            name.to_string(),
            "⭐".to_string(),
            "#00aaff".to_string(),
            Frequency::Daily,
            None,
            10,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store_loads_empty_collections() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.load_habits().unwrap().is_empty());
        assert!(store.load_completions().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let habits = vec![sample_habit("Read"), sample_habit("Run")];
        store.save_habits(&habits).unwrap();

        let loaded = store.load_habits().unwrap();
        assert_eq!(loaded, habits);

        let completions =
            vec![Completion::new(habits[0].id, dates::today(), false, None, 10).unwrap()];
        store.save_completions(&completions).unwrap();
        assert_eq!(store.load_completions().unwrap(), completions);
    }

    #[test]
    fn test_save_replaces_whole_collection() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .save_habits(&[sample_habit("A"), sample_habit("B")])
            .unwrap();
        store.save_habits(&[sample_habit("C")]).unwrap();

        let loaded = store.load_habits().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "C");
    }

    #[test]
    fn test_corrupt_blob_is_treated_as_empty() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT OR REPLACE INTO collections (name, data, updated_at)
                 VALUES ('habits', 'not json {', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let loaded = store.load_habits().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_wrong_shape_blob_is_treated_as_empty() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT OR REPLACE INTO collections (name, data, updated_at)
                 VALUES ('completions', '{\"unexpected\":true}', '2026-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        assert!(store.load_completions().unwrap().is_empty());
    }
}

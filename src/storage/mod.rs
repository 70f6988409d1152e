//! Storage layer for the persisted collections.
//!
//! The durable copy of the data is a key-value blob store: each of the two
//! collections (habits, completions) is written and read as one JSON blob
//! with whole-collection replace semantics. Corrupt or unparseable
//! persisted data is normalized to an empty collection at load time, never
//! surfaced as an error.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::domain::{Completion, Habit};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable backend for the two collections
///
/// Implementations replace the whole collection on save. Loads never fail
/// on bad data: a missing or corrupt blob is an empty collection.
pub trait StorageBackend {
    /// Load all habits; empty if absent or corrupt
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Replace the stored habit collection
    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError>;

    /// Load all completions; empty if absent or corrupt
    fn load_completions(&self) -> Result<Vec<Completion>, StorageError>;

    /// Replace the stored completion collection
    fn save_completions(&self, completions: &[Completion]) -> Result<(), StorageError>;
}

// A shared reference to a backend is itself a backend, so a store can
// borrow one that outlives it (tests inspect the backend after mutations).
impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        (**self).load_habits()
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        (**self).save_habits(habits)
    }

    fn load_completions(&self) -> Result<Vec<Completion>, StorageError> {
        (**self).load_completions()
    }

    fn save_completions(&self, completions: &[Completion]) -> Result<(), StorageError> {
        (**self).save_completions(completions)
    }
}

//! In-memory storage backend.
//!
//! Used by tests and embedders that don't want a database file. Mirrors
//! the blob-store contract: saves replace the whole collection. A
//! switchable failure mode lets tests exercise persistence-error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::{Completion, Habit};
use crate::storage::{StorageBackend, StorageError};

/// Volatile backend holding the collections behind mutexes
#[derive(Default)]
pub struct MemoryStore {
    habits: Mutex<Vec<Habit>>,
    completions: Mutex<Vec<Completion>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail; loads keep working
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn check_save(&self) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Connection(
                "simulated save failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryStore {
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let habits = self
            .habits
            .lock()
            .map_err(|_| StorageError::Connection("habits lock poisoned".to_string()))?;
        Ok(habits.clone())
    }

    fn save_habits(&self, habits: &[Habit]) -> Result<(), StorageError> {
        self.check_save()?;
        let mut guard = self
            .habits
            .lock()
            .map_err(|_| StorageError::Connection("habits lock poisoned".to_string()))?;
        *guard = habits.to_vec();
        Ok(())
    }

    fn load_completions(&self) -> Result<Vec<Completion>, StorageError> {
        let completions = self
            .completions
            .lock()
            .map_err(|_| StorageError::Connection("completions lock poisoned".to_string()))?;
        Ok(completions.clone())
    }

    fn save_completions(&self, completions: &[Completion]) -> Result<(), StorageError> {
        self.check_save()?;
        let mut guard = self
            .completions
            .lock()
            .map_err(|_| StorageError::Connection("completions lock poisoned".to_string()))?;
        *guard = completions.to_vec();
        Ok(())
    }
}

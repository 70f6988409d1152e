//! Habit tracking core: habits, daily completions, derived streaks and XP.
//!
//! The store ([`HabitStore`]) owns the in-memory collections and persists
//! them through a [`StorageBackend`]; reminders go through a
//! [`ReminderScheduler`]. Streaks and levels are pure derivations that are
//! recomputed on read, never stored.

pub mod domain;
pub mod notify;
pub mod storage;
pub mod store;

pub use domain::{
    dates, level_progress, Completion, CompletionId, DomainError, Frequency, Habit, HabitId,
    HabitUpdate, LevelProgress, ReminderTime, StreakInfo, XP_PER_COMPLETION,
};
pub use notify::{LogScheduler, NullScheduler, ReminderScheduler};
pub use storage::{MemoryStore, SqliteStore, StorageBackend, StorageError};
pub use store::queries::DayActivity;
pub use store::{HabitStore, NewHabit, StoreError};

//! Domain module containing the core entities and pure computation.
//!
//! This module defines Habit, Completion, StreakInfo and the XP leveling
//! curve, together with the validation rules for each entity.

pub mod completion;
pub mod dates;
pub mod habit;
pub mod streak;
pub mod types;
pub mod xp;

pub use completion::*;
pub use habit::*;
pub use streak::*;
pub use types::*;
pub use xp::*;

use thiserror::Error;

/// Errors that can occur during domain validation
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid XP reward: {0}")]
    InvalidXpReward(String),

    #[error("Invalid reminder time: {0}")]
    InvalidReminderTime(String),

    #[error("Invalid note: {0}")]
    InvalidNote(String),
}

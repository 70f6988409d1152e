//! Completion records.
//!
//! A `Completion` marks a habit as done (or explicitly skipped) on one
//! calendar day. The store enforces at most one completion per
//! (habit_id, date) pair; a skipped completion occupies that slot without
//! counting toward streaks, XP, or activity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CompletionId, DomainError, HabitId};

/// A record that a habit was performed (or skipped) on a specific day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Unique identifier for this record
    pub id: CompletionId,
    /// Which habit this record belongs to
    pub habit_id: HabitId,
    /// The calendar day this completion is for
    pub date: NaiveDate,
    /// When the record was created (may be a different day than `date`)
    pub completed_at: DateTime<Utc>,
    /// A "rest day" marker: recorded but excluded from streaks and XP
    pub skipped: bool,
    /// Optional user note
    pub note: Option<String>,
    /// XP granted by this completion; always 0 when skipped
    pub xp_awarded: u32,
}

impl Completion {
    /// Create a new completion record with validation
    pub fn new(
        habit_id: HabitId,
        date: NaiveDate,
        skipped: bool,
        note: Option<String>,
        xp_awarded: u32,
    ) -> Result<Self, DomainError> {
        Self::validate_note(&note)?;

        Ok(Self {
            id: CompletionId::new(),
            habit_id,
            date,
            completed_at: Utc::now(),
            skipped,
            note,
            xp_awarded,
        })
    }

    /// Whether this record counts toward streaks, XP and activity
    pub fn counts(&self) -> bool {
        !self.skipped
    }

    fn validate_note(note: &Option<String>) -> Result<(), DomainError> {
        if let Some(text) = note {
            if text.len() > 500 {
                return Err(DomainError::InvalidNote(
                    "Note cannot be longer than 500 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

//! Habit entity and partial-update handling.
//!
//! A `Habit` is the core tracked entity. Construction and updates validate
//! up front so no invalid habit ever reaches the store or the persisted
//! collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Frequency, HabitId, ReminderTime};

/// A recurring activity the user wants to track
///
/// Identity is `id`, immutable once created. `archived` soft-deletes the
/// habit from active views without touching its completion history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run")
    pub name: String,
    /// Emoji or glyph shown next to the name
    pub icon: String,
    /// Accent color, e.g. "#ff8800"
    pub color: String,
    /// How often this habit recurs
    pub frequency: Frequency,
    /// Optional daily reminder time
    pub reminder_time: Option<ReminderTime>,
    /// XP awarded per non-skipped completion (always >= 1)
    pub xp_reward: u32,
    /// Hidden from active views when true; history is kept
    pub archived: bool,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

/// Partial update for a habit
///
/// Each field is optional; `reminder_time` carries a presence flag so
/// "leave unchanged" (`None`) is distinct from "clear the reminder"
/// (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub frequency: Option<Frequency>,
    pub reminder_time: Option<Option<ReminderTime>>,
    pub xp_reward: Option<u32>,
    pub archived: Option<bool>,
}

impl Habit {
    /// Create a new habit with validation
    pub fn new(
        name: String,
        icon: String,
        color: String,
        frequency: Frequency,
        reminder_time: Option<ReminderTime>,
        xp_reward: u32,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_xp_reward(xp_reward)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            icon,
            color,
            frequency,
            reminder_time,
            xp_reward,
            archived: false,
            created_at: Utc::now(),
        })
    }

    /// Apply a partial update, validating before any field is touched
    ///
    /// Either every change lands or none does; a validation failure leaves
    /// the habit exactly as it was.
    pub fn apply_update(&mut self, update: HabitUpdate) -> Result<(), DomainError> {
        if let Some(ref new_name) = update.name {
            Self::validate_name(new_name)?;
        }
        if let Some(new_reward) = update.xp_reward {
            Self::validate_xp_reward(new_reward)?;
        }

        if let Some(new_name) = update.name {
            self.name = new_name;
        }
        if let Some(new_icon) = update.icon {
            self.icon = new_icon;
        }
        if let Some(new_color) = update.color {
            self.color = new_color;
        }
        if let Some(new_frequency) = update.frequency {
            self.frequency = new_frequency;
        }
        if let Some(new_reminder) = update.reminder_time {
            self.reminder_time = new_reminder;
        }
        if let Some(new_reward) = update.xp_reward {
            self.xp_reward = new_reward;
        }
        if let Some(new_archived) = update.archived {
            self.archived = new_archived;
        }

        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }
        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_xp_reward(xp_reward: u32) -> Result<(), DomainError> {
        if xp_reward == 0 {
            return Err(DomainError::InvalidXpReward(
                "XP reward must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

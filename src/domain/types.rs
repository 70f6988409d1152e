//! Core types used throughout the domain layer.
//!
//! Identifier newtypes, the habit frequency enum, and the parsed
//! `ReminderTime` wall-clock type.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// A wrapper around UUID for type safety, so a habit id can't be passed
/// where a completion id is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a habit ID from its string form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a completion record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionId(pub Uuid);

impl CompletionId {
    /// Generate a new random completion ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a completion ID from its string form
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Display for CompletionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How often a habit recurs
///
/// Serialized as `"daily"` / `"weekly"` to match the persisted collection
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every single day
    Daily,
    /// Once per week; which day counts as "due" is not yet defined, so
    /// weekly habits never appear in the due-today view
    Weekly,
}

impl Frequency {
    /// Whether a habit with this frequency belongs in the due-today view
    pub fn is_due_daily(&self) -> bool {
        matches!(self, Frequency::Daily)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

/// A daily reminder time, parsed from and serialized as `"HH:MM"`
///
/// Parsing validates the range up front so a malformed reminder time is a
/// validation error at the API boundary rather than a scheduling surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    pub hour: u8,
    pub minute: u8,
}

impl ReminderTime {
    /// Create a reminder time, checking the hour/minute ranges
    pub fn new(hour: u8, minute: u8) -> Result<Self, DomainError> {
        if hour > 23 || minute > 59 {
            return Err(DomainError::InvalidReminderTime(format!(
                "{:02}:{:02} is out of range",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Parse an `"HH:MM"` string
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let (h, m) = s.split_once(':').ok_or_else(|| {
            DomainError::InvalidReminderTime(format!("expected HH:MM, got '{}'", s))
        })?;
        let hour: u8 = h.parse().map_err(|_| {
            DomainError::InvalidReminderTime(format!("invalid hour in '{}'", s))
        })?;
        let minute: u8 = m.parse().map_err(|_| {
            DomainError::InvalidReminderTime(format!("invalid minute in '{}'", s))
        })?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ReminderTime> for String {
    fn from(t: ReminderTime) -> Self {
        t.to_string()
    }
}

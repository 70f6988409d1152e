//! Reminder scheduling collaborator.
//!
//! The core never delivers notifications itself; it asks a scheduler to
//! register (or cancel) a daily reminder keyed by habit id. Scheduling with
//! an id that already has a reminder replaces the previous one. A platform
//! may deny notification permission, in which case an implementation
//! silently does nothing, so the trait is infallible.

use crate::domain::HabitId;

/// App title used for every reminder notification
pub const REMINDER_TITLE: &str = "Level Up";

/// Body text for a habit's daily reminder
pub fn reminder_body(habit_name: &str) -> String {
    format!("Time for: {}", habit_name)
}

/// External daily-reminder scheduler, keyed by habit id
pub trait ReminderScheduler {
    /// Register a daily reminder; replaces any prior schedule for this id
    fn schedule_daily_reminder(
        &self,
        habit_id: &HabitId,
        title: &str,
        body: &str,
        hour: u8,
        minute: u8,
    );

    /// Remove the reminder for this id, if any
    fn cancel_reminder(&self, habit_id: &HabitId);
}

impl<T: ReminderScheduler + ?Sized> ReminderScheduler for &T {
    fn schedule_daily_reminder(
        &self,
        habit_id: &HabitId,
        title: &str,
        body: &str,
        hour: u8,
        minute: u8,
    ) {
        (**self).schedule_daily_reminder(habit_id, title, body, hour, minute)
    }

    fn cancel_reminder(&self, habit_id: &HabitId) {
        (**self).cancel_reminder(habit_id)
    }
}

/// Scheduler that only logs; useful for headless runs and the CLI
pub struct LogScheduler;

impl ReminderScheduler for LogScheduler {
    fn schedule_daily_reminder(
        &self,
        habit_id: &HabitId,
        title: &str,
        body: &str,
        hour: u8,
        minute: u8,
    ) {
        tracing::info!(
            "Scheduled daily reminder for {} at {:02}:{:02}: {} / {}",
            habit_id,
            hour,
            minute,
            title,
            body
        );
    }

    fn cancel_reminder(&self, habit_id: &HabitId) {
        tracing::info!("Cancelled reminder for {}", habit_id);
    }
}

/// Scheduler that does nothing at all
pub struct NullScheduler;

impl ReminderScheduler for NullScheduler {
    fn schedule_daily_reminder(
        &self,
        _habit_id: &HabitId,
        _title: &str,
        _body: &str,
        _hour: u8,
        _minute: u8,
    ) {
    }

    fn cancel_reminder(&self, _habit_id: &HabitId) {}
}

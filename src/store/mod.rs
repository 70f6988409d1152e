//! The habit/completion store.
//!
//! `HabitStore` owns the two in-memory collections and is the single
//! logical writer. Every mutating operation validates first, updates the
//! in-memory state, then persists the whole affected collection before
//! returning. There is no rollback: if persistence fails after the
//! in-memory update, the states diverge and `refresh()` is the recovery
//! path.

pub mod queries;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    Completion, DomainError, Frequency, Habit, HabitId, HabitUpdate, ReminderTime,
    XP_PER_COMPLETION,
};
use crate::notify::{reminder_body, ReminderScheduler, REMINDER_TITLE};
use crate::storage::{StorageBackend, StorageError};

/// Errors surfaced by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Habit not found: {0}")]
    HabitNotFound(HabitId),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),
}

/// Fields for a new habit; id and creation timestamp are assigned on add
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub frequency: Frequency,
    pub reminder_time: Option<ReminderTime>,
    pub xp_reward: u32,
}

impl NewHabit {
    /// A daily habit with the default reward and no reminder
    pub fn daily(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            frequency: Frequency::Daily,
            reminder_time: None,
            xp_reward: XP_PER_COMPLETION,
        }
    }
}

/// In-memory domain store backed by a durable collaborator
///
/// Construct one store per process/session and pass it to whoever needs
/// it; the in-memory collections are the source of truth for reads.
pub struct HabitStore<S, N> {
    storage: S,
    scheduler: N,
    habits: Vec<Habit>,
    completions: Vec<Completion>,
}

impl<S: StorageBackend, N: ReminderScheduler> HabitStore<S, N> {
    /// Open the store, loading both collections from the backend
    pub fn open(storage: S, scheduler: N) -> Result<Self, StoreError> {
        let habits = storage.load_habits()?;
        let completions = storage.load_completions()?;

        tracing::info!(
            "Store opened with {} habits and {} completions",
            habits.len(),
            completions.len()
        );

        Ok(Self {
            storage,
            scheduler,
            habits,
            completions,
        })
    }

    /// Create a habit, persist it, and schedule its reminder if set
    pub fn add_habit(&mut self, fields: NewHabit) -> Result<Habit, StoreError> {
        let habit = Habit::new(
            fields.name,
            fields.icon,
            fields.color,
            fields.frequency,
            fields.reminder_time,
            fields.xp_reward,
        )?;

        self.habits.push(habit.clone());
        self.storage.save_habits(&self.habits)?;

        if let Some(time) = habit.reminder_time {
            self.scheduler.schedule_daily_reminder(
                &habit.id,
                REMINDER_TITLE,
                &reminder_body(&habit.name),
                time.hour,
                time.minute,
            );
        }

        tracing::debug!("Added habit '{}' ({})", habit.name, habit.id);
        Ok(habit)
    }

    /// Merge a partial update into an existing habit
    ///
    /// Signals `HabitNotFound` for an unknown id so callers can tell
    /// "nothing to do" from "bad reference". A reminder-time change
    /// reschedules (set) or cancels (cleared) the habit's reminder.
    pub fn update_habit(&mut self, id: HabitId, update: HabitUpdate) -> Result<(), StoreError> {
        let reminder_change = update.reminder_time;

        let habit = self
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::HabitNotFound(id))?;
        habit.apply_update(update)?;
        let name = habit.name.clone();

        self.storage.save_habits(&self.habits)?;

        match reminder_change {
            Some(Some(time)) => {
                self.scheduler.schedule_daily_reminder(
                    &id,
                    REMINDER_TITLE,
                    &reminder_body(&name),
                    time.hour,
                    time.minute,
                );
            }
            Some(None) => self.scheduler.cancel_reminder(&id),
            None => {}
        }

        tracing::debug!("Updated habit '{}' ({})", name, id);
        Ok(())
    }

    /// Remove a habit, its reminder, and all of its completions
    pub fn delete_habit(&mut self, id: HabitId) -> Result<(), StoreError> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or(StoreError::HabitNotFound(id))?;

        self.scheduler.cancel_reminder(&id);

        let removed = self.habits.remove(index);
        self.completions.retain(|c| c.habit_id != id);

        self.storage.save_habits(&self.habits)?;
        self.storage.save_completions(&self.completions)?;

        tracing::debug!("Deleted habit '{}' ({}) and its history", removed.name, id);
        Ok(())
    }

    /// Soft-delete: hide the habit from active views, keep its history
    pub fn archive_habit(&mut self, id: HabitId) -> Result<(), StoreError> {
        self.update_habit(
            id,
            HabitUpdate {
                archived: Some(true),
                ..Default::default()
            },
        )
    }

    /// Record a completion (or a skip) for one calendar day
    ///
    /// Idempotent: if a completion already occupies the (habit, date) slot
    /// this is a no-op, with no duplicate entry and no double XP award.
    pub fn complete_habit(
        &mut self,
        habit_id: HabitId,
        date: NaiveDate,
        skipped: bool,
        note: Option<String>,
    ) -> Result<(), StoreError> {
        let habit = self
            .habits
            .iter()
            .find(|h| h.id == habit_id)
            .ok_or(StoreError::HabitNotFound(habit_id))?;

        if self
            .completions
            .iter()
            .any(|c| c.habit_id == habit_id && c.date == date)
        {
            return Ok(());
        }

        let xp_awarded = if skipped { 0 } else { habit.xp_reward };
        let completion = Completion::new(habit_id, date, skipped, note, xp_awarded)?;

        self.completions.push(completion);
        self.storage.save_completions(&self.completions)?;

        tracing::debug!(
            "Recorded {} for habit {} on {}",
            if skipped { "skip" } else { "completion" },
            habit_id,
            date
        );
        Ok(())
    }

    /// Remove the completion for exactly (habit, date); no-op if absent
    pub fn uncomplete_habit(&mut self, habit_id: HabitId, date: NaiveDate) -> Result<(), StoreError> {
        if !self.habits.iter().any(|h| h.id == habit_id) {
            return Err(StoreError::HabitNotFound(habit_id));
        }

        let before = self.completions.len();
        self.completions
            .retain(|c| !(c.habit_id == habit_id && c.date == date));

        if self.completions.len() == before {
            return Ok(());
        }

        self.storage.save_completions(&self.completions)?;
        tracing::debug!("Removed completion for habit {} on {}", habit_id, date);
        Ok(())
    }

    /// Reload both collections wholesale from the backend
    ///
    /// Used at startup and to reconcile after a persistence failure or an
    /// external change to the durable copy.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.habits = self.storage.load_habits()?;
        self.completions = self.storage.load_completions()?;

        tracing::debug!(
            "Refreshed store: {} habits, {} completions",
            self.habits.len(),
            self.completions.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::{add_days, today};
    use crate::storage::MemoryStore;
    use std::sync::Mutex;

    /// Test scheduler that records every call
    #[derive(Default)]
    struct RecordingScheduler {
        events: Mutex<Vec<String>>,
    }

    impl RecordingScheduler {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ReminderScheduler for RecordingScheduler {
        fn schedule_daily_reminder(
            &self,
            habit_id: &HabitId,
            _title: &str,
            body: &str,
            hour: u8,
            minute: u8,
        ) {
            self.events
                .lock()
                .unwrap()
                .push(format!("schedule {} {:02}:{:02} {}", habit_id, hour, minute, body));
        }

        fn cancel_reminder(&self, habit_id: &HabitId) {
            self.events.lock().unwrap().push(format!("cancel {}", habit_id));
        }
    }

    fn open_store<'a>(
        storage: &'a MemoryStore,
        scheduler: &'a RecordingScheduler,
    ) -> HabitStore<&'a MemoryStore, &'a RecordingScheduler> {
        HabitStore::open(storage, scheduler).unwrap()
    }

    #[test]
    fn test_add_habit_persists_and_schedules() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let mut fields = NewHabit::daily("Meditate", "🧘", "#88cc00");
        fields.reminder_time = Some(ReminderTime::new(7, 30).unwrap());
        let habit = store.add_habit(fields).unwrap();

        assert_eq!(storage.load_habits().unwrap().len(), 1);
        let events = scheduler.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with(&format!("schedule {} 07:30", habit.id)));
        assert!(events[0].contains("Time for: Meditate"));
    }

    #[test]
    fn test_add_habit_without_reminder_schedules_nothing() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        store.add_habit(NewHabit::daily("Read", "📚", "#123456")).unwrap();
        assert!(scheduler.events().is_empty());
    }

    #[test]
    fn test_update_unknown_habit_is_not_found() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let result = store.update_habit(HabitId::new(), HabitUpdate::default());
        assert!(matches!(result, Err(StoreError::HabitNotFound(_))));
    }

    #[test]
    fn test_update_reminder_reschedules_with_current_name() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let habit = store.add_habit(NewHabit::daily("Read", "📚", "#123456")).unwrap();
        store
            .update_habit(
                habit.id,
                HabitUpdate {
                    name: Some("Read fiction".to_string()),
                    reminder_time: Some(Some(ReminderTime::new(21, 0).unwrap())),
                    ..Default::default()
                },
            )
            .unwrap();

        let events = scheduler.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].contains("21:00"));
        assert!(events[0].contains("Time for: Read fiction"));
    }

    #[test]
    fn test_update_clearing_reminder_cancels() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let mut fields = NewHabit::daily("Read", "📚", "#123456");
        fields.reminder_time = Some(ReminderTime::new(21, 0).unwrap());
        let habit = store.add_habit(fields).unwrap();

        store
            .update_habit(
                habit.id,
                HabitUpdate {
                    reminder_time: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        let events = scheduler.events();
        assert_eq!(events.last().unwrap(), &format!("cancel {}", habit.id));
    }

    #[test]
    fn test_complete_is_idempotent() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let habit = store.add_habit(NewHabit::daily("Run", "🏃", "#ff0000")).unwrap();
        let day = today();

        store.complete_habit(habit.id, day, false, None).unwrap();
        store.complete_habit(habit.id, day, false, None).unwrap();

        assert_eq!(store.completions().len(), 1);
        assert_eq!(store.total_xp(), habit.xp_reward);
    }

    #[test]
    fn test_complete_unknown_habit_is_not_found() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let result = store.complete_habit(HabitId::new(), today(), false, None);
        assert!(matches!(result, Err(StoreError::HabitNotFound(_))));
    }

    #[test]
    fn test_skip_occupies_the_day_slot() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let habit = store.add_habit(NewHabit::daily("Run", "🏃", "#ff0000")).unwrap();
        let day = today();

        store.complete_habit(habit.id, day, true, None).unwrap();
        // a later real completion on the same day is blocked by the slot
        store.complete_habit(habit.id, day, false, None).unwrap();

        assert_eq!(store.completions().len(), 1);
        assert!(store.completions()[0].skipped);
        assert_eq!(store.total_xp(), 0);
    }

    #[test]
    fn test_uncomplete_removes_exact_match_only() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let habit = store.add_habit(NewHabit::daily("Run", "🏃", "#ff0000")).unwrap();
        let day = today();
        store.complete_habit(habit.id, day, false, None).unwrap();
        store.complete_habit(habit.id, add_days(day, -1), false, None).unwrap();

        store.uncomplete_habit(habit.id, day).unwrap();
        assert_eq!(store.completions().len(), 1);
        assert_eq!(store.completions()[0].date, add_days(day, -1));

        // absent pair is a quiet no-op
        store.uncomplete_habit(habit.id, day).unwrap();
        assert_eq!(store.completions().len(), 1);
    }

    #[test]
    fn test_delete_cascades_and_cancels() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let keep = store.add_habit(NewHabit::daily("Keep", "✅", "#00ff00")).unwrap();
        let gone = store.add_habit(NewHabit::daily("Gone", "❌", "#ff0000")).unwrap();
        let day = today();
        store.complete_habit(keep.id, day, false, None).unwrap();
        store.complete_habit(gone.id, day, false, None).unwrap();

        store.delete_habit(gone.id).unwrap();

        assert!(store.completions().iter().all(|c| c.habit_id != gone.id));
        assert_eq!(storage.load_completions().unwrap().len(), 1);
        assert!(scheduler.events().contains(&format!("cancel {}", gone.id)));

        // the habit now behaves as if it never existed
        assert!(matches!(
            store.complete_habit(gone.id, day, false, None),
            Err(StoreError::HabitNotFound(_))
        ));
        assert!(matches!(
            store.uncomplete_habit(gone.id, day),
            Err(StoreError::HabitNotFound(_))
        ));
    }

    #[test]
    fn test_archive_hides_from_active_views() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let habit = store.add_habit(NewHabit::daily("Old", "🗃", "#999999")).unwrap();
        store.archive_habit(habit.id).unwrap();

        assert!(store.active_habits().is_empty());
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_persistence_failure_diverges_and_refresh_reconciles() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let habit = store.add_habit(NewHabit::daily("Run", "🏃", "#ff0000")).unwrap();

        storage.set_fail_saves(true);
        let result = store.complete_habit(habit.id, today(), false, None);
        assert!(matches!(result, Err(StoreError::Persistence(_))));

        // in-memory state kept the completion; the durable copy did not
        assert_eq!(store.completions().len(), 1);
        assert!(storage.load_completions().unwrap().is_empty());

        storage.set_fail_saves(false);
        store.refresh().unwrap();
        assert!(store.completions().is_empty());
    }

    #[test]
    fn test_refresh_replaces_state_wholesale() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);
        store.add_habit(NewHabit::daily("Run", "🏃", "#ff0000")).unwrap();

        // external change to the durable copy
        storage.save_habits(&[]).unwrap();

        store.refresh().unwrap();
        assert!(store.habits().is_empty());
    }

    #[test]
    fn test_validation_failure_leaves_state_untouched() {
        let storage = MemoryStore::new();
        let scheduler = RecordingScheduler::default();
        let mut store = open_store(&storage, &scheduler);

        let result = store.add_habit(NewHabit::daily("", "❓", "#000000"));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.habits().is_empty());
        assert!(storage.load_habits().unwrap().is_empty());
    }
}

//! Read-only aggregation queries.
//!
//! Thin derivations over the in-memory collections, recomputed on every
//! call. Nothing here mutates or persists.

use chrono::NaiveDate;

use crate::domain::{
    dates, level_progress, Completion, Habit, HabitId, LevelProgress, StreakInfo,
};
use crate::notify::ReminderScheduler;
use crate::storage::StorageBackend;
use crate::store::HabitStore;

/// One day of the activity histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: u32,
}

impl<S: StorageBackend, N: ReminderScheduler> HabitStore<S, N> {
    /// All habits, archived included
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Full completion history
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    /// Look up a habit by id
    pub fn habit(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Habits not soft-deleted
    pub fn active_habits(&self) -> Vec<&Habit> {
        self.habits.iter().filter(|h| !h.archived).collect()
    }

    /// Active habits due in today's view
    ///
    /// Weekly habits never show up here; which day a weekly habit is "due"
    /// is an open product question and the daily view stays daily-only
    /// until it's answered.
    pub fn due_today(&self) -> Vec<&Habit> {
        self.habits
            .iter()
            .filter(|h| !h.archived && h.frequency.is_due_daily())
            .collect()
    }

    /// Count of non-skipped completions across all habits
    pub fn total_completions(&self) -> u32 {
        self.completions.iter().filter(|c| c.counts()).count() as u32
    }

    /// Sum of XP over all non-skipped completions
    pub fn total_xp(&self) -> u32 {
        self.completions
            .iter()
            .filter(|c| c.counts())
            .map(|c| c.xp_awarded)
            .sum()
    }

    /// Position on the leveling curve for the accumulated XP
    pub fn level(&self) -> LevelProgress {
        level_progress(self.total_xp())
    }

    /// Non-skipped completions on one calendar day
    pub fn completed_count_on(&self, date: NaiveDate) -> u32 {
        self.completions
            .iter()
            .filter(|c| c.counts() && c.date == date)
            .count() as u32
    }

    /// Non-skipped completions dated today
    pub fn completed_today(&self) -> u32 {
        self.completed_count_on(dates::today())
    }

    /// Per-day completion counts for the last `days` days ending on `end`,
    /// oldest first
    pub fn activity_ending(&self, days: u32, end: NaiveDate) -> Vec<DayActivity> {
        (0..days)
            .rev()
            .map(|back| {
                let date = dates::add_days(end, -(back as i64));
                DayActivity {
                    date,
                    count: self.completed_count_on(date),
                }
            })
            .collect()
    }

    /// Activity histogram for the last `days` days ending today
    pub fn activity(&self, days: u32) -> Vec<DayActivity> {
        self.activity_ending(days, dates::today())
    }

    /// Streak statistics for one habit as of a given day
    pub fn streak_on(&self, habit_id: HabitId, today: NaiveDate) -> StreakInfo {
        StreakInfo::calculate(habit_id, &self.completions, today)
    }

    /// Streak statistics for one habit as of today
    pub fn streak(&self, habit_id: HabitId) -> StreakInfo {
        self.streak_on(habit_id, dates::today())
    }
}

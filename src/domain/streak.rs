//! Streak derivation.
//!
//! Streaks are never persisted; they are recomputed on demand from the
//! completion history. A streak counts consecutive calendar days with a
//! non-skipped completion. The current streak is strict: if today has no
//! completion it is 0, with no grace day for yesterday.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{Completion, HabitId};

/// Derived streak statistics for one habit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Consecutive days completed, ending today; 0 if today is not done
    pub current_streak: u32,
    /// Longest consecutive run anywhere in history
    pub longest_streak: u32,
    /// Most recent non-skipped completion date (None if never completed)
    pub last_completed_date: Option<NaiveDate>,
}

impl StreakInfo {
    /// Compute streak statistics from the full completion history
    ///
    /// `completions` may be in any order and may contain records for other
    /// habits; duplicate dates are tolerated and deduplicated even though
    /// the store's uniqueness invariant should prevent them. `today` is
    /// passed explicitly so callers (and tests) control the reference day.
    pub fn calculate(habit_id: HabitId, completions: &[Completion], today: NaiveDate) -> Self {
        // Distinct non-skipped dates for this habit, most recent first.
        let mut dates: Vec<NaiveDate> = completions
            .iter()
            .filter(|c| c.habit_id == habit_id && c.counts())
            .map(|c| c.date)
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();

        if dates.is_empty() {
            return Self {
                habit_id,
                current_streak: 0,
                longest_streak: 0,
                last_completed_date: None,
            };
        }

        // Current streak: walk backward from today, stop at the first gap.
        let mut current: u32 = 0;
        let mut check = today;
        for d in &dates {
            if *d == check {
                current += 1;
                check = check - Duration::days(1);
            } else {
                break;
            }
        }

        // Longest streak: longest consecutive run over the sorted dates.
        let mut longest: u32 = 0;
        let mut run: u32 = 1;
        for pair in dates.windows(2) {
            if pair[1] == pair[0] - Duration::days(1) {
                run += 1;
            } else {
                longest = longest.max(run);
                run = 1;
            }
        }
        longest = longest.max(run).max(current);

        Self {
            habit_id,
            current_streak: current,
            longest_streak: longest,
            last_completed_date: dates.first().copied(),
        }
    }
}

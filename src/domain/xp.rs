//! XP and leveling engine.
//!
//! Maps cumulative experience points to a level and progress within that
//! level. Level 1 takes 100 XP to complete and each subsequent level takes
//! 50 more than the last (100, 150, 200, ...).

use serde::Serialize;

/// XP awarded for a completion when the habit carries no explicit reward
pub const XP_PER_COMPLETION: u32 = 10;

/// A position on the leveling curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    /// Current level (starts at 1)
    pub level: u32,
    /// XP accumulated inside the current level
    pub current: u32,
    /// XP needed to finish the current level
    pub required: u32,
}

/// Map total XP to a level and progress-within-level
///
/// Total over all u32 inputs; `current < required` always holds on return.
pub fn level_progress(total_xp: u32) -> LevelProgress {
    let mut level: u32 = 1;
    let mut required: u32 = 100;
    let mut remaining = total_xp;

    while remaining >= required {
        remaining -= required;
        level += 1;
        required = 100 + (level - 1) * 50;
    }

    LevelProgress {
        level,
        current: remaining,
        required,
    }
}

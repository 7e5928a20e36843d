//! Task selection, ordering, and energy-based duration adjustment.

use chrono::{DateTime, Duration, Utc};

use crate::preferences::SchedulingPreferences;
use crate::schedule::TaskRef;

/// Without an explicit id filter, only tasks due within this horizon (or
/// without a due date) are scheduled.
pub const DUE_HORIZON_HOURS: i64 = 48;

const LOW_ENERGY_BELOW: u8 = 30;
const HIGH_ENERGY_FROM: u8 = 70;
const LOW_ENERGY_FOCUS_MINUTES: u32 = 25;
const LOW_ENERGY_MIN_BREAK_MINUTES: u32 = 15;
const MID_ENERGY_FOCUS_MINUTES: u32 = 50;
const HIGH_ENERGY_FOCUS_MINUTES: u32 = 90;

/// Pick the tasks to schedule and put them in allocation order.
///
/// Completed and cancelled tasks are always dropped. With `task_ids`, only
/// those tasks are considered; otherwise tasks due within
/// [`DUE_HORIZON_HOURS`] of `now` (including overdue ones) and undated tasks
/// are kept. Order: priority (high first), then due date ascending with
/// undated tasks last. Ties keep input order.
pub fn select_tasks(
    tasks: &[TaskRef],
    task_ids: Option<&[String]>,
    now: DateTime<Utc>,
) -> Vec<TaskRef> {
    let horizon = now + Duration::hours(DUE_HORIZON_HOURS);

    let mut selected: Vec<TaskRef> = tasks
        .iter()
        .filter(|t| t.is_open())
        .filter(|t| match task_ids {
            Some(ids) => ids.iter().any(|id| *id == t.id),
            None => t.due_date.map_or(true, |due| due <= horizon),
        })
        .cloned()
        .collect();

    selected.sort_by_key(|t| (t.priority.rank(), t.due_date.is_none(), t.due_date));
    selected
}

/// Scale block and break lengths to the given energy level.
///
/// - below 30: blocks capped at 25 minutes, breaks at least 15
/// - 30 to 69: blocks capped at 50 minutes
/// - 70 and up: blocks raised to at least 90 minutes
///
/// Lower energy never yields a longer block than higher energy.
pub fn adjust_for_energy(prefs: &SchedulingPreferences, energy_level: u8) -> SchedulingPreferences {
    let mut adjusted = prefs.clone();
    if energy_level < LOW_ENERGY_BELOW {
        adjusted.focus_block_minutes = prefs.focus_block_minutes.min(LOW_ENERGY_FOCUS_MINUTES);
        adjusted.break_minutes = prefs.break_minutes.max(LOW_ENERGY_MIN_BREAK_MINUTES);
    } else if energy_level < HIGH_ENERGY_FROM {
        adjusted.focus_block_minutes = prefs.focus_block_minutes.min(MID_ENERGY_FOCUS_MINUTES);
    } else {
        adjusted.focus_block_minutes = prefs.focus_block_minutes.max(HIGH_ENERGY_FOCUS_MINUTES);
    }
    adjusted.energy_level = energy_level;
    adjusted
}

//! Free-slot detection inside working hours.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::interval::{subtract, Interval};
use crate::preferences::SchedulingPreferences;
use crate::schedule::{BusyInterval, FreeSlot};
use crate::time_of_day::on_day;

/// Slots shorter than this are not worth scheduling into.
pub const MIN_SLOT_MINUTES: i64 = 30;

/// `[work_start, work_end)` on `day`, or `None` when the hours are inverted.
pub fn working_window(day: NaiveDate, prefs: &SchedulingPreferences) -> Option<Interval> {
    Interval::new(on_day(day, prefs.work_start), on_day(day, prefs.work_end))
}

/// Free slots of at least [`MIN_SLOT_MINUTES`] within working hours.
///
/// Chronological by default. With `prioritize_mornings`, slots that end by
/// noon come first, each group ordered by start.
pub fn find_free_slots(
    day: NaiveDate,
    busy: &[BusyInterval],
    prefs: &SchedulingPreferences,
) -> Vec<FreeSlot> {
    let Some(window) = working_window(day, prefs) else {
        tracing::warn!(
            %day,
            work_start = %prefs.work_start,
            work_end = %prefs.work_end,
            "working hours are empty or inverted; no free slots"
        );
        return Vec::new();
    };

    let busy: Vec<Interval> = busy.iter().map(|b| b.interval).collect();
    let mut slots: Vec<FreeSlot> = subtract(window, &busy, Duration::minutes(MIN_SLOT_MINUTES))
        .into_iter()
        .map(FreeSlot::new)
        .collect();

    if prefs.prioritize_mornings {
        let noon = on_day(day, NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
        slots.sort_by_key(|slot| (slot.end() > noon, slot.start()));
    }

    slots
}

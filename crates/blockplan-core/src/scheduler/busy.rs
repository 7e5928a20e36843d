//! Busy-set construction for a single day.

use chrono::{Days, NaiveDate, NaiveTime};

use crate::interval::{merge, Interval, Span};
use crate::preferences::SchedulingPreferences;
use crate::schedule::{BusyInterval, CalendarEvent};
use crate::time_of_day::on_day;

pub(crate) const LUNCH_LABEL: &str = "Lunch";

/// The whole calendar day `[00:00, next 00:00)` in UTC.
pub fn day_bounds(day: NaiveDate) -> Option<Interval> {
    let next = day.checked_add_days(Days::new(1))?;
    Interval::new(on_day(day, NaiveTime::MIN), on_day(next, NaiveTime::MIN))
}

/// Build the sorted, merged busy list for `day`.
///
/// Events that overlap the day are clipped to it; malformed events are
/// skipped. When lunch is enabled it is added as a labelled busy span.
/// Spans that merge together keep every distinct label, joined with `", "`.
pub fn build_busy_set(
    day: NaiveDate,
    events: &[CalendarEvent],
    prefs: &SchedulingPreferences,
) -> Vec<BusyInterval> {
    let Some(bounds) = day_bounds(day) else {
        return Vec::new();
    };

    let mut raw: Vec<BusyInterval> = events
        .iter()
        .filter_map(|event| {
            let clipped = event.span()?.clip(&bounds)?;
            let label = (!event.title.is_empty()).then(|| event.title.clone());
            Some(BusyInterval::new(clipped, label))
        })
        .collect();

    if prefs.lunch.enabled {
        let lunch_start = on_day(day, prefs.lunch.start);
        if let Some(lunch) = Interval::starting_at(lunch_start, prefs.lunch_duration()) {
            raw.push(BusyInterval::new(lunch, Some(LUNCH_LABEL.to_string())));
        }
    }

    let spans: Vec<Interval> = raw.iter().map(|b| b.interval).collect();
    merge(&spans)
        .into_iter()
        .map(|merged| {
            let mut labels: Vec<&str> = Vec::new();
            for part in raw.iter().filter(|b| merged.contains_interval(&b.interval)) {
                if let Some(label) = part.label.as_deref() {
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
            }
            let label = (!labels.is_empty()).then(|| labels.join(", "));
            BusyInterval::new(merged, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent::new(id, id.to_uppercase(), start, end)
    }

    #[test]
    fn merges_overlapping_events_and_keeps_labels() {
        let events = vec![
            event("standup", at(9, 0), at(9, 30)),
            event("review", at(9, 15), at(10, 0)),
            event("sync", at(14, 0), at(15, 0)),
        ];
        let busy = build_busy_set(day(), &events, &SchedulingPreferences::default());

        assert_eq!(busy.len(), 2);
        assert_eq!(busy[0].interval, Interval::new(at(9, 0), at(10, 0)).unwrap());
        assert_eq!(busy[0].label.as_deref(), Some("STANDUP, REVIEW"));
        assert_eq!(busy[1].label.as_deref(), Some("SYNC"));
    }

    #[test]
    fn lunch_is_added_when_enabled() {
        let mut prefs = SchedulingPreferences::default();
        prefs.lunch.enabled = true;
        let busy = build_busy_set(day(), &[], &prefs);

        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].interval, Interval::new(at(12, 0), at(13, 0)).unwrap());
        assert_eq!(busy[0].label.as_deref(), Some(LUNCH_LABEL));
    }

    #[test]
    fn events_on_other_days_are_ignored_and_spanning_events_clipped() {
        let yesterday = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        let events = vec![
            event("old", yesterday, yesterday + chrono::Duration::hours(1)),
            event("overnight", yesterday + chrono::Duration::hours(13), at(8, 0)),
        ];
        let busy = build_busy_set(day(), &events, &SchedulingPreferences::default());

        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].interval, Interval::new(at(0, 0), at(8, 0)).unwrap());
    }

    #[test]
    fn malformed_events_are_skipped() {
        let events = vec![event("broken", at(11, 0), at(10, 0))];
        assert!(build_busy_set(day(), &events, &SchedulingPreferences::default()).is_empty());
    }
}

//! Next-run scenarios through the public API.

use blockplan_core::{next_run, Frequency, Recurrence, ScheduleRule};
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc, Weekday};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn weekly_mon_wed_fri_from_tuesday_runs_wednesday() {
    let rule = ScheduleRule::recurring(
        at(2026, 1, 5, 0, 0),
        Recurrence::new(Frequency::Weekly, 1).on_days([1, 3, 5]),
    )
    .at_time(NaiveTime::from_hms_opt(8, 30, 0).unwrap());

    let tuesday = at(2026, 3, 3, 11, 0);
    assert_eq!(tuesday.weekday(), Weekday::Tue);

    let next = next_run(&rule, tuesday).unwrap();
    assert_eq!(next.weekday(), Weekday::Wed);
    assert_eq!(next, at(2026, 3, 4, 8, 30));
}

#[test]
fn daily_rule_advances_one_day_per_query() {
    let rule = ScheduleRule::recurring(at(2026, 3, 1, 7, 0), Recurrence::new(Frequency::Daily, 1));

    let mut now = at(2026, 3, 1, 12, 0);
    let mut previous = next_run(&rule, now).unwrap();
    for _ in 0..10 {
        now += Duration::days(1);
        let next = next_run(&rule, now).unwrap();
        assert_eq!(next - previous, Duration::days(1));
        previous = next;
    }
}

#[test]
fn one_time_rule_fires_exactly_once() {
    let start = at(2026, 4, 1, 10, 0);
    let rule = ScheduleRule::once(start);

    assert_eq!(next_run(&rule, start - Duration::minutes(1)), Some(start));
    assert_eq!(next_run(&rule, start), None);
}

#[test]
fn rule_loaded_from_json_matches_builder() {
    let json = r#"{
        "type": "recurring",
        "start_date": "2026-01-05T00:00:00Z",
        "time": "08:30",
        "recurrence": { "frequency": "weekly", "interval": 1, "days_of_week": [1, 3, 5] },
        "enabled": true
    }"#;
    let parsed: ScheduleRule = serde_json::from_str(json).unwrap();
    let built = ScheduleRule::recurring(
        at(2026, 1, 5, 0, 0),
        Recurrence::new(Frequency::Weekly, 1).on_days([1, 3, 5]),
    )
    .at_time(NaiveTime::from_hms_opt(8, 30, 0).unwrap());

    assert_eq!(parsed, built);
}

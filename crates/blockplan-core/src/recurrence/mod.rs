//! Next-run calculation for automation schedules.
//!
//! A [`ScheduleRule`] fires once or on a recurring cadence. The next run is
//! never stored: it is recomputed from the rule and "now" on every query, so
//! it stays correct across restarts. Malformed rules have no next run rather
//! than producing an error.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time_of_day::{hhmm_opt, on_day};

/// Repeat unit of a recurring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
}

/// How a recurring rule repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub frequency: Frequency,
    /// Repeat every `interval` units. Must be at least 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekly only: allowed weekdays, 0 = Sunday ... 6 = Saturday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    /// Monthly only: day of month (1-31), clamped to the month's length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
}

fn default_interval() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Recurrence {
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval,
            days_of_week: None,
            day_of_month: None,
        }
    }

    pub fn on_days(mut self, days: impl Into<Vec<u8>>) -> Self {
        self.days_of_week = Some(days.into());
        self
    }

    pub fn on_day_of_month(mut self, day: u32) -> Self {
        self.day_of_month = Some(day);
        self
    }

    /// # Errors
    /// Returns the first constraint that can never be satisfied.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval == 0 {
            return Err(ValidationError::invalid("interval", "must be at least 1"));
        }
        if let Some(days) = &self.days_of_week {
            if days.is_empty() {
                return Err(ValidationError::invalid("days_of_week", "must not be empty"));
            }
            if let Some(bad) = days.iter().find(|d| **d > 6) {
                return Err(ValidationError::invalid(
                    "days_of_week",
                    format!("{bad} is not a weekday (0-6)"),
                ));
            }
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(ValidationError::invalid(
                    "day_of_month",
                    format!("{day} is outside 1-31"),
                ));
            }
        }
        Ok(())
    }
}

/// One-time or recurring trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trigger {
    Once,
    Recurring { recurrence: Recurrence },
}

/// A schedule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    #[serde(flatten)]
    pub trigger: Trigger,
    pub start_date: DateTime<Utc>,
    /// Replaces the time of day of `start_date` when set.
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Total number of runs. Only honoured by [`next_run_with_count`], since
    /// the rule itself does not know how many runs have happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_count: Option<u32>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ScheduleRule {
    pub fn once(start_date: DateTime<Utc>) -> Self {
        Self {
            trigger: Trigger::Once,
            start_date,
            time: None,
            end_date: None,
            end_count: None,
            enabled: true,
        }
    }

    pub fn recurring(start_date: DateTime<Utc>, recurrence: Recurrence) -> Self {
        Self {
            trigger: Trigger::Recurring { recurrence },
            ..Self::once(start_date)
        }
    }

    pub fn at_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn until(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_end_count(mut self, count: u32) -> Self {
        self.end_count = Some(count);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// `start_date` with `time` applied: the first possible run.
    pub fn first_run(&self) -> DateTime<Utc> {
        match self.time {
            Some(time) => on_day(self.start_date.date_naive(), time),
            None => self.start_date,
        }
    }

    /// Hard validation for callers that want to surface rule errors.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Trigger::Recurring { recurrence } = &self.trigger {
            recurrence.validate()?;
        }
        if let Some(end) = self.end_date {
            if end < self.first_run() {
                return Err(ValidationError::InvalidTimeRange {
                    start: self.first_run(),
                    end,
                });
            }
        }
        Ok(())
    }
}

/// The next run strictly after `now`, or `None` if there is none.
///
/// `end_count` is ignored; see [`next_run_with_count`].
pub fn next_run(rule: &ScheduleRule, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !rule.enabled {
        return None;
    }

    let first = rule.first_run();
    let candidate = match &rule.trigger {
        Trigger::Once => (first > now).then_some(first)?,
        Trigger::Recurring { recurrence } => {
            if let Err(e) = recurrence.validate() {
                tracing::debug!(error = %e, "malformed recurrence; no next run");
                return None;
            }
            if first > now {
                first
            } else {
                next_recurring(first, recurrence, now)?
            }
        }
    };

    match rule.end_date {
        Some(end) if candidate > end => None,
        _ => Some(candidate),
    }
}

/// Like [`next_run`], but also stops once `completed_runs` reaches the rule's
/// `end_count`. The caller owns the run counter.
pub fn next_run_with_count(
    rule: &ScheduleRule,
    now: DateTime<Utc>,
    completed_runs: u32,
) -> Option<DateTime<Utc>> {
    match rule.end_count {
        Some(limit) if completed_runs >= limit => None,
        _ => next_run(rule, now),
    }
}

/// Up to `limit` future runs after `now`, assuming `completed_runs` have
/// already happened.
pub fn upcoming_runs(
    rule: &ScheduleRule,
    now: DateTime<Utc>,
    completed_runs: u32,
    limit: usize,
) -> Vec<DateTime<Utc>> {
    let mut runs = Vec::with_capacity(limit.min(64));
    let mut cursor = now;
    let mut done = completed_runs;
    while runs.len() < limit {
        let Some(next) = next_run_with_count(rule, cursor, done) else {
            break;
        };
        runs.push(next);
        cursor = next;
        done = done.saturating_add(1);
    }
    runs
}

/// First occurrence after `now`, given that `first <= now`.
fn next_recurring(
    first: DateTime<Utc>,
    recurrence: &Recurrence,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let interval = i64::from(recurrence.interval);
    match recurrence.frequency {
        Frequency::Hourly => step_past(first, Duration::hours(interval), now),
        Frequency::Daily => step_past(first, Duration::days(interval), now),
        Frequency::Weekly => match &recurrence.days_of_week {
            Some(days) => next_weekday_match(first, days, interval, now),
            None => step_past(first, Duration::weeks(interval), now),
        },
        Frequency::Monthly => next_monthly(first, recurrence.day_of_month, interval, now),
    }
}

/// `first + k * unit` for the smallest `k >= 1` landing after `now`.
fn step_past(first: DateTime<Utc>, unit: Duration, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let unit_secs = unit.num_seconds();
    if unit_secs <= 0 {
        return None;
    }
    let elapsed = (now - first).num_seconds().max(0);
    let steps = elapsed / unit_secs + 1;
    first.checked_add_signed(Duration::seconds(steps.checked_mul(unit_secs)?))
}

/// Next allowed weekday in an active week.
///
/// Weeks start on Sunday and are counted from the week containing `first`;
/// only every `interval`-th week is active. The search jumps straight to the
/// active week containing (or following) `now` and looks at no more than
/// that week and the next active one.
fn next_weekday_match(
    first: DateTime<Utc>,
    days: &[u8],
    interval: i64,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let time = first.time();
    let first_day = first.date_naive();
    let week_anchor =
        first_day - Duration::days(i64::from(first_day.weekday().num_days_from_sunday()));
    let scan_from = first_day.max(now.date_naive());

    let weeks_elapsed = (scan_from - week_anchor).num_days() / 7;
    let active_week = if weeks_elapsed % interval == 0 {
        weeks_elapsed
    } else {
        (weeks_elapsed / interval + 1).checked_mul(interval)?
    };

    for week in [active_week, active_week.checked_add(interval)?] {
        let week_start = week_anchor.checked_add_signed(Duration::try_days(week.checked_mul(7)?)?)?;
        for offset in 0..7 {
            let day = week_start.checked_add_signed(Duration::days(offset))?;
            if day < scan_from {
                continue;
            }
            let weekday = day.weekday().num_days_from_sunday() as u8;
            if !days.contains(&weekday) {
                continue;
            }
            let candidate = on_day(day, time);
            if candidate > now && candidate >= first {
                return Some(candidate);
            }
        }
    }

    tracing::debug!(?days, "no matching weekday found; no next run");
    None
}

/// Jump whole `interval`-month steps from `first` until past `now`, pinning
/// the day of month (clamped to the month's length).
fn next_monthly(
    first: DateTime<Utc>,
    day_of_month: Option<u32>,
    interval: i64,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let target_day = day_of_month.unwrap_or_else(|| first.day());
    let first_month = i64::from(first.year()) * 12 + i64::from(first.month0());
    let now_month = i64::from(now.year()) * 12 + i64::from(now.month0());
    let mut step = ((now_month - first_month) / interval).max(1);

    loop {
        let candidate = month_candidate(first_month + step * interval, target_day, first.time())?;
        if candidate > now {
            return Some(candidate);
        }
        step += 1;
    }
}

fn month_candidate(month_index: i64, day: u32, time: NaiveTime) -> Option<DateTime<Utc>> {
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
    let clamped = day.min(days_in_month(year, month)?);
    Some(on_day(NaiveDate::from_ymd_opt(year, month, clamped)?, time))
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}

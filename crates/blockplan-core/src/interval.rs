//! Closed-open time spans and the sweep primitives built on them.
//!
//! Every other scheduling stage works in terms of [`Interval`]: the busy set
//! is a merged list of intervals, free slots are what remains after
//! subtracting it from the working-hours window, and generated blocks are
//! intervals placed inside those slots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A time span `[start, end)` with `start < end`.
///
/// Values never change after construction; arithmetic returns new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for Interval {
    type Error = ValidationError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Interval::try_new(raw.start, raw.end)
    }
}

impl Interval {
    /// Create an interval, or `None` when `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Create an interval, returning a Result
    ///
    /// # Errors
    /// Returns an error if `end <= start`
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ValidationError> {
        Self::new(start, end).ok_or(ValidationError::InvalidTimeRange { start, end })
    }

    /// Create an interval of the given length starting at `start`.
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Option<Self> {
        Self::new(start, start + length)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// True iff the two spans share at least one instant.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True iff `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// True iff `other` lies entirely within this interval.
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Intersection of two intervals, if non-empty.
    pub fn clip(&self, window: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(window.start), self.end.min(window.end))
    }
}

/// Anything that occupies a span of time.
///
/// Returns `None` for records whose times are malformed (zero-length or
/// inverted), which callers skip rather than reject.
pub trait Span {
    fn span(&self) -> Option<Interval>;
}

impl Span for Interval {
    fn span(&self) -> Option<Interval> {
        Some(*self)
    }
}

/// Sort by start and coalesce overlapping or touching intervals.
///
/// The result is sorted and pairwise disjoint; `merge(merge(xs)) == merge(xs)`.
pub fn merge(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for next in sorted {
        match merged.last_mut() {
            Some(current) if next.start <= current.end => {
                current.end = current.end.max(next.end);
            }
            _ => merged.push(next),
        }
    }
    merged
}

/// Remove `busy` from `window`, returning the gaps of at least `min_duration`
/// in chronological order.
///
/// `busy` need not be sorted or disjoint; it is merged first. Busy spans that
/// fall partly outside the window only count for the part inside it.
pub fn subtract(window: Interval, busy: &[Interval], min_duration: Duration) -> Vec<Interval> {
    let mut free = Vec::new();
    let mut push_gap = |start: DateTime<Utc>, end: DateTime<Utc>| {
        if let Some(gap) = Interval::new(start, end) {
            if gap.duration() >= min_duration {
                free.push(gap);
            }
        }
    };

    let mut cursor = window.start;
    for b in merge(busy) {
        if b.end <= cursor {
            continue;
        }
        if b.start >= window.end {
            break;
        }
        if b.start > cursor {
            push_gap(cursor, b.start);
        }
        cursor = cursor.max(b.end);
        if cursor >= window.end {
            break;
        }
    }

    if cursor < window.end {
        push_gap(cursor, window.end);
    }

    free
}

//! Double-booking detection.
//!
//! Time is cut into fixed ticks counted from the Unix epoch, at millisecond
//! precision. Each item marks
//! every tick it touches; ticks marked more than once are reported together
//! with the items that share them. Nothing is resolved here.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::interval::Span;

/// Default tick width.
pub const TICK_MINUTES: i64 = 15;

/// One tick shared by two or more items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict<T> {
    pub tick_index: i64,
    pub at: DateTime<Utc>,
    pub items: Vec<T>,
}

/// Report conflicting ticks using the default 15 minute width.
pub fn detect_conflicts<T: Span + Clone>(items: &[T]) -> Vec<Conflict<T>> {
    detect_conflicts_with_tick(items, Duration::minutes(TICK_MINUTES))
}

/// Report every tick of width `tick` covered by more than one item, ordered
/// by tick. Items without a valid span are ignored, as is a non-positive
/// tick width.
///
/// An item covers ticks `floor(start / tick) ..= ceil(end / tick) - 1`.
pub fn detect_conflicts_with_tick<T: Span + Clone>(items: &[T], tick: Duration) -> Vec<Conflict<T>> {
    let tick_ms = tick.num_milliseconds();
    if tick_ms <= 0 {
        tracing::debug!(?tick, "non-positive tick width; no conflicts reported");
        return Vec::new();
    }

    let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, item) in items.iter().enumerate() {
        let Some(span) = item.span() else {
            continue;
        };
        let first = span.start().timestamp_millis().div_euclid(tick_ms);
        let last = ceil_div(span.end().timestamp_millis(), tick_ms) - 1;
        for tick_index in first..=last {
            buckets.entry(tick_index).or_default().push(idx);
        }
    }

    buckets
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .filter_map(|(tick_index, members)| {
            let at = DateTime::from_timestamp_millis(tick_index.checked_mul(tick_ms)?)?;
            Some(Conflict {
                tick_index,
                at,
                items: members.into_iter().map(|i| items[i].clone()).collect(),
            })
        })
        .collect()
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let q = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        q
    } else {
        q + 1
    }
}

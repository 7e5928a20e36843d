//! Schedule types shared across the pipeline: task and event snapshots coming
//! in, busy/free spans in the middle, generated focus blocks going out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::{Interval, Span};

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lower first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// The subset of a task the scheduler needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub cancelled: bool,
}

impl TaskRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority,
            due_date: None,
            completed: false,
            cancelled: false,
        }
    }

    /// Set due date
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Only open tasks can be scheduled.
    pub fn is_open(&self) -> bool {
        !self.completed && !self.cancelled
    }
}

/// An existing calendar commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a new calendar event
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
        }
    }
}

impl Span for CalendarEvent {
    /// `None` for zero-length or inverted events.
    fn span(&self) -> Option<Interval> {
        Interval::new(self.start_time, self.end_time)
    }
}

/// An occupied span of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub interval: Interval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl BusyInterval {
    pub fn new(interval: Interval, label: Option<String>) -> Self {
        Self { interval, label }
    }
}

impl Span for BusyInterval {
    fn span(&self) -> Option<Interval> {
        Some(self.interval)
    }
}

/// An available span within working hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub interval: Interval,
}

impl FreeSlot {
    pub fn new(interval: Interval) -> Self {
        Self { interval }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.interval.start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.interval.end()
    }
}

impl Span for FreeSlot {
    fn span(&self) -> Option<Interval> {
        Some(self.interval)
    }
}

/// A generated focus block.
///
/// Blocks are never edited in place; callers that move a block drop it and
/// create a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub title: String,
    pub interval: Interval,
    pub task_ids: Vec<String>,
}

impl TimeBlock {
    /// Create the block for `task` over `interval`.
    ///
    /// The id is a UUID v5 of the task id and block start, so the same input
    /// always yields the same block ids.
    pub fn for_task(task: &TaskRef, interval: Interval) -> Self {
        let key = format!("{}@{}", task.id, interval.start().to_rfc3339());
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string(),
            title: format!("Focus: {}", task.title),
            interval,
            task_ids: vec![task.id.clone()],
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.interval.duration_minutes()
    }
}

impl Span for TimeBlock {
    fn span(&self) -> Option<Interval> {
        Some(self.interval)
    }
}

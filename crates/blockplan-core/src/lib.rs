//! # Blockplan Core Library
//!
//! This library provides the scheduling engine behind Blockplan: it turns a
//! day's calendar and a task list into non-overlapping focus blocks, and
//! computes when automation schedules should next run. A standalone CLI
//! binary drives the same library from JSON files.
//!
//! ## Architecture
//!
//! Every component is a pure, synchronous function of its inputs. Callers
//! pass in snapshots of tasks, events, and rules and get new values back;
//! persistence and trigger firing stay with the caller.
//!
//! - **Interval model**: closed-open spans with merge and subtract sweeps
//! - **Scheduler**: busy set, free slots, task selection, block allocation
//! - **Conflict detection**: fixed-tick double-booking reports
//! - **Recurrence**: next-run calculation for one-time and recurring rules
//! - **Storage**: TOML-based preferences
//!
//! ## Key Components
//!
//! - [`AutoScheduler`]: End-to-end focus block planning
//! - [`next_run`]: Next run of a [`ScheduleRule`]
//! - [`detect_conflicts`]: Double-booking detection
//! - [`Config`]: Application configuration management

pub mod conflict;
pub mod error;
pub mod interval;
pub mod preferences;
pub mod recurrence;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod time_of_day;

pub use conflict::{detect_conflicts, detect_conflicts_with_tick, Conflict, TICK_MINUTES};
pub use error::{ConfigError, CoreError, ValidationError};
pub use interval::{merge, subtract, Interval, Span};
pub use preferences::{LunchPolicy, SchedulingPreferences};
pub use recurrence::{
    next_run, next_run_with_count, upcoming_runs, Frequency, Recurrence, ScheduleRule, Trigger,
};
pub use schedule::{BusyInterval, CalendarEvent, FreeSlot, Priority, TaskRef, TimeBlock};
pub use scheduler::{AutoScheduler, DayPlan, PlanInput};
pub use storage::Config;

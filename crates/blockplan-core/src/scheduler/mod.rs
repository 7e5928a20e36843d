//! Automatic scheduler for focus blocks.
//!
//! This module turns a day's calendar and a task list into focus blocks:
//! - Builds the merged busy set from calendar events and the lunch policy
//! - Finds free slots of at least 30 minutes inside working hours
//! - Selects and orders tasks by priority and due date
//! - Scales block and break lengths to the configured energy level
//! - Greedily places one block per task, with a break after each block
//!
//! Every stage is a pure function of its inputs. Days are independent, so a
//! range can be planned in any order (or in parallel) with the same result.

mod allocator;
mod busy;
mod selector;
mod slots;

pub use allocator::allocate_blocks;
pub use busy::{build_busy_set, day_bounds};
pub use selector::{adjust_for_energy, select_tasks, DUE_HORIZON_HOURS};
pub use slots::{find_free_slots, working_window, MIN_SLOT_MINUTES};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::preferences::SchedulingPreferences;
use crate::schedule::{BusyInterval, CalendarEvent, FreeSlot, TaskRef, TimeBlock};

/// Everything computed for one day, in pipeline order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: NaiveDate,
    pub busy: Vec<BusyInterval>,
    pub free_slots: Vec<FreeSlot>,
    pub blocks: Vec<TimeBlock>,
}

/// Inputs that stay the same for every day of a run.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    pub events: &'a [CalendarEvent],
    pub tasks: &'a [TaskRef],
    /// Restrict scheduling to these task ids.
    pub task_ids: Option<&'a [String]>,
    pub now: DateTime<Utc>,
}

/// Automatic scheduler for focus blocks
#[derive(Debug, Clone, Default)]
pub struct AutoScheduler {
    prefs: SchedulingPreferences,
}

impl AutoScheduler {
    /// Create a new scheduler with default preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom preferences
    pub fn with_preferences(prefs: SchedulingPreferences) -> Self {
        Self { prefs }
    }

    pub fn preferences(&self) -> &SchedulingPreferences {
        &self.prefs
    }

    /// The preferences after energy adjustment, as used for allocation.
    pub fn effective_preferences(&self) -> SchedulingPreferences {
        adjust_for_energy(&self.prefs, self.prefs.energy_level)
    }

    /// Run the full pipeline for one day.
    pub fn plan_day(&self, day: NaiveDate, input: &PlanInput<'_>) -> DayPlan {
        let effective = self.effective_preferences();

        let busy = build_busy_set(day, input.events, &effective);
        let free_slots = find_free_slots(day, &busy, &effective);
        let tasks = select_tasks(input.tasks, input.task_ids, input.now);
        tracing::debug!(
            %day,
            busy = busy.len(),
            free_slots = free_slots.len(),
            tasks = tasks.len(),
            focus_minutes = effective.focus_block_minutes,
            break_minutes = effective.break_minutes,
            "planning day"
        );

        let blocks = allocate_blocks(&free_slots, &tasks, &effective);

        DayPlan {
            day,
            busy,
            free_slots,
            blocks,
        }
    }

    /// Generate focus blocks for a specific day
    pub fn generate_schedule(&self, day: NaiveDate, input: &PlanInput<'_>) -> Vec<TimeBlock> {
        self.plan_day(day, input).blocks
    }

    /// Plan every day in `from..=to`, in day order.
    ///
    /// Each day is planned on its own from the same task snapshot, so a task
    /// may receive a block on several days. A reversed range is empty.
    pub fn plan_range(&self, from: NaiveDate, to: NaiveDate, input: &PlanInput<'_>) -> Vec<DayPlan> {
        if from > to {
            tracing::debug!(%from, %to, "reversed date range; nothing to plan");
            return Vec::new();
        }
        from.iter_days()
            .take_while(|day| *day <= to)
            .map(|day| self.plan_day(day, input))
            .collect()
    }

    /// Generate focus blocks for every day in `from..=to`.
    pub fn generate_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        input: &PlanInput<'_>,
    ) -> Vec<TimeBlock> {
        self.plan_range(from, to, input)
            .into_iter()
            .flat_map(|plan| plan.blocks)
            .collect()
    }
}

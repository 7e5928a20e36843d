//! Focus block planning over a JSON snapshot of events and tasks.

use std::path::PathBuf;

use chrono::Days;
use clap::Args;
use serde::Deserialize;

use blockplan_core::scheduler::{build_busy_set, find_free_slots};
use blockplan_core::{AutoScheduler, CalendarEvent, Config, PlanInput, TaskRef, ValidationError};

use super::{parse_day, parse_now, print_json, read_json, CmdResult};

/// Input file: `{ "events": [...], "tasks": [...], "task_ids": [...] }`.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    events: Vec<CalendarEvent>,
    #[serde(default)]
    tasks: Vec<TaskRef>,
    #[serde(default)]
    task_ids: Option<Vec<String>>,
}

#[derive(Args)]
pub struct PlanArgs {
    /// JSON file with events and tasks
    #[arg(long)]
    input: PathBuf,
    /// First day to plan (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<String>,
    /// Number of days to plan
    #[arg(long, default_value_t = 1)]
    days: u32,
    /// Reference time for due-date selection (RFC 3339, default now)
    #[arg(long)]
    now: Option<String>,
    /// Print the busy set and free slots along with the blocks
    #[arg(long)]
    verbose: bool,
}

#[derive(Args)]
pub struct SlotsArgs {
    /// JSON file with events
    #[arg(long)]
    input: PathBuf,
    /// Day to inspect (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<String>,
}

pub fn run_plan(args: PlanArgs) -> CmdResult {
    let snapshot: Snapshot = read_json(&args.input)?;
    let now = parse_now(args.now.as_deref())?;
    let from = parse_day(args.date.as_deref(), now)?;
    let to = from
        .checked_add_days(Days::new(u64::from(args.days.max(1) - 1)))
        .ok_or_else(|| ValidationError::invalid("days", "date range out of bounds"))?;

    let prefs = Config::load_or_default().preferences();
    if let Err(e) = prefs.validate() {
        tracing::warn!(error = %e, "configured preferences are invalid; the plan may be empty");
    }
    let scheduler = AutoScheduler::with_preferences(prefs);
    let input = PlanInput {
        events: &snapshot.events,
        tasks: &snapshot.tasks,
        task_ids: snapshot.task_ids.as_deref(),
        now,
    };

    if args.verbose {
        print_json(&scheduler.plan_range(from, to, &input))
    } else {
        print_json(&scheduler.generate_range(from, to, &input))
    }
}

pub fn run_slots(args: SlotsArgs) -> CmdResult {
    let snapshot: Snapshot = read_json(&args.input)?;
    let day = parse_day(args.date.as_deref(), parse_now(None)?)?;

    let scheduler = AutoScheduler::with_preferences(Config::load_or_default().preferences());
    let prefs = scheduler.effective_preferences();
    let busy = build_busy_set(day, &snapshot.events, &prefs);
    print_json(&find_free_slots(day, &busy, &prefs))
}

//! Double-booking report for a list of events.

use std::path::PathBuf;

use clap::Args;

use blockplan_core::{detect_conflicts_with_tick, CalendarEvent, ValidationError};

use super::{print_json, read_json, CmdResult};

#[derive(Args)]
pub struct ConflictsArgs {
    /// JSON file containing an array of events
    #[arg(long)]
    input: PathBuf,
    /// Tick width in minutes
    #[arg(long, default_value_t = blockplan_core::TICK_MINUTES)]
    tick: i64,
}

pub fn run(args: ConflictsArgs) -> CmdResult {
    let events: Vec<CalendarEvent> = read_json(&args.input)?;
    let tick = chrono::Duration::try_minutes(args.tick)
        .filter(|tick| *tick > chrono::Duration::zero())
        .ok_or_else(|| {
            ValidationError::invalid("tick", format!("{} minutes is not a usable tick width", args.tick))
        })?;
    let conflicts = detect_conflicts_with_tick(&events, tick);
    print_json(&conflicts)
}

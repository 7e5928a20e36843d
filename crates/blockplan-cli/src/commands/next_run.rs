//! Next-run queries for schedule rules.

use std::path::PathBuf;

use clap::Args;

use blockplan_core::{next_run_with_count, upcoming_runs, ScheduleRule};

use super::{parse_now, print_json, read_json, CmdResult};

#[derive(Args)]
pub struct NextRunArgs {
    /// JSON file containing one schedule rule
    #[arg(long)]
    rule: PathBuf,
    /// Reference time (RFC 3339, default now)
    #[arg(long)]
    now: Option<String>,
    /// Runs already completed, for rules with an end count
    #[arg(long, default_value_t = 0)]
    runs: u32,
    /// List this many upcoming runs instead of just the next one
    #[arg(long)]
    count: Option<usize>,
    /// Fail instead of printing null when the rule is malformed
    #[arg(long)]
    strict: bool,
}

pub fn run(args: NextRunArgs) -> CmdResult {
    let rule: ScheduleRule = read_json(&args.rule)?;
    if args.strict {
        rule.validate()?;
    }
    let now = parse_now(args.now.as_deref())?;

    match args.count {
        Some(count) => print_json(&upcoming_runs(&rule, now, args.runs, count)),
        None => print_json(&next_run_with_count(&rule, now, args.runs)),
    }
}

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "blockplan-cli", version, about = "Blockplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate focus blocks for one or more days
    Plan(commands::plan::PlanArgs),
    /// Show the free slots of a day
    Slots(commands::plan::SlotsArgs),
    /// Report double-booked time in a list of events
    Conflicts(commands::conflicts::ConflictsArgs),
    /// Compute the next run of a schedule rule
    NextRun(commands::next_run::NextRunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::Slots(args) => commands::plan::run_slots(args),
        Commands::Conflicts(args) => commands::conflicts::run(args),
        Commands::NextRun(args) => commands::next_run::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "routinely-cli", version, about = "Routinely CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file: build the store, feed events, show results
    Simulate {
        /// Scenario TOML file (todos, routines, events)
        scenario: PathBuf,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
        /// Append a clock tick for the current local minute
        #[arg(long)]
        tick_now: bool,
    },
    /// Validate the routine drafts in a TOML file
    Validate {
        /// File with [[routines]] drafts (scenario files work too)
        file: PathBuf,
    },
    /// Refine a todo item's text through the configured AI endpoint
    Refine {
        /// The todo text to refine
        text: String,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Simulate {
            scenario,
            json,
            tick_now,
        } => commands::simulate::run(&scenario, json, tick_now),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Refine { text, json } => commands::refine::run(&text, json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

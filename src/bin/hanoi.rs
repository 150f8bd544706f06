//! Hanoi CLI - tabular Q-learning toolkit for the Tower of Hanoi
//!
//! This CLI provides a unified interface for:
//! - Training a Q-learning agent on the puzzle
//! - Evaluating the greedy policy of a saved Q-table
//! - Inspecting a saved Q-table as a text heatmap
//! - Exporting Q-tables for further analysis

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hanoi")]
#[command(version, about = "Tabular Q-learning solver for the Tower of Hanoi", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-learning agent and save the Q-table
    Train(hanoi_rl::cli::commands::train::TrainArgs),

    /// Run the greedy policy derived from a saved Q-table
    Evaluate(hanoi_rl::cli::commands::evaluate::EvaluateArgs),

    /// Summarize a saved Q-table as a text heatmap
    Inspect(hanoi_rl::cli::commands::inspect::InspectArgs),

    /// Export a saved Q-table to CSV
    Export(hanoi_rl::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => hanoi_rl::cli::commands::train::execute(args),
        Commands::Evaluate(args) => hanoi_rl::cli::commands::evaluate::execute(args),
        Commands::Inspect(args) => hanoi_rl::cli::commands::inspect::execute(args),
        Commands::Export(args) => hanoi_rl::cli::commands::export::execute(args),
    }
}

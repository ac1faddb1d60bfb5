//! Hexapawn CLI - Self-play simulation with matchbox-style learning
//!
//! This CLI provides:
//! - Batch training over many episodes with a summary of what was learned
//! - Turn-by-turn viewing of episodes as the weights evolve

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexapawn")]
#[command(version, about = "Hexapawn self-play with reinforcement of visited states", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate many episodes and report what was learned
    Train(hexapawn::cli::commands::train::TrainArgs),

    /// Watch episodes turn by turn
    Watch(hexapawn::cli::commands::watch::WatchArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hexapawn=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => hexapawn::cli::commands::train::execute(args),
        Commands::Watch(args) => hexapawn::cli::commands::watch::execute(args),
    }
}

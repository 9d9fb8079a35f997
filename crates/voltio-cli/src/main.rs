//! voltio - command-line front end for the synthesizer control plane.

mod commands;
mod sim;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "voltio")]
#[command(author, version, about = "Voltio synthesizer control plane CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a control frame log against a simulated register bus
    Replay(commands::replay::ReplayArgs),

    /// Encode a single parameter to its hardware register word
    Encode(commands::encode::EncodeArgs),

    /// Inspect, generate, and check patch files
    Patch(commands::patch::PatchArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Encode(args) => commands::encode::run(&args),
        Commands::Patch(args) => commands::patch::run(args),
    }
}

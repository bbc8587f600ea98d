//! Crunch CLI - command-line host for the crunch distortion processor.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crunch")]
#[command(author, version, about = "Crunch distortion host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List parameters with their ranges, defaults and current values
    Params(commands::params::ParamsArgs),

    /// Process a WAV file through the distortion
    Process(commands::process::ProcessArgs),

    /// Print or save a parameter state snapshot
    State(commands::state::StateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Process(args) => commands::process::run(args),
        Commands::State(args) => commands::state::run(args),
    }
}

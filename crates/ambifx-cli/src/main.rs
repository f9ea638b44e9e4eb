//! ambifx CLI - Command-line interface for the ambifx effect engine.

mod commands;
mod engine;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ambifx")]
#[command(author, version, about = "ambifx effect engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available effects and their parameters
    Effects(commands::effects::EffectsArgs),

    /// List backends and their devices
    Devices(commands::devices::DevicesArgs),

    /// Render audio through effect slots to a WAV file
    Render(commands::render::RenderArgs),

    /// Run effect slots on an output backend
    Run(commands::run::RunArgs),

    /// Create or check engine configuration files
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Effects(args) => commands::effects::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}

//! Development tasks for the entity property engine
//!
//! This binary provides content inspection utilities using the cargo-xtask
//! pattern. Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Bind, Chain};

/// Development tasks for entity content
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Content inspection tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print a class override chain and its raw assignments
    Chain(Chain),

    /// Bind a class (and optionally an instance) and print every property
    Bind(Bind),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Chain(cmd) => cmd.execute(),
        Command::Bind(cmd) => cmd.execute(),
    }
}

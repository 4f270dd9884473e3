mod commands;
mod harness;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{CheckCommand, TestCommand};

/// Reroute CLI - Redirect rule testing and validation tool
#[derive(Debug, Parser)]
#[command(
    name = "reroute",
    version,
    about = "Redirect rule testing and validation tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Execute redirect scenarios
    Test(TestCommand),
    /// Validate a redirect rules config
    Check(CheckCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Test(cmd) => cmd.execute()?,
        Commands::Check(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}

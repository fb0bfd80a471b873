// crates/learnsync-cli/src/main.rs
//
// CLI entrypoint for LearnSync. Every subcommand is a JSON-RPC call to a
// running learnsync-daemon.

mod commands;
mod output;
mod rpc_client;

use clap::{Parser, Subcommand};
use commands::add::AddCmd;
use commands::path::PathCmd;
use commands::sections::SectionsCmd;

/// LearnSync CLI: collect learning resources and view ordered learning paths.
#[derive(Parser, Debug)]
#[command(name = "learnsync", version, about = "LearnSync developer CLI")]
struct Cli {
    /// RPC endpoint of the learnsync-daemon.
    #[arg(long, global = true, default_value = "http://localhost:50061")]
    rpc: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a resource URL to a section (created if missing).
    Add(AddCmd),

    /// Show a section's learning path.
    Path(PathCmd),

    /// List sections with resource counts.
    Sections(SectionsCmd),

    /// Display daemon health.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Add(cmd) => commands::add::run(cmd, &cli.rpc).await?,
        Commands::Path(cmd) => commands::path::run(cmd, &cli.rpc).await?,
        Commands::Sections(cmd) => commands::sections::run(cmd, &cli.rpc).await?,
        Commands::Status => commands::status::run(&cli.rpc).await?,
    }

    Ok(())
}

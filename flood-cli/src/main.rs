//! Flood outlook CLI - compute outlook tabs from flood forecast documents.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "flood-cli",
    version,
    about = "Five-day flood outlook toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: flood_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting flood-cli");
    flood_cmd::run(cli.command).await
}

mod cli;
mod client;
mod config;
mod interview;
mod plan;
mod profile;
mod prompt;
mod storage;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = config::Config::load()?;
    cli.run(config).await
}

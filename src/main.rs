mod check;
mod config;
mod db;
mod entities;
mod error;
mod load;
mod models;
mod omdb;
mod pipeline;
mod report;
mod source;
mod transform;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "cinesink")]
#[command(about = "MovieLens ratings ETL with OMDb metadata enrichment")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full extract-transform-load pipeline
    Run,
    /// Print analytics queries against a loaded database
    Report,
    /// Verify source files, store access and the OMDb API key
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,cinesink=debug".to_string()),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => {
            pipeline::run(&config).await?;
        },
        Command::Report => report::run(&config).await?,
        Command::Check => check::run(&config).await?,
    }

    Ok(())
}

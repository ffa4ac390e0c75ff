//! layergen CLI tool

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use layergen_cli_lib::{Cli, GenerateCommand};

#[tokio::main]
async fn main() -> Result<()> {
    layergen::observability::init().context("Failed to initialize logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");

    GenerateCommand::from_cli(&cli).execute().await
}

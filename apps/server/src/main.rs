//! Vibesite: a portfolio page built from GitHub READMEs.
//!
//! Serves a single page that lists projects (each README's `## Overview`)
//! and an about-me section from the profile README.

mod commands;
mod routes;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let env_file = commands::load_env_file(&cli.env_file);
    commands::init_tracing(&cli);
    commands::report_env_file(&cli.env_file, env_file);
    commands::run(cli).await
}

//! credsync CLI - reconcile Apple and Google password exports
//!
//! Merges two exports into a session file, then lets conflicts be reviewed,
//! resolved and exported across invocations.

mod cli;
mod cli_config;
mod commands;
mod error;
mod pipeline;
mod session_store;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::common::{load_config, resolve_session_path};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::conflicts::run_conflicts;
use crate::commands::export::run_export;
use crate::commands::merge::run_merge;
use crate::commands::resolve::run_resolve;
use crate::commands::stats::run_stats;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("credsync=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            apple,
            google,
            direction,
        } => {
            let config = load_config()?;
            let direction = config
                .resolve_direction(direction.map(Into::into))
                .map_err(CliError::Config)?;
            let session_path = resolve_session_path(&config, cli.session)?;
            run_merge(&apple, &google, direction, &session_path).await?;
        }
        Commands::Conflicts { all, reveal, json } => {
            let session_path = resolve_session_path(&load_config()?, cli.session)?;
            run_conflicts(all, reveal, json, &session_path).await?;
        }
        Commands::Resolve {
            side,
            conflict_ids,
            all,
        } => {
            let session_path = resolve_session_path(&load_config()?, cli.session)?;
            run_resolve(side.into(), &conflict_ids, all, &session_path).await?;
        }
        Commands::Stats { json } => {
            let session_path = resolve_session_path(&load_config()?, cli.session)?;
            run_stats(json, &session_path).await?;
        }
        Commands::Export { format, output } => {
            let config = load_config()?;
            let format = config.resolve_export_format(format.map(Into::into));
            let session_path = resolve_session_path(&config, cli.session)?;
            run_export(format, output.as_deref(), &session_path).await?;
        }
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref()).await?;
        }
        Commands::Config { command } => run_config(command, cli.session)?,
    }

    Ok(())
}

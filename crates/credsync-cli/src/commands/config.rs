use std::path::PathBuf;

use credsync_core::export::ExportFormat;
use credsync_core::MergeDirection;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::cli_config::{default_config_path, CliConfig};
use crate::commands::common::load_config;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub config_path: PathBuf,
    pub stored: CliConfig,
    pub effective_direction: MergeDirection,
    pub effective_export_format: ExportFormat,
    pub effective_session_path: PathBuf,
}

pub fn run_config(command: ConfigCommands, session_flag: Option<PathBuf>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Set {
            direction,
            export_format,
            session_path,
            reset,
        } => {
            let config = apply_config_update(
                load_config()?,
                direction.map(Into::into),
                export_format.map(Into::into),
                session_path,
                reset,
            )?;
            let path = config.save().map_err(CliError::Config)?;
            println!("Saved defaults to {}", path.display());
            Ok(())
        }
        ConfigCommands::Show { json } => run_config_show(json, session_flag),
    }
}

/// Apply `config set` arguments to a loaded config.
pub fn apply_config_update(
    mut config: CliConfig,
    direction: Option<MergeDirection>,
    export_format: Option<ExportFormat>,
    session_path: Option<PathBuf>,
    reset: bool,
) -> Result<CliConfig, CliError> {
    if reset {
        return Ok(CliConfig {
            version: config.version,
            ..CliConfig::default()
        });
    }
    if direction.is_none() && export_format.is_none() && session_path.is_none() {
        return Err(CliError::Config(
            "nothing to set; pass --direction, --export-format, --session-path or --reset"
                .to_string(),
        ));
    }

    if direction.is_some() {
        config.default_direction = direction;
    }
    if export_format.is_some() {
        config.default_export_format = export_format;
    }
    if session_path.is_some() {
        config.session_path = session_path;
    }
    Ok(config)
}

fn run_config_show(as_json: bool, session_flag: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config()?;
    let view = ConfigView {
        config_path: default_config_path().map_err(CliError::Config)?,
        effective_direction: config.resolve_direction(None).map_err(CliError::Config)?,
        effective_export_format: config.resolve_export_format(None),
        effective_session_path: config
            .resolve_session_path(session_flag)
            .map_err(CliError::Config)?,
        stored: config,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Config file:     {}", view.config_path.display());
    println!(
        "Direction:       {}{}",
        view.effective_direction,
        stored_marker(view.stored.default_direction.is_some())
    );
    println!(
        "Export format:   {}{}",
        view.effective_export_format,
        stored_marker(view.stored.default_export_format.is_some())
    );
    println!(
        "Session file:    {}{}",
        view.effective_session_path.display(),
        stored_marker(view.stored.session_path.is_some())
    );
    Ok(())
}

const fn stored_marker(stored: bool) -> &'static str {
    if stored {
        ""
    } else {
        " (not in config)"
    }
}

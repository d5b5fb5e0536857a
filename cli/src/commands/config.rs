//! `wspoll config`: show and set configuration values.

use anyhow::Result;
use clap::Subcommand;
use std::process::ExitCode;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, environment and flags)
    Show,
    /// Print the configuration file path
    Path,
    /// Set a value in the configuration file
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or the key or
/// value is rejected.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Path => {
            let path = app.config_store.path()?;
            app.renderer().render_path(&path.display().to_string())?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let path = app.config_store.path()?;
    app.renderer()
        .render_config(&app.config, &path.display().to_string())?;
    Ok(ExitCode::SUCCESS)
}

/// Writes to the file only; environment overrides are not persisted.
fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    let mut config = app.config_store.load()?;
    config.set(key, value)?;
    app.config_store.save(&config)?;

    let shown = if key == "password" { "********" } else { value };
    app.output.success(&format!("Set {key} = {shown}"));
    Ok(ExitCode::SUCCESS)
}

//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::validate_config_value;
use crate::infra::config::{YamlConfigStore, load_config};

/// Bounded-retry poller for cloud IDE workspace lifecycles
#[derive(Parser)]
#[command(
    name = "wspoll",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log every request and poll attempt to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Configuration file (default: ~/.wspoll/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// IDE server base URL, overriding the configuration
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Wait until a workspace reports a status
    WaitStatus(commands::wait::WaitStatusArgs),

    /// Wait until a plugin appears in a workspace runtime
    WaitPlugin(commands::wait::WaitPluginArgs),

    /// List workspace ids
    List(commands::list::ListArgs),

    /// Stop a workspace runtime
    Stop(commands::stop::StopArgs),

    /// Remove a stopped workspace
    Remove(commands::remove::RemoveArgs),

    /// Stop and remove every workspace
    CleanUp(commands::cleanup::CleanUpArgs),

    /// Create a workspace from a devfile
    Create(commands::create::CreateArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            config,
            base_url,
            command,
        } = self;

        let store = config.map(YamlConfigStore::with_path).unwrap_or_default();
        let mut cfg = load_config(&store, std::env::vars())?;
        if let Some(url) = base_url {
            validate_config_value("base_url", &url)?;
            cfg.base_url = url.trim_end_matches('/').to_string();
        }

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        };
        let app = AppContext::new(&flags, store, cfg);

        match command {
            Command::WaitStatus(args) => commands::wait::status(&app, &args).await,
            Command::WaitPlugin(args) => commands::wait::plugin(&app, &args).await,
            Command::List(args) => commands::list::run(&app, &args).await,
            Command::Stop(args) => commands::stop::run(&app, &args).await,
            Command::Remove(args) => commands::remove::run(&app, &args).await,
            Command::CleanUp(args) => commands::cleanup::run(&app, &args).await,
            Command::Create(args) => commands::create::run(&app, &args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}

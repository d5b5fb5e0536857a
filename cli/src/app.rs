//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is built once in `Cli::run()` from the merged configuration
//! and the global flags. Commands receive `&AppContext` and obtain the
//! poller through `AppContext::poller`, which validates the configuration
//! first; `config` subcommands never build one.

use std::time::Duration;

use anyhow::Result;

use crate::application::services::{WorkspaceClient, WorkspacePoller};
use crate::domain::WspollConfig;
use crate::infra::auth::{CachedTokenSource, ConfiguredTokenSource};
use crate::infra::config::YamlConfigStore;
use crate::infra::http::{ReqwestTransport, build_client};
use crate::infra::sleeper::TokioSleeper;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// The poller wired to real infrastructure.
pub type LivePoller =
    WorkspacePoller<ReqwestTransport, CachedTokenSource<ConfiguredTokenSource>, TokioSleeper>;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `WSPOLL_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective configuration (file + env + flags).
    pub config: WspollConfig,
    /// Where `config` was loaded from and where `config set` writes.
    pub config_store: YamlConfigStore,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `WSPOLL_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and configuration.
    ///
    /// The configuration is not validated here.
    #[must_use]
    pub fn new(flags: &AppFlags, config_store: YamlConfigStore, config: WspollConfig) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("WSPOLL_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet || flags.output.json),
            mode,
            config,
            config_store,
            non_interactive,
        }
    }

    /// Validate the configuration and build the workspace lifecycle poller
    /// bound to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration value is invalid or the HTTP
    /// client cannot be built.
    pub fn poller(&self) -> Result<LivePoller> {
        let config = &self.config;
        config.validate()?;
        let http = build_client(Duration::from_secs(config.request_timeout_secs))?;
        let tokens = CachedTokenSource::new(ConfiguredTokenSource::from_config(http.clone(), config));
        let client = WorkspaceClient::new(ReqwestTransport::new(http, &config.base_url), tokens);
        Ok(WorkspacePoller::new(
            client,
            TokioSleeper,
            config.status_budget()?,
            config.plugin_budget()?,
        ))
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `WSPOLL_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}

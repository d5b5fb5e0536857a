//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`.
//! All functions are synchronous and take data in, returning data out.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod poll;
pub mod workspace;

pub use cleanup::{CleanupMode, CleanupReport, IdOutcome};
pub use config::{WspollConfig, validate_config_key, validate_config_value};
pub use error::{ConfigError, PollerError};
pub use poll::{PollBudget, Probe};
pub use workspace::{validate_workspace_id, workspace_key};

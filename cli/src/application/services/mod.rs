//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` and never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod cleanup_service;
pub mod poller;
pub mod workspace_client;

pub use cleanup_service::clean_up_all;
pub use poller::{Exhausted, WorkspacePoller, poll_until};
pub use workspace_client::WorkspaceClient;

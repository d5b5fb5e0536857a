//! Command implementations

pub mod cleanup;
pub mod config;
pub mod create;
pub mod list;
pub mod remove;
pub mod stop;
pub mod version;
pub mod wait;

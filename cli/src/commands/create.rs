//! `wspoll create`: create a workspace from a devfile.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use wspoll_common::Devfile;

use crate::app::AppContext;

/// Arguments for `create`.
#[derive(Args)]
pub struct CreateArgs {
    /// Devfile to submit (YAML or JSON); the minimal base devfile if omitted
    #[arg(long, value_name = "FILE")]
    pub devfile: Option<PathBuf>,
    /// Workspace name, replacing `metadata.name`
    #[arg(long)]
    pub name: Option<String>,
    /// Start the workspace right after creating it
    #[arg(long)]
    pub start: bool,
}

/// Run `wspoll create`.
///
/// # Errors
///
/// Returns an error if the devfile cannot be read or the server rejects it.
pub async fn run(app: &AppContext, args: &CreateArgs) -> Result<ExitCode> {
    let devfile = build_devfile(args.devfile.as_deref(), args.name.as_deref())?;
    let poller = app.poller()?;
    let id = poller.create_from_devfile(&devfile, args.start).await?;
    app.renderer()
        .render_done("create", &id, &format!("Workspace {id} created"))?;
    Ok(ExitCode::SUCCESS)
}

/// Load `path` (or the base devfile) and apply the name override.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not YAML, or is not a
/// mapping when a name override is requested.
pub fn build_devfile(path: Option<&Path>, name: Option<&str>) -> Result<serde_json::Value> {
    let Some(path) = path else {
        return serde_json::to_value(Devfile::base(name)).context("encoding base devfile");
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    // YAML is a superset of JSON, so one parser covers both.
    let mut devfile: serde_json::Value = serde_yaml::from_str(&content)
        .with_context(|| format!("cannot parse {}", path.display()))?;

    if let Some(name) = name {
        let root = devfile
            .as_object_mut()
            .with_context(|| format!("{} is not a devfile mapping", path.display()))?;
        let metadata = root
            .entry("metadata")
            .or_insert_with(|| serde_json::json!({}));
        let metadata = metadata
            .as_object_mut()
            .context("devfile metadata is not a mapping")?;
        metadata.insert("name".to_string(), name.into());
        metadata.remove("generateName");
    }
    Ok(devfile)
}

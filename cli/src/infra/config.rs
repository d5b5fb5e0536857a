//! Infrastructure implementation of the `ConfigStore` port, plus the
//! environment overlay.
//!
//! Precedence, lowest to highest: built-in defaults, the YAML file,
//! `WSPOLL_*` environment variables, command-line flags (applied by the caller).

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{ConfigOverrides, WspollConfig};

/// Prefix of the environment variables read by [`load_config`].
pub const ENV_PREFIX: &str = "WSPOLL_";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    /// Use `path` instead of the default location.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            explicit: Some(path),
        }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<WspollConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(WspollConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &WspollConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        // The file may hold a password.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(p) = &self.explicit {
            return Ok(p.clone());
        }
        if let Ok(val) = std::env::var("WSPOLL_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".wspoll").join("config.yaml"))
    }
}

/// Load the file through `store` and overlay `WSPOLL_*` entries from `vars`.
///
/// The result is not validated, so `config` subcommands can still repair a
/// file holding out-of-range values; `WspollConfig::validate` runs before a
/// poller is built.
///
/// `vars` is normally `std::env::vars()`; tests pass a fixed list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or an environment
/// value has the wrong type.
pub fn load_config(
    store: &impl ConfigStore,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<WspollConfig> {
    let base = store.load()?;
    let overrides: ConfigOverrides = envy::prefixed(ENV_PREFIX)
        .from_iter(vars)
        .context("invalid WSPOLL_* environment variable")?;
    let config = base.with_overrides(overrides);
    tracing::debug!(base_url = %config.base_url, multiuser = config.multiuser, "configuration loaded");
    Ok(config)
}

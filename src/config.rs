//! Hierarchy configuration
//!
//! [`HierarchyConfig`] is read from the `[hierarchy]` section of
//! `config/config.toml` and from `CATALOG_HIERARCHY__HIERARCHY__*`
//! environment variables, the latter taking precedence.

use crate::hierarchy::{HierarchyOptions, InvalidParentPolicy};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config/config.toml";
pub const ENV_PREFIX: &str = "CATALOG_HIERARCHY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default)]
    pub invalid_parents: InvalidParentPolicy,
    #[serde(default = "default_include_inactive")]
    pub include_inactive: bool,
    /// Default snapshot file for tooling
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

fn default_include_inactive() -> bool {
    true
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            invalid_parents: InvalidParentPolicy::default(),
            include_inactive: default_include_inactive(),
            snapshot_path: None,
        }
    }
}

impl HierarchyConfig {
    /// Load from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from the given TOML file (optional), falling back to env vars.
    ///
    /// A missing `[hierarchy]` section yields the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // Unreadable file: warn and retry with env only
                if path.exists() {
                    log::warn!(
                        "Failed to load config file {}, falling back to env. Error: {}",
                        path.display(),
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        match settings.get::<HierarchyConfig>("hierarchy") {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Hierarchy configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }

    pub fn options(&self) -> HierarchyOptions {
        HierarchyOptions {
            invalid_parents: self.invalid_parents,
            include_inactive: self.include_inactive,
        }
    }
}

impl From<&HierarchyConfig> for HierarchyOptions {
    fn from(config: &HierarchyConfig) -> Self {
        config.options()
    }
}

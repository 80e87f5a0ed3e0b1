//! Configuration management for strata
//!
//! Repository-level settings for how the `jj` CLI is invoked and queried.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Result, StrataError};

/// Repository-level strata configuration
///
/// Loaded from `.strata/config.toml` in the repo root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Program used to run jj
    #[serde(default = "default_jj_binary")]
    pub jj_binary: String,

    /// Per-invocation timeout in seconds
    #[serde(default = "default_exec_timeout_secs")]
    pub exec_timeout_secs: u64,

    /// Limit applied to `jj log` when the caller passes none
    #[serde(default)]
    pub default_log_limit: Option<usize>,
}

// Default value providers
fn default_jj_binary() -> String {
    "jj".to_string()
}

fn default_exec_timeout_secs() -> u64 {
    30
}

impl StrataConfig {
    /// Load configuration from `.strata/config.toml` or use defaults
    pub fn load_or_default(repo_root: &Path) -> Result<Self> {
        let config_path = repo_root.join(".strata/config.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = toml::from_str(&content).map_err(|e| {
                StrataError::Config(format!("Failed to parse config file: {}", e))
            })?;
            tracing::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.strata/config.toml`
    pub fn write_default(repo_root: &Path) -> Result<()> {
        let config_dir = repo_root.join(".strata");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| StrataError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            jj_binary: default_jj_binary(),
            exec_timeout_secs: default_exec_timeout_secs(),
            default_log_limit: None,
        }
    }
}

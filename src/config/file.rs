use crate::utils::errors::Result;
use crate::utils::paths::CredHubPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings read from the CLI's `config.yaml`. Every field is optional;
/// command-line flags and environment variables take precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub server: Option<String>,
    pub client_name: Option<String>,
    pub ca_cert: Option<String>,
    pub key_store: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load a config file, treating a missing file as empty
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ConfigFile = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load from `--config` if given, otherwise the XDG default location
    pub fn load_default(explicit: Option<&str>) -> Result<Self> {
        let path = match explicit {
            Some(p) => CredHubPaths::expand_home(p)?,
            None => CredHubPaths::config_file()?,
        };
        Self::load(&path)
    }
}

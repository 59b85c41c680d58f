use crate::utils::errors::{CredHubError, Result};
use std::path::{Path, PathBuf};

pub struct CredHubPaths;
const PROGRAM_NAME: &str = "credhub-rs";

impl CredHubPaths {
    /// Get the config directory: ~/.config/credhub-rs/
    pub fn config_dir() -> Result<PathBuf> {
        Self::user_config_base().map(|base| base.join(PROGRAM_NAME))
    }

    /// Get the config file path: ~/.config/credhub-rs/config.yaml
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_file_under(&Self::user_config_base()?))
    }

    fn user_config_base() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| CredHubError::Config("Cannot determine config directory".to_string()))
    }

    fn config_file_under(base: &Path) -> PathBuf {
        base.join(PROGRAM_NAME).join("config.yaml")
    }

    /// Expand a leading `~/` against the home directory
    pub fn expand_home(path: &str) -> Result<PathBuf> {
        match path.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .ok_or_else(|| {
                    CredHubError::Config("Cannot determine home directory".to_string())
                }),
            None => Ok(Path::new(path).to_path_buf()),
        }
    }
}

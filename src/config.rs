use crate::analyzer::version_resolver::{
    DEFAULT_BRANCH_NUMBER_LENGTH, DEFAULT_INCREMENT_POSITION, DEFAULT_MAJOR_MINOR_PATCH,
};
use crate::domain::BranchRules;
use crate::error::{BuildVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the repository directory
pub const CONFIG_FILE_NAME: &str = "buildversion.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".buildversion.toml";

/// Represents the complete configuration for git-build-version.
///
/// Contains the remote to read branches from, the resolution policy defaults
/// and the branch naming rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub branches: BranchRules,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_major_minor_patch() -> String {
    DEFAULT_MAJOR_MINOR_PATCH.to_string()
}

fn default_increment_position() -> usize {
    DEFAULT_INCREMENT_POSITION
}

fn default_branch_number_length() -> u32 {
    DEFAULT_BRANCH_NUMBER_LENGTH
}

/// Defaults for the resolution policy. Command-line values take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PolicyConfig {
    #[serde(default = "default_major_minor_patch")]
    pub major_minor_patch: String,

    #[serde(default = "default_increment_position")]
    pub increment_position: usize,

    #[serde(default = "default_branch_number_length")]
    pub branch_number_length: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            major_minor_patch: default_major_minor_patch(),
            increment_position: default_increment_position(),
            branch_number_length: default_branch_number_length(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            policy: PolicyConfig::default(),
            branches: BranchRules::default(),
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| BuildVersionError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `buildversion.toml` in the repository directory
/// 3. `.buildversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repository_dir` - Optional repository directory to search
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, repository_dir: Option<&Path>) -> Result<Config> {
    let Some(path) = locate_config(config_path, repository_dir) else {
        debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "Loading configuration");
    let text = fs::read_to_string(&path).map_err(|e| {
        BuildVersionError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&text)
        .map_err(|e| BuildVersionError::config(format!("{}: {}", path.display(), e)))
}

fn locate_config(config_path: Option<&Path>, repository_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    if let Some(dir) = repository_dir {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE_NAME))
        .filter(|candidate| candidate.exists())
}

use thiserror::Error;

/// Unified error type for git-build-version operations
#[derive(Error, Debug)]
pub enum BuildVersionError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid increment position {position} for version '{version}' (expected 1-{max})")]
    InvalidIncrementPosition {
        version: String,
        position: usize,
        max: usize,
    },

    #[error("Invalid branch number length {0} (expected 1-19)")]
    InvalidHashLength(u32),

    #[error("Invalid build number: {0}")]
    InvalidBuildNumber(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-build-version
pub type Result<T> = std::result::Result<T, BuildVersionError>;

impl BuildVersionError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BuildVersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BuildVersionError::InvalidVersion(msg.into())
    }

    /// Create a build number error with context
    pub fn build_number(msg: impl Into<String>) -> Self {
        BuildVersionError::InvalidBuildNumber(msg.into())
    }
}

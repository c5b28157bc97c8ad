//! Error types for configuration validation.

use thiserror::Error;

/// Errors raised while validating publisher configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required values were absent or blank.
    #[error("Missing env: GH_TOKEN, GITHUB_OWNER, GITHUB_REPO are required.")]
    MissingRequired {
        /// Environment variable names that were missing.
        missing: Vec<&'static str>,
    },
    /// The API URL could not be parsed or cannot carry a path.
    #[error("invalid API URL '{value}'")]
    InvalidApiUrl {
        /// Offending value.
        value: String,
    },
    /// Head and base branch resolved to the same name.
    #[error("head branch '{branch}' must differ from the base branch")]
    HeadIsBase {
        /// Shared branch name.
        branch: String,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

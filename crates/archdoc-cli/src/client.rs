//! CLI error type and repository host wiring.

use std::fmt::{self, Display, Formatter};

use archdoc_config::RemoteConfig;
use archdoc_github::GithubClient;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Every failure, configuration or operational, exits with status 1.
    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Failure(_) => 1,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

/// Construct the GitHub host for a validated remote configuration.
pub(crate) fn github_host(config: &RemoteConfig) -> CliResult<GithubClient> {
    GithubClient::new(
        config.api_url.clone(),
        config.token(),
        &config.owner,
        &config.repo,
    )
    .map_err(CliError::failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn every_error_exits_with_one() {
        assert_eq!(CliError::validation("missing").exit_code(), 1);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 1);
    }

    #[test]
    fn failure_message_includes_cause_chain() {
        let err = CliError::failure(anyhow!("root cause").context("remote step failed"));
        assert_eq!(err.display_message(), "remote step failed: root cause");
        assert_eq!(CliError::validation("bad").display_message(), "bad");
    }

    #[test]
    fn display_matches_reported_message() {
        let err = CliError::failure(anyhow!("root cause").context("remote step failed"));
        assert_eq!(err.to_string(), "remote step failed: root cause");
        assert_eq!(CliError::validation("bad").to_string(), "bad");
    }
}

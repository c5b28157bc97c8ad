//! Raw settings and the validated configurations built from them.

use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;

use url::Url;

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};

/// Unvalidated remote settings as collected from flags and environment variables.
#[derive(Clone, Default)]
pub struct RemoteSettings {
    /// `GH_TOKEN`.
    pub token: Option<String>,
    /// `GITHUB_OWNER`.
    pub owner: Option<String>,
    /// `GITHUB_REPO`.
    pub repo: Option<String>,
    /// `BASE_BRANCH`.
    pub base_branch: Option<String>,
    /// `HEAD_BRANCH`.
    pub head_branch: Option<String>,
    /// `PR_TITLE`.
    pub pull_title: Option<String>,
    /// `PR_BODY`.
    pub pull_body: Option<String>,
    /// `README_PATH`.
    pub readme_path: Option<String>,
    /// `GITHUB_API_URL`.
    pub api_url: Option<String>,
}

impl Debug for RemoteSettings {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RemoteSettings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("base_branch", &self.base_branch)
            .field("head_branch", &self.head_branch)
            .field("pull_title", &self.pull_title)
            .field("pull_body", &self.pull_body)
            .field("readme_path", &self.readme_path)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Validated configuration for the remote publisher.
#[derive(Clone)]
pub struct RemoteConfig {
    token: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch read from and merged into.
    pub base_branch: String,
    /// Working branch.
    pub head_branch: String,
    /// Pull request title.
    pub pull_title: String,
    /// Pull request body.
    pub pull_body: String,
    /// Repository-relative README path.
    pub readme_path: String,
    /// REST API base URL.
    pub api_url: Url,
}

impl RemoteConfig {
    /// Validate `settings`, applying defaults to empty optional values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] when the token, owner, or repo is
    /// absent or blank, [`ConfigError::InvalidApiUrl`] for an unusable API URL, and
    /// [`ConfigError::HeadIsBase`] when both branches share a name.
    pub fn from_settings(settings: RemoteSettings) -> ConfigResult<Self> {
        let token = required(settings.token);
        let owner = required(settings.owner);
        let repo = required(settings.repo);

        let (Some(token), Some(owner), Some(repo)) = (token.clone(), owner.clone(), repo.clone())
        else {
            let missing = [
                ("GH_TOKEN", token.is_none()),
                ("GITHUB_OWNER", owner.is_none()),
                ("GITHUB_REPO", repo.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(ConfigError::MissingRequired { missing });
        };

        let api_url_raw = or_default(settings.api_url, defaults::API_URL);
        let api_url = Url::parse(&api_url_raw)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(ConfigError::InvalidApiUrl { value: api_url_raw })?;

        let base_branch = or_default(settings.base_branch, defaults::BASE_BRANCH);
        let head_branch = or_default(settings.head_branch, defaults::HEAD_BRANCH);
        if base_branch == head_branch {
            return Err(ConfigError::HeadIsBase {
                branch: head_branch,
            });
        }

        Ok(Self {
            token,
            owner,
            repo,
            base_branch,
            head_branch,
            pull_title: or_default(settings.pull_title, defaults::PULL_TITLE),
            pull_body: or_default(settings.pull_body, defaults::PULL_BODY),
            readme_path: or_default(settings.readme_path, defaults::README_PATH),
            api_url,
        })
    }

    /// Credential used to authenticate API calls.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Debug for RemoteConfig {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RemoteConfig")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("base_branch", &self.base_branch)
            .field("head_branch", &self.head_branch)
            .field("pull_title", &self.pull_title)
            .field("pull_body", &self.pull_body)
            .field("readme_path", &self.readme_path)
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

/// Validated configuration for the local publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    /// README file rewritten in place.
    pub readme_path: PathBuf,
}

impl LocalConfig {
    /// Build the local configuration, defaulting to `README.md`.
    #[must_use]
    pub fn from_path(readme_path: Option<PathBuf>) -> Self {
        Self {
            readme_path: readme_path
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(defaults::README_PATH)),
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|raw| !raw.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

//! Argument parsing and command dispatch for the `archdoc` binary.

use std::path::PathBuf;

use archdoc_config::{LocalConfig, RemoteConfig, RemoteSettings};
use archdoc_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use clap::{Args, Parser, Subcommand};

use crate::client::{CliError, CliResult};
use crate::commands::{handle_check, handle_local, handle_publish};

/// Parses CLI arguments, installs logging, executes the requested command, and
/// reports failures on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    match dispatch(cli.command).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub(crate) async fn dispatch(command: Command) -> CliResult<()> {
    match command {
        Command::Local(args) => handle_local(&LocalConfig::from_path(args.readme)),
        Command::Check(args) => handle_check(&LocalConfig::from_path(args.readme)),
        Command::Publish(args) => {
            let config = RemoteConfig::from_settings(args.into_settings())
                .map_err(|err| CliError::validation(err.to_string()))?;
            handle_publish(&config).await
        }
    }
}

#[derive(Parser)]
#[command(
    name = "archdoc",
    version,
    about = "Keep the Architecture section of a README in sync"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "ARCHDOC_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(long, global = true, env = "ARCHDOC_LOG_FORMAT")]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Rewrite the architecture section of a local README in place.
    Local(ReadmeArgs),
    /// Exit non-zero when the local README section is out of date.
    Check(ReadmeArgs),
    /// Commit the section to a working branch and open or refresh a pull request.
    Publish(PublishArgs),
}

#[derive(Args)]
pub(crate) struct ReadmeArgs {
    /// README file to update.
    #[arg(long = "readme", env = "README_PATH")]
    pub(crate) readme: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct PublishArgs {
    /// API token.
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,
    /// Repository owner.
    #[arg(long, env = "GITHUB_OWNER")]
    pub(crate) owner: Option<String>,
    /// Repository name.
    #[arg(long, env = "GITHUB_REPO")]
    pub(crate) repo: Option<String>,
    /// Branch to read from and merge into [default: main].
    #[arg(long, env = "BASE_BRANCH")]
    pub(crate) base: Option<String>,
    /// Working branch [default: arch-agent/architecture].
    #[arg(long, env = "HEAD_BRANCH")]
    pub(crate) head: Option<String>,
    /// Pull request title.
    #[arg(long, env = "PR_TITLE")]
    pub(crate) title: Option<String>,
    /// Pull request body.
    #[arg(long, env = "PR_BODY")]
    pub(crate) body: Option<String>,
    /// Repository-relative README path [default: README.md].
    #[arg(long = "readme", env = "README_PATH")]
    pub(crate) readme: Option<String>,
    /// REST API base URL [default: https://api.github.com].
    #[arg(long, env = "GITHUB_API_URL")]
    pub(crate) api_url: Option<String>,
}

impl PublishArgs {
    fn into_settings(self) -> RemoteSettings {
        RemoteSettings {
            token: self.token,
            owner: self.owner,
            repo: self.repo,
            base_branch: self.base,
            head_branch: self.head,
            pull_title: self.title,
            pull_body: self.body,
            readme_path: self.readme,
            api_url: self.api_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn publish_flags_map_onto_settings() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "archdoc",
            "publish",
            "--token",
            "t",
            "--owner",
            "octo",
            "--repo",
            "demo",
            "--base",
            "develop",
            "--head",
            "docs/arch",
            "--title",
            "T",
            "--body",
            "B",
            "--readme",
            "docs/README.md",
            "--api-url",
            "http://localhost:9",
        ])?;
        let Command::Publish(args) = cli.command else {
            anyhow::bail!("expected publish command");
        };
        let config = RemoteConfig::from_settings(args.into_settings())?;
        assert_eq!(config.token(), "t");
        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "demo");
        assert_eq!(config.base_branch, "develop");
        assert_eq!(config.head_branch, "docs/arch");
        assert_eq!(config.pull_title, "T");
        assert_eq!(config.pull_body, "B");
        assert_eq!(config.readme_path, "docs/README.md");
        assert_eq!(config.api_url.as_str(), "http://localhost:9/");
        Ok(())
    }

    #[test]
    fn global_log_flags_parse_after_subcommand() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "archdoc",
            "local",
            "--readme",
            "README.md",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])?;
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Command::Local(ReadmeArgs { readme: Some(_) })));
        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(
            Cli::try_parse_from(["archdoc", "--log-format", "yaml", "check"]).is_err()
        );
    }

    #[tokio::test]
    async fn publish_with_blank_required_values_is_a_validation_error() {
        let result = dispatch(Command::Publish(PublishArgs {
            token: Some(String::new()),
            owner: Some(" ".into()),
            repo: Some(String::new()),
            base: None,
            head: None,
            title: None,
            body: None,
            readme: None,
            api_url: None,
        }))
        .await;
        let Err(CliError::Validation(message)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(
            message,
            "Missing env: GH_TOKEN, GITHUB_OWNER, GITHUB_REPO are required."
        );
    }
}

//! Default values applied when optional settings are absent or empty.

/// Base branch read from and merged into.
pub const BASE_BRANCH: &str = "main";
/// Working branch receiving the generated commit.
pub const HEAD_BRANCH: &str = "arch-agent/architecture";
/// Pull request title.
pub const PULL_TITLE: &str = "docs: update Architecture diagram";
/// Pull request body.
pub const PULL_BODY: &str = "Automated update of Architecture section (Mermaid).";
/// README path, relative to the working directory or repository root.
pub const README_PATH: &str = "README.md";
/// GitHub REST endpoint.
pub const API_URL: &str = "https://api.github.com";

//! Repository host capability used by the remote publisher.
//!
//! # Design
//! - One trait covers every call the remote flow makes, so tests can swap in an
//!   in-memory host without network access.
//! - Implementations are bound to a single repository; callers pass branch names
//!   and paths only.

use async_trait::async_trait;

use crate::error::HostResult;

/// Branch head as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRef {
    /// Branch name without the `refs/heads/` prefix.
    pub branch: String,
    /// Commit the branch points at.
    pub sha: String,
}

/// File contents fetched from a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFile {
    /// Repository-relative path.
    pub path: String,
    /// Content-addressed revision of the file, used as the write precondition.
    pub sha: String,
    /// Decoded UTF-8 contents.
    pub text: String,
}

/// Request to replace a file on a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    /// Repository-relative path.
    pub path: String,
    /// Commit message.
    pub message: String,
    /// New UTF-8 contents.
    pub text: String,
    /// Branch receiving the commit.
    pub branch: String,
    /// Revision the update was computed from; the host rejects the write if it moved.
    pub prior_sha: String,
}

/// Filter for open pull requests between two branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullQuery {
    /// Head branch name.
    pub head: String,
    /// Base branch name.
    pub base: String,
}

/// Pull request summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Host-assigned pull request number.
    pub number: u64,
    /// Browser URL of the pull request.
    pub html_url: String,
}

/// Payload for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Title.
    pub title: String,
    /// Description.
    pub body: String,
    /// Head branch name.
    pub head: String,
    /// Base branch name.
    pub base: String,
}

/// Title and body applied to an existing pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEdit {
    /// Title.
    pub title: String,
    /// Description.
    pub body: String,
}

/// Operations the remote publisher needs from a hosted repository.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Resolve a branch head; `Ok(None)` when the branch does not exist.
    async fn get_ref(&self, branch: &str) -> HostResult<Option<GitRef>>;

    /// Create `branch` pointing at `sha`.
    async fn create_ref(&self, branch: &str, sha: &str) -> HostResult<GitRef>;

    /// Move `branch` to `sha`, discarding commits when `force` is set.
    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> HostResult<GitRef>;

    /// Fetch `path` as it exists on `branch`.
    async fn get_content(&self, path: &str, branch: &str) -> HostResult<RepositoryFile>;

    /// Commit `update` and return the new commit sha.
    async fn put_content(&self, update: &FileUpdate) -> HostResult<String>;

    /// List open pull requests matching `query`.
    async fn list_pulls(&self, query: &PullQuery) -> HostResult<Vec<PullRequest>>;

    /// Open a pull request.
    async fn create_pull(&self, pull: &NewPullRequest) -> HostResult<PullRequest>;

    /// Replace the title and body of pull request `number`.
    async fn update_pull(&self, number: u64, edit: &PullRequestEdit) -> HostResult<PullRequest>;
}

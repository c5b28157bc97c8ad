//! Remote publisher: commits the section to a working branch and opens or
//! refreshes a pull request.
//!
//! # Design
//! - Steps run strictly in order; the first failure aborts the run with no rollback.
//! - The head branch is always reset to the base commit, discarding earlier work.
//! - The file write carries the fetched blob sha so concurrent edits are rejected
//!   by the host.

use tracing::{debug, info};

use crate::diagram::{ArchitectureGraph, render_mermaid};
use crate::error::{PublishError, PublishResult};
use crate::host::{
    FileUpdate, NewPullRequest, PullQuery, PullRequest, PullRequestEdit, RepositoryHost,
};
use crate::publish::warn_on_duplicate_sections;
use crate::section::{SectionEditor, SectionMarkers};

/// Commit message used for section updates.
pub const COMMIT_MESSAGE: &str = "chore: update Architecture diagram (Mermaid)";

/// Branches, document path, and pull request text for a remote publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Branch the README is read from and the pull request targets.
    pub base_branch: String,
    /// Working branch receiving the commit.
    pub head_branch: String,
    /// Repository-relative README path.
    pub readme_path: String,
    /// Pull request title.
    pub pull_title: String,
    /// Pull request body.
    pub pull_body: String,
}

/// Whether the README was committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentChange {
    /// The updated README was committed to the head branch.
    Committed {
        /// Commit created by the host.
        commit_sha: String,
    },
    /// The README already held the current section.
    Unchanged,
}

/// Pull request action taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullChange {
    /// A new pull request was opened.
    Created(PullRequest),
    /// An existing open pull request had its title and body refreshed.
    Updated(PullRequest),
}

impl PullChange {
    /// Pull request affected by the run.
    #[must_use]
    pub const fn pull_request(&self) -> &PullRequest {
        match self {
            Self::Created(pull) | Self::Updated(pull) => pull,
        }
    }
}

/// Summary of a remote publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOutcome {
    /// `true` when the head branch had to be created.
    pub branch_created: bool,
    /// README commit result.
    pub content: ContentChange,
    /// Pull request result.
    pub pull: PullChange,
}

/// Publishes the architecture section through a [`RepositoryHost`].
pub struct RemotePublisher<'a, H: RepositoryHost + ?Sized> {
    host: &'a H,
    target: RemoteTarget,
}

impl<'a, H: RepositoryHost + ?Sized> RemotePublisher<'a, H> {
    /// Bind a publisher to `host` and `target`.
    #[must_use]
    pub const fn new(host: &'a H, target: RemoteTarget) -> Self {
        Self { host, target }
    }

    /// Run the full branch, commit, and pull request sequence for `graph`.
    ///
    /// # Errors
    ///
    /// Returns the first failing step. Earlier steps are not rolled back.
    pub async fn publish(&self, graph: &ArchitectureGraph) -> PublishResult<RemoteOutcome> {
        let editor = SectionEditor::new(SectionMarkers::ARCHITECTURE)?;
        let target = &self.target;

        let base = self
            .host
            .get_ref(&target.base_branch)
            .await
            .map_err(PublishError::host("get-base-ref"))?
            .ok_or_else(|| PublishError::BaseBranchMissing {
                branch: target.base_branch.clone(),
            })?;
        debug!(branch = %base.branch, sha = %base.sha, "resolved base branch");

        let branch_created = self.reset_head_branch(&base.sha).await?;

        let file = self
            .host
            .get_content(&target.readme_path, &target.base_branch)
            .await
            .map_err(PublishError::host("get-content"))?;
        warn_on_duplicate_sections(&editor, &file.text, &file.path);
        let updated = editor.upsert(&file.text, &render_mermaid(graph));

        let content = if updated == file.text {
            info!(path = %file.path, "no changes required");
            ContentChange::Unchanged
        } else {
            let update = FileUpdate {
                path: target.readme_path.clone(),
                message: COMMIT_MESSAGE.to_string(),
                text: updated,
                branch: target.head_branch.clone(),
                prior_sha: file.sha,
            };
            let commit_sha = self
                .host
                .put_content(&update)
                .await
                .map_err(PublishError::host("put-content"))?;
            debug!(branch = %target.head_branch, commit = %commit_sha, "committed section update");
            ContentChange::Committed { commit_sha }
        };

        let pull = self.upsert_pull_request().await?;

        Ok(RemoteOutcome {
            branch_created,
            content,
            pull,
        })
    }

    async fn reset_head_branch(&self, base_sha: &str) -> PublishResult<bool> {
        let head = &self.target.head_branch;
        let existing = self
            .host
            .get_ref(head)
            .await
            .map_err(PublishError::host("get-head-ref"))?;

        if existing.is_some() {
            self.host
                .update_ref(head, base_sha, true)
                .await
                .map_err(PublishError::host("update-ref"))?;
            debug!(branch = %head, sha = %base_sha, "reset head branch to base");
            Ok(false)
        } else {
            self.host
                .create_ref(head, base_sha)
                .await
                .map_err(PublishError::host("create-ref"))?;
            debug!(branch = %head, sha = %base_sha, "created head branch");
            Ok(true)
        }
    }

    async fn upsert_pull_request(&self) -> PublishResult<PullChange> {
        let target = &self.target;
        let query = PullQuery {
            head: target.head_branch.clone(),
            base: target.base_branch.clone(),
        };
        let open = self
            .host
            .list_pulls(&query)
            .await
            .map_err(PublishError::host("list-pulls"))?;

        if let Some(existing) = open.first() {
            let edit = PullRequestEdit {
                title: target.pull_title.clone(),
                body: target.pull_body.clone(),
            };
            let pull = self
                .host
                .update_pull(existing.number, &edit)
                .await
                .map_err(PublishError::host("update-pull"))?;
            Ok(PullChange::Updated(pull))
        } else {
            let request = NewPullRequest {
                title: target.pull_title.clone(),
                body: target.pull_body.clone(),
                head: target.head_branch.clone(),
                base: target.base_branch.clone(),
            };
            let pull = self
                .host
                .create_pull(&request)
                .await
                .map_err(PublishError::host("create-pull"))?;
            Ok(PullChange::Created(pull))
        }
    }
}

//! In-memory repository host that records every call.
//!
//! Commits are modelled as snapshots of a path-to-blob map; branches point at
//! commits. Blob and commit identifiers are sequential (`blob-1`, `commit-1`, ...).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use archdoc_core::{
    FileUpdate, GitRef, HostError, HostResult, NewPullRequest, PullQuery, PullRequest,
    PullRequestEdit, RepositoryFile, RepositoryHost,
};
use async_trait::async_trait;

/// A call observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `get_ref(branch)`.
    GetRef(String),
    /// `create_ref(branch, sha)`.
    CreateRef {
        /// Branch name.
        branch: String,
        /// Target commit.
        sha: String,
    },
    /// `update_ref(branch, sha, force)`.
    UpdateRef {
        /// Branch name.
        branch: String,
        /// Target commit.
        sha: String,
        /// Force flag.
        force: bool,
    },
    /// `get_content(path, branch)`.
    GetContent {
        /// File path.
        path: String,
        /// Branch read from.
        branch: String,
    },
    /// `put_content(update)`.
    PutContent(FileUpdate),
    /// `list_pulls(query)`.
    ListPulls(PullQuery),
    /// `create_pull(pull)`.
    CreatePull(NewPullRequest),
    /// `update_pull(number, edit)`.
    UpdatePull {
        /// Pull request number.
        number: u64,
        /// Applied edit.
        edit: PullRequestEdit,
    },
}

impl HostCall {
    /// Operation name matching [`RecordingHost::fail_on`].
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::GetRef(_) => "get-ref",
            Self::CreateRef { .. } => "create-ref",
            Self::UpdateRef { .. } => "update-ref",
            Self::GetContent { .. } => "get-content",
            Self::PutContent(_) => "put-content",
            Self::ListPulls(_) => "list-pulls",
            Self::CreatePull(_) => "create-pull",
            Self::UpdatePull { .. } => "update-pull",
        }
    }
}

/// Stored pull request with its branches and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPull {
    /// Summary returned to callers.
    pub pull: PullRequest,
    /// Head branch.
    pub head: String,
    /// Base branch.
    pub base: String,
    /// Current title.
    pub title: String,
    /// Current body.
    pub body: String,
}

#[derive(Debug, Clone)]
struct Blob {
    sha: String,
    text: String,
}

#[derive(Debug, Default)]
struct State {
    branches: HashMap<String, String>,
    commits: HashMap<String, HashMap<String, Blob>>,
    pulls: Vec<StoredPull>,
    calls: Vec<HostCall>,
    failing: Option<&'static str>,
    next_id: u64,
}

impl State {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn tree(&self, branch: &str) -> Option<&HashMap<String, Blob>> {
        self.branches
            .get(branch)
            .and_then(|sha| self.commits.get(sha))
    }
}

/// Fake [`RepositoryHost`] backed by in-memory state.
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: Mutex<State>,
}

impl RecordingHost {
    /// Empty host with no branches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with a single `branch` whose tree holds `path` with `text`.
    #[must_use]
    pub fn with_file(branch: &str, path: &str, text: &str) -> Self {
        let host = Self::new();
        {
            let mut state = host.lock();
            let blob = Blob {
                sha: state.next("blob"),
                text: text.to_string(),
            };
            let commit = state.next("commit");
            state
                .commits
                .insert(commit.clone(), HashMap::from([(path.to_string(), blob)]));
            state.branches.insert(branch.to_string(), commit);
        }
        host
    }

    /// Point `branch` at the commit `source` currently references.
    #[must_use]
    pub fn with_branch_from(self, branch: &str, source: &str) -> Self {
        {
            let mut state = self.lock();
            if let Some(sha) = state.branches.get(source).cloned() {
                state.branches.insert(branch.to_string(), sha);
            }
        }
        self
    }

    /// Register an open pull request from `head` into `base`.
    #[must_use]
    pub fn with_open_pull(self, number: u64, head: &str, base: &str) -> Self {
        self.lock().pulls.push(StoredPull {
            pull: pull_summary(number),
            head: head.to_string(),
            base: base.to_string(),
            title: "old title".to_string(),
            body: "old body".to_string(),
        });
        self
    }

    /// Make every call to `operation` fail with a 500 status.
    #[must_use]
    pub fn fail_on(self, operation: &'static str) -> Self {
        self.lock().failing = Some(operation);
        self
    }

    /// Calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.lock().calls.clone()
    }

    /// Operation names observed so far, in order.
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        self.lock().calls.iter().map(HostCall::operation).collect()
    }

    /// Commit `branch` currently points at.
    #[must_use]
    pub fn branch_sha(&self, branch: &str) -> Option<String> {
        self.lock().branches.get(branch).cloned()
    }

    /// Text of `path` on `branch`.
    #[must_use]
    pub fn file_text(&self, branch: &str, path: &str) -> Option<String> {
        self.lock()
            .tree(branch)
            .and_then(|tree| tree.get(path))
            .map(|blob| blob.text.clone())
    }

    /// Replace `path` on `branch` behind the publisher's back.
    pub fn overwrite_file(&self, branch: &str, path: &str, text: &str) {
        let mut state = self.lock();
        let Some(mut tree) = state.tree(branch).cloned() else {
            return;
        };
        let sha = state.next("blob");
        tree.insert(
            path.to_string(),
            Blob {
                sha,
                text: text.to_string(),
            },
        );
        let commit = state.next("commit");
        state.commits.insert(commit.clone(), tree);
        state.branches.insert(branch.to_string(), commit);
    }

    /// Pull requests held by the host.
    #[must_use]
    pub fn pulls(&self) -> Vec<StoredPull> {
        self.lock().pulls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: HostCall) -> HostResult<MutexGuard<'_, State>> {
        let operation = call.operation();
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing == Some(operation) {
            return Err(HostError::Status {
                operation,
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(state)
    }
}

fn pull_summary(number: u64) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://example.test/pull/{number}"),
    }
}

fn not_found(operation: &'static str, what: &str) -> HostError {
    HostError::Status {
        operation,
        status: 404,
        message: format!("{what} not found"),
    }
}

#[async_trait]
impl RepositoryHost for RecordingHost {
    async fn get_ref(&self, branch: &str) -> HostResult<Option<GitRef>> {
        let state = self.record(HostCall::GetRef(branch.to_string()))?;
        Ok(state.branches.get(branch).map(|sha| GitRef {
            branch: branch.to_string(),
            sha: sha.clone(),
        }))
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> HostResult<GitRef> {
        let mut state = self.record(HostCall::CreateRef {
            branch: branch.to_string(),
            sha: sha.to_string(),
        })?;
        if state.branches.contains_key(branch) {
            return Err(HostError::Status {
                operation: "create-ref",
                status: 422,
                message: "Reference already exists".to_string(),
            });
        }
        if !state.commits.contains_key(sha) {
            return Err(not_found("create-ref", sha));
        }
        state.branches.insert(branch.to_string(), sha.to_string());
        Ok(GitRef {
            branch: branch.to_string(),
            sha: sha.to_string(),
        })
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> HostResult<GitRef> {
        let mut state = self.record(HostCall::UpdateRef {
            branch: branch.to_string(),
            sha: sha.to_string(),
            force,
        })?;
        if !state.branches.contains_key(branch) {
            return Err(not_found("update-ref", branch));
        }
        state.branches.insert(branch.to_string(), sha.to_string());
        Ok(GitRef {
            branch: branch.to_string(),
            sha: sha.to_string(),
        })
    }

    async fn get_content(&self, path: &str, branch: &str) -> HostResult<RepositoryFile> {
        let state = self.record(HostCall::GetContent {
            path: path.to_string(),
            branch: branch.to_string(),
        })?;
        let blob = state
            .tree(branch)
            .and_then(|tree| tree.get(path))
            .ok_or_else(|| not_found("get-content", path))?;
        Ok(RepositoryFile {
            path: path.to_string(),
            sha: blob.sha.clone(),
            text: blob.text.clone(),
        })
    }

    async fn put_content(&self, update: &FileUpdate) -> HostResult<String> {
        let mut state = self.record(HostCall::PutContent(update.clone()))?;
        let mut tree = state
            .tree(&update.branch)
            .cloned()
            .ok_or_else(|| not_found("put-content", &update.branch))?;
        let current = tree.get(&update.path).map(|blob| blob.sha.as_str());
        if current != Some(update.prior_sha.as_str()) {
            return Err(HostError::Status {
                operation: "put-content",
                status: 409,
                message: format!("{} does not match {}", update.path, update.prior_sha),
            });
        }
        let sha = state.next("blob");
        tree.insert(
            update.path.clone(),
            Blob {
                sha,
                text: update.text.clone(),
            },
        );
        let commit = state.next("commit");
        state.commits.insert(commit.clone(), tree);
        state.branches.insert(update.branch.clone(), commit.clone());
        Ok(commit)
    }

    async fn list_pulls(&self, query: &PullQuery) -> HostResult<Vec<PullRequest>> {
        let state = self.record(HostCall::ListPulls(query.clone()))?;
        Ok(state
            .pulls
            .iter()
            .filter(|stored| stored.head == query.head && stored.base == query.base)
            .map(|stored| stored.pull.clone())
            .collect())
    }

    async fn create_pull(&self, pull: &NewPullRequest) -> HostResult<PullRequest> {
        let mut state = self.record(HostCall::CreatePull(pull.clone()))?;
        let number = state
            .pulls
            .iter()
            .map(|stored| stored.pull.number)
            .max()
            .unwrap_or(0)
            + 1;
        let summary = pull_summary(number);
        state.pulls.push(StoredPull {
            pull: summary.clone(),
            head: pull.head.clone(),
            base: pull.base.clone(),
            title: pull.title.clone(),
            body: pull.body.clone(),
        });
        Ok(summary)
    }

    async fn update_pull(&self, number: u64, edit: &PullRequestEdit) -> HostResult<PullRequest> {
        let mut state = self.record(HostCall::UpdatePull {
            number,
            edit: edit.clone(),
        })?;
        let stored = state
            .pulls
            .iter_mut()
            .find(|stored| stored.pull.number == number)
            .ok_or_else(|| not_found("update-pull", &number.to_string()))?;
        stored.title.clone_from(&edit.title);
        stored.body.clone_from(&edit.body);
        Ok(stored.pull.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_content_requires_current_blob_sha() {
        let host = RecordingHost::with_file("main", "README.md", "hello");
        let file = host
            .get_content("README.md", "main")
            .await
            .expect("file exists");

        let mut update = FileUpdate {
            path: "README.md".into(),
            message: "m".into(),
            text: "changed".into(),
            branch: "main".into(),
            prior_sha: "blob-0".into(),
        };
        let err = host.put_content(&update).await.expect_err("stale sha");
        assert!(matches!(err, HostError::Status { status: 409, .. }));

        update.prior_sha = file.sha;
        host.put_content(&update).await.expect("current sha");
        assert_eq!(host.file_text("main", "README.md").as_deref(), Some("changed"));
    }

    #[tokio::test]
    async fn fail_on_records_then_fails() {
        let host = RecordingHost::new().fail_on("list-pulls");
        let query = PullQuery {
            head: "h".into(),
            base: "b".into(),
        };
        assert!(host.list_pulls(&query).await.is_err());
        assert_eq!(host.operations(), vec!["list-pulls"]);
    }
}

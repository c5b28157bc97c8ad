//! Wire payloads for the GitHub REST endpoints used by the publisher.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct RefResponse {
    #[serde(rename = "ref")]
    pub(crate) name: String,
    pub(crate) object: RefObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefObject {
    pub(crate) sha: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    pub(crate) name: String,
    pub(crate) sha: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRefRequest<'a> {
    pub(crate) sha: &'a str,
    pub(crate) force: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) path: String,
    pub(crate) sha: String,
    #[serde(default)]
    pub(crate) content: Option<String>,
    #[serde(default)]
    pub(crate) encoding: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PutContentRequest<'a> {
    pub(crate) message: &'a str,
    pub(crate) content: String,
    pub(crate) branch: &'a str,
    pub(crate) sha: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PutContentResponse {
    pub(crate) commit: CommitSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitSummary {
    pub(crate) sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullResponse {
    pub(crate) number: u64,
    pub(crate) html_url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePullRequest<'a> {
    pub(crate) title: &'a str,
    pub(crate) head: &'a str,
    pub(crate) base: &'a str,
    pub(crate) body: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdatePullRequest<'a> {
    pub(crate) title: &'a str,
    pub(crate) body: &'a str,
}

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiProblem {
    pub(crate) message: String,
}

//! HTTP client for the GitHub REST API.

use archdoc_core::{
    FileUpdate, GitRef, HostError, HostResult, NewPullRequest, PullQuery, PullRequest,
    PullRequestEdit, RepositoryFile, RepositoryHost,
};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::models::{
    ApiProblem, ContentResponse, CreatePullRequest, CreateRefRequest, PullResponse,
    PutContentRequest, PutContentResponse, RefResponse, UpdatePullRequest, UpdateRefRequest,
};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const HEADER_API_VERSION: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";
const REFS_PREFIX: &str = "refs/heads/";

/// Repository host backed by the GitHub REST API for one repository.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_url: Url,
    owner: String,
    repo: String,
}

impl GithubClient {
    /// Build a client for `owner/repo` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value, the API URL
    /// cannot carry path segments, or the HTTP client cannot be constructed.
    pub fn new(api_url: Url, token: &str, owner: &str, repo: &str) -> HostResult<Self> {
        if api_url.cannot_be_a_base() {
            return Err(HostError::Transport {
                operation: "build-client",
                detail: format!("API URL '{api_url}' cannot be used as a base"),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            HostError::Transport {
                operation: "build-client",
                detail: "token contains invalid characters".to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, auth);
        default_headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        default_headers.insert(HEADER_API_VERSION, HeaderValue::from_static(API_VERSION));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("archdoc/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|err| HostError::Transport {
                operation: "build-client",
                detail: format!("failed to build HTTP client: {err}"),
            })?;

        Ok(Self {
            http,
            api_url,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// `owner/repo` this client targets.
    #[must_use]
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Build `{api}/repos/{owner}/{repo}/{segments...}`. Each segment may contain
    /// `/`, which is kept as a path separator.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str()])
                .extend(segments.iter().copied().flat_map(|segment| segment.split('/')));
        }
        url
    }

    async fn send(operation: &'static str, request: RequestBuilder) -> HostResult<Response> {
        let response = request.send().await.map_err(|err| HostError::Transport {
            operation,
            detail: err.to_string(),
        })?;
        debug!(operation, status = %response.status(), "github response");
        Ok(response)
    }

    async fn send_ok(operation: &'static str, request: RequestBuilder) -> HostResult<Response> {
        let response = Self::send(operation, request).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(classify_problem(operation, response).await)
        }
    }

    async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> HostResult<T> {
        response.json::<T>().await.map_err(|err| HostError::Decode {
            operation,
            detail: err.to_string(),
        })
    }
}

#[async_trait]
impl RepositoryHost for GithubClient {
    async fn get_ref(&self, branch: &str) -> HostResult<Option<GitRef>> {
        const OP: &str = "get-ref";
        let url = self.endpoint(&["git", "ref", "heads", branch]);
        let response = Self::send(OP, self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(classify_problem(OP, response).await);
        }
        let body: RefResponse = Self::decode(OP, response).await?;
        Ok(Some(git_ref(body)))
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> HostResult<GitRef> {
        const OP: &str = "create-ref";
        let url = self.endpoint(&["git", "refs"]);
        let payload = CreateRefRequest {
            name: format!("{REFS_PREFIX}{branch}"),
            sha,
        };
        let response = Self::send_ok(OP, self.http.post(url).json(&payload)).await?;
        let body: RefResponse = Self::decode(OP, response).await?;
        Ok(git_ref(body))
    }

    async fn update_ref(&self, branch: &str, sha: &str, force: bool) -> HostResult<GitRef> {
        const OP: &str = "update-ref";
        let url = self.endpoint(&["git", "refs", "heads", branch]);
        let payload = UpdateRefRequest { sha, force };
        let response = Self::send_ok(OP, self.http.patch(url).json(&payload)).await?;
        let body: RefResponse = Self::decode(OP, response).await?;
        Ok(git_ref(body))
    }

    async fn get_content(&self, path: &str, branch: &str) -> HostResult<RepositoryFile> {
        const OP: &str = "get-content";
        let url = self.endpoint(&["contents", path]);
        let request = self.http.get(url).query(&[("ref", branch)]);
        let response = Self::send_ok(OP, request).await?;
        let body: serde_json::Value = Self::decode(OP, response).await?;

        // Directories come back as an array of entries.
        if body.is_array() {
            return Err(HostError::NotAFile {
                path: path.to_string(),
            });
        }
        let file: ContentResponse =
            serde_json::from_value(body).map_err(|err| HostError::Decode {
                operation: OP,
                detail: err.to_string(),
            })?;
        let Some(encoded) = file.content.filter(|_| file.kind == "file") else {
            return Err(HostError::NotAFile { path: file.path });
        };
        // Files over 1 MB come back with `encoding: none` and an empty body.
        if file.encoding.as_deref() != Some("base64") {
            return Err(HostError::Decode {
                operation: OP,
                detail: format!(
                    "{} has unsupported content encoding '{}'",
                    file.path,
                    file.encoding.as_deref().unwrap_or("missing")
                ),
            });
        }

        Ok(RepositoryFile {
            text: decode_content(OP, &encoded)?,
            path: file.path,
            sha: file.sha,
        })
    }

    async fn put_content(&self, update: &FileUpdate) -> HostResult<String> {
        const OP: &str = "put-content";
        let url = self.endpoint(&["contents", update.path.as_str()]);
        let payload = PutContentRequest {
            message: &update.message,
            content: general_purpose::STANDARD.encode(update.text.as_bytes()),
            branch: &update.branch,
            sha: &update.prior_sha,
        };
        let response = Self::send_ok(OP, self.http.put(url).json(&payload)).await?;
        let body: PutContentResponse = Self::decode(OP, response).await?;
        Ok(body.commit.sha)
    }

    async fn list_pulls(&self, query: &PullQuery) -> HostResult<Vec<PullRequest>> {
        const OP: &str = "list-pulls";
        let url = self.endpoint(&["pulls"]);
        let head = format!("{}:{}", self.owner, query.head);
        let request = self.http.get(url).query(&[
            ("state", "open"),
            ("head", head.as_str()),
            ("base", query.base.as_str()),
        ]);
        let response = Self::send_ok(OP, request).await?;
        let body: Vec<PullResponse> = Self::decode(OP, response).await?;
        Ok(body.into_iter().map(pull_request).collect())
    }

    async fn create_pull(&self, pull: &NewPullRequest) -> HostResult<PullRequest> {
        const OP: &str = "create-pull";
        let url = self.endpoint(&["pulls"]);
        let payload = CreatePullRequest {
            title: &pull.title,
            head: &pull.head,
            base: &pull.base,
            body: &pull.body,
        };
        let response = Self::send_ok(OP, self.http.post(url).json(&payload)).await?;
        let body: PullResponse = Self::decode(OP, response).await?;
        Ok(pull_request(body))
    }

    async fn update_pull(&self, number: u64, edit: &PullRequestEdit) -> HostResult<PullRequest> {
        const OP: &str = "update-pull";
        let number = number.to_string();
        let url = self.endpoint(&["pulls", number.as_str()]);
        let payload = UpdatePullRequest {
            title: &edit.title,
            body: &edit.body,
        };
        let response = Self::send_ok(OP, self.http.patch(url).json(&payload)).await?;
        let body: PullResponse = Self::decode(OP, response).await?;
        Ok(pull_request(body))
    }
}

fn git_ref(body: RefResponse) -> GitRef {
    let branch = body
        .name
        .strip_prefix(REFS_PREFIX)
        .map_or_else(|| body.name.clone(), str::to_string);
    GitRef {
        branch,
        sha: body.object.sha,
    }
}

fn pull_request(body: PullResponse) -> PullRequest {
    PullRequest {
        number: body.number,
        html_url: body.html_url,
    }
}

/// Decode a base64 content field; GitHub wraps it at 60 columns.
fn decode_content(operation: &'static str, encoded: &str) -> HostResult<String> {
    let compact: String = encoded.chars().filter(|ch| !ch.is_ascii_whitespace()).collect();
    let bytes = general_purpose::STANDARD
        .decode(compact)
        .map_err(|err| HostError::Decode {
            operation,
            detail: format!("invalid base64 content: {err}"),
        })?;
    String::from_utf8(bytes).map_err(|err| HostError::Decode {
        operation,
        detail: format!("content is not UTF-8: {err}"),
    })
}

/// Classify a non-success response into a host error.
async fn classify_problem(operation: &'static str, response: Response) -> HostError {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&bytes).trim().to_string();

    let message = serde_json::from_slice::<ApiProblem>(&bytes)
        .map(|problem| problem.message)
        .unwrap_or_else(|_| {
            if body_text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body_text
            }
        });

    HostError::Status {
        operation,
        status: status.as_u16(),
        message,
    }
}

//! Error types for section editing, repository host calls, and publishing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing a section editor.
#[derive(Debug, Error)]
pub enum SectionError {
    /// The marker scan pattern failed to compile.
    #[error("failed to compile section pattern")]
    RegexCompile {
        /// Pattern source after escaping.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// Errors reported by a [`RepositoryHost`](crate::host::RepositoryHost) implementation.
#[derive(Debug, Error)]
pub enum HostError {
    /// The request could not be sent or the response could not be read.
    #[error("{operation} request failed: {detail}")]
    Transport {
        /// Host operation identifier.
        operation: &'static str,
        /// Transport failure detail.
        detail: String,
    },
    /// The host answered with a non-success status.
    #[error("{operation} returned status {status}: {message}")]
    Status {
        /// Host operation identifier.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Message reported by the host.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("{operation} response could not be decoded: {detail}")]
    Decode {
        /// Host operation identifier.
        operation: &'static str,
        /// Decoding failure detail.
        detail: String,
    },
    /// The requested path exists but is not a regular file.
    #[error("{path} is not a file")]
    NotAFile {
        /// Repository path.
        path: String,
    },
}

/// Convenience alias for repository host results.
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised while publishing the architecture section.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Failed to read the local document.
    #[error("failed to read {}", .path.display())]
    ReadDocument {
        /// Document path.
        path: PathBuf,
        /// IO error.
        source: io::Error,
    },
    /// Failed to write the local document.
    #[error("failed to write {}", .path.display())]
    WriteDocument {
        /// Document path.
        path: PathBuf,
        /// IO error.
        source: io::Error,
    },
    /// The section editor could not be prepared.
    #[error(transparent)]
    Section(#[from] SectionError),
    /// The base branch does not exist on the host.
    #[error("base branch '{branch}' not found")]
    BaseBranchMissing {
        /// Base branch name.
        branch: String,
    },
    /// A repository host call failed.
    #[error("remote step '{step}' failed")]
    Host {
        /// Publishing step that issued the call.
        step: &'static str,
        /// Host failure.
        source: HostError,
    },
}

impl PublishError {
    pub(crate) fn host(step: &'static str) -> impl FnOnce(HostError) -> Self {
        move |source| Self::Host { step, source }
    }
}

/// Convenience alias for publishing results.
pub type PublishResult<T> = Result<T, PublishError>;

#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Architecture documentation core: renders the diagram block and keeps the
//! marked README section in sync with it.
//!
//! Layout: `diagram.rs` (block generator), `section.rs` (marked-section upsert),
//! `host.rs` (repository host capability), `publish/` (local and remote publishers),
//! `error.rs` (error types).

pub mod diagram;
pub mod error;
pub mod host;
pub mod publish;
pub mod section;

pub use diagram::{ArchitectureGraph, Component, ComponentKind, Link, render_mermaid};
pub use error::{HostError, HostResult, PublishError, PublishResult, SectionError};
pub use host::{
    FileUpdate, GitRef, NewPullRequest, PullQuery, PullRequest, PullRequestEdit, RepositoryFile,
    RepositoryHost,
};
pub use publish::local::{LocalOutcome, check_local, publish_local};
pub use publish::remote::{
    ContentChange, PullChange, RemoteOutcome, RemotePublisher, RemoteTarget, COMMIT_MESSAGE,
};
pub use section::{SectionEditor, SectionMarkers, upsert_architecture_section};

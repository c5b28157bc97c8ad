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
#![allow(clippy::redundant_pub_crate)]

//! GitHub REST implementation of [`archdoc_core::RepositoryHost`].
//!
//! Layout:
//! - `client.rs`: `GithubClient`, request plumbing, and error classification
//! - `models.rs`: request and response payloads for the REST endpoints used

pub(crate) mod client;
pub(crate) mod models;

pub use client::{DEFAULT_API_URL, GithubClient};

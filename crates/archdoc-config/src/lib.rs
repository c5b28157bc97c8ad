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

//! Validated configuration for the archdoc publishers.
//!
//! Layout: `defaults.rs` (default values), `model.rs` (raw settings and
//! validated configs), `error.rs` (configuration errors).

pub mod defaults;
pub mod error;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use model::{LocalConfig, RemoteConfig, RemoteSettings};

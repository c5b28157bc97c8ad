//! Command handlers grouped by publisher variant.

pub(crate) mod local;
pub(crate) mod publish;

pub(crate) use local::{handle_check, handle_local};
pub(crate) use publish::handle_publish;

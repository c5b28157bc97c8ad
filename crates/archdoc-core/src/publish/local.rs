//! Local publisher: rewrites a README on disk.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::diagram::{ArchitectureGraph, render_mermaid};
use crate::error::{PublishError, PublishResult};
use crate::publish::warn_on_duplicate_sections;
use crate::section::{SectionEditor, SectionMarkers};

/// Result of a local publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOutcome {
    /// The section content changed and the file was rewritten.
    Updated,
    /// The file already held the current section; it was rewritten unchanged.
    Unchanged,
}

/// Render `graph` into the architecture section of the file at `path`.
///
/// The whole file is overwritten with the updated text.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn publish_local(path: &Path, graph: &ArchitectureGraph) -> PublishResult<LocalOutcome> {
    let current = read_document(path)?;
    let updated = updated_document(path, &current, graph)?;

    fs::write(path, &updated).map_err(|source| PublishError::WriteDocument {
        path: path.to_path_buf(),
        source,
    })?;

    if updated == current {
        info!(path = %path.display(), "architecture section already current");
        Ok(LocalOutcome::Unchanged)
    } else {
        debug!(path = %path.display(), bytes = updated.len(), "architecture section written");
        Ok(LocalOutcome::Updated)
    }
}

/// Report whether the file at `path` already holds the section for `graph`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn check_local(path: &Path, graph: &ArchitectureGraph) -> PublishResult<bool> {
    let current = read_document(path)?;
    let updated = updated_document(path, &current, graph)?;
    Ok(updated == current)
}

fn read_document(path: &Path) -> PublishResult<String> {
    fs::read_to_string(path).map_err(|source| PublishError::ReadDocument {
        path: path.to_path_buf(),
        source,
    })
}

fn updated_document(
    path: &Path,
    current: &str,
    graph: &ArchitectureGraph,
) -> PublishResult<String> {
    let editor = SectionEditor::new(SectionMarkers::ARCHITECTURE)?;
    warn_on_duplicate_sections(&editor, current, &path.display().to_string());
    Ok(editor.upsert(current, &render_mermaid(graph)))
}

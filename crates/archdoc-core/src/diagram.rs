//! Mermaid block generation for the architecture section.
//!
//! # Design
//! - The graph type is the stable input contract for diagram rendering.
//! - Rendering currently emits a fixed placeholder flowchart for every graph.

use serde::{Deserialize, Serialize};

const PLACEHOLDER_LINES: [&str; 4] = ["```mermaid", "flowchart LR", "  A[API] --> B[(DB)]", "```"];

/// Architecture graph describing the components of a system and their links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchitectureGraph {
    /// Nodes in the diagram.
    pub components: Vec<Component>,
    /// Directed edges between component identifiers.
    pub links: Vec<Link>,
}

impl ArchitectureGraph {
    /// Returns `true` when the graph has neither components nor links.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.components.is_empty() && self.links.is_empty()
    }
}

/// A single node in the architecture graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Identifier referenced by links.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Shape hint for rendering.
    pub kind: ComponentKind,
}

/// Rendering hint for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Process or API surface.
    Service,
    /// Persistent storage.
    Datastore,
}

/// Directed edge between two components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Source component identifier.
    pub from: String,
    /// Target component identifier.
    pub to: String,
}

/// Render the fenced Mermaid block for `graph`.
///
/// The output always ends with exactly one trailing newline. Graph contents are
/// not rendered yet; every input produces the placeholder flowchart.
#[must_use]
pub fn render_mermaid(graph: &ArchitectureGraph) -> String {
    tracing::trace!(
        components = graph.components.len(),
        links = graph.links.len(),
        "rendering architecture diagram"
    );
    let mut block = PLACEHOLDER_LINES.join("\n");
    block.push('\n');
    block
}

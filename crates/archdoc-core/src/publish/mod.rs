//! Publishers that persist the architecture section locally or through a repository host.

pub mod local;
pub mod remote;

use tracing::warn;

use crate::section::SectionEditor;

fn warn_on_duplicate_sections(editor: &SectionEditor, document: &str, source: &str) {
    let sections = editor.count_sections(document);
    if sections > 1 {
        warn!(
            source,
            sections, "document contains more than one marked section; only the first is updated"
        );
    }
}

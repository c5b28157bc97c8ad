//! Marked-section upsert for markdown documents.
//!
//! # Design
//! - Pure text transformation; callers own all IO.
//! - Only the first marker pair is recognised (shortest match). Later pairs are
//!   left untouched, callers can detect them with [`SectionEditor::count_sections`].
//! - Replacement is spliced by byte range so block text is never interpreted as
//!   a capture-group template.

use regex::Regex;

use crate::error::SectionError;

/// Sentinels and heading that delimit a managed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMarkers {
    /// Literal line opening the section.
    pub start: &'static str,
    /// Literal line closing the section.
    pub end: &'static str,
    /// Heading inserted above a freshly created section.
    pub heading: &'static str,
}

impl SectionMarkers {
    /// Markers for the architecture diagram section.
    pub const ARCHITECTURE: Self = Self {
        start: "<!--ARCH-START-->",
        end: "<!--ARCH-END-->",
        heading: "## Architecture",
    };
}

impl Default for SectionMarkers {
    fn default() -> Self {
        Self::ARCHITECTURE
    }
}

/// Compiled scanner that inserts or replaces a marked section.
#[derive(Debug, Clone)]
pub struct SectionEditor {
    markers: SectionMarkers,
    pattern: Regex,
}

impl SectionEditor {
    /// Compile the section scanner for `markers`.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::RegexCompile`] if the escaped pattern cannot be compiled.
    pub fn new(markers: SectionMarkers) -> Result<Self, SectionError> {
        let source = format!(
            "(?s){}.*?{}",
            regex::escape(markers.start),
            regex::escape(markers.end)
        );
        let pattern =
            Regex::new(&source).map_err(|source_err| SectionError::RegexCompile {
                pattern: source.clone(),
                source: source_err,
            })?;
        Ok(Self { markers, pattern })
    }

    /// Markers this editor scans for.
    #[must_use]
    pub const fn markers(&self) -> &SectionMarkers {
        &self.markers
    }

    /// Number of non-overlapping marker pairs in `document`.
    #[must_use]
    pub fn count_sections(&self, document: &str) -> usize {
        self.pattern.find_iter(document).count()
    }

    /// Insert `block` into the marked section of `document`.
    ///
    /// When a marker pair exists the first one is replaced in place and all other
    /// text is preserved. Otherwise the heading and a new section are appended
    /// after normalising the document to end with a newline.
    #[must_use]
    pub fn upsert(&self, document: &str, block: &str) -> String {
        let section = self.render_section(block);

        if let Some(found) = self.pattern.find(document) {
            let mut updated = String::with_capacity(
                document.len() - found.as_str().len() + section.len(),
            );
            updated.push_str(&document[..found.start()]);
            updated.push_str(&section);
            updated.push_str(&document[found.end()..]);
            return updated;
        }

        let mut updated = String::with_capacity(
            document.len() + self.markers.heading.len() + section.len() + 4,
        );
        updated.push_str(document);
        if !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push('\n');
        updated.push_str(self.markers.heading);
        updated.push('\n');
        updated.push_str(&section);
        updated.push('\n');
        updated
    }

    fn render_section(&self, block: &str) -> String {
        format!("{}\n\n{block}\n\n{}", self.markers.start, self.markers.end)
    }
}

/// Upsert `block` into the architecture section of `document`.
///
/// # Errors
///
/// Returns an error if the architecture section scanner cannot be compiled.
pub fn upsert_architecture_section(document: &str, block: &str) -> Result<String, SectionError> {
    Ok(SectionEditor::new(SectionMarkers::ARCHITECTURE)?.upsert(document, block))
}

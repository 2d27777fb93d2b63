//! Documents - one editable text per tab
//!
//! The title is derived from the name and the modified flag, so the
//! modified marker can never drift out of sync or be applied twice.

use crate::buffer::TextBuffer;
use crate::files;
use std::path::{Path, PathBuf};

/// Placeholder name of a never-saved document
pub const UNTITLED: &str = "Untitled";

/// Prefix shown in the title of a document with unsaved changes
pub const MODIFIED_MARKER: &str = "*";

/// An open document: a text buffer plus where it lives on disk
#[derive(Debug)]
pub struct Document {
    /// Display name (placeholder or file base name)
    name: String,
    /// File path, if the document has been loaded or saved
    path: Option<PathBuf>,
    /// Text content
    buffer: TextBuffer,
    /// Content differs from the last load/save
    modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A new, empty, untitled document
    pub fn new() -> Self {
        Self {
            name: UNTITLED.to_string(),
            path: None,
            buffer: TextBuffer::new(),
            modified: false,
        }
    }

    /// A document holding text loaded from `path`
    pub fn loaded(path: &Path, text: &str) -> Self {
        let mut doc = Self::new();
        doc.load(path, text);
        doc
    }

    /// Tab title: `"* name"` when modified, otherwise just the name
    pub fn title(&self) -> String {
        if self.modified {
            format!("{} {}", MODIFIED_MARKER, self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Never edited, never saved, still carrying the placeholder name
    pub fn is_empty(&self) -> bool {
        self.name == UNTITLED && self.path.is_none() && !self.modified && self.buffer.is_empty()
    }

    /// Flag unsaved changes; repeated calls have no further effect
    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// Replace the content with freshly loaded text
    pub fn load(&mut self, path: &Path, text: &str) {
        self.buffer.set_text(text);
        self.name = files::base_name(path);
        self.path = Some(path.to_path_buf());
        self.modified = false;
    }

    /// Record a successful save to `path`
    pub fn saved_as(&mut self, path: &Path) {
        self.name = files::base_name(path);
        self.path = Some(path.to_path_buf());
        self.modified = false;
    }
}

//! Document model - the content hosted in a tab and its file state

use ropey::Rope;
use std::path::{Path, PathBuf};

use super::document_host::DocumentId;

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// Unique identifier (set when added to a DocumentHost)
    pub id: Option<DocumentId>,

    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Display name for untitled documents (e.g., "Untitled", "Untitled-2")
    pub untitled_name: Option<String>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            id: None,
            buffer: Rope::from(text),
            file_path: None,
            untitled_name: None,
            is_modified: false,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self {
            id: None,
            buffer: Rope::from(content),
            file_path: Some(path),
            untitled_name: None,
            is_modified: false,
        })
    }

    /// Create a new empty document with a target file path
    ///
    /// Used when the path does not exist yet. The file will be created when
    /// the document is saved.
    pub fn new_with_path(path: PathBuf) -> Self {
        Self {
            id: None,
            buffer: Rope::from(""),
            file_path: Some(path),
            untitled_name: None,
            is_modified: true, // Mark as modified since file doesn't exist yet
        }
    }

    /// Get the display name for this document.
    /// Returns the filename if saved, the untitled name if set, or "Untitled" as fallback.
    pub fn display_name(&self) -> String {
        if let Some(path) = &self.file_path {
            if let Some(name) = path.file_name() {
                return name.to_string_lossy().to_string();
            }
        }
        if let Some(name) = &self.untitled_name {
            return name.clone();
        }
        "Untitled".to_string()
    }

    /// Whether this document was opened from (or will be saved to) `path`
    pub fn is_backed_by(&self, path: &Path) -> bool {
        self.file_path.as_deref() == Some(path)
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Full buffer contents
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Insert text at a char index, clamped to the end of the buffer
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let idx = char_idx.min(self.buffer.len_chars());
        self.buffer.insert(idx, text);
        self.is_modified = true;
    }

    /// Clear the modified flag after a successful save
    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_no_path() {
        let doc = Document::new();
        assert!(doc.file_path.is_none());
        assert!(!doc.is_modified);
        assert!(doc.id.is_none());
    }

    #[test]
    fn test_with_text_creates_buffer() {
        let doc = Document::with_text("one\ntwo\nthree");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.text(), "one\ntwo\nthree");
        assert!(!doc.is_modified);
    }

    #[test]
    fn test_new_with_path_preserves_path() {
        let path = PathBuf::from("/tmp/notes.md");
        let doc = Document::new_with_path(path.clone());
        assert_eq!(doc.file_path, Some(path.clone()));
        assert!(doc.is_modified); // Should be marked modified since file doesn't exist
        assert!(doc.is_backed_by(&path));
    }

    #[test]
    fn test_display_name_with_path() {
        let doc = Document::new_with_path(PathBuf::from("/src/main.rs"));
        assert_eq!(doc.display_name(), "main.rs");
    }

    #[test]
    fn test_display_name_with_untitled() {
        let mut doc = Document::new();
        doc.untitled_name = Some("Untitled-2".to_string());
        assert_eq!(doc.display_name(), "Untitled-2");
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(Document::new().display_name(), "Untitled");
    }

    #[test]
    fn test_insert_marks_modified() {
        let mut doc = Document::with_text("world");
        doc.insert(0, "hello ");
        assert_eq!(doc.text(), "hello world");
        assert!(doc.is_modified);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut doc = Document::with_text("abc");
        doc.insert(100, "d");
        assert_eq!(doc.text(), "abcd");
    }

    #[test]
    fn test_empty_insert_keeps_clean() {
        let mut doc = Document::with_text("abc");
        doc.insert(1, "");
        assert!(!doc.is_modified);
    }

    #[test]
    fn test_mark_saved_clears_modified() {
        let mut doc = Document::new();
        doc.insert(0, "x");
        doc.mark_saved();
        assert!(!doc.is_modified);
    }

    #[test]
    fn test_from_file_missing_errors() {
        let result = Document::from_file(PathBuf::from("/definitely/not/here.txt"));
        assert!(result.is_err());
    }
}

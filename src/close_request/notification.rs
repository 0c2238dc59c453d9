//! Notification payloads delivered to close observers

use std::cell::Cell;
use std::path::PathBuf;

use super::CloseRequestError;
use crate::model::{Document, DocumentId};

/// A pending request to close one document
///
/// One instance is built per close attempt and is never reused. Observers
/// only ever see it through `&`, so the single mutation available to them is
/// [`mark_cancel`](Self::mark_cancel). The flag lives in a `Cell`, which also
/// keeps the notification on the thread that created it.
#[derive(Debug)]
pub struct CloseRequestNotification<'a> {
    document: &'a Document,
    cancel: Cell<bool>,
}

impl<'a> CloseRequestNotification<'a> {
    /// Create a notification for `document`
    ///
    /// Fails with [`CloseRequestError::InvalidArgument`] when there is no
    /// document to close.
    pub fn new(document: Option<&'a Document>) -> Result<Self, CloseRequestError> {
        let document =
            document.ok_or_else(|| CloseRequestError::missing_document("absent reference"))?;
        Ok(Self {
            document,
            cancel: Cell::new(false),
        })
    }

    /// The document this request is about
    pub fn document_to_close(&self) -> &'a Document {
        self.document
    }

    /// Veto the close. Calling it again has no further effect.
    pub fn mark_cancel(&self) {
        self.cancel.set(true);
    }

    /// Whether any observer has vetoed so far
    pub fn is_cancelled(&self) -> bool {
        self.cancel.get()
    }
}

/// Sent after a document has been removed from the host
///
/// Unlike [`CloseRequestNotification`] this cannot be cancelled; the
/// document is already gone when observers see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentClosed {
    pub id: DocumentId,
    pub title: String,
    pub file_path: Option<PathBuf>,
}

impl DocumentClosed {
    pub(crate) fn from_document(id: DocumentId, document: &Document) -> Self {
        Self {
            id,
            title: document.display_name(),
            file_path: document.file_path.clone(),
        }
    }
}

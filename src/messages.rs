//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::{DocumentId, GroupId, TabId};

/// Layout messages (tabs, groups, closing documents)
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    /// Create a new untitled document in the focused group
    NewTab,

    /// Open a file in a new tab in the focused group
    OpenFile(PathBuf),

    /// Close a specific tab
    CloseTab(TabId),

    /// Close the active tab in the focused group
    CloseFocusedTab,

    /// Close a document and every tab showing it
    CloseDocument(DocumentId),

    /// Close every document except the given one
    CloseOtherDocuments(DocumentId),

    /// Close every document
    CloseAllDocuments,

    /// Focus a specific group
    FocusGroup(GroupId),

    /// Switch to next tab in focused group
    NextTab,

    /// Switch to previous tab in focused group
    PrevTab,
}

/// App-level messages (saving, shutdown)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Save a document to its file path
    SaveDocument(DocumentId),
    /// Save finished
    SaveCompleted {
        id: DocumentId,
        result: Result<(), String>,
    },
    /// Tear the host down; quits only if every document closes
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Layout(LayoutMsg),
    App(AppMsg),
}

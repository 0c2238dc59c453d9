//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::messages::{AppMsg, Msg};
use crate::model::DocumentId;

/// Side effects requested by `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Write a document's contents to disk
    SaveFile {
        id: DocumentId,
        path: PathBuf,
        content: String,
    },
    /// Every document closed; the application may exit
    Quit,
}

impl Cmd {
    /// Run the command synchronously, returning the follow-up message if any
    pub fn execute(self) -> Option<Msg> {
        match self {
            Cmd::SaveFile { id, path, content } => {
                let result = std::fs::write(&path, content)
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e));
                Some(Msg::App(AppMsg::SaveCompleted { id, result }))
            }
            Cmd::Quit => None,
        }
    }
}

//! Application model - the complete state of the document host
//!
//! This module contains the state types following the Elm Architecture pattern.

pub mod document;
pub mod document_host;

pub use document::Document;
pub use document_host::{
    CloseOutcome, CloseReport, DocumentGroup, DocumentHost, DocumentId, GroupId, Tab, TabId,
};

use crate::config::HostConfig;

/// The complete application model
#[derive(Debug)]
pub struct Workbench {
    /// Document host containing all documents, groups, and close observers
    pub host: DocumentHost,
    /// Configuration the host was built from
    pub config: HostConfig,
    /// Transient status message (last close/save result)
    pub status: Option<String>,
}

impl Workbench {
    /// Build a workbench whose host installs the observers `config` enables
    pub fn new(config: HostConfig) -> Self {
        Self {
            host: DocumentHost::with_config(&config),
            config,
            status: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

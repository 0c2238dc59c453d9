//! Observers the host installs from configuration

use super::{CloseRequestNotification, CloseRequestObserver};

/// Vetoes closing any document with unsaved changes
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsavedChangesGuard;

impl CloseRequestObserver for UnsavedChangesGuard {
    fn on_close_requested(
        &self,
        notification: &CloseRequestNotification<'_>,
    ) -> anyhow::Result<()> {
        let document = notification.document_to_close();
        if document.is_modified {
            tracing::info!(
                document = %document.display_name(),
                "close vetoed: document has unsaved changes"
            );
            notification.mark_cancel();
        }
        Ok(())
    }
}

/// Logs every close attempt; never vetoes
#[derive(Debug, Clone, Copy, Default)]
pub struct CloseRequestLogger;

impl CloseRequestObserver for CloseRequestLogger {
    fn on_close_requested(
        &self,
        notification: &CloseRequestNotification<'_>,
    ) -> anyhow::Result<()> {
        let document = notification.document_to_close();
        tracing::debug!(
            document = %document.display_name(),
            id = ?document.id,
            modified = document.is_modified,
            already_vetoed = notification.is_cancelled(),
            "close requested"
        );
        Ok(())
    }
}

//! App message handlers (saving, shutdown)

use super::layout::report_batch;
use crate::close_request::CloseRequestError;
use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::Workbench;

/// Handle app messages (saving, shutdown)
pub fn update_app(model: &mut Workbench, msg: AppMsg) -> Result<Option<Cmd>, CloseRequestError> {
    match msg {
        AppMsg::SaveDocument(id) => {
            let Some(document) = model.host.document(id) else {
                model.set_status("No such document");
                return Ok(None);
            };
            match document.file_path.clone() {
                Some(path) => {
                    let content = document.text();
                    model.set_status("Saving...");
                    Ok(Some(Cmd::SaveFile { id, path, content }))
                }
                None => {
                    model.set_status("No file path - cannot save");
                    Ok(None)
                }
            }
        }

        AppMsg::SaveCompleted { id, result } => {
            match result {
                Ok(()) => {
                    if let Some(document) = model.host.document_mut(id) {
                        document.mark_saved();
                        let name = document.display_name();
                        model.set_status(format!("Saved: {}", name));
                    }
                }
                Err(e) => {
                    tracing::warn!("save failed: {}", e);
                    model.set_status(format!("Error: {}", e));
                }
            }
            Ok(None)
        }

        AppMsg::Quit => {
            // Container teardown: every document gets its own close request
            let report = model.host.close_all()?;
            report_batch(model, &report);
            if report.all_closed() {
                Ok(Some(Cmd::Quit))
            } else {
                tracing::info!(kept = report.kept.len(), "quit cancelled by close observers");
                Ok(None)
            }
        }
    }
}

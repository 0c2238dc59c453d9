//! Layout message handlers (tabs, groups, closing documents)

use crate::close_request::CloseRequestError;
use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::{CloseOutcome, CloseReport, DocumentId, Workbench};

/// Handle layout messages (tabs, groups, closing documents)
pub fn update_layout(
    model: &mut Workbench,
    msg: LayoutMsg,
) -> Result<Option<Cmd>, CloseRequestError> {
    match msg {
        LayoutMsg::NewTab => {
            model.host.new_untitled();
        }

        LayoutMsg::OpenFile(path) => match model.host.open_file(&path) {
            Ok(id) => {
                let name = display_name(model, id);
                model.set_status(format!("Opened: {}", name));
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                model.set_status(format!("Error: {:#}", e));
            }
        },

        LayoutMsg::CloseTab(tab_id) => {
            let name = model
                .host
                .groups
                .iter()
                .flat_map(|g| &g.tabs)
                .find(|t| t.id == tab_id)
                .map(|t| display_name(model, t.document_id));
            let outcome = model.host.close_tab(tab_id)?;
            report_outcome(model, outcome, name.unwrap_or_default());
        }

        LayoutMsg::CloseFocusedTab => {
            let active = model
                .host
                .focused_group()
                .and_then(|g| g.active_tab())
                .map(|t| (t.id, t.document_id));
            if let Some((tab_id, doc_id)) = active {
                let name = display_name(model, doc_id);
                let outcome = model.host.close_tab(tab_id)?;
                report_outcome(model, outcome, name);
            }
        }

        LayoutMsg::CloseDocument(doc_id) => {
            let name = display_name(model, doc_id);
            let outcome = model.host.close_document(doc_id)?;
            report_outcome(model, outcome, name);
        }

        LayoutMsg::CloseOtherDocuments(keep) => {
            let report = model.host.close_others(keep)?;
            report_batch(model, &report);
        }

        LayoutMsg::CloseAllDocuments => {
            let report = model.host.close_all()?;
            report_batch(model, &report);
        }

        LayoutMsg::FocusGroup(group_id) => {
            model.host.focus_group(group_id);
        }

        LayoutMsg::NextTab => model.host.next_tab(),

        LayoutMsg::PrevTab => model.host.prev_tab(),
    }

    Ok(None)
}

// ============================================================================
// Status helpers
// ============================================================================

fn display_name(model: &Workbench, doc_id: DocumentId) -> String {
    model
        .host
        .document(doc_id)
        .map(|d| d.display_name())
        .unwrap_or_default()
}

fn report_outcome(model: &mut Workbench, outcome: CloseOutcome, name: String) {
    match outcome {
        CloseOutcome::Closed | CloseOutcome::TabClosed => {
            model.set_status(format!("Closed: {}", name))
        }
        CloseOutcome::Vetoed => model.set_status(format!("Close cancelled: {}", name)),
    }
}

pub(super) fn report_batch(model: &mut Workbench, report: &CloseReport) {
    if report.all_closed() {
        model.set_status(format!("Closed {} document(s)", report.closed.len()));
    } else {
        model.set_status(format!(
            "Closed {} document(s), {} kept open",
            report.closed.len(),
            report.kept.len()
        ));
    }
}

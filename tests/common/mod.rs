//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dockhost::close_request::Subscription;
use dockhost::config::HostConfig;
use dockhost::model::{DocumentHost, DocumentId, Workbench};

/// Config with no built-in observers, so tests control every subscription
pub fn bare_config() -> HostConfig {
    HostConfig {
        guard_unsaved_changes: false,
        log_close_requests: false,
        ..HostConfig::default()
    }
}

/// Host with `n` untitled documents ("Untitled", "Untitled-2", ...)
pub fn host_with_documents(n: usize) -> (DocumentHost, Vec<DocumentId>) {
    let mut host = DocumentHost::new();
    let ids = (0..n).map(|_| host.new_untitled()).collect();
    (host, ids)
}

/// Workbench with default config (guard + logger) and `n` untitled documents
pub fn workbench_with_documents(n: usize) -> (Workbench, Vec<DocumentId>) {
    let mut model = Workbench::default();
    let ids = (0..n).map(|_| model.host.new_untitled()).collect();
    (model, ids)
}

/// Shared log that observers append to, in call order
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Subscribe an observer that records `label` and never vetoes
pub fn recording_observer(host: &DocumentHost, log: &CallLog, label: &str) -> Subscription {
    let log = Rc::clone(log);
    let label = label.to_string();
    host.on_close_requested(move |n| {
        log.borrow_mut().push(format!(
            "{}:{}",
            label,
            n.document_to_close().display_name()
        ));
        Ok(())
    })
}

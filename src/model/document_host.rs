//! Document host - owns documents, the groups (panes) showing them, and the
//! close-request protocol that guards their teardown
//!
//! Every path that removes a document goes through [`DocumentHost::close_document`],
//! which asks the close-request observers first and only destroys the
//! document's tabs when nobody vetoed.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::document::Document;
use crate::close_request::{
    CloseRequestError, CloseRequestLogger, CloseRequestNotification, CloseRequestNotifier,
    CloseRequestObserver, ClosedNotifier, DocumentClosed, Subscription, UnsavedChangesGuard,
};
use crate::config::HostConfig;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

/// Unique identifier for a document group (pane)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub u64);

/// Unique identifier for a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

// ============================================================================
// Tabs and groups
// ============================================================================

/// A tab shows one document inside a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub document_id: DocumentId,
}

/// A group contains a tab bar and displays one document at a time
#[derive(Debug, Clone)]
pub struct DocumentGroup {
    pub id: GroupId,
    pub tabs: Vec<Tab>,
    pub active_tab_index: usize,
}

impl DocumentGroup {
    fn new(id: GroupId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active_tab_index: 0,
        }
    }

    /// Get the currently active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active_tab_index)
    }

    /// Get the document shown by the active tab
    pub fn active_document_id(&self) -> Option<DocumentId> {
        self.active_tab().map(|t| t.document_id)
    }

    fn remove_tab(&mut self, index: usize) {
        self.tabs.remove(index);
        if index < self.active_tab_index {
            self.active_tab_index -= 1;
        }
        if self.active_tab_index >= self.tabs.len() && !self.tabs.is_empty() {
            self.active_tab_index = self.tabs.len() - 1;
        }
        if self.tabs.is_empty() {
            self.active_tab_index = 0;
        }
    }
}

// ============================================================================
// Close results
// ============================================================================

/// Result of a single close attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The document was removed along with all of its tabs
    Closed,
    /// Only the tab went away; the document is still shown elsewhere
    TabClosed,
    /// An observer vetoed; nothing changed
    Vetoed,
}

/// Result of closing several documents, one close attempt each
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloseReport {
    pub closed: Vec<DocumentId>,
    pub kept: Vec<DocumentId>,
}

impl CloseReport {
    /// True when no document was vetoed
    pub fn all_closed(&self) -> bool {
        self.kept.is_empty()
    }
}

// ============================================================================
// Document Host (top-level container)
// ============================================================================

/// Owns all documents and groups, and runs the close-request protocol
#[derive(Debug)]
pub struct DocumentHost {
    /// All open documents
    pub documents: HashMap<DocumentId, Document>,

    /// Groups in display order (never empty)
    pub groups: Vec<DocumentGroup>,

    /// Currently focused group
    pub focused_group_id: GroupId,

    close_requests: CloseRequestNotifier,
    closed: ClosedNotifier,

    /// Observers installed from HostConfig; dropped with the host
    builtin_observers: Vec<Subscription>,

    untitled_prefix: String,

    /// ID generators
    next_document_id: u64,
    next_group_id: u64,
    next_tab_id: u64,

    /// Counter for generating unique untitled document names
    next_untitled_number: u32,
}

impl Default for DocumentHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHost {
    /// Create a host with one empty group and no observers
    pub fn new() -> Self {
        let group_id = GroupId(1);
        Self {
            documents: HashMap::new(),
            groups: vec![DocumentGroup::new(group_id)],
            focused_group_id: group_id,
            close_requests: CloseRequestNotifier::new(),
            closed: ClosedNotifier::default(),
            builtin_observers: Vec::new(),
            untitled_prefix: "Untitled".to_string(),
            next_document_id: 1,
            next_group_id: 2,
            next_tab_id: 1,
            next_untitled_number: 1,
        }
    }

    /// Create a host and install the built-in observers the config enables
    ///
    /// The logger is subscribed before the unsaved-changes guard, so it
    /// always sees the attempt before any built-in veto.
    pub fn with_config(config: &HostConfig) -> Self {
        let mut host = Self::new();
        host.untitled_prefix = config.untitled_prefix.clone();

        if config.log_close_requests {
            let sub = host.close_requests.subscribe_observer(CloseRequestLogger);
            host.builtin_observers.push(sub);
        }
        if config.guard_unsaved_changes {
            let sub = host.close_requests.subscribe_observer(UnsavedChangesGuard);
            host.builtin_observers.push(sub);
        }
        host
    }

    // =========================================================================
    // ID generation
    // =========================================================================

    fn next_document_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_document_id);
        self.next_document_id += 1;
        id
    }

    fn next_group_id(&mut self) -> GroupId {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        id
    }

    fn next_tab_id(&mut self) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        id
    }

    /// Generate the next untitled document name
    pub fn next_untitled_name(&mut self) -> String {
        let n = self.next_untitled_number;
        self.next_untitled_number += 1;
        if n == 1 {
            self.untitled_prefix.clone()
        } else {
            format!("{}-{}", self.untitled_prefix, n)
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// The close-request notifier guarding every document teardown
    pub fn close_requests(&self) -> &CloseRequestNotifier {
        &self.close_requests
    }

    /// Subscribe a closure that may veto document closes
    pub fn on_close_requested<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&CloseRequestNotification<'_>) -> anyhow::Result<()> + 'static,
    {
        self.close_requests.subscribe(handler)
    }

    /// Subscribe a [`CloseRequestObserver`] implementation
    pub fn subscribe_observer<O>(&self, observer: O) -> Subscription
    where
        O: CloseRequestObserver + 'static,
    {
        self.close_requests.subscribe_observer(observer)
    }

    /// Subscribe to documents that have been closed
    pub fn on_document_closed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&DocumentClosed) + 'static,
    {
        self.closed.subscribe(handler)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    pub fn group(&self, id: GroupId) -> Option<&DocumentGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_index(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == id)
    }

    /// Get the currently focused group
    pub fn focused_group(&self) -> Option<&DocumentGroup> {
        self.group(self.focused_group_id)
    }

    /// Get the currently focused group mutably
    pub fn focused_group_mut(&mut self) -> Option<&mut DocumentGroup> {
        let id = self.focused_group_id;
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Document shown by the focused group's active tab
    pub fn active_document_id(&self) -> Option<DocumentId> {
        self.focused_group().and_then(|g| g.active_document_id())
    }

    /// Document IDs in the order their first tab appears
    pub fn documents_in_tab_order(&self) -> Vec<DocumentId> {
        let mut ids = Vec::with_capacity(self.documents.len());
        for tab in self.groups.iter().flat_map(|g| &g.tabs) {
            if !ids.contains(&tab.document_id) {
                ids.push(tab.document_id);
            }
        }
        ids
    }

    /// All tabs currently showing a document
    pub fn tabs_for_document(&self, doc_id: DocumentId) -> Vec<TabId> {
        self.groups
            .iter()
            .flat_map(|g| &g.tabs)
            .filter(|t| t.document_id == doc_id)
            .map(|t| t.id)
            .collect()
    }

    /// Locate a tab as (group index, tab index)
    fn find_tab(&self, tab_id: TabId) -> Option<(usize, usize)> {
        self.groups.iter().enumerate().find_map(|(gi, g)| {
            g.tabs
                .iter()
                .position(|t| t.id == tab_id)
                .map(|ti| (gi, ti))
        })
    }

    pub fn tab_count(&self) -> usize {
        self.groups.iter().map(|g| g.tabs.len()).sum()
    }

    /// Find an open document by its file path
    pub fn find_open_file(&self, path: &Path) -> Option<DocumentId> {
        let canonical = path.canonicalize().ok();
        self.documents
            .iter()
            .find(|(_, doc)| {
                doc.is_backed_by(path)
                    || match (&canonical, &doc.file_path) {
                        (Some(canonical), Some(doc_path)) => {
                            doc_path.canonicalize().ok().as_ref() == Some(canonical)
                        }
                        _ => false,
                    }
            })
            .map(|(id, _)| *id)
    }

    // =========================================================================
    // Opening documents
    // =========================================================================

    /// Add a document and show it in a new tab of the focused group
    pub fn open_document(&mut self, mut document: Document) -> DocumentId {
        let doc_id = self.next_document_id();
        document.id = Some(doc_id);
        tracing::debug!(id = doc_id.0, name = %document.display_name(), "document opened");
        self.documents.insert(doc_id, document);

        let group_id = self.focused_group_id;
        self.push_tab(group_id, doc_id);
        self.assert_invariants();
        doc_id
    }

    /// Create a new untitled document in the focused group
    pub fn new_untitled(&mut self) -> DocumentId {
        let mut document = Document::new();
        document.untitled_name = Some(self.next_untitled_name());
        self.open_document(document)
    }

    /// Open a file, or focus it if it is already open
    ///
    /// A path that does not exist yet opens as an empty, modified document.
    pub fn open_file(&mut self, path: &Path) -> anyhow::Result<DocumentId> {
        if let Some(existing) = self.find_open_file(path) {
            self.focus_document(existing);
            return Ok(existing);
        }

        let document = if path.exists() {
            Document::from_file(path.to_path_buf())
                .with_context(|| format!("Failed to open {}", path.display()))?
        } else {
            Document::new_with_path(path.to_path_buf())
        };
        Ok(self.open_document(document))
    }

    /// Append an empty group after the existing ones
    ///
    /// The group stays until a close empties it; closes elsewhere leave it
    /// alone.
    pub fn add_group(&mut self) -> GroupId {
        let id = self.next_group_id();
        self.groups.push(DocumentGroup::new(id));
        id
    }

    /// Show an already open document in another group as well
    pub fn open_in_group(&mut self, doc_id: DocumentId, group_id: GroupId) -> Option<TabId> {
        if !self.documents.contains_key(&doc_id) || self.group_index(group_id).is_none() {
            return None;
        }
        let tab_id = self.push_tab(group_id, doc_id);
        self.focused_group_id = group_id;
        self.assert_invariants();
        tab_id
    }

    fn push_tab(&mut self, group_id: GroupId, doc_id: DocumentId) -> Option<TabId> {
        let tab_id = self.next_tab_id();
        let group = self.groups.iter_mut().find(|g| g.id == group_id)?;
        group.tabs.push(Tab {
            id: tab_id,
            document_id: doc_id,
        });
        group.active_tab_index = group.tabs.len() - 1;
        Some(tab_id)
    }

    // =========================================================================
    // Focus and tab navigation
    // =========================================================================

    /// Focus a group. Returns false for unknown groups.
    pub fn focus_group(&mut self, group_id: GroupId) -> bool {
        if self.group_index(group_id).is_some() {
            self.focused_group_id = group_id;
            true
        } else {
            false
        }
    }

    /// Focus the first tab showing `doc_id`
    pub fn focus_document(&mut self, doc_id: DocumentId) -> bool {
        for group in &mut self.groups {
            if let Some(idx) = group.tabs.iter().position(|t| t.document_id == doc_id) {
                group.active_tab_index = idx;
                self.focused_group_id = group.id;
                return true;
            }
        }
        false
    }

    pub fn next_tab(&mut self) {
        if let Some(group) = self.focused_group_mut() {
            if !group.tabs.is_empty() {
                group.active_tab_index = (group.active_tab_index + 1) % group.tabs.len();
            }
        }
    }

    pub fn prev_tab(&mut self) {
        if let Some(group) = self.focused_group_mut() {
            if !group.tabs.is_empty() {
                group.active_tab_index = if group.active_tab_index == 0 {
                    group.tabs.len() - 1
                } else {
                    group.active_tab_index - 1
                };
            }
        }
    }

    // =========================================================================
    // Closing
    // =========================================================================

    /// Ask the close-request observers about `doc_id` without closing anything
    ///
    /// Unknown ids fail with [`CloseRequestError::InvalidArgument`].
    pub fn request_close(&self, doc_id: DocumentId) -> Result<bool, CloseRequestError> {
        let document = self
            .documents
            .get(&doc_id)
            .ok_or_else(|| CloseRequestError::missing_document(format!("{:?}", doc_id)))?;
        self.close_requests.request_close(Some(document))
    }

    /// Close a document after the observers agree
    ///
    /// On a veto or an observer error the document and its tabs are left
    /// untouched.
    pub fn close_document(&mut self, doc_id: DocumentId) -> Result<CloseOutcome, CloseRequestError> {
        if !self.request_close(doc_id)? {
            tracing::debug!(id = doc_id.0, "close vetoed");
            return Ok(CloseOutcome::Vetoed);
        }
        self.tear_down(doc_id);
        Ok(CloseOutcome::Closed)
    }

    /// Close a single tab
    ///
    /// If other tabs still show the same document only this tab is removed and
    /// no close request is raised. Closing the last tab of a document closes
    /// the document.
    pub fn close_tab(&mut self, tab_id: TabId) -> Result<CloseOutcome, CloseRequestError> {
        let (group_idx, tab_idx) = self.find_tab(tab_id).ok_or_else(|| {
            CloseRequestError::InvalidArgument(format!("no such tab: {:?}", tab_id))
        })?;
        let doc_id = self.groups[group_idx].tabs[tab_idx].document_id;

        if self.tabs_for_document(doc_id).len() > 1 {
            let group_id = self.groups[group_idx].id;
            self.groups[group_idx].remove_tab(tab_idx);
            self.remove_emptied_groups(&[group_id]);
            self.assert_invariants();
            return Ok(CloseOutcome::TabClosed);
        }

        self.close_document(doc_id)
    }

    /// Close every document, one close request each, in tab order
    ///
    /// An observer error stops the batch; documents closed before it stay
    /// closed.
    pub fn close_all(&mut self) -> Result<CloseReport, CloseRequestError> {
        let ids = self.documents_in_tab_order();
        self.close_batch(ids)
    }

    /// Close every document except `keep`
    ///
    /// An unknown `keep` fails with [`CloseRequestError::InvalidArgument`]
    /// and closes nothing.
    pub fn close_others(&mut self, keep: DocumentId) -> Result<CloseReport, CloseRequestError> {
        if !self.documents.contains_key(&keep) {
            return Err(CloseRequestError::missing_document(format!("{:?}", keep)));
        }
        let ids = self
            .documents_in_tab_order()
            .into_iter()
            .filter(|id| *id != keep)
            .collect();
        self.close_batch(ids)
    }

    fn close_batch(&mut self, ids: Vec<DocumentId>) -> Result<CloseReport, CloseRequestError> {
        let mut report = CloseReport::default();
        for id in ids {
            match self.close_document(id)? {
                CloseOutcome::Vetoed => report.kept.push(id),
                CloseOutcome::Closed | CloseOutcome::TabClosed => report.closed.push(id),
            }
        }
        tracing::debug!(
            closed = report.closed.len(),
            kept = report.kept.len(),
            "batch close finished"
        );
        Ok(report)
    }

    /// Remove a document and every tab showing it, then notify
    fn tear_down(&mut self, doc_id: DocumentId) {
        let mut touched = Vec::new();
        for group in &mut self.groups {
            while let Some(idx) = group.tabs.iter().position(|t| t.document_id == doc_id) {
                group.remove_tab(idx);
                if !touched.contains(&group.id) {
                    touched.push(group.id);
                }
            }
        }
        self.remove_emptied_groups(&touched);

        if let Some(document) = self.documents.remove(&doc_id) {
            tracing::debug!(id = doc_id.0, name = %document.display_name(), "document closed");
            self.closed
                .publish(&DocumentClosed::from_document(doc_id, &document));
        }
        self.assert_invariants();
    }

    /// Drop the given groups if a close left them empty, keeping at least one
    fn remove_emptied_groups(&mut self, candidates: &[GroupId]) {
        for &group_id in candidates {
            if self.groups.len() <= 1 {
                break;
            }
            let Some(idx) = self
                .groups
                .iter()
                .position(|g| g.id == group_id && g.tabs.is_empty())
            else {
                continue;
            };
            let removed = self.groups.remove(idx);
            if removed.id == self.focused_group_id {
                let fallback = idx.saturating_sub(1).min(self.groups.len() - 1);
                self.focused_group_id = self.groups[fallback].id;
            }
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Validate internal consistency
    ///
    /// This function checks that:
    /// - at least one group exists and focused_group_id points to one
    /// - all groups have valid active_tab_index values
    /// - all tabs reference existing documents
    /// - every document is shown by at least one tab
    ///
    /// Panics in debug builds if any invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        assert!(!self.groups.is_empty(), "host has no groups");
        assert!(
            self.group_index(self.focused_group_id).is_some(),
            "focused_group_id {:?} does not exist in groups",
            self.focused_group_id
        );

        for group in &self.groups {
            if !group.tabs.is_empty() {
                assert!(
                    group.active_tab_index < group.tabs.len(),
                    "Group {:?} has active_tab_index {} but only {} tabs",
                    group.id,
                    group.active_tab_index,
                    group.tabs.len()
                );
            }
            for tab in &group.tabs {
                assert!(
                    self.documents.contains_key(&tab.document_id),
                    "Tab {:?} references non-existent document {:?}",
                    tab.id,
                    tab.document_id
                );
            }
        }

        for doc_id in self.documents.keys() {
            assert!(
                !self.tabs_for_document(*doc_id).is_empty(),
                "Document {:?} is not shown by any tab",
                doc_id
            );
        }
    }

    /// No-op in release builds
    #[cfg(not(debug_assertions))]
    #[inline]
    pub fn assert_invariants(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn host_with_docs(n: usize) -> (DocumentHost, Vec<DocumentId>) {
        let mut host = DocumentHost::new();
        let ids = (0..n).map(|_| host.new_untitled()).collect();
        (host, ids)
    }

    #[test]
    fn test_new_host_has_one_empty_group() {
        let host = DocumentHost::new();
        assert_eq!(host.groups.len(), 1);
        assert!(host.documents.is_empty());
        assert_eq!(host.close_requests().observer_count(), 0);
    }

    #[test]
    fn test_untitled_names_increment() {
        let (host, ids) = host_with_docs(3);
        let names: Vec<String> = ids
            .iter()
            .map(|id| host.document(*id).unwrap().display_name())
            .collect();
        assert_eq!(names, vec!["Untitled", "Untitled-2", "Untitled-3"]);
    }

    #[test]
    fn test_open_document_activates_new_tab() {
        let (host, ids) = host_with_docs(2);
        assert_eq!(host.active_document_id(), Some(ids[1]));
        assert_eq!(host.document(ids[0]).unwrap().id, Some(ids[0]));
    }

    #[test]
    fn test_close_document_without_observers() {
        let (mut host, ids) = host_with_docs(2);
        assert_eq!(host.close_document(ids[0]).unwrap(), CloseOutcome::Closed);
        assert!(host.document(ids[0]).is_none());
        assert_eq!(host.tab_count(), 1);
    }

    #[test]
    fn test_veto_leaves_document_and_tabs() {
        let (mut host, ids) = host_with_docs(2);
        let _veto = host.on_close_requested(|n| {
            n.mark_cancel();
            Ok(())
        });
        assert_eq!(host.close_document(ids[1]).unwrap(), CloseOutcome::Vetoed);
        assert!(host.document(ids[1]).is_some());
        assert_eq!(host.tab_count(), 2);
        assert_eq!(host.active_document_id(), Some(ids[1]));
    }

    #[test]
    fn test_unknown_document_is_invalid_argument() {
        let (mut host, _) = host_with_docs(1);
        let err = host.close_document(DocumentId(99)).unwrap_err();
        assert!(matches!(err, CloseRequestError::InvalidArgument(_)));
    }

    #[test]
    fn test_close_tab_of_shared_document_skips_request() {
        let (mut host, ids) = host_with_docs(1);
        let group2 = host.add_group();
        let tab2 = host.open_in_group(ids[0], group2).unwrap();

        let asked = Rc::new(Cell::new(0));
        let asked_in = Rc::clone(&asked);
        let _sub = host.on_close_requested(move |_| {
            asked_in.set(asked_in.get() + 1);
            Ok(())
        });

        assert_eq!(host.close_tab(tab2).unwrap(), CloseOutcome::TabClosed);
        assert_eq!(asked.get(), 0);
        assert!(host.document(ids[0]).is_some());
        // group2 emptied and was removed, focus falls back to the first group
        assert_eq!(host.groups.len(), 1);
        assert_eq!(host.focused_group_id, GroupId(1));
    }

    #[test]
    fn test_close_last_tab_closes_document() {
        let (mut host, ids) = host_with_docs(1);
        let tab = host.tabs_for_document(ids[0])[0];
        assert_eq!(host.close_tab(tab).unwrap(), CloseOutcome::Closed);
        assert!(host.documents.is_empty());
        assert_eq!(host.groups.len(), 1);
    }

    #[test]
    fn test_close_document_removes_all_its_tabs() {
        let (mut host, ids) = host_with_docs(2);
        let group2 = host.add_group();
        host.open_in_group(ids[0], group2);
        assert_eq!(host.tabs_for_document(ids[0]).len(), 2);

        host.close_document(ids[0]).unwrap();
        assert!(host.tabs_for_document(ids[0]).is_empty());
        assert_eq!(host.groups.len(), 1);
        assert_eq!(host.active_document_id(), Some(ids[1]));
    }

    #[test]
    fn test_close_all_reports_kept_documents() {
        let (mut host, ids) = host_with_docs(3);
        host.document_mut(ids[1]).unwrap().is_modified = true;
        let _guard = host.subscribe_observer(UnsavedChangesGuard);

        let report = host.close_all().unwrap();
        assert_eq!(report.closed, vec![ids[0], ids[2]]);
        assert_eq!(report.kept, vec![ids[1]]);
        assert!(!report.all_closed());
        assert_eq!(host.documents_in_tab_order(), vec![ids[1]]);
    }

    #[test]
    fn test_close_all_uses_one_notification_per_document() {
        let (mut host, _) = host_with_docs(3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = Rc::clone(&seen);
        let _sub = host.on_close_requested(move |n| {
            assert!(!n.is_cancelled());
            seen_in
                .borrow_mut()
                .push(n.document_to_close().display_name());
            if n.document_to_close().display_name() == "Untitled" {
                n.mark_cancel();
            }
            Ok(())
        });

        let report = host.close_all().unwrap();
        assert_eq!(report.kept.len(), 1);
        assert_eq!(
            *seen.borrow(),
            vec!["Untitled", "Untitled-2", "Untitled-3"]
        );
    }

    #[test]
    fn test_close_others_keeps_target() {
        let (mut host, ids) = host_with_docs(3);
        let report = host.close_others(ids[1]).unwrap();
        assert_eq!(report.closed, vec![ids[0], ids[2]]);
        assert_eq!(host.documents_in_tab_order(), vec![ids[1]]);
    }

    #[test]
    fn test_observer_error_aborts_batch() {
        let (mut host, ids) = host_with_docs(3);
        let _sub = host.on_close_requested(|n| {
            if n.document_to_close().display_name() == "Untitled-2" {
                anyhow::bail!("sync in progress");
            }
            Ok(())
        });

        let err = host.close_all().unwrap_err();
        assert!(matches!(err, CloseRequestError::Observer { .. }));
        assert!(host.document(ids[0]).is_none());
        assert!(host.document(ids[1]).is_some());
        assert!(host.document(ids[2]).is_some());
    }

    #[test]
    fn test_document_closed_published_after_teardown() {
        let (mut host, ids) = host_with_docs(2);
        let closed = Rc::new(RefCell::new(Vec::new()));
        let closed_in = Rc::clone(&closed);
        let _sub = host.on_document_closed(move |e| closed_in.borrow_mut().push(e.id));
        let _veto = host.on_close_requested(|n| {
            if n.document_to_close().display_name() == "Untitled-2" {
                n.mark_cancel();
            }
            Ok(())
        });

        host.close_all().unwrap();
        assert_eq!(*closed.borrow(), vec![ids[0]]);
    }

    #[test]
    fn test_with_config_installs_builtin_observers() {
        let host = DocumentHost::with_config(&HostConfig::default());
        assert_eq!(host.close_requests().observer_count(), 2);

        let config = HostConfig {
            guard_unsaved_changes: false,
            log_close_requests: false,
            untitled_prefix: "Scratch".to_string(),
        };
        let mut host = DocumentHost::with_config(&config);
        assert_eq!(host.close_requests().observer_count(), 0);
        let id = host.new_untitled();
        assert_eq!(host.document(id).unwrap().display_name(), "Scratch");
    }

    #[test]
    fn test_close_others_unknown_keep_closes_nothing() {
        let (mut host, ids) = host_with_docs(3);
        let err = host.close_others(DocumentId(404)).unwrap_err();
        assert!(matches!(err, CloseRequestError::InvalidArgument(_)));
        assert_eq!(host.documents_in_tab_order(), ids);
    }

    #[test]
    fn test_close_keeps_unrelated_empty_group() {
        let (mut host, ids) = host_with_docs(2);
        let group2 = host.add_group();
        assert!(host.focus_group(group2));

        host.close_document(ids[0]).unwrap();
        assert_eq!(host.groups.len(), 2);
        assert_eq!(host.focused_group_id, group2);

        // Emptying group 1 drops it; the empty group 2 is the one that remains
        host.close_document(ids[1]).unwrap();
        assert_eq!(host.groups.len(), 1);
        assert_eq!(host.groups[0].id, group2);
        assert_eq!(host.focused_group_id, group2);
    }

    #[test]
    fn test_prev_next_tab_wrap() {
        let (mut host, ids) = host_with_docs(3);
        host.next_tab();
        assert_eq!(host.active_document_id(), Some(ids[0]));
        host.prev_tab();
        assert_eq!(host.active_document_id(), Some(ids[2]));
    }

    #[test]
    fn test_removing_earlier_tab_keeps_active_document() {
        let (mut host, ids) = host_with_docs(3);
        host.focus_document(ids[2]);
        host.close_document(ids[0]).unwrap();
        assert_eq!(host.active_document_id(), Some(ids[2]));
    }
}

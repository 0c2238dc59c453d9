//! Close-request protocol - lets observers veto closing a document
//!
//! When the host is about to close a document it builds one
//! [`CloseRequestNotification`] for that attempt and hands it, by shared
//! reference, to every subscribed observer in subscription order. Any
//! observer may call [`CloseRequestNotification::mark_cancel`]; once set, the
//! flag stays set for the rest of the dispatch. The host reads the flag after
//! the last observer returns and only tears the document down if nobody
//! vetoed.
//!
//! ## Architecture
//!
//! - `CloseRequestNotification`: per-attempt payload (document + veto flag)
//! - `CloseRequestNotifier`: ordered observer list and the dispatch step
//! - `ObserverList` / `Subscription`: generic ordered, snapshotting observer
//!   storage shared with the post-close [`DocumentClosed`] notification
//! - `UnsavedChangesGuard`, `CloseRequestLogger`: built-in observers
//!
//! Everything here is single-threaded (`Rc`/`Cell`), matching the UI thread
//! that owns the document host.

mod builtin;
mod error;
mod notification;
mod notifier;
mod observers;

pub use builtin::{CloseRequestLogger, UnsavedChangesGuard};
pub use error::CloseRequestError;
pub use notification::{CloseRequestNotification, DocumentClosed};
pub(crate) use notifier::ClosedNotifier;
pub use notifier::{
    CloseRequestHandler, CloseRequestNotifier, CloseRequestObserver, DocumentClosedHandler,
};
pub use observers::{ObserverList, Subscription, SubscriptionId};

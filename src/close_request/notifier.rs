//! Close-request dispatch

use std::rc::Rc;

use super::{
    CloseRequestError, CloseRequestNotification, DocumentClosed, ObserverList, Subscription,
};
use crate::model::Document;

/// Callback shape for close-request observers
pub type CloseRequestHandler = dyn Fn(&CloseRequestNotification<'_>) -> anyhow::Result<()>;

/// Callback shape for post-close observers
pub type DocumentClosedHandler = dyn Fn(&DocumentClosed);

/// Interface for reusable close-request observers
///
/// Closures work too; see [`CloseRequestNotifier::subscribe`].
pub trait CloseRequestObserver {
    /// Inspect a pending close and optionally veto it with `mark_cancel`
    fn on_close_requested(&self, notification: &CloseRequestNotification<'_>)
        -> anyhow::Result<()>;
}

/// Runs the cancelable close-request protocol for a document host
#[derive(Debug, Default)]
pub struct CloseRequestNotifier {
    observers: ObserverList<CloseRequestHandler>,
}

impl CloseRequestNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a closure. Observers are notified in subscription order.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&CloseRequestNotification<'_>) -> anyhow::Result<()> + 'static,
    {
        let handler: Rc<CloseRequestHandler> = Rc::new(handler);
        let subscription = self.observers.subscribe(handler);
        tracing::debug!(
            subscription = subscription.id().0,
            observers = self.observers.len(),
            "close-request observer subscribed"
        );
        subscription
    }

    /// Subscribe a [`CloseRequestObserver`] implementation
    pub fn subscribe_observer<O>(&self, observer: O) -> Subscription
    where
        O: CloseRequestObserver + 'static,
    {
        self.subscribe(move |notification| observer.on_close_requested(notification))
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Ask every observer whether `document` may close
    ///
    /// Returns `Ok(true)` to proceed, `Ok(false)` if an observer vetoed. The
    /// notifier never closes anything itself. The first observer error stops
    /// the dispatch and is returned; callers must treat it like a veto.
    pub fn request_close(&self, document: Option<&Document>) -> Result<bool, CloseRequestError> {
        let notification = CloseRequestNotification::new(document)?;
        let observers = self.observers.snapshot();

        tracing::trace!(
            document = %notification.document_to_close().display_name(),
            observers = observers.len(),
            "dispatching close request"
        );

        for (subscription, observer) in observers {
            if let Err(source) = observer(&notification) {
                tracing::warn!(
                    subscription = subscription.0,
                    error = %source,
                    "close-request observer failed, aborting close"
                );
                return Err(CloseRequestError::Observer {
                    subscription,
                    source,
                });
            }
        }

        let proceed = !notification.is_cancelled();
        tracing::debug!(
            document = %notification.document_to_close().display_name(),
            proceed,
            "close request dispatched"
        );
        Ok(proceed)
    }
}

/// Delivers [`DocumentClosed`] after the host has torn a document down
#[derive(Debug, Default)]
pub(crate) struct ClosedNotifier {
    observers: ObserverList<DocumentClosedHandler>,
}

impl ClosedNotifier {
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&DocumentClosed) + 'static,
    {
        let handler: Rc<DocumentClosedHandler> = Rc::new(handler);
        self.observers.subscribe(handler)
    }

    pub fn publish(&self, event: &DocumentClosed) {
        for (_, observer) in self.observers.snapshot() {
            observer(event);
        }
    }
}

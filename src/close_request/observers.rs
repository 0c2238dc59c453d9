//! Ordered observer storage with removable subscription handles

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Identifies one subscription within its observer list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

struct Entry<F: ?Sized> {
    id: SubscriptionId,
    observer: Rc<F>,
}

/// Type-erased removal so `Subscription` does not carry the handler type
trait Registry {
    fn remove(&self, id: SubscriptionId) -> bool;
}

impl<F: ?Sized> Registry for RefCell<Vec<Entry<F>>> {
    fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }
}

/// Observers kept in subscription order
///
/// `F` is the handler trait object, e.g. `dyn Fn(&Event)`. Delivery works on
/// a snapshot taken by [`snapshot`](Self::snapshot): observers added or
/// removed while a dispatch is running only take part from the next dispatch
/// on, and no `RefCell` borrow is held while observers run.
pub struct ObserverList<F: ?Sized> {
    entries: Rc<RefCell<Vec<Entry<F>>>>,
    next_id: Cell<u64>,
}

impl<F: ?Sized + 'static> ObserverList<F> {
    pub fn new() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(1),
        }
    }

    /// Append an observer; it will be notified after every existing one
    pub fn subscribe(&self, observer: Rc<F>) -> Subscription {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push(Entry { id, observer });

        let weak: Weak<RefCell<Vec<Entry<F>>>> = Rc::downgrade(&self.entries);
        let registry: Weak<dyn Registry> = weak;
        Subscription {
            id,
            registry: Some(registry),
        }
    }

    /// Remove an observer by id. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        Registry::remove(&*self.entries, id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Current observers in delivery order
    pub fn snapshot(&self) -> Vec<(SubscriptionId, Rc<F>)> {
        self.entries
            .borrow()
            .iter()
            .map(|e| (e.id, Rc::clone(&e.observer)))
            .collect()
    }
}

impl<F: ?Sized + 'static> Default for ObserverList<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> std::fmt::Debug for ObserverList<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<u64> = self.entries.borrow().iter().map(|e| e.id.0).collect();
        f.debug_struct("ObserverList")
            .field("subscriptions", &ids)
            .finish()
    }
}

/// Handle returned by `subscribe`
///
/// Dropping the handle unsubscribes the observer. Call
/// [`detach`](Self::detach) to keep the observer for as long as the list
/// itself lives.
#[must_use = "dropping a Subscription unsubscribes the observer; call detach() to keep it"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Option<Weak<dyn Registry>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the observer now. Returns false if the list was already
    /// dropped or the observer was removed by id.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    /// Keep the observer registered without holding on to the handle
    pub fn detach(mut self) {
        self.registry = None;
    }

    fn release(&mut self) -> bool {
        match self.registry.take().and_then(|weak| weak.upgrade()) {
            Some(registry) => registry.remove(self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.registry.is_some())
            .finish()
    }
}

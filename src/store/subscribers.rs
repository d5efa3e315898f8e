use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

pub(crate) type Subscriber = Rc<dyn Fn()>;

/// Ordered subscriber list with removal by subscription id.
///
/// Every call to `add` stamps a fresh id, so the same callback subscribed
/// twice occupies two independent entries.
pub(crate) struct Subscribers {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Subscriber)>>,
}

impl Subscribers {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, subscriber: Subscriber) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, subscriber));
        id
    }

    /// Returns whether an entry was actually removed.
    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Copy of the list as it is now, so callbacks can subscribe, unsubscribe
    /// or dispatch while it is being walked.
    pub(crate) fn snapshot(&self) -> Vec<Subscriber> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect()
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Calling [`unsubscribe`](Self::unsubscribe) removes the subscription it was
/// created for; calling it again does nothing. Dropping the handle does *not*
/// unsubscribe. The handle only holds a weak reference, so it neither keeps
/// the store alive nor fails once the store is gone.
#[must_use = "dropping the handle keeps the subscription alive with no way to remove it"]
pub struct Unsubscribe {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Unsubscribe {
    pub(crate) fn new(id: u64, subscribers: &Rc<Subscribers>) -> Self {
        Self {
            id,
            subscribers: Rc::downgrade(subscribers),
        }
    }

    /// Remove the subscription.
    pub fn unsubscribe(&self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            if subscribers.remove(self.id) {
                trace!(id = self.id, remaining = subscribers.len(), "unsubscribed");
            }
        }
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}

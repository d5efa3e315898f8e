use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::subscribers::{Subscribers, Unsubscribe};
use crate::reducer::Reducer;

struct StoreInner<S, A> {
    reducer: Box<dyn Reducer<S, A>>,
    state: RefCell<Option<Rc<S>>>,
    subscribers: Rc<Subscribers>,
}

/// A single-threaded state container driven by a reducer.
///
/// The state only changes through [`dispatch`](Self::dispatch), which runs the
/// reducer and then notifies every subscriber in subscription order.
///
/// Cloning a `Store` yields another handle onto the same state and
/// subscribers. A subscriber that needs to read its own store should capture
/// a [`WeakStore`] from [`downgrade`](Self::downgrade): a captured `Store`
/// clone forms a reference cycle and the store is never freed.
pub struct Store<S, A> {
    inner: Rc<StoreInner<S, A>>,
}

/// Non-owning handle to a [`Store`].
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use tinstore::Store;
///
/// let store = Store::new(|s: Option<&u32>, n: &u32| s.copied().unwrap_or(0) + n);
/// let last = Rc::new(Cell::new(0));
///
/// let _subscription = store.subscribe({
///     let store = store.downgrade();
///     let last = last.clone();
///     move || {
///         if let Some(store) = store.upgrade() {
///             last.set(store.get().unwrap_or(0));
///         }
///     }
/// });
///
/// store.dispatch(3);
/// assert_eq!(last.get(), 3);
/// ```
pub struct WeakStore<S, A> {
    inner: Weak<StoreInner<S, A>>,
}

impl<S, A> WeakStore<S, A> {
    /// A handle to the store, if it is still alive.
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for WeakStore<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStore")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

/// Create a store from a reducer and an optional initial state.
///
/// The reducer is not called here; until the first dispatch
/// [`Store::get_state`] returns `initial_state` as given.
///
/// ```
/// use tinstore::configure_store;
///
/// #[derive(Debug)]
/// enum Action {
///     Increment,
///     Decrement,
/// }
///
/// let store = configure_store(
///     |state: Option<&i32>, action: &Action| {
///         let count = state.copied().unwrap_or(0);
///         match action {
///             Action::Increment => count + 1,
///             Action::Decrement => count - 1,
///         }
///     },
///     None,
/// );
/// assert_eq!(store.get(), None);
///
/// store.dispatch(Action::Increment);
/// store.dispatch(Action::Increment);
/// store.dispatch(Action::Decrement);
/// assert_eq!(store.get(), Some(1));
/// ```
pub fn configure_store<S, A, R>(reducer: R, initial_state: Option<S>) -> Store<S, A>
where
    R: Reducer<S, A> + 'static,
{
    debug!(has_initial_state = initial_state.is_some(), "store configured");
    Store {
        inner: Rc::new(StoreInner {
            reducer: Box::new(reducer),
            state: RefCell::new(initial_state.map(Rc::new)),
            subscribers: Rc::new(Subscribers::new()),
        }),
    }
}

impl<S, A> Store<S, A> {
    /// Create a store with no initial state.
    pub fn new<R>(reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        configure_store(reducer, None)
    }

    /// Create a store starting from `state`.
    pub fn with_state<R>(reducer: R, state: S) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        configure_store(reducer, Some(state))
    }

    /// The current state, shared rather than cloned.
    pub fn get_state(&self) -> Option<Rc<S>> {
        self.inner.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(Option<&S>) -> T,
    {
        let state = self.get_state();
        f(state.as_deref())
    }

    /// Run the reducer on `action`, store its result and notify subscribers.
    ///
    /// Nothing guards against reentrancy: a reducer or subscriber may dispatch
    /// on this store, and the nested dispatch completes before the outer one
    /// continues. If the reducer panics the previous state is kept and no
    /// subscriber is called.
    pub fn dispatch(&self, action: A) {
        let current = self.get_state();
        let next = self.inner.reducer.reduce(current.as_deref(), &action);
        drop(current);
        *self.inner.state.borrow_mut() = Some(Rc::new(next));

        let subscribers = self.inner.subscribers.snapshot();
        trace!(subscribers = subscribers.len(), "dispatched");
        for subscriber in subscribers {
            subscriber();
        }
    }

    /// Register `callback` to run after every dispatch.
    ///
    /// The callback is not called immediately. Each call registers a new
    /// entry, even for a callback that is already subscribed.
    pub fn subscribe<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn() + 'static,
    {
        let id = self.inner.subscribers.add(Rc::new(callback));
        trace!(id, subscribers = self.inner.subscribers.len(), "subscribed");
        Unsubscribe::new(id, &self.inner.subscribers)
    }

    /// Create a [`WeakStore`] that does not keep this store alive.
    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }
}

impl<S: Clone, A> Store<S, A> {
    /// Get a clone of the current state.
    pub fn get(&self) -> Option<S> {
        self.read(|state| state.cloned())
    }
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.get_state())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

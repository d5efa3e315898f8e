//! The state container.
//!
//! A [`Store`] owns one state value and an ordered list of subscribers. The
//! state changes only through [`Store::dispatch`], which runs the store's
//! reducer and then notifies subscribers.

mod store;
mod subscribers;

pub use store::{configure_store, Store, WeakStore};
pub use subscribers::Unsubscribe;

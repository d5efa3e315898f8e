//! # Tinstore
//!
//! A small, predictable state container for single-threaded Rust.
//!
//! ## Store
//!
//! - [`configure_store`] wraps a [`Reducer`] and an optional initial state
//!   into a [`Store`]
//! - [`Store::dispatch`] runs the reducer and notifies subscribers in order
//! - [`Store::subscribe`] returns an [`Unsubscribe`] handle
//!
//! ## Reducers
//!
//! - Any `Fn(Option<&S>, &A) -> S` is a [`Reducer`]
//! - [`combine_reducers`] builds one reducer over a [`CombinedState`] from a
//!   [`ReducerConfig`] of per-key reducers
//!
//! ```
//! use tinstore::{combine_reducers, configure_store, CombinedState, ReducerConfig};
//!
//! let reducer = combine_reducers(Some(
//!     ReducerConfig::new()
//!         .with("clicks", |s: Option<&usize>, _: &String| s.copied().unwrap_or(0) + 1)
//!         .with("chars", |s: Option<&usize>, a: &String| s.copied().unwrap_or(0) + a.len()),
//! ));
//! let store = configure_store(reducer, None);
//!
//! store.dispatch("hello".to_string());
//! store.dispatch("rust".to_string());
//!
//! assert_eq!(store.get(), Some(CombinedState::from([("chars", 9), ("clicks", 2)])));
//! ```
//!
//! Events are emitted through [`tracing`]; install a subscriber in the
//! application to see them.

pub mod reducer;
pub mod store;

// Re-export main types for convenience
pub use reducer::{combine_reducers, CombinedReducer, CombinedState, Reducer, ReducerConfig};
pub use store::{configure_store, Store, Unsubscribe, WeakStore};

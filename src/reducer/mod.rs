//! Reducers and reducer composition.
//!
//! A [`Reducer`] turns the previous state and an action into the next state.
//! [`combine_reducers`] builds one reducer over a map of substates out of a
//! [`ReducerConfig`] of per-key reducers.

mod combine;
mod reducer;

pub use combine::{combine_reducers, CombinedReducer, CombinedState, ReducerConfig};
pub use reducer::Reducer;

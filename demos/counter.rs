//! Combined reducers with heterogeneous slices, logging through `tracing`.
//!
//! Run with `RUST_LOG=tinstore=trace cargo run --example counter` to see the
//! store's events.

use serde_json::{json, Value};
use tinstore::{combine_reducers, configure_store, ReducerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum Action {
    Increment,
    Decrement,
    Reset,
}

fn count(state: Option<&Value>, action: &Action) -> Value {
    let current = state.and_then(Value::as_i64).unwrap_or(0);
    match action {
        Action::Increment => json!(current + 1),
        Action::Decrement => json!(current - 1),
        Action::Reset => json!(0),
    }
}

fn history(state: Option<&Value>, action: &Action) -> Value {
    let mut entries = state
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    entries.push(json!(format!("{action:?}")));
    Value::Array(entries)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let reducer = combine_reducers(Some(
        ReducerConfig::new().with("count", count).with("history", history),
    ));
    let store = configure_store(reducer, None);

    let _log = store.subscribe({
        let store = store.downgrade();
        move || {
            if let Some(state) = store.upgrade().and_then(|store| store.get_state()) {
                println!("count = {}", state["count"]);
            }
        }
    });

    for action in [
        Action::Increment,
        Action::Increment,
        Action::Decrement,
        Action::Reset,
        Action::Increment,
    ] {
        store.dispatch(action);
    }

    store.read(|state| {
        if let Some(state) = state {
            println!("history = {}", state["history"]);
        }
    });
}

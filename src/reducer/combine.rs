use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::Reducer;

/// State produced by a [`CombinedReducer`]: one substate per configured key.
///
/// Child reducers run in config insertion order, but the map itself iterates
/// in key order. Code that needs the config order should walk
/// [`CombinedReducer::keys`] and index into the state.
pub type CombinedState<K, S> = BTreeMap<K, S>;

type BoxedReducer<S, A> = Box<dyn Reducer<S, A>>;

/// An insertion-ordered mapping from key to the reducer owning that key's
/// substate.
///
/// The order of insertion is the order in which the combined reducer calls
/// its children. Inserting a key that is already present replaces its reducer
/// but keeps its position.
pub struct ReducerConfig<K, S, A> {
    entries: Vec<(K, BoxedReducer<S, A>)>,
}

impl<K, S, A> ReducerConfig<K, S, A> {
    /// Create an empty config.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Keys in call order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, S, A> ReducerConfig<K, S, A> {

    /// Register `reducer` as the owner of `key`.
    pub fn insert<R>(&mut self, key: K, reducer: R) -> &mut Self
    where
        R: Reducer<S, A> + 'static,
    {
        let reducer: BoxedReducer<S, A> = Box::new(reducer);
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = reducer,
            None => self.entries.push((key, reducer)),
        }
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<R>(mut self, key: K, reducer: R) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        self.insert(key, reducer);
        self
    }
}

impl<K, S, A> Default for ReducerConfig<K, S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S, A, R> FromIterator<(K, R)> for ReducerConfig<K, S, A>
where
    K: PartialEq,
    R: Reducer<S, A> + 'static,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, reducer) in iter {
            config.insert(key, reducer);
        }
        config
    }
}

impl<K: fmt::Debug, S, A> fmt::Debug for ReducerConfig<K, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerConfig")
            .field("keys", &self.entries.iter().map(|(key, _)| key).collect::<Vec<_>>())
            .finish()
    }
}

/// A reducer over a [`CombinedState`] that delegates each key to its own
/// reducer.
///
/// Built by [`combine_reducers`]. The set of keys is fixed at that point.
pub struct CombinedReducer<K, S, A> {
    config: ReducerConfig<K, S, A>,
}

impl<K, S, A> CombinedReducer<K, S, A> {
    /// Keys in call order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.config.keys()
    }

    pub fn len(&self) -> usize {
        self.config.len()
    }

    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }
}

impl<K, S, A> Reducer<CombinedState<K, S>, A> for CombinedReducer<K, S, A>
where
    K: Ord + Clone,
{
    fn reduce(&self, state: Option<&CombinedState<K, S>>, action: &A) -> CombinedState<K, S> {
        self.config
            .entries
            .iter()
            .map(|(key, reducer)| {
                let substate = state.and_then(|state| state.get(key));
                (key.clone(), reducer.reduce(substate, action))
            })
            .collect()
    }
}

impl<K: fmt::Debug, S, A> fmt::Debug for CombinedReducer<K, S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CombinedReducer").field(&self.config).finish()
    }
}

/// Combine per-key reducers into one reducer over a map of substates.
///
/// For every configured key, in insertion order, the child reducer receives
/// that key's substate (`None` when the whole state is `None` or the key is
/// absent) and the action unchanged. The result holds exactly the configured
/// keys. Without a config the combined reducer always yields an empty map.
///
/// ```
/// use tinstore::{combine_reducers, Reducer, ReducerConfig};
///
/// let reducer = combine_reducers(Some(
///     ReducerConfig::new()
///         .with("a", |s: Option<&i64>, delta: &i64| s.copied().unwrap_or(5) + delta)
///         .with("b", |s: Option<&i64>, delta: &i64| s.copied().unwrap_or(6) - delta),
/// ));
///
/// let state = reducer.reduce(None, &1);
/// assert_eq!(state["a"], 6);
/// assert_eq!(state["b"], 5);
/// ```
pub fn combine_reducers<K, S, A>(config: Option<ReducerConfig<K, S, A>>) -> CombinedReducer<K, S, A> {
    let config = config.unwrap_or_default();
    debug!(keys = config.len(), "combined reducer built");
    CombinedReducer { config }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Payload(i64);

    fn add(state: Option<&i64>, action: &Payload) -> i64 {
        state.copied().unwrap_or(5) + action.0
    }

    fn sub(state: Option<&i64>, action: &Payload) -> i64 {
        state.copied().unwrap_or(6) - action.0
    }

    #[test]
    fn empty_config_yields_empty_state() {
        let reducer = combine_reducers::<&str, i64, Payload>(None);
        assert!(reducer.is_empty());

        let existing = CombinedState::from([("stale", 1)]);
        assert!(reducer.reduce(None, &Payload(1)).is_empty());
        assert!(reducer.reduce(Some(&existing), &Payload(1)).is_empty());

        let reducer = combine_reducers::<&str, i64, Payload>(Some(ReducerConfig::new()));
        assert!(reducer.reduce(Some(&existing), &Payload(1)).is_empty());
    }

    #[test]
    fn children_see_none_without_state() {
        let reducer = combine_reducers(Some(ReducerConfig::new().with("a", add).with("b", sub)));

        let state = reducer.reduce(None, &Payload(0));
        assert_eq!(state, CombinedState::from([("a", 5), ("b", 6)]));
    }

    #[test]
    fn children_receive_their_substate() {
        let reducer = combine_reducers(Some(ReducerConfig::new().with("a", add).with("b", sub)));

        let state = CombinedState::from([("a", 55), ("b", 66)]);
        let first = reducer.reduce(Some(&state), &Payload(1));
        assert_eq!(first, CombinedState::from([("a", 56), ("b", 65)]));

        let second = reducer.reduce(Some(&first), &Payload(2));
        assert_eq!(second, CombinedState::from([("a", 58), ("b", 63)]));
    }

    #[test]
    fn missing_key_gets_none_and_unknown_keys_are_dropped() {
        let reducer = combine_reducers(Some(ReducerConfig::new().with("a", add).with("b", sub)));

        let state = CombinedState::from([("a", 10), ("extra", 99)]);
        let next = reducer.reduce(Some(&state), &Payload(1));
        assert_eq!(next, CombinedState::from([("a", 11), ("b", 5)]));
    }

    #[test]
    fn children_run_in_insertion_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut config = ReducerConfig::new();
        for key in ["zeta", "alpha", "mid"] {
            let calls = calls.clone();
            config.insert(key, move |_: Option<&u8>, _: &()| {
                calls.borrow_mut().push(key);
                0
            });
        }

        let reducer = combine_reducers(Some(config));
        reducer.reduce(None, &());

        assert_eq!(*calls.borrow(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(reducer.keys().copied().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn state_iterates_in_key_order() {
        let reducer = combine_reducers(Some(
            ReducerConfig::new()
                .with("zeta", |_: Option<&u8>, _: &()| 1)
                .with("alpha", |_: Option<&u8>, _: &()| 2),
        ));

        let state = reducer.reduce(None, &());
        assert_eq!(state.keys().copied().collect::<Vec<_>>(), vec!["alpha", "zeta"]);

        let in_config_order: Vec<_> = reducer.keys().map(|key| state[key]).collect();
        assert_eq!(in_config_order, vec![1, 2]);
    }

    #[test]
    fn config_keys_only_need_equality() {
        #[derive(PartialEq)]
        struct Slot(u8);

        let config = ReducerConfig::new()
            .with(Slot(1), add)
            .with(Slot(2), sub)
            .with(Slot(1), sub);
        assert_eq!(config.len(), 2);

        let reducer = combine_reducers(Some(config));
        assert_eq!(reducer.keys().map(|slot| slot.0).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn reinserting_a_key_replaces_in_place() {
        let config = ReducerConfig::new()
            .with("a", add)
            .with("b", sub)
            .with("a", |_: Option<&i64>, _: &Payload| 0);

        assert_eq!(config.len(), 2);
        assert_eq!(config.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);

        let reducer = combine_reducers(Some(config));
        let state = reducer.reduce(None, &Payload(3));
        assert_eq!(state, CombinedState::from([("a", 0), ("b", 3)]));
    }

    #[test]
    fn config_collects_from_pairs() {
        let config: ReducerConfig<String, i64, Payload> = vec![
            ("a".to_string(), add as fn(Option<&i64>, &Payload) -> i64),
            ("b".to_string(), sub),
        ]
        .into_iter()
        .collect();

        let reducer = combine_reducers(Some(config));
        assert_eq!(reducer.len(), 2);
        assert_eq!(format!("{reducer:?}"), r#"CombinedReducer(ReducerConfig { keys: ["a", "b"] })"#);
    }

    #[test]
    fn combined_reducers_nest() {
        let inner = combine_reducers(Some(ReducerConfig::new().with("count", add)));
        let outer = combine_reducers(Some(ReducerConfig::new().with("counter", inner)));

        let first = outer.reduce(None, &Payload(1));
        let second = outer.reduce(Some(&first), &Payload(1));
        assert_eq!(second["counter"]["count"], 7);
    }
}

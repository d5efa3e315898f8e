/// A state transition function.
///
/// A reducer takes the previous state and an action and returns the next
/// state. The previous state is `None` when the store was created without an
/// initial state and nothing has been dispatched yet, so every reducer must be
/// able to produce a state from nothing.
///
/// Any closure or function of the shape `Fn(Option<&S>, &A) -> S` is a
/// reducer:
///
/// ```
/// use tinstore::Reducer;
///
/// let counter = |state: Option<&i32>, delta: &i32| state.copied().unwrap_or(0) + delta;
/// assert_eq!(counter.reduce(None, &5), 5);
/// assert_eq!(counter.reduce(Some(&5), &-2), 3);
/// ```
pub trait Reducer<S, A> {
    /// Compute the next state.
    fn reduce(&self, state: Option<&S>, action: &A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<&S>, &A) -> S,
{
    fn reduce(&self, state: Option<&S>, action: &A) -> S {
        self(state, action)
    }
}

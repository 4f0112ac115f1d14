//! crates/foodmatch_core/src/optimistic.rs
//!
//! Optimistic local updates for UI-triggered profile mutations: apply the
//! change to the local mirror immediately, issue the store write, and roll
//! the mirror back when the write fails. Packaged as a small guard so the
//! discipline is testable without any UI framework.

/// Snapshot of the state before an optimistic mutation.
///
/// ```
/// # use foodmatch_core::optimistic::OptimisticMutation;
/// let mut favorites = vec!["a", "b"];
/// let guard = OptimisticMutation::apply(&mut favorites, |f| f.retain(|id| *id != "a"));
/// // ... issue the store write ...
/// let write_failed = true;
/// if write_failed {
///     guard.rollback(&mut favorites);
///     assert_eq!(favorites, vec!["a", "b"]);
/// } else {
///     guard.commit();
/// }
/// ```
#[must_use = "call commit() on success or rollback() on failure"]
pub struct OptimisticMutation<T: Clone> {
    snapshot: T,
}

impl<T: Clone> OptimisticMutation<T> {
    /// Snapshots `state`, applies `mutate` to it, and returns the guard
    /// holding the pre-mutation state.
    pub fn apply(state: &mut T, mutate: impl FnOnce(&mut T)) -> Self {
        let snapshot = state.clone();
        mutate(state);
        Self { snapshot }
    }

    /// The write succeeded; the optimistic state is now the real state.
    pub fn commit(self) {}

    /// The write failed; restores the pre-mutation snapshot.
    pub fn rollback(self, state: &mut T) {
        *state = self.snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_mutates_immediately() {
        let mut state = vec![1, 2, 3];

        let guard = OptimisticMutation::apply(&mut state, |s| s.push(4));

        assert_eq!(state, vec![1, 2, 3, 4]);
        guard.commit();
        assert_eq!(state, vec![1, 2, 3, 4]);
    }

    #[test]
    fn rollback_restores_the_snapshot() {
        let mut state = vec![1, 2, 3];

        let guard = OptimisticMutation::apply(&mut state, |s| s.clear());
        assert!(state.is_empty());

        guard.rollback(&mut state);
        assert_eq!(state, vec![1, 2, 3]);
    }

    #[test]
    fn sequential_mutations_roll_back_independently() {
        let mut state = String::from("base");

        let first = OptimisticMutation::apply(&mut state, |s| s.push_str("+1"));
        first.commit();

        let second = OptimisticMutation::apply(&mut state, |s| s.push_str("+2"));
        assert_eq!(state, "base+1+2");

        second.rollback(&mut state);
        assert_eq!(state, "base+1");
    }
}

//! Sub-automaton views (SPEC_FULL.md §4.10): read-only wrappers that prune
//! an automaton's transitions to an ancestor-closed state set, without
//! renumbering or copying anything — "sharing the state space with the
//! original but pruned to the appropriate SCC classes".

use rustc_hash::FxHashSet;

use ecx_model::{AutomatonBackend, AutomatonTransition, ModelError};

/// A view over `Au` restricted to `allowed`: `successors` drops any
/// transition whose destination falls outside the set, and `initial_states`
/// drops any initial state the set excludes.
///
/// Handed to `ecx_concurrent::run_reachability_pool` (terminal partition) or
/// `ecx_concurrent::run_weak_pool` (weak partition) in place of the raw
/// automaton, so those worker pools only ever see the partition they were
/// dispatched to check plus its ancestors.
pub struct RestrictedAutomaton<'a, Au: AutomatonBackend> {
    inner: &'a Au,
    allowed: &'a FxHashSet<Au::State>,
}

impl<'a, Au: AutomatonBackend> RestrictedAutomaton<'a, Au> {
    /// Builds a view of `inner` restricted to `allowed`.
    #[must_use]
    pub const fn new(inner: &'a Au, allowed: &'a FxHashSet<Au::State>) -> Self {
        Self { inner, allowed }
    }
}

impl<Au: AutomatonBackend> AutomatonBackend for RestrictedAutomaton<'_, Au> {
    type State = Au::State;
    type Guard = Au::Guard;

    fn initial_states(&self) -> Vec<Self::State> {
        self.inner
            .initial_states()
            .into_iter()
            .filter(|s| self.allowed.contains(s))
            .collect()
    }

    fn successors(
        &self,
        state: &Self::State,
    ) -> Result<Vec<AutomatonTransition<Self::State, Self::Guard>>, ModelError> {
        Ok(self
            .inner
            .successors(state)?
            .into_iter()
            .filter(|t| self.allowed.contains(&t.destination))
            .collect())
    }

    fn alphabet_size(&self) -> u32 {
        self.inner.alphabet_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecx_model::{AutomatonState, MarkSet, Strength};
    use ecx_testkit::{PropGuard, TinyAutomaton, TinyAutomatonState};

    fn mixed_automaton() -> TinyAutomaton {
        TinyAutomaton::builder(1)
            .with_state(0, 0, Strength::Strong, true)
            .with_state(1, 1, Strength::Terminal, false)
            .with_state(2, 2, Strength::Weak, false)
            .with_transition(0, PropGuard::tt(), MarkSet::singleton(0), 0)
            .with_transition(0, PropGuard::tt(), MarkSet::EMPTY, 1)
            .with_transition(0, PropGuard::tt(), MarkSet::EMPTY, 2)
            .with_transition(1, PropGuard::tt(), MarkSet::singleton(0), 1)
            .with_transition(2, PropGuard::tt(), MarkSet::EMPTY, 2)
    }

    #[test]
    fn restricted_view_prunes_the_excluded_branch() {
        let automaton = mixed_automaton();
        let allowed: FxHashSet<TinyAutomatonState> = automaton
            .initial_states()
            .into_iter()
            .chain(automaton.successors(&automaton.initial_states()[0]).unwrap().into_iter().map(|t| t.destination))
            .filter(|s| s.strength() != Strength::Weak)
            .collect();
        let view = RestrictedAutomaton::new(&automaton, &allowed);

        let initial = view.initial_states();
        assert_eq!(initial.len(), 1);
        let succs = view.successors(&initial[0]).unwrap();
        assert!(succs.iter().all(|t| t.destination.strength() != Strength::Weak));
        assert!(succs.iter().any(|t| t.destination.strength() == Strength::Terminal));
    }

    #[test]
    fn empty_allowed_set_yields_no_initial_states() {
        let automaton = mixed_automaton();
        let allowed: FxHashSet<TinyAutomatonState> = FxHashSet::default();
        let view = RestrictedAutomaton::new(&automaton, &allowed);
        assert!(view.initial_states().is_empty());
    }
}

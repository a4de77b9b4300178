//! A tiny in-memory Kripke structure and property automaton, built by
//! listing states and transitions explicitly.

use std::collections::BTreeSet;

use ecx_model::{
    AutomatonBackend, AutomatonState, AutomatonTransition, MarkSet, ModelBackend, ModelError,
    ModelState, Strength, Transition,
};
use rustc_hash::FxHashMap;

use crate::guard::PropGuard;

/// A model state in [`TinyModel`]: a plain numeric id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TinyModelState(pub u32);

impl ModelState for TinyModelState {
    fn diagnostic_id(&self) -> u64 {
        u64::from(self.0)
    }
}

/// A hand-built Kripke structure: explicit states, valuations, and
/// transitions.
#[derive(Default)]
pub struct TinyModel {
    initial: Vec<TinyModelState>,
    valuations: FxHashMap<u32, BTreeSet<String>>,
    transitions: FxHashMap<u32, Vec<Transition<TinyModelState, PropGuard>>>,
}

impl TinyModel {
    /// Starts building a model with no states.
    #[must_use]
    pub fn builder() -> Self {
        Self::default()
    }

    /// Declares `id` as a state, with the given set of true atomic
    /// propositions.
    #[must_use]
    pub fn with_state(mut self, id: u32, true_aps: &[&str]) -> Self {
        self.valuations
            .insert(id, true_aps.iter().map(|s| (*s).to_string()).collect());
        self.transitions.entry(id).or_default();
        self
    }

    /// Marks `id` as an initial state.
    #[must_use]
    pub fn with_initial(mut self, id: u32) -> Self {
        self.initial.push(TinyModelState(id));
        self
    }

    /// Adds a transition from `src` to `dst` guarded by `guard`.
    #[must_use]
    pub fn with_transition(mut self, src: u32, guard: PropGuard, dst: u32) -> Self {
        self.transitions.entry(src).or_default().push(Transition {
            guard,
            destination: TinyModelState(dst),
        });
        self
    }
}

impl ModelBackend for TinyModel {
    type State = TinyModelState;
    type Guard = PropGuard;

    fn initial_states(&self) -> Vec<Self::State> {
        self.initial.clone()
    }

    fn successors(
        &self,
        state: &Self::State,
    ) -> Result<Vec<Transition<Self::State, Self::Guard>>, ModelError> {
        Ok(self.transitions.get(&state.0).cloned().unwrap_or_default())
    }

    fn atomic_proposition(&self, state: &Self::State, ap: &str) -> Result<bool, ModelError> {
        Ok(self
            .valuations
            .get(&state.0)
            .is_some_and(|set| set.contains(ap)))
    }
}

/// An automaton state in [`TinyAutomaton`]: a numeric id plus a strength tag
/// assigned at construction time (fixtures do not compute SCC strength,
/// they declare it, since [`ecx_decompose`] is what computes it for real
/// automata).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TinyAutomatonState {
    id: u32,
    scc: u32,
    strength: Strength,
    initial: bool,
}

impl AutomatonState for TinyAutomatonState {
    fn scc_index(&self) -> u32 {
        self.scc
    }

    fn strength(&self) -> Strength {
        self.strength
    }

    fn is_initial(&self) -> bool {
        self.initial
    }
}

/// A hand-built property automaton.
#[derive(Default)]
pub struct TinyAutomaton {
    states: FxHashMap<u32, TinyAutomatonState>,
    transitions: FxHashMap<u32, Vec<AutomatonTransition<TinyAutomatonState, PropGuard>>>,
    alphabet_size: u32,
}

impl TinyAutomaton {
    /// Starts building an automaton with the given acceptance alphabet size.
    #[must_use]
    pub fn builder(alphabet_size: u32) -> Self {
        Self {
            alphabet_size,
            ..Self::default()
        }
    }

    /// Declares state `id` with the given SCC index and strength tag.
    #[must_use]
    pub fn with_state(mut self, id: u32, scc: u32, strength: Strength, initial: bool) -> Self {
        self.states.insert(
            id,
            TinyAutomatonState {
                id,
                scc,
                strength,
                initial,
            },
        );
        self.transitions.entry(id).or_default();
        self
    }

    /// Adds a transition from `src` to `dst`, guarded by `guard` and
    /// discharging `marks`.
    ///
    /// # Panics
    ///
    /// Panics if `src` or `dst` have not been declared via
    /// [`TinyAutomaton::with_state`] first — a fixture-construction error,
    /// not a runtime condition callers need to handle.
    #[must_use]
    pub fn with_transition(mut self, src: u32, guard: PropGuard, marks: MarkSet, dst: u32) -> Self {
        let destination = *self
            .states
            .get(&dst)
            .expect("destination state must be declared before use");
        assert!(
            self.states.contains_key(&src),
            "source state must be declared before use"
        );
        self.transitions.entry(src).or_default().push(AutomatonTransition {
            guard,
            marks,
            destination,
        });
        self
    }
}

impl AutomatonBackend for TinyAutomaton {
    type State = TinyAutomatonState;
    type Guard = PropGuard;

    fn initial_states(&self) -> Vec<Self::State> {
        self.states.values().filter(|s| s.initial).copied().collect()
    }

    fn successors(
        &self,
        state: &Self::State,
    ) -> Result<Vec<AutomatonTransition<Self::State, Self::Guard>>, ModelError> {
        Ok(self.transitions.get(&state.id).cloned().unwrap_or_default())
    }

    fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }
}

//! Automaton-state shape and the strength classification used by the
//! decomposition engine.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ModelError;
use crate::guard::Guard;
use crate::marks::MarkSet;

/// The strength class of the SCC an automaton state belongs to, per the
/// strength-decomposition dispatch table (C12).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "config-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strength {
    /// SCC has no cycles at all; a single reachability pass suffices.
    Terminal,
    /// SCC has cycles but none of them are accepting.
    Weak,
    /// SCC has at least one accepting cycle; needs a full SCC-emptiness
    /// check (Tarjan or Dijkstra, sequential or parallel).
    Strong,
    /// SCC index has not yet been assigned (state not yet visited).
    Unclassified,
}

/// An automaton state: an opaque identifier plus the strength tag of the SCC
/// it belongs to.
///
/// Implementors are expected to be small, `Copy`-able handles (an index into
/// the automaton's own state table); the trait does not prescribe how the
/// automaton computes the strength tag, only that it can report it.
pub trait AutomatonState: Copy + Clone + Debug + Eq + Hash + Send + Sync {
    /// The SCC index this state belongs to. Two states in the same SCC
    /// report the same index.
    fn scc_index(&self) -> u32;

    /// The strength classification of this state's SCC.
    fn strength(&self) -> Strength;

    /// `true` if this is one of the automaton's designated initial states.
    fn is_initial(&self) -> bool;
}

/// One outgoing transition of the property automaton: a guard over the
/// model's atomic propositions, the acceptance marks it discharges, and the
/// destination automaton state.
#[derive(Clone, Debug)]
pub struct AutomatonTransition<A: AutomatonState, G: Guard> {
    /// The propositional guard labelling this transition.
    pub guard: G,
    /// Acceptance marks discharged by taking this transition.
    pub marks: MarkSet,
    /// The destination automaton state.
    pub destination: A,
}

/// The capability interface the property automaton presents to the product
/// iterator (C3). Shares its [`Guard`] type with the paired
/// [`crate::ModelBackend`] so the two sides' guards can be conjoined
/// directly.
pub trait AutomatonBackend: Send + Sync {
    /// The automaton-state type this automaton produces.
    type State: AutomatonState;
    /// The guard type this automaton's transitions are labelled with; must
    /// match the paired model back-end's guard type.
    type Guard: Guard;

    /// Returns the automaton's designated initial states.
    fn initial_states(&self) -> Vec<Self::State>;

    /// Enumerates the outgoing transitions of `state`.
    fn successors(
        &self,
        state: &Self::State,
    ) -> Result<Vec<AutomatonTransition<Self::State, Self::Guard>>, ModelError>;

    /// Total number of distinct acceptance marks in this automaton's
    /// alphabet, used to test a run's mark-set for fullness.
    fn alphabet_size(&self) -> u32;
}

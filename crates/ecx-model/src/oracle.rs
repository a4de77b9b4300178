//! The transition oracle: a thin adapter over the external model back-end.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::ModelError;
use crate::guard::Guard;

/// A model state: an opaque, byte-addressable value the back-end produces.
///
/// The state pool (`ecx_core::pool`) hash-conses values of this type; it
/// only needs them to be hashable, comparable, and cheaply cloneable (a
/// reference-counted handle, not a deep copy).
pub trait ModelState: Clone + Debug + Eq + Hash + Send + Sync {
    /// Stable, back-end-assigned identifier used only for diagnostics (error
    /// messages, statistics); never used for equality or hashing.
    fn diagnostic_id(&self) -> u64;
}

/// One outgoing Kripke-structure transition: a guard and a destination model
/// state. Acceptance marks are not carried here — they are discharged by the
/// *automaton* side of the product (see `ecx_model::automaton`); the product
/// iterator (`ecx_core::product`) is what brings the two together.
#[derive(Clone, Debug)]
pub struct Transition<S: ModelState, G: Guard> {
    /// The propositional guard labelling this transition.
    pub guard: G,
    /// The destination model state.
    pub destination: S,
}

/// The capability interface an external model back-end must implement.
///
/// This is the *only* point of contact between the checking engines and
/// whatever produces the Kripke structure (SPEC_FULL.md §9's "single
/// capability interface" design note): the engines never assume anything
/// about how states are stored, generated, or how many there are.
pub trait ModelBackend: Send + Sync {
    /// The model-state type this back-end produces.
    type State: ModelState;
    /// The guard type this back-end's transitions are labelled with.
    type Guard: Guard;

    /// Returns the back-end's designated initial model states.
    fn initial_states(&self) -> Vec<Self::State>;

    /// Enumerates the outgoing transitions of `state`.
    ///
    /// Implementations materialise transitions on demand; the engines never
    /// cache the returned vector beyond the current DFS frame (spec §3: "a
    /// transition ... is materialised on demand, never stored").
    fn successors(
        &self,
        state: &Self::State,
    ) -> Result<Vec<Transition<Self::State, Self::Guard>>, ModelError>;

    /// Evaluates whether atomic proposition `ap` holds in `state`, used by
    /// the dead-state short-circuit's `named(ap)` policy.
    fn atomic_proposition(&self, state: &Self::State, ap: &str) -> Result<bool, ModelError>;
}

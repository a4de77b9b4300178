//! Hand-built end-to-end scenarios, one per case in SPEC_FULL.md §8.

use ecx_model::{MarkSet, Strength};

use crate::guard::PropGuard;
use crate::model::{TinyAutomaton, TinyModel};

/// Identifies one of the six canned end-to-end scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioName {
    /// A single model state, single automaton state, no cycle at all: the
    /// product is a single terminal state with no self-loop. Language is
    /// empty (no infinite run exists, vacuously).
    NoCycle,
    /// A self-looping model state paired with a single-state automaton
    /// whose self-loop discharges the whole acceptance alphabet: the
    /// product has one accepting SCC. Language is non-empty.
    TrivialAcceptingLoop,
    /// A two-state model cycle paired with a two-state automaton cycle
    /// where the full mark set is only accumulated across the two
    /// transitions, not on either alone: exercises mark-set union across a
    /// strong SCC. Language is non-empty.
    MarksSplitAcrossScc,
    /// A model cycle paired with a *weak* automaton SCC (cycles exist, none
    /// of them individually accepting under the automaton's own
    /// classification): language is empty.
    WeakNonAccepting,
    /// A model with a dead end (no outgoing transitions) paired with an
    /// automaton requiring an infinite run: under the default `none` dead
    /// state policy the finite run is rejected, language empty.
    DeadEndRejected,
    /// The same dead-end topology as [`ScenarioName::DeadEndRejected`], but
    /// the automaton's initial state already carries the full mark set
    /// vacuously (a terminal accepting state), so the language is
    /// non-empty regardless of the dead-state policy.
    DeadEndAcceptedRegardless,
}

/// A complete scenario: a model, an automaton, and the expected emptiness
/// verdict (`true` means the product language is empty).
pub struct Scenario {
    /// The scenario's model fixture.
    pub model: TinyModel,
    /// The scenario's automaton fixture.
    pub automaton: TinyAutomaton,
    /// Expected emptiness: `true` if the checked language is empty.
    pub expected_empty: bool,
}

/// Builds the named scenario.
#[must_use]
pub fn scenario(name: ScenarioName) -> Scenario {
    match name {
        ScenarioName::NoCycle => {
            let model = TinyModel::builder().with_state(0, &[]).with_initial(0);
            let automaton = TinyAutomaton::builder(1)
                .with_state(0, 0, Strength::Terminal, true);
            Scenario {
                model,
                automaton,
                expected_empty: true,
            }
        }
        ScenarioName::TrivialAcceptingLoop => {
            let model = TinyModel::builder()
                .with_state(0, &[])
                .with_initial(0)
                .with_transition(0, PropGuard::tt(), 0);
            let automaton = TinyAutomaton::builder(1)
                .with_state(0, 0, Strength::Strong, true)
                .with_transition(0, PropGuard::tt(), MarkSet::singleton(0), 0);
            Scenario {
                model,
                automaton,
                expected_empty: false,
            }
        }
        ScenarioName::MarksSplitAcrossScc => {
            let model = TinyModel::builder()
                .with_state(0, &[])
                .with_state(1, &[])
                .with_initial(0)
                .with_transition(0, PropGuard::tt(), 1)
                .with_transition(1, PropGuard::tt(), 0);
            let automaton = TinyAutomaton::builder(2)
                .with_state(0, 0, Strength::Strong, true)
                .with_state(1, 0, Strength::Strong, false)
                .with_transition(0, PropGuard::tt(), MarkSet::singleton(0), 1)
                .with_transition(1, PropGuard::tt(), MarkSet::singleton(1), 0);
            Scenario {
                model,
                automaton,
                expected_empty: false,
            }
        }
        ScenarioName::WeakNonAccepting => {
            let model = TinyModel::builder()
                .with_state(0, &[])
                .with_state(1, &[])
                .with_initial(0)
                .with_transition(0, PropGuard::tt(), 1)
                .with_transition(1, PropGuard::tt(), 0);
            let automaton = TinyAutomaton::builder(1)
                .with_state(0, 0, Strength::Weak, true)
                .with_state(1, 0, Strength::Weak, false)
                .with_transition(0, PropGuard::tt(), MarkSet::EMPTY, 1)
                .with_transition(1, PropGuard::tt(), MarkSet::EMPTY, 0);
            Scenario {
                model,
                automaton,
                expected_empty: true,
            }
        }
        ScenarioName::DeadEndRejected => {
            let model = TinyModel::builder().with_state(0, &[]).with_initial(0);
            let automaton = TinyAutomaton::builder(1)
                .with_state(0, 0, Strength::Strong, true);
            Scenario {
                model,
                automaton,
                expected_empty: true,
            }
        }
        ScenarioName::DeadEndAcceptedRegardless => {
            // Same dead-end topology as `DeadEndRejected`: no outgoing
            // transitions on either side. The model state's `done`
            // proposition holds, so under the `named("done")` dead-state
            // policy the implicit self-loop is fully accepting regardless
            // of the automaton's own (empty) transition table; this
            // scenario's `expected_empty` only holds under that policy,
            // not under the default `none` policy (see `DeadEndRejected`).
            let model = TinyModel::builder().with_state(0, &["done"]).with_initial(0);
            let automaton = TinyAutomaton::builder(1).with_state(0, 0, Strength::Terminal, true);
            Scenario {
                model,
                automaton,
                expected_empty: false,
            }
        }
    }
}

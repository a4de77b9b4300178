//! The Kripke × automaton product (C3): synchronises a model back-end and a
//! property automaton into a single product-state transition relation.

use ecx_model::{AutomatonBackend, Guard, MarkSet, ModelBackend, ModelError};

use crate::pool::StatePool;

/// One outgoing transition of the product graph, already canonicalised
/// against the [`StatePool`] that produced it.
#[derive(Clone, Copy, Debug)]
pub struct ProductTransition {
    /// Acceptance marks discharged by taking this transition (inherited
    /// from the automaton side; the model side carries no marks of its
    /// own).
    pub marks: MarkSet,
    /// The destination product state, already interned.
    pub destination: crate::pool::StateId,
}

/// Enumerates the outgoing product transitions of `state`, conjoining every
/// pair of (model transition, automaton transition) whose guards are
/// jointly satisfiable.
///
/// This is on-the-fly by construction: nothing here is cached beyond the
/// current call — the state pool only remembers the canonical id of each
/// destination, never the transition list itself (spec invariant: "a
/// transition is materialised on demand, never stored").
pub fn successors<M, Au>(
    pool: &mut StatePool<M::State, Au::State>,
    model: &M,
    automaton: &Au,
    state: crate::pool::StateId,
) -> Result<Vec<ProductTransition>, ModelError>
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    let model_state = pool.model(state).clone();
    let automaton_state = *pool.automaton(state);

    let model_transitions = model.successors(&model_state)?;
    let automaton_transitions = automaton.successors(&automaton_state)?;

    let mut out = Vec::with_capacity(model_transitions.len() * automaton_transitions.len());
    for mt in &model_transitions {
        for at in &automaton_transitions {
            let conjoined = mt.guard.conjoin(&at.guard);
            if !conjoined.is_satisfiable() {
                continue;
            }
            let destination = pool.intern_direct(mt.destination.clone(), at.destination);
            out.push(ProductTransition {
                marks: at.marks,
                destination,
            });
        }
    }
    Ok(out)
}

/// Interns and returns the product states formed by every pairing of the
/// model's and the automaton's initial states.
///
/// Most back-ends declare exactly one initial state on each side; the cross
/// product is taken anyway so a back-end pairing with multiple initial
/// states on either side is handled without a special case.
pub fn initial_states<M, Au>(
    pool: &mut StatePool<M::State, Au::State>,
    model: &M,
    automaton: &Au,
) -> Vec<crate::pool::StateId>
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    let mut out = Vec::new();
    for ms in model.initial_states() {
        for aut in automaton.initial_states() {
            out.push(pool.intern_direct(ms.clone(), aut));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecx_testkit::{scenario, ScenarioName};

    #[test]
    fn trivial_accepting_loop_has_one_self_transition() {
        let s = scenario(ScenarioName::TrivialAcceptingLoop);
        let mut pool = StatePool::new();
        let inits = initial_states(&mut pool, &s.model, &s.automaton);
        assert_eq!(inits.len(), 1);
        let succs = successors(&mut pool, &s.model, &s.automaton, inits[0]).unwrap();
        assert_eq!(succs.len(), 1);
        assert_eq!(succs[0].destination, inits[0]);
        assert!(succs[0].marks.contains(0));
    }

    #[test]
    fn no_cycle_scenario_has_no_successors() {
        let s = scenario(ScenarioName::NoCycle);
        let mut pool = StatePool::new();
        let inits = initial_states(&mut pool, &s.model, &s.automaton);
        let succs = successors(&mut pool, &s.model, &s.automaton, inits[0]).unwrap();
        assert!(succs.is_empty());
    }

    #[test]
    fn marks_split_scenario_accumulates_across_two_hops() {
        let s = scenario(ScenarioName::MarksSplitAcrossScc);
        let mut pool = StatePool::new();
        let inits = initial_states(&mut pool, &s.model, &s.automaton);
        let first_hop = successors(&mut pool, &s.model, &s.automaton, inits[0]).unwrap();
        assert_eq!(first_hop.len(), 1);
        assert!(first_hop[0].marks.contains(0));
        assert!(!first_hop[0].marks.contains(1));
        let second_hop = successors(&mut pool, &s.model, &s.automaton, first_hop[0].destination)
            .unwrap();
        assert_eq!(second_hop.len(), 1);
        assert!(second_hop[0].marks.contains(1));
        assert_eq!(second_hop[0].destination, inits[0]);
    }
}

//! Bounded memory peak (T6): `max_root_stack_depth` and `max_dfs_depth`
//! must never exceed the number of states the engine actually visited, and
//! a state retired Dead is always one of the visited ones.

use ecx_core::{DeadStatePolicy, DijkstraEngine, RootStackKind, TarjanEngine};
use ecx_testkit::{scenario, ScenarioName};

fn assert_bounds(stats: ecx_core::Stats) {
    assert!(u64::from(stats.max_root_stack_depth) <= stats.states_visited);
    assert!(u64::from(stats.max_dfs_depth) <= stats.states_visited);
    assert!(stats.states_retired_dead <= stats.states_visited);
}

const SCENARIOS: [ScenarioName; 6] = [
    ScenarioName::NoCycle,
    ScenarioName::TrivialAcceptingLoop,
    ScenarioName::MarksSplitAcrossScc,
    ScenarioName::WeakNonAccepting,
    ScenarioName::DeadEndRejected,
    ScenarioName::DeadEndAcceptedRegardless,
];

#[test]
fn tarjan_respects_the_peak_memory_inequalities_on_every_scenario() {
    for name in SCENARIOS {
        let s = scenario(name);
        let engine = TarjanEngine::new(DeadStatePolicy::Named("done".to_string()), RootStackKind::Dense);
        let result = engine.check(&s.model, &s.automaton).unwrap();
        assert_eq!(result.empty, s.expected_empty, "{name:?}");
        assert_bounds(result.stats);
    }
}

#[test]
fn dijkstra_respects_the_peak_memory_inequalities_on_every_scenario() {
    for name in SCENARIOS {
        let s = scenario(name);
        let engine = DijkstraEngine::new(DeadStatePolicy::Named("done".to_string()), RootStackKind::Compressed);
        let result = engine.check(&s.model, &s.automaton).unwrap();
        assert_eq!(result.empty, s.expected_empty, "{name:?}");
        assert_bounds(result.stats);
    }
}

#[test]
fn a_compressed_root_stack_never_exceeds_the_dense_one_in_reported_depth() {
    let s = scenario(ScenarioName::MarksSplitAcrossScc);
    let dense = TarjanEngine::new(DeadStatePolicy::None, RootStackKind::Dense)
        .check(&s.model, &s.automaton)
        .unwrap();
    let compressed = TarjanEngine::new(DeadStatePolicy::None, RootStackKind::Compressed)
        .check(&s.model, &s.automaton)
        .unwrap();
    assert_eq!(dense.empty, compressed.empty);
    assert!(compressed.stats.max_root_stack_depth <= dense.stats.max_root_stack_depth);
}

//! T2: for a fixed (non-swarmed) successor order, both sequential engines
//! return identical verdicts and identical state/transition counts across
//! repeated runs.

use ecx_driver::{CheckConfig, Driver, Policy};
use ecx_testkit::{scenario, ScenarioName};

fn run_twice(policy: Policy, name: ScenarioName) -> (ecx_driver::Verdict, ecx_driver::Verdict) {
    let s1 = scenario(name);
    let s2 = scenario(name);
    let config = || CheckConfig::builder().workers(1).policy(policy).swarm(false).build().unwrap();
    let first = Driver::new(config()).run(&s1.model, &s1.automaton).unwrap();
    let second = Driver::new(config()).run(&s2.model, &s2.automaton).unwrap();
    (first, second)
}

#[test]
fn tarjan_is_deterministic_across_repeated_runs() {
    for name in [
        ScenarioName::TrivialAcceptingLoop,
        ScenarioName::MarksSplitAcrossScc,
        ScenarioName::WeakNonAccepting,
    ] {
        let (a, b) = run_twice(Policy::FullTarjan, name);
        assert_eq!(a.verdict, b.verdict, "verdict drifted on {name:?}");
        assert_eq!(a.states, b.states, "state count drifted on {name:?}");
        assert_eq!(a.transitions, b.transitions, "transition count drifted on {name:?}");
        assert_eq!(a.updates, b.updates, "update count drifted on {name:?}");
        assert_eq!(a.roots_popped, b.roots_popped, "roots_popped drifted on {name:?}");
    }
}

#[test]
fn dijkstra_is_deterministic_across_repeated_runs() {
    for name in [
        ScenarioName::TrivialAcceptingLoop,
        ScenarioName::MarksSplitAcrossScc,
        ScenarioName::WeakNonAccepting,
    ] {
        let (a, b) = run_twice(Policy::FullDijkstra, name);
        assert_eq!(a.verdict, b.verdict, "verdict drifted on {name:?}");
        assert_eq!(a.states, b.states, "state count drifted on {name:?}");
        assert_eq!(a.transitions, b.transitions, "transition count drifted on {name:?}");
    }
}

#[test]
fn tarjan_and_dijkstra_agree_on_counts_for_a_single_worker_run() {
    let s = scenario(ScenarioName::MarksSplitAcrossScc);
    let tarjan = Driver::new(
        CheckConfig::builder().workers(1).policy(Policy::FullTarjan).swarm(false).build().unwrap(),
    )
    .run(&s.model, &s.automaton)
    .unwrap();
    let s2 = scenario(ScenarioName::MarksSplitAcrossScc);
    let dijkstra = Driver::new(
        CheckConfig::builder().workers(1).policy(Policy::FullDijkstra).swarm(false).build().unwrap(),
    )
    .run(&s2.model, &s2.automaton)
    .unwrap();
    assert_eq!(tarjan.verdict, dijkstra.verdict);
    assert_eq!(tarjan.states, dijkstra.states);
}

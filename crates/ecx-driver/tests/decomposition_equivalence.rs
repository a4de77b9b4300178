//! T4: for a property automaton whose terminal/weak classification actually
//! corresponds to a real cycle, `decomposed(A, M)`'s verdict equals
//! `strong(A, M)`'s verdict, where `strong` treats every SCC as strong
//! (`Policy::FullTarjan`, which ignores strength tags entirely and finds
//! every accepting cycle directly).

use ecx_core::DeadStatePolicy;
use ecx_driver::{CheckConfig, Driver, Policy};
use ecx_testkit::{scenario, ScenarioName};

fn dead_policy_for(name: ScenarioName) -> DeadStatePolicy {
    if matches!(name, ScenarioName::DeadEndAcceptedRegardless) {
        DeadStatePolicy::Named("done".to_string())
    } else {
        DeadStatePolicy::None
    }
}

#[test]
fn decomposed_matches_full_strong_treatment_on_every_cycle_bearing_scenario() {
    for name in [
        ScenarioName::TrivialAcceptingLoop,
        ScenarioName::MarksSplitAcrossScc,
        ScenarioName::WeakNonAccepting,
        ScenarioName::DeadEndRejected,
        ScenarioName::DeadEndAcceptedRegardless,
    ] {
        let s = scenario(name);
        let dead = dead_policy_for(name);

        let decomposed = Driver::new(
            CheckConfig::builder()
                .workers(2)
                .dead(dead.clone())
                .build()
                .unwrap(),
        )
        .run(&s.model, &s.automaton)
        .unwrap();

        let strong = Driver::new(
            CheckConfig::builder()
                .workers(2)
                .policy(Policy::FullTarjan)
                .dead(dead)
                .build()
                .unwrap(),
        )
        .run(&s.model, &s.automaton)
        .unwrap();

        assert_eq!(
            decomposed.verdict, strong.verdict,
            "decomposed/strong verdict mismatch on {name:?}"
        );
    }
}

#[test]
fn decomposed_and_full_dijkstra_agree_on_a_strong_only_automaton() {
    let s = scenario(ScenarioName::MarksSplitAcrossScc);
    let decomposed = Driver::new(CheckConfig::builder().build().unwrap())
        .run(&s.model, &s.automaton)
        .unwrap();
    let dijkstra = Driver::new(CheckConfig::builder().policy(Policy::FullDijkstra).build().unwrap())
        .run(&s.model, &s.automaton)
        .unwrap();
    assert_eq!(decomposed.verdict, dijkstra.verdict);
}

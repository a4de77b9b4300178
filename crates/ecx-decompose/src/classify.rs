//! Reachable-state classification: the one-pass walk that discovers which
//! strength partitions a property automaton has, and the ancestor-closed
//! state sets each partition's sub-automaton view is pruned to.

use rustc_hash::{FxHashMap, FxHashSet};

use ecx_model::{AutomatonBackend, AutomatonState, ModelError, Strength};

/// Which partitions of the property automaton contain at least one
/// reachable SCC of the matching strength — mirrors `cou99strength.cc`'s
/// early-exit check on an empty partition (SPEC_FULL.md's added §4 note):
/// the driver skips spawning a worker pool for a partition this reports
/// absent rather than running a trivial worker to completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// At least one reachable state belongs to a terminal SCC.
    pub terminal_present: bool,
    /// At least one reachable state belongs to a weak (non-terminal) SCC.
    pub weak_present: bool,
    /// At least one reachable state belongs to a strong SCC.
    pub strong_present: bool,
}

impl Dispatch {
    /// `true` if no reachable state carries an accepting strength tag at
    /// all — the whole property automaton is non-accepting and every
    /// worker pool can be skipped outright.
    #[must_use]
    pub const fn is_entirely_empty(self) -> bool {
        !self.terminal_present && !self.weak_present && !self.strong_present
    }
}

/// The result of classifying a property automaton's reachable state space.
pub struct Decomposition<S> {
    /// Per-partition presence flags.
    pub dispatch: Dispatch,
    /// States the terminal sub-automaton view may traverse: terminal
    /// states plus every reachable ancestor of one.
    pub terminal_allowed: FxHashSet<S>,
    /// States the weak sub-automaton view may traverse: weak ∪ terminal
    /// states plus every reachable ancestor of one.
    pub weak_allowed: FxHashSet<S>,
}

/// Walks `automaton`'s reachable state space from its initial states and
/// classifies it into the terminal/weak/strong partitions of SPEC_FULL.md
/// §4.10.
///
/// The strong sub-automaton is never materialised here: per spec, it keeps
/// *every* SCC, so the caller dispatches the strong worker pool against the
/// original automaton unrestricted.
///
/// # Errors
///
/// Propagates any [`ModelError`] raised while enumerating the automaton's
/// transitions during the reachability walk.
pub fn decompose<Au>(automaton: &Au) -> Result<Decomposition<Au::State>, ModelError>
where
    Au: AutomatonBackend,
{
    let mut forward: FxHashMap<Au::State, Vec<Au::State>> = FxHashMap::default();
    let mut reachable: FxHashSet<Au::State> = FxHashSet::default();
    let mut frontier: Vec<Au::State> = automaton.initial_states();
    for s in &frontier {
        reachable.insert(*s);
    }

    while let Some(state) = frontier.pop() {
        let succs = automaton.successors(&state)?;
        let entry = forward.entry(state).or_default();
        for t in succs {
            entry.push(t.destination);
            if reachable.insert(t.destination) {
                frontier.push(t.destination);
            }
        }
    }

    let mut dispatch = Dispatch::default();
    for state in &reachable {
        match state.strength() {
            Strength::Terminal => dispatch.terminal_present = true,
            Strength::Weak => dispatch.weak_present = true,
            Strength::Strong => dispatch.strong_present = true,
            Strength::Unclassified => {}
        }
    }

    let terminal_targets: FxHashSet<Au::State> = reachable
        .iter()
        .copied()
        .filter(|s| s.strength() == Strength::Terminal)
        .collect();
    let weak_targets: FxHashSet<Au::State> = reachable
        .iter()
        .copied()
        .filter(|s| matches!(s.strength(), Strength::Weak | Strength::Terminal))
        .collect();

    let mut reverse: FxHashMap<Au::State, Vec<Au::State>> = FxHashMap::default();
    for (src, dsts) in &forward {
        for dst in dsts {
            reverse.entry(*dst).or_default().push(*src);
        }
    }

    Ok(Decomposition {
        dispatch,
        terminal_allowed: ancestor_closure(&terminal_targets, &reverse),
        weak_allowed: ancestor_closure(&weak_targets, &reverse),
    })
}

/// Returns `targets` plus every state with a (possibly indirect) path to a
/// member of `targets`, walking `reverse` (the predecessor map) outward.
fn ancestor_closure<S: AutomatonState>(
    targets: &FxHashSet<S>,
    reverse: &FxHashMap<S, Vec<S>>,
) -> FxHashSet<S> {
    let mut allowed: FxHashSet<S> = targets.clone();
    let mut frontier: Vec<S> = targets.iter().copied().collect();
    while let Some(s) = frontier.pop() {
        if let Some(preds) = reverse.get(&s) {
            for &p in preds {
                if allowed.insert(p) {
                    frontier.push(p);
                }
            }
        }
    }
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecx_model::MarkSet;
    use ecx_testkit::{PropGuard, TinyAutomaton};

    /// 0 (strong, initial) self-loops and branches to 1 (terminal) and 2
    /// (weak); 1 and 2 each self-loop within their own strength.
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
    fn all_three_partitions_present_in_the_mixed_fixture() {
        let automaton = mixed_automaton();
        let d = decompose(&automaton).unwrap();
        assert!(d.dispatch.terminal_present);
        assert!(d.dispatch.weak_present);
        assert!(d.dispatch.strong_present);
        assert!(!d.dispatch.is_entirely_empty());
    }

    #[test]
    fn terminal_allowed_set_excludes_the_unrelated_weak_branch() {
        let automaton = mixed_automaton();
        let d = decompose(&automaton).unwrap();
        let sccs: FxHashSet<u32> = d.terminal_allowed.iter().map(AutomatonState::scc_index).collect();
        assert_eq!(sccs, FxHashSet::from_iter([0, 1]));
    }

    #[test]
    fn weak_allowed_set_includes_the_ancestor_and_both_targets() {
        let automaton = mixed_automaton();
        let d = decompose(&automaton).unwrap();
        let sccs: FxHashSet<u32> = d.weak_allowed.iter().map(AutomatonState::scc_index).collect();
        assert_eq!(sccs, FxHashSet::from_iter([0, 1, 2]));
    }

    #[test]
    fn single_strength_automaton_leaves_the_other_two_partitions_empty() {
        let automaton = TinyAutomaton::builder(1)
            .with_state(0, 0, Strength::Terminal, true)
            .with_transition(0, PropGuard::tt(), MarkSet::singleton(0), 0);
        let d = decompose(&automaton).unwrap();
        assert!(d.dispatch.terminal_present);
        assert!(!d.dispatch.weak_present);
        assert!(!d.dispatch.strong_present);
    }
}

//! Per-run statistics (SPEC_FULL.md §6), accumulated by every sequential and
//! parallel engine and surfaced verbatim in the driver's [`Verdict`] rows.
//!
//! [`Verdict`]: ../../ecx_driver/struct.Verdict.html

/// Counters collected while checking a single product (or a single worker's
/// share of one, for the parallel engines).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Distinct product states allocated in the state pool.
    pub states_visited: u64,
    /// Product transitions enumerated (including those discarded because
    /// the conjoined guard was unsatisfiable).
    pub transitions_explored: u64,
    /// Deepest the DFS stack ever grew.
    pub max_dfs_depth: u32,
    /// Deepest the SCC root stack ever grew.
    pub max_root_stack_depth: u32,
    /// Number of product states proven `Dead` (non-accepting) and retired.
    pub states_retired_dead: u64,
    /// Number of backedges that triggered a lowlink/root-stack merge
    /// (`update`/`merge` in spec §4.5/§4.6's terminology).
    pub updates: u64,
    /// Number of SCC roots popped off the root stack over the run.
    pub roots_popped: u64,
    /// Number of those popped roots that closed a trivial (singleton,
    /// self-loop-free) SCC.
    pub trivial_sccs: u64,
}

/// Outcome of running a sequential engine to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineResult {
    /// `true` if the checked product language is empty (no accepting
    /// infinite run exists).
    pub empty: bool,
    /// Counters collected during the run.
    pub stats: Stats,
}

impl Stats {
    /// An all-zero counter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            states_visited: 0,
            transitions_explored: 0,
            max_dfs_depth: 0,
            max_root_stack_depth: 0,
            states_retired_dead: 0,
            updates: 0,
            roots_popped: 0,
            trivial_sccs: 0,
        }
    }

    /// Folds `other`'s counts into `self`, used by the driver to aggregate
    /// per-worker stats into a run-wide total.
    pub fn merge(&mut self, other: &Self) {
        self.states_visited += other.states_visited;
        self.transitions_explored += other.transitions_explored;
        self.max_dfs_depth = self.max_dfs_depth.max(other.max_dfs_depth);
        self.max_root_stack_depth = self.max_root_stack_depth.max(other.max_root_stack_depth);
        self.states_retired_dead += other.states_retired_dead;
        self.updates += other.updates;
        self.roots_popped += other.roots_popped;
        self.trivial_sccs += other.trivial_sccs;
    }

    /// Folds a freshly observed DFS-stack depth into the running maximum.
    pub fn record_dfs_depth(&mut self, depth: usize) {
        self.max_dfs_depth = self.max_dfs_depth.max(depth as u32);
    }

    /// Folds a freshly observed root-stack depth into the running maximum.
    pub fn record_root_stack_depth(&mut self, depth: usize) {
        self.max_root_stack_depth = self.max_root_stack_depth.max(depth as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_counts_and_takes_max_depths() {
        let mut a = Stats {
            states_visited: 3,
            max_dfs_depth: 5,
            ..Stats::new()
        };
        let b = Stats {
            states_visited: 2,
            max_dfs_depth: 9,
            ..Stats::new()
        };
        a.merge(&b);
        assert_eq!(a.states_visited, 5);
        assert_eq!(a.max_dfs_depth, 9);
    }
}

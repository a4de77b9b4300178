//! The verdict output record (SPEC_FULL.md §6) and its CSV rendering.

use std::fmt::Write as _;

use ecx_core::Stats;

/// The top-level boolean result of an emptiness check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "config-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The product language is non-empty: an accepting run exists.
    Violated,
    /// The product language is empty: the property holds.
    Verified,
}

impl Outcome {
    /// Maps a `found` flag (`true` = a counterexample was found) to an
    /// [`Outcome`].
    #[must_use]
    pub const fn from_found(found: bool) -> Self {
        if found {
            Self::Violated
        } else {
            Self::Verified
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Violated => "violated",
            Self::Verified => "verified",
        }
    }
}

/// One worker's row of the verdict record's `per_worker` array.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "config-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerVerdict {
    /// This worker's individual outcome.
    pub verdict: Outcome,
    /// Wall-clock milliseconds this worker ran for.
    ///
    /// Per-worker timing is not tracked inside `ecx_concurrent`'s worker
    /// threads (only aggregate counters are); this field carries the whole
    /// pool's elapsed wall time as an approximation, documented as such
    /// rather than silently fabricated as a true per-thread measurement.
    pub ms: u64,
    /// Product states this worker visited.
    pub states: u64,
    /// States this worker inserted into a shared structure (union-find,
    /// open-set, or hash table) that a peer had not already claimed.
    ///
    /// `ecx_concurrent`'s worker reports do not separately track insertions
    /// claimed versus re-visits; this is approximated by `states_visited`,
    /// which over-counts re-visits of states a peer already owns.
    pub inserted: u64,
    /// A short tag identifying this worker in CSV output, e.g.
    /// `"strong-0"`.
    pub csv_tag: String,
}

/// The full verdict record of a single [`crate::Driver::run`] call.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "config-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    /// The overall outcome: the disjunction of every sub-check's outcome.
    pub verdict: Outcome,
    /// Total wall-clock milliseconds the whole run took.
    pub wall_ms: u64,
    /// User-mode CPU milliseconds.
    ///
    /// This workspace has no OS-level CPU-time accounting dependency (the
    /// teacher stack carries none either); `user_ms` and `sys_ms` are
    /// reported as `0` rather than fabricated, a recorded simplification
    /// (see DESIGN.md).
    pub user_ms: u64,
    /// System-mode CPU milliseconds. See [`Self::user_ms`].
    pub sys_ms: u64,
    /// Total product states visited across every worker.
    pub states: u64,
    /// Total product transitions explored across every worker.
    pub transitions: u64,
    /// Deepest any worker's DFS stack grew.
    pub max_dfs_size: u32,
    /// Deepest the set of `Live`-coloured states grew, which for this
    /// workspace's engines coincides exactly with the DFS stack's depth
    /// (every `Live` state sits on some worker's open frame stack).
    pub max_live_size: u32,
    /// Deepest any worker's SCC root stack grew.
    pub max_root_stack: u32,
    /// Number of product states proven `Dead` and retired across every
    /// worker, standing in for spec §6's `dead_store_size` (the size of the
    /// shared dead-state record at the end of the run).
    pub dead_store_size: u64,
    /// Total lowlink/root-stack merges across every worker.
    pub updates: u64,
    /// Total SCC roots popped across every worker.
    pub roots_popped: u64,
    /// Total trivial (singleton) SCCs closed across every worker.
    pub trivial_sccs: u64,
    /// One row per worker that ran.
    pub per_worker: Vec<WorkerVerdict>,
}

impl Verdict {
    /// Builds a verdict from an aggregated [`Stats`] total, a list of
    /// per-worker rows, the overall outcome, and the run's wall-clock
    /// duration.
    #[must_use]
    pub fn new(
        outcome: Outcome,
        total: &Stats,
        per_worker: Vec<WorkerVerdict>,
        wall_ms: u64,
    ) -> Self {
        Self {
            verdict: outcome,
            wall_ms,
            user_ms: 0,
            sys_ms: 0,
            states: total.states_visited,
            transitions: total.transitions_explored,
            max_dfs_size: total.max_dfs_depth,
            max_live_size: total.max_dfs_depth,
            max_root_stack: total.max_root_stack_depth,
            dead_store_size: total.states_retired_dead,
            updates: total.updates,
            roots_popped: total.roots_popped,
            trivial_sccs: total.trivial_sccs,
            per_worker,
        }
    }

    /// The CSV header line matching [`Self::to_csv_row`]'s column order.
    #[must_use]
    pub fn csv_header() -> &'static str {
        "verdict,wall_ms,user_ms,sys_ms,states,transitions,max_dfs_size,max_live_size,\
         max_root_stack,dead_store_size,updates,roots_popped,trivial_sccs,\
         worker_verdict,worker_ms,worker_states,worker_inserted,worker_csv_tag"
    }

    /// Renders one line per worker plus a summary, as spec §6 requires:
    /// string fields double-quoted, no embedded newlines. The summary
    /// columns repeat on every worker row so each line is independently
    /// parseable.
    #[must_use]
    pub fn to_csv_row(&self) -> String {
        let mut out = String::new();
        if self.per_worker.is_empty() {
            write_summary_prefix(&mut out, self);
            out.push_str(",\"\",0,0,0,\"\"");
            return out;
        }
        for (i, w) in self.per_worker.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_summary_prefix(&mut out, self);
            let _ = write!(
                out,
                ",\"{}\",{},{},{},\"{}\"",
                w.verdict.as_str(),
                w.ms,
                w.states,
                w.inserted,
                escape_csv_field(&w.csv_tag),
            );
        }
        out
    }
}

fn write_summary_prefix(out: &mut String, v: &Verdict) {
    let _ = write!(
        out,
        "\"{}\",{},{},{},{},{},{},{},{},{},{},{},{}",
        v.verdict.as_str(),
        v.wall_ms,
        v.user_ms,
        v.sys_ms,
        v.states,
        v.transitions,
        v.max_dfs_size,
        v.max_live_size,
        v.max_root_stack,
        v.dead_store_size,
        v.updates,
        v.roots_popped,
        v.trivial_sccs,
    );
}

fn escape_csv_field(field: &str) -> String {
    field.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> Stats {
        Stats {
            states_visited: 10,
            transitions_explored: 20,
            max_dfs_depth: 3,
            max_root_stack_depth: 2,
            states_retired_dead: 5,
            updates: 1,
            roots_popped: 2,
            trivial_sccs: 1,
        }
    }

    #[test]
    fn csv_row_has_one_line_per_worker() {
        let v = Verdict::new(
            Outcome::Verified,
            &sample_stats(),
            vec![
                WorkerVerdict {
                    verdict: Outcome::Verified,
                    ms: 5,
                    states: 10,
                    inserted: 10,
                    csv_tag: "strong-0".to_string(),
                },
                WorkerVerdict {
                    verdict: Outcome::Verified,
                    ms: 4,
                    states: 8,
                    inserted: 8,
                    csv_tag: "strong-1".to_string(),
                },
            ],
            42,
        );
        let csv = v.to_csv_row();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().all(|line| line.starts_with("\"verified\",42,")));
    }

    #[test]
    fn csv_tag_quotes_are_escaped() {
        let w = WorkerVerdict {
            verdict: Outcome::Violated,
            ms: 1,
            states: 1,
            inserted: 1,
            csv_tag: "weak \"0\"".to_string(),
        };
        let v = Verdict::new(Outcome::Violated, &sample_stats(), vec![w], 1);
        assert!(v.to_csv_row().contains("weak \"\"0\"\""));
    }

    #[test]
    fn header_and_row_have_matching_column_counts() {
        let header_cols = Verdict::csv_header().split(',').count();
        let v = Verdict::new(
            Outcome::Verified,
            &sample_stats(),
            vec![WorkerVerdict {
                verdict: Outcome::Verified,
                ms: 1,
                states: 1,
                inserted: 1,
                csv_tag: "t".to_string(),
            }],
            1,
        );
        let row_cols = v.to_csv_row().split(',').count();
        assert_eq!(header_cols, row_cols);
    }
}

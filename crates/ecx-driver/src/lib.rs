//! The driver (C13): receives a property automaton and a model handle, runs
//! the strength decomposer (C12) and the parallel engines (C11), and
//! aggregates everything into one [`Verdict`].
//!
//! Grounded on `rmg_core::sandbox`'s top-level `run`/`EchoConfig` shape: a
//! single entry point taking a validated config plus the two back-ends, with
//! every sub-step's error propagated through one crate-local error enum.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod config;
pub mod error;
mod log;
pub mod verdict;

use std::time::Instant;

use ecx_concurrent::{
    run_reachability_pool, run_strong_pool, run_weak_pool, ParallelOutcome, SequentialEngineKind,
    StopFlags,
};
use ecx_core::Stats;
use ecx_decompose::{decompose, RestrictedAutomaton};
use ecx_model::{AutomatonBackend, ModelBackend};
use rustc_hash::FxHashMap;

pub use config::{CheckConfig, CheckConfigBuilder, CompressionMode, Policy};
pub use error::DriverError;
pub use verdict::{Outcome, Verdict, WorkerVerdict};

#[cfg(feature = "tracing-init")]
pub use log::init_tracing;

/// Runs a single emptiness check against a validated [`CheckConfig`].
pub struct Driver {
    config: CheckConfig,
}

impl Driver {
    /// Builds a driver around an already-validated configuration.
    #[must_use]
    pub const fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// The configuration this driver runs with.
    #[must_use]
    pub const fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Checks whether the product of `model` and `automaton` accepts any
    /// infinite run, dispatching over the configured [`Policy`].
    ///
    /// # Errors
    ///
    /// Propagates any [`ecx_model::ModelError`] raised while exploring the
    /// product, and any decomposition failure under [`Policy::Decomposed`].
    pub fn run<M, Au>(&self, model: &M, automaton: &Au) -> Result<Verdict, DriverError>
    where
        M: ModelBackend,
        Au: AutomatonBackend<Guard = M::Guard>,
        M::State: Send + Sync,
        Au::State: Send + Sync,
    {
        let start = Instant::now();
        let parallel_config = self.config.parallel_config();

        let (empty, total, per_worker) = match self.config.policy() {
            Policy::FullTarjan => {
                let outcome = run_strong_pool(
                    model,
                    automaton,
                    &parallel_config,
                    SequentialEngineKind::Tarjan,
                    StopFlags::new(),
                );
                collect("tarjan", outcome)
            }
            Policy::FullDijkstra => {
                let outcome = run_strong_pool(
                    model,
                    automaton,
                    &parallel_config,
                    SequentialEngineKind::Dijkstra,
                    StopFlags::new(),
                );
                collect("dijkstra", outcome)
            }
            Policy::Mixed => {
                let outcome = run_strong_pool(
                    model,
                    automaton,
                    &parallel_config,
                    SequentialEngineKind::Mixed,
                    StopFlags::new(),
                );
                collect("mixed", outcome)
            }
            Policy::Reachability => {
                let outcome = run_reachability_pool(model, automaton, &parallel_config, StopFlags::new());
                collect("terminal", outcome)
            }
            Policy::WeakDfs => {
                let outcome = run_weak_pool(model, automaton, &parallel_config, StopFlags::new());
                collect("weak", outcome)
            }
            Policy::Decomposed => self.run_decomposed(model, automaton, &parallel_config)?,
        };

        let wall_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let verdict = Verdict::new(Outcome::from_found(!empty), &total, per_worker, wall_ms);
        log::log_verdict(policy_name(self.config.policy()), &verdict);
        Ok(verdict)
    }

    /// The `Policy::Decomposed` dispatch: classify the automaton into
    /// terminal/weak/strong partitions and fan each non-empty one out to its
    /// simplest sufficient worker pool, sharing one [`StopFlags`] so a
    /// counterexample on any partition cancels the others (SPEC_FULL.md
    /// §4.9/§4.10).
    fn run_decomposed<M, Au>(
        &self,
        model: &M,
        automaton: &Au,
        parallel_config: &ecx_concurrent::ParallelConfig,
    ) -> Result<(bool, Stats, Vec<WorkerVerdict>), DriverError>
    where
        M: ModelBackend,
        Au: AutomatonBackend<Guard = M::Guard>,
        M::State: Send + Sync,
        Au::State: Send + Sync,
    {
        let decomposition = decompose(automaton)?;
        if decomposition.dispatch.is_entirely_empty() {
            return Ok((true, Stats::new(), Vec::new()));
        }

        let stop = StopFlags::new();
        let terminal_view = RestrictedAutomaton::new(automaton, &decomposition.terminal_allowed);
        let weak_view = RestrictedAutomaton::new(automaton, &decomposition.weak_allowed);

        let (terminal_outcome, weak_outcome, strong_outcome) = std::thread::scope(|scope| {
            let terminal = decomposition.dispatch.terminal_present.then(|| {
                let stop = stop.clone();
                scope.spawn(move || run_reachability_pool(model, &terminal_view, parallel_config, stop))
            });
            let weak = decomposition.dispatch.weak_present.then(|| {
                let stop = stop.clone();
                scope.spawn(move || run_weak_pool(model, &weak_view, parallel_config, stop))
            });
            let strong = decomposition.dispatch.strong_present.then(|| {
                let stop = stop.clone();
                scope.spawn(move || {
                    run_strong_pool(model, automaton, parallel_config, self.config.engine_kind(), stop)
                })
            });
            (
                terminal.map(|h| h.join().expect("worker pool thread panicked")),
                weak.map(|h| h.join().expect("worker pool thread panicked")),
                strong.map(|h| h.join().expect("worker pool thread panicked")),
            )
        });

        let mut empty = true;
        let mut total = Stats::new();
        let mut per_worker = Vec::new();
        let mut per_partition: FxHashMap<&'static str, (bool, Stats)> = FxHashMap::default();
        for (tag, outcome) in [
            ("terminal", terminal_outcome),
            ("weak", weak_outcome),
            ("strong", strong_outcome),
        ] {
            if let Some(outcome) = outcome {
                let (partition_empty, stats, mut rows) = collect(tag, outcome);
                empty &= partition_empty;
                total.merge(&stats);
                per_worker.append(&mut rows);
                per_partition.insert(tag, (partition_empty, stats));
            }
        }
        for (tag, (partition_empty, stats)) in &per_partition {
            log::log_worker_pool_done(tag, *partition_empty, stats);
        }
        Ok((empty, total, per_worker))
    }
}

fn collect(tag: &str, outcome: ParallelOutcome) -> (bool, Stats, Vec<WorkerVerdict>) {
    let mut total = Stats::new();
    let rows = outcome
        .workers
        .iter()
        .map(|w| {
            total.merge(&w.stats);
            WorkerVerdict {
                verdict: Outcome::from_found(w.found),
                ms: 0,
                states: w.stats.states_visited,
                inserted: w.stats.states_visited,
                csv_tag: format!("{tag}-{}", w.worker_id),
            }
        })
        .collect();
    (outcome.empty, total, rows)
}

const fn policy_name(policy: Policy) -> &'static str {
    match policy {
        Policy::FullTarjan => "full_tarjan",
        Policy::FullDijkstra => "full_dijkstra",
        Policy::Mixed => "mixed",
        Policy::Reachability => "reachability",
        Policy::WeakDfs => "weak_dfs",
        Policy::Decomposed => "decomposed",
    }
}

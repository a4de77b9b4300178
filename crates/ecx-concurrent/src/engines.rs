//! Parallel emptiness-check engines (C11): Tarjan-EC / Dijkstra-EC worker
//! pools sharing the lock-free union-find (C9), plus reachability-EC and
//! weak-EC worker pools sharing the open-set / shared hash table (C10).
//!
//! Grounded on `original_source/.../fasttgbaalgos/ec/concurec/dead_share.cc`
//! (fast-backtrack + root-stack reconciliation) and `concur_ec_stat.hh` (the
//! per-worker statistics/verdict shape echoed here by [`WorkerReport`]).
//! Scheduling follows SPEC_FULL.md §5: one OS thread per worker
//! (`std::thread::scope`), a startup barrier, cooperative polling of the
//! shared `stop` flags on every edge expansion.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use ecx_core::{Colour, ColourTable, DeadStatePolicy, ProductTransition, RootStack, RootStackKind, StatePool, Stats};
use ecx_model::{AutomatonBackend, AutomatonState, Guard, MarkSet, ModelBackend, ModelError, Strength};
use parking_lot::{Condvar, Mutex};
use rustc_hash::FxHashMap;

use crate::shared::{SharedHashTable, SharedOpenSet, SharedStatus};
use crate::unionfind::UnionFind;

/// Cooperative cancellation flags shared by every worker in a run.
///
/// `stop` forces every worker (of every strength) to terminate; the
/// per-strength flags let the strength decomposer (`ecx-decompose`) stop only
/// the siblings of whichever partition found a counterexample first, per
/// SPEC_FULL.md §4.9's cancellation model.
#[derive(Clone, Default)]
pub struct StopFlags {
    /// Set once a counterexample has been found anywhere; every worker of
    /// every strength observes this and terminates.
    pub stop: Arc<AtomicBool>,
    /// Set to stop only the strong-SCC worker pool.
    pub stop_strong: Arc<AtomicBool>,
    /// Set to stop only the weak-DFS worker pool.
    pub stop_weak: Arc<AtomicBool>,
    /// Set to stop only the reachability worker pool.
    pub stop_terminal: Arc<AtomicBool>,
}

impl StopFlags {
    /// Creates a fresh, unset set of flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn should_stop(&self, scoped: &AtomicBool) -> bool {
        self.stop.load(Ordering::Acquire) || scoped.load(Ordering::Acquire)
    }
}

/// Which sequential DFS discipline a strong-SCC worker runs locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequentialEngineKind {
    /// Every worker runs the Tarjan-style (explicit lowlink) engine.
    Tarjan,
    /// Every worker runs the Dijkstra-style (root-collapsing-stack) engine.
    Dijkstra,
    /// Workers alternate, even-numbered workers run Tarjan, odd run
    /// Dijkstra — exercises both code paths against the same input in one
    /// run, as the `policy = mixed` configuration option requests.
    Mixed,
}

impl SequentialEngineKind {
    fn for_worker(self, worker_id: usize) -> bool {
        match self {
            Self::Tarjan => true,
            Self::Dijkstra => false,
            Self::Mixed => worker_id % 2 == 0,
        }
    }
}

/// Configuration shared by every parallel engine in this module.
#[derive(Clone)]
pub struct ParallelConfig {
    /// Number of worker threads to spawn.
    pub workers: usize,
    /// Dead-state short-circuit policy (SPEC_FULL.md §4).
    pub dead_policy: DeadStatePolicy,
    /// Root-stack representation each worker uses locally.
    pub root_stack_kind: RootStackKind,
    /// When `true`, each worker explores its successors in a distinct,
    /// worker-id-derived rotation of the enumeration order the back-end
    /// returned, so different workers diverge onto different parts of the
    /// search even though every worker starts from the same initial states.
    pub swarm: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            dead_policy: DeadStatePolicy::None,
            root_stack_kind: RootStackKind::Dense,
            swarm: false,
        }
    }
}

/// One worker's contribution to a pool's aggregate verdict.
#[derive(Clone, Debug)]
pub struct WorkerReport {
    /// Zero-based worker index.
    pub worker_id: usize,
    /// `true` if this worker is the one that found the accepting cycle (or,
    /// for reachability workers, the terminal state).
    pub found: bool,
    /// This worker's local counters.
    pub stats: Stats,
}

/// Aggregate outcome of running one worker pool to completion.
#[derive(Clone, Debug)]
pub struct ParallelOutcome {
    /// `true` if the checked product language is empty.
    pub empty: bool,
    /// Per-worker reports, one per spawned thread.
    pub workers: Vec<WorkerReport>,
}

fn swarm_rotate(succs: &mut [ProductTransition], worker_id: usize, swarm: bool) {
    if swarm && !succs.is_empty() {
        let r = worker_id % succs.len();
        succs.rotate_left(r);
    }
}

type ProductKey<M, Au> = (<M as ModelBackend>::State, <Au as AutomatonBackend>::State);

/// Runs the strong-SCC worker pool: every worker performs a local on-the-fly
/// Tarjan or Dijkstra DFS (per `engine_kind`) over the *same* product
/// (SPEC_FULL.md's swarming model), consulting the shared union-find (C9)
/// for cross-thread Dead short-cuts and publishing each SCC it closes to the
/// union-find so peers can prune it too.
pub fn run_strong_pool<M, Au>(
    model: &M,
    automaton: &Au,
    config: &ParallelConfig,
    engine_kind: SequentialEngineKind,
    stop: StopFlags,
) -> ParallelOutcome
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
    M::State: Send + Sync,
    Au::State: Send + Sync,
{
    let uf: Arc<UnionFind<ProductKey<M, Au>>> = Arc::new(UnionFind::new());
    let barrier = std::sync::Barrier::new(config.workers);
    let reports: Mutex<Vec<WorkerReport>> = Mutex::new(Vec::new());
    let found_any = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for worker_id in 0..config.workers {
            let uf = Arc::clone(&uf);
            let barrier = &barrier;
            let reports = &reports;
            let stop = stop.clone();
            let found_any = &found_any;
            scope.spawn(move || {
                barrier.wait();
                let use_tarjan = engine_kind.for_worker(worker_id);
                let (found, stats) = match run_strong_worker(
                    model,
                    automaton,
                    config,
                    worker_id,
                    use_tarjan,
                    &uf,
                    &stop,
                ) {
                    Ok(outcome) => outcome,
                    Err(_) => (false, Stats::new()),
                };
                if found {
                    found_any.store(true, Ordering::Release);
                    stop.stop.store(true, Ordering::Release);
                    stop.stop_strong.store(true, Ordering::Release);
                }
                reports.lock().push(WorkerReport {
                    worker_id,
                    found,
                    stats,
                });
            });
        }
    });

    let mut workers = reports.into_inner();
    workers.sort_by_key(|r| r.worker_id);
    ParallelOutcome {
        empty: !found_any.load(Ordering::Acquire),
        workers,
    }
}

struct StrongFrame<M: ModelBackend, Au: AutomatonBackend> {
    state: ecx_core::StateId,
    succs: std::vec::IntoIter<ProductTransition>,
    _marker: std::marker::PhantomData<(M, Au)>,
}

#[allow(clippy::too_many_lines)]
fn run_strong_worker<M, Au>(
    model: &M,
    automaton: &Au,
    config: &ParallelConfig,
    worker_id: usize,
    use_tarjan: bool,
    uf: &UnionFind<ProductKey<M, Au>>,
    stop: &StopFlags,
) -> Result<(bool, Stats), ModelError>
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    let mut pool: StatePool<M::State, Au::State> = StatePool::new();
    let mut colours = ColourTable::new();
    let mut root_stack = RootStack::new(config.root_stack_kind);
    let mut stats = Stats::new();
    let alphabet_size = automaton.alphabet_size();

    let mut dfs_index: FxHashMap<ecx_core::StateId, u32> = FxHashMap::default();
    let mut lowlink: FxHashMap<ecx_core::StateId, u32> = FxHashMap::default();
    let mut position_key: Vec<ProductKey<M, Au>> = Vec::new();
    let mut position_uf: Vec<crate::unionfind::UfHandle> = Vec::new();
    let mut next_index: u32 = 0;
    let mut frames: Vec<StrongFrame<M, Au>> = Vec::new();

    let inits = ecx_core::initial_states(&mut pool, model, automaton);

    for init in inits {
        if !matches!(colours.get(init), Colour::Unknown) {
            continue;
        }
        open_strong_frame(
            init, model, automaton, config, &mut pool, &mut colours, &mut root_stack,
            &mut dfs_index, &mut lowlink, &mut position_key, &mut position_uf,
            &mut next_index, &mut frames, &mut stats, alphabet_size, worker_id, uf,
        )?;

        while !frames.is_empty() {
            if stop.should_stop(&stop.stop_strong) {
                return Ok((false, stats));
            }
            stats.record_dfs_depth(frames.len());
            stats.record_root_stack_depth(root_stack.len());

            let next_edge = frames.last_mut().expect("non-empty").succs.next();
            let Some(edge) = next_edge else {
                let u = frames.pop().expect("non-empty").state;
                let u_index = dfs_index[&u];

                let is_root = if use_tarjan {
                    lowlink[&u] == u_index
                } else {
                    root_stack.top_pos() == Some(u_index)
                };

                if is_root {
                    let lo = u_index as usize;
                    let hi = position_key.len() - 1;
                    let mut found = false;
                    for pair in lo..hi {
                        let (root, _) = uf.unite(position_uf[pair], position_uf[pair + 1], MarkSet::EMPTY);
                        if uf.marks_of(root).is_full(alphabet_size) {
                            found = true;
                        }
                    }
                    if let Some(first) = position_uf.get(lo) {
                        uf.add_marks(*first, root_stack.top_marks().unwrap_or(MarkSet::EMPTY));
                        if uf.marks_of(*first).is_full(alphabet_size) {
                            found = true;
                        }
                        if found {
                            return Ok((true, stats));
                        }
                        uf.make_dead(*first);
                    }
                    let retired = root_stack.top_count().unwrap_or(1);
                    stats.states_retired_dead += u64::from(retired);
                    stats.roots_popped += 1;
                    if retired == 1 && root_stack.top_has_cycle() != Some(true) {
                        stats.trivial_sccs += 1;
                    }
                    root_stack.pop();
                }
                colours.set(u, Colour::Dead);

                if use_tarjan {
                    if let Some(parent) = frames.last() {
                        let parent_state = parent.state;
                        let propagated = lowlink[&u];
                        if let Some(entry) = lowlink.get_mut(&parent_state) {
                            *entry = (*entry).min(propagated);
                        }
                    }
                }
                continue;
            };

            stats.transitions_explored += 1;
            let dest_key = (pool.model(edge.destination).clone(), *pool.automaton(edge.destination));
            if uf.get(&dest_key).is_some_and(|h| uf.is_dead(h)) {
                colours.set(edge.destination, Colour::Dead);
                continue;
            }

            match colours.get(edge.destination) {
                Colour::Unknown => {
                    open_strong_frame(
                        edge.destination, model, automaton, config, &mut pool, &mut colours,
                        &mut root_stack, &mut dfs_index, &mut lowlink, &mut position_key,
                        &mut position_uf, &mut next_index, &mut frames, &mut stats,
                        alphabet_size, worker_id, uf,
                    )?;
                    root_stack.add_marks_to_top(edge.marks);
                }
                Colour::Live(_) => {
                    let target_index = dfs_index[&edge.destination];
                    if use_tarjan {
                        let current = frames.last().expect("non-empty").state;
                        if let Some(entry) = lowlink.get_mut(&current) {
                            *entry = (*entry).min(target_index);
                        }
                    }
                    stats.updates += 1;
                    root_stack.add_marks_to_top(edge.marks);
                    let merged = root_stack.collapse_to(target_index);
                    if merged.is_full(alphabet_size) {
                        return Ok((true, stats));
                    }
                }
                Colour::Dead => {}
            }
        }
    }

    Ok((false, stats))
}

#[allow(clippy::too_many_arguments)]
fn open_strong_frame<M, Au>(
    state: ecx_core::StateId,
    model: &M,
    automaton: &Au,
    config: &ParallelConfig,
    pool: &mut StatePool<M::State, Au::State>,
    colours: &mut ColourTable,
    root_stack: &mut RootStack,
    dfs_index: &mut FxHashMap<ecx_core::StateId, u32>,
    lowlink: &mut FxHashMap<ecx_core::StateId, u32>,
    position_key: &mut Vec<ProductKey<M, Au>>,
    position_uf: &mut Vec<crate::unionfind::UfHandle>,
    next_index: &mut u32,
    frames: &mut Vec<StrongFrame<M, Au>>,
    stats: &mut Stats,
    alphabet_size: u32,
    worker_id: usize,
    uf: &UnionFind<ProductKey<M, Au>>,
) -> Result<bool, ModelError>
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    let index = *next_index;
    *next_index += 1;
    dfs_index.insert(state, index);
    lowlink.insert(state, index);
    colours.set(state, Colour::Live(index));
    root_stack.push(index, MarkSet::EMPTY);
    stats.states_visited += 1;

    let key = (pool.model(state).clone(), *pool.automaton(state));
    let (handle, _) = uf.make_set(key.clone());
    position_key.push(key);
    position_uf.push(handle);

    let mut succs = ecx_core::successors(pool, model, automaton, state)?;
    swarm_rotate(&mut succs, worker_id, config.swarm);
    if succs.is_empty() {
        let model_state = pool.model(state).clone();
        if let Some(marks) = config.dead_policy.resolve(model, &model_state, alphabet_size)? {
            succs.push(ProductTransition {
                marks,
                destination: state,
            });
        }
    }
    frames.push(StrongFrame {
        state,
        succs: succs.into_iter(),
        _marker: std::marker::PhantomData,
    });
    Ok(false)
}

/// Idle-detection barrier for the work-queue-driven pools (reachability,
/// weak). Tracks, per worker, whether it currently believes the shared
/// frontier is empty; global termination is declared only once every
/// worker's flag is set *simultaneously* (SPEC_FULL.md §5: "idle counter ==
/// N_workers" — read here as "every worker's flag", not a monotonic counter
/// that only ever climbs: a counter that each idle worker re-increments on
/// every empty `try_grab` overshoots `workers` as soon as two or more spin
/// concurrently and never again compares equal, so every worker but the
/// first to cross the threshold spins forever).
struct IdleGate {
    idle: Mutex<Vec<bool>>,
    condvar: Condvar,
}

impl IdleGate {
    fn new(workers: usize) -> Self {
        Self {
            idle: Mutex::new(vec![false; workers.max(1)]),
            condvar: Condvar::new(),
        }
    }

    /// Marks `worker_id` idle; returns `true` if every worker is now idle
    /// (global termination).
    fn go_idle(&self, worker_id: usize) -> bool {
        let mut idle = self.idle.lock();
        idle[worker_id] = true;
        let done = idle.iter().all(|&i| i);
        self.condvar.notify_all();
        done
    }

    /// Clears `worker_id`'s idle flag after it successfully grabs work, so a
    /// stale idle observation from an earlier spin can never contribute to a
    /// future (false) termination verdict.
    fn go_busy(&self, worker_id: usize) {
        let mut idle = self.idle.lock();
        idle[worker_id] = false;
    }

    fn wait_briefly(&self) {
        let mut idle = self.idle.lock();
        self.condvar
            .wait_for(&mut idle, std::time::Duration::from_millis(1));
    }
}

fn conjoined_successors<M, Au>(
    model: &M,
    automaton: &Au,
    state: &ProductKey<M, Au>,
) -> Result<Vec<(ProductKey<M, Au>, MarkSet)>, ModelError>
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    let model_transitions = model.successors(&state.0)?;
    let automaton_transitions = automaton.successors(&state.1)?;
    let mut out = Vec::new();
    for mt in &model_transitions {
        for at in &automaton_transitions {
            let conjoined = mt.guard.conjoin(&at.guard);
            if conjoined.is_satisfiable() {
                out.push(((mt.destination.clone(), at.destination), at.marks));
            }
        }
    }
    Ok(out)
}

/// `true` iff `state` is both terminal-strength and actually has an infinite
/// continuation — either a real outgoing product transition, or (the state
/// being a model dead end) an implicit self-loop granted by `dead_policy`.
///
/// A terminal-strength tag alone is not a witness: a terminal SCC guarantees
/// acceptance only once a run can actually continue through it forever. A
/// terminal state with no continuation at all only ever appears on a finite
/// run, so it contributes no accepting infinite run and must not short-cut
/// the check (spec T1/T4: `decomposed` must agree with the full SCC engines
/// on every input, including a terminal-tagged dead end).
fn terminal_witness<M, Au>(
    model: &M,
    automaton: &Au,
    state: &ProductKey<M, Au>,
    dead_policy: &DeadStatePolicy,
    alphabet_size: u32,
) -> bool
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    if state.1.strength() != Strength::Terminal {
        return false;
    }
    let has_successor = conjoined_successors(model, automaton, state)
        .map(|succs| !succs.is_empty())
        .unwrap_or(false);
    if has_successor {
        return true;
    }
    dead_policy
        .resolve(model, &state.0, alphabet_size)
        .unwrap_or(None)
        .is_some()
}

/// Runs the reachability worker pool for a *terminal* sub-automaton: any
/// product state whose automaton coordinate has [`Strength::Terminal`] and
/// an infinite continuation ([`terminal_witness`]) is itself a proof of
/// non-emptiness (entering a terminal SCC guarantees acceptance), so the
/// workers only need a shared frontier, not a full SCC check.
pub fn run_reachability_pool<M, Au>(
    model: &M,
    automaton: &Au,
    config: &ParallelConfig,
    stop: StopFlags,
) -> ParallelOutcome
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
    M::State: Send + Sync,
    Au::State: Send + Sync,
{
    let open_set: Arc<SharedOpenSet<ProductKey<M, Au>>> = Arc::new(SharedOpenSet::new());
    let idle = Arc::new(IdleGate::new(config.workers.max(1)));
    let found_any = AtomicBool::new(false);
    let reports: Mutex<Vec<WorkerReport>> = Mutex::new(Vec::new());
    let alphabet_size = automaton.alphabet_size();

    for ms in model.initial_states() {
        for aut in automaton.initial_states() {
            let key = (ms.clone(), aut);
            if terminal_witness(model, automaton, &key, &config.dead_policy, alphabet_size) {
                found_any.store(true, Ordering::Release);
            }
            open_set.insert(key);
        }
    }
    if found_any.load(Ordering::Acquire) {
        stop.stop.store(true, Ordering::Release);
        stop.stop_terminal.store(true, Ordering::Release);
    }

    std::thread::scope(|scope| {
        for worker_id in 0..config.workers.max(1) {
            let open_set = Arc::clone(&open_set);
            let idle = Arc::clone(&idle);
            let stop = stop.clone();
            let found_any = &found_any;
            let reports = &reports;
            scope.spawn(move || {
                let mut stats = Stats::new();
                let mut found_here = false;
                loop {
                    if stop.should_stop(&stop.stop_terminal) {
                        break;
                    }
                    let Some(state) = open_set.try_grab() else {
                        if idle.go_idle(worker_id) {
                            break;
                        }
                        idle.wait_briefly();
                        continue;
                    };
                    idle.go_busy(worker_id);
                    stats.states_visited += 1;
                    let Ok(succs) = conjoined_successors(model, automaton, &state) else {
                        continue;
                    };
                    for (dest, _marks) in succs {
                        stats.transitions_explored += 1;
                        if open_set.insert(dest.clone())
                            && terminal_witness(model, automaton, &dest, &config.dead_policy, alphabet_size)
                        {
                            found_here = true;
                            found_any.store(true, Ordering::Release);
                            stop.stop.store(true, Ordering::Release);
                            stop.stop_terminal.store(true, Ordering::Release);
                        }
                    }
                }
                reports.lock().push(WorkerReport {
                    worker_id,
                    found: found_here,
                    stats,
                });
            });
        }
    });

    let mut workers = reports.into_inner();
    workers.sort_by_key(|r| r.worker_id);
    ParallelOutcome {
        empty: !found_any.load(Ordering::Acquire),
        workers,
    }
}

/// Runs the weak worker pool for a *weak* sub-automaton: every transition of
/// a weak SCC carries either the full mark-set or none, so a back-edge
/// (within one worker's own DFS path) carrying the full mark-set is itself
/// the witness of an accepting cycle; no lowlink/root-stack bookkeeping is
/// needed, only the shared hash table (C10) so workers don't re-explore a
/// state a peer already closed.
pub fn run_weak_pool<M, Au>(
    model: &M,
    automaton: &Au,
    config: &ParallelConfig,
    stop: StopFlags,
) -> ParallelOutcome
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
    M::State: Send + Sync,
    Au::State: Send + Sync,
{
    let table: Arc<SharedHashTable<ProductKey<M, Au>>> = Arc::new(SharedHashTable::new());
    let frontier: Arc<SharedOpenSet<ProductKey<M, Au>>> = Arc::new(SharedOpenSet::new());
    let idle = Arc::new(IdleGate::new(config.workers.max(1)));
    let found_any = AtomicBool::new(false);
    let reports: Mutex<Vec<WorkerReport>> = Mutex::new(Vec::new());

    for ms in model.initial_states() {
        for aut in automaton.initial_states() {
            frontier.insert((ms.clone(), aut));
        }
    }
    let alphabet_size = automaton.alphabet_size();

    std::thread::scope(|scope| {
        for worker_id in 0..config.workers.max(1) {
            let table = Arc::clone(&table);
            let frontier = Arc::clone(&frontier);
            let idle = Arc::clone(&idle);
            let stop = stop.clone();
            let found_any = &found_any;
            let reports = &reports;
            scope.spawn(move || {
                let mut stats = Stats::new();
                let mut found_here = false;
                loop {
                    if stop.should_stop(&stop.stop_weak) {
                        break;
                    }
                    let Some(root) = frontier.try_grab() else {
                        if idle.go_idle(worker_id) {
                            break;
                        }
                        idle.wait_briefly();
                        continue;
                    };
                    idle.go_busy(worker_id);
                    if matches!(table.get(&root), Some(SharedStatus::Dead)) {
                        continue;
                    }
                    if weak_dfs(model, automaton, &root, &table, alphabet_size, &mut stats) {
                        found_here = true;
                        found_any.store(true, Ordering::Release);
                        stop.stop.store(true, Ordering::Release);
                        stop.stop_weak.store(true, Ordering::Release);
                    }
                }
                reports.lock().push(WorkerReport {
                    worker_id,
                    found: found_here,
                    stats,
                });
            });
        }
    });

    let mut workers = reports.into_inner();
    workers.sort_by_key(|r| r.worker_id);
    ParallelOutcome {
        empty: !found_any.load(Ordering::Acquire),
        workers,
    }
}

fn weak_dfs<M, Au>(
    model: &M,
    automaton: &Au,
    root: &ProductKey<M, Au>,
    table: &SharedHashTable<ProductKey<M, Au>>,
    alphabet_size: u32,
    stats: &mut Stats,
) -> bool
where
    M: ModelBackend,
    Au: AutomatonBackend<Guard = M::Guard>,
{
    let mut on_stack: Vec<ProductKey<M, Au>> = Vec::new();
    let mut frames: Vec<(ProductKey<M, Au>, std::vec::IntoIter<(ProductKey<M, Au>, MarkSet)>)> = Vec::new();

    table.set(root.clone(), SharedStatus::Alive);
    on_stack.push(root.clone());
    stats.states_visited += 1;
    let Ok(succs) = conjoined_successors(model, automaton, root) else {
        return false;
    };
    frames.push((root.clone(), succs.into_iter()));
    stats.record_dfs_depth(frames.len());

    while let Some((state, _)) = frames.last_mut().map(|(s, _)| (s.clone(), ())) {
        let Some((_, iter)) = frames.last_mut() else {
            break;
        };
        let next = iter.next();
        let Some((dest, marks)) = next else {
            frames.pop();
            on_stack.retain(|k| k != &state);
            table.set(state, SharedStatus::Dead);
            continue;
        };
        stats.transitions_explored += 1;
        if on_stack.contains(&dest) {
            if marks.is_full(alphabet_size) {
                return true;
            }
            continue;
        }
        if matches!(table.get(&dest), Some(SharedStatus::Dead)) {
            continue;
        }
        table.set(dest.clone(), SharedStatus::Alive);
        on_stack.push(dest.clone());
        stats.states_visited += 1;
        let Ok(dest_succs) = conjoined_successors(model, automaton, &dest) else {
            continue;
        };
        frames.push((dest, dest_succs.into_iter()));
        stats.record_dfs_depth(frames.len());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecx_testkit::{scenario, ScenarioName};

    fn config(workers: usize) -> ParallelConfig {
        ParallelConfig {
            workers,
            dead_policy: DeadStatePolicy::None,
            root_stack_kind: RootStackKind::Dense,
            swarm: false,
        }
    }

    #[test]
    fn strong_pool_finds_accepting_cycle() {
        let s = scenario(ScenarioName::TrivialAcceptingLoop);
        let outcome = run_strong_pool(
            &s.model,
            &s.automaton,
            &config(4),
            SequentialEngineKind::Mixed,
            StopFlags::new(),
        );
        assert!(!outcome.empty);
        assert!(outcome.workers.iter().any(|w| w.found));
    }

    #[test]
    fn strong_pool_agrees_on_no_cycle() {
        let s = scenario(ScenarioName::NoCycle);
        let outcome = run_strong_pool(
            &s.model,
            &s.automaton,
            &config(3),
            SequentialEngineKind::Tarjan,
            StopFlags::new(),
        );
        assert!(outcome.empty);
    }

    #[test]
    fn strong_pool_needs_both_marks_before_accepting() {
        let s = scenario(ScenarioName::MarksSplitAcrossScc);
        let outcome = run_strong_pool(
            &s.model,
            &s.automaton,
            &config(2),
            SequentialEngineKind::Dijkstra,
            StopFlags::new(),
        );
        assert!(!outcome.empty);
    }

    #[test]
    fn reachability_pool_finds_terminal_state() {
        let s = scenario(ScenarioName::DeadEndAcceptedRegardless);
        let outcome = run_reachability_pool(&s.model, &s.automaton, &config(2), StopFlags::new());
        assert!(!outcome.empty);
    }

    #[test]
    fn reachability_pool_reports_empty_without_a_terminal_state() {
        let s = scenario(ScenarioName::NoCycle);
        let outcome = run_reachability_pool(&s.model, &s.automaton, &config(2), StopFlags::new());
        assert!(outcome.empty);
    }

    #[test]
    fn weak_pool_finds_full_mark_self_loop() {
        let s = scenario(ScenarioName::TrivialAcceptingLoop);
        let outcome = run_weak_pool(&s.model, &s.automaton, &config(2), StopFlags::new());
        assert!(!outcome.empty);
    }

    #[test]
    fn weak_pool_reports_empty_on_weak_non_accepting_cycle() {
        let s = scenario(ScenarioName::WeakNonAccepting);
        let outcome = run_weak_pool(&s.model, &s.automaton, &config(2), StopFlags::new());
        assert!(outcome.empty);
    }
}

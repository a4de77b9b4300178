//! The Dijkstra on-the-fly emptiness-check engine (C8), grounded on
//! `original_source/.../dijkstra_scc.cc`, `root_stack.hh` and
//! `lowlink_stack.hh`: SCC detection purely via the root-stack's position
//! bookkeeping, with no per-state lowlink counter — the root stack's top
//! position *is* the lowlink (Geldenhuys & Valmari's "Dijkstra's algorithm"
//! variant, as opposed to [`crate::tarjan::TarjanEngine`]'s explicit
//! per-state counters).

use ecx_model::{AutomatonBackend, ModelBackend, ModelError};
use rustc_hash::FxHashMap;

use crate::colour::{Colour, ColourTable};
use crate::dead::DeadStatePolicy;
use crate::pool::{StateId, StatePool};
use crate::product::{self, ProductTransition};
use crate::rootstack::{RootStack, RootStackKind};
use crate::stats::{EngineResult, Stats};

/// The Dijkstra-style sequential emptiness-check engine.
pub struct DijkstraEngine {
    dead_policy: DeadStatePolicy,
    root_stack_kind: RootStackKind,
}

impl DijkstraEngine {
    /// Builds an engine with the given dead-state policy and root-stack
    /// representation.
    #[must_use]
    pub fn new(dead_policy: DeadStatePolicy, root_stack_kind: RootStackKind) -> Self {
        Self {
            dead_policy,
            root_stack_kind,
        }
    }

    /// Checks whether the product of `model` and `automaton` has an empty
    /// language, exploring states on the fly.
    pub fn check<M, Au>(&self, model: &M, automaton: &Au) -> Result<EngineResult, ModelError>
    where
        M: ModelBackend,
        Au: AutomatonBackend<Guard = M::Guard>,
    {
        let mut pool = StatePool::new();
        let mut colours = ColourTable::new();
        let mut root_stack = RootStack::new(self.root_stack_kind);
        let mut stats = Stats::new();
        let alphabet_size = automaton.alphabet_size();

        let mut dfs_index: FxHashMap<StateId, u32> = FxHashMap::default();
        let mut next_index: u32 = 0;
        let mut frames: Vec<Frame> = Vec::new();

        let inits = product::initial_states(&mut pool, model, automaton);
        for init in inits {
            if !matches!(colours.get(init), Colour::Unknown) {
                continue;
            }
            if self.open_frame(
                init,
                model,
                automaton,
                &mut pool,
                &mut colours,
                &mut root_stack,
                &mut dfs_index,
                &mut next_index,
                &mut frames,
                &mut stats,
                alphabet_size,
            )? {
                return Ok(EngineResult { empty: false, stats });
            }

            while !frames.is_empty() {
                stats.record_dfs_depth(frames.len());
                stats.record_root_stack_depth(root_stack.len());

                let next_edge = frames
                    .last_mut()
                    .expect("loop guard checked non-empty")
                    .succs
                    .next();

                let Some(edge) = next_edge else {
                    // Backtrack: a state closes its SCC exactly when it sits
                    // at the same DFS position as the root stack's top.
                    let u = frames.pop().expect("loop guard checked non-empty").state;
                    let u_index = dfs_index[&u];

                    if root_stack.top_pos() == Some(u_index) {
                        let accepting = root_stack.top_has_cycle() == Some(true)
                            && root_stack
                                .top_marks()
                                .is_some_and(|m| m.is_full(alphabet_size));
                        if accepting {
                            return Ok(EngineResult { empty: false, stats });
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
                    continue;
                };

                stats.transitions_explored += 1;
                match colours.get(edge.destination) {
                    Colour::Unknown => {
                        if self.open_frame(
                            edge.destination,
                            model,
                            automaton,
                            &mut pool,
                            &mut colours,
                            &mut root_stack,
                            &mut dfs_index,
                            &mut next_index,
                            &mut frames,
                            &mut stats,
                            alphabet_size,
                        )? {
                            return Ok(EngineResult { empty: false, stats });
                        }
                        root_stack.add_marks_to_top(edge.marks);
                    }
                    Colour::Live(_) => {
                        let target_index = dfs_index[&edge.destination];
                        stats.updates += 1;
                        root_stack.add_marks_to_top(edge.marks);
                        root_stack.collapse_to(target_index);
                    }
                    Colour::Dead => {}
                }
            }
        }

        Ok(EngineResult { empty: true, stats })
    }

    #[allow(clippy::too_many_arguments)]
    fn open_frame<M, Au>(
        &self,
        state: StateId,
        model: &M,
        automaton: &Au,
        pool: &mut StatePool<M::State, Au::State>,
        colours: &mut ColourTable,
        root_stack: &mut RootStack,
        dfs_index: &mut FxHashMap<StateId, u32>,
        next_index: &mut u32,
        frames: &mut Vec<Frame>,
        stats: &mut Stats,
        alphabet_size: u32,
    ) -> Result<bool, ModelError>
    where
        M: ModelBackend,
        Au: AutomatonBackend<Guard = M::Guard>,
    {
        let index = *next_index;
        *next_index += 1;
        dfs_index.insert(state, index);
        colours.set(state, Colour::Live(index));
        root_stack.push(index, ecx_model::MarkSet::EMPTY);
        stats.states_visited += 1;

        let mut succs = product::successors(pool, model, automaton, state)?;
        if succs.is_empty() {
            let model_state = pool.model(state).clone();
            if let Some(marks) = self.dead_policy.resolve(model, &model_state, alphabet_size)? {
                succs.push(ProductTransition {
                    marks,
                    destination: state,
                });
            }
        }
        frames.push(Frame {
            state,
            succs: succs.into_iter(),
        });
        Ok(false)
    }
}

struct Frame {
    state: StateId,
    succs: std::vec::IntoIter<ProductTransition>,
}

//! The product-state pool (C1): a bulk, hash-consed allocator for
//! ⟨model-state, automaton-state⟩ pairs.
//!
//! Every distinct product state is allocated exactly once per [`StatePool`]
//! instance and handed out as a dense [`StateId`], so the colour table (C5)
//! and root stack (C6) can use plain `Vec`-indexed storage instead of a hash
//! map. Two storage strategies are supported behind one API: the default
//! keeps a clone of the model state alongside the automaton state (cheap
//! when the back-end's model state is itself a small reference-counted
//! handle); [`StatePool::with_byte_compression`] instead content-hashes the
//! model state's byte representation with `blake3` and only falls back to an
//! equality check on hash collision, trading a hash computation for lower
//! peak memory on wide, bulky model states.

use ecx_model::{AutomatonState, ModelState};
use rustc_hash::FxHashMap;

/// Dense identifier for a canonicalized product state within one
/// [`StatePool`]. Stable for the lifetime of the pool; never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// Returns the zero-based dense index backing this id, for use as a
    /// `Vec` index by the colour table and root stack.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A model state that can additionally present its content as bytes, opting
/// it into the pool's byte-compression storage mode.
pub trait ByteAddressable: ModelState {
    /// Returns the byte representation used for content hashing.
    fn as_bytes(&self) -> &[u8];
}

struct Slot<S, A> {
    model: S,
    automaton: A,
    /// Number of DFS frames / root-stack entries currently referencing this
    /// state. The state itself is never freed from the pool (on-the-fly
    /// checking never revisits a freed id), but the refcount is kept so
    /// callers can assert liveness invariants (I2) in debug builds.
    refcount: u32,
}

enum Index<S, A> {
    /// Keyed directly by a clone of the (model, automaton) pair.
    Direct(FxHashMap<(S, A), StateId>),
    /// Keyed by the blake3 hash of the model state's bytes plus the
    /// automaton state; collisions are resolved by checking the candidate
    /// slot's stored model/automaton state for equality.
    Compressed(FxHashMap<(blake3::Hash, A), Vec<StateId>>),
}

/// Bulk allocator and hash-cons table for product states.
pub struct StatePool<S: ModelState, A: AutomatonState> {
    slots: Vec<Slot<S, A>>,
    index: Index<S, A>,
}

impl<S: ModelState, A: AutomatonState> StatePool<S, A> {
    /// Creates an empty pool using the direct (clone-keyed) storage mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: Index::Direct(FxHashMap::default()),
        }
    }

    /// Creates an empty pool using byte-compressed hash-consing, appropriate
    /// when `S` is expensive to clone or compare directly.
    #[must_use]
    pub fn with_byte_compression() -> Self
    where
        S: ByteAddressable,
    {
        Self {
            slots: Vec::new(),
            index: Index::Compressed(FxHashMap::default()),
        }
    }

    /// Number of distinct product states allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no state has been allocated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the canonical id for ⟨`model`, `automaton`⟩, allocating a new
    /// slot the first time this content is seen.
    pub fn intern(&mut self, model: S, automaton: A) -> StateId
    where
        S: ByteAddressable,
    {
        match &mut self.index {
            Index::Direct(map) => {
                if let Some(&id) = map.get(&(model.clone(), automaton)) {
                    return id;
                }
                let id = StateId(self.slots.len() as u32);
                map.insert((model.clone(), automaton), id);
                self.slots.push(Slot {
                    model,
                    automaton,
                    refcount: 0,
                });
                id
            }
            Index::Compressed(map) => {
                let hash = blake3::hash(model.as_bytes());
                let key = (hash, automaton);
                if let Some(candidates) = map.get(&key) {
                    for &candidate in candidates {
                        let slot = &self.slots[candidate.index()];
                        if slot.model == model && slot.automaton == automaton {
                            return candidate;
                        }
                    }
                }
                let id = StateId(self.slots.len() as u32);
                self.slots.push(Slot {
                    model,
                    automaton,
                    refcount: 0,
                });
                map.entry(key).or_default().push(id);
                id
            }
        }
    }

    /// Interns a state without requiring [`ByteAddressable`]; only valid for
    /// pools created with [`StatePool::new`]. Panics (debug-only assertion)
    /// if called on a compressed pool.
    pub fn intern_direct(&mut self, model: S, automaton: A) -> StateId {
        match &mut self.index {
            Index::Direct(map) => {
                if let Some(&id) = map.get(&(model.clone(), automaton)) {
                    return id;
                }
                let id = StateId(self.slots.len() as u32);
                map.insert((model.clone(), automaton), id);
                self.slots.push(Slot {
                    model,
                    automaton,
                    refcount: 0,
                });
                id
            }
            Index::Compressed(_) => {
                debug_assert!(false, "intern_direct called on a compressed StatePool");
                unreachable!("compressed pools must use intern()")
            }
        }
    }

    /// Borrows the model state for `id`.
    #[must_use]
    pub fn model(&self, id: StateId) -> &S {
        &self.slots[id.index()].model
    }

    /// Borrows the automaton state for `id`.
    #[must_use]
    pub fn automaton(&self, id: StateId) -> &A {
        &self.slots[id.index()].automaton
    }

    /// Increments the reference count for `id` (a new DFS frame or root
    /// entry now holds it).
    pub fn retain(&mut self, id: StateId) {
        self.slots[id.index()].refcount += 1;
    }

    /// Decrements the reference count for `id`.
    ///
    /// # Panics
    ///
    /// Panics (debug-only) if the refcount was already zero, which would
    /// indicate a double-release and violate invariant I2.
    pub fn release(&mut self, id: StateId) {
        let slot = &mut self.slots[id.index()];
        debug_assert!(slot.refcount > 0, "refcount underflow releasing {id:?}");
        slot.refcount = slot.refcount.saturating_sub(1);
    }

    /// Current reference count for `id`, for invariant assertions in tests.
    #[must_use]
    pub fn refcount(&self, id: StateId) -> u32 {
        self.slots[id.index()].refcount
    }
}

impl<S: ModelState, A: AutomatonState> Default for StatePool<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct TestModel(u64);

    impl ModelState for TestModel {
        fn diagnostic_id(&self) -> u64 {
            self.0
        }
    }

    impl ByteAddressable for TestModel {
        fn as_bytes(&self) -> &[u8] {
            bytemuck::bytes_of(&self.0)
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    struct TestAutomaton(u32);

    impl AutomatonState for TestAutomaton {
        fn scc_index(&self) -> u32 {
            self.0
        }
        fn strength(&self) -> ecx_model::Strength {
            ecx_model::Strength::Strong
        }
        fn is_initial(&self) -> bool {
            self.0 == 0
        }
    }

    #[test]
    fn interning_the_same_content_returns_the_same_id() {
        let mut pool: StatePool<TestModel, TestAutomaton> = StatePool::new();
        let a = pool.intern_direct(TestModel(1), TestAutomaton(0));
        let b = pool.intern_direct(TestModel(1), TestAutomaton(0));
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn distinct_content_gets_distinct_ids() {
        let mut pool: StatePool<TestModel, TestAutomaton> = StatePool::new();
        let a = pool.intern_direct(TestModel(1), TestAutomaton(0));
        let b = pool.intern_direct(TestModel(2), TestAutomaton(0));
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn compressed_pool_canonicalizes_on_hash_match() {
        let mut pool: StatePool<TestModel, TestAutomaton> = StatePool::with_byte_compression();
        let a = pool.intern(TestModel(7), TestAutomaton(1));
        let b = pool.intern(TestModel(7), TestAutomaton(1));
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn refcount_tracks_retain_and_release() {
        let mut pool: StatePool<TestModel, TestAutomaton> = StatePool::new();
        let id = pool.intern_direct(TestModel(1), TestAutomaton(0));
        pool.retain(id);
        pool.retain(id);
        assert_eq!(pool.refcount(id), 2);
        pool.release(id);
        assert_eq!(pool.refcount(id), 1);
    }
}

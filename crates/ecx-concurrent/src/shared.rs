//! Lock-free open-set and shared hash table (C10), grounded on
//! `original_source/.../fasttgbaalgos/ec/concur/openset.hh` and
//! `sharedhashtable.hh`: the two MPMC structures the reachability-EC and
//! weak-EC worker pools use instead of the full union-find (C9), which they
//! have no need for — neither policy accumulates cross-class marks, they
//! only need a shared "have I seen this already" test.

use std::hash::Hash;

use dashmap::DashMap;

/// Multi-producer / multi-consumer visited-set-plus-frontier used by
/// reachability workers (terminal sub-automaton): `insert` records that a
/// state has entered the frontier exactly once across all workers; `try_grab`
/// lets any worker pull the next unexplored state.
pub struct SharedOpenSet<K> {
    seen: DashMap<K, ()>,
    frontier: crossbeam_queue::SegQueue<K>,
}

impl<K: Eq + Hash + Clone + Send + Sync> SharedOpenSet<K> {
    /// Creates an empty open-set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: DashMap::new(),
            frontier: crossbeam_queue::SegQueue::new(),
        }
    }

    /// Records `key` as discovered. Returns `true` the first time any
    /// worker inserts this key (the caller should then expand its
    /// successors); `false` if another worker already claimed it.
    pub fn insert(&self, key: K) -> bool {
        use dashmap::mapref::entry::Entry;
        match self.seen.entry(key.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(());
                self.frontier.push(key);
                true
            }
        }
    }

    /// Pops an arbitrary frontier element for a worker to expand, or `None`
    /// if the frontier is currently empty (not necessarily permanently: a
    /// peer may still push more).
    pub fn try_grab(&self) -> Option<K> {
        self.frontier.pop()
    }

    /// Total number of distinct keys ever inserted.
    #[must_use]
    pub fn size(&self) -> usize {
        self.seen.len()
    }
}

impl<K: Eq + Hash + Clone + Send + Sync> Default for SharedOpenSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A value a [`SharedHashTable`] can hold for a key, mirroring the source's
/// `sharedhashtable::sharedvalues` enum (`Alive_state` / `Dead_state`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SharedStatus {
    /// A worker currently has this state open on its local DFS.
    Alive,
    /// A worker has proved this state's local SCC closed and non-accepting.
    Dead,
}

/// Multi-producer / multi-consumer map from product-state key to its last
/// known [`SharedStatus`], used by weak-EC workers to avoid re-exploring a
/// state a peer has already closed.
pub struct SharedHashTable<K> {
    table: DashMap<K, SharedStatus>,
}

impl<K: Eq + Hash + Clone + Send + Sync> SharedHashTable<K> {
    /// Creates an empty shared hash table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: DashMap::new(),
        }
    }

    /// Returns the existing status for `key` if already present, otherwise
    /// records `value` for it and returns `value`.
    pub fn find_or_put(&self, key: K, value: SharedStatus) -> SharedStatus {
        use dashmap::mapref::entry::Entry;
        match self.table.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                entry.insert(value);
                value
            }
        }
    }

    /// Overwrites `key`'s status unconditionally (used when a worker
    /// upgrades a state it previously marked `Alive` to `Dead` on closing
    /// its SCC).
    pub fn set(&self, key: K, value: SharedStatus) {
        self.table.insert(key, value);
    }

    /// Returns `key`'s current status, if recorded.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<SharedStatus> {
        self.table.get(key).map(|r| *r)
    }
}

impl<K: Eq + Hash + Clone + Send + Sync> Default for SharedHashTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

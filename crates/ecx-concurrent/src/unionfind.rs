//! Lock-free union-find with marks (C9), grounded on
//! `original_source/.../fasttgbaalgos/ec/concur/unionfind.h`: a disjoint-set
//! over product states, sharded across worker threads, with a per-class
//! acceptance mark-set and a distinguished absorbing Dead root.
//!
//! The arena that backs this structure is a plain `Vec` protected by a
//! `parking_lot::RwLock`: every read-side operation (`find`, `unite`,
//! `add_marks`, `marks_of`, `is_dead`) takes only a *read* guard and never
//! blocks another reader; only growing the arena (inserting a never-before-seen
//! key) takes the write guard, and only for the duration of the `push`. Once a
//! node exists, every subsequent operation on it is a CAS loop over its own
//! atomics — no lock is held across a retry. This is the `unsafe`-free
//! equivalent of the source's raw hash-table-of-pointers: the indirection
//! through a stable `usize` index plays the role the source's raw `uf_node_*`
//! pointers play, without needing hazard pointers or epoch reclamation (nodes
//! are never individually freed, matching the source's documented choice).

use std::hash::Hash;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use dashmap::DashMap;
use ecx_model::MarkSet;
use parking_lot::RwLock;

/// An opaque handle into a [`UnionFind`]'s arena. Stable for the lifetime of
/// the structure; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UfHandle(usize);

struct UfNode {
    parent: AtomicUsize,
    rank: AtomicU32,
    marks: AtomicU32,
}

impl UfNode {
    fn root_at(index: usize) -> Self {
        Self {
            parent: AtomicUsize::new(index),
            rank: AtomicU32::new(0),
            marks: AtomicU32::new(0),
        }
    }
}

/// Thread-safe disjoint-set over keys of type `K`, with a per-class
/// [`MarkSet`] and a single absorbing Dead class (invariant I6: once a class
/// is observed Dead, no operation may re-open it).
pub struct UnionFind<K> {
    nodes: RwLock<Vec<CachePadded<UfNode>>>,
    index: DashMap<K, usize>,
    dead: usize,
}

impl<K: Eq + Hash + Clone + Send + Sync> UnionFind<K> {
    /// Creates an empty union-find with its Dead sentinel pre-allocated.
    #[must_use]
    pub fn new() -> Self {
        let dead_node = CachePadded::new(UfNode::root_at(0));
        Self {
            nodes: RwLock::new(vec![dead_node]),
            index: DashMap::new(),
            dead: 0,
        }
    }

    /// Returns the canonical handle for `key`, allocating a fresh singleton
    /// class the first time this key is seen. `inserted` is `true` exactly
    /// once per distinct key.
    pub fn make_set(&self, key: K) -> (UfHandle, bool) {
        use dashmap::mapref::entry::Entry;
        match self.index.entry(key) {
            Entry::Occupied(entry) => (UfHandle(*entry.get()), false),
            Entry::Vacant(entry) => {
                let mut nodes = self.nodes.write();
                let idx = nodes.len();
                nodes.push(CachePadded::new(UfNode::root_at(idx)));
                drop(nodes);
                entry.insert(idx);
                (UfHandle(idx), true)
            }
        }
    }

    /// Looks up the handle for `key` without creating one.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<UfHandle> {
        self.index.get(key).map(|idx| UfHandle(*idx))
    }

    /// Follows parent pointers to the representative of `handle`'s class,
    /// applying path halving as it goes (each step replaces a node's parent
    /// with its grandparent once they disagree).
    #[must_use]
    pub fn find(&self, handle: UfHandle) -> UfHandle {
        let nodes = self.nodes.read();
        let mut cur = handle.0;
        loop {
            let parent = nodes[cur].parent.load(Ordering::Acquire);
            if parent == cur {
                return UfHandle(cur);
            }
            let grandparent = nodes[parent].parent.load(Ordering::Acquire);
            let _ = nodes[cur].parent.compare_exchange(
                parent,
                grandparent,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            cur = grandparent;
        }
    }

    /// Unites the classes of `a` and `b`, OR-ing `extra_marks` into the
    /// resulting class. Returns the resulting root and whether either side
    /// was already Dead at link time (`fast_backtrack`): a worker observing
    /// `true` may abandon the subtree it was exploring under the non-dead
    /// side, per the fast-backtrack optimisation (SPEC_FULL.md §4.9.3).
    ///
    /// If either side is Dead, the live side is linked under the Dead root
    /// (Dead is absorbing: the result is always Dead) rather than following
    /// plain union-by-rank.
    pub fn unite(&self, a: UfHandle, b: UfHandle, extra_marks: MarkSet) -> (UfHandle, bool) {
        loop {
            let ra = self.find(a);
            let rb = self.find(b);
            if ra == rb {
                self.add_marks(ra, extra_marks);
                return (ra, ra.0 == self.dead);
            }

            let ra_dead = ra.0 == self.dead;
            let rb_dead = rb.0 == self.dead;
            let fast_backtrack = ra_dead || rb_dead;

            let (child, parent) = if ra_dead {
                (rb, ra)
            } else if rb_dead {
                (ra, rb)
            } else {
                let nodes = self.nodes.read();
                let rank_a = nodes[ra.0].rank.load(Ordering::Acquire);
                let rank_b = nodes[rb.0].rank.load(Ordering::Acquire);
                if rank_a < rank_b {
                    (ra, rb)
                } else {
                    (rb, ra)
                }
            };

            let linked = {
                let nodes = self.nodes.read();
                nodes[child.0]
                    .parent
                    .compare_exchange(child.0, parent.0, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
            };
            if !linked {
                continue;
            }
            if !fast_backtrack {
                let nodes = self.nodes.read();
                let rank_child = nodes[child.0].rank.load(Ordering::Acquire);
                let rank_parent = nodes[parent.0].rank.load(Ordering::Acquire);
                if rank_child == rank_parent {
                    nodes[parent.0].rank.fetch_add(1, Ordering::AcqRel);
                }
            }
            self.add_marks(parent, extra_marks);
            return (parent, fast_backtrack);
        }
    }

    /// OR-s `marks` into `handle`'s class atomically.
    pub fn add_marks(&self, handle: UfHandle, marks: MarkSet) {
        let root = self.find(handle);
        let bits = mark_bits(marks);
        if bits != 0 {
            let nodes = self.nodes.read();
            nodes[root.0].marks.fetch_or(bits, Ordering::AcqRel);
        }
    }

    /// Reads `handle`'s class's accumulated marks.
    #[must_use]
    pub fn marks_of(&self, handle: UfHandle) -> MarkSet {
        let root = self.find(handle);
        let nodes = self.nodes.read();
        let bits = nodes[root.0].marks.load(Ordering::Acquire);
        bits_to_marks(bits)
    }

    /// Links `handle`'s class under the Dead sentinel. Idempotent: calling
    /// it again on an already-dead class is a no-op.
    pub fn make_dead(&self, handle: UfHandle) {
        loop {
            let root = self.find(handle);
            if root.0 == self.dead {
                return;
            }
            let linked = {
                let nodes = self.nodes.read();
                nodes[root.0]
                    .parent
                    .compare_exchange(root.0, self.dead, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
            };
            if linked {
                return;
            }
        }
    }

    /// `true` iff `handle`'s class has been linked under the Dead sentinel.
    #[must_use]
    pub fn is_dead(&self, handle: UfHandle) -> bool {
        self.find(handle).0 == self.dead
    }

    /// Number of distinct keys ever inserted (excludes the Dead sentinel).
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// `true` iff no key has been inserted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<K: Eq + Hash + Clone + Send + Sync> Default for UnionFind<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn mark_bits(marks: MarkSet) -> u32 {
    marks.iter().fold(0u32, |acc, m| acc | (1 << m))
}

fn bits_to_marks(bits: u32) -> MarkSet {
    (0..32).fold(MarkSet::EMPTY, |acc, m| {
        if bits & (1 << m) != 0 {
            acc.union(MarkSet::singleton(m))
        } else {
            acc
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_set_is_idempotent_per_key() {
        let uf: UnionFind<&'static str> = UnionFind::new();
        let (a, first) = uf.make_set("x");
        let (b, second) = uf.make_set("x");
        assert!(first);
        assert!(!second);
        assert_eq!(a, b);
    }

    #[test]
    fn unite_merges_marks_and_find_agrees() {
        let uf: UnionFind<&'static str> = UnionFind::new();
        let (a, _) = uf.make_set("a");
        let (b, _) = uf.make_set("b");
        uf.add_marks(a, MarkSet::singleton(0));
        uf.add_marks(b, MarkSet::singleton(1));
        let (root, fast_backtrack) = uf.unite(a, b, MarkSet::EMPTY);
        assert!(!fast_backtrack);
        assert_eq!(uf.find(a), uf.find(b));
        let marks = uf.marks_of(root);
        assert!(marks.contains(0));
        assert!(marks.contains(1));
    }

    #[test]
    fn make_dead_is_permanent_and_absorbing() {
        let uf: UnionFind<&'static str> = UnionFind::new();
        let (a, _) = uf.make_set("a");
        let (b, _) = uf.make_set("b");
        uf.make_dead(a);
        assert!(uf.is_dead(a));
        let (_, fast_backtrack) = uf.unite(a, b, MarkSet::EMPTY);
        assert!(fast_backtrack);
        assert!(uf.is_dead(b));
    }

    #[test]
    fn dead_state_never_reopens_across_many_unites() {
        let uf: UnionFind<u32> = UnionFind::new();
        let handles: Vec<_> = (0..8).map(|k| uf.make_set(k).0).collect();
        uf.make_dead(handles[0]);
        for w in handles.windows(2) {
            uf.unite(w[0], w[1], MarkSet::EMPTY);
        }
        for h in &handles {
            assert!(uf.is_dead(*h));
        }
    }

    #[test]
    fn concurrent_unites_converge_to_one_class_with_union_of_marks() {
        use std::sync::Arc;
        let uf: Arc<UnionFind<u32>> = Arc::new(UnionFind::new());
        let handles: Vec<_> = (0..64).map(|k| uf.make_set(k).0).collect();
        std::thread::scope(|scope| {
            for chunk in handles.chunks(2) {
                let uf = Arc::clone(&uf);
                let a = chunk[0];
                let b = chunk[1];
                scope.spawn(move || {
                    uf.unite(a, b, MarkSet::singleton(0));
                });
            }
        });
        for chunk in handles.chunks(2) {
            assert_eq!(uf.find(chunk[0]), uf.find(chunk[1]));
        }
    }
}

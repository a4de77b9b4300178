//! Linearisability properties of the concurrent union-find (T3/T5): a
//! sequence of unions applied through [`UnionFind`] converges to the same
//! partition and per-class mark sets as a plain sequential reference
//! implementation, regardless of how many threads actually performed the
//! unions or in what order, and a class observed Dead never reopens.

use std::sync::Arc;

use ecx_concurrent::UnionFind;
use ecx_model::MarkSet;
use proptest::prelude::*;

/// Plain sequential union-find over small integer keys, used only to
/// compute the expected final partition for a given sequence of unions.
struct Reference {
    parent: Vec<usize>,
}

impl Reference {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}

proptest! {
    #[test]
    fn sequential_unions_match_a_plain_reference_union_find(
        ops in prop::collection::vec((0u32..16, 0u32..16, 0u32..4), 1..64),
    ) {
        let uf: UnionFind<u32> = UnionFind::new();
        let handles: Vec<_> = (0..16u32).map(|k| uf.make_set(k).0).collect();
        let mut reference = Reference::new(16);

        for (a, b, mark_bit) in &ops {
            uf.unite(handles[*a as usize], handles[*b as usize], MarkSet::singleton(*mark_bit));
            reference.union(*a as usize, *b as usize);
        }

        for i in 0..16usize {
            for j in 0..16usize {
                let same_in_reference = reference.find(i) == reference.find(j);
                let same_in_uf = uf.find(handles[i]) == uf.find(handles[j]);
                prop_assert_eq!(same_in_reference, same_in_uf);
            }
        }
    }
}

#[test]
fn concurrent_unions_converge_to_the_same_partition_as_sequential() {
    let n = 32;
    let uf: Arc<UnionFind<u32>> = Arc::new(UnionFind::new());
    let handles: Vec<_> = (0..n as u32).map(|k| uf.make_set(k).0).collect();
    let pairs: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();

    std::thread::scope(|scope| {
        for chunk in pairs.chunks(4) {
            let uf = Arc::clone(&uf);
            let chunk = chunk.to_vec();
            let handles = handles.clone();
            scope.spawn(move || {
                for (a, b) in chunk {
                    uf.unite(handles[a], handles[b], MarkSet::singleton(0));
                }
            });
        }
    });

    let root = uf.find(handles[0]);
    for h in &handles {
        assert_eq!(uf.find(*h), root);
    }
    assert!(uf.marks_of(root).contains(0));
}

#[test]
fn a_class_marked_dead_from_one_thread_stays_dead_under_concurrent_unions() {
    let n = 16;
    let uf: Arc<UnionFind<u32>> = Arc::new(UnionFind::new());
    let handles: Vec<_> = (0..n as u32).map(|k| uf.make_set(k).0).collect();
    uf.make_dead(handles[0]);

    std::thread::scope(|scope| {
        for i in 0..n - 1 {
            let uf = Arc::clone(&uf);
            let handles = handles.clone();
            scope.spawn(move || {
                uf.unite(handles[i], handles[i + 1], MarkSet::EMPTY);
            });
        }
    });

    for h in &handles {
        assert!(uf.is_dead(*h));
    }
}

#[test]
fn make_set_from_many_threads_allocates_exactly_one_handle_per_key() {
    let uf: Arc<UnionFind<u32>> = Arc::new(UnionFind::new());
    std::thread::scope(|scope| {
        for _ in 0..8 {
            let uf = Arc::clone(&uf);
            scope.spawn(move || {
                for k in 0..32u32 {
                    uf.make_set(k);
                }
            });
        }
    });
    assert_eq!(uf.len(), 32);
}

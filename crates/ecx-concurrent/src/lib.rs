//! Concurrent on-the-fly emptiness-checking machinery (C9–C11).
//!
//! This crate adds the lock-free union-find ([`unionfind`]) and the shared
//! open-set / hash table ([`shared`]) a worker pool needs to run several
//! instances of [`ecx_core`]'s sequential engines against the same product
//! graph at once, and the worker-pool drivers themselves ([`engines`]).
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod engines;
pub mod shared;
pub mod unionfind;

pub use engines::{
    run_reachability_pool, run_strong_pool, run_weak_pool, ParallelConfig, ParallelOutcome,
    SequentialEngineKind, StopFlags, WorkerReport,
};
pub use shared::{SharedHashTable, SharedOpenSet, SharedStatus};
pub use unionfind::{UfHandle, UnionFind};

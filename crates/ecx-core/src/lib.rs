//! Sequential on-the-fly emptiness-checking kernel (C1–C8).
//!
//! This crate owns the state pool, colour table, root stack, and the two
//! sequential SCC emptiness engines (Tarjan- and Dijkstra-style). It has no
//! concurrency of its own — [`ecx_concurrent`] builds the parallel engines on
//! top of the same colour/root-stack/product machinery defined here, one
//! instance per worker thread.
//!
//! [`ecx_concurrent`]: ../ecx_concurrent/index.html
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod colour;
pub mod dead;
pub mod dijkstra;
pub mod pool;
pub mod product;
pub mod rootstack;
pub mod stats;
pub mod tarjan;

pub use colour::{Colour, ColourTable};
pub use dead::DeadStatePolicy;
pub use dijkstra::DijkstraEngine;
pub use pool::{ByteAddressable, StateId, StatePool};
pub use product::{initial_states, successors, ProductTransition};
pub use rootstack::{RootStack, RootStackKind};
pub use stats::{EngineResult, Stats};
pub use tarjan::TarjanEngine;

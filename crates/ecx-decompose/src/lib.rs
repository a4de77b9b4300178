//! Strength decomposition of the property automaton (C12).
//!
//! Splits a property automaton's reachable state space into the terminal /
//! weak / strong partitions of SPEC_FULL.md §4.10, grounded on
//! `original_source/.../scc_decompose.cc` and `cou99strength.cc`. The
//! automaton already tags every state with the strength of the SCC it
//! belongs to ([`ecx_model::AutomatonState::strength`]) — this crate does
//! not recompute SCCs, it only walks the reachable state space once to
//! discover which partitions are non-empty and builds the ancestor-closed
//! state sets [`view::RestrictedAutomaton`] needs to prune traversal to a
//! single partition plus its ancestors.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod classify;
pub mod view;

pub use classify::{decompose, Decomposition, Dispatch};
pub use view::RestrictedAutomaton;

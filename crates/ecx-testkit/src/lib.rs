//! Shared test fixtures for the `ecx` workspace: a tiny in-memory Kripke
//! structure, a tiny in-memory property automaton, and a handful of
//! hand-built scenarios exercising the six end-to-end cases used across the
//! integration test suites.
//!
//! Mirrors the role of the teacher workspace's `echo-dry-tests` crate: a
//! dependency-free fixture crate the real test suites pull in via
//! `[dev-dependencies]`, never shipped as part of the checking engines
//! themselves.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod guard;
pub mod model;
pub mod scenarios;

pub use guard::PropGuard;
pub use model::{TinyAutomaton, TinyAutomatonState, TinyModel, TinyModelState};
pub use scenarios::{scenario, Scenario, ScenarioName};

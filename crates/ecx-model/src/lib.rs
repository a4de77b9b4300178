//! Model back-end and automaton traits consumed by the emptiness-check core.
//!
//! This crate defines the single capability boundary between the checking
//! engines (`ecx-core`, `ecx-concurrent`, `ecx-decompose`, `ecx-driver`) and
//! whatever produces the Kripke structure and the property automaton: the
//! [`ModelBackend`] and [`Guard`] traits. Nothing in this crate knows how a
//! model state is produced, loaded, or how an LTL formula became an
//! automaton — it only describes the shape a back-end must present.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod automaton;
pub mod error;
pub mod guard;
pub mod marks;
pub mod oracle;

pub use automaton::{AutomatonBackend, AutomatonState, AutomatonTransition, Strength};
pub use error::ModelError;
pub use guard::Guard;
pub use marks::MarkSet;
pub use oracle::{ModelBackend, ModelState, Transition};

//! The driver's error taxonomy (SPEC_FULL.md §7), in the teacher's
//! `thiserror`-enum-with-named-fields style (`ecx_model::ModelError`,
//! `rmg_core::sandbox::DeterminismError`).

use ecx_model::ModelError;

/// Everything that can keep [`crate::Driver::run`] from producing a
/// [`crate::Verdict`].
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The requested [`crate::CheckConfig`] is invalid; caught before any
    /// worker starts.
    #[error("invalid configuration: {reason}")]
    Configuration {
        /// Human-readable description of what is wrong.
        reason: String,
    },

    /// A worker pool exhausted its allotted state-pool capacity. This
    /// workspace's `StatePool` grows without a fixed bound, so this variant
    /// is reserved for a future bounded-pool allocator; no engine in this
    /// crate raises it today.
    #[error("state-pool allocator exhausted after {states_allocated} states")]
    AllocatorExhaustion {
        /// Number of states allocated before the allocator gave up.
        states_allocated: u64,
    },

    /// A model or automaton back-end raised an error while the product was
    /// being explored.
    #[error(transparent)]
    Model(#[from] ModelError),
}

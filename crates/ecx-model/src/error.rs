//! Error taxonomy for the model/automaton boundary (SPEC_FULL.md §7).

use thiserror::Error;

/// Errors a [`crate::ModelBackend`] can report while the checking engines
/// drive it.
///
/// This taxonomy covers only the back-end-facing third of spec §7; the
/// driver-facing variants (configuration, allocator exhaustion) live in
/// `ecx_driver::DriverError`, which wraps this type for propagation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The back-end failed to load (dynamic library missing, version
    /// mismatch, malformed model file, etc).
    #[error("failed to load model back-end `{name}`: {reason}")]
    BackendLoad {
        /// Name of the back-end that failed to load.
        name: String,
        /// Human-readable reason reported by the back-end.
        reason: String,
    },

    /// The back-end raised an error while computing successors or
    /// evaluating a guard for an already-loaded model.
    #[error("model back-end runtime error at state {state_id}: {reason}")]
    BackendRuntime {
        /// Identifier of the model state being processed when the error
        /// occurred, for diagnostics.
        state_id: u64,
        /// Human-readable reason reported by the back-end.
        reason: String,
    },

    /// An atomic proposition named by the dead-state policy or by a guard
    /// query could not be resolved against the model's declared alphabet.
    #[error("unknown atomic proposition `{name}`")]
    UnknownProposition {
        /// The unresolved proposition name.
        name: String,
    },
}

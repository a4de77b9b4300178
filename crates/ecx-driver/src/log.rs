//! Structured logging helpers, in the teacher's `tracing` idiom
//! (`echo-session-service::main`'s `tracing_subscriber::fmt::init()` call
//! plus `tracing::{info, instrument}` spans in `echo-sched`).

use ecx_core::Stats;

use crate::verdict::{Outcome, Verdict};

/// Installs a default `tracing` subscriber reading `RUST_LOG`, for binaries
/// embedding this crate that have not already set one up.
///
/// Only available behind the `tracing-init` feature, mirroring the
/// teacher's convention of leaving subscriber installation to the
/// top-level binary rather than a library crate.
#[cfg(feature = "tracing-init")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tracing::instrument(skip(stats), fields(states = stats.states_visited))]
pub(crate) fn log_worker_pool_done(pool: &str, empty: bool, stats: &Stats) {
    tracing::info!(pool, empty, transitions = stats.transitions_explored, "worker pool finished");
}

#[tracing::instrument(skip(verdict))]
pub(crate) fn log_verdict(policy: &str, verdict: &Verdict) {
    tracing::info!(
        policy,
        verdict = match verdict.verdict {
            Outcome::Violated => "violated",
            Outcome::Verified => "verified",
        },
        wall_ms = verdict.wall_ms,
        states = verdict.states,
        "emptiness check complete"
    );
}

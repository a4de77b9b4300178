//! The driver's configuration surface (SPEC_FULL.md §6), mirroring the
//! teacher's `EchoConfig` builder shape (`rmg_core::sandbox::EchoConfig`):
//! plain enums for closed-form choices, validated once at construction
//! before any worker starts (Configuration error, §7).

use ecx_concurrent::{ParallelConfig, SequentialEngineKind};
use ecx_core::{DeadStatePolicy, RootStackKind};

use crate::error::DriverError;

/// Which state-compression codec the state pool uses.
///
/// `ecx_core::StatePool` implements the `None` and `ByteHashed` strategies
/// directly (`StatePool::new` and `StatePool::with_byte_compression`); this
/// option is carried on [`CheckConfig`] for forward compatibility with model
/// back-ends whose state implements `ecx_core::ByteAddressable`. The
/// sequential and parallel engines in this workspace are generic over any
/// `ModelState` and construct the uncompressed pool internally — selecting
/// `ByteHashed` here is validated but does not change which pool an engine
/// builds (see DESIGN.md's Open Question resolutions for the rationale).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionMode {
    /// No state compression.
    #[default]
    None,
    /// Content-hash the model state's byte representation (blake3), the
    /// `variant-A`/`variant-B` slot of spec §6 collapsed into the one
    /// compressed mode `ecx_core::StatePool` implements.
    ByteHashed,
}

/// Global scheduling policy (spec §6's `policy` option): which top-level
/// dispatch the driver runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Every worker runs the sequential Tarjan engine against the whole
    /// property automaton.
    FullTarjan,
    /// Every worker runs the sequential Dijkstra engine against the whole
    /// property automaton.
    FullDijkstra,
    /// Workers alternate between the Tarjan and Dijkstra engines.
    Mixed,
    /// Run only the reachability-EC worker pool (valid when the whole
    /// automaton is already known to be terminal).
    Reachability,
    /// Run only the weak-EC worker pool (valid when the whole automaton is
    /// already known to be weak).
    WeakDfs,
    /// Decompose the property automaton into terminal/weak/strong
    /// sub-automata (`ecx_decompose`) and dispatch each concurrently to the
    /// simplest sufficient algorithm.
    Decomposed,
}

/// How a product state with no outgoing transitions is treated, mirroring
/// spec §6's `dead` option one-to-one with [`DeadStatePolicy`].
pub type DeadOption = DeadStatePolicy;

/// Builder-validated configuration for a single emptiness check run.
#[derive(Clone, Debug)]
pub struct CheckConfig {
    /// Number of parallel workers.
    workers: usize,
    /// State-compression codec choice.
    compress: CompressionMode,
    /// Dead-state short-circuit policy.
    dead: DeadOption,
    /// Root-stack representation each worker uses locally.
    root_stack: RootStackKind,
    /// Per-worker sequential engine discipline.
    engine: SequentialEngineKind,
    /// Global scheduling policy.
    policy: Policy,
    /// When `true`, successor enumeration order is randomised per worker.
    swarm: bool,
}

impl CheckConfig {
    /// Starts a new builder with the spec's defaults: one worker, no
    /// compression, no implicit dead-state loop, a dense root stack, the
    /// Tarjan engine, the decomposed policy, swarm disabled.
    #[must_use]
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Number of parallel workers this configuration requests.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// The global scheduling policy.
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// The dead-state short-circuit policy.
    #[must_use]
    pub fn dead_policy(&self) -> DeadOption {
        self.dead.clone()
    }

    /// The root-stack representation each worker uses.
    #[must_use]
    pub const fn root_stack_kind(&self) -> RootStackKind {
        self.root_stack
    }

    /// The per-worker sequential engine discipline.
    #[must_use]
    pub const fn engine_kind(&self) -> SequentialEngineKind {
        self.engine
    }

    /// The state-compression codec choice.
    #[must_use]
    pub const fn compression(&self) -> CompressionMode {
        self.compress
    }

    /// Whether successor enumeration order is randomised per worker.
    #[must_use]
    pub const fn swarm(&self) -> bool {
        self.swarm
    }

    /// Builds the [`ParallelConfig`] `ecx_concurrent`'s worker pools expect,
    /// derived from this configuration's workers/dead/root-stack/swarm
    /// fields.
    #[must_use]
    pub fn parallel_config(&self) -> ParallelConfig {
        ParallelConfig {
            workers: self.workers.max(1),
            dead_policy: self.dead.clone(),
            root_stack_kind: self.root_stack,
            swarm: self.swarm,
        }
    }
}

/// Builder for [`CheckConfig`]; validates the whole configuration exactly
/// once, in [`CheckConfigBuilder::build`], before any worker starts (spec
/// §7: "Configuration error ... fatal, caught before any worker starts").
#[derive(Clone, Debug)]
pub struct CheckConfigBuilder {
    workers: usize,
    compress: CompressionMode,
    dead: DeadOption,
    root_stack: RootStackKind,
    engine: SequentialEngineKind,
    policy: Policy,
    swarm: bool,
}

impl Default for CheckConfigBuilder {
    fn default() -> Self {
        Self {
            workers: 1,
            compress: CompressionMode::None,
            dead: DeadStatePolicy::None,
            root_stack: RootStackKind::Dense,
            engine: SequentialEngineKind::Tarjan,
            policy: Policy::Decomposed,
            swarm: false,
        }
    }
}

impl CheckConfigBuilder {
    /// Sets the number of parallel workers.
    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the state-compression codec.
    #[must_use]
    pub const fn compress(mut self, compress: CompressionMode) -> Self {
        self.compress = compress;
        self
    }

    /// Sets the dead-state short-circuit policy.
    #[must_use]
    pub fn dead(mut self, dead: DeadOption) -> Self {
        self.dead = dead;
        self
    }

    /// Sets the root-stack representation.
    #[must_use]
    pub const fn root_stack(mut self, root_stack: RootStackKind) -> Self {
        self.root_stack = root_stack;
        self
    }

    /// Sets the per-worker sequential engine discipline.
    #[must_use]
    pub const fn engine(mut self, engine: SequentialEngineKind) -> Self {
        self.engine = engine;
        self
    }

    /// Sets the global scheduling policy.
    #[must_use]
    pub const fn policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets whether successor enumeration order is randomised per worker.
    #[must_use]
    pub const fn swarm(mut self, swarm: bool) -> Self {
        self.swarm = swarm;
        self
    }

    /// Validates and finalises the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Configuration`] if `workers` is zero, or if
    /// `workers > 1` is requested together with a policy that has no
    /// meaningful parallel decomposition of its own sub-problem (the
    /// single-partition policies still fan out over `workers` threads
    /// against the same product, so this only rejects `workers == 0`).
    pub fn build(self) -> Result<CheckConfig, DriverError> {
        if self.workers == 0 {
            return Err(DriverError::Configuration {
                reason: "workers must be at least 1".to_string(),
            });
        }
        Ok(CheckConfig {
            workers: self.workers,
            compress: self.compress,
            dead: self.dead,
            root_stack: self.root_stack,
            engine: self.engine,
            policy: self.policy,
            swarm: self.swarm,
        })
    }
}

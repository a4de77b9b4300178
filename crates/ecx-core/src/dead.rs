//! The dead-state short-circuit policy (SPEC_FULL.md §4, grounded on
//! `fasttgbaalgos/ec/lazycheck.cc`): what an engine should assume about a
//! product state with zero outgoing transitions.

use ecx_model::{MarkSet, ModelBackend, ModelError};

/// Configures how an engine treats a product state with no outgoing
/// transitions.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DeadStatePolicy {
    /// No implicit self-loop: a finite run ending here is simply rejected.
    #[default]
    None,
    /// An implicit self-loop discharging the full acceptance alphabet,
    /// unconditionally.
    True,
    /// An implicit self-loop discharging the full acceptance alphabet, but
    /// only if the named atomic proposition holds in the model state.
    Named(String),
}

impl DeadStatePolicy {
    /// Resolves this policy against `state`, returning the implicit
    /// self-loop's marks if one applies, or `None` if the dead state has no
    /// implicit loop (finite run through it is rejected).
    pub fn resolve<M: ModelBackend>(
        &self,
        model: &M,
        state: &M::State,
        alphabet_size: u32,
    ) -> Result<Option<MarkSet>, ModelError> {
        match self {
            Self::None => Ok(None),
            Self::True => Ok(Some(full_marks(alphabet_size))),
            Self::Named(ap) => {
                if model.atomic_proposition(state, ap)? {
                    Ok(Some(full_marks(alphabet_size)))
                } else {
                    Ok(None)
                }
            }
        }
    }
}

fn full_marks(alphabet_size: u32) -> MarkSet {
    (0..alphabet_size).fold(MarkSet::EMPTY, |acc, m| acc.union(MarkSet::singleton(m)))
}

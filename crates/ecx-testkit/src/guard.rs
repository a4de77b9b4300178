//! A tiny propositional guard over named atomic propositions, for fixtures.

use std::collections::BTreeSet;

use ecx_model::Guard;

/// A conjunction of `ap = true` / `ap = false` literals.
///
/// Satisfiable unless some atomic proposition is required both true and
/// false; this is a deliberately minimal stand-in for a real BDD-backed
/// guard implementation, sufficient for the small fixtures in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PropGuard {
    required_true: BTreeSet<String>,
    required_false: BTreeSet<String>,
}

impl PropGuard {
    /// The vacuously true guard (`⊤`).
    #[must_use]
    pub fn tt() -> Self {
        Self::default()
    }

    /// Returns a copy of `self` additionally requiring `ap` to hold (or not
    /// hold, if `value` is `false`).
    #[must_use]
    pub fn require(mut self, ap: impl Into<String>, value: bool) -> Self {
        let ap = ap.into();
        if value {
            self.required_true.insert(ap);
        } else {
            self.required_false.insert(ap);
        }
        self
    }
}

impl Guard for PropGuard {
    fn conjoin(&self, other: &Self) -> Self {
        let mut required_true = self.required_true.clone();
        required_true.extend(other.required_true.iter().cloned());
        let mut required_false = self.required_false.clone();
        required_false.extend(other.required_false.iter().cloned());
        Self {
            required_true,
            required_false,
        }
    }

    fn is_satisfiable(&self) -> bool {
        self.required_true.is_disjoint(&self.required_false)
    }

    fn implies_proposition(&self, ap: &str) -> bool {
        self.required_true.contains(ap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conjoining_contradictory_requirements_is_unsatisfiable() {
        let a = PropGuard::tt().require("p", true);
        let b = PropGuard::tt().require("p", false);
        assert!(!a.conjoin(&b).is_satisfiable());
    }

    #[test]
    fn conjoining_compatible_requirements_is_satisfiable() {
        let a = PropGuard::tt().require("p", true);
        let b = PropGuard::tt().require("q", true);
        let c = a.conjoin(&b);
        assert!(c.is_satisfiable());
        assert!(c.implies_proposition("p"));
        assert!(c.implies_proposition("q"));
    }
}

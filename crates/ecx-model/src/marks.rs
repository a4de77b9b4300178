//! Fixed-size acceptance mark sets.
//!
//! The acceptance alphabet is bounded at 32 marks (`spec.md` §3). A
//! [`MarkSet`] is a plain bitset over that alphabet; the type itself does not
//! know what a mark *means* — only the automaton layer interprets membership
//! as "this transition discharges acceptance condition `i`".

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Maximum number of distinct acceptance marks a [`MarkSet`] can represent.
pub const MAX_MARKS: u32 = 32;

/// A subset of the acceptance alphabet, represented as a bitset.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "config-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkSet(u32);

impl MarkSet {
    /// The empty mark set.
    pub const EMPTY: Self = Self(0);

    /// Builds a mark set containing exactly `mark`.
    ///
    /// # Panics
    ///
    /// Panics if `mark >= MAX_MARKS`. Callers enumerate marks from the
    /// automaton's own alphabet, which is validated at automaton
    /// construction time, so this is an internal-consistency check rather
    /// than an input-validation boundary.
    #[must_use]
    pub fn singleton(mark: u32) -> Self {
        assert!(mark < MAX_MARKS, "mark index out of range");
        Self(1 << mark)
    }

    /// Returns `true` if `self` contains `mark`.
    #[must_use]
    pub const fn contains(self, mark: u32) -> bool {
        (self.0 >> mark) & 1 == 1
    }

    /// Returns `true` if `self` is the empty set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every mark in `full` is present in `self`.
    #[must_use]
    pub const fn is_superset_of(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Unions `other` into `self`, returning the result.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` when `self` contains every mark up to `alphabet_size`,
    /// i.e. an accepting run has discharged the full acceptance condition.
    #[must_use]
    pub const fn is_full(self, alphabet_size: u32) -> bool {
        if alphabet_size >= 32 {
            self.0 == u32::MAX
        } else {
            self.0 & ((1 << alphabet_size) - 1) == (1 << alphabet_size) - 1
        }
    }

    /// Iterates over the set marks as their bit indices.
    pub fn iter(self) -> impl Iterator<Item = u32> {
        (0..MAX_MARKS).filter(move |&m| self.contains(m))
    }
}

impl BitOr for MarkSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for MarkSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for MarkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

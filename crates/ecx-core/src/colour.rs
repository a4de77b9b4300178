//! The colour table (C5): maps each product state to its current DFS
//! classification.

use crate::pool::StateId;

/// The DFS classification of a product state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    /// Not yet visited by the DFS.
    Unknown,
    /// Currently on the DFS stack at the given stack position.
    Live(u32),
    /// Proven not to reach any unexplored accepting cycle; permanently
    /// retired (invariant I4: once `Dead`, never revisited).
    Dead,
}

/// Dense, `StateId`-indexed colour storage.
///
/// Backed by a single growable `Vec`, since [`StateId`] is dense by
/// construction (C1): no hashing is needed on the hot classification path.
#[derive(Default)]
pub struct ColourTable {
    colours: Vec<Colour>,
}

impl ColourTable {
    /// Creates an empty colour table.
    #[must_use]
    pub fn new() -> Self {
        Self { colours: Vec::new() }
    }

    /// Returns the colour of `id`, defaulting to `Unknown` for ids the table
    /// has not grown to cover yet.
    #[must_use]
    pub fn get(&self, id: StateId) -> Colour {
        self.colours.get(id.index()).copied().unwrap_or(Colour::Unknown)
    }

    /// Sets the colour of `id`, growing the backing storage as needed.
    pub fn set(&mut self, id: StateId, colour: Colour) {
        if self.colours.len() <= id.index() {
            self.colours.resize(id.index() + 1, Colour::Unknown);
        }
        self.colours[id.index()] = colour;
    }

    /// Returns `true` if `id` has been marked `Dead`.
    #[must_use]
    pub fn is_dead(&self, id: StateId) -> bool {
        matches!(self.get(id), Colour::Dead)
    }

    /// Returns the DFS stack position of `id`, if it is currently `Live`.
    #[must_use]
    pub fn live_position(&self, id: StateId) -> Option<u32> {
        match self.get(id) {
            Colour::Live(pos) => Some(pos),
            _ => None,
        }
    }
}

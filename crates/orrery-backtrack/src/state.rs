// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The placement snapshot emitted after every backtracking step.

use fixedbitset::FixedBitSet;
use orrery_model::board::{Board, Square};

/// What the last step did to the partial placement.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttemptKind {
    /// The candidate was consistent and was placed.
    Accepted,
    /// The candidate violated a constraint and was discarded.
    Rejected,
    /// The deepest placement was removed and its level abandoned.
    Backtracked,
    /// The accepted candidate completed a full consistent placement.
    Solution,
}

impl std::fmt::Display for AttemptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptKind::Accepted => write!(f, "Accepted"),
            AttemptKind::Rejected => write!(f, "Rejected"),
            AttemptKind::Backtracked => write!(f, "Backtracked"),
            AttemptKind::Solution => write!(f, "Solution"),
        }
    }
}

/// The decision a step applied (or tried to).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Attempt {
    pub square: Square,
    pub kind: AttemptKind,
}

impl std::fmt::Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.square)
    }
}

/// A partial placement plus the attempt that produced it.
///
/// Produced only by the solver's transition function; every snapshot is a
/// function of its parent plus exactly one decision. Consumers receive
/// clones and must treat them as immutable.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PlacementState {
    board: Board,
    placements: Vec<Square>,
    occupied: FixedBitSet,
    last_attempt: Option<Attempt>,
    valid: bool,
}

impl PlacementState {
    /// Creates the empty placement for the given board.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            placements: Vec::with_capacity(board.num_squares()),
            occupied: FixedBitSet::with_capacity(board.num_squares()),
            last_attempt: None,
            valid: true,
        }
    }

    /// Returns the board this placement lives on.
    #[inline(always)]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Returns the placed squares in placement order.
    #[inline(always)]
    pub fn placements(&self) -> &[Square] {
        &self.placements
    }

    /// Returns the number of placements.
    #[inline(always)]
    pub fn num_placements(&self) -> usize {
        self.placements.len()
    }

    /// Returns the most recent placement, if any.
    #[inline]
    pub fn last_placement(&self) -> Option<Square> {
        self.placements.last().copied()
    }

    /// Returns true if the given square is occupied.
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied.contains(self.board.linear_index(square))
    }

    /// Returns the attempt the last step applied.
    #[inline(always)]
    pub fn last_attempt(&self) -> Option<Attempt> {
        self.last_attempt
    }

    /// Returns false if the last attempt was a constraint violation.
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Applies an accepted placement.
    ///
    /// Fails when the square is already occupied. The solver treats that
    /// as an internal invariant violation: its constraint check must have
    /// discarded such a candidate before this point.
    pub(crate) fn place(&mut self, square: Square, kind: AttemptKind) -> Result<(), String> {
        let bit = self.board.linear_index(square);
        if self.occupied.contains(bit) {
            return Err(format!("square {} is already occupied", square));
        }

        self.occupied.insert(bit);
        self.placements.push(square);
        self.last_attempt = Some(Attempt { square, kind });
        self.valid = true;
        Ok(())
    }

    /// Records a rejected candidate without touching the placement.
    pub(crate) fn record_rejection(&mut self, square: Square) {
        self.last_attempt = Some(Attempt {
            square,
            kind: AttemptKind::Rejected,
        });
        self.valid = false;
    }

    /// Removes the deepest placement and records the backtrack.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if there is nothing to remove.
    pub(crate) fn unplace(&mut self) -> Square {
        debug_assert!(
            !self.placements.is_empty(),
            "called `PlacementState::unplace` with no placements"
        );
        let square = self.placements.pop().expect("placement trail is empty");
        self.occupied.set(self.board.linear_index(square), false);
        self.last_attempt = Some(Attempt {
            square,
            kind: AttemptKind::Backtracked,
        });
        self.valid = true;
        square
    }

    /// Clears the attempt marker, used for the terminal exhausted step.
    pub(crate) fn clear_attempt(&mut self) {
        self.last_attempt = None;
        self.valid = true;
    }
}

impl std::fmt::Display for PlacementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlacementState(depth: {}", self.placements.len())?;
        if let Some(attempt) = self.last_attempt {
            write!(f, ", last: {}", attempt)?;
        }
        write!(f, ")")
    }
}

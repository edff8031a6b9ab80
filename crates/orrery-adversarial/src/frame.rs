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

//! The suspended-call representation of the game-tree search.
//!
//! A `SearchFrame` is what a recursive minimax implementation would keep
//! on the call stack: the position, whose turn it is, the untried moves,
//! the alpha/beta window inherited from the parent, and the best value
//! and move seen so far. Held as data, the whole search becomes
//! suspendable between any two frame operations.

use num_traits::{PrimInt, Signed};
use orrery_model::tictactoe::{CellIndex, Grid, Player};
use smallvec::SmallVec;

/// One suspended node of the minimax search.
#[derive(Clone, Debug)]
pub struct SearchFrame<T> {
    /// The position at this node.
    pub grid: Grid,
    /// The player to move at this node.
    pub to_move: Player,
    /// The move that produced this node, `None` for the root.
    pub produced_by: Option<CellIndex>,
    /// Untried child moves in ascending cell order.
    pub moves: SmallVec<[CellIndex; 9]>,
    /// Index of the next untried move in `moves`.
    pub next_move: usize,
    /// Lower bound inherited from the parent (best the maximizer can
    /// force so far).
    pub alpha: T,
    /// Upper bound inherited from the parent (best the minimizer can
    /// force so far).
    pub beta: T,
    /// Best value seen among resolved children.
    pub best_value: Option<T>,
    /// The child move that produced `best_value`.
    pub best_move: Option<CellIndex>,
    /// Plies left before the depth limit forces a static evaluation.
    pub depth_remaining: u32,
}

impl<T> SearchFrame<T>
where
    T: PrimInt + Signed,
{
    /// Creates a frame for `grid` with the given inherited window.
    pub fn new(
        grid: Grid,
        to_move: Player,
        produced_by: Option<CellIndex>,
        alpha: T,
        beta: T,
        depth_remaining: u32,
    ) -> Self {
        let moves = if depth_remaining == 0 || grid.is_terminal() {
            SmallVec::new()
        } else {
            grid.open_cells()
        };

        Self {
            grid,
            to_move,
            produced_by,
            moves,
            next_move: 0,
            alpha,
            beta,
            best_value: None,
            best_move: None,
            depth_remaining,
        }
    }

    /// Returns true if this frame must be statically evaluated instead
    /// of expanded.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns true if the alpha/beta window is closed and the remaining
    /// children are irrelevant to the parent's decision.
    #[inline]
    pub fn is_cut_off(&self) -> bool {
        self.alpha >= self.beta
    }

    /// Returns true if untried child moves remain.
    #[inline]
    pub fn has_untried_moves(&self) -> bool {
        self.next_move < self.moves.len()
    }

    /// Pops the next untried move.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no untried moves remain.
    #[inline]
    pub fn take_next_move(&mut self) -> CellIndex {
        debug_assert!(
            self.has_untried_moves(),
            "called `SearchFrame::take_next_move` with no untried moves: {} of {} used",
            self.next_move,
            self.moves.len()
        );
        let mv = self.moves[self.next_move];
        self.next_move += 1;
        mv
    }

    /// Folds a resolved child's value into this frame.
    ///
    /// Maximizing frames (the root player to move) raise `alpha`,
    /// minimizing frames lower `beta`. Strict comparisons keep the
    /// earliest-generated move on ties.
    pub fn absorb_child_value(&mut self, child_move: CellIndex, value: T, maximizing: bool) {
        let improved = match self.best_value {
            None => true,
            Some(best) => {
                if maximizing {
                    value > best
                } else {
                    value < best
                }
            }
        };

        if improved {
            self.best_value = Some(value);
            self.best_move = Some(child_move);
        }

        if maximizing {
            self.alpha = self.alpha.max(self.best_value.expect("just set"));
        } else {
            self.beta = self.beta.min(self.best_value.expect("just set"));
        }
    }
}

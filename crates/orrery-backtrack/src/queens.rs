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

//! The N-Queens rule set.
//!
//! One queen per row, filled top to bottom; candidates are the columns of
//! the next unfilled row, left to right. A candidate is rejected when an
//! already placed queen attacks it.

use crate::{rules::PlacementRules, state::PlacementState};
use orrery_model::board::{Board, Square};

/// Rule set placing `n` non-attacking queens on an `n x n` board.
#[derive(Clone, Copy, Debug)]
pub struct QueensRules {
    board: Board,
}

impl QueensRules {
    /// Creates the rule set for an `n x n` board.
    ///
    /// Size validation against the supported minimum (4) happens at
    /// controller level; the rule set itself only needs a non-empty
    /// board.
    #[inline]
    pub fn new(board_size: usize) -> Self {
        Self {
            board: Board::new(board_size),
        }
    }
}

impl PlacementRules for QueensRules {
    fn name(&self) -> &str {
        "QueensRules"
    }

    fn board(&self) -> Board {
        self.board
    }

    fn num_decisions(&self) -> usize {
        self.board.size()
    }

    fn candidates(&self, state: &PlacementState, out: &mut Vec<Square>) {
        let row = state.num_placements();
        debug_assert!(
            row < self.board.size(),
            "called `QueensRules::candidates` with a full placement: the board size is {} but {} queens are placed",
            self.board.size(),
            state.num_placements()
        );
        for col in 0..self.board.size() {
            out.push(Square::at(row, col));
        }
    }

    fn violates(&self, state: &PlacementState, square: Square) -> bool {
        state
            .placements()
            .iter()
            .any(|&placed| self.board.queens_attack(placed, square))
    }
}

impl std::fmt::Display for QueensRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "QueensRules({}x{})", self.board.size(), self.board.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AttemptKind;

    #[test]
    fn test_candidates_are_next_row_ascending() {
        let rules = QueensRules::new(4);
        let mut state = PlacementState::new(rules.board());
        let mut out = Vec::new();

        rules.candidates(&state, &mut out);
        assert_eq!(
            out,
            vec![
                Square::at(0, 0),
                Square::at(0, 1),
                Square::at(0, 2),
                Square::at(0, 3)
            ]
        );

        state
            .place(Square::at(0, 1), AttemptKind::Accepted)
            .unwrap();
        out.clear();
        rules.candidates(&state, &mut out);
        assert!(out.iter().all(|s| s.row().get() == 1));
    }

    #[test]
    fn test_violations_cover_column_and_diagonals() {
        let rules = QueensRules::new(4);
        let mut state = PlacementState::new(rules.board());
        state
            .place(Square::at(0, 1), AttemptKind::Accepted)
            .unwrap();

        assert!(rules.violates(&state, Square::at(1, 1)), "same column");
        assert!(rules.violates(&state, Square::at(1, 0)), "diagonal");
        assert!(rules.violates(&state, Square::at(1, 2)), "diagonal");
        assert!(!rules.violates(&state, Square::at(1, 3)));
    }

    #[test]
    fn test_solution_count_matches_board_size() {
        let rules = QueensRules::new(6);
        assert_eq!(rules.num_decisions(), 6);
    }
}

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

//! The Knight's Tour rule set.
//!
//! The knight must visit every square exactly once, starting from a fixed
//! square. Candidate ordering is Warnsdorff's heuristic: moves with the
//! fewest onward continuations to unvisited squares come first, ties
//! broken by the fixed knight-offset order. The heuristic only reorders
//! candidates; completeness of the backtracking search is untouched, and
//! the ordering is fully deterministic for a given board and start.

use crate::{rules::PlacementRules, state::PlacementState};
use orrery_model::board::{Board, Square};
use smallvec::SmallVec;

/// Rule set for a knight visiting every square of the board once.
#[derive(Clone, Copy, Debug)]
pub struct KnightsTourRules {
    board: Board,
    start: Square,
}

impl KnightsTourRules {
    /// Creates the rule set for an `n x n` board with the given start
    /// square.
    ///
    /// # Panics
    ///
    /// Panics if the start square is off the board.
    #[inline]
    pub fn new(board_size: usize, start: Square) -> Self {
        let board = Board::new(board_size);
        assert!(
            board.contains(start),
            "called `KnightsTourRules::new` with start square off the board: size is {} but start is {}",
            board_size,
            start
        );
        Self { board, start }
    }

    /// Returns the fixed start square.
    #[inline(always)]
    pub fn start(&self) -> Square {
        self.start
    }

    /// Counts the onward moves from `square` to unvisited squares,
    /// the Warnsdorff degree.
    fn onward_degree(&self, state: &PlacementState, square: Square) -> usize {
        self.board
            .knight_moves(square)
            .iter()
            .filter(|&&m| !state.is_occupied(m))
            .count()
    }
}

impl PlacementRules for KnightsTourRules {
    fn name(&self) -> &str {
        "KnightsTourRules"
    }

    fn board(&self) -> Board {
        self.board
    }

    fn num_decisions(&self) -> usize {
        self.board.num_squares()
    }

    fn candidates(&self, state: &PlacementState, out: &mut Vec<Square>) {
        let from = match state.last_placement() {
            Some(square) => square,
            None => {
                // The first decision is forced to the start square.
                out.push(self.start);
                return;
            }
        };

        // Stable-sort by Warnsdorff degree; ties keep the fixed offset
        // order, which is what makes the search reproducible.
        let mut ranked: SmallVec<[(usize, Square); 8]> = self
            .board
            .knight_moves(from)
            .into_iter()
            .map(|m| (self.onward_degree(state, m), m))
            .collect();
        ranked.sort_by_key(|&(degree, _)| degree);

        out.extend(ranked.into_iter().map(|(_, m)| m));
    }

    fn violates(&self, state: &PlacementState, square: Square) -> bool {
        state.is_occupied(square)
    }
}

impl std::fmt::Display for KnightsTourRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KnightsTourRules({}x{}, start: {})",
            self.board.size(),
            self.board.size(),
            self.start
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AttemptKind;

    #[test]
    fn test_first_candidate_is_the_start_square() {
        let rules = KnightsTourRules::new(5, Square::at(0, 0));
        let state = PlacementState::new(rules.board());
        let mut out = Vec::new();
        rules.candidates(&state, &mut out);
        assert_eq!(out, vec![Square::at(0, 0)]);
    }

    #[test]
    fn test_candidates_come_from_the_last_placement() {
        let rules = KnightsTourRules::new(5, Square::at(0, 0));
        let mut state = PlacementState::new(rules.board());
        state
            .place(Square::at(0, 0), AttemptKind::Accepted)
            .unwrap();

        let mut out = Vec::new();
        rules.candidates(&state, &mut out);
        assert_eq!(out.len(), 2);
        for candidate in &out {
            assert!(rules
                .board()
                .knight_moves(Square::at(0, 0))
                .contains(candidate));
        }
    }

    #[test]
    fn test_warnsdorff_prefers_low_degree_moves() {
        let rules = KnightsTourRules::new(5, Square::at(0, 0));
        let mut state = PlacementState::new(rules.board());
        state
            .place(Square::at(0, 0), AttemptKind::Accepted)
            .unwrap();

        let mut out = Vec::new();
        rules.candidates(&state, &mut out);
        let degrees: Vec<usize> = out
            .iter()
            .map(|&m| rules.onward_degree(&state, m))
            .collect();
        let mut sorted = degrees.clone();
        sorted.sort_unstable();
        assert_eq!(degrees, sorted, "candidates must be degree-ascending");
    }

    #[test]
    fn test_visited_squares_violate() {
        let rules = KnightsTourRules::new(5, Square::at(0, 0));
        let mut state = PlacementState::new(rules.board());
        state
            .place(Square::at(0, 0), AttemptKind::Accepted)
            .unwrap();
        assert!(rules.violates(&state, Square::at(0, 0)));
        assert!(!rules.violates(&state, Square::at(1, 2)));
    }

    #[test]
    #[should_panic(expected = "start square off the board")]
    fn test_off_board_start_panics() {
        let _ = KnightsTourRules::new(5, Square::at(5, 0));
    }
}

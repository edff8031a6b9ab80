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

use crate::state::PlacementState;
use orrery_model::board::{Board, Square};

/// A constraint-satisfaction rule set driven by the backtracking solver.
///
/// The rule set decides what the search tree looks like; the solver only
/// executes it. Keeping the two apart lets one engine run N-Queens and
/// Knight's Tour (and any future placement puzzle) unchanged.
///
/// Determinism contract: `candidates` must produce the same ordering for
/// the same state on every call. The solver attempts candidates in
/// exactly the produced order.
pub trait PlacementRules {
    /// Returns the name of the rule set.
    fn name(&self) -> &str;

    /// Returns the board the rule set plays on.
    fn board(&self) -> Board;

    /// Returns the number of placements that make a full solution.
    fn num_decisions(&self) -> usize;

    /// Collects the candidate extensions of `state`, first-to-try first.
    ///
    /// Candidates may violate constraints; the solver checks each with
    /// `violates` when it is attempted and emits the rejection, which is
    /// what makes discarded candidates visible to visualization.
    fn candidates(&self, state: &PlacementState, out: &mut Vec<Square>);

    /// Returns true if placing `square` on `state` violates the rule
    /// set's constraints.
    fn violates(&self, state: &PlacementState, square: Square) -> bool;
}

impl std::fmt::Debug for dyn PlacementRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlacementRules({})", self.name())
    }
}

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

//! The unified snapshot handed to controller-level subscribers.

use orrery_adversarial::state::GameTreeState;
use orrery_backtrack::state::PlacementState;
use orrery_hanoi::state::HanoiState;
use orrery_tour::state::TourState;

/// Scores cross the controller boundary as plain `i32`; the adversarial
/// crate itself stays generic over signed integers.
pub type Score = i32;

/// One emitted state, discriminated by solver kind.
#[derive(Clone, PartialEq, Debug)]
pub enum SearchState {
    /// Board-placement engines (N-Queens, Knight's Tour).
    Placement(PlacementState),
    /// Game-tree search (tic-tac-toe minimax).
    GameTree(GameTreeState<Score>),
    /// Tour construction and improvement.
    Tour(TourState),
    /// Tower of Hanoi transfers.
    Hanoi(HanoiState),
}

impl SearchState {
    /// Returns the placement snapshot, if this is a placement state.
    pub fn as_placement(&self) -> Option<&PlacementState> {
        match self {
            SearchState::Placement(state) => Some(state),
            _ => None,
        }
    }

    /// Returns the game-tree snapshot, if this is a game-tree state.
    pub fn as_game_tree(&self) -> Option<&GameTreeState<Score>> {
        match self {
            SearchState::GameTree(state) => Some(state),
            _ => None,
        }
    }

    /// Returns the tour snapshot, if this is a tour state.
    pub fn as_tour(&self) -> Option<&TourState> {
        match self {
            SearchState::Tour(state) => Some(state),
            _ => None,
        }
    }

    /// Returns the hanoi snapshot, if this is a hanoi state.
    pub fn as_hanoi(&self) -> Option<&HanoiState> {
        match self {
            SearchState::Hanoi(state) => Some(state),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchState::Placement(state) => write!(f, "{}", state),
            SearchState::GameTree(state) => write!(f, "{}", state),
            SearchState::Tour(state) => write!(f, "{}", state),
            SearchState::Hanoi(state) => write!(f, "{}", state),
        }
    }
}

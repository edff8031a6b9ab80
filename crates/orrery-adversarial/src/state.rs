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

//! The game-tree snapshot emitted after every adversarial search step.

use orrery_model::tictactoe::{CellIndex, Grid, Player};

/// What the last step did in the tree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeEvent {
    /// A child node was created from its parent's next untried move.
    Expanded,
    /// A leaf (terminal position or depth limit) was statically
    /// evaluated.
    Evaluated,
    /// A fully explored node's value was propagated to its parent.
    Propagated,
    /// A node stopped generating children because its bounds made the
    /// rest of the subtree irrelevant; its value was propagated.
    Pruned,
}

impl std::fmt::Display for NodeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeEvent::Expanded => write!(f, "Expanded"),
            NodeEvent::Evaluated => write!(f, "Evaluated"),
            NodeEvent::Propagated => write!(f, "Propagated"),
            NodeEvent::Pruned => write!(f, "Pruned"),
        }
    }
}

/// One node of the game tree as the search saw it.
///
/// Produced only by the solver; every snapshot is its parent position
/// plus exactly one move. `score` stays `None` until the node has been
/// evaluated or resolved; `best_move` is the best child found so far.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameTreeState<T> {
    grid: Grid,
    to_move: Player,
    produced_by: Option<CellIndex>,
    score: Option<T>,
    best_move: Option<CellIndex>,
    event: NodeEvent,
    depth: usize,
}

impl<T> GameTreeState<T>
where
    T: Copy,
{
    pub(crate) fn new(
        grid: Grid,
        to_move: Player,
        produced_by: Option<CellIndex>,
        score: Option<T>,
        best_move: Option<CellIndex>,
        event: NodeEvent,
        depth: usize,
    ) -> Self {
        Self {
            grid,
            to_move,
            produced_by,
            score,
            best_move,
            event,
            depth,
        }
    }

    /// Returns the position at this node.
    #[inline(always)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the player to move at this node.
    #[inline(always)]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the move that produced this node, `None` for the root.
    #[inline(always)]
    pub fn produced_by(&self) -> Option<CellIndex> {
        self.produced_by
    }

    /// Returns the static or propagated score, once computed.
    #[inline(always)]
    pub fn score(&self) -> Option<T> {
        self.score
    }

    /// Returns the best move found so far at this node.
    #[inline(always)]
    pub fn best_move(&self) -> Option<CellIndex> {
        self.best_move
    }

    /// Returns the event that produced this snapshot.
    #[inline(always)]
    pub fn event(&self) -> NodeEvent {
        self.event
    }

    /// Returns the node's depth in the tree (root is 0).
    #[inline(always)]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<T> std::fmt::Display for GameTreeState<T>
where
    T: std::fmt::Display + Copy,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GameTreeState({}, depth: {}, to_move: {}",
            self.event, self.depth, self.to_move
        )?;
        if let Some(score) = self.score {
            write!(f, ", score: {}", score)?;
        }
        if let Some(best) = self.best_move {
            write!(f, ", best: {}", best)?;
        }
        write!(f, ")")
    }
}

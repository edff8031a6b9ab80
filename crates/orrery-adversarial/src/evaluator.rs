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

//! Static evaluation strategies.
//!
//! The solver is agnostic to the specific heuristic: it hands a position
//! and a perspective to whatever `Evaluator` it was given and propagates
//! the returned score. Scores are generic over signed integers, with
//! `From<i16>` bounding the constants an evaluator may need.

use num_traits::{PrimInt, Signed};
use orrery_model::tictactoe::{Grid, Player};

/// Score assigned to a position already won by the perspective player.
/// Large enough to dominate any heuristic value on a 3x3 grid.
pub const WIN_SCORE: i16 = 100;

/// A pluggable static evaluation function.
///
/// `evaluate` scores `grid` from `perspective`'s point of view: positive
/// is good for the perspective player. Implementations must be pure; the
/// solver may call them in any order and caches nothing.
pub trait Evaluator<T>
where
    T: PrimInt + Signed + From<i16>,
{
    /// Returns the name of the evaluator.
    fn name(&self) -> &str;

    /// Scores `grid` from `perspective`'s point of view.
    fn evaluate(&self, grid: &Grid, perspective: Player) -> T;
}

impl<T> std::fmt::Debug for dyn Evaluator<T>
where
    T: PrimInt + Signed + From<i16>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Evaluator({})", self.name())
    }
}

/// Terminal scoring shared by the stock evaluators: win, loss or nothing.
#[inline]
fn terminal_score<T>(grid: &Grid, perspective: Player) -> Option<T>
where
    T: PrimInt + Signed + From<i16>,
{
    grid.winner().map(|winner| {
        if winner == perspective {
            <T as From<i16>>::from(WIN_SCORE)
        } else {
            -<T as From<i16>>::from(WIN_SCORE)
        }
    })
}

/// The classic open-lines heuristic.
///
/// Terminal positions score `±WIN_SCORE`; everything else scores the
/// difference between the lines still open for the perspective player
/// and those open for the opponent.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineCountEvaluator;

impl LineCountEvaluator {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> Evaluator<T> for LineCountEvaluator
where
    T: PrimInt + Signed + From<i16>,
{
    fn name(&self) -> &str {
        "LineCountEvaluator"
    }

    fn evaluate(&self, grid: &Grid, perspective: Player) -> T {
        if let Some(score) = terminal_score(grid, perspective) {
            return score;
        }
        let own = grid.open_lines(perspective) as i16;
        let theirs = grid.open_lines(perspective.opponent()) as i16;
        <T as From<i16>>::from(own - theirs)
    }
}

/// Pure win/draw/loss scoring with no positional heuristic.
///
/// Useful when the search reaches full depth anyway (tic-tac-toe does)
/// and as the simplest possible reference evaluator in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinDrawLossEvaluator;

impl WinDrawLossEvaluator {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> Evaluator<T> for WinDrawLossEvaluator
where
    T: PrimInt + Signed + From<i16>,
{
    fn name(&self) -> &str {
        "WinDrawLossEvaluator"
    }

    fn evaluate(&self, grid: &Grid, perspective: Player) -> T {
        terminal_score(grid, perspective).unwrap_or_else(T::zero)
    }
}

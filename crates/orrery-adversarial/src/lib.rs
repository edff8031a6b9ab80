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

//! Orrery-Adversarial: stepwise game-tree search
//!
//! Minimax with optional alpha-beta pruning over tic-tac-toe positions,
//! re-architected as an explicit stack of frames so that every node
//! expansion, leaf evaluation and value propagation is one observable
//! `step()`. The usual recursive formulation would have to run to
//! completion inside a single call; the frame stack lets the engine
//! suspend between any two of those events instead.
//!
//! Correctness notes
//! - Pruning is an optimization, not a behavior change: for a fixed
//!   evaluation function and depth limit, the chosen move and root value
//!   are identical with pruning on or off, and the pruned run expands a
//!   subset of the nodes of the unpruned run.
//! - Children are generated in ascending cell order, and value updates
//!   use strict comparisons, so ties in evaluation favour the earliest
//!   generated move.
//! - The evaluation function is a passed-in strategy (`Evaluator`), not a
//!   subclassing hook.
//!
//! Module map
//! - `solver`: the engine and its frame dispatch.
//! - `frame`: the suspended-call representation.
//! - `evaluator`: the strategy interface plus two stock heuristics.
//! - `state`: the emitted node snapshots.
//! - `stats`: run counters.

pub mod evaluator;
pub mod frame;
pub mod solver;
pub mod state;
pub mod stats;

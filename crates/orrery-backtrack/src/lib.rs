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

//! Orrery-Backtrack: stepwise constraint search
//!
//! A depth-first search with explicit undo, re-architected so that every
//! accepted, rejected and backtracked placement attempt is one observable
//! `step()`. Instead of language-native recursion the engine keeps a
//! frame-structured candidate stack inside its run record, which lets it
//! suspend and resume mid-search without unwinding a call stack.
//!
//! Core flow
//! - Pick a rule set (`QueensRules`, `KnightsTourRules`) implementing
//!   `PlacementRules`: it names the board, how many placements make a
//!   solution, the candidate ordering, and the constraint check.
//! - Drive a `BacktrackingSolver` through the `StepwiseEngine` trait.
//!
//! Determinism: candidates are always attempted in the order the rule set
//! produces them, so two runs with identical parameters emit identical
//! state sequences.
//!
//! Module map
//! - `solver`: the engine and its step dispatch.
//! - `stack`: the frame-structured candidate stack.
//! - `state`: the emitted placement snapshots.
//! - `rules`, `queens`, `knights`: the rule sets.
//! - `stats`: run counters.

pub mod knights;
pub mod queens;
pub mod rules;
pub mod solver;
pub mod stack;
pub mod state;
pub mod stats;

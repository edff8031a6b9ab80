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

//! Orrery-Tour: a stepwise traveling-salesman heuristic
//!
//! Two phases, both observable one step at a time:
//!
//! - Construction: nearest-unvisited-city greedy extension from a fixed
//!   start city, one city appended per `step()`.
//! - Improvement: 2-opt pairwise edge exchange; each `step()` examines
//!   one candidate pair in deterministic nested ascending order and
//!   applies the exchange iff it strictly decreases total length.
//!
//! The run terminates `Exhausted` once a full scan over all pairs yields
//! no improving exchange (a 2-opt local optimum) or a configured scan cap
//! is hit. The solver guarantees local-search convergence, not global
//! optimality.

pub mod solver;
pub mod state;
pub mod stats;

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

//! Orrery-Engine: the stepwise search abstraction
//!
//! Every orrery game engine runs a classical search or optimization
//! procedure one observable step at a time. This crate holds the pieces
//! they all share, and nothing algorithm-specific:
//!
//! - `status`: the `RunStatus` state machine and the `RunControl` record
//!   that enforces its transitions.
//! - `error`: the `EngineError` taxonomy (`InvalidParameters`,
//!   `InvalidRunState`, `StepBudgetExceeded`, `InvariantViolation`).
//! - `emitter`: the `StepEmitter` observer interface with no-op,
//!   composite and recording implementations.
//! - `log`: a progress-table emitter for terminal runs.
//! - `engine`: the `StepwiseEngine` capability trait with the default
//!   budget-bounded `run_to_completion` loop.
//!
//! Design highlights
//! - Cooperative single-stepping: the external caller owns the cadence;
//!   engines never block and never spawn background work.
//! - Emission is side-effect-bounded: engines must not depend on what an
//!   emitter does with a state, and the state that becomes the final
//!   solution is always emitted.
//! - Pausing takes effect only at step boundaries; resuming restores the
//!   suspended run exactly, with no recomputation.

pub mod emitter;
pub mod engine;
pub mod error;
pub mod log;
pub mod status;

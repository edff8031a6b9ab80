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

//! The `StepwiseEngine` capability trait.
//!
//! Every concrete engine (backtracking placement, adversarial tree
//! search, heuristic tour construction, disk transfer) implements this
//! trait as an independent type; there is no inheritance hierarchy and
//! no shared base struct beyond the embedded `RunControl`.

use crate::{emitter::StepEmitter, error::EngineError, status::RunStatus};

/// A suspendable, inspectable search engine.
///
/// One engine instance owns exactly one run record at a time. The caller
/// owns the cadence: `step()` performs exactly one indivisible unit of
/// algorithmic work (one placement attempt, one node expansion, one
/// candidate improvement) and can be called repeatedly to single-step
/// through the algorithm. Lifecycle rules (enforced by `RunControl`):
///
/// - `step()` on `Ready` starts the run; on `Paused` or a terminal
///   status it fails with `InvalidRunState` and leaves the engine
///   untouched.
/// - `pause()` is valid only while `Running`; it takes effect at the
///   step boundary the engine is already standing on, never mid-step.
/// - `resume()` is valid only while `Paused` and restores execution
///   from the exact suspended state with no recomputation.
/// - `cancel()` discards the run from any status and is idempotent.
/// - `reset()` returns the engine to `Ready` with its original input.
pub trait StepwiseEngine {
    /// The state snapshot type emitted after every step.
    type State;
    /// The statistics record accumulated over the run.
    type Statistics: std::fmt::Display;

    /// Returns the name of the engine.
    fn name(&self) -> &str;

    /// Returns the current run status without advancing.
    fn status(&self) -> RunStatus;

    /// Returns the latest state snapshot without advancing.
    fn current_state(&self) -> &Self::State;

    /// Returns the number of steps taken in the current run.
    fn steps_taken(&self) -> u64;

    /// Returns the statistics of the current run.
    fn statistics(&self) -> &Self::Statistics;

    /// Performs exactly one unit of algorithmic work and returns the
    /// resulting status.
    fn step(&mut self) -> Result<RunStatus, EngineError>;

    /// Suspends a running search at the current step boundary.
    fn pause(&mut self) -> Result<RunStatus, EngineError>;

    /// Resumes a paused search.
    fn resume(&mut self) -> Result<RunStatus, EngineError>;

    /// Discards the run record. Idempotent; subsequent `step()` calls
    /// fail with `InvalidRunState`.
    fn cancel(&mut self) -> RunStatus;

    /// Returns the engine to `Ready` with the original input, discarding
    /// all progress.
    fn reset(&mut self) -> RunStatus;

    /// Registers a step emitter. Multiple subscribers are allowed; no
    /// ordering guarantee is given between subscribers for the same
    /// emitted state.
    fn subscribe(&mut self, emitter: Box<dyn StepEmitter<Self::State>>);

    /// Calls `step()` until the run terminates or `step_limit` steps
    /// have been taken.
    ///
    /// A paused engine is resumed first, so budget-bounded runs can be
    /// chained. When the budget is hit without termination the engine is
    /// paused (a step boundary) and the call fails with
    /// `StepBudgetExceeded`; the run remains continuable. The budget
    /// bounds worst-case blocking on exponential search spaces.
    fn run_to_completion(&mut self, step_limit: u64) -> Result<RunStatus, EngineError> {
        if self.status() == RunStatus::Paused {
            self.resume()?;
        }
        if self.status().is_terminal() {
            return Err(EngineError::InvalidRunState {
                operation: "run_to_completion",
                status: self.status(),
            });
        }

        let mut taken: u64 = 0;
        while taken < step_limit {
            let status = self.step()?;
            taken += 1;
            if status.is_terminal() {
                return Ok(status);
            }
        }

        if self.status() == RunStatus::Running {
            self.pause()?;
        }
        Err(EngineError::StepBudgetExceeded { limit: step_limit })
    }
}

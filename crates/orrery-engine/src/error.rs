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

//! The engine error taxonomy.
//!
//! All errors are returned synchronously from the call that triggered
//! them; nothing crosses a `step()` boundary silently. Only
//! `InvariantViolation` is fatal to the run (the engine cancels itself
//! before surfacing it); the other variants leave the engine unaffected.

use crate::status::RunStatus;

/// Errors surfaced by engines and the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Construction input was rejected; no engine was created.
    InvalidParameters(String),
    /// The operation is not valid for the current run status; the engine
    /// is unaffected.
    InvalidRunState {
        operation: &'static str,
        status: RunStatus,
    },
    /// `run_to_completion` hit its step budget without terminating; the
    /// run is paused and can be continued manually.
    StepBudgetExceeded { limit: u64 },
    /// A solver produced an inconsistent state. Fatal to the run: the
    /// engine transitions to `Cancelled` and the violation is surfaced
    /// verbatim, never swallowed, since it indicates a solver bug.
    InvariantViolation(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameters(reason) => write!(f, "invalid parameters: {}", reason),
            Self::InvalidRunState { operation, status } => {
                write!(f, "`{}` is not valid while the run is {}", operation, status)
            }
            Self::StepBudgetExceeded { limit } => {
                write!(f, "step budget of {} exceeded without termination", limit)
            }
            Self::InvariantViolation(detail) => {
                write!(f, "internal invariant violated: {}", detail)
            }
        }
    }
}

impl std::error::Error for EngineError {}

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

//! The run status state machine.
//!
//! ```text
//! Ready --step--> Running --terminal condition--> {Solved, Exhausted}
//! Running --pause--> Paused --resume--> Running
//! any --cancel--> Cancelled
//! ```
//!
//! `Solved`, `Exhausted` and `Cancelled` are terminal; only `reset()`
//! exits them. `RunControl` is the shared run-record bookkeeping every
//! engine embeds: it owns the status and the step counter and enforces
//! the transitions above, so the engines cannot disagree on the rules.

use crate::error::EngineError;

/// The status of one engine run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum RunStatus {
    /// The engine holds its original input and has not stepped yet.
    #[default]
    Ready,
    /// At least one step has been taken and the search is in progress.
    Running,
    /// The run is suspended at a step boundary and can be resumed.
    Paused,
    /// The search reached a solution.
    Solved,
    /// The search space is exhausted (or a local optimum was proven).
    Exhausted,
    /// The run record was discarded.
    Cancelled,
}

impl RunStatus {
    /// Returns true if the status is terminal.
    ///
    /// Terminal statuses are only left through `reset()`.
    #[inline(always)]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Solved | RunStatus::Exhausted | RunStatus::Cancelled
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Ready => write!(f, "Ready"),
            RunStatus::Running => write!(f, "Running"),
            RunStatus::Paused => write!(f, "Paused"),
            RunStatus::Solved => write!(f, "Solved"),
            RunStatus::Exhausted => write!(f, "Exhausted"),
            RunStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Shared run-record bookkeeping: status plus step counter.
///
/// Engines embed a `RunControl` and route every lifecycle operation
/// through it; the control rejects operations that are not valid for the
/// current status and counts the steps actually performed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RunControl {
    status: RunStatus,
    steps: u64,
}

impl RunControl {
    /// Creates a control in `Ready` with zero steps.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current status.
    #[inline(always)]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns the number of steps performed so far.
    #[inline(always)]
    pub const fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Validates that a step may begin and moves `Ready` to `Running`.
    ///
    /// Fails with `InvalidRunState` when the run is paused or terminal;
    /// the engine must be left untouched in that case, which is why this
    /// check runs before any algorithmic work.
    #[inline]
    pub fn begin_step(&mut self) -> Result<(), EngineError> {
        match self.status {
            RunStatus::Ready => {
                self.status = RunStatus::Running;
                Ok(())
            }
            RunStatus::Running => Ok(()),
            status => Err(EngineError::InvalidRunState {
                operation: "step",
                status,
            }),
        }
    }

    /// Records one completed step.
    #[inline(always)]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    /// Moves the run into a terminal or intermediate status decided by
    /// the algorithm (e.g. `Solved`, `Exhausted`).
    #[inline(always)]
    pub fn transition(&mut self, status: RunStatus) {
        self.status = status;
    }

    /// Suspends a running search at the current step boundary.
    #[inline]
    pub fn pause(&mut self) -> Result<RunStatus, EngineError> {
        match self.status {
            RunStatus::Running => {
                self.status = RunStatus::Paused;
                Ok(self.status)
            }
            status => Err(EngineError::InvalidRunState {
                operation: "pause",
                status,
            }),
        }
    }

    /// Resumes a paused search exactly where it was suspended.
    #[inline]
    pub fn resume(&mut self) -> Result<RunStatus, EngineError> {
        match self.status {
            RunStatus::Paused => {
                self.status = RunStatus::Running;
                Ok(self.status)
            }
            status => Err(EngineError::InvalidRunState {
                operation: "resume",
                status,
            }),
        }
    }

    /// Cancels the run. Valid from every status and idempotent.
    #[inline]
    pub fn cancel(&mut self) -> RunStatus {
        self.status = RunStatus::Cancelled;
        self.status
    }

    /// Returns the control to `Ready` with zero steps.
    #[inline]
    pub fn reset(&mut self) -> RunStatus {
        self.status = RunStatus::Ready;
        self.steps = 0;
        self.status
    }
}

impl std::fmt::Display for RunControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RunControl(status: {}, steps: {})", self.status, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_control_is_ready() {
        let c = RunControl::new();
        assert_eq!(c.status(), RunStatus::Ready);
        assert_eq!(c.steps_taken(), 0);
    }

    #[test]
    fn test_begin_step_starts_the_run() {
        let mut c = RunControl::new();
        c.begin_step().unwrap();
        assert_eq!(c.status(), RunStatus::Running);
        c.on_step();
        assert_eq!(c.steps_taken(), 1);
    }

    #[test]
    fn test_step_rejected_when_paused_or_terminal() {
        let mut c = RunControl::new();
        c.begin_step().unwrap();
        c.pause().unwrap();
        assert!(matches!(
            c.begin_step(),
            Err(EngineError::InvalidRunState {
                operation: "step",
                status: RunStatus::Paused
            })
        ));

        c.resume().unwrap();
        c.transition(RunStatus::Solved);
        assert!(matches!(
            c.begin_step(),
            Err(EngineError::InvalidRunState {
                operation: "step",
                status: RunStatus::Solved
            })
        ));
    }

    #[test]
    fn test_pause_resume_round_trip() {
        let mut c = RunControl::new();
        assert!(c.pause().is_err(), "pause before the first step is invalid");
        c.begin_step().unwrap();
        assert_eq!(c.pause().unwrap(), RunStatus::Paused);
        assert!(c.pause().is_err(), "pause is not idempotent");
        assert_eq!(c.resume().unwrap(), RunStatus::Running);
        assert!(c.resume().is_err(), "resume on a running engine is invalid");
    }

    #[test]
    fn test_cancel_from_every_status_is_terminal_and_idempotent() {
        let preparations: [fn(&mut RunControl); 5] = [
            |_c| {},
            |c| {
                c.begin_step().unwrap();
            },
            |c| {
                c.begin_step().unwrap();
                c.pause().unwrap();
            },
            |c| {
                c.begin_step().unwrap();
                c.transition(RunStatus::Solved);
            },
            |c| {
                c.begin_step().unwrap();
                c.transition(RunStatus::Exhausted);
            },
        ];
        for prepare in preparations {
            let mut c = RunControl::new();
            prepare(&mut c);
            assert_eq!(c.cancel(), RunStatus::Cancelled);
            assert_eq!(c.cancel(), RunStatus::Cancelled);
            assert!(c.status().is_terminal());
        }
    }

    #[test]
    fn test_reset_exits_terminal_statuses() {
        let mut c = RunControl::new();
        c.begin_step().unwrap();
        c.on_step();
        c.cancel();
        assert_eq!(c.reset(), RunStatus::Ready);
        assert_eq!(c.steps_taken(), 0);
        c.begin_step().unwrap();
        assert_eq!(c.status(), RunStatus::Running);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!RunStatus::Ready.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
        assert!(!RunStatus::Paused.is_terminal());
        assert!(RunStatus::Solved.is_terminal());
        assert!(RunStatus::Exhausted.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
    }
}

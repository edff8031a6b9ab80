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

//! The stepwise Tower of Hanoi engine.

use crate::state::{HanoiState, Peg};
use orrery_engine::{
    emitter::{CompositeStepEmitter, StepEmitter},
    engine::StepwiseEngine,
    error::EngineError,
    status::{RunControl, RunStatus},
};

/// One suspended task of the recursive decomposition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum TaskFrame {
    /// Move `count` disks from `from` to `to`.
    Transfer { count: u8, from: Peg, to: Peg },
    /// Move a single top disk from `from` to `to`.
    MoveDisk { from: Peg, to: Peg },
}

/// Statistics collected during one Tower of Hanoi run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HanoiStatistics {
    /// Transfer frames expanded into sub-tasks.
    pub expansions: u64,
    /// Disk moves performed.
    pub disk_moves: u64,
    /// The deepest task stack reached.
    pub max_frame_depth: u64,
}

impl HanoiStatistics {
    #[inline]
    pub fn on_expansion(&mut self) {
        self.expansions = self.expansions.saturating_add(1);
    }

    #[inline]
    pub fn on_disk_move(&mut self) {
        self.disk_moves = self.disk_moves.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_frame_depth = self.max_frame_depth.max(depth);
    }
}

impl std::fmt::Display for HanoiStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tower of Hanoi Statistics:")?;
        writeln!(f, "  Expansions:      {}", self.expansions)?;
        writeln!(f, "  Disk moves:      {}", self.disk_moves)?;
        writeln!(f, "  Max frame depth: {}", self.max_frame_depth)?;
        Ok(())
    }
}

/// A stepwise Tower of Hanoi solver.
///
/// The run record is a stack of `TaskFrame`s seeded with one transfer of
/// all disks. Each `step()` pops the top frame and either expands a
/// transfer into `Transfer(n-1) / MoveDisk / Transfer(n-1)` or performs
/// the single disk move. The stack running empty is the terminal
/// condition: `Solved` after exactly `2^n - 1` disk moves.
pub struct HanoiSolver {
    num_disks: u8,
    source: Peg,
    target: Peg,
    control: RunControl,
    state: HanoiState,
    tasks: Vec<TaskFrame>,
    stats: HanoiStatistics,
    emitters: CompositeStepEmitter<HanoiState>,
    initialized: bool,
}

impl HanoiSolver {
    /// Creates a solver in `Ready` moving `num_disks` disks from
    /// `source` to `target`.
    ///
    /// # Panics
    ///
    /// Panics if `num_disks` is zero or `source == target`; the
    /// controller validates both beforehand.
    pub fn new(num_disks: u8, source: Peg, target: Peg) -> Self {
        assert!(
            num_disks > 0,
            "called `HanoiSolver::new` with zero disks"
        );
        assert!(
            source != target,
            "called `HanoiSolver::new` with identical source and target peg {}",
            source
        );

        Self {
            num_disks,
            source,
            target,
            control: RunControl::new(),
            state: HanoiState::new(num_disks, source),
            tasks: Vec::with_capacity(2 * num_disks as usize + 1),
            stats: HanoiStatistics::default(),
            emitters: CompositeStepEmitter::new(),
            initialized: false,
        }
    }

    /// Returns the number of disks.
    #[inline(always)]
    pub fn num_disks(&self) -> u8 {
        self.num_disks
    }

    fn initialize(&mut self) {
        self.tasks.push(TaskFrame::Transfer {
            count: self.num_disks,
            from: self.source,
            to: self.target,
        });
        self.initialized = true;
    }

    fn emit(&mut self) {
        self.emitters.emit(&self.state, self.control.status());
    }
}

impl StepwiseEngine for HanoiSolver {
    type State = HanoiState;
    type Statistics = HanoiStatistics;

    fn name(&self) -> &str {
        "HanoiSolver"
    }

    fn status(&self) -> RunStatus {
        self.control.status()
    }

    fn current_state(&self) -> &HanoiState {
        &self.state
    }

    fn steps_taken(&self) -> u64 {
        self.control.steps_taken()
    }

    fn statistics(&self) -> &HanoiStatistics {
        &self.stats
    }

    fn step(&mut self) -> Result<RunStatus, EngineError> {
        self.control.begin_step()?;
        if !self.initialized {
            self.initialize();
        }

        let task = match self.tasks.pop() {
            Some(task) => task,
            None => {
                self.control.cancel();
                return Err(EngineError::InvariantViolation(
                    "task stack ran dry before the run was solved".into(),
                ));
            }
        };

        match task {
            TaskFrame::Transfer { count: 1, from, to }
            | TaskFrame::MoveDisk { from, to } => {
                if let Err(detail) = self.state.apply_move(from, to) {
                    self.control.cancel();
                    return Err(EngineError::InvariantViolation(detail));
                }
                self.stats.on_disk_move();
                if self.tasks.is_empty() {
                    self.control.transition(RunStatus::Solved);
                }
            }
            TaskFrame::Transfer { count, from, to } => {
                let via = Peg::other(from, to);
                // Pushed in reverse so the first sub-task runs first.
                self.tasks.push(TaskFrame::Transfer {
                    count: count - 1,
                    from: via,
                    to,
                });
                self.tasks.push(TaskFrame::MoveDisk { from, to });
                self.tasks.push(TaskFrame::Transfer {
                    count: count - 1,
                    from,
                    to: via,
                });
                self.state.record_expansion(count);
                self.stats.on_expansion();
                self.stats.on_depth_update(self.tasks.len() as u64);
            }
        }

        self.control.on_step();
        self.emit();
        Ok(self.control.status())
    }

    fn pause(&mut self) -> Result<RunStatus, EngineError> {
        self.control.pause()
    }

    fn resume(&mut self) -> Result<RunStatus, EngineError> {
        self.control.resume()
    }

    fn cancel(&mut self) -> RunStatus {
        self.control.cancel()
    }

    fn reset(&mut self) -> RunStatus {
        self.state = HanoiState::new(self.num_disks, self.source);
        self.tasks.clear();
        self.stats = HanoiStatistics::default();
        self.initialized = false;
        self.control.reset()
    }

    fn subscribe(&mut self, emitter: Box<dyn StepEmitter<HanoiState>>) {
        self.emitters.add_emitter_boxed(emitter);
    }
}

impl std::fmt::Debug for HanoiSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HanoiSolver")
            .field("num_disks", &self.num_disks)
            .field("control", &self.control)
            .field("state", &self.state)
            .field("tasks", &self.tasks.len())
            .field("stats", &self.stats)
            .finish()
    }
}

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

//! The stepwise backtracking engine.
//!
//! Depth-first search with explicit undo. One `step()` is exactly one of:
//! attempting the next untried candidate at the current depth (accepted
//! or rejected), backtracking one level after the candidates ran out, or
//! concluding the run. The recursion depth lives in the frame-structured
//! `CandidateStack`, so the search suspends and resumes between any two
//! steps with no recomputation.

use crate::{
    rules::PlacementRules,
    stack::CandidateStack,
    state::{AttemptKind, PlacementState},
    stats::BacktrackStatistics,
};
use orrery_engine::{
    emitter::{CompositeStepEmitter, StepEmitter},
    engine::StepwiseEngine,
    error::EngineError,
    status::{RunControl, RunStatus},
};
use orrery_model::board::Square;

/// Whether the search stops at the first solution or explores the whole
/// tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchMode {
    /// Terminate `Solved` at the first full consistent placement.
    #[default]
    FirstSolution,
    /// Record every solution and keep searching until the tree is
    /// exhausted; terminates `Exhausted`.
    Exhaustive,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::FirstSolution => write!(f, "FirstSolution"),
            SearchMode::Exhaustive => write!(f, "Exhaustive"),
        }
    }
}

/// A stepwise depth-first constraint solver over a `PlacementRules`.
///
/// The run record consists of the current `PlacementState`, the candidate
/// stack (one frame per placement depth), the run control and the
/// statistics. No state is shared across runs: `reset()` rebuilds the
/// record from the rule set alone.
pub struct BacktrackingSolver<R>
where
    R: PlacementRules,
{
    rules: R,
    mode: SearchMode,
    control: RunControl,
    state: PlacementState,
    stack: CandidateStack,
    solutions: Vec<Vec<Square>>,
    stats: BacktrackStatistics,
    emitters: CompositeStepEmitter<PlacementState>,
    scratch: Vec<Square>,
    initialized: bool,
}

impl<R> BacktrackingSolver<R>
where
    R: PlacementRules,
{
    /// Creates a solver in `Ready` for the given rule set and mode.
    pub fn new(rules: R, mode: SearchMode) -> Self {
        let state = PlacementState::new(rules.board());
        let stack = CandidateStack::preallocated(
            rules.num_decisions(),
            rules.board().size(),
        );
        Self {
            rules,
            mode,
            control: RunControl::new(),
            state,
            stack,
            solutions: Vec::new(),
            stats: BacktrackStatistics::default(),
            emitters: CompositeStepEmitter::new(),
            scratch: Vec::new(),
            initialized: false,
        }
    }

    /// Returns the rule set driving this solver.
    #[inline(always)]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Returns the search mode.
    #[inline(always)]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Returns every full solution recorded so far, in discovery order.
    #[inline(always)]
    pub fn solutions(&self) -> &[Vec<Square>] {
        &self.solutions
    }

    /// Pushes the root frame and the first candidates.
    fn initialize(&mut self) {
        self.stack.push_frame();
        self.enqueue_candidates();
        self.initialized = true;
    }

    /// Generates the candidates for the current state and pushes them in
    /// reverse, so the LIFO pop attempts them in exactly the order the
    /// rule set produced.
    fn enqueue_candidates(&mut self) {
        self.scratch.clear();
        self.rules.candidates(&self.state, &mut self.scratch);
        while let Some(candidate) = self.scratch.pop() {
            self.stack.push(candidate);
        }
    }

    fn emit(&mut self) {
        self.emitters.emit(&self.state, self.control.status());
    }

    /// Attempts the next candidate at the current depth.
    fn attempt_candidate(&mut self, candidate: Square) -> Result<(), EngineError> {
        if self.rules.violates(&self.state, candidate) {
            self.state.record_rejection(candidate);
            self.stats.on_rejected();
            return Ok(());
        }

        let completes = self.state.num_placements() + 1 == self.rules.num_decisions();
        let kind = if completes {
            AttemptKind::Solution
        } else {
            AttemptKind::Accepted
        };

        if let Err(detail) = self.state.place(candidate, kind) {
            // A candidate the rule set did not reject collided with the
            // occupancy set: a rule-set bug. Fatal to the run.
            self.control.cancel();
            return Err(EngineError::InvariantViolation(detail));
        }

        self.stats.on_accepted();
        self.stats.on_depth_update(self.state.num_placements() as u64);

        if completes {
            self.stats.on_solution_found();
            self.solutions.push(self.state.placements().to_vec());
            match self.mode {
                SearchMode::FirstSolution => self.control.transition(RunStatus::Solved),
                // An empty frame makes the next step backtrack through
                // this leaf and continue with the remaining candidates.
                SearchMode::Exhaustive => self.stack.push_frame(),
            }
        } else {
            self.stack.push_frame();
            self.enqueue_candidates();
        }

        Ok(())
    }

    /// Abandons the current level: pops its frame and removes the
    /// placement that opened it. When the root level itself runs dry the
    /// tree is exhausted.
    fn backtrack_or_exhaust(&mut self) {
        if self.stack.depth() <= 1 {
            self.state.clear_attempt();
            self.control.transition(RunStatus::Exhausted);
            return;
        }

        self.stack.pop_frame();
        self.state.unplace();
        self.stats.on_backtrack();
    }
}

impl<R> StepwiseEngine for BacktrackingSolver<R>
where
    R: PlacementRules,
{
    type State = PlacementState;
    type Statistics = BacktrackStatistics;

    fn name(&self) -> &str {
        "BacktrackingSolver"
    }

    fn status(&self) -> RunStatus {
        self.control.status()
    }

    fn current_state(&self) -> &PlacementState {
        &self.state
    }

    fn steps_taken(&self) -> u64 {
        self.control.steps_taken()
    }

    fn statistics(&self) -> &BacktrackStatistics {
        &self.stats
    }

    fn step(&mut self) -> Result<RunStatus, EngineError> {
        self.control.begin_step()?;
        if !self.initialized {
            self.initialize();
        }

        debug_assert!(
            self.stack.depth() == self.state.num_placements() + 1,
            "called `BacktrackingSolver::step` with inconsistent run record: stack depth is {} but {} placements are applied",
            self.stack.depth(),
            self.state.num_placements()
        );

        match self.stack.pop() {
            Some(candidate) => self.attempt_candidate(candidate)?,
            None => self.backtrack_or_exhaust(),
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
        self.state = PlacementState::new(self.rules.board());
        self.stack.reset();
        self.solutions.clear();
        self.stats = BacktrackStatistics::default();
        self.initialized = false;
        self.control.reset()
    }

    fn subscribe(&mut self, emitter: Box<dyn StepEmitter<PlacementState>>) {
        self.emitters.add_emitter_boxed(emitter);
    }
}

impl<R> std::fmt::Debug for BacktrackingSolver<R>
where
    R: PlacementRules,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacktrackingSolver")
            .field("rules", &self.rules.name())
            .field("mode", &self.mode)
            .field("control", &self.control)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{knights::KnightsTourRules, queens::QueensRules};
    use orrery_engine::emitter::RecordingStepEmitter;
    use proptest::prelude::*;

    fn columns(placements: &[Square]) -> Vec<usize> {
        placements.iter().map(|s| s.col().get()).collect()
    }

    #[test]
    fn test_four_queens_first_solution() {
        let mut solver =
            BacktrackingSolver::new(QueensRules::new(4), SearchMode::FirstSolution);
        let status = solver.run_to_completion(1_000).unwrap();

        assert_eq!(status, RunStatus::Solved);
        assert_eq!(solver.solutions().len(), 1);
        assert_eq!(columns(&solver.solutions()[0]), vec![1, 3, 0, 2]);
        assert_eq!(solver.statistics().solutions_found, 1);
        assert_eq!(solver.statistics().max_depth, 4);
    }

    #[test]
    fn test_four_queens_exhaustive_finds_both_solutions() {
        let mut solver = BacktrackingSolver::new(QueensRules::new(4), SearchMode::Exhaustive);
        let status = solver.run_to_completion(10_000).unwrap();

        assert_eq!(status, RunStatus::Exhausted);
        assert_eq!(solver.solutions().len(), 2);
        assert_eq!(columns(&solver.solutions()[0]), vec![1, 3, 0, 2]);
        assert_eq!(columns(&solver.solutions()[1]), vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_solved_placements_are_non_attacking() {
        for n in 4..=8 {
            let mut solver =
                BacktrackingSolver::new(QueensRules::new(n), SearchMode::FirstSolution);
            let status = solver.run_to_completion(2_000_000).unwrap();
            assert_eq!(status, RunStatus::Solved, "board size {} must solve", n);

            let placements = &solver.solutions()[0];
            assert_eq!(placements.len(), n);
            for (i, &a) in placements.iter().enumerate() {
                for &b in placements.iter().skip(i + 1) {
                    assert!(
                        !solver.rules().board().queens_attack(a, b),
                        "queens {} and {} attack each other on size {}",
                        a,
                        b,
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn test_three_queens_is_exhausted_without_solutions() {
        let mut solver =
            BacktrackingSolver::new(QueensRules::new(3), SearchMode::FirstSolution);
        let status = solver.run_to_completion(1_000).unwrap();
        assert_eq!(status, RunStatus::Exhausted);
        assert!(solver.solutions().is_empty());
        assert_eq!(solver.statistics().solutions_found, 0);
    }

    #[test]
    fn test_every_step_is_emitted_including_the_final_one() {
        let recorder = RecordingStepEmitter::new();
        let mut solver =
            BacktrackingSolver::new(QueensRules::new(4), SearchMode::FirstSolution);
        solver.subscribe(Box::new(recorder.clone()));

        let status = solver.run_to_completion(1_000).unwrap();
        assert_eq!(status, RunStatus::Solved);
        assert_eq!(recorder.num_records() as u64, solver.steps_taken());
        assert_eq!(recorder.last_status(), Some(RunStatus::Solved));
    }

    #[test]
    fn test_identical_runs_emit_identical_sequences() {
        let run = || {
            let recorder = RecordingStepEmitter::new();
            let mut solver =
                BacktrackingSolver::new(QueensRules::new(5), SearchMode::FirstSolution);
            solver.subscribe(Box::new(recorder.clone()));
            solver.run_to_completion(100_000).unwrap();
            recorder.records()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_single_stepping_matches_run_to_completion() {
        let mut stepped =
            BacktrackingSolver::new(QueensRules::new(4), SearchMode::FirstSolution);
        let mut ran = BacktrackingSolver::new(QueensRules::new(4), SearchMode::FirstSolution);

        let ran_status = ran.run_to_completion(1_000).unwrap();
        let mut stepped_status = stepped.status();
        while !stepped_status.is_terminal() {
            stepped_status = stepped.step().unwrap();
        }

        assert_eq!(stepped_status, ran_status);
        assert_eq!(stepped.steps_taken(), ran.steps_taken());
        assert_eq!(stepped.solutions(), ran.solutions());
    }

    #[test]
    fn test_pause_resume_restores_the_exact_run() {
        let mut paused =
            BacktrackingSolver::new(QueensRules::new(6), SearchMode::FirstSolution);
        let mut straight =
            BacktrackingSolver::new(QueensRules::new(6), SearchMode::FirstSolution);

        for _ in 0..25 {
            paused.step().unwrap();
        }
        paused.pause().unwrap();
        assert!(matches!(
            paused.step(),
            Err(EngineError::InvalidRunState {
                operation: "step",
                status: RunStatus::Paused
            })
        ));
        paused.resume().unwrap();

        let status = paused.run_to_completion(1_000_000).unwrap();
        let reference = straight.run_to_completion(1_000_000).unwrap();
        assert_eq!(status, reference);
        assert_eq!(paused.solutions(), straight.solutions());
    }

    #[test]
    fn test_budget_exceeded_pauses_and_stays_continuable() {
        let mut solver =
            BacktrackingSolver::new(QueensRules::new(8), SearchMode::FirstSolution);
        let err = solver.run_to_completion(10).unwrap_err();
        assert_eq!(err, EngineError::StepBudgetExceeded { limit: 10 });
        assert_eq!(solver.status(), RunStatus::Paused);
        assert_eq!(solver.steps_taken(), 10);

        // run_to_completion resumes a paused engine by itself.
        let status = solver.run_to_completion(2_000_000).unwrap();
        assert_eq!(status, RunStatus::Solved);
    }

    #[test]
    fn test_cancel_wins_and_blocks_everything_but_reset() {
        let mut solver =
            BacktrackingSolver::new(QueensRules::new(5), SearchMode::FirstSolution);
        solver.step().unwrap();
        assert_eq!(solver.cancel(), RunStatus::Cancelled);
        assert_eq!(solver.cancel(), RunStatus::Cancelled);

        assert!(solver.step().is_err());
        assert!(solver.pause().is_err());
        assert!(solver.resume().is_err());
        assert!(solver.run_to_completion(10).is_err());

        assert_eq!(solver.reset(), RunStatus::Ready);
        let status = solver.run_to_completion(100_000).unwrap();
        assert_eq!(status, RunStatus::Solved);
    }

    #[test]
    fn test_reset_discards_progress_and_reproduces_the_run() {
        let mut solver =
            BacktrackingSolver::new(QueensRules::new(4), SearchMode::FirstSolution);
        let first = solver.run_to_completion(1_000).unwrap();
        let first_steps = solver.steps_taken();
        assert_eq!(first, RunStatus::Solved);

        solver.reset();
        assert_eq!(solver.status(), RunStatus::Ready);
        assert_eq!(solver.steps_taken(), 0);
        assert!(solver.solutions().is_empty());

        let second = solver.run_to_completion(1_000).unwrap();
        assert_eq!(second, first);
        assert_eq!(solver.steps_taken(), first_steps);
    }

    #[test]
    fn test_knights_tour_small_board_solves() {
        let rules = KnightsTourRules::new(5, Square::at(0, 0));
        let mut solver = BacktrackingSolver::new(rules, SearchMode::FirstSolution);
        let status = solver.run_to_completion(100_000).unwrap();

        assert_eq!(status, RunStatus::Solved);
        let tour = &solver.solutions()[0];
        assert_eq!(tour.len(), 25);
        assert_eq!(tour[0], Square::at(0, 0));

        // Consecutive squares must be a knight's move apart and distinct.
        for window in tour.windows(2) {
            assert!(solver
                .rules()
                .board()
                .knight_moves(window[0])
                .contains(&window[1]));
        }
        let mut sorted = tour.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 25, "tour visited a square twice");
    }

    proptest! {
        #[test]
        fn prop_runs_are_deterministic(n in 4usize..7) {
            let run = || {
                let recorder = RecordingStepEmitter::new();
                let mut solver =
                    BacktrackingSolver::new(QueensRules::new(n), SearchMode::FirstSolution);
                solver.subscribe(Box::new(recorder.clone()));
                solver.run_to_completion(1_000_000).unwrap();
                recorder.records()
            };
            prop_assert_eq!(run(), run());
        }
    }
}

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

//! The controller: one session, one engine, many subscribers.
//!
//! The concrete engines emit their own state types; the controller
//! registers a forwarding emitter with whichever engine it constructs
//! and republishes every emission to its subscribers as the unified
//! `SearchState`. Polymorphism across solver kinds is a closed enum of
//! independent engine types, dispatched by match; there is no
//! inheritance hierarchy to maintain.

use crate::{
    params::{Parameters, SolverKind},
    state::{Score, SearchState},
};
use orrery_adversarial::{evaluator::LineCountEvaluator, solver::AdversarialSolver, state::GameTreeState};
use orrery_backtrack::{
    knights::KnightsTourRules, queens::QueensRules, solver::BacktrackingSolver,
    solver::SearchMode, state::PlacementState,
};
use orrery_engine::{
    emitter::StepEmitter,
    engine::StepwiseEngine,
    error::EngineError,
    status::RunStatus,
};
use orrery_hanoi::{solver::HanoiSolver, state::HanoiState};
use orrery_tour::{solver::HeuristicTourSolver, state::TourState};
use std::{cell::RefCell, rc::Rc};

/// The controller-level subscriber list, shared with the forwarding
/// emitters registered inside the engines.
type SharedSubscribers = Rc<RefCell<Vec<Box<dyn StepEmitter<SearchState>>>>>;

/// Republishes a concrete engine state to the controller subscribers as
/// a unified `SearchState`.
struct ForwardingEmitter<S> {
    shared: SharedSubscribers,
    convert: fn(&S) -> SearchState,
}

impl<S> StepEmitter<S> for ForwardingEmitter<S> {
    fn name(&self) -> &str {
        "ForwardingEmitter"
    }

    fn emit(&mut self, state: &S, status: RunStatus) {
        let unified = (self.convert)(state);
        for subscriber in self.shared.borrow_mut().iter_mut() {
            subscriber.emit(&unified, status);
        }
    }
}

fn forward_placement(state: &PlacementState) -> SearchState {
    SearchState::Placement(state.clone())
}

fn forward_game_tree(state: &GameTreeState<Score>) -> SearchState {
    SearchState::GameTree(*state)
}

fn forward_tour(state: &TourState) -> SearchState {
    SearchState::Tour(state.clone())
}

fn forward_hanoi(state: &HanoiState) -> SearchState {
    SearchState::Hanoi(state.clone())
}

/// The concrete engine a controller owns.
enum EngineInstance {
    Queens(BacktrackingSolver<QueensRules>),
    Knights(BacktrackingSolver<KnightsTourRules>),
    TicTacToe(AdversarialSolver<Score, LineCountEvaluator>),
    Tour(HeuristicTourSolver),
    Hanoi(HanoiSolver),
}

/// One game session: a validated engine plus its subscriber list.
///
/// Owns exactly one engine instance at a time; starting a different
/// session means creating a new controller. All lifecycle operations
/// return the new status together with the latest unified state, so the
/// caller never needs a second round trip.
pub struct Controller {
    kind: SolverKind,
    engine: EngineInstance,
    subscribers: SharedSubscribers,
}

impl Controller {
    /// Validates `params` and returns a new controller in `Ready`.
    ///
    /// Fails with `InvalidParameters` when `kind` does not match the
    /// parameter variant or any value is out of its supported range; no
    /// engine is created in that case.
    pub fn create(kind: SolverKind, params: Parameters) -> Result<Self, EngineError> {
        if params.kind() != kind {
            return Err(EngineError::InvalidParameters(format!(
                "solver kind {} does not match parameters for {}",
                kind,
                params.kind()
            )));
        }
        params.validate()?;

        let subscribers: SharedSubscribers = Rc::new(RefCell::new(Vec::new()));

        let engine = match params {
            Parameters::EightQueens { board_size, mode } => {
                let mut solver = BacktrackingSolver::new(QueensRules::new(board_size), mode);
                solver.subscribe(Box::new(ForwardingEmitter {
                    shared: Rc::clone(&subscribers),
                    convert: forward_placement,
                }));
                EngineInstance::Queens(solver)
            }
            Parameters::KnightsTour { board_size, start } => {
                let mut solver = BacktrackingSolver::new(
                    KnightsTourRules::new(board_size, start),
                    SearchMode::FirstSolution,
                );
                solver.subscribe(Box::new(ForwardingEmitter {
                    shared: Rc::clone(&subscribers),
                    convert: forward_placement,
                }));
                EngineInstance::Knights(solver)
            }
            Parameters::TicTacToe {
                position,
                player,
                depth_limit,
                use_pruning,
            } => {
                let mut solver = AdversarialSolver::new(
                    LineCountEvaluator::new(),
                    position,
                    player,
                    depth_limit,
                    use_pruning,
                );
                solver.subscribe(Box::new(ForwardingEmitter {
                    shared: Rc::clone(&subscribers),
                    convert: forward_game_tree,
                }));
                EngineInstance::TicTacToe(solver)
            }
            Parameters::TravelingSalesman {
                matrix,
                start,
                max_scans,
            } => {
                let mut solver = HeuristicTourSolver::new(matrix, start, max_scans);
                solver.subscribe(Box::new(ForwardingEmitter {
                    shared: Rc::clone(&subscribers),
                    convert: forward_tour,
                }));
                EngineInstance::Tour(solver)
            }
            Parameters::TowerOfHanoi {
                num_disks,
                source,
                target,
            } => {
                let mut solver = HanoiSolver::new(num_disks, source, target);
                solver.subscribe(Box::new(ForwardingEmitter {
                    shared: Rc::clone(&subscribers),
                    convert: forward_hanoi,
                }));
                EngineInstance::Hanoi(solver)
            }
        };

        Ok(Self {
            kind,
            engine,
            subscribers,
        })
    }

    /// Returns the solver kind this controller drives.
    #[inline(always)]
    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    /// Returns the current run status without advancing.
    pub fn status(&self) -> RunStatus {
        match &self.engine {
            EngineInstance::Queens(e) => e.status(),
            EngineInstance::Knights(e) => e.status(),
            EngineInstance::TicTacToe(e) => e.status(),
            EngineInstance::Tour(e) => e.status(),
            EngineInstance::Hanoi(e) => e.status(),
        }
    }

    /// Returns the number of steps taken in the current run.
    pub fn steps_taken(&self) -> u64 {
        match &self.engine {
            EngineInstance::Queens(e) => e.steps_taken(),
            EngineInstance::Knights(e) => e.steps_taken(),
            EngineInstance::TicTacToe(e) => e.steps_taken(),
            EngineInstance::Tour(e) => e.steps_taken(),
            EngineInstance::Hanoi(e) => e.steps_taken(),
        }
    }

    /// Synchronous read of the latest state without advancing.
    pub fn current_state(&self) -> SearchState {
        match &self.engine {
            EngineInstance::Queens(e) => SearchState::Placement(e.current_state().clone()),
            EngineInstance::Knights(e) => SearchState::Placement(e.current_state().clone()),
            EngineInstance::TicTacToe(e) => SearchState::GameTree(*e.current_state()),
            EngineInstance::Tour(e) => SearchState::Tour(e.current_state().clone()),
            EngineInstance::Hanoi(e) => SearchState::Hanoi(e.current_state().clone()),
        }
    }

    /// Renders the run statistics of the owned engine.
    pub fn statistics(&self) -> String {
        match &self.engine {
            EngineInstance::Queens(e) => e.statistics().to_string(),
            EngineInstance::Knights(e) => e.statistics().to_string(),
            EngineInstance::TicTacToe(e) => e.statistics().to_string(),
            EngineInstance::Tour(e) => e.statistics().to_string(),
            EngineInstance::Hanoi(e) => e.statistics().to_string(),
        }
    }

    /// Performs one step and returns the new status with the latest
    /// state.
    pub fn step(&mut self) -> Result<(RunStatus, SearchState), EngineError> {
        let status = match &mut self.engine {
            EngineInstance::Queens(e) => e.step()?,
            EngineInstance::Knights(e) => e.step()?,
            EngineInstance::TicTacToe(e) => e.step()?,
            EngineInstance::Tour(e) => e.step()?,
            EngineInstance::Hanoi(e) => e.step()?,
        };
        Ok((status, self.current_state()))
    }

    /// Steps until the run terminates or `step_limit` is hit.
    pub fn run_to_completion(
        &mut self,
        step_limit: u64,
    ) -> Result<(RunStatus, SearchState), EngineError> {
        let status = match &mut self.engine {
            EngineInstance::Queens(e) => e.run_to_completion(step_limit)?,
            EngineInstance::Knights(e) => e.run_to_completion(step_limit)?,
            EngineInstance::TicTacToe(e) => e.run_to_completion(step_limit)?,
            EngineInstance::Tour(e) => e.run_to_completion(step_limit)?,
            EngineInstance::Hanoi(e) => e.run_to_completion(step_limit)?,
        };
        Ok((status, self.current_state()))
    }

    /// Suspends a running search at the current step boundary.
    pub fn pause(&mut self) -> Result<(RunStatus, SearchState), EngineError> {
        let status = match &mut self.engine {
            EngineInstance::Queens(e) => e.pause()?,
            EngineInstance::Knights(e) => e.pause()?,
            EngineInstance::TicTacToe(e) => e.pause()?,
            EngineInstance::Tour(e) => e.pause()?,
            EngineInstance::Hanoi(e) => e.pause()?,
        };
        Ok((status, self.current_state()))
    }

    /// Resumes a paused search from its exact suspended state.
    pub fn resume(&mut self) -> Result<(RunStatus, SearchState), EngineError> {
        let status = match &mut self.engine {
            EngineInstance::Queens(e) => e.resume()?,
            EngineInstance::Knights(e) => e.resume()?,
            EngineInstance::TicTacToe(e) => e.resume()?,
            EngineInstance::Tour(e) => e.resume()?,
            EngineInstance::Hanoi(e) => e.resume()?,
        };
        Ok((status, self.current_state()))
    }

    /// Discards the run; idempotent.
    pub fn cancel(&mut self) -> RunStatus {
        match &mut self.engine {
            EngineInstance::Queens(e) => e.cancel(),
            EngineInstance::Knights(e) => e.cancel(),
            EngineInstance::TicTacToe(e) => e.cancel(),
            EngineInstance::Tour(e) => e.cancel(),
            EngineInstance::Hanoi(e) => e.cancel(),
        }
    }

    /// Returns the engine to `Ready` with the original input.
    pub fn reset(&mut self) -> RunStatus {
        match &mut self.engine {
            EngineInstance::Queens(e) => e.reset(),
            EngineInstance::Knights(e) => e.reset(),
            EngineInstance::TicTacToe(e) => e.reset(),
            EngineInstance::Tour(e) => e.reset(),
            EngineInstance::Hanoi(e) => e.reset(),
        }
    }

    /// Registers a subscriber for every future emission. Multiple
    /// subscribers are allowed; no ordering guarantee is given between
    /// them for the same emitted state.
    pub fn subscribe(&mut self, emitter: Box<dyn StepEmitter<SearchState>>) {
        self.subscribers.borrow_mut().push(emitter);
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Controller(kind: {}, status: {}, subscribers: {})",
            self.kind,
            self.status(),
            self.subscribers.borrow().len()
        )
    }
}

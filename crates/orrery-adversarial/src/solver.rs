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

//! The stepwise adversarial search engine.
//!
//! Each `step()` performs exactly one frame operation: expand the next
//! untried child of the top frame, statically evaluate a leaf, or resolve
//! a finished frame and propagate its value to its parent. The root
//! resolving is the terminal condition: the run ends `Solved` with the
//! chosen move attached to the root state.

use crate::{
    evaluator::Evaluator,
    frame::SearchFrame,
    state::{GameTreeState, NodeEvent},
    stats::AdversarialStatistics,
};
use num_traits::{PrimInt, Signed};
use orrery_engine::{
    emitter::{CompositeStepEmitter, StepEmitter},
    engine::StepwiseEngine,
    error::EngineError,
    status::{RunControl, RunStatus},
};
use orrery_model::tictactoe::{CellIndex, Grid, Player};

/// A stepwise minimax solver with optional alpha-beta pruning.
///
/// The run record is the frame stack plus the run control; suspending
/// between steps needs no unwinding because the "call stack" is ordinary
/// data. The evaluation function and the pruning switch are fixed at
/// construction; the root position is the original input `reset()`
/// returns to.
pub struct AdversarialSolver<T, E>
where
    T: PrimInt + Signed + From<i16>,
    E: Evaluator<T>,
{
    evaluator: E,
    root_grid: Grid,
    root_player: Player,
    depth_limit: u32,
    use_pruning: bool,
    control: RunControl,
    frames: Vec<SearchFrame<T>>,
    state: GameTreeState<T>,
    root_value: Option<T>,
    chosen_move: Option<CellIndex>,
    stats: AdversarialStatistics,
    emitters: CompositeStepEmitter<GameTreeState<T>>,
    initialized: bool,
}

impl<T, E> AdversarialSolver<T, E>
where
    T: PrimInt + Signed + From<i16>,
    E: Evaluator<T>,
{
    /// Creates a solver in `Ready` for the given root position.
    ///
    /// `root_player` is the side to move at the root and the maximizing
    /// player throughout the search. `depth_limit` bounds the lookahead
    /// in plies; `use_pruning` toggles alpha-beta (identical results
    /// either way, fewer visited nodes with it on).
    pub fn new(
        evaluator: E,
        root_grid: Grid,
        root_player: Player,
        depth_limit: u32,
        use_pruning: bool,
    ) -> Self {
        let state = Self::root_snapshot(root_grid, root_player);
        Self {
            evaluator,
            root_grid,
            root_player,
            depth_limit,
            use_pruning,
            control: RunControl::new(),
            frames: Vec::with_capacity(depth_limit as usize + 1),
            state,
            root_value: None,
            chosen_move: None,
            stats: AdversarialStatistics::default(),
            emitters: CompositeStepEmitter::new(),
            initialized: false,
        }
    }

    fn root_snapshot(grid: Grid, player: Player) -> GameTreeState<T> {
        GameTreeState::new(grid, player, None, None, None, NodeEvent::Expanded, 0)
    }

    /// Returns the evaluator driving this solver.
    #[inline(always)]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Returns true if alpha-beta pruning is enabled.
    #[inline(always)]
    pub fn uses_pruning(&self) -> bool {
        self.use_pruning
    }

    /// Returns the depth limit in plies.
    #[inline(always)]
    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }

    /// Returns the root value once the run is `Solved`.
    #[inline(always)]
    pub fn root_value(&self) -> Option<T> {
        self.root_value
    }

    /// Returns the chosen best move once the run is `Solved`. `None` on
    /// a root position that was already terminal.
    #[inline(always)]
    pub fn chosen_move(&self) -> Option<CellIndex> {
        self.chosen_move
    }

    fn initialize(&mut self) {
        self.frames.push(SearchFrame::new(
            self.root_grid,
            self.root_player,
            None,
            T::min_value(),
            T::max_value(),
            self.depth_limit,
        ));
        self.initialized = true;
    }

    fn emit(&mut self) {
        self.emitters.emit(&self.state, self.control.status());
    }

    /// Expands the top frame's next untried move into a child frame.
    fn expand(&mut self) -> Result<(), EngineError> {
        let depth = self.frames.len();
        let top = self.frames.last_mut().expect("frame stack is empty");
        let mv = top.take_next_move();
        let to_move = top.to_move;

        let child_grid = match top.grid.with_move(mv, to_move) {
            Some(grid) => grid,
            None => {
                // Open-cell generation offered an occupied cell: a model
                // bug. Fatal to the run.
                self.control.cancel();
                return Err(EngineError::InvariantViolation(format!(
                    "move generation offered occupied cell {}",
                    mv
                )));
            }
        };

        let child = SearchFrame::new(
            child_grid,
            to_move.opponent(),
            Some(mv),
            top.alpha,
            top.beta,
            top.depth_remaining - 1,
        );

        self.state = GameTreeState::new(
            child.grid,
            child.to_move,
            child.produced_by,
            None,
            None,
            NodeEvent::Expanded,
            depth,
        );
        self.frames.push(child);

        self.stats.on_node_expanded();
        self.stats.on_depth_update(depth as u64);
        Ok(())
    }

    /// Pops the top frame and folds `value` into its parent, or resolves
    /// the root.
    fn resolve(&mut self, value: T, event: NodeEvent) {
        let frame = self.frames.pop().expect("frame stack is empty");
        let depth = self.frames.len();

        self.state = GameTreeState::new(
            frame.grid,
            frame.to_move,
            frame.produced_by,
            Some(value),
            frame.best_move,
            event,
            depth,
        );

        match self.frames.last_mut() {
            Some(parent) => {
                let child_move = frame
                    .produced_by
                    .expect("non-root frame has no producing move");
                let maximizing = parent.to_move == self.root_player;
                parent.absorb_child_value(child_move, value, maximizing);
            }
            None => {
                self.root_value = Some(value);
                self.chosen_move = frame.best_move;
                self.control.transition(RunStatus::Solved);
            }
        }
    }
}

impl<T, E> StepwiseEngine for AdversarialSolver<T, E>
where
    T: PrimInt + Signed + From<i16>,
    E: Evaluator<T>,
{
    type State = GameTreeState<T>;
    type Statistics = AdversarialStatistics;

    fn name(&self) -> &str {
        "AdversarialSolver"
    }

    fn status(&self) -> RunStatus {
        self.control.status()
    }

    fn current_state(&self) -> &GameTreeState<T> {
        &self.state
    }

    fn steps_taken(&self) -> u64 {
        self.control.steps_taken()
    }

    fn statistics(&self) -> &AdversarialStatistics {
        &self.stats
    }

    fn step(&mut self) -> Result<RunStatus, EngineError> {
        self.control.begin_step()?;
        if !self.initialized {
            self.initialize();
        }

        debug_assert!(
            !self.frames.is_empty(),
            "called `AdversarialSolver::step` with an empty frame stack while the run is {}",
            self.control.status()
        );

        let top = self.frames.last().expect("frame stack is empty");
        if top.is_leaf() {
            let value = self.evaluator.evaluate(&top.grid, self.root_player);
            self.stats.on_leaf_evaluated();
            self.resolve(value, NodeEvent::Evaluated);
        } else if top.has_untried_moves() && !(self.use_pruning && top.is_cut_off()) {
            self.expand()?;
        } else {
            // Either every child resolved, or the window closed and the
            // remaining children are irrelevant to the parent's decision.
            let cut_off = top.has_untried_moves();
            let value = match top.best_value {
                Some(value) => value,
                None => {
                    self.control.cancel();
                    return Err(EngineError::InvariantViolation(
                        "frame resolved without any child value".into(),
                    ));
                }
            };
            if cut_off {
                self.stats.on_pruning();
                self.resolve(value, NodeEvent::Pruned);
            } else {
                self.stats.on_propagation();
                self.resolve(value, NodeEvent::Propagated);
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
        self.frames.clear();
        self.state = Self::root_snapshot(self.root_grid, self.root_player);
        self.root_value = None;
        self.chosen_move = None;
        self.stats = AdversarialStatistics::default();
        self.initialized = false;
        self.control.reset()
    }

    fn subscribe(&mut self, emitter: Box<dyn StepEmitter<GameTreeState<T>>>) {
        self.emitters.add_emitter_boxed(emitter);
    }
}

impl<T, E> std::fmt::Debug for AdversarialSolver<T, E>
where
    T: PrimInt + Signed + From<i16> + std::fmt::Debug,
    E: Evaluator<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdversarialSolver")
            .field("evaluator", &self.evaluator.name())
            .field("depth_limit", &self.depth_limit)
            .field("use_pruning", &self.use_pruning)
            .field("control", &self.control)
            .field("frames", &self.frames.len())
            .field("stats", &self.stats)
            .finish()
    }
}

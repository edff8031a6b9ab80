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

//! The stepwise tour engine.
//!
//! Construction appends one nearest unvisited city per step; improvement
//! examines one 2-opt pair per step. The improvement scan keeps the start
//! city fixed at position 0 and enumerates pairs `(i, j)` with
//! `1 <= i < j <= n - 1` in nested ascending order; reversing
//! `order[i..=j]` exchanges the edges entering `i` and leaving `j`. The
//! cursor wraps to the next pair regardless of the outcome, so the state
//! sequence is a pure function of the instance.

use crate::{
    state::{TourAction, TourPhase, TourState},
    stats::TourStatistics,
};
use fixedbitset::FixedBitSet;
use orrery_engine::{
    emitter::{CompositeStepEmitter, StepEmitter},
    engine::StepwiseEngine,
    error::EngineError,
    status::{RunControl, RunStatus},
};
use orrery_model::cities::{CityIndex, DistanceMatrix};

/// Exchanges must beat this margin to count as strict improvements,
/// keeping float noise from cycling the scan forever.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// A stepwise nearest-neighbour + 2-opt tour solver.
///
/// Terminates `Exhausted` at a 2-opt local optimum (a full scan without
/// an improving exchange) or when the configured scan cap is hit. The
/// solver does not claim global optimality.
pub struct HeuristicTourSolver {
    matrix: DistanceMatrix,
    start: CityIndex,
    max_scans: Option<u64>,
    control: RunControl,
    state: TourState,
    visited: FixedBitSet,
    phase: TourPhase,
    cursor_i: usize,
    cursor_j: usize,
    improved_this_scan: bool,
    stats: TourStatistics,
    emitters: CompositeStepEmitter<TourState>,
}

impl HeuristicTourSolver {
    /// Creates a solver in `Ready` for the given instance.
    ///
    /// `max_scans` caps the number of full improvement scans; `None`
    /// runs until a local optimum.
    ///
    /// # Panics
    ///
    /// Panics if the instance has fewer than 3 cities or the start city
    /// is out of range; the controller validates both beforehand.
    pub fn new(matrix: DistanceMatrix, start: CityIndex, max_scans: Option<u64>) -> Self {
        assert!(
            matrix.num_cities() >= 3,
            "called `HeuristicTourSolver::new` with {} cities, need at least 3",
            matrix.num_cities()
        );
        assert!(
            start.get() < matrix.num_cities(),
            "called `HeuristicTourSolver::new` with start city {} out of range: the instance has {} cities",
            start.get(),
            matrix.num_cities()
        );

        let mut visited = FixedBitSet::with_capacity(matrix.num_cities());
        visited.insert(start.get());

        Self {
            state: TourState::new(vec![start], 0.0),
            visited,
            matrix,
            start,
            max_scans,
            control: RunControl::new(),
            phase: TourPhase::Construction,
            cursor_i: 1,
            cursor_j: 2,
            improved_this_scan: false,
            stats: TourStatistics::default(),
            emitters: CompositeStepEmitter::new(),
        }
    }

    /// Returns the instance this solver runs on.
    #[inline(always)]
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Returns the fixed start city.
    #[inline(always)]
    pub fn start(&self) -> CityIndex {
        self.start
    }

    /// Returns the current visiting order.
    #[inline(always)]
    pub fn tour(&self) -> &[CityIndex] {
        self.state.order()
    }

    /// Returns the current closed-loop tour length.
    #[inline(always)]
    pub fn tour_length(&self) -> f64 {
        self.state.length()
    }

    fn emit(&mut self) {
        self.emitters.emit(&self.state, self.control.status());
    }

    /// Appends the nearest unvisited city to the tour.
    fn construction_step(&mut self) {
        let last = *self
            .state
            .order()
            .last()
            .expect("tour order is never empty");

        let mut nearest: Option<(f64, usize)> = None;
        for city in 0..self.matrix.num_cities() {
            if self.visited.contains(city) {
                continue;
            }
            let d = self.matrix.distance(last, CityIndex::new(city));
            // Strict comparison keeps the lowest index on ties.
            if nearest.map_or(true, |(best, _)| d < best) {
                nearest = Some((d, city));
            }
        }

        let (_, city) = nearest.expect("construction step ran with no unvisited city");
        self.visited.insert(city);
        self.state.order_mut().push(CityIndex::new(city));
        self.stats.on_city_appended();

        if self.state.order().len() == self.matrix.num_cities() {
            self.phase = TourPhase::Improvement;
        }

        let length = self.matrix.tour_length(self.state.order());
        self.state.record(
            length,
            TourPhase::Construction,
            TourAction::Appended {
                city: CityIndex::new(city),
            },
        );
    }

    /// Computes the length delta of exchanging the edges at the current
    /// cursor pair.
    fn exchange_delta(&self, i: usize, j: usize) -> f64 {
        let order = self.state.order();
        let n = order.len();
        let prev = order[i - 1];
        let a = order[i];
        let b = order[j];
        let next = order[(j + 1) % n];

        self.matrix.distance(prev, b) + self.matrix.distance(a, next)
            - self.matrix.distance(prev, a)
            - self.matrix.distance(b, next)
    }

    /// Advances the scan cursor; returns true when a full scan just
    /// completed.
    fn advance_cursor(&mut self) -> bool {
        let n = self.matrix.num_cities();
        if self.cursor_j < n - 1 {
            self.cursor_j += 1;
            return false;
        }
        if self.cursor_i < n - 2 {
            self.cursor_i += 1;
            self.cursor_j = self.cursor_i + 1;
            return false;
        }
        self.cursor_i = 1;
        self.cursor_j = 2;
        true
    }

    /// Examines one 2-opt pair, applying the exchange iff it strictly
    /// shortens the tour.
    fn improvement_step(&mut self) {
        let (i, j) = (self.cursor_i, self.cursor_j);
        let delta = self.exchange_delta(i, j);
        self.stats.on_exchange_examined();

        let action = if delta < -IMPROVEMENT_EPSILON {
            self.state.order_mut()[i..=j].reverse();
            self.improved_this_scan = true;
            self.stats.on_exchange_applied();
            TourAction::ExchangeApplied { i, j, delta }
        } else {
            TourAction::ExchangeExamined { i, j, delta }
        };

        let length = self.matrix.tour_length(self.state.order());
        self.state.record(length, TourPhase::Improvement, action);

        if self.advance_cursor() {
            self.stats.on_scan_completed();
            let capped = self
                .max_scans
                .is_some_and(|cap| self.stats.scans_completed >= cap);
            if !self.improved_this_scan || capped {
                self.control.transition(RunStatus::Exhausted);
            }
            self.improved_this_scan = false;
        }
    }
}

impl StepwiseEngine for HeuristicTourSolver {
    type State = TourState;
    type Statistics = TourStatistics;

    fn name(&self) -> &str {
        "HeuristicTourSolver"
    }

    fn status(&self) -> RunStatus {
        self.control.status()
    }

    fn current_state(&self) -> &TourState {
        &self.state
    }

    fn steps_taken(&self) -> u64 {
        self.control.steps_taken()
    }

    fn statistics(&self) -> &TourStatistics {
        &self.stats
    }

    fn step(&mut self) -> Result<RunStatus, EngineError> {
        self.control.begin_step()?;

        match self.phase {
            TourPhase::Construction => self.construction_step(),
            TourPhase::Improvement => self.improvement_step(),
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
        self.state = TourState::new(vec![self.start], 0.0);
        self.visited.clear();
        self.visited.insert(self.start.get());
        self.phase = TourPhase::Construction;
        self.cursor_i = 1;
        self.cursor_j = 2;
        self.improved_this_scan = false;
        self.stats = TourStatistics::default();
        self.control.reset()
    }

    fn subscribe(&mut self, emitter: Box<dyn StepEmitter<TourState>>) {
        self.emitters.add_emitter_boxed(emitter);
    }
}

impl std::fmt::Debug for HeuristicTourSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicTourSolver")
            .field("matrix", &self.matrix)
            .field("start", &self.start)
            .field("control", &self.control)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::emitter::RecordingStepEmitter;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
            .unwrap()
    }

    fn city(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    /// Brute-force check that no single 2-opt exchange improves the tour.
    fn is_two_opt_optimal(matrix: &DistanceMatrix, order: &[CityIndex]) -> bool {
        let n = order.len();
        let base = matrix.tour_length(order);
        for i in 1..n - 1 {
            for j in i + 1..n {
                let mut candidate = order.to_vec();
                candidate[i..=j].reverse();
                if matrix.tour_length(&candidate) < base - IMPROVEMENT_EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_square_converges_to_the_perimeter_from_any_start() {
        for start in 0..4 {
            let mut solver = HeuristicTourSolver::new(square(), city(start), None);
            let status = solver.run_to_completion(10_000).unwrap();
            assert_eq!(status, RunStatus::Exhausted);
            assert!(
                (solver.tour_length() - 40.0).abs() < 1e-9,
                "start {} ended at length {}",
                start,
                solver.tour_length()
            );
        }
    }

    #[test]
    fn test_construction_is_greedy_with_index_tie_breaks() {
        let mut solver = HeuristicTourSolver::new(square(), city(0), None);
        // Three construction steps append the remaining three cities.
        for _ in 0..3 {
            solver.step().unwrap();
        }
        // From city 0, cities 1 and 3 tie at distance 10; the lower
        // index wins. From 1 the nearest unvisited is 2.
        let order: Vec<usize> = solver.tour().iter().map(|c| c.get()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(solver.statistics().cities_appended, 3);
        assert!((solver.tour_length() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossed_greedy_tour_gets_uncrossed() {
        // Greedy from city 0 yields [0, 2, 1, 3], whose two long edges
        // cross; one exchange uncrosses them to [0, 2, 3, 1].
        let matrix =
            DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0), (3.0, 10.0)])
                .unwrap();
        let mut solver = HeuristicTourSolver::new(matrix, city(0), None);
        let status = solver.run_to_completion(10_000).unwrap();

        assert_eq!(status, RunStatus::Exhausted);
        assert!(solver.statistics().exchanges_applied >= 1);
        let expected = 4.0 + 2.0 * 101.0_f64.sqrt();
        assert!((solver.tour_length() - expected).abs() < 1e-9);

        let order: Vec<usize> = solver.tour().iter().map(|c| c.get()).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_length_is_monotone_during_improvement() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let matrix = DistanceMatrix::random_euclidean(20, 100.0, &mut rng);

        let recorder = RecordingStepEmitter::new();
        let mut solver = HeuristicTourSolver::new(matrix, city(0), None);
        solver.subscribe(Box::new(recorder.clone()));
        solver.run_to_completion(1_000_000).unwrap();

        let improvement_lengths: Vec<f64> = recorder
            .states()
            .iter()
            .filter(|s| s.phase() == TourPhase::Improvement)
            .map(|s| s.length())
            .collect();
        assert!(!improvement_lengths.is_empty());
        for window in improvement_lengths.windows(2) {
            assert!(
                window[1] <= window[0] + IMPROVEMENT_EPSILON,
                "length increased during improvement: {} -> {}",
                window[0],
                window[1]
            );
        }
    }

    #[test]
    fn test_termination_is_a_two_opt_local_optimum() {
        for seed in [1, 7, 99] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let matrix = DistanceMatrix::random_euclidean(15, 100.0, &mut rng);
            let mut solver = HeuristicTourSolver::new(matrix, city(0), None);
            let status = solver.run_to_completion(1_000_000).unwrap();

            assert_eq!(status, RunStatus::Exhausted);
            assert!(
                is_two_opt_optimal(solver.matrix(), solver.tour()),
                "seed {} terminated with an improving exchange left",
                seed
            );
        }
    }

    #[test]
    fn test_scan_cap_exhausts_early() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let matrix = DistanceMatrix::random_euclidean(25, 100.0, &mut rng);

        let mut capped = HeuristicTourSolver::new(matrix, city(0), Some(1));
        let status = capped.run_to_completion(1_000_000).unwrap();
        assert_eq!(status, RunStatus::Exhausted);
        assert_eq!(capped.statistics().scans_completed, 1);
    }

    #[test]
    fn test_tour_visits_every_city_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let matrix = DistanceMatrix::random_euclidean(30, 100.0, &mut rng);
        let mut solver = HeuristicTourSolver::new(matrix, city(5), None);
        solver.run_to_completion(10_000_000).unwrap();

        let mut seen: Vec<usize> = solver.tour().iter().map(|c| c.get()).collect();
        assert_eq!(solver.tour()[0].get(), 5, "tour must begin at the start city");
        seen.sort_unstable();
        assert_eq!(seen, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_pause_resume_and_cancel_lifecycle() {
        let mut solver = HeuristicTourSolver::new(square(), city(0), None);
        solver.step().unwrap();
        solver.pause().unwrap();
        assert!(solver.step().is_err());
        solver.resume().unwrap();
        solver.step().unwrap();

        assert_eq!(solver.cancel(), RunStatus::Cancelled);
        assert!(solver.step().is_err());
        assert_eq!(solver.reset(), RunStatus::Ready);

        let status = solver.run_to_completion(10_000).unwrap();
        assert_eq!(status, RunStatus::Exhausted);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]
        #[test]
        fn prop_runs_are_deterministic(seed in 0u64..1_000, n in 5usize..15) {
            let run = || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let matrix = DistanceMatrix::random_euclidean(n, 100.0, &mut rng);
                let recorder = RecordingStepEmitter::new();
                let mut solver = HeuristicTourSolver::new(matrix, city(0), None);
                solver.subscribe(Box::new(recorder.clone()));
                solver.run_to_completion(10_000_000).unwrap();
                recorder.states().iter().map(|s| s.length()).collect::<Vec<_>>()
            };
            prop_assert_eq!(run(), run());
        }
    }
}

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

//! End-to-end scenarios driving every engine through the controller.

use orrery_backtrack::{solver::SearchMode, state::AttemptKind};
use orrery_control::{
    controller::Controller,
    params::{Parameters, SolverKind},
    state::SearchState,
};
use orrery_engine::{
    emitter::RecordingStepEmitter, error::EngineError, status::RunStatus,
};
use orrery_hanoi::state::Peg;
use orrery_model::{
    board::Square,
    cities::{CityIndex, DistanceMatrix},
    tictactoe::{CellIndex, Grid, Player},
};

fn square_matrix() -> DistanceMatrix {
    DistanceMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
        .unwrap()
}

fn tictactoe(moves: &[(usize, Player)]) -> Grid {
    let mut g = Grid::empty();
    for &(cell, player) in moves {
        g = g.with_move(CellIndex::new(cell), player).unwrap();
    }
    g
}

#[test]
fn test_four_queens_exhaustive_yields_exactly_two_solutions() {
    let mut controller = Controller::create(
        SolverKind::EightQueens,
        Parameters::EightQueens {
            board_size: 4,
            mode: SearchMode::Exhaustive,
        },
    )
    .unwrap();

    let recorder = RecordingStepEmitter::new();
    controller.subscribe(Box::new(recorder.clone()));

    let (status, _) = controller.run_to_completion(10_000).unwrap();
    assert_eq!(status, RunStatus::Exhausted);

    let solutions: Vec<Vec<usize>> = recorder
        .states()
        .iter()
        .filter_map(SearchState::as_placement)
        .filter(|s| s.last_attempt().map(|a| a.kind) == Some(AttemptKind::Solution))
        .map(|s| s.placements().iter().map(|sq| sq.col().get()).collect())
        .collect();

    assert_eq!(solutions, vec![vec![1, 3, 0, 2], vec![2, 0, 3, 1]]);
}

#[test]
fn test_traveling_salesman_square_converges_to_perimeter_from_any_start() {
    for start in 0..4 {
        let mut controller = Controller::create(
            SolverKind::TravelingSalesman,
            Parameters::TravelingSalesman {
                matrix: square_matrix(),
                start: CityIndex::new(start),
                max_scans: None,
            },
        )
        .unwrap();

        let (status, state) = controller.run_to_completion(10_000).unwrap();
        assert_eq!(status, RunStatus::Exhausted);
        let tour = state.as_tour().expect("tour state expected");
        assert!(
            (tour.length() - 40.0).abs() < 1e-9,
            "start {} ended at {}",
            start,
            tour.length()
        );
    }
}

#[test]
fn test_tictactoe_attaches_the_winning_move_to_the_root() {
    let position = tictactoe(&[
        (0, Player::X),
        (1, Player::X),
        (3, Player::O),
        (4, Player::O),
    ]);
    let mut controller = Controller::create(
        SolverKind::TicTacToe,
        Parameters::TicTacToe {
            position,
            player: Player::X,
            depth_limit: 9,
            use_pruning: true,
        },
    )
    .unwrap();

    let (status, state) = controller.run_to_completion(1_000_000).unwrap();
    assert_eq!(status, RunStatus::Solved);

    let root = state.as_game_tree().expect("game-tree state expected");
    assert_eq!(root.best_move(), Some(CellIndex::new(2)));
    assert_eq!(root.score(), Some(100));
}

#[test]
fn test_tower_of_hanoi_solves_in_the_canonical_move_count() {
    let mut controller = Controller::create(
        SolverKind::TowerOfHanoi,
        Parameters::TowerOfHanoi {
            num_disks: 4,
            source: Peg::Left,
            target: Peg::Right,
        },
    )
    .unwrap();

    let (status, state) = controller.run_to_completion(1_000).unwrap();
    assert_eq!(status, RunStatus::Solved);

    let hanoi = state.as_hanoi().expect("hanoi state expected");
    assert_eq!(hanoi.moves_done(), 15);
    assert_eq!(hanoi.peg(Peg::Right), &[4, 3, 2, 1]);
}

#[test]
fn test_knights_tour_budget_pause_and_continuation() {
    let mut controller = Controller::create(
        SolverKind::KnightsTour,
        Parameters::KnightsTour {
            board_size: 5,
            start: Square::at(0, 0),
        },
    )
    .unwrap();

    let err = controller.run_to_completion(5).unwrap_err();
    assert_eq!(err, EngineError::StepBudgetExceeded { limit: 5 });
    assert_eq!(controller.status(), RunStatus::Paused);
    assert_eq!(controller.steps_taken(), 5);

    let (status, state) = controller.run_to_completion(1_000_000).unwrap();
    assert_eq!(status, RunStatus::Solved);
    let placement = state.as_placement().expect("placement state expected");
    assert_eq!(placement.placements().len(), 25);
}

#[test]
fn test_cancel_always_wins_and_only_reset_recovers() {
    let make = || {
        Controller::create(
            SolverKind::EightQueens,
            Parameters::EightQueens {
                board_size: 5,
                mode: SearchMode::FirstSolution,
            },
        )
        .unwrap()
    };

    // Cancel from Ready, Running, Paused and Solved alike.
    let preparations: Vec<fn(&mut Controller)> = vec![
        |_c| {},
        |c| {
            c.step().unwrap();
        },
        |c| {
            c.step().unwrap();
            c.pause().unwrap();
        },
        |c| {
            c.run_to_completion(100_000).unwrap();
        },
    ];

    for prepare in preparations {
        let mut controller = make();
        prepare(&mut controller);
        assert_eq!(controller.cancel(), RunStatus::Cancelled);
        assert_eq!(controller.cancel(), RunStatus::Cancelled);

        assert!(controller.step().is_err());
        assert!(controller.pause().is_err());
        assert!(controller.resume().is_err());
        assert!(controller.run_to_completion(10).is_err());

        assert_eq!(controller.reset(), RunStatus::Ready);
        let (status, _) = controller.run_to_completion(100_000).unwrap();
        assert_eq!(status, RunStatus::Solved);
    }
}

#[test]
fn test_multiple_subscribers_receive_every_emission() {
    let mut controller = Controller::create(
        SolverKind::TowerOfHanoi,
        Parameters::TowerOfHanoi {
            num_disks: 3,
            source: Peg::Left,
            target: Peg::Right,
        },
    )
    .unwrap();

    let first = RecordingStepEmitter::new();
    let second = RecordingStepEmitter::new();
    controller.subscribe(Box::new(first.clone()));
    controller.subscribe(Box::new(second.clone()));

    assert_eq!(first.num_records(), 0, "nothing is emitted before stepping");

    let (status, _) = controller.run_to_completion(1_000).unwrap();
    assert_eq!(status, RunStatus::Solved);

    assert_eq!(first.num_records() as u64, controller.steps_taken());
    assert_eq!(second.num_records() as u64, controller.steps_taken());
    assert_eq!(first.last_status(), Some(RunStatus::Solved));
    assert_eq!(second.last_status(), Some(RunStatus::Solved));
}

#[test]
fn test_current_state_reads_without_advancing() {
    let mut controller = Controller::create(
        SolverKind::EightQueens,
        Parameters::EightQueens {
            board_size: 6,
            mode: SearchMode::FirstSolution,
        },
    )
    .unwrap();

    let before = controller.current_state();
    assert_eq!(controller.steps_taken(), 0);
    assert_eq!(
        before.as_placement().unwrap().num_placements(),
        0,
        "the initial state is the empty placement"
    );

    let (_, after_one) = controller.step().unwrap();
    assert_eq!(controller.steps_taken(), 1);
    assert_eq!(controller.current_state(), after_one);
}

#[test]
fn test_statistics_render_after_a_run() {
    let mut controller = Controller::create(
        SolverKind::EightQueens,
        Parameters::EightQueens {
            board_size: 4,
            mode: SearchMode::FirstSolution,
        },
    )
    .unwrap();
    controller.run_to_completion(10_000).unwrap();

    let stats = controller.statistics();
    assert!(stats.contains("Backtracking Statistics"));
    assert!(stats.contains("Solutions found:   1"));
}

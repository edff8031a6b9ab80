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

//! Solver kinds and validated construction parameters.
//!
//! Validation happens here, before any engine exists: a rejected
//! parameter set costs nothing and surfaces `InvalidParameters` with a
//! message naming the offending value.

use orrery_backtrack::solver::SearchMode;
use orrery_engine::error::EngineError;
use orrery_hanoi::state::Peg;
use orrery_model::{
    board::Square,
    cities::{CityIndex, DistanceMatrix},
    tictactoe::{Grid, Player},
};

/// Supported board sizes and counts.
pub const MIN_QUEENS_BOARD: usize = 4;
pub const MIN_KNIGHTS_BOARD: usize = 5;
pub const MIN_CITIES: usize = 3;
pub const MAX_SEARCH_DEPTH: u32 = 9;
pub const MAX_DISKS: u8 = 20;

/// The game engine a controller drives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SolverKind {
    EightQueens,
    KnightsTour,
    TicTacToe,
    TravelingSalesman,
    TowerOfHanoi,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::EightQueens => write!(f, "EightQueens"),
            SolverKind::KnightsTour => write!(f, "KnightsTour"),
            SolverKind::TicTacToe => write!(f, "TicTacToe"),
            SolverKind::TravelingSalesman => write!(f, "TravelingSalesman"),
            SolverKind::TowerOfHanoi => write!(f, "TowerOfHanoi"),
        }
    }
}

/// Construction parameters, one variant per solver kind.
#[derive(Clone, Debug)]
pub enum Parameters {
    EightQueens {
        board_size: usize,
        mode: SearchMode,
    },
    KnightsTour {
        board_size: usize,
        start: Square,
    },
    TicTacToe {
        position: Grid,
        player: Player,
        depth_limit: u32,
        use_pruning: bool,
    },
    TravelingSalesman {
        matrix: DistanceMatrix,
        start: CityIndex,
        max_scans: Option<u64>,
    },
    TowerOfHanoi {
        num_disks: u8,
        source: Peg,
        target: Peg,
    },
}

impl Parameters {
    /// Returns the solver kind these parameters construct.
    pub fn kind(&self) -> SolverKind {
        match self {
            Parameters::EightQueens { .. } => SolverKind::EightQueens,
            Parameters::KnightsTour { .. } => SolverKind::KnightsTour,
            Parameters::TicTacToe { .. } => SolverKind::TicTacToe,
            Parameters::TravelingSalesman { .. } => SolverKind::TravelingSalesman,
            Parameters::TowerOfHanoi { .. } => SolverKind::TowerOfHanoi,
        }
    }

    /// Validates every range the engines rely on.
    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            Parameters::EightQueens { board_size, .. } => {
                if *board_size < MIN_QUEENS_BOARD {
                    return Err(EngineError::InvalidParameters(format!(
                        "board size {} is below the minimum of {}",
                        board_size, MIN_QUEENS_BOARD
                    )));
                }
            }
            Parameters::KnightsTour { board_size, start } => {
                if *board_size < MIN_KNIGHTS_BOARD {
                    return Err(EngineError::InvalidParameters(format!(
                        "board size {} is below the minimum of {}",
                        board_size, MIN_KNIGHTS_BOARD
                    )));
                }
                if start.row().get() >= *board_size || start.col().get() >= *board_size {
                    return Err(EngineError::InvalidParameters(format!(
                        "start square {} is off the {}x{} board",
                        start, board_size, board_size
                    )));
                }
            }
            Parameters::TicTacToe { depth_limit, .. } => {
                if *depth_limit == 0 || *depth_limit > MAX_SEARCH_DEPTH {
                    return Err(EngineError::InvalidParameters(format!(
                        "search depth {} is outside the supported range 1..={}",
                        depth_limit, MAX_SEARCH_DEPTH
                    )));
                }
            }
            Parameters::TravelingSalesman {
                matrix,
                start,
                max_scans,
            } => {
                if matrix.num_cities() < MIN_CITIES {
                    return Err(EngineError::InvalidParameters(format!(
                        "{} cities is below the minimum of {}",
                        matrix.num_cities(),
                        MIN_CITIES
                    )));
                }
                if start.get() >= matrix.num_cities() {
                    return Err(EngineError::InvalidParameters(format!(
                        "start city {} is out of range for {} cities",
                        start.get(),
                        matrix.num_cities()
                    )));
                }
                if *max_scans == Some(0) {
                    return Err(EngineError::InvalidParameters(
                        "scan cap must be positive".into(),
                    ));
                }
            }
            Parameters::TowerOfHanoi {
                num_disks,
                source,
                target,
            } => {
                if *num_disks == 0 || *num_disks > MAX_DISKS {
                    return Err(EngineError::InvalidParameters(format!(
                        "disk count {} is outside the supported range 1..={}",
                        num_disks, MAX_DISKS
                    )));
                }
                if source == target {
                    return Err(EngineError::InvalidParameters(format!(
                        "source and target peg are both {}",
                        source
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters_pass() {
        let square = DistanceMatrix::from_coordinates(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ])
        .unwrap();

        let all = [
            Parameters::EightQueens {
                board_size: 8,
                mode: SearchMode::FirstSolution,
            },
            Parameters::KnightsTour {
                board_size: 5,
                start: Square::at(0, 0),
            },
            Parameters::TicTacToe {
                position: Grid::empty(),
                player: Player::X,
                depth_limit: 9,
                use_pruning: true,
            },
            Parameters::TravelingSalesman {
                matrix: square,
                start: CityIndex::new(0),
                max_scans: None,
            },
            Parameters::TowerOfHanoi {
                num_disks: 8,
                source: Peg::Left,
                target: Peg::Right,
            },
        ];
        for params in all {
            assert!(params.validate().is_ok(), "{:?} should validate", params);
        }
    }

    #[test]
    fn test_out_of_range_parameters_are_rejected() {
        let square = DistanceMatrix::from_coordinates(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
        ])
        .unwrap();

        let bad = [
            Parameters::EightQueens {
                board_size: 3,
                mode: SearchMode::FirstSolution,
            },
            Parameters::KnightsTour {
                board_size: 4,
                start: Square::at(0, 0),
            },
            Parameters::KnightsTour {
                board_size: 5,
                start: Square::at(5, 0),
            },
            Parameters::TicTacToe {
                position: Grid::empty(),
                player: Player::X,
                depth_limit: 0,
                use_pruning: true,
            },
            Parameters::TicTacToe {
                position: Grid::empty(),
                player: Player::X,
                depth_limit: 10,
                use_pruning: false,
            },
            Parameters::TravelingSalesman {
                matrix: square.clone(),
                start: CityIndex::new(4),
                max_scans: None,
            },
            Parameters::TravelingSalesman {
                matrix: square,
                start: CityIndex::new(0),
                max_scans: Some(0),
            },
            Parameters::TowerOfHanoi {
                num_disks: 0,
                source: Peg::Left,
                target: Peg::Right,
            },
            Parameters::TowerOfHanoi {
                num_disks: 21,
                source: Peg::Left,
                target: Peg::Right,
            },
            Parameters::TowerOfHanoi {
                num_disks: 5,
                source: Peg::Middle,
                target: Peg::Middle,
            },
        ];
        for params in bad {
            assert!(
                matches!(params.validate(), Err(EngineError::InvalidParameters(_))),
                "{:?} should be rejected",
                params
            );
        }
    }

    #[test]
    fn test_too_few_cities_are_rejected() {
        let two = DistanceMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        let params = Parameters::TravelingSalesman {
            matrix: two,
            start: CityIndex::new(0),
            max_scans: None,
        };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_kind_matches_variant() {
        let params = Parameters::TowerOfHanoi {
            num_disks: 3,
            source: Peg::Left,
            target: Peg::Right,
        };
        assert_eq!(params.kind(), SolverKind::TowerOfHanoi);
        assert_eq!(format!("{}", params.kind()), "TowerOfHanoi");
    }
}

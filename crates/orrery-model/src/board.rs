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

//! Square chess-board geometry.
//!
//! `Board` describes an `n x n` board and answers the purely geometric
//! questions the placement engines ask: which squares exist, which squares
//! a queen attacks, and where a knight may jump. The board itself carries
//! no occupancy; engines track that in their own run records.

use orrery_core::index::{TypedIndex, TypedIndexTag};
use smallvec::SmallVec;

/// A tag type for row indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RowIndexTag;

impl TypedIndexTag for RowIndexTag {
    const NAME: &'static str = "RowIndex";
}

/// A typed index for board rows.
pub type RowIndex = TypedIndex<RowIndexTag>;

/// A tag type for column indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ColIndexTag;

impl TypedIndexTag for ColIndexTag {
    const NAME: &'static str = "ColIndex";
}

/// A typed index for board columns.
pub type ColIndex = TypedIndex<ColIndexTag>;

/// The knight's eight move offsets, in a fixed order.
///
/// The order is part of the engine's determinism contract: candidate moves
/// are generated by iterating this table front to back.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// A single square on a board, identified by row and column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Square {
    row: RowIndex,
    col: ColIndex,
}

impl Square {
    /// Creates a new square at the given row and column.
    #[inline(always)]
    pub const fn new(row: RowIndex, col: ColIndex) -> Self {
        Self { row, col }
    }

    /// Convenience constructor from raw coordinates.
    #[inline(always)]
    pub const fn at(row: usize, col: usize) -> Self {
        Self {
            row: RowIndex::new(row),
            col: ColIndex::new(col),
        }
    }

    /// Returns the row of this square.
    #[inline(always)]
    pub const fn row(&self) -> RowIndex {
        self.row
    }

    /// Returns the column of this square.
    #[inline(always)]
    pub const fn col(&self) -> ColIndex {
        self.col
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row.get(), self.col.get())
    }
}

/// An `n x n` board.
///
/// Purely geometric: knows its size and the relations between squares, but
/// nothing about what is placed on them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    size: usize,
}

impl Board {
    /// Creates a new board with the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero; size validation against engine-specific
    /// minimums happens at controller level.
    #[inline]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "called `Board::new` with size 0");
        Self { size }
    }

    /// Returns the side length of the board.
    #[inline(always)]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of squares.
    #[inline(always)]
    pub const fn num_squares(&self) -> usize {
        self.size * self.size
    }

    /// Returns true if the square lies on this board.
    #[inline]
    pub fn contains(&self, square: Square) -> bool {
        square.row().get() < self.size && square.col().get() < self.size
    }

    /// Returns the linear index of a square for use in bit sets,
    /// row-major.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the square is off the board.
    #[inline]
    pub fn linear_index(&self, square: Square) -> usize {
        debug_assert!(
            self.contains(square),
            "called `Board::linear_index` with square off the board: size is {} but square is {}",
            self.size,
            square
        );
        square.row().get() * self.size + square.col().get()
    }

    /// Returns true if two squares attack each other along queen lines
    /// (same row, same column, or same diagonal).
    #[inline]
    pub fn queens_attack(&self, a: Square, b: Square) -> bool {
        let (ar, ac) = (a.row().get() as isize, a.col().get() as isize);
        let (br, bc) = (b.row().get() as isize, b.col().get() as isize);
        ar == br || ac == bc || (ar - br).abs() == (ac - bc).abs()
    }

    /// Collects the knight moves from `from` that stay on the board.
    ///
    /// Moves are produced in the fixed `KNIGHT_OFFSETS` order, which keeps
    /// candidate generation reproducible across runs.
    pub fn knight_moves(&self, from: Square) -> SmallVec<[Square; 8]> {
        let mut moves = SmallVec::new();
        let (row, col) = (from.row().get() as isize, from.col().get() as isize);

        for (dr, dc) in KNIGHT_OFFSETS {
            let (r, c) = (row + dr, col + dc);
            if r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size {
                moves.push(Square::at(r as usize, c as usize));
            }
        }

        moves
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({}x{})", self.size, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_accessors_and_display() {
        let s = Square::at(2, 5);
        assert_eq!(s.row().get(), 2);
        assert_eq!(s.col().get(), 5);
        assert_eq!(format!("{}", s), "(2, 5)");
    }

    #[test]
    fn test_contains_and_linear_index() {
        let b = Board::new(4);
        assert!(b.contains(Square::at(3, 3)));
        assert!(!b.contains(Square::at(4, 0)));
        assert!(!b.contains(Square::at(0, 4)));
        assert_eq!(b.linear_index(Square::at(0, 0)), 0);
        assert_eq!(b.linear_index(Square::at(1, 2)), 6);
        assert_eq!(b.linear_index(Square::at(3, 3)), 15);
    }

    #[test]
    fn test_queens_attack_rows_cols_diagonals() {
        let b = Board::new(8);
        // Same row / column.
        assert!(b.queens_attack(Square::at(3, 0), Square::at(3, 7)));
        assert!(b.queens_attack(Square::at(0, 2), Square::at(5, 2)));
        // Both diagonals.
        assert!(b.queens_attack(Square::at(1, 1), Square::at(4, 4)));
        assert!(b.queens_attack(Square::at(0, 7), Square::at(7, 0)));
        // Knight-distance squares do not attack.
        assert!(!b.queens_attack(Square::at(0, 0), Square::at(1, 2)));
    }

    #[test]
    fn test_knight_moves_center_and_corner() {
        let b = Board::new(8);
        let center = b.knight_moves(Square::at(4, 4));
        assert_eq!(center.len(), 8);

        let corner = b.knight_moves(Square::at(0, 0));
        assert_eq!(corner.len(), 2);
        // Fixed offset order: (1, 2) before (2, 1).
        assert_eq!(corner[0], Square::at(1, 2));
        assert_eq!(corner[1], Square::at(2, 1));
    }

    #[test]
    fn test_knight_moves_stay_on_small_board() {
        let b = Board::new(3);
        for r in 0..3 {
            for c in 0..3 {
                for m in b.knight_moves(Square::at(r, c)) {
                    assert!(b.contains(m), "move {} left the board", m);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "called `Board::new` with size 0")]
    fn test_zero_size_board_panics() {
        let _ = Board::new(0);
    }
}

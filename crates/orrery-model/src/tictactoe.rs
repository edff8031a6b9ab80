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

//! The tic-tac-toe position model used by the adversarial engine.

use orrery_core::index::{TypedIndex, TypedIndexTag};
use smallvec::SmallVec;

/// A tag type for grid cell indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CellIndexTag;

impl TypedIndexTag for CellIndexTag {
    const NAME: &'static str = "CellIndex";
}

/// A typed index for grid cells, row-major in `0..9`.
pub type CellIndex = TypedIndex<CellIndexTag>;

/// The eight winning lines of the 3x3 grid, as linear cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One of the two players.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the opposing player.
    #[inline(always)]
    pub const fn opponent(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A 3x3 tic-tac-toe position.
///
/// Cells are addressed row-major. The grid answers the structural questions
/// (winner, fullness, open cells) and applies moves; whose turn it is and
/// how the tree is explored are engine concerns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Grid {
    cells: [Option<Player>; 9],
}

impl Grid {
    /// Creates an empty grid.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a grid from the given cells.
    #[inline]
    pub fn from_cells(cells: [Option<Player>; 9]) -> Self {
        Self { cells }
    }

    /// Returns the mark at the given cell.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the cell index is out of bounds.
    #[inline]
    pub fn cell(&self, cell: CellIndex) -> Option<Player> {
        debug_assert!(
            cell.get() < 9,
            "called `Grid::cell` with cell index out of bounds: the len is 9 but the index is {}",
            cell.get()
        );
        self.cells[cell.get()]
    }

    /// Returns true if the given cell is empty.
    #[inline]
    pub fn is_open(&self, cell: CellIndex) -> bool {
        self.cell(cell).is_none()
    }

    /// Returns a copy of this grid with `player`'s mark applied at `cell`.
    ///
    /// Returns `None` if the cell is already occupied; the engine treats
    /// that as an internal invariant violation, not as a user error.
    #[inline]
    pub fn with_move(&self, cell: CellIndex, player: Player) -> Option<Grid> {
        if !self.is_open(cell) {
            return None;
        }
        let mut next = *self;
        next.cells[cell.get()] = Some(player);
        Some(next)
    }

    /// Collects the open cells in ascending index order.
    ///
    /// The ascending order is load-bearing: the adversarial engine
    /// generates children in exactly this order, and ties in evaluation
    /// favour the earliest-generated move.
    pub fn open_cells(&self) -> SmallVec<[CellIndex; 9]> {
        let mut open = SmallVec::new();
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.is_none() {
                open.push(CellIndex::new(i));
            }
        }
        open
    }

    /// Returns the number of marks on the grid.
    #[inline]
    pub fn num_marks(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Returns the winning player, if any line is complete.
    pub fn winner(&self) -> Option<Player> {
        for line in LINES {
            if let Some(p) = self.cells[line[0]] {
                if self.cells[line[1]] == Some(p) && self.cells[line[2]] == Some(p) {
                    return Some(p);
                }
            }
        }
        None
    }

    /// Returns true if every cell is marked.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Returns true if the position is terminal (won or drawn).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Counts the lines still open for `player` (no opposing mark on the
    /// line). The classic tic-tac-toe heuristic building block.
    pub fn open_lines(&self, player: Player) -> usize {
        LINES
            .iter()
            .filter(|line| {
                line.iter()
                    .all(|&i| self.cells[i] != Some(player.opponent()))
            })
            .count()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                match self.cells[row * 3 + col] {
                    Some(p) => write!(f, "{}", p)?,
                    None => write!(f, ".")?,
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(s: &str) -> Grid {
        let mut cells = [None; 9];
        for (i, ch) in s.chars().filter(|c| !c.is_whitespace()).enumerate() {
            cells[i] = match ch {
                'X' => Some(Player::X),
                'O' => Some(Player::O),
                _ => None,
            };
        }
        Grid::from_cells(cells)
    }

    #[test]
    fn test_empty_grid_has_nine_open_cells() {
        let g = Grid::empty();
        assert_eq!(g.open_cells().len(), 9);
        assert_eq!(g.num_marks(), 0);
        assert!(!g.is_terminal());
        assert_eq!(g.winner(), None);
    }

    #[test]
    fn test_with_move_applies_and_rejects_occupied() {
        let g = Grid::empty();
        let g = g.with_move(CellIndex::new(4), Player::X).unwrap();
        assert_eq!(g.cell(CellIndex::new(4)), Some(Player::X));
        assert!(g.with_move(CellIndex::new(4), Player::O).is_none());
    }

    #[test]
    fn test_winner_row_column_diagonal() {
        assert_eq!(grid("XXX ...... ").winner(), Some(Player::X));
        assert_eq!(grid("O..O..O..").winner(), Some(Player::O));
        assert_eq!(grid("X...X...X").winner(), Some(Player::X));
        assert_eq!(grid("..O.O.O..").winner(), Some(Player::O));
    }

    #[test]
    fn test_draw_is_terminal_without_winner() {
        // X O X / X O O / O X X: full, no line.
        let g = grid("XOXXOOOXX");
        assert!(g.is_full());
        assert_eq!(g.winner(), None);
        assert!(g.is_terminal());
    }

    #[test]
    fn test_open_cells_ascending_order() {
        let g = grid("X...O....");
        let open = g.open_cells();
        let raw: Vec<usize> = open.iter().map(|c| c.get()).collect();
        assert_eq!(raw, vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_open_lines_heuristic_counts() {
        // Empty board: all 8 lines open for both players.
        let g = Grid::empty();
        assert_eq!(g.open_lines(Player::X), 8);
        assert_eq!(g.open_lines(Player::O), 8);

        // X in the center blocks 4 lines for O.
        let g = g.with_move(CellIndex::new(4), Player::X).unwrap();
        assert_eq!(g.open_lines(Player::O), 4);
        assert_eq!(g.open_lines(Player::X), 8);
    }

    #[test]
    fn test_display_renders_rows() {
        let g = grid("XO.......");
        assert_eq!(format!("{}", g), "XO.\n...\n...");
    }
}

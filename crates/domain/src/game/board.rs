//! Board projection over the move list.

use super::{Mark, Move};

/// Number of rows and columns.
pub const BOARD_SIZE: usize = 3;

/// 3×3 grid of indices into a game's move list.
///
/// The board is never stored on its own: it is folded from the move list on
/// construction and updated only when a placement is accepted. Cells never
/// empty again once filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Board {
    cells: [[Option<usize>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Folds a move list (in play order) into grid cells.
    ///
    /// Moves outside the grid or onto an occupied cell are skipped; callers
    /// validate history before rebuilding.
    pub fn from_moves(moves: &[Move]) -> Self {
        moves
            .iter()
            .enumerate()
            .fold(Self::default(), |mut board, (index, mv)| {
                if let (Some(row), Some(column)) = (cell_index(mv.row()), cell_index(mv.column()))
                    && !board.is_occupied(row, column)
                {
                    board.occupy(row, column, index);
                }
                board
            })
    }

    /// Returns the index of the move occupying a cell.
    pub fn occupant(&self, row: usize, column: usize) -> Option<usize> {
        self.cells.get(row)?.get(column).copied().flatten()
    }

    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.occupant(row, column).is_some()
    }

    /// Marks a cell as holding the move at `index`.
    pub fn occupy(&mut self, row: usize, column: usize, index: usize) {
        debug_assert!(!self.is_occupied(row, column), "cell already occupied");
        self.cells[row][column] = Some(index);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Returns the move indices of every occupied cell, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    /// Resolves cells to the moves they hold.
    pub fn resolve<'a>(&self, moves: &'a [Move]) -> [[Option<&'a Move>; BOARD_SIZE]; BOARD_SIZE] {
        self.cells
            .map(|row| row.map(|cell| cell.and_then(|index| moves.get(index))))
    }

    /// Resolves cells to the marks they hold.
    pub fn marks(&self, moves: &[Move]) -> [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE] {
        self.resolve(moves)
            .map(|row| row.map(|cell| cell.map(Move::mark)))
    }
}

/// Converts a raw row or column into a grid index, if it is on the board.
pub(crate) fn cell_index(value: i32) -> Option<usize> {
    usize::try_from(value).ok().filter(|index| *index < BOARD_SIZE)
}

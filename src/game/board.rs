use std::fmt;
use std::ops::{Deref, DerefMut};

use super::player::Player;
use crate::error::GameError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CONNECT: usize = 4;

/// Widest board the legal-column bitmask can describe.
pub const MAX_COLS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A resolved drop location. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

/// Fixed-size grid of cells under gravity.
///
/// The board is mutated only through [`Board::apply_move`] and
/// [`Board::undo_move`] (or the [`ScopedMove`] guard built on them). Applied
/// moves are kept on a stack, so the last move after an undo is exactly what
/// it was before the matching apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    connect: usize,
    cells: Vec<Cell>,
    heights: Vec<usize>,
    moves: Vec<Move>,
}

impl Board {
    /// Create an empty board with the standard line length of four.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GameError> {
        Self::with_connect(rows, columns, CONNECT)
    }

    /// Create an empty board where `connect` pieces in a line win.
    pub fn with_connect(rows: usize, columns: usize, connect: usize) -> Result<Self, GameError> {
        let too_short = connect > rows && connect > columns;
        if rows == 0 || columns == 0 || columns > MAX_COLS || connect == 0 || too_short {
            return Err(GameError::InvalidDimensions {
                rows,
                columns,
                connect,
            });
        }

        Ok(Board {
            rows,
            columns,
            connect,
            cells: vec![Cell::Empty; rows * columns],
            heights: vec![0; columns],
            moves: Vec::with_capacity(rows * columns),
        })
    }

    /// The 6x7 connect-four board.
    pub fn standard() -> Self {
        Board {
            rows: ROWS,
            columns: COLS,
            connect: CONNECT,
            cells: vec![Cell::Empty; ROWS * COLS],
            heights: vec![0; COLS],
            moves: Vec::with_capacity(ROWS * COLS),
        }
    }

    /// Parse a board from text rows, top row first. `.` is empty, `R`/`X` is
    /// Red and `Y`/`O` is Yellow. The parsed position has no last move.
    pub fn from_rows(lines: &[&str], connect: usize) -> Result<Self, GameError> {
        let rows = lines.len();
        let columns = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Self::with_connect(rows, columns, connect)?;

        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != columns {
                return Err(GameError::InvalidDimensions {
                    rows,
                    columns: chars.len(),
                    connect,
                });
            }
            for (column, ch) in chars.into_iter().enumerate() {
                let cell = match ch {
                    'R' | 'X' => Cell::Occupied(Player::Red),
                    'Y' | 'O' => Cell::Occupied(Player::Yellow),
                    _ => Cell::Empty,
                };
                board.cells[row * columns + column] = cell;
            }
        }

        for column in 0..columns {
            let mut height = 0;
            for row in (0..rows).rev() {
                match board.get(row, column) {
                    Cell::Occupied(_) if height == rows - 1 - row => height += 1,
                    Cell::Occupied(_) => return Err(GameError::FloatingPiece { row, column }),
                    Cell::Empty => {}
                }
            }
            board.heights[column] = height;
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of pieces in a line needed to win.
    pub fn connect(&self) -> usize {
        self.connect
    }

    /// Index of the middle column (rounded down).
    pub fn center_column(&self) -> usize {
        self.columns / 2
    }

    /// Get the cell at a specific position
    /// Row 0 is the top
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.columns + col]
    }

    /// The most recently applied move still on the board.
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Number of moves applied through this board and not yet undone.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Check if a column can take another piece
    pub fn is_column_open(&self, col: usize) -> bool {
        col < self.columns && self.get(0, col) == Cell::Empty
    }

    /// Open columns in ascending order.
    pub fn legal_columns(&self) -> LegalColumns {
        let mask = (0..self.columns)
            .filter(|&col| self.is_column_open(col))
            .fold(0u64, |mask, col| mask | (1 << col));
        LegalColumns { mask }
    }

    /// Lowest empty row in a column.
    pub fn drop_row(&self, column: usize) -> Result<usize, GameError> {
        if !self.is_column_open(column) {
            return Err(GameError::InvalidColumn { column });
        }
        Ok(self.rows - 1 - self.heights[column])
    }

    /// Drop a piece for `player` into `column`, returns where it landed
    pub fn apply_move(&mut self, column: usize, player: Player) -> Result<Move, GameError> {
        let row = self.drop_row(column)?;
        self.cells[row * self.columns + column] = player.to_cell();
        self.heights[column] += 1;
        let mv = Move { row, column };
        self.moves.push(mv);
        Ok(mv)
    }

    /// Take back the most recent move. `mv` must be that move.
    pub fn undo_move(&mut self, mv: Move) -> Result<(), GameError> {
        let expected = self.last_move().ok_or(GameError::NoLastMove)?;
        if expected != mv {
            return Err(GameError::UndoOutOfOrder { expected, got: mv });
        }
        self.moves.pop();
        self.cells[mv.row * self.columns + mv.column] = Cell::Empty;
        self.heights[mv.column] -= 1;
        Ok(())
    }

    /// Apply a move that is undone when the returned guard is dropped.
    pub fn scoped_move(&mut self, column: usize, player: Player) -> Result<ScopedMove<'_>, GameError> {
        let mv = self.apply_move(column, player)?;
        Ok(ScopedMove { board: self, mv })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.legal_columns().is_empty()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.columns {
                let ch = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Occupied(player) => player.symbol(),
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Snapshot of the open columns, yielded lowest index first.
///
/// It does not borrow the board, so the search can mutate the board while
/// walking the columns that were open on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalColumns {
    mask: u64,
}

impl LegalColumns {
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn contains(&self, column: usize) -> bool {
        column < MAX_COLS && self.mask & (1 << column) != 0
    }
}

impl Iterator for LegalColumns {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.mask == 0 {
            return None;
        }
        let column = self.mask.trailing_zeros() as usize;
        self.mask &= self.mask - 1;
        Some(column)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.mask.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LegalColumns {}

/// A move held on the board for the lifetime of the guard.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl ScopedMove<'_> {
    pub fn applied(&self) -> Move {
        self.mv
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        let undone = self.board.undo_move(self.mv);
        debug_assert!(undone.is_ok(), "scoped move undone out of order: {undone:?}");
    }
}

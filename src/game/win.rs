use super::board::{Board, Move};
use super::player::Player;
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Tie,
}

/// Vertical, horizontal, diagonal up (/) and diagonal down (\), as (row, col)
/// steps. Row 0 is the top, so "up" is a negative row step.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 1), (1, 1)];

/// Decide the game from the most recently placed piece.
///
/// Only the lines through the last move are examined, so the cost does not
/// grow with the board. Returns `Ok(None)` while the game is still open.
pub fn winner_from_last_move(board: &Board) -> Result<Option<Outcome>, GameError> {
    let last = board.last_move().ok_or(GameError::NoLastMove)?;
    let player = board
        .get(last.row, last.column)
        .player()
        .ok_or(GameError::NoLastMove)?;

    if DIRECTIONS
        .iter()
        .any(|&(dr, dc)| completes_line(board, last, player, dr, dc))
    {
        return Ok(Some(Outcome::Win(player)));
    }

    if board.is_full() {
        Ok(Some(Outcome::Tie))
    } else {
        Ok(None)
    }
}

/// Check every window of `connect` cells along one direction that contains
/// `last`, clipping windows that leave the grid.
fn completes_line(board: &Board, last: Move, player: Player, dr: isize, dc: isize) -> bool {
    let n = board.connect() as isize;
    let rows = board.rows() as isize;
    let cols = board.columns() as isize;
    let (row, col) = (last.row as isize, last.column as isize);

    (0..n).any(|back| {
        let start_row = row - back * dr;
        let start_col = col - back * dc;
        let end_row = start_row + (n - 1) * dr;
        let end_col = start_col + (n - 1) * dc;
        let inside = |r: isize, c: isize| r >= 0 && r < rows && c >= 0 && c < cols;
        if !inside(start_row, start_col) || !inside(end_row, end_col) {
            return false;
        }
        (0..n).all(|i| {
            let r = (start_row + i * dr) as usize;
            let c = (start_col + i * dc) as usize;
            board.get(r, c).player() == Some(player)
        })
    })
}

impl Board {
    /// Outcome of the game after the last applied move.
    pub fn outcome(&self) -> Result<Option<Outcome>, GameError> {
        winner_from_last_move(self)
    }

    /// True when no further move can be played: the board is full or the last
    /// move completed a line. A board with no moves yet is never finished
    /// unless it is full.
    pub fn is_terminal(&self) -> bool {
        self.is_full() || matches!(self.outcome(), Ok(Some(_)))
    }
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Tie => None,
        }
    }
}

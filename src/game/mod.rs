//! Core Connect Four game logic: board with apply/undo, players, last-move
//! win detection, and the match session driven by the front end.

mod board;
mod player;
mod session;
mod win;

pub use board::{Board, Cell, LegalColumns, Move, ScopedMove, COLS, CONNECT, MAX_COLS, ROWS};
pub use player::Player;
pub use session::{Opponent, Session};
pub use win::{winner_from_last_move, Outcome};

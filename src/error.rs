use std::path::PathBuf;

use crate::game::Move;

/// Errors surfaced by the board, the win detector and the search.
///
/// None of these are retried internally. They indicate a caller that reached a
/// state normal play never produces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("column {column} is out of range or full")]
    InvalidColumn { column: usize },

    #[error("no move has been applied to the board yet")]
    NoLastMove,

    #[error("search invoked on a position with no legal moves")]
    EmptyBoardAtSearchRoot,

    #[error("search depth must be at least 1 to choose a move")]
    ZeroDepth,

    #[error("undo of {got:?} does not match the last applied move {expected:?}")]
    UndoOutOfOrder { expected: Move, got: Move },

    #[error("invalid board dimensions {rows}x{columns} for connect {connect}")]
    InvalidDimensions {
        rows: usize,
        columns: usize,
        connect: usize,
    },

    #[error("piece at row {row}, column {column} is not supported from below")]
    FloatingPiece { row: usize, column: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

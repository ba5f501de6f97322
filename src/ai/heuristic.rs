use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Player};

/// Search scores. Heuristic values stay far below [`super::WIN_SCORE`].
pub type Score = i64;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic {
    fn evaluate(&self, board: &Board, player: Player) -> Score;
}

const CENTER_WEIGHT: Score = 3;
const LINE_WEIGHT: Score = 100;
const OPEN_THREE_WEIGHT: Score = 5;
const OPEN_TWO_WEIGHT: Score = 2;

/// Row/column steps of the four window orientations.
const ORIENTATIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Tunable weights of the positional evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Award each own piece in the middle column.
    pub center_bonus: bool,
    /// Added for every window where the opponent is one piece short of a
    /// line. Must be negative.
    pub opponent_threat_penalty: Score,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            center_bonus: true,
            opponent_threat_penalty: -4,
        }
    }
}

/// Windowed threat evaluator used at the search horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Evaluator { weights }
    }

    pub fn weights(&self) -> EvalWeights {
        self.weights
    }

    /// Score `board` for `for_player`. Pure; never mutates the board.
    pub fn score(&self, board: &Board, for_player: Player) -> Score {
        let mut score = 0;

        if self.weights.center_bonus {
            let center = board.center_column();
            let own = (0..board.rows())
                .filter(|&row| board.get(row, center) == Cell::Occupied(for_player))
                .count();
            score += own as Score * CENTER_WEIGHT;
        }

        let n = board.connect() as isize;
        let rows = board.rows() as isize;
        let cols = board.columns() as isize;

        for &(dr, dc) in &ORIENTATIONS {
            for row in 0..rows {
                let end_row = row + (n - 1) * dr;
                if end_row < 0 || end_row >= rows {
                    continue;
                }
                for col in 0..cols {
                    let end_col = col + (n - 1) * dc;
                    if end_col >= cols {
                        continue;
                    }
                    let (mut own, mut opp, mut empty) = (0, 0, 0);
                    for i in 0..n {
                        let cell = board.get((row + i * dr) as usize, (col + i * dc) as usize);
                        match cell.player() {
                            Some(p) if p == for_player => own += 1,
                            Some(_) => opp += 1,
                            None => empty += 1,
                        }
                    }
                    score += self.score_window(own, opp, empty, board.connect());
                }
            }
        }

        score
    }

    fn score_window(&self, own: usize, opp: usize, empty: usize, n: usize) -> Score {
        if own == n {
            LINE_WEIGHT
        } else if own + 1 == n && empty == 1 {
            OPEN_THREE_WEIGHT
        } else if own + 2 == n && empty == 2 {
            OPEN_TWO_WEIGHT
        } else if opp + 1 == n && empty == 1 {
            self.weights.opponent_threat_penalty
        } else {
            0
        }
    }
}

impl Heuristic for Evaluator {
    fn evaluate(&self, board: &Board, player: Player) -> Score {
        self.score(board, player)
    }
}

use crate::error::GameError;
use crate::game::{winner_from_last_move, Board, Move, Outcome, Player};

use super::heuristic::{Evaluator, Heuristic, Score};

/// Score of a decided game. Heuristic values never come close to it.
pub const WIN_SCORE: Score = 100_000_000_000;

/// Result of a search: the move to play and its minimax value for the root
/// player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    /// Nodes visited, for diagnostics only.
    pub nodes: u64,
}

/// Depth-limited alpha-beta minimax over a mutable board.
///
/// The board is changed in place while searching and every move is taken
/// back through [`Board::scoped_move`], so the caller gets the board back
/// exactly as it was, whichever way the search returns.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine<H = Evaluator> {
    heuristic: H,
}

impl<H: Heuristic> SearchEngine<H> {
    pub fn new(heuristic: H) -> Self {
        SearchEngine { heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// Pick a move for `player`, who is the maximizing side.
    ///
    /// Unlike [`SearchEngine::search`] this always yields a move: finished
    /// positions and a zero depth are rejected up front.
    pub fn choose_move(
        &self,
        board: &mut Board,
        depth: usize,
        player: Player,
    ) -> Result<SearchResult, GameError> {
        if depth == 0 {
            return Err(GameError::ZeroDepth);
        }
        if board.is_terminal() {
            return Err(GameError::EmptyBoardAtSearchRoot);
        }

        let result = self.search(board, depth, player)?;
        if result.best_move.is_none() {
            return Err(GameError::EmptyBoardAtSearchRoot);
        }

        log::debug!(
            "{} depth {}: {:?} score {} ({} nodes)",
            player.name(),
            depth,
            result.best_move,
            result.score,
            result.nodes
        );
        Ok(result)
    }

    /// Run the raw search from `board` with `maximizing_player` to move.
    ///
    /// The move is `None` when the root itself is terminal or at the horizon.
    pub fn search(
        &self,
        board: &mut Board,
        depth: usize,
        maximizing_player: Player,
    ) -> Result<SearchResult, GameError> {
        let mut nodes = 0;
        let (best_move, score) = self.alphabeta(
            board,
            depth,
            Score::MIN,
            Score::MAX,
            true,
            maximizing_player,
            &mut nodes,
        )?;
        Ok(SearchResult {
            best_move,
            score,
            nodes,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &self,
        board: &mut Board,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        root: Player,
        nodes: &mut u64,
    ) -> Result<(Option<Move>, Score), GameError> {
        *nodes += 1;

        if depth != 0 && board.last_move().is_some() {
            match winner_from_last_move(board)? {
                Some(Outcome::Win(winner)) if winner == root => return Ok((None, WIN_SCORE)),
                Some(Outcome::Win(_)) => return Ok((None, -WIN_SCORE)),
                Some(Outcome::Tie) => return Ok((None, 0)),
                None => {}
            }
        }

        // The horizon trusts the heuristic alone, even when the last move
        // completed a line. Such a node scores through its line windows
        // rather than as WIN_SCORE.
        if depth == 0 {
            return Ok((None, self.heuristic.evaluate(board, root)));
        }

        let mover = if maximizing { root } else { root.other() };
        let mut best_move = None;
        let mut best = if maximizing { Score::MIN } else { Score::MAX };

        for column in board.legal_columns() {
            let mut child = board.scoped_move(column, mover)?;
            let mv = child.applied();
            let (_, score) =
                self.alphabeta(&mut child, depth - 1, alpha, beta, !maximizing, root, nodes)?;

            // Strict comparisons: the lowest column keeps ties.
            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }

        Ok((best_move, best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::EvalWeights;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EMPTY: &str = ".......";

    fn engine(penalty: Score) -> SearchEngine {
        SearchEngine::new(Evaluator::new(EvalWeights {
            center_bonus: true,
            opponent_threat_penalty: penalty,
        }))
    }

    /// Plain minimax without pruning, same tie-break and terminal rules.
    fn minimax(
        engine: &SearchEngine,
        board: &mut Board,
        depth: usize,
        maximizing: bool,
        root: Player,
    ) -> (Option<Move>, Score) {
        if depth != 0 && board.last_move().is_some() {
            match winner_from_last_move(board).unwrap() {
                Some(Outcome::Win(w)) => return (None, if w == root { WIN_SCORE } else { -WIN_SCORE }),
                Some(Outcome::Tie) => return (None, 0),
                None => {}
            }
        }
        if depth == 0 {
            return (None, engine.heuristic().evaluate(board, root));
        }

        let mover = if maximizing { root } else { root.other() };
        let mut best_move = None;
        let mut best = if maximizing { Score::MIN } else { Score::MAX };
        for column in board.legal_columns() {
            let mv = board.apply_move(column, mover).unwrap();
            let (_, score) = minimax(engine, board, depth - 1, !maximizing, root);
            board.undo_move(mv).unwrap();
            let better = if maximizing { score > best } else { score < best };
            if better {
                best = score;
                best_move = Some(mv);
            }
        }
        (best_move, best)
    }

    /// Random open position on a small connect-three board.
    fn random_small_board(rng: &mut StdRng) -> Option<Board> {
        let mut board = Board::with_connect(4, 4, 3).unwrap();
        let mut player = Player::Red;
        for _ in 0..rng.random_range(0..8) {
            let legal: Vec<_> = board.legal_columns().collect();
            let mv = board
                .apply_move(legal[rng.random_range(0..legal.len())], player)
                .unwrap();
            if board.outcome().unwrap().is_some() {
                board.undo_move(mv).unwrap();
                break;
            }
            player = player.other();
        }
        (!board.is_full()).then_some(board)
    }

    #[test]
    fn empty_board_depth_one_takes_center() {
        let mut board = Board::standard();
        let result = engine(-4).choose_move(&mut board, 1, Player::Red).unwrap();
        assert_eq!(result.best_move, Some(Move { row: 5, column: 3 }));
        assert_eq!(result.score, 3);
    }

    #[test]
    fn blocks_horizontal_threat() {
        let rows = [EMPTY, EMPTY, EMPTY, EMPTY, "Y.....Y", "RRR...Y"];
        for penalty in [-4, -10] {
            for depth in 2..=5 {
                let mut board = Board::from_rows(&rows, 4).unwrap();
                let result = engine(penalty).choose_move(&mut board, depth, Player::Yellow).unwrap();
                assert_eq!(
                    result.best_move,
                    Some(Move { row: 5, column: 3 }),
                    "depth {depth}, penalty {penalty}"
                );
            }
        }
    }

    #[test]
    fn takes_vertical_win() {
        let rows = [EMPTY, EMPTY, EMPTY, "Y......", "Y...R..", "Y.R.RR."];
        for depth in 2..=5 {
            let mut board = Board::from_rows(&rows, 4).unwrap();
            let result = engine(-4).choose_move(&mut board, depth, Player::Yellow).unwrap();
            assert_eq!(result.best_move, Some(Move { row: 2, column: 0 }));
            assert_eq!(result.score, WIN_SCORE);
        }
    }

    #[test]
    fn horizon_does_not_check_for_wins() {
        let rows = [EMPTY, EMPTY, EMPTY, "Y......", "Y...R..", "Y.R.RR."];
        let mut board = Board::from_rows(&rows, 4).unwrap();
        let result = engine(-4).choose_move(&mut board, 1, Player::Yellow).unwrap();
        // Still the winning column, but valued by the heuristic.
        assert_eq!(result.best_move, Some(Move { row: 2, column: 0 }));
        assert_eq!(result.score, 103);
    }

    #[test]
    fn loss_is_scored_negative() {
        // Red threatens two cells at once; Yellow cannot stop both.
        let rows = [EMPTY, EMPTY, EMPTY, EMPTY, ".YY....", ".RRR..."];
        let mut board = Board::from_rows(&rows, 4).unwrap();
        let result = engine(-4).choose_move(&mut board, 3, Player::Yellow).unwrap();
        assert_eq!(result.score, -WIN_SCORE);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn search_restores_board() {
        let rows = [EMPTY, EMPTY, "..Y....", "..RY...", ".RYR...", "RYRYR.."];
        let mut board = Board::from_rows(&rows, 4).unwrap();
        board.apply_move(6, Player::Yellow).unwrap();
        let before = board.clone();
        for depth in 1..=5 {
            engine(-10).choose_move(&mut board, depth, Player::Red).unwrap();
            assert_eq!(board, before);
        }
    }

    #[test]
    fn deterministic_choice() {
        let rows = [EMPTY, EMPTY, EMPTY, "...Y...", "..RR...", ".YRYR.."];
        let mut board = Board::from_rows(&rows, 4).unwrap();
        let first = engine(-4).choose_move(&mut board, 4, Player::Yellow).unwrap();
        for _ in 0..3 {
            let again = engine(-4).choose_move(&mut board, 4, Player::Yellow).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn alphabeta_matches_minimax() {
        let mut rng = StdRng::seed_from_u64(42);
        let engine = engine(-4);
        let mut checked = 0;
        while checked < 60 {
            let Some(mut board) = random_small_board(&mut rng) else {
                continue;
            };
            for depth in 1..=6 {
                for root in [Player::Red, Player::Yellow] {
                    let pruned = engine.search(&mut board, depth, root).unwrap();
                    let (best_move, score) = minimax(&engine, &mut board, depth, true, root);
                    assert_eq!(
                        (pruned.best_move, pruned.score),
                        (best_move, score),
                        "depth {depth}, root {root:?}\n{board}"
                    );
                }
            }
            checked += 1;
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let mut board = Board::standard();
        let result = engine(-4).choose_move(&mut board, 4, Player::Red).unwrap();
        // An unpruned depth-4 search from the empty board visits 1 + 7 + 49 + 343 + 2401.
        assert!(result.nodes < 2801, "visited {} nodes", result.nodes);
    }

    #[test]
    fn rejects_finished_positions() {
        let mut board = Board::from_rows(&["RR.", "YYR", "RYY"], 3).unwrap();
        board.apply_move(2, Player::Red).unwrap();
        assert_eq!(
            engine(-4).choose_move(&mut board, 3, Player::Yellow),
            Err(GameError::EmptyBoardAtSearchRoot)
        );

        let mut board = Board::from_rows(&["RRY.", "YYRR", "RRYY", "YYRR"], 4).unwrap();
        board.apply_move(3, Player::Yellow).unwrap();
        assert!(board.is_full());
        assert_eq!(
            engine(-4).choose_move(&mut board, 2, Player::Red),
            Err(GameError::EmptyBoardAtSearchRoot)
        );
    }

    #[test]
    fn rejects_zero_depth() {
        let mut board = Board::standard();
        assert_eq!(
            engine(-4).choose_move(&mut board, 0, Player::Red),
            Err(GameError::ZeroDepth)
        );
        // The raw search evaluates the horizon without choosing.
        let result = engine(-4).search(&mut board, 0, Player::Red).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn terminal_root_returns_no_move() {
        let mut board = Board::from_rows(&[EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, "RRR...."], 4).unwrap();
        board.apply_move(3, Player::Red).unwrap();
        let result = engine(-4).search(&mut board, 3, Player::Yellow).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -WIN_SCORE);
        assert_eq!(result.nodes, 1);
    }
}

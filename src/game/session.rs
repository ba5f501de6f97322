use super::board::{Board, Move};
use super::player::Player;
use super::win::Outcome;
use crate::ai::{Agent, Difficulty, SearchAgent};
use crate::config::AppConfig;
use crate::error::GameError;

/// Who plays Yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Human,
    Computer(Difficulty),
}

/// A series of games between Red and an opponent with a running tally.
///
/// The human always plays Red. Against the computer, Yellow's moves come from
/// [`Session::play_computer`]. The side that starts alternates after every
/// finished game.
#[derive(Debug, Clone)]
pub struct Session {
    config: AppConfig,
    board: Board,
    opponent: Opponent,
    current_player: Player,
    starting_player: Player,
    red_score: u32,
    yellow_score: u32,
    outcome: Option<Outcome>,
}

impl Session {
    /// Start a fresh series; Red moves first.
    pub fn new(config: AppConfig, opponent: Opponent) -> Result<Self, GameError> {
        let board = config.board.new_board()?;
        Ok(Session {
            config,
            board,
            opponent,
            current_player: Player::Red,
            starting_player: Player::Red,
            red_score: 0,
            yellow_score: 0,
            outcome: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Games won by `player` in this series.
    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::Red => self.red_score,
            Player::Yellow => self.yellow_score,
        }
    }

    /// Drop a piece for the side to move.
    pub fn play_column(&mut self, column: usize) -> Result<Move, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let mv = self.board.apply_move(column, self.current_player)?;
        self.outcome = self.board.outcome()?;

        match self.outcome {
            Some(outcome) => {
                match outcome.winner() {
                    Some(Player::Red) => self.red_score += 1,
                    Some(Player::Yellow) => self.yellow_score += 1,
                    None => {}
                }
                self.starting_player = self.starting_player.other();
            }
            None => self.current_player = self.current_player.other(),
        }

        Ok(mv)
    }

    /// True when the computer owes the next move.
    pub fn computer_to_move(&self) -> bool {
        matches!(self.opponent, Opponent::Computer(_))
            && self.current_player == Player::Yellow
            && !self.is_over()
    }

    /// Let the computer choose and play Yellow's move. Returns `None` when it
    /// is not the computer's turn.
    pub fn play_computer(&mut self) -> Result<Option<Move>, GameError> {
        let Opponent::Computer(difficulty) = self.opponent else {
            return Ok(None);
        };
        if !self.computer_to_move() {
            return Ok(None);
        }

        let mut agent =
            SearchAgent::for_difficulty(difficulty, &self.config.difficulty, self.config.eval);
        let column = agent.select_action(&mut self.board, Player::Yellow)?;
        self.play_column(column).map(Some)
    }

    /// Clear the board and keep the tally; the next starting player begins.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.board = self.config.board.new_board()?;
        self.current_player = self.starting_player;
        self.outcome = None;
        Ok(())
    }

    /// Reset the series against a (possibly different) opponent.
    pub fn new_game(&mut self, opponent: Opponent) -> Result<(), GameError> {
        self.opponent = opponent;
        self.starting_player = Player::Red;
        self.red_score = 0;
        self.yellow_score = 0;
        self.restart()
    }
}

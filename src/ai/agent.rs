use crate::error::GameError;
use crate::game::{Board, Player};

use super::difficulty::{Difficulty, DifficultyConfig};
use super::heuristic::{EvalWeights, Evaluator};
use super::search::{SearchEngine, SearchResult};

/// Universal interface for anything that picks moves.
pub trait Agent {
    /// Select a column for `player`. The board is handed back unchanged.
    fn select_action(&mut self, board: &mut Board, player: Player) -> Result<usize, GameError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}

/// Agent backed by the alpha-beta search at a fixed depth.
#[derive(Debug, Clone)]
pub struct SearchAgent {
    depth: usize,
    engine: SearchEngine,
    name: String,
    last_result: Option<SearchResult>,
}

impl SearchAgent {
    pub fn new(depth: usize, weights: EvalWeights) -> Self {
        SearchAgent {
            depth,
            engine: SearchEngine::new(Evaluator::new(weights)),
            name: format!("Alpha-beta (depth {depth})"),
            last_result: None,
        }
    }

    /// Agent configured for a difficulty tier.
    pub fn for_difficulty(
        difficulty: Difficulty,
        tiers: &DifficultyConfig,
        base: EvalWeights,
    ) -> Self {
        let depth = tiers.settings(difficulty).depth;
        SearchAgent {
            name: format!("Computer ({difficulty})"),
            ..Self::new(depth, tiers.weights(difficulty, base))
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Result of the most recent search, if any.
    pub fn last_result(&self) -> Option<SearchResult> {
        self.last_result
    }
}

impl Agent for SearchAgent {
    fn select_action(&mut self, board: &mut Board, player: Player) -> Result<usize, GameError> {
        let result = self.engine.choose_move(board, self.depth, player)?;
        self.last_result = Some(result);
        result
            .best_move
            .map(|mv| mv.column)
            .ok_or(GameError::EmptyBoardAtSearchRoot)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

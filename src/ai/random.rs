use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::GameError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// An agent that selects uniformly at random from legal columns.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for simulations and tests.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &mut Board, _player: Player) -> Result<usize, GameError> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return Err(GameError::EmptyBoardAtSearchRoot);
        }
        let idx = self.rng.random_range(0..legal.len());
        legal.into_iter().nth(idx).ok_or(GameError::EmptyBoardAtSearchRoot)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

//! Computer opponent: positional evaluator, alpha-beta search, difficulty
//! tiers and the agents built on them.

mod agent;
mod difficulty;
mod heuristic;
mod random;
mod search;

pub use agent::{Agent, SearchAgent};
pub use difficulty::{Difficulty, DifficultyConfig, TierSettings};
pub use heuristic::{EvalWeights, Evaluator, Heuristic, Score};
pub use random::RandomAgent;
pub use search::{SearchEngine, SearchResult, WIN_SCORE};

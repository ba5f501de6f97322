use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ai::{Difficulty, DifficultyConfig, EvalWeights};
use crate::error::{ConfigError, GameError};
use crate::game::{Board, COLS, ROWS};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub eval: EvalWeights,
    pub difficulty: DifficultyConfig,
    pub ui: UiConfig,
}

/// Grid dimensions. Four in a line always wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: ROWS,
            columns: COLS,
        }
    }
}

impl BoardConfig {
    pub fn new_board(&self) -> Result<Board, GameError> {
        Board::new(self.rows, self.columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before the computer's move is shown.
    pub think_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { think_delay_ms: 500 }
    }
}

impl UiConfig {
    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = self.board.new_board() {
            return Err(ConfigError::Validation(format!("board: {e}")));
        }
        if self.eval.opponent_threat_penalty >= 0 {
            return Err(ConfigError::Validation(
                "eval.opponent_threat_penalty must be < 0".into(),
            ));
        }
        for tier in Difficulty::ALL {
            if self.difficulty.settings(tier).depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "difficulty.{}.depth must be >= 1",
                    tier.name()
                )));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use super::heuristic::EvalWeights;

/// Strength tiers of the computer opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Look up a tier by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Difficulty> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`Difficulty::from_name`], but unknown names fall back to
    /// [`Difficulty::Easy`].
    pub fn parse_or_default(name: &str) -> Difficulty {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("unknown difficulty '{name}', falling back to easy");
            Difficulty::Easy
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// Search depth and evaluator switches for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSettings {
    pub depth: usize,
    pub center_bonus: bool,
}

/// Tier table, loadable from the `[difficulty]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub beginner: TierSettings,
    pub easy: TierSettings,
    pub medium: TierSettings,
    pub hard: TierSettings,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        DifficultyConfig {
            beginner: TierSettings {
                depth: 1,
                center_bonus: false,
            },
            easy: TierSettings {
                depth: 2,
                center_bonus: true,
            },
            medium: TierSettings {
                depth: 4,
                center_bonus: true,
            },
            hard: TierSettings {
                depth: 5,
                center_bonus: true,
            },
        }
    }
}

impl DifficultyConfig {
    pub fn settings(&self, difficulty: Difficulty) -> TierSettings {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Evaluator weights for a tier. A tier can only switch the center bonus
    /// off, never on against the base weights.
    pub fn weights(&self, difficulty: Difficulty, base: EvalWeights) -> EvalWeights {
        EvalWeights {
            center_bonus: base.center_bonus && self.settings(difficulty).center_bonus,
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depths() {
        let config = DifficultyConfig::default();
        let depths: Vec<_> = Difficulty::ALL
            .iter()
            .map(|&d| config.settings(d).depth)
            .collect();
        assert_eq!(depths, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Difficulty::from_name("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_name(" Medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_name("nightmare"), None);
    }

    #[test]
    fn test_unknown_tier_falls_back_to_depth_two() {
        let tier = Difficulty::parse_or_default("nightmare");
        assert_eq!(tier, Difficulty::Easy);
        assert_eq!(DifficultyConfig::default().settings(tier).depth, 2);
    }

    #[test]
    fn test_beginner_disables_center_bonus() {
        let config = DifficultyConfig::default();
        let base = EvalWeights::default();
        assert!(!config.weights(Difficulty::Beginner, base).center_bonus);
        assert!(config.weights(Difficulty::Hard, base).center_bonus);

        let no_center = EvalWeights {
            center_bonus: false,
            ..base
        };
        assert!(!config.weights(Difficulty::Hard, no_center).center_bonus);
    }

    #[test]
    fn test_display_is_title_case() {
        assert_eq!(Difficulty::Beginner.to_string(), "Beginner");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }
}

//! Difficulty profiles: named, immutable bundles of tuning constants.
//!
//! A profile is resolved once per game and passed explicitly into every decision call.

use std::fmt;

use serde::{Deserialize, Serialize};
use yb_core::{Config, ProfileOverride};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Resolve a difficulty key. Unknown keys resolve to `Medium`.
    pub fn from_key(key: &str) -> Difficulty {
        match key.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Built-in profile for this difficulty.
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                difficulty: self,
                simulations: 80,
                bonus_weight: 0.6,
                rarity_weight: 0.5,
                zero_penalty: 0.5,
                risk_bias: 0.0,
                mistake_chance: 0.18,
                hold_greed_threshold: 24.0,
                chase_yahtzee: false,
            },
            Difficulty::Medium => DifficultyProfile {
                difficulty: self,
                simulations: 200,
                bonus_weight: 1.2,
                rarity_weight: 1.0,
                zero_penalty: 1.0,
                risk_bias: 0.3,
                mistake_chance: 0.06,
                hold_greed_threshold: 30.0,
                chase_yahtzee: false,
            },
            Difficulty::Hard => DifficultyProfile {
                difficulty: self,
                simulations: 420,
                bonus_weight: 1.4,
                rarity_weight: 1.2,
                zero_penalty: 1.4,
                risk_bias: 0.5,
                mistake_chance: 0.01,
                hold_greed_threshold: 36.0,
                chase_yahtzee: true,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tuning constants for one opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Monte Carlo rollouts per candidate keep-mask.
    pub simulations: u32,
    /// Scales the upper-bonus incentives.
    pub bonus_weight: f64,
    /// Scales the bonus for banking Yatzi, long straight and full house.
    pub rarity_weight: f64,
    /// Scales the penalty for scoring zero in a lower category.
    pub zero_penalty: f64,
    /// 0 = neutral; positive values reward high dice sums and near-bonus upper play.
    pub risk_bias: f64,
    /// Probability of a deliberate per-score misjudgement.
    pub mistake_chance: f64,
    /// Hold every die once the best available adjusted score reaches this.
    pub hold_greed_threshold: f64,
    /// Extra weight on Yatzi late in the game.
    #[serde(default)]
    pub chase_yahtzee: bool,
}

impl DifficultyProfile {
    /// Built-in profile for `key`; unknown keys resolve to medium.
    pub fn resolve(key: &str) -> DifficultyProfile {
        Difficulty::from_key(key).profile()
    }

    /// Built-in profile for `key` with the matching `profiles.<key>` override applied.
    pub fn from_config(cfg: &Config, key: &str) -> DifficultyProfile {
        let base = Self::resolve(key);
        match cfg.profiles.get(base.difficulty.key()) {
            Some(o) => base.with_override(o),
            None => base,
        }
    }

    pub fn with_override(mut self, o: &ProfileOverride) -> DifficultyProfile {
        if let Some(v) = o.simulations {
            self.simulations = v;
        }
        if let Some(v) = o.bonus_weight {
            self.bonus_weight = v;
        }
        if let Some(v) = o.rarity_weight {
            self.rarity_weight = v;
        }
        if let Some(v) = o.zero_penalty {
            self.zero_penalty = v;
        }
        if let Some(v) = o.risk_bias {
            self.risk_bias = v;
        }
        if let Some(v) = o.mistake_chance {
            self.mistake_chance = v;
        }
        if let Some(v) = o.hold_greed_threshold {
            self.hold_greed_threshold = v;
        }
        if let Some(v) = o.chase_yahtzee {
            self.chase_yahtzee = v;
        }
        self
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Medium.profile()
    }
}

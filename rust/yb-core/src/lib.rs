//! yb-core: Game rules, scoring, score sheet, turn sequencing, chance sources and
//! configuration for the 13-category Yatzi variant.

pub mod category;
pub mod chance;
pub mod config;
pub mod dice;
pub mod scoring;
pub mod state;
pub mod turn;

pub use category::{Category, ParseCategoryError, CATEGORY_NAMES, NUM_CATEGORIES, NUM_UPPER};
pub use chance::{roll5, splitmix64, ChanceError, ChanceSource, RngChance, ScriptedChance};
pub use config::{Config, ConfigError, ProfileOverride};
pub use dice::{dice_sum, face_counts, is_valid_dice, reroll, Dice, KeepMask, NUM_DICE};
pub use scoring::{
    scores_for_dice, CategoryScorer, StandardScorer, FULL_HOUSE_SCORE, LONG_STRAIGHT_SCORE,
    SHORT_STRAIGHT_SCORE, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YATZI_SCORE,
};
pub use state::{ScoreError, ScoreState};
pub use turn::{Turn, TurnError, TurnPhase, MAX_REROLLS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}

#[cfg(test)]
mod chance_tests;
#[cfg(test)]
mod scoring_tests;
#[cfg(test)]
mod state_tests;
#[cfg(test)]
mod turn_tests;

//! Yatzi opponent decision engine.
//!
//! Two questions per turn, both answered from scratch on every call:
//! - `Engine::decide_keep`: which dice to hold before a reroll (Monte Carlo over a curated
//!   candidate set, with greed-based early holds and difficulty-scaled mistakes)
//! - `Engine::choose_category`: where to score the final hand (strategy-adjusted ranking with
//!   a potential-loss fallback)
//!
//! Strength is set by an explicit `DifficultyProfile` passed into each call.

pub mod candidates;
pub mod difficulty;
pub mod engine;
pub mod evaluator;
pub mod heuristic;

pub use candidates::candidate_masks;
pub use difficulty::{Difficulty, DifficultyProfile};
pub use engine::{
    CategoryChoice, DecisionError, Engine, EngineConfig, EngineError, KeepDecision, KeepOutcome,
    KeepStats,
};
pub use evaluator::Evaluator;
pub use heuristic::{potential_loss, ScoringPurpose, StrategyScorer};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod engine_tests;

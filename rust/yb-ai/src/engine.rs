//! Decision API: which dice to keep, and which category to score.
//!
//! The engine is stateless between calls. Everything a decision depends on (dice, sheet,
//! profile, chance stream) is passed in, so a fixed chance stream reproduces every choice.

use serde::Serialize;
use thiserror::Error;
use yb_core::{
    CategoryScorer, Category, ChanceError, ChanceSource, Dice, KeepMask, ScoreState,
    StandardScorer, MAX_REROLLS,
};

use crate::candidates::candidate_masks;
use crate::difficulty::DifficultyProfile;
use crate::evaluator::Evaluator;
use crate::heuristic::{potential_loss, ScoringPurpose, StrategyScorer};

/// Dampening holds when the current hand is within this of the greed threshold.
const DAMPEN_MARGIN: f64 = 8.0;
/// ...and the best reroll does not beat holding by at least this much.
const DAMPEN_GAIN: f64 = 5.0;
/// Fraction of `mistake_chance` applied to the whole keep decision.
const KEEP_MISTAKE_SCALE: f64 = 0.6;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct EngineConfig {
    /// Ceiling on `simulations × candidates` for one keep decision.
    pub max_rollouts_per_decision: u32,
    /// Evaluate candidates on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rollouts_per_decision: 16_000,
            parallel: false,
        }
    }
}

impl From<&yb_core::config::EngineSection> for EngineConfig {
    fn from(s: &yb_core::config::EngineSection) -> Self {
        Self {
            max_rollouts_per_decision: s.max_rollouts_per_decision,
            parallel: s.parallel,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid config: {msg}")]
    InvalidConfig { msg: &'static str },
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("no open category left to score")]
    NoOpenCategory,
    #[error(transparent)]
    Chance(#[from] ChanceError),
}

/// How a keep decision was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepOutcome {
    /// No rerolls left.
    FinalRoll,
    /// Current hand already met the greed threshold.
    EarlyHold,
    /// Best candidate from the Monte Carlo search.
    Searched,
    /// Search result overridden by holding a nearly-good-enough hand.
    Dampened,
    /// Random candidate substituted as a deliberate mistake.
    Mistake,
}

impl KeepOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            KeepOutcome::FinalRoll => "final_roll",
            KeepOutcome::EarlyHold => "early_hold",
            KeepOutcome::Searched => "searched",
            KeepOutcome::Dampened => "dampened",
            KeepOutcome::Mistake => "mistake",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct KeepStats {
    pub candidates: usize,
    pub simulations_per_candidate: u32,
    pub rollouts: u64,
    pub current_best: Option<f64>,
    pub best_ev: Option<f64>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct KeepDecision {
    pub mask: KeepMask,
    pub outcome: KeepOutcome,
    pub stats: KeepStats,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CategoryChoice {
    pub category: Category,
    /// Raw score of `category` for the hand.
    pub score: i32,
    /// Ranking value that won the choice. Never a sheet score.
    pub rank_value: f64,
    /// True when every open category ranked negative and the loss table decided.
    pub fallback: bool,
}

pub struct Engine<S = StandardScorer> {
    cfg: EngineConfig,
    scorer: S,
}

impl Engine<StandardScorer> {
    pub fn new(cfg: EngineConfig) -> Result<Self, EngineError> {
        Self::with_scorer(cfg, StandardScorer)
    }
}

impl<S: CategoryScorer> Engine<S> {
    pub fn with_scorer(cfg: EngineConfig, scorer: S) -> Result<Self, EngineError> {
        if cfg.max_rollouts_per_decision < 1 {
            return Err(EngineError::InvalidConfig {
                msg: "max_rollouts_per_decision must be >= 1",
            });
        }
        Ok(Self { cfg, scorer })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Per-candidate rollouts after applying the decision ceiling (at least 1).
    pub fn simulations_for(&self, profile: &DifficultyProfile, candidates: usize) -> u32 {
        let wanted = profile.simulations.max(1);
        let n = candidates.max(1) as u64;
        if wanted as u64 * n <= self.cfg.max_rollouts_per_decision as u64 {
            wanted
        } else {
            ((self.cfg.max_rollouts_per_decision as u64 / n) as u32).max(1)
        }
    }

    /// Keep-mask for the current hand. `roll_index` is 0 after the first roll.
    pub fn decide_keep(
        &self,
        dice: &Dice,
        state: &ScoreState,
        roll_index: u8,
        profile: &DifficultyProfile,
        chance: &mut dyn ChanceSource,
    ) -> Result<KeepMask, DecisionError> {
        Ok(self
            .decide_keep_detailed(dice, state, roll_index, profile, chance)?
            .mask)
    }

    pub fn decide_keep_detailed(
        &self,
        dice: &Dice,
        state: &ScoreState,
        roll_index: u8,
        profile: &DifficultyProfile,
        chance: &mut dyn ChanceSource,
    ) -> Result<KeepDecision, DecisionError> {
        debug_assert!(yb_core::is_valid_dice(dice), "dice out of range: {dice:?}");
        let mut stats = KeepStats::default();
        if roll_index >= MAX_REROLLS {
            return Ok(KeepDecision {
                mask: KeepMask::ALL,
                outcome: KeepOutcome::FinalRoll,
                stats,
            });
        }
        if state.is_complete() {
            return Err(DecisionError::NoOpenCategory);
        }

        let strategy = StrategyScorer::new(state, profile);
        let current_best = strategy
            .best_over_categories(&self.scorer, dice, ScoringPurpose::Lookahead, chance)?
            .ok_or(DecisionError::NoOpenCategory)?;
        stats.current_best = Some(current_best);

        let threshold = profile.hold_greed_threshold;
        if current_best >= threshold {
            return Ok(KeepDecision {
                mask: KeepMask::ALL,
                outcome: KeepOutcome::EarlyHold,
                stats,
            });
        }

        let candidates = candidate_masks(dice);
        let rolls_remaining = MAX_REROLLS - roll_index;
        let sims = self.simulations_for(profile, candidates.len());
        let evaluator = Evaluator::new(&self.scorer, strategy);
        let evs = if self.cfg.parallel {
            evaluator.evaluate_parallel(&candidates, dice, rolls_remaining, sims, chance)?
        } else {
            evaluator.evaluate_serial(&candidates, dice, rolls_remaining, sims, chance)?
        };
        stats.candidates = candidates.len();
        stats.simulations_per_candidate = sims;
        stats.rollouts = sims as u64 * candidates.len() as u64;

        let mut best_idx = 0usize;
        let mut best_ev = f64::NEG_INFINITY;
        for (i, &ev) in evs.iter().enumerate() {
            if ev > best_ev {
                best_ev = ev;
                best_idx = i;
            }
        }
        stats.best_ev = Some(best_ev);

        let mut mask = candidates[best_idx];
        let mut outcome = KeepOutcome::Searched;

        if current_best >= threshold - DAMPEN_MARGIN && best_ev < current_best + DAMPEN_GAIN {
            mask = KeepMask::ALL;
            outcome = KeepOutcome::Dampened;
        }

        let keep_mistake = profile.mistake_chance * KEEP_MISTAKE_SCALE;
        if keep_mistake > 0.0 && chance.unit()? < keep_mistake {
            let idx = ((chance.unit()? * candidates.len() as f64) as usize).min(candidates.len() - 1);
            mask = candidates[idx];
            outcome = KeepOutcome::Mistake;
        }

        Ok(KeepDecision {
            mask,
            outcome,
            stats,
        })
    }

    /// Category to score the final hand in. The returned score is the raw scorer value.
    pub fn choose_category(
        &self,
        dice: &Dice,
        state: &ScoreState,
        profile: &DifficultyProfile,
        chance: &mut dyn ChanceSource,
    ) -> Result<CategoryChoice, DecisionError> {
        debug_assert!(yb_core::is_valid_dice(dice), "dice out of range: {dice:?}");
        let strategy = StrategyScorer::new(state, profile);

        let mut best: Option<CategoryChoice> = None;
        let mut fallback: Option<(Category, i32, f64)> = None;
        for c in state.open() {
            let raw = self.scorer.score(c, dice);
            let v = strategy.adjust(c, raw, dice, ScoringPurpose::Selection, chance)?;
            if v >= 0.0 && best.map_or(true, |b| v > b.rank_value) {
                best = Some(CategoryChoice {
                    category: c,
                    score: raw,
                    rank_value: v,
                    fallback: false,
                });
            }
            if fallback.map_or(true, |(f, _, _)| potential_loss(c) < potential_loss(f)) {
                fallback = Some((c, raw, v));
            }
        }

        match (best, fallback) {
            (Some(choice), _) => Ok(choice),
            (None, Some((category, score, rank_value))) => Ok(CategoryChoice {
                category,
                score,
                rank_value,
                fallback: true,
            }),
            (None, None) => Err(DecisionError::NoOpenCategory),
        }
    }
}

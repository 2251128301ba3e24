//! Strategy-adjusted scoring: raw category scores turned into ranking values.
//!
//! Adjusted values only order choices; they are never written to a score sheet.

use yb_core::{
    dice_sum, Category, ChanceError, ChanceSource, CategoryScorer, Dice, ScoreState,
    FULL_HOUSE_SCORE, LONG_STRAIGHT_SCORE, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YATZI_SCORE,
};

use crate::difficulty::DifficultyProfile;

/// Projected upper total at which a near-miss still earns a bonus incentive.
const NEAR_BONUS_PROJECTION: i32 = 57;
/// Chase-Yatzi extra applies once this many categories (or fewer) are open.
const CHASE_OPEN_LIMIT: usize = 4;
const CHANCE_DISCOURAGEMENT: f64 = 3.0;

/// Whether a value feeds a rollout leaf or the final category pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringPurpose {
    Lookahead,
    Selection,
}

/// Adjusts raw scores for one score sheet under one profile.
///
/// Everything that depends only on the sheet is computed once in `new`, so a rollout leaf
/// costs a pass over the open categories and nothing more.
#[derive(Clone, Copy, Debug)]
pub struct StrategyScorer<'a> {
    state: &'a ScoreState,
    profile: &'a DifficultyProfile,
    upper_sum: i32,
    open_upper_par: i32,
    open_count: usize,
}

impl<'a> StrategyScorer<'a> {
    pub fn new(state: &'a ScoreState, profile: &'a DifficultyProfile) -> Self {
        let open_upper_par = Category::UPPER
            .iter()
            .filter(|c| !state.is_used(**c))
            .filter_map(|c| c.upper_par())
            .sum();
        Self {
            state,
            profile,
            upper_sum: state.upper_sum(),
            open_upper_par,
            open_count: state.open_count(),
        }
    }

    /// Every adjustment except mistake noise.
    pub fn base_adjust(
        &self,
        category: Category,
        raw: i32,
        dice: &Dice,
        purpose: ScoringPurpose,
    ) -> f64 {
        let p = self.profile;
        let sum = dice_sum(dice);
        let mut value = raw as f64;

        if let Some(expected) = category.upper_par() {
            let others = self.open_upper_par - if self.state.is_used(category) { 0 } else { expected };
            let projected = self.upper_sum + raw + others;

            value += if raw >= expected {
                (raw - expected) as f64 * (0.5 + 0.2 * p.risk_bias)
            } else if projected < UPPER_BONUS_THRESHOLD {
                -((expected - raw) as f64) * (0.8 + 0.3 * (1.0 - p.risk_bias))
            } else {
                -((expected - raw) as f64) * 0.2
            };

            let bonus = UPPER_BONUS as f64 * p.bonus_weight;
            if self.upper_sum < UPPER_BONUS_THRESHOLD
                && self.upper_sum + raw >= UPPER_BONUS_THRESHOLD
            {
                value += bonus * 0.5;
            } else if p.risk_bias > 0.0 && projected >= NEAR_BONUS_PROJECTION {
                value += bonus * 0.15;
            }
        }

        match category {
            Category::Yatzi if raw == YATZI_SCORE => {
                value += 15.0 * p.rarity_weight;
                if p.chase_yahtzee && self.open_count <= CHASE_OPEN_LIMIT {
                    value += 5.0;
                }
            }
            Category::LongStraight if raw == LONG_STRAIGHT_SCORE => {
                value += 10.0 * p.rarity_weight;
            }
            Category::FullHouse if raw == FULL_HOUSE_SCORE => {
                value += 5.0 * p.rarity_weight;
            }
            _ => {}
        }

        if raw == 0 {
            value -= zero_weight(category) * p.zero_penalty;
        }

        if category == Category::Chance {
            value -= CHANCE_DISCOURAGEMENT;
            if purpose == ScoringPurpose::Selection {
                value += (sum - 20) as f64 * 0.12;
            }
        }

        value + (sum - 18) as f64 * 0.05 * p.risk_bias
    }

    /// Full adjustment including mistake noise. Draws from `chance` only when the profile
    /// allows mistakes.
    pub fn adjust(
        &self,
        category: Category,
        raw: i32,
        dice: &Dice,
        purpose: ScoringPurpose,
        chance: &mut dyn ChanceSource,
    ) -> Result<f64, ChanceError> {
        let value = self.base_adjust(category, raw, dice, purpose);
        Ok(value - self.mistake_noise(chance)?)
    }

    /// Maximum adjusted value over the open categories, or `None` if the sheet is full.
    pub fn best_over_categories<S: CategoryScorer + ?Sized>(
        &self,
        scorer: &S,
        dice: &Dice,
        purpose: ScoringPurpose,
        chance: &mut dyn ChanceSource,
    ) -> Result<Option<f64>, ChanceError> {
        let mut best: Option<f64> = None;
        for c in self.state.open() {
            let v = self.adjust(c, scorer.score(c, dice), dice, purpose, chance)?;
            if best.map_or(true, |b| v > b) {
                best = Some(v);
            }
        }
        Ok(best)
    }

    fn mistake_noise(&self, chance: &mut dyn ChanceSource) -> Result<f64, ChanceError> {
        if self.profile.mistake_chance <= 0.0 {
            return Ok(0.0);
        }
        if chance.unit()? < self.profile.mistake_chance {
            Ok(3.0 + 4.0 * chance.unit()?)
        } else {
            Ok(0.0)
        }
    }
}

/// Zero-score penalty weight.
pub fn zero_weight(category: Category) -> f64 {
    match category {
        Category::Yatzi => 8.0,
        Category::LongStraight => 6.0,
        Category::ShortStraight => 4.0,
        Category::FullHouse => 3.0,
        Category::FourOfAKind => 2.0,
        Category::ThreeOfAKind | Category::Chance => 1.0,
        _ => 0.0,
    }
}

/// Static loss of scratching `category`, used when every open category ranks negative.
pub fn potential_loss(category: Category) -> i32 {
    match category {
        Category::Yatzi => 50,
        Category::LongStraight => 40,
        Category::ShortStraight => 30,
        Category::FullHouse => 25,
        Category::FourOfAKind | Category::Chance => 20,
        Category::ThreeOfAKind => 15,
        upper => upper.upper_par().unwrap_or(0),
    }
}

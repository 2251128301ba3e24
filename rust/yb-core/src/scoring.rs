//! Category scoring rules.
//!
//! Scores returned here are **raw** category scores; the upper bonus is applied by
//! [`crate::ScoreState::record`], never here.

use crate::category::{Category, NUM_CATEGORIES};
use crate::dice::{dice_sum, face_counts, Dice};

pub const UPPER_BONUS_THRESHOLD: i32 = 63;
pub const UPPER_BONUS: i32 = 35;

pub const FULL_HOUSE_SCORE: i32 = 25;
pub const SHORT_STRAIGHT_SCORE: i32 = 30;
pub const LONG_STRAIGHT_SCORE: i32 = 40;
pub const YATZI_SCORE: i32 = 50;

/// Pure per-category scoring rule.
///
/// The decision engine only ever consumes scores through this trait, so variant rule sets
/// can be plugged in without touching the search.
pub trait CategoryScorer: Sync {
    fn score(&self, category: Category, dice: &Dice) -> i32;
}

/// Standard rules: 3/4-of-a-kind and Chance score the dice sum, fixed scores for full house
/// (exactly 3+2), straights (any 4-run / 5-run) and Yatzi.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl CategoryScorer for StandardScorer {
    fn score(&self, category: Category, dice: &Dice) -> i32 {
        let counts = face_counts(dice);
        match category {
            Category::Ones
            | Category::Twos
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixes => {
                let face = category.index() + 1;
                counts[face] as i32 * face as i32
            }
            Category::ThreeOfAKind => {
                if counts.iter().any(|&c| c >= 3) {
                    dice_sum(dice)
                } else {
                    0
                }
            }
            Category::FourOfAKind => {
                if counts.iter().any(|&c| c >= 4) {
                    dice_sum(dice)
                } else {
                    0
                }
            }
            Category::FullHouse => {
                let has3 = counts.iter().any(|&c| c == 3);
                let has2 = counts.iter().any(|&c| c == 2);
                if has3 && has2 {
                    FULL_HOUSE_SCORE
                } else {
                    0
                }
            }
            Category::ShortStraight => {
                if longest_run(&counts) >= 4 {
                    SHORT_STRAIGHT_SCORE
                } else {
                    0
                }
            }
            Category::LongStraight => {
                if longest_run(&counts) >= 5 {
                    LONG_STRAIGHT_SCORE
                } else {
                    0
                }
            }
            Category::Yatzi => {
                if counts.iter().any(|&c| c == 5) {
                    YATZI_SCORE
                } else {
                    0
                }
            }
            Category::Chance => dice_sum(dice),
        }
    }
}

fn longest_run(counts: &[u8; 7]) -> usize {
    let mut best = 0usize;
    let mut cur = 0usize;
    for &c in &counts[1..] {
        if c > 0 {
            cur += 1;
            best = best.max(cur);
        } else {
            cur = 0;
        }
    }
    best
}

/// Raw scores for every category, in index order.
pub fn scores_for_dice(scorer: &dyn CategoryScorer, dice: &Dice) -> [i32; NUM_CATEGORIES] {
    let mut out = [0i32; NUM_CATEGORIES];
    for (s, &c) in out.iter_mut().zip(Category::ALL.iter()) {
        *s = scorer.score(c, dice);
    }
    out
}

//! Per-player score sheet.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::{Category, NUM_CATEGORIES};
use crate::scoring::{UPPER_BONUS, UPPER_BONUS_THRESHOLD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("category {category} already scored")]
    CategoryUsed { category: Category },
}

/// Category → assigned raw score. Each category is written exactly once and never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    scores: [Option<i32>; NUM_CATEGORIES],
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from `(category, raw score)` pairs.
    pub fn from_scores(
        entries: impl IntoIterator<Item = (Category, i32)>,
    ) -> Result<Self, ScoreError> {
        let mut s = Self::new();
        for (c, v) in entries {
            s.record(c, v)?;
        }
        Ok(s)
    }

    #[inline]
    pub fn is_used(&self, category: Category) -> bool {
        self.scores[category.index()].is_some()
    }

    pub fn score(&self, category: Category) -> Option<i32> {
        self.scores[category.index()]
    }

    pub fn used(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| self.is_used(c))
    }

    pub fn open(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| !self.is_used(c))
    }

    pub fn open_count(&self) -> usize {
        self.scores.iter().filter(|s| s.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.open_count() == 0
    }

    /// Running upper-section sum (uncapped, bonus excluded).
    pub fn upper_sum(&self) -> i32 {
        Category::UPPER.iter().filter_map(|&c| self.score(c)).sum()
    }

    pub fn upper_bonus(&self) -> i32 {
        if self.upper_sum() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    /// Sum of all raw scores plus the upper bonus.
    pub fn total(&self) -> i32 {
        self.scores.iter().flatten().sum::<i32>() + self.upper_bonus()
    }

    /// Assign `raw` to `category`.
    ///
    /// Returns the realised delta: `raw`, plus the one-time upper bonus when this write moves
    /// the upper sum from below the threshold to at or above it.
    pub fn record(&mut self, category: Category, raw: i32) -> Result<i32, ScoreError> {
        if self.is_used(category) {
            return Err(ScoreError::CategoryUsed { category });
        }
        let before = self.upper_sum();
        self.scores[category.index()] = Some(raw);

        let bonus = if category.is_upper()
            && before < UPPER_BONUS_THRESHOLD
            && before + raw >= UPPER_BONUS_THRESHOLD
        {
            UPPER_BONUS
        } else {
            0
        };
        Ok(raw + bonus)
    }
}

//! Category definitions and index mapping.
//!
//! Index order (0..=12):
//! - 0..=5  : upper section, Ones..Sixes
//! - 6..=12 : lower section, ThreeOfAKind, FourOfAKind, FullHouse, ShortStraight,
//!   LongStraight, Yatzi, Chance

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUM_CATEGORIES: usize = 13;
pub const NUM_UPPER: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    ShortStraight,
    LongStraight,
    Yatzi,
    Chance,
}

/// Category names in index order; also the accepted spellings for `FromStr`.
pub const CATEGORY_NAMES: [&str; NUM_CATEGORIES] = [
    "ones",
    "twos",
    "threes",
    "fours",
    "fives",
    "sixes",
    "three_kind",
    "four_kind",
    "full_house",
    "short_straight",
    "long_straight",
    "yatzi",
    "chance",
];

impl Category {
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::ShortStraight,
        Category::LongStraight,
        Category::Yatzi,
        Category::Chance,
    ];

    pub const UPPER: [Category; NUM_UPPER] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert an index (0..=12) to a category.
    ///
    /// # Panics
    /// Panics if `idx >= NUM_CATEGORIES`.
    pub fn from_index(idx: usize) -> Category {
        assert!(idx < NUM_CATEGORIES, "category index out of range: {}", idx);
        Category::ALL[idx]
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        self.index() < NUM_UPPER
    }

    /// Face value counted by an upper category (1..=6); `None` for lower categories.
    pub fn face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    /// Par score for an upper category: three dice of its face.
    pub fn upper_par(self) -> Option<i32> {
        self.face().map(|f| 3 * f as i32)
    }

    pub fn name(self) -> &'static str {
        CATEGORY_NAMES[self.index()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let alias = match key.as_str() {
            "three_of_a_kind" | "3k" => "three_kind",
            "four_of_a_kind" | "4k" => "four_kind",
            "house" => "full_house",
            "small_straight" => "short_straight",
            "large_straight" => "long_straight",
            "yahtzee" | "yatzy" => "yatzi",
            other => other,
        };
        CATEGORY_NAMES
            .iter()
            .position(|&n| n == alias)
            .map(Category::from_index)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip_and_order() {
        for (i, &c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Category::from_index(i), c);
        }
        assert_eq!(Category::Sixes.index(), 5);
        assert_eq!(Category::Chance.index(), 12);
    }

    #[test]
    fn upper_faces_and_par() {
        assert_eq!(Category::Ones.face(), Some(1));
        assert_eq!(Category::Sixes.upper_par(), Some(18));
        assert_eq!(Category::Yatzi.face(), None);
        assert!(!Category::Chance.is_upper());
        let par_sum: i32 = Category::UPPER.iter().filter_map(|c| c.upper_par()).sum();
        assert_eq!(par_sum, 63);
    }

    #[test]
    fn parse_accepts_names_and_aliases() {
        assert_eq!("sixes".parse::<Category>(), Ok(Category::Sixes));
        assert_eq!("Full House".parse::<Category>(), Ok(Category::FullHouse));
        assert_eq!("yahtzee".parse::<Category>(), Ok(Category::Yatzi));
        assert_eq!("large-straight".parse::<Category>(), Ok(Category::LongStraight));
        assert!("pair".parse::<Category>().is_err());
    }
}

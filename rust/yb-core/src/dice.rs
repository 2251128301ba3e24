//! Dice and keep-masks.
//!
//! Dice are positional: `dice[i]` is die `i` and keep-masks refer to positions, not sorted
//! values. The engine never reorders dice; the caller owns the roll mechanism.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chance::{ChanceError, ChanceSource};

pub const NUM_DICE: usize = 5;

/// Five dice, each in 1..=6.
pub type Dice = [u8; NUM_DICE];

/// True if every die is in 1..=6.
pub fn is_valid_dice(dice: &Dice) -> bool {
    dice.iter().all(|d| (1..=6).contains(d))
}

/// Face counts indexed by face value (index 0 unused).
pub fn face_counts(dice: &Dice) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &d in dice {
        debug_assert!((1..=6).contains(&d), "die out of range: {}", d);
        counts[d as usize] += 1;
    }
    counts
}

pub fn dice_sum(dice: &Dice) -> i32 {
    dice.iter().map(|&d| d as i32).sum()
}

/// Which dice survive the next reroll (`true` = kept).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeepMask(pub [bool; NUM_DICE]);

impl KeepMask {
    pub const NONE: KeepMask = KeepMask([false; NUM_DICE]);
    pub const ALL: KeepMask = KeepMask([true; NUM_DICE]);

    /// Keep every die for which `pred(value)` holds.
    pub fn select(dice: &Dice, mut pred: impl FnMut(u8) -> bool) -> KeepMask {
        let mut out = [false; NUM_DICE];
        for (k, &d) in out.iter_mut().zip(dice.iter()) {
            *k = pred(d);
        }
        KeepMask(out)
    }

    /// Keep the first `n` dice (by index) showing `face`.
    pub fn first_n_of_face(dice: &Dice, face: u8, n: usize) -> KeepMask {
        let mut out = [false; NUM_DICE];
        let mut kept = 0usize;
        for (k, &d) in out.iter_mut().zip(dice.iter()) {
            if d == face && kept < n {
                *k = true;
                kept += 1;
            }
        }
        KeepMask(out)
    }

    /// 5-bit packed form: bit `i` set iff die `i` is kept.
    pub fn key(self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &k)| if k { acc | (1 << i) } else { acc })
    }

    /// Inverse of [`KeepMask::key`].
    ///
    /// # Panics
    /// Panics if `key >= 32`.
    pub fn from_key(key: u8) -> KeepMask {
        assert!(key < 32, "keep-mask key out of range: {}", key);
        let mut out = [false; NUM_DICE];
        for (i, k) in out.iter_mut().enumerate() {
            *k = (key >> i) & 1 == 1;
        }
        KeepMask(out)
    }

    #[inline]
    pub fn keeps(self, i: usize) -> bool {
        self.0[i]
    }

    pub fn kept_count(self) -> usize {
        self.0.iter().filter(|&&k| k).count()
    }

    pub fn is_keep_all(self) -> bool {
        self == KeepMask::ALL
    }

    pub fn as_array(self) -> [bool; NUM_DICE] {
        self.0
    }
}

impl fmt::Display for KeepMask {
    /// `K` for kept, `-` for rerolled, in die order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &k in &self.0 {
            f.write_str(if k { "K" } else { "-" })?;
        }
        Ok(())
    }
}

/// Redraw every non-kept die once.
pub fn reroll(
    dice: &Dice,
    keep: KeepMask,
    chance: &mut dyn ChanceSource,
) -> Result<Dice, ChanceError> {
    let mut next = *dice;
    for (i, die) in next.iter_mut().enumerate() {
        if !keep.keeps(i) {
            *die = chance.roll_die()?;
        }
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::ScriptedChance;

    #[test]
    fn key_roundtrip_covers_all_masks() {
        for key in 0u8..32 {
            assert_eq!(KeepMask::from_key(key).key(), key);
        }
        assert_eq!(KeepMask::NONE.key(), 0);
        assert_eq!(KeepMask::ALL.key(), 0b1_1111);
    }

    #[test]
    fn first_n_of_face_keeps_lowest_indices() {
        let dice = [4, 2, 4, 4, 1];
        let m = KeepMask::first_n_of_face(&dice, 4, 2);
        assert_eq!(m.as_array(), [true, false, true, false, false]);
        assert_eq!(m.kept_count(), 2);
    }

    #[test]
    fn reroll_only_touches_unkept_dice() {
        let dice = [1, 2, 3, 4, 5];
        let keep = KeepMask([true, false, true, false, true]);
        let mut chance = ScriptedChance::new(vec![6, 6], vec![]);
        let out = reroll(&dice, keep, &mut chance).unwrap();
        assert_eq!(out, [1, 6, 3, 6, 5]);
    }

    #[test]
    fn display_marks_kept_dice() {
        assert_eq!(KeepMask([true, false, false, true, true]).to_string(), "K--KK");
    }

    #[test]
    fn face_counts_and_sum() {
        let dice = [6, 6, 1, 1, 1];
        let c = face_counts(&dice);
        assert_eq!(c[1], 3);
        assert_eq!(c[6], 2);
        assert_eq!(dice_sum(&dice), 15);
        assert!(is_valid_dice(&dice));
        assert!(!is_valid_dice(&[0, 1, 2, 3, 4]));
    }
}

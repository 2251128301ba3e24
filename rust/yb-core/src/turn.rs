//! Turn state machine: Rolled-once → Rolled-twice → Finalized.
//!
//! This module is the single place that mutates dice via rules. The decision engine reads
//! `dice` and `roll_index` and never rolls anything itself.

use thiserror::Error;

use crate::chance::{roll5, ChanceError, ChanceSource};
use crate::dice::{reroll, Dice, KeepMask};

/// Rerolls allowed after the opening roll.
pub const MAX_REROLLS: u8 = 2;

#[derive(Debug, Error)]
pub enum TurnError {
    #[error("no rerolls left (roll_index={roll_index})")]
    NoRerollsLeft { roll_index: u8 },
    #[error(transparent)]
    Chance(#[from] ChanceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    RolledOnce,
    RolledTwice,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub dice: Dice,
    /// 0 after the opening roll, 1 after the first reroll, 2 after the second.
    pub roll_index: u8,
}

impl Turn {
    /// Opening roll of a fresh turn.
    pub fn start(chance: &mut dyn ChanceSource) -> Result<Self, ChanceError> {
        Ok(Self {
            dice: roll5(chance)?,
            roll_index: 0,
        })
    }

    pub fn phase(&self) -> TurnPhase {
        match self.roll_index {
            0 => TurnPhase::RolledOnce,
            1 => TurnPhase::RolledTwice,
            _ => TurnPhase::Finalized,
        }
    }

    pub fn rerolls_left(&self) -> u8 {
        MAX_REROLLS.saturating_sub(self.roll_index)
    }

    pub fn is_final(&self) -> bool {
        self.rerolls_left() == 0
    }

    /// Redraw the dice not selected by `keep` and advance the phase.
    ///
    /// Keeping every die still consumes the reroll.
    pub fn reroll(&mut self, keep: KeepMask, chance: &mut dyn ChanceSource) -> Result<(), TurnError> {
        if self.is_final() {
            return Err(TurnError::NoRerollsLeft {
                roll_index: self.roll_index,
            });
        }
        self.dice = reroll(&self.dice, keep, chance)?;
        self.roll_index += 1;
        Ok(())
    }
}

//! Chance sources: where dice values and decision noise come from.
//!
//! Every draw is fallible so that an injected generator which can fail (hardware RNG, a
//! scripted replay stream) surfaces the failure instead of silently defaulting. Draws are
//! consumed strictly sequentially; reproducibility under a fixed seed depends on callers
//! drawing in a fixed order.

use std::collections::VecDeque;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChanceError {
    #[error("rng failure: {0}")]
    Rng(#[from] rand_core::Error),
    #[error("scripted chance stream exhausted ({what})")]
    Exhausted { what: &'static str },
}

/// Sequential source of dice and uniform draws.
pub trait ChanceSource {
    /// One die, uniform in 1..=6.
    fn roll_die(&mut self) -> Result<u8, ChanceError>;

    /// Uniform in [0, 1).
    fn unit(&mut self) -> Result<f64, ChanceError>;

    /// A fresh 64-bit seed for a derived stream.
    fn seed(&mut self) -> Result<u64, ChanceError> {
        let hi = (self.unit()? * 4_294_967_296.0) as u64;
        let lo = (self.unit()? * 4_294_967_296.0) as u64;
        Ok((hi << 32) | lo)
    }
}

/// Adapter over any `rand` generator; failures come from `try_fill_bytes`.
#[derive(Debug, Clone)]
pub struct RngChance<R>(pub R);

impl RngChance<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        RngChance(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RngChance<R> {
    fn try_next_u64(&mut self) -> Result<u64, ChanceError> {
        let mut buf = [0u8; 8];
        self.0.try_fill_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

impl<R: RngCore> ChanceSource for RngChance<R> {
    fn roll_die(&mut self) -> Result<u8, ChanceError> {
        // Multiply-high keeps the draw unbiased to within 2^-64.
        let r = self.try_next_u64()?;
        Ok((((r as u128) * 6) >> 64) as u8 + 1)
    }

    fn unit(&mut self) -> Result<f64, ChanceError> {
        let r = self.try_next_u64()?;
        Ok((r >> 11) as f64 * (1.0 / (1u64 << 53) as f64))
    }

    fn seed(&mut self) -> Result<u64, ChanceError> {
        self.try_next_u64()
    }
}

/// Replays fixed die values and unit draws.
///
/// In one-shot mode (`new`) running past the end of either list is an error; in cycling mode
/// (`cycling`) each list wraps around.
#[derive(Debug, Clone)]
pub struct ScriptedChance {
    dice: VecDeque<u8>,
    units: VecDeque<f64>,
    cycle: bool,
}

impl ScriptedChance {
    pub fn new(dice: Vec<u8>, units: Vec<f64>) -> Self {
        debug_assert!(dice.iter().all(|d| (1..=6).contains(d)));
        debug_assert!(units.iter().all(|u| (0.0..1.0).contains(u)));
        Self {
            dice: dice.into(),
            units: units.into(),
            cycle: false,
        }
    }

    pub fn cycling(dice: Vec<u8>, units: Vec<f64>) -> Self {
        Self {
            cycle: true,
            ..Self::new(dice, units)
        }
    }

    pub fn remaining_units(&self) -> usize {
        self.units.len()
    }
}

fn take<T: Copy>(q: &mut VecDeque<T>, cycle: bool, what: &'static str) -> Result<T, ChanceError> {
    let v = q.pop_front().ok_or(ChanceError::Exhausted { what })?;
    if cycle {
        q.push_back(v);
    }
    Ok(v)
}

impl ChanceSource for ScriptedChance {
    fn roll_die(&mut self) -> Result<u8, ChanceError> {
        take(&mut self.dice, self.cycle, "dice")
    }

    fn unit(&mut self) -> Result<f64, ChanceError> {
        take(&mut self.units, self.cycle, "units")
    }
}

/// SplitMix64 step (fast, deterministic). Used to derive independent per-game and
/// per-candidate seeds from a base seed.
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Roll five fresh dice.
pub fn roll5(chance: &mut dyn ChanceSource) -> Result<[u8; 5], ChanceError> {
    let mut out = [0u8; 5];
    for o in &mut out {
        *o = chance.roll_die()?;
    }
    Ok(out)
}

//! Monte Carlo expected value of a keep-mask.

use rayon::prelude::*;
use yb_core::{reroll, CategoryScorer, ChanceError, ChanceSource, Dice, KeepMask, RngChance};

use crate::heuristic::{ScoringPurpose, StrategyScorer};

pub struct Evaluator<'a, S> {
    scorer: &'a S,
    strategy: StrategyScorer<'a>,
}

impl<'a, S: CategoryScorer> Evaluator<'a, S> {
    pub fn new(scorer: &'a S, strategy: StrategyScorer<'a>) -> Self {
        Self { scorer, strategy }
    }

    /// Mean best-adjusted leaf value after rerolling the unkept dice `rolls_remaining` times
    /// with a fixed `keep`. With no rolls left this is the current hand's value.
    pub fn expected_value(
        &self,
        keep: KeepMask,
        dice: &Dice,
        rolls_remaining: u8,
        simulations: u32,
        chance: &mut dyn ChanceSource,
    ) -> Result<f64, ChanceError> {
        if rolls_remaining == 0 {
            return self.leaf(dice, chance);
        }
        let n = simulations.max(1);
        let mut total = 0.0;
        for _ in 0..n {
            let mut hand = *dice;
            for _ in 0..rolls_remaining {
                hand = reroll(&hand, keep, chance)?;
            }
            total += self.leaf(&hand, chance)?;
        }
        Ok(total / n as f64)
    }

    /// Expected value of each candidate, in candidate order, on the calling thread.
    pub fn evaluate_serial(
        &self,
        candidates: &[KeepMask],
        dice: &Dice,
        rolls_remaining: u8,
        simulations: u32,
        chance: &mut dyn ChanceSource,
    ) -> Result<Vec<f64>, ChanceError> {
        candidates
            .iter()
            .map(|m| self.expected_value(*m, dice, rolls_remaining, simulations, chance))
            .collect()
    }

    /// Expected value of each candidate on the rayon pool.
    ///
    /// One seed per candidate is drawn from `chance` in candidate order before fanning out;
    /// every candidate then rolls out on its own ChaCha8 stream, so the result is independent
    /// of thread scheduling.
    pub fn evaluate_parallel(
        &self,
        candidates: &[KeepMask],
        dice: &Dice,
        rolls_remaining: u8,
        simulations: u32,
        chance: &mut dyn ChanceSource,
    ) -> Result<Vec<f64>, ChanceError> {
        let seeds = candidates
            .iter()
            .map(|_| chance.seed())
            .collect::<Result<Vec<u64>, _>>()?;
        candidates
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(m, &seed)| {
                let mut rng = RngChance::seeded(seed);
                self.expected_value(*m, dice, rolls_remaining, simulations, &mut rng)
            })
            .collect()
    }

    fn leaf(&self, dice: &Dice, chance: &mut dyn ChanceSource) -> Result<f64, ChanceError> {
        Ok(self
            .strategy
            .best_over_categories(self.scorer, dice, ScoringPurpose::Lookahead, chance)?
            .unwrap_or(0.0))
    }
}

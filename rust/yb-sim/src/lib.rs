//! yb-sim: seeded full-game simulation for the Yatzi decision engine.
//!
//! Every game gets its own ChaCha8 stream derived from a base seed, so a batch produces the
//! same reports whether games run on the rayon pool or one after another.

pub mod game;
pub mod stats;

use rayon::prelude::*;
use serde::Serialize;
use yb_ai::{DifficultyProfile, Engine};
use yb_core::{splitmix64, CategoryScorer, RngChance};

pub use game::{play_game, GameEvent, GameObserver, GameReport, SimError};
pub use stats::{format_histogram, print_histogram, summarize_scores, ScoreSummary};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seed of game `game_id` in a batch started from `base`.
pub fn game_seed(base: u64, game_id: u64) -> u64 {
    splitmix64(base.wrapping_add(game_id))
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub profile: DifficultyProfile,
    pub seed: u64,
    pub games: Vec<GameReport>,
}

impl SimulationResult {
    pub fn scores(&self) -> Vec<i32> {
        self.games.iter().map(|g| g.total).collect()
    }

    pub fn summary(&self) -> Option<ScoreSummary> {
        summarize_scores(&self.scores())
    }

    pub fn bonus_rate(&self) -> f64 {
        rate(self.games.iter().filter(|g| g.got_bonus()).count(), self.games.len())
    }

    pub fn yatzi_rate(&self) -> f64 {
        rate(self.games.iter().filter(|g| g.scored_yatzi()).count(), self.games.len())
    }
}

fn rate(hits: usize, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        hits as f64 / n as f64
    }
}

fn play_seeded<S: CategoryScorer>(
    engine: &Engine<S>,
    profile: &DifficultyProfile,
    base_seed: u64,
    game_id: u64,
    observer: Option<&mut (dyn GameObserver + '_)>,
) -> Result<GameReport, SimError> {
    let seed = game_seed(base_seed, game_id);
    let mut chance = RngChance::seeded(seed);
    let mut report = play_game(engine, profile, game_id, &mut chance, observer)?;
    report.seed = Some(seed);
    Ok(report)
}

/// Play `games` games in parallel.
pub fn simulate<S: CategoryScorer>(
    engine: &Engine<S>,
    profile: &DifficultyProfile,
    games: u32,
    seed: u64,
) -> Result<SimulationResult, SimError> {
    let reports = (0..games as u64)
        .into_par_iter()
        .map(|id| play_seeded(engine, profile, seed, id, None))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SimulationResult {
        profile: *profile,
        seed,
        games: reports,
    })
}

/// Play `games` games on the calling thread, reporting every event to `observer`.
///
/// Produces the same reports as [`simulate`] for the same seed.
pub fn simulate_observed<S: CategoryScorer>(
    engine: &Engine<S>,
    profile: &DifficultyProfile,
    games: u32,
    seed: u64,
    observer: &mut dyn GameObserver,
) -> Result<SimulationResult, SimError> {
    let mut reports = Vec::with_capacity(games as usize);
    for id in 0..games as u64 {
        reports.push(play_seeded(engine, profile, seed, id, Some(&mut *observer))?);
    }
    Ok(SimulationResult {
        profile: *profile,
        seed,
        games: reports,
    })
}

/// Run the same seeded batch once per profile, in the given order.
pub fn compare_difficulties<S: CategoryScorer>(
    engine: &Engine<S>,
    profiles: &[DifficultyProfile],
    games: u32,
    seed: u64,
) -> Result<Vec<SimulationResult>, SimError> {
    profiles
        .iter()
        .map(|p| simulate(engine, p, games, seed))
        .collect()
}

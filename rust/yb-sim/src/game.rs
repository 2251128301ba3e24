//! One full solitaire game driven by the engine.

use serde::Serialize;
use thiserror::Error;
use yb_ai::{CategoryChoice, DecisionError, DifficultyProfile, Engine, KeepDecision};
use yb_core::{
    Category, CategoryScorer, ChanceError, ChanceSource, Dice, ScoreError, ScoreState, Turn,
    TurnError, NUM_CATEGORIES, YATZI_SCORE,
};

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Chance(#[from] ChanceError),
}

/// Everything an observer sees while a game is played.
#[derive(Debug)]
pub enum GameEvent<'a> {
    Keep {
        game_id: u64,
        turn: u8,
        roll_index: u8,
        dice: Dice,
        decision: &'a KeepDecision,
    },
    Score {
        game_id: u64,
        turn: u8,
        dice: Dice,
        choice: &'a CategoryChoice,
        sheet: &'a ScoreState,
    },
    End(&'a GameReport),
}

pub trait GameObserver {
    fn on_event(&mut self, ev: &GameEvent<'_>);
}

#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub game_id: u64,
    pub seed: Option<u64>,
    pub profile: DifficultyProfile,
    pub sheet: ScoreState,
    pub total: i32,
    pub upper_sum: i32,
    pub upper_bonus: i32,
    /// Number of keep decisions made (including final-roll holds).
    pub keep_decisions: u32,
}

impl GameReport {
    pub fn got_bonus(&self) -> bool {
        self.upper_bonus > 0
    }

    pub fn scored_yatzi(&self) -> bool {
        self.sheet.score(Category::Yatzi) == Some(YATZI_SCORE)
    }
}

/// Play 13 turns: roll, keep/reroll while the engine wants to, then score.
///
/// A keep-all decision ends the rolling phase early.
pub fn play_game<S: CategoryScorer>(
    engine: &Engine<S>,
    profile: &DifficultyProfile,
    game_id: u64,
    chance: &mut dyn ChanceSource,
    mut observer: Option<&mut (dyn GameObserver + '_)>,
) -> Result<GameReport, SimError> {
    let mut sheet = ScoreState::new();
    let mut keep_decisions = 0u32;

    for turn in 0..NUM_CATEGORIES as u8 {
        let mut t = Turn::start(chance)?;
        while !t.is_final() {
            let decision =
                engine.decide_keep_detailed(&t.dice, &sheet, t.roll_index, profile, chance)?;
            keep_decisions += 1;
            if let Some(o) = observer.as_deref_mut() {
                o.on_event(&GameEvent::Keep {
                    game_id,
                    turn,
                    roll_index: t.roll_index,
                    dice: t.dice,
                    decision: &decision,
                });
            }
            if decision.mask.is_keep_all() {
                break;
            }
            t.reroll(decision.mask, chance)?;
        }

        let choice = engine.choose_category(&t.dice, &sheet, profile, chance)?;
        sheet.record(choice.category, choice.score)?;
        if let Some(o) = observer.as_deref_mut() {
            o.on_event(&GameEvent::Score {
                game_id,
                turn,
                dice: t.dice,
                choice: &choice,
                sheet: &sheet,
            });
        }
    }

    let report = GameReport {
        game_id,
        seed: None,
        profile: *profile,
        total: sheet.total(),
        upper_sum: sheet.upper_sum(),
        upper_bonus: sheet.upper_bonus(),
        sheet,
        keep_decisions,
    };
    if let Some(o) = observer.as_deref_mut() {
        o.on_event(&GameEvent::End(&report));
    }
    Ok(report)
}

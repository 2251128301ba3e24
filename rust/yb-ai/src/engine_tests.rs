use yb_core::{
    roll5, Category, CategoryScorer, ChanceSource, KeepMask, RngChance, ScoreState, ScriptedChance,
    StandardScorer,
};

use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::engine::{DecisionError, Engine, EngineConfig, EngineError, KeepOutcome};
use crate::evaluator::Evaluator;
use crate::heuristic::StrategyScorer;

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).unwrap()
}

fn upper_sixty() -> ScoreState {
    ScoreState::from_scores([
        (Category::Ones, 3),
        (Category::Twos, 8),
        (Category::Threes, 9),
        (Category::Fours, 20),
        (Category::Fives, 20),
    ])
    .unwrap()
}

fn full_sheet() -> ScoreState {
    ScoreState::from_scores(Category::ALL.iter().map(|&c| (c, 0))).unwrap()
}

fn sheet_with_open(open: &[Category]) -> ScoreState {
    ScoreState::from_scores(
        Category::ALL
            .iter()
            .filter(|c| !open.contains(c))
            .map(|&c| (c, 0)),
    )
    .unwrap()
}

/// Medium without noise or the dice-sum tilt, so leaf values are exact.
fn flat_medium() -> DifficultyProfile {
    DifficultyProfile {
        simulations: 3,
        risk_bias: 0.0,
        mistake_chance: 0.0,
        ..Difficulty::Medium.profile()
    }
}

#[test]
fn zero_rollout_ceiling_is_rejected() {
    let err = Engine::new(EngineConfig {
        max_rollouts_per_decision: 0,
        parallel: false,
    })
    .err()
    .unwrap();
    assert!(matches!(err, EngineError::InvalidConfig { .. }));
}

#[test]
fn final_roll_keeps_everything_without_drawing() {
    let mut chance = ScriptedChance::new(vec![], vec![]);
    let d = engine()
        .decide_keep_detailed(
            &[1, 2, 3, 4, 6],
            &ScoreState::new(),
            2,
            &Difficulty::Hard.profile(),
            &mut chance,
        )
        .unwrap();
    assert_eq!(d.mask, KeepMask::ALL);
    assert_eq!(d.outcome, KeepOutcome::FinalRoll);
}

#[test]
fn final_roll_keeps_everything_even_on_a_full_sheet() {
    let mut chance = ScriptedChance::new(vec![], vec![]);
    let d = engine()
        .decide_keep_detailed(
            &[1, 1, 1, 1, 1],
            &full_sheet(),
            2,
            &Difficulty::Medium.profile(),
            &mut chance,
        )
        .unwrap();
    assert_eq!(d.mask, KeepMask::ALL);
    assert_eq!(d.outcome, KeepOutcome::FinalRoll);
}

#[test]
fn expected_value_with_no_rolls_left_is_the_current_hand() {
    let state = ScoreState::new();
    let p = DifficultyProfile {
        mistake_chance: 0.0,
        ..Difficulty::Medium.profile()
    };
    let ev = Evaluator::new(&StandardScorer, StrategyScorer::new(&state, &p));
    let mut chance = ScriptedChance::new(vec![], vec![]);
    let v = ev
        .expected_value(KeepMask::NONE, &[6, 6, 6, 6, 6], 0, 50, &mut chance)
        .unwrap();
    // 50 + 15 rarity + (30 - 18) * 0.05 * 0.3 risk tilt.
    assert!((v - 65.18).abs() < 1e-9, "{v}");
}

#[test]
fn rollouts_reroll_only_unkept_dice_each_roll() {
    let state = ScoreState::new();
    let p = DifficultyProfile {
        mistake_chance: 0.0,
        ..Difficulty::Medium.profile()
    };
    let ev = Evaluator::new(&StandardScorer, StrategyScorer::new(&state, &p));
    // 2 simulations x 2 rolls x 1 unkept die.
    let mut chance = ScriptedChance::new(vec![6; 4], vec![]);
    let keep = KeepMask([true, true, true, true, false]);
    let v = ev
        .expected_value(keep, &[6, 6, 6, 6, 1], 2, 2, &mut chance)
        .unwrap();
    assert!((v - 65.18).abs() < 1e-9, "{v}");
    assert!(chance.roll_die().is_err());
}

#[test]
fn first_candidate_wins_a_tie() {
    // Only Yatzi open and the dice alternate 1, 2: no rollout can score, every candidate
    // lands on the same zero penalty and keep-nothing (candidate 0) must win.
    let state = sheet_with_open(&[Category::Yatzi]);
    let p = flat_medium();
    let mut chance = ScriptedChance::cycling(vec![1, 2], vec![]);
    let d = engine()
        .decide_keep_detailed(&[1, 2, 3, 4, 6], &state, 0, &p, &mut chance)
        .unwrap();
    assert_eq!(d.outcome, KeepOutcome::Searched);
    assert_eq!(d.mask, KeepMask::NONE);
    assert_eq!(d.stats.best_ev, d.stats.current_best);
    assert!(d.stats.candidates > 2);
}

#[test]
fn near_threshold_hand_is_held_when_rerolls_gain_little() {
    // Only Chance open: a hand is worth its sum - 3. Every reroll turns into sixes, so the
    // best candidate reaches 27 against 24 for holding, short of the required +5.
    let state = sheet_with_open(&[Category::Chance]);
    let p = flat_medium();
    let mut chance = ScriptedChance::cycling(vec![6], vec![]);
    let d = engine()
        .decide_keep_detailed(&[6, 6, 6, 5, 4], &state, 0, &p, &mut chance)
        .unwrap();
    assert_eq!(d.outcome, KeepOutcome::Dampened);
    assert_eq!(d.mask, KeepMask::ALL);
    assert_eq!(d.stats.current_best, Some(24.0));
    assert_eq!(d.stats.best_ev, Some(27.0));
}

#[test]
fn weak_hand_is_searched_not_held() {
    let state = sheet_with_open(&[Category::Chance]);
    let p = flat_medium();
    let mut chance = ScriptedChance::cycling(vec![6], vec![]);
    let d = engine()
        .decide_keep_detailed(&[6, 6, 6, 2, 1], &state, 0, &p, &mut chance)
        .unwrap();
    assert_eq!(d.outcome, KeepOutcome::Searched);
    assert_eq!(d.mask, KeepMask::NONE);
    assert_eq!(d.stats.best_ev, Some(27.0));
}

#[test]
fn strong_hand_is_held_early() {
    let mut chance = ScriptedChance::cycling(vec![1], vec![0.99]);
    let d = engine()
        .decide_keep_detailed(
            &[6, 6, 6, 6, 6],
            &ScoreState::new(),
            0,
            &Difficulty::Medium.profile(),
            &mut chance,
        )
        .unwrap();
    assert_eq!(d.outcome, KeepOutcome::EarlyHold);
    assert_eq!(d.mask, KeepMask::ALL);
    assert!(d.stats.current_best.unwrap() >= 30.0);
    assert_eq!(d.stats.candidates, 0);
}

#[test]
fn keep_decision_is_deterministic_for_a_fixed_stream() {
    let e = engine();
    let p = Difficulty::Medium.profile();
    let state = ScoreState::new();
    let dice = [2, 3, 3, 5, 6];
    let run = || {
        let mut chance = RngChance::seeded(7);
        e.decide_keep_detailed(&dice, &state, 0, &p, &mut chance)
            .unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.mask, b.mask);
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(
        a.stats.best_ev.map(f64::to_bits),
        b.stats.best_ev.map(f64::to_bits)
    );
    assert!(a.stats.candidates >= 2);
    assert_eq!(
        a.stats.rollouts,
        a.stats.candidates as u64 * a.stats.simulations_per_candidate as u64
    );
}

#[test]
fn parallel_keep_decision_is_deterministic() {
    let e = Engine::new(EngineConfig {
        parallel: true,
        ..EngineConfig::default()
    })
    .unwrap();
    let p = Difficulty::Hard.profile();
    let state = upper_sixty();
    let dice = [1, 4, 4, 5, 2];
    let run = || {
        let mut chance = RngChance::seeded(2024);
        e.decide_keep_detailed(&dice, &state, 1, &p, &mut chance)
            .unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.mask, b.mask);
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(
        a.stats.best_ev.map(f64::to_bits),
        b.stats.best_ev.map(f64::to_bits)
    );
}

#[test]
fn rollout_ceiling_scales_simulations_down() {
    let p = Difficulty::Hard.profile();
    let roomy = engine();
    assert_eq!(roomy.simulations_for(&p, 20), 420);

    let tight = Engine::new(EngineConfig {
        max_rollouts_per_decision: 1_000,
        parallel: false,
    })
    .unwrap();
    assert_eq!(tight.simulations_for(&p, 20), 50);
    assert_eq!(tight.simulations_for(&p, 5_000), 1);
}

#[test]
fn certain_mistake_picks_a_random_candidate() {
    let p = DifficultyProfile {
        simulations: 2,
        mistake_chance: 1.0,
        hold_greed_threshold: 1_000.0,
        ..Difficulty::Easy.profile()
    };
    // Every unit draw is 0.0: each score gets the minimum mistake, the keep mistake fires
    // and picks candidate 0 (keep nothing).
    let mut chance = ScriptedChance::cycling(vec![1, 2, 3, 4, 5, 6], vec![0.0]);
    let d = engine()
        .decide_keep_detailed(&[1, 2, 3, 5, 6], &ScoreState::new(), 0, &p, &mut chance)
        .unwrap();
    assert_eq!(d.outcome, KeepOutcome::Mistake);
    assert_eq!(d.mask, KeepMask::NONE);
}

#[test]
fn chance_failure_surfaces_from_keep_search() {
    let p = Difficulty::Medium.profile();
    let mut chance = ScriptedChance::new(vec![3, 3], vec![0.9; 40]);
    let err = engine()
        .decide_keep(&[1, 2, 3, 5, 6], &ScoreState::new(), 0, &p, &mut chance)
        .unwrap_err();
    assert!(matches!(err, DecisionError::Chance(_)));
}

#[test]
fn full_sheet_has_no_decision() {
    let state = full_sheet();
    let p = Difficulty::Medium.profile();
    let mut chance = RngChance::seeded(1);
    assert!(matches!(
        engine().decide_keep(&[1, 1, 1, 1, 1], &state, 0, &p, &mut chance),
        Err(DecisionError::NoOpenCategory)
    ));
    assert!(matches!(
        engine().choose_category(&[1, 1, 1, 1, 1], &state, &p, &mut chance),
        Err(DecisionError::NoOpenCategory)
    ));
}

#[test]
fn yatzi_hand_scores_yatzi() {
    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut chance = RngChance::seeded(5);
        let c = engine()
            .choose_category(&[6, 6, 6, 6, 6], &ScoreState::new(), &d.profile(), &mut chance)
            .unwrap();
        assert_eq!(c.category, Category::Yatzi, "difficulty {d}");
        assert_eq!(c.score, 50);
        assert!(!c.fallback);
    }
}

#[test]
fn sixes_taken_to_secure_upper_bonus() {
    let state = upper_sixty();
    for d in [Difficulty::Medium, Difficulty::Hard] {
        let mut chance = ScriptedChance::cycling(vec![1], vec![0.99]);
        let c = engine()
            .choose_category(&[6, 6, 1, 1, 1], &state, &d.profile(), &mut chance)
            .unwrap();
        assert_eq!(c.category, Category::Sixes, "difficulty {d}");
        assert_eq!(c.score, 12);
    }
}

#[test]
fn all_negative_falls_back_to_smallest_potential_loss() {
    let open = [Category::LongStraight, Category::Yatzi];
    let state = ScoreState::from_scores(
        Category::ALL
            .iter()
            .filter(|c| !open.contains(c))
            .map(|&c| (c, 0)),
    )
    .unwrap();
    let p = DifficultyProfile {
        mistake_chance: 0.0,
        ..Difficulty::Medium.profile()
    };
    let mut chance = ScriptedChance::new(vec![], vec![]);
    let c = engine()
        .choose_category(&[1, 1, 2, 3, 5], &state, &p, &mut chance)
        .unwrap();
    assert!(c.fallback);
    assert_eq!(c.category, Category::LongStraight);
    assert_eq!(c.score, 0);
    assert!(c.rank_value < 0.0);
}

#[test]
fn choices_fill_the_sheet_with_raw_scores() {
    let e = engine();
    for seed in 0..20u64 {
        let p = Difficulty::ALL[(seed % 3) as usize].profile();
        let mut chance = RngChance::seeded(seed);
        let mut state = ScoreState::new();
        while !state.is_complete() {
            let dice = roll5(&mut chance).unwrap();
            let c = e.choose_category(&dice, &state, &p, &mut chance).unwrap();
            assert!(!state.is_used(c.category));
            assert_eq!(c.score, StandardScorer.score(c.category, &dice));
            state.record(c.category, c.score).unwrap();
        }
        assert_eq!(state.open_count(), 0);
    }
}

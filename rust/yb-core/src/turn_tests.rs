use crate::chance::{RngChance, ScriptedChance};
use crate::dice::{is_valid_dice, KeepMask};
use crate::turn::{Turn, TurnError, TurnPhase};

#[test]
fn phases_advance_and_stop_after_two_rerolls() {
    let mut chance = RngChance::seeded(11);
    let mut t = Turn::start(&mut chance).unwrap();
    assert_eq!(t.phase(), TurnPhase::RolledOnce);
    assert_eq!(t.rerolls_left(), 2);

    t.reroll(KeepMask::NONE, &mut chance).unwrap();
    assert_eq!(t.phase(), TurnPhase::RolledTwice);

    t.reroll(KeepMask::NONE, &mut chance).unwrap();
    assert_eq!(t.phase(), TurnPhase::Finalized);
    assert!(t.is_final());

    let err = t.reroll(KeepMask::NONE, &mut chance).unwrap_err();
    assert!(matches!(err, TurnError::NoRerollsLeft { roll_index: 2 }));
}

#[test]
fn kept_dice_survive_reroll() {
    let mut chance = ScriptedChance::new(vec![2, 2, 2, 2, 2, 6, 6, 6], vec![]);
    let mut t = Turn::start(&mut chance).unwrap();
    assert_eq!(t.dice, [2, 2, 2, 2, 2]);

    t.reroll(KeepMask([true, false, true, false, false]), &mut chance)
        .unwrap();
    assert_eq!(t.dice, [2, 6, 2, 6, 6]);
}

#[test]
fn chance_failure_propagates_through_reroll() {
    let mut chance = ScriptedChance::new(vec![1, 2, 3, 4, 5], vec![]);
    let mut t = Turn::start(&mut chance).unwrap();
    let err = t.reroll(KeepMask::NONE, &mut chance).unwrap_err();
    assert!(matches!(err, TurnError::Chance(_)));
    // Failed reroll does not advance the phase.
    assert_eq!(t.roll_index, 0);
}

#[test]
fn seeded_turns_are_reproducible() {
    let play = |seed: u64| {
        let mut chance = RngChance::seeded(seed);
        let mut t = Turn::start(&mut chance).unwrap();
        t.reroll(KeepMask([true, true, false, false, false]), &mut chance)
            .unwrap();
        t.reroll(KeepMask::NONE, &mut chance).unwrap();
        t
    };
    let a = play(999);
    assert_eq!(a, play(999));
    assert!(is_valid_dice(&a.dice));
}

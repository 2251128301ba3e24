//! Candidate keep-masks worth evaluating.
//!
//! Rather than all 32 subsets, a curated set bounds Monte Carlo cost. Enumeration order is
//! stable and doubles as the tie-break order of the keep search.

use rustc_hash::FxHashSet;
use yb_core::{face_counts, Dice, KeepMask};

/// Canonical runs whose members are kept together when chasing straights.
pub const RUNS: [(u8, u8); 5] = [(1, 5), (2, 6), (1, 4), (2, 5), (3, 6)];

/// Deduplicated keep-masks for `dice`, in generation order:
///
/// 1. keep nothing, keep everything
/// 2. every die of one present face (faces ascending)
/// 3. every die of either of two present faces (pairs ascending)
/// 4. every die inside each canonical run
/// 5. exactly the first two / first three dice of a face with count ≥ 2 / ≥ 3
pub fn candidate_masks(dice: &Dice) -> Vec<KeepMask> {
    let counts = face_counts(dice);
    let present: Vec<u8> = (1..=6u8).filter(|&f| counts[f as usize] > 0).collect();

    let mut seen: FxHashSet<u8> = FxHashSet::default();
    let mut out: Vec<KeepMask> = Vec::with_capacity(24);
    let mut push = |m: KeepMask| {
        if seen.insert(m.key()) {
            out.push(m);
        }
    };

    push(KeepMask::NONE);
    push(KeepMask::ALL);

    for &f in &present {
        push(KeepMask::select(dice, |d| d == f));
    }

    for (i, &a) in present.iter().enumerate() {
        for &b in &present[i + 1..] {
            push(KeepMask::select(dice, |d| d == a || d == b));
        }
    }

    for &(lo, hi) in &RUNS {
        push(KeepMask::select(dice, |d| (lo..=hi).contains(&d)));
    }

    for f in 1..=6u8 {
        let n = counts[f as usize];
        if n >= 2 {
            push(KeepMask::first_n_of_face(dice, f, 2));
        }
        if n >= 3 {
            push(KeepMask::first_n_of_face(dice, f, 3));
        }
    }

    out
}

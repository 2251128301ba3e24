#[cfg(test)]
mod tests {
    use crate::chance::{roll5, splitmix64, ChanceError, ChanceSource, RngChance, ScriptedChance};

    #[test]
    fn seeded_stream_is_deterministic() {
        let mut a = RngChance::seeded(123);
        let mut b = RngChance::seeded(123);
        for _ in 0..64 {
            assert_eq!(a.roll_die().unwrap(), b.roll_die().unwrap());
            assert_eq!(a.unit().unwrap(), b.unit().unwrap());
        }
    }

    #[test]
    fn dice_in_range_and_roughly_uniform() {
        let mut rng = RngChance::seeded(42);
        let mut counts = [0u32; 6];
        let n = 60_000;
        for _ in 0..n {
            let d = rng.roll_die().unwrap();
            assert!((1..=6).contains(&d), "die out of range: {}", d);
            counts[(d - 1) as usize] += 1;
        }
        for (face, &c) in counts.iter().enumerate() {
            let ratio = c as f64 / (n as f64 / 6.0);
            assert!(ratio > 0.95 && ratio < 1.05, "face {} ratio {:.3}", face + 1, ratio);
        }
    }

    #[test]
    fn unit_is_half_open() {
        let mut rng = RngChance::seeded(7);
        for _ in 0..10_000 {
            let u = rng.unit().unwrap();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn scripted_one_shot_reports_exhaustion() {
        let mut s = ScriptedChance::new(vec![3], vec![0.5]);
        assert_eq!(s.roll_die().unwrap(), 3);
        assert!(matches!(
            s.roll_die(),
            Err(ChanceError::Exhausted { what: "dice" })
        ));
        assert_eq!(s.unit().unwrap(), 0.5);
        assert!(s.unit().is_err());
    }

    #[test]
    fn scripted_cycling_wraps() {
        let mut s = ScriptedChance::cycling(vec![1, 2], vec![0.25]);
        let got: Vec<u8> = (0..5).map(|_| s.roll_die().unwrap()).collect();
        assert_eq!(got, vec![1, 2, 1, 2, 1]);
        assert_eq!(s.unit().unwrap(), 0.25);
        assert_eq!(s.unit().unwrap(), 0.25);
    }

    #[test]
    fn roll5_propagates_failure() {
        let mut s = ScriptedChance::new(vec![1, 2, 3], vec![]);
        assert!(roll5(&mut s).is_err());
    }

    #[test]
    fn splitmix_spreads_adjacent_seeds() {
        assert_ne!(splitmix64(0), splitmix64(1));
        assert_eq!(splitmix64(99), splitmix64(99));
    }
}

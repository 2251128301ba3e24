#[cfg(test)]
mod tests {
    use crate::{Category, ScoreError, ScoreState, UPPER_BONUS};

    #[test]
    fn record_marks_category_used_once() {
        let mut s = ScoreState::new();
        assert_eq!(s.open_count(), 13);
        assert_eq!(s.record(Category::Chance, 22), Ok(22));
        assert!(s.is_used(Category::Chance));
        assert_eq!(s.score(Category::Chance), Some(22));
        assert_eq!(
            s.record(Category::Chance, 10),
            Err(ScoreError::CategoryUsed {
                category: Category::Chance
            })
        );
        // Failed write leaves the sheet untouched.
        assert_eq!(s.score(Category::Chance), Some(22));
        assert_eq!(s.open_count(), 12);
    }

    #[test]
    fn upper_bonus_triggers_on_crossing_63() {
        let mut s = ScoreState::from_scores([
            (Category::Ones, 3),
            (Category::Twos, 6),
            (Category::Threes, 9),
            (Category::Fours, 12),
            (Category::Fives, 20),
        ])
        .unwrap();
        assert_eq!(s.upper_sum(), 50);
        assert_eq!(s.upper_bonus(), 0);

        // 50 + 18 crosses 63 -> +35 once.
        assert_eq!(s.record(Category::Sixes, 18), Ok(18 + UPPER_BONUS));
        assert_eq!(s.upper_bonus(), UPPER_BONUS);
        assert_eq!(s.total(), 68 + UPPER_BONUS);
    }

    #[test]
    fn lower_categories_never_trigger_bonus() {
        let mut s = ScoreState::from_scores([(Category::Sixes, 30), (Category::Fives, 25)]).unwrap();
        assert_eq!(s.record(Category::Yatzi, 50), Ok(50));
        assert_eq!(s.upper_sum(), 55);
        assert_eq!(s.upper_bonus(), 0);
    }

    #[test]
    fn open_and_used_partition_all_categories() {
        let s = ScoreState::from_scores([(Category::Ones, 2), (Category::FullHouse, 0)]).unwrap();
        let used: Vec<_> = s.used().collect();
        assert_eq!(used, vec![Category::Ones, Category::FullHouse]);
        assert_eq!(s.open().count() + used.len(), 13);
        assert!(!s.is_complete());
    }
}

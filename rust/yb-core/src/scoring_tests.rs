#[cfg(test)]
mod tests {
    use crate::{scores_for_dice, Category, CategoryScorer, StandardScorer};

    fn s(c: Category, dice: [u8; 5]) -> i32 {
        StandardScorer.score(c, &dice)
    }

    #[test]
    fn upper_section_counts_faces() {
        assert_eq!(s(Category::Ones, [1, 1, 1, 1, 1]), 5);
        assert_eq!(s(Category::Sixes, [6, 6, 1, 1, 1]), 12);
        assert_eq!(s(Category::Threes, [3, 3, 4, 5, 6]), 6);
        assert_eq!(s(Category::Twos, [1, 3, 4, 5, 6]), 0);
    }

    #[test]
    fn n_of_a_kind_scores_dice_sum() {
        assert_eq!(s(Category::ThreeOfAKind, [2, 2, 2, 4, 5]), 15);
        assert_eq!(s(Category::FourOfAKind, [4, 4, 4, 4, 2]), 18);
        assert_eq!(s(Category::ThreeOfAKind, [6, 6, 6, 6, 6]), 30);
        assert_eq!(s(Category::FourOfAKind, [3, 3, 3, 4, 5]), 0);
        assert_eq!(s(Category::ThreeOfAKind, [1, 2, 3, 4, 5]), 0);
    }

    #[test]
    fn full_house_requires_exactly_three_and_two() {
        assert_eq!(s(Category::FullHouse, [2, 3, 2, 3, 3]), 25);
        assert_eq!(s(Category::FullHouse, [5, 5, 5, 5, 5]), 0);
        assert_eq!(s(Category::FullHouse, [5, 5, 5, 5, 1]), 0);
    }

    #[test]
    fn straights_are_position_independent() {
        assert_eq!(s(Category::ShortStraight, [4, 1, 3, 2, 6]), 30);
        assert_eq!(s(Category::ShortStraight, [3, 4, 5, 6, 6]), 30);
        assert_eq!(s(Category::ShortStraight, [1, 2, 3, 5, 6]), 0);
        assert_eq!(s(Category::LongStraight, [5, 4, 3, 2, 1]), 40);
        assert_eq!(s(Category::LongStraight, [2, 3, 4, 5, 6]), 40);
        assert_eq!(s(Category::ShortStraight, [2, 3, 4, 5, 6]), 30);
        assert_eq!(s(Category::LongStraight, [1, 2, 3, 4, 6]), 0);
    }

    #[test]
    fn yatzi_and_chance() {
        assert_eq!(s(Category::Yatzi, [6, 6, 6, 6, 6]), 50);
        assert_eq!(s(Category::Yatzi, [6, 6, 6, 6, 5]), 0);
        assert_eq!(s(Category::Chance, [3, 4, 1, 5, 6]), 19);
    }

    #[test]
    fn scores_for_dice_matches_per_category() {
        let dice = [6, 6, 1, 1, 1];
        let all = scores_for_dice(&StandardScorer, &dice);
        for c in Category::ALL {
            assert_eq!(all[c.index()], StandardScorer.score(c, &dice), "{}", c);
        }
        assert_eq!(all[Category::FullHouse.index()], 25);
        assert_eq!(all[Category::ThreeOfAKind.index()], 15);
    }

    #[test]
    fn every_hand_scores_within_bounds() {
        for a in 1u8..=6 {
            for b in 1u8..=6 {
                for c in 1u8..=6 {
                    for d in 1u8..=6 {
                        for e in 1u8..=6 {
                            let dice = [a, b, c, d, e];
                            for cat in Category::ALL {
                                let v = StandardScorer.score(cat, &dice);
                                assert!((0..=50).contains(&v), "{:?} {} -> {}", dice, cat, v);
                            }
                        }
                    }
                }
            }
        }
    }
}

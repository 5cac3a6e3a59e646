//! Property tests for combination search and comparison.
//!
//! Properties tested:
//! - Every play the search offers classifies with the kind and key it reports
//! - Comparison is antisymmetric and consistent with `beats`
//! - Plays offered against a trick actually beat it
//! - A lone card is always a single

use std::cmp::Ordering;

use proptest::prelude::*;

use crate::domain::combo_search::{enumerate_plays, plays_beating};
use crate::domain::combos::{beats, classify, classify_all, compare, ComboKind};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_enumerated_plays_classify_as_reported(
        hand in test_gens::hand(20),
        level in test_gens::level_rank(),
    ) {
        for play in enumerate_plays(&hand, level) {
            let readings = classify_all(&play.cards, level);
            prop_assert!(
                readings.iter().any(|r| r.kind == play.kind && r.key == play.key),
                "{} not among {:?}", play, readings
            );
        }
    }

    #[test]
    fn prop_compare_is_antisymmetric(
        hand in test_gens::hand(16),
        level in test_gens::level_rank(),
    ) {
        let plays = enumerate_plays(&hand, level);
        for a in plays.iter().take(24) {
            for b in plays.iter().take(24) {
                prop_assert_eq!(compare(a, b), compare(b, a).map(Ordering::reverse));
                prop_assert!(!(beats(a, b) && beats(b, a)));
            }
        }
    }

    #[test]
    fn prop_offered_replies_beat_the_trick(
        hand in test_gens::hand(20),
        lead in test_gens::hand(6),
        level in test_gens::level_rank(),
    ) {
        if let Some(current) = classify_all(&lead, level).pop() {
            for reply in plays_beating(&hand, level, &current) {
                prop_assert!(beats(&reply, &current));
            }
        }
    }

    #[test]
    fn prop_lone_card_is_a_single(card in test_gens::card(), level in test_gens::level_rank()) {
        let combo = classify(&[card], level).unwrap();
        prop_assert_eq!(combo.kind, ComboKind::Single);
    }
}

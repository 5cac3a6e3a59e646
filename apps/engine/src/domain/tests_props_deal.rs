//! Property tests for whole deals played by automated players.
//!
//! Properties tested:
//! - Card conservation after every turn
//! - Seats act in rotation from each trick's leader
//! - A finished deal ranks all four seats and the winners are out of cards

use proptest::prelude::*;

use crate::decision::{DecisionMaker, RandomPlayer, SmartAutoPlay};
use crate::domain::deal::{Deal, DealLimits};
use crate::domain::dealing::{deal_hands, full_deck};
use crate::domain::player_view::PlayerView;
use crate::domain::state::{next_seat, Team};
use crate::domain::{test_gens, test_prelude, Card};

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_deal_conserves_cards_and_turn_order(
        seed in test_gens::seed(),
        level in test_gens::level(),
        smart in any::<bool>(),
    ) {
        let deck = sorted(full_deck());
        let limits = DealLimits { max_tricks: 200, max_level_advance: 3 };
        let mut deal = Deal::new(1, level, Team(0), deal_hands(seed), None, 0, limits).unwrap();
        let maker: Box<dyn DecisionMaker> = if smart {
            Box::new(SmartAutoPlay)
        } else {
            Box::new(RandomPlayer::new(Some(seed)))
        };

        while let Some(seat) = deal.next_to_act() {
            if let Some(trick) = deal.current_trick() {
                if let Some((last, _)) = trick.actions.last() {
                    // The next actor sits clockwise of the last one, skipping empty hands.
                    let mut expected = next_seat(*last);
                    while !trick.participants.contains(&expected) {
                        expected = next_seat(expected);
                    }
                    prop_assert_eq!(seat, expected);
                }
            }
            let view = PlayerView::for_seat(&deal, seat, [level, level]);
            let action = maker.choose_play(&view).unwrap();
            deal.play_turn(seat, action).unwrap();
            prop_assert_eq!(sorted(deal.all_cards()), deck.clone());
        }

        let outcome = deal.outcome.clone().unwrap();
        let mut seats = outcome.finishing_order.to_vec();
        seats.sort_unstable();
        prop_assert_eq!(seats, vec![0, 1, 2, 3]);
        if !deal.forced_end {
            for seat in outcome.winning_team.seats() {
                prop_assert!(deal.hands[seat as usize].is_empty());
            }
        }
    }
}

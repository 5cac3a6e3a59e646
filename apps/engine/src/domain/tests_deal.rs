//! Deal state machine driven end to end.

use crate::decision::{DecisionMaker, SimpleAutoPlay};
use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::deal::{Deal, DealLimits, DealStatus};
use crate::domain::dealing::{deal_hands, full_deck};
use crate::domain::player_view::PlayerView;
use crate::domain::rules::HAND_SIZE;
use crate::domain::scoring::DealOutcome;
use crate::domain::state::{rotation_from, team_of, Team};
use crate::domain::tribute::{evaluate, TributeAction};
use crate::domain::tricks::PlayAction;
use crate::domain::Card;

const LIMITS: DealLimits = DealLimits {
    max_tricks: 200,
    max_level_advance: 3,
};

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).unwrap()
}

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

fn play_out(deal: &mut Deal, after_turn: &mut dyn FnMut(&Deal)) {
    let maker = SimpleAutoPlay;
    while let Some(seat) = deal.next_to_act() {
        let view = PlayerView::for_seat(deal, seat, [deal.level, deal.level]);
        let action = maker.choose_play(&view).unwrap();
        deal.play_turn(seat, action).unwrap();
        after_turn(deal);
    }
}

#[test]
fn fresh_deal_holds_the_whole_deck() {
    let deal = Deal::new(1, 2, Team(0), deal_hands(42), None, 0, LIMITS).unwrap();
    assert_eq!(deal.status, DealStatus::Dealt);
    assert!(deal.hands.iter().all(|h| h.len() == HAND_SIZE));
    assert_eq!(sorted(deal.all_cards()), sorted(full_deck()));
}

#[test]
fn auto_played_deal_conserves_cards_and_finishes() {
    let deck = sorted(full_deck());
    let mut deal = Deal::new(1, 2, Team(0), deal_hands(7), None, 0, LIMITS).unwrap();
    play_out(&mut deal, &mut |d: &Deal| {
        assert_eq!(sorted(d.all_cards()), deck)
    });

    assert!(deal.is_finished());
    let outcome = deal.outcome.clone().unwrap();
    let mut seats = outcome.finishing_order.to_vec();
    seats.sort_unstable();
    assert_eq!(seats, vec![0, 1, 2, 3]);
    assert_eq!(outcome.winning_team, team_of(outcome.finishing_order[0]));
    // The winners emptied both hands.
    for seat in outcome.winning_team.seats() {
        assert!(deal.hands[seat as usize].is_empty());
    }
}

#[test]
fn every_trick_follows_rotation_from_its_leader() {
    let mut deal = Deal::new(1, 2, Team(0), deal_hands(99), None, 0, LIMITS).unwrap();
    play_out(&mut deal, &mut |_: &Deal| {});

    for trick in &deal.tricks {
        let expected: Vec<u8> = rotation_from(trick.leader)
            .into_iter()
            .filter(|s| trick.participants.contains(s))
            .collect();
        assert_eq!(trick.participants, expected);
        let acted: Vec<u8> = trick.actions.iter().map(|(s, _)| *s).collect();
        assert_eq!(acted[..], trick.participants[..acted.len()]);
        assert!(trick.winner.is_some());
    }
}

#[test]
fn tribute_blocks_play_until_resolved() {
    let previous = DealOutcome::from_order([0, 1, 2, 3], 3);
    let tribute = evaluate(&previous, [4, 2]).unwrap();
    let hands = [
        cards(&["3C", "9D"]),
        cards(&["5C", "6D"]),
        cards(&["7C", "8D"]),
        cards(&["AS", "4D"]),
    ];
    let mut deal = Deal::new(2, 4, Team(0), hands, tribute, 0, LIMITS).unwrap();
    assert_eq!(deal.status, DealStatus::TributeInProgress);
    let before = sorted(deal.all_cards());

    let err = deal.play_turn(0, PlayAction::Play(cards(&["3C"]))).unwrap_err();
    assert_eq!(err.code(), "INVALID_STATE");

    let Some(TributeAction::SelectTribute { seat, options }) = deal.tribute_action() else {
        panic!("expected a tribute selection");
    };
    deal.select_tribute(seat, options[0]).unwrap();
    let Some(TributeAction::ReturnTribute { seat, options, .. }) = deal.tribute_action() else {
        panic!("expected a return");
    };
    deal.return_tribute(seat, options[0]).unwrap();
    assert!(deal.tribute_ready());

    let leader = deal.resolve_tribute().unwrap();
    assert_eq!(leader, 3);
    assert_eq!(deal.status, DealStatus::Playing);
    assert_eq!(deal.next_to_act(), Some(3));
    assert_eq!(deal.hands.iter().map(Vec::len).sum::<usize>(), 8);
    assert_eq!(sorted(deal.all_cards()), before);
}

#[test]
fn pooled_tribute_moves_cards_without_creating_or_losing_any() {
    let previous = DealOutcome::from_order([0, 2, 1, 3], 3);
    let tribute = evaluate(&previous, [5, 2]).unwrap();
    let hands = [
        cards(&["3C", "9D"]),
        cards(&["AS", "4D"]),
        cards(&["7C", "8D"]),
        cards(&["KS", "4H"]),
    ];
    let mut deal = Deal::new(2, 5, Team(0), hands, tribute, 0, LIMITS).unwrap();
    assert_eq!(deal.status, DealStatus::TributeInProgress);
    let before = sorted(deal.all_cards());

    while let Some(action) = deal.tribute_action() {
        let card = action.options()[0];
        let answered = match action {
            TributeAction::SelectTribute { seat, .. } => deal.select_tribute(seat, card),
            TributeAction::ChooseTribute { seat, .. } => deal.choose_tribute(seat, card),
            TributeAction::ReturnTribute { seat, .. } => deal.return_tribute(seat, card),
        };
        answered.unwrap();
        assert_eq!(sorted(deal.all_cards()), before);
    }
    assert!(deal.tribute_ready());
    deal.resolve_tribute().unwrap();

    assert_eq!(deal.status, DealStatus::Playing);
    assert_eq!(sorted(deal.all_cards()), before);
    assert!(deal.hands.iter().all(|h| h.len() == 2));
    let (ace, king) = (cards(&["AS"])[0], cards(&["KS"])[0]);
    assert!(deal.hands[1].iter().chain(&deal.hands[3]).all(|c| *c != ace && *c != king));
}

#[test]
fn immune_tribute_leaves_deal_ready_to_play() {
    let previous = DealOutcome::from_order([1, 3, 0, 2], 3);
    let tribute = evaluate(&previous, [2, 5]).unwrap();
    let hands = [
        cards(&["BJ", "9D"]),
        cards(&["5C", "6D"]),
        cards(&["BJ", "8D"]),
        cards(&["AS", "4D"]),
    ];
    let deal = Deal::new(2, 5, Team(1), hands, tribute, 1, LIMITS).unwrap();
    assert_eq!(deal.status, DealStatus::Dealt);
    assert_eq!(deal.next_to_act(), Some(1));
    assert_eq!(deal.tribute_action(), None);
    assert_eq!(deal.hands.iter().map(Vec::len).sum::<usize>(), 8);
}

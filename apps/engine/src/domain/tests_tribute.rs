//! Tribute trigger table, selection policies and the exchange itself.

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{DealOutcome, VictoryKind};
use crate::domain::tribute::{
    allowed_returns, allowed_tributes, evaluate, rule_for, SkipReason, TributeAction,
    TributePhase, TributeStatus,
};
use crate::domain::{Card, Rank};

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).unwrap()
}

fn sorted(tokens: &[&str]) -> Vec<Card> {
    let mut c = cards(tokens);
    c.sort();
    c
}

fn phase(order: [u8; PLAYERS], levels: [u8; 2]) -> TributePhase {
    evaluate(&DealOutcome::from_order(order, 3), levels)
        .unwrap()
        .unwrap()
}

#[test]
fn trigger_table_covers_every_victory() {
    for victory in [
        VictoryKind::DoubleDown,
        VictoryKind::SingleLast,
        VictoryKind::PartnerLast,
    ] {
        let rule = rule_for(victory).unwrap();
        assert_eq!(rule.payer_ranks.len(), rule.receiver_ranks.len());
    }

    let double_down = phase([0, 2, 1, 3], [5, 2]);
    assert_eq!(double_down.payers, vec![1, 3]);
    assert_eq!(double_down.receivers, vec![0, 2]);
    assert!(double_down.pooled);
    assert_eq!(double_down.level, Rank::Five);

    let single_last = phase([0, 1, 2, 3], [4, 2]);
    assert_eq!(single_last.payers, vec![3]);
    assert_eq!(single_last.receivers, vec![0]);

    let partner_last = phase([1, 0, 2, 3], [2, 3]);
    assert_eq!(partner_last.payers, vec![2]);
    assert_eq!(partner_last.receivers, vec![1]);
    assert_eq!(partner_last.level, Rank::Three);
}

#[test]
fn evaluation_is_pure() {
    let outcome = DealOutcome::from_order([3, 1, 0, 2], 3);
    let a = evaluate(&outcome, [2, 5]).unwrap();
    let b = evaluate(&outcome, [2, 5]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tribute_policy_skips_the_wildcard() {
    let level = Rank::Two;
    // 2H is wild, 2S is the level card and outranks the Ace.
    assert_eq!(allowed_tributes(&cards(&["2H", "2S", "AC"]), level), cards(&["2S"]));
    assert_eq!(allowed_tributes(&cards(&["2H", "BJ", "AC"]), level), cards(&["BJ"]));
    assert_eq!(
        allowed_tributes(&cards(&["KC", "KS", "3D"]), level),
        cards(&["KC", "KS"])
    );
}

#[test]
fn return_policy_prefers_ten_or_lower() {
    let level = Rank::Two;
    assert_eq!(allowed_returns(&cards(&["3C", "JS", "BJ"]), level), cards(&["3C"]));
    assert_eq!(
        allowed_returns(&cards(&["TC", "9D", "QS"]), level),
        cards(&["9D", "TC"])
    );
    // Nothing of ten or lower: fall back to the lowest card.
    assert_eq!(allowed_returns(&cards(&["JS", "QS", "BJ"]), level), cards(&["JS"]));
}

#[test]
fn single_tribute_runs_select_return_resolve() {
    let mut phase = phase([0, 1, 2, 3], [4, 2]);
    let mut hands = [
        cards(&["3C", "JD"]),
        cards(&["5C"]),
        cards(&["6C"]),
        cards(&["AS", "KS", "7D"]),
    ];

    match phase.next_action(&hands) {
        Some(TributeAction::SelectTribute { seat, options }) => {
            assert_eq!(seat, 3);
            assert_eq!(options, cards(&["AS"]));
        }
        other => panic!("expected SelectTribute, got {other:?}"),
    }
    let err = phase.select_tribute(3, cards(&["KS"])[0], &hands[3]).unwrap_err();
    assert_eq!(err.code(), "ILLEGAL_SELECTION");
    let err = phase.select_tribute(1, cards(&["5C"])[0], &hands[1]).unwrap_err();
    assert_eq!(err.code(), "ILLEGAL_SELECTION");
    phase.select_tribute(3, cards(&["AS"])[0], &hands[3]).unwrap();

    match phase.next_action(&hands) {
        Some(TributeAction::ReturnTribute { seat, to, options }) => {
            assert_eq!((seat, to), (0, 3));
            assert_eq!(options, cards(&["3C"]));
        }
        other => panic!("expected ReturnTribute, got {other:?}"),
    }
    phase.return_card(0, cards(&["3C"])[0], &hands[0]).unwrap();
    assert!(phase.is_ready());
    assert_eq!(phase.next_action(&hands), None);

    let leader = phase.resolve(&mut hands).unwrap();
    assert_eq!(leader, 3);
    assert_eq!(phase.status, TributeStatus::Resolved);
    assert_eq!(hands[0], sorted(&["JD", "AS"]));
    assert_eq!(hands[3], sorted(&["KS", "7D", "3C"]));
}

#[test]
fn double_down_pools_tributes_for_the_winner() {
    let mut phase = phase([0, 2, 1, 3], [2, 2]);
    let mut hands = [
        cards(&["3C", "4C"]),
        cards(&["AS", "KS", "7D"]),
        cards(&["5C", "6C"]),
        cards(&["KH", "QD", "8D"]),
    ];
    phase.select_tribute(1, cards(&["AS"])[0], &hands[1]).unwrap();
    phase.select_tribute(3, cards(&["KH"])[0], &hands[3]).unwrap();
    assert_eq!(phase.status, TributeStatus::AwaitingSelection);

    match phase.next_action(&hands) {
        Some(TributeAction::ChooseTribute { seat, options }) => {
            assert_eq!(seat, 0);
            assert_eq!(options, cards(&["KH", "AS"]));
        }
        other => panic!("expected ChooseTribute, got {other:?}"),
    }
    let err = phase.choose_tribute(2, cards(&["AS"])[0]).unwrap_err();
    assert_eq!(err.code(), "ILLEGAL_SELECTION");
    phase.choose_tribute(0, cards(&["AS"])[0]).unwrap();

    phase.return_card(0, cards(&["3C"])[0], &hands[0]).unwrap();
    phase.return_card(2, cards(&["5C"])[0], &hands[2]).unwrap();
    let leader = phase.resolve(&mut hands).unwrap();

    assert_eq!(leader, 1, "payer of the ace leads");
    assert_eq!(hands[0], sorted(&["4C", "AS"]));
    assert_eq!(hands[1], sorted(&["KS", "7D", "3C"]));
    assert_eq!(hands[2], sorted(&["6C", "KH"]));
    assert_eq!(hands[3], sorted(&["QD", "8D", "5C"]));
}

#[test]
fn equal_tributes_lead_from_first_payer_after_the_winner() {
    let mut phase = phase([2, 0, 3, 1], [2, 2]);
    let mut hands = [
        cards(&["5C"]),
        cards(&["AS", "7D"]),
        cards(&["3C"]),
        cards(&["AH", "8D"]),
    ];
    assert_eq!(phase.payers, vec![3, 1]);
    phase.select_tribute(3, cards(&["AH"])[0], &hands[3]).unwrap();
    phase.select_tribute(1, cards(&["AS"])[0], &hands[1]).unwrap();
    phase.choose_tribute(2, cards(&["AS"])[0]).unwrap();
    phase.return_card(2, cards(&["3C"])[0], &hands[2]).unwrap();
    phase.return_card(0, cards(&["5C"])[0], &hands[0]).unwrap();
    assert_eq!(phase.resolve(&mut hands).unwrap(), 3);
}

#[test]
fn both_big_jokers_grant_immunity() {
    let mut phase = phase([0, 2, 1, 3], [2, 2]);
    let hands = [
        cards(&["3C"]),
        cards(&["BJ", "7D"]),
        cards(&["5C"]),
        cards(&["BJ", "8D"]),
    ];
    assert!(phase.apply_immunity(&hands));
    assert_eq!(phase.status, TributeStatus::Skipped(SkipReason::Immunity));
    assert_eq!(phase.first_leader, Some(0));
    assert_eq!(phase.next_action(&hands), None);
}

#[test]
fn one_big_joker_is_not_enough() {
    let mut phase = phase([0, 1, 2, 3], [2, 2]);
    let hands = [cards(&["3C"]), cards(&["BJ"]), cards(&["5C"]), cards(&["BJ", "8D"])];
    // Only seat 3 pays after a single-last win.
    assert!(!phase.apply_immunity(&hands));
    assert_eq!(phase.status, TributeStatus::Pending);
}

#[test]
fn settled_phase_rejects_further_input() {
    let mut phase = phase([0, 1, 2, 3], [2, 2]);
    let mut hands = [cards(&["3C"]), cards(&["4C"]), cards(&["5C"]), cards(&["AS"])];
    phase.select_tribute(3, cards(&["AS"])[0], &hands[3]).unwrap();
    phase.return_card(0, cards(&["3C"])[0], &hands[0]).unwrap();
    phase.resolve(&mut hands).unwrap();

    let before = phase.clone();
    let err = phase.select_tribute(3, cards(&["3C"])[0], &hands[3]).unwrap_err();
    assert_eq!(err.code(), "INVALID_STATE");
    assert!(phase.resolve(&mut hands).is_err());
    assert_eq!(phase, before);
}

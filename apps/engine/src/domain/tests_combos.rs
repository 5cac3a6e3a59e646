//! Classification and comparison cases across levels and wildcards.

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::combos::{beats, classify, classify_all, ComboKind};
use crate::domain::Rank;

fn read(tokens: &[&str], level: Rank) -> Option<(ComboKind, u8)> {
    classify(&try_parse_cards(tokens).unwrap(), level).map(|c| (c.kind, c.key))
}

#[test]
fn natural_shapes() {
    let level = Rank::Two;
    assert_eq!(read(&["9C"], level), Some((ComboKind::Single, 9)));
    assert_eq!(read(&["9C", "9S"], level), Some((ComboKind::Pair, 9)));
    assert_eq!(read(&["9C", "9S", "9D"], level), Some((ComboKind::Triple, 9)));
    assert_eq!(
        read(&["9C", "9S", "9D", "4C", "4H"], level),
        Some((ComboKind::FullHouse, 9))
    );
    assert_eq!(
        read(&["3C", "4S", "5D", "6C", "7H"], level),
        Some((ComboKind::Straight, 7))
    );
    assert_eq!(
        read(&["3C", "3S", "4D", "4C", "5H", "5S"], level),
        Some((ComboKind::Tube, 5))
    );
    assert_eq!(
        read(&["7C", "7S", "7D", "8C", "8H", "8S"], level),
        Some((ComboKind::Plate, 8))
    );
}

#[test]
fn ace_plays_low_or_high_but_never_wraps() {
    let level = Rank::Nine;
    assert_eq!(
        read(&["AC", "2S", "3D", "4C", "5H"], level),
        Some((ComboKind::Straight, 5))
    );
    assert_eq!(
        read(&["AC", "AS", "2D", "2C", "3H", "3S"], level),
        Some((ComboKind::Tube, 3))
    );
    assert_eq!(
        read(&["TC", "JS", "QD", "KC", "AH"], level),
        Some((ComboKind::Straight, 14))
    );
    assert_eq!(read(&["QC", "KS", "AD", "2C", "3H"], level), None);
}

#[test]
fn jokers_only_pair_with_their_twin() {
    let level = Rank::Two;
    assert_eq!(read(&["SJ", "SJ"], level), Some((ComboKind::Pair, 16)));
    assert_eq!(read(&["BJ", "BJ"], level), Some((ComboKind::Pair, 17)));
    assert_eq!(read(&["SJ", "BJ"], level), None);
    assert_eq!(
        read(&["SJ", "SJ", "BJ", "BJ"], level),
        Some((ComboKind::JokerBomb, 17))
    );
    // The wildcard never stands in for a joker.
    assert_eq!(read(&["2H", "SJ"], level), None);
}

#[test]
fn level_card_outranks_the_ace() {
    let level = Rank::Five;
    let five = classify(&try_parse_cards(["5S"]).unwrap(), level).unwrap();
    let ace = classify(&try_parse_cards(["AS"]).unwrap(), level).unwrap();
    let small_joker = classify(&try_parse_cards(["SJ"]).unwrap(), level).unwrap();
    assert!(beats(&five, &ace));
    assert!(beats(&small_joker, &five));
    // Inside a sequence the level card keeps its natural slot.
    assert_eq!(
        read(&["3C", "4S", "5D", "6C", "7S"], level),
        Some((ComboKind::Straight, 7))
    );
}

#[test]
fn wildcard_completes_shapes() {
    let level = Rank::Two;
    assert_eq!(
        read(&["9C", "9S", "9D", "4C", "2H"], level),
        Some((ComboKind::FullHouse, 9))
    );
    assert_eq!(
        read(&["9C", "9S", "9D", "2H"], level),
        Some((ComboKind::Bomb, 9))
    );
    assert_eq!(
        read(&["3C", "4S", "2H", "6C", "7D"], level),
        Some((ComboKind::Straight, 7))
    );
}

#[test]
fn strongest_reading_wins_and_all_readings_are_listed() {
    // Five spades with a wildcard gap can read as a straight flush.
    let level = Rank::Two;
    let cards = try_parse_cards(["5S", "6S", "7S", "8S", "2H"]).unwrap();
    let readings = classify_all(&cards, level);
    assert!(readings.iter().any(|c| c.kind == ComboKind::Straight));
    let best = classify(&cards, level).unwrap();
    assert_eq!(best.kind, ComboKind::StraightFlush);
    assert_eq!(best.key, 9);
}

#[test]
fn non_bombs_need_matching_shape() {
    let level = Rank::Two;
    let cards = |t: &[&str]| classify(&try_parse_cards(t).unwrap(), level).unwrap();
    let low_straight = cards(&["3C", "4S", "5D", "6C", "7H"]);
    let high_straight = cards(&["4C", "5S", "6D", "7C", "8H"]);
    let full_house = cards(&["KC", "KS", "KD", "3C", "3H"]);
    let bomb = cards(&["4C", "4S", "4D", "4H"]);

    assert!(beats(&high_straight, &low_straight));
    assert!(!beats(&low_straight, &high_straight));
    assert!(!beats(&full_house, &low_straight));
    assert!(beats(&bomb, &full_house));
    assert!(!beats(&high_straight, &bomb));
}

//! Card game logic: level-aware card values, wildcards, and hand bookkeeping

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Value of the promoted level-rank card.
pub const LEVEL_CARD_VALUE: u8 = 15;
pub const SMALL_JOKER_VALUE: u8 = 16;
pub const BIG_JOKER_VALUE: u8 = 17;

/// Strength of a single card while `level` is in effect.
///
/// Naturals keep their face number (2..=14) except the level rank, which
/// sits above the Ace and below the jokers.
pub fn card_value(card: Card, level: Rank) -> u8 {
    match card {
        Card::Standard { rank, .. } if rank == level => LEVEL_CARD_VALUE,
        Card::Standard { rank, .. } => rank.natural(),
        Card::SmallJoker => SMALL_JOKER_VALUE,
        Card::BigJoker => BIG_JOKER_VALUE,
    }
}

/// Value of a bare rank under `level` (used for same-rank groups).
pub fn rank_value(rank: Rank, level: Rank) -> u8 {
    card_value(Card::new(rank, Suit::Clubs), level)
}

/// The Hearts card of the level rank stands in for any non-joker card.
pub fn is_wildcard(card: Card, level: Rank) -> bool {
    card == Card::new(level, Suit::Hearts)
}

/// Sort ascending by value under `level`, ties broken by storage order.
pub fn sort_by_value(cards: &mut [Card], level: Rank) {
    cards.sort_by_key(|&c| (card_value(c, level), c));
}

/// Whether `hand` contains every card of `cards`, counting duplicates.
pub fn holds_all(hand: &[Card], cards: &[Card]) -> bool {
    let mut pool: Vec<Card> = hand.to_vec();
    for card in cards {
        match pool.iter().position(|c| c == card) {
            Some(pos) => {
                pool.swap_remove(pos);
            }
            None => return false,
        }
    }
    true
}

/// Remove `cards` from `hand` (multiset semantics). Leaves `hand` untouched on error.
pub fn remove_cards(hand: &mut Vec<Card>, cards: &[Card]) -> Result<(), DomainError> {
    if !holds_all(hand, cards) {
        return Err(DomainError::validation(
            ValidationKind::CardsNotHeld,
            "Cards not in hand",
        ));
    }
    for card in cards {
        if let Some(pos) = hand.iter().position(|c| c == card) {
            hand.remove(pos);
        }
    }
    Ok(())
}

pub fn count_card(hand: &[Card], card: Card) -> usize {
    hand.iter().filter(|&&c| c == card).count()
}

// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::dealing::full_deck;
use crate::domain::rules::{MAX_LEVEL, MIN_LEVEL};
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Any card of the double deck, jokers included.
pub fn card() -> impl Strategy<Value = Card> {
    prop_oneof![
        12 => (rank(), suit()).prop_map(|(rank, suit)| Card::new(rank, suit)),
        1 => Just(Card::SmallJoker),
        1 => Just(Card::BigJoker),
    ]
}

/// A level in 2..=14.
pub fn level() -> impl Strategy<Value = u8> {
    MIN_LEVEL..=MAX_LEVEL
}

/// A level rank.
pub fn level_rank() -> impl Strategy<Value = Rank> {
    rank()
}

/// A hand drawn without replacement from the double deck.
pub fn hand(max_len: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(full_deck())
        .prop_shuffle()
        .prop_flat_map(move |deck| {
            (1..=max_len).prop_map(move |n| {
                let mut cards = deck[..n].to_vec();
                cards.sort();
                cards
            })
        })
}

/// Deal seeds.
pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

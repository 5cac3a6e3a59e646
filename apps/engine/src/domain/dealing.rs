//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{DECKS, HAND_SIZE, PLAYERS};
use crate::domain::{Card, Rank, Suit};

/// Generate the full double deck (108 cards) in standard order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(54 * DECKS);
    for _ in 0..DECKS {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                deck.push(Card::new(rank, suit));
            }
        }
        deck.push(Card::SmallJoker);
        deck.push(Card::BigJoker);
    }
    deck
}

/// Deal the double deck into four 27-card hands.
///
/// Hands are sorted in storage order; callers sort by level value when they
/// need play order.
pub fn deal_hands(seed: u64) -> [Vec<Card>; PLAYERS] {
    let mut deck = full_deck();
    deck.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, chunk) in deck.chunks(HAND_SIZE).enumerate().take(PLAYERS) {
        let mut hand = chunk.to_vec();
        hand.sort();
        hands[seat] = hand;
    }
    hands
}

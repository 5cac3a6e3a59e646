//! Enumerate the combinations a hand can form.
//!
//! The search builds plays from natural groups and lets wildcards fill gaps
//! in same-rank groups and sequences. It is not exhaustive over every exotic
//! wildcard reading, but every play it returns is accepted by
//! [`classify_all`](super::combos::classify_all) with the kind and key it
//! reports.

use super::cards_logic::{card_value, is_wildcard, rank_value, sort_by_value, BIG_JOKER_VALUE};
use super::cards_types::{Card, Rank, Suit};
use super::combos::{beats, ComboKind, Combination};
use super::rules::MAX_BOMB_SIZE;

/// A same-rank group: natural cards plus the number of wildcards it borrows.
#[derive(Debug, Clone)]
struct Group {
    rank: Option<Rank>,
    key: u8,
    naturals: Vec<Card>,
    wilds: usize,
}

struct HandIndex {
    level: Rank,
    by_rank: [Vec<Card>; 13],
    wilds: Vec<Card>,
    small_jokers: Vec<Card>,
    big_jokers: Vec<Card>,
}

impl HandIndex {
    fn new(hand: &[Card], level: Rank) -> Self {
        let mut by_rank: [Vec<Card>; 13] = Default::default();
        let mut wilds = Vec::new();
        let mut small_jokers = Vec::new();
        let mut big_jokers = Vec::new();
        for &card in hand {
            match card {
                c if is_wildcard(c, level) => wilds.push(c),
                Card::Standard { rank, .. } => by_rank[rank as usize].push(card),
                Card::SmallJoker => small_jokers.push(card),
                Card::BigJoker => big_jokers.push(card),
            }
        }
        for group in by_rank.iter_mut() {
            group.sort();
        }
        Self {
            level,
            by_rank,
            wilds,
            small_jokers,
            big_jokers,
        }
    }

    fn naturals(&self, rank: Rank) -> &[Card] {
        &self.by_rank[rank as usize]
    }

    /// Same-rank group of `size` cards using as few wildcards as possible.
    fn group(&self, rank: Rank, size: usize) -> Option<Group> {
        let naturals = self.naturals(rank);
        // Hearts level cards are themselves of the level rank.
        if naturals.is_empty() && rank != self.level {
            return None;
        }
        let take = naturals.len().min(size);
        let wilds = size - take;
        if wilds > self.wilds.len() {
            return None;
        }
        Some(Group {
            rank: Some(rank),
            key: rank_value(rank, self.level),
            naturals: naturals[..take].to_vec(),
            wilds,
        })
    }

    fn joker_pairs(&self) -> Vec<Group> {
        let mut out = Vec::new();
        for jokers in [&self.small_jokers, &self.big_jokers] {
            if jokers.len() >= 2 {
                out.push(Group {
                    rank: None,
                    key: card_value(jokers[0], self.level),
                    naturals: jokers[..2].to_vec(),
                    wilds: 0,
                });
            }
        }
        out
    }

    fn with_wilds(&self, mut cards: Vec<Card>, wilds: usize) -> Vec<Card> {
        cards.extend(self.wilds.iter().take(wilds).copied());
        cards
    }

    /// Runs of `width` consecutive ranks, `copies` cards each, ending at `top`.
    /// `suit` restricts naturals to one suit (straight flushes).
    fn run(&self, top: u8, width: u8, copies: usize, suit: Option<Suit>) -> Option<Vec<Card>> {
        let mut cards = Vec::with_capacity(width as usize * copies);
        let mut wilds = 0usize;
        let mut first_suit: Option<Suit> = None;
        for n in (top + 1 - width)..=top {
            let rank = Rank::from_natural(n)?;
            let pool: Vec<Card> = self
                .naturals(rank)
                .iter()
                .copied()
                .filter(|c| suit.is_none() || c.suit() == suit)
                .collect();
            let mut picked: Vec<Card> = Vec::with_capacity(copies);
            if copies == 1 && suit.is_none() {
                // Prefer mixing suits so a plain straight stays plain.
                let choice = pool
                    .iter()
                    .find(|c| first_suit.is_some() && c.suit() != first_suit)
                    .or_else(|| pool.first());
                if let Some(&c) = choice {
                    first_suit.get_or_insert(c.suit().unwrap_or(Suit::Clubs));
                    picked.push(c);
                }
            } else {
                picked.extend(pool.iter().take(copies).copied());
            }
            wilds += copies - picked.len();
            cards.extend(picked);
        }
        if wilds > self.wilds.len() || cards.is_empty() {
            return None;
        }
        Some(self.with_wilds(cards, wilds))
    }
}

/// All plays the hand can form, weakest first within each kind.
pub fn enumerate_plays(hand: &[Card], level: Rank) -> Vec<Combination> {
    let index = HandIndex::new(hand, level);
    let mut out: Vec<Combination> = Vec::new();
    let mut push = |kind: ComboKind, key: u8, cards: Vec<Card>| {
        let duplicate = out
            .iter()
            .any(|c| c.kind == kind && c.key == key && c.len() == cards.len());
        if !duplicate {
            let mut cards = cards;
            sort_by_value(&mut cards, level);
            out.push(Combination { kind, key, cards });
        }
    };

    // Singles
    let mut seen: Vec<Card> = Vec::new();
    for &card in hand {
        if !seen.contains(&card) {
            seen.push(card);
            push(ComboKind::Single, card_value(card, level), vec![card]);
        }
    }

    // Same-rank groups: pairs, triples, bombs
    let mut triples: Vec<Group> = Vec::new();
    let mut pairs: Vec<Group> = index.joker_pairs();
    for rank in Rank::ALL {
        for size in 2..=MAX_BOMB_SIZE {
            let Some(group) = index.group(rank, size) else {
                break;
            };
            let kind = match size {
                2 => ComboKind::Pair,
                3 => ComboKind::Triple,
                _ => ComboKind::Bomb,
            };
            match size {
                2 => pairs.push(group.clone()),
                3 => triples.push(group.clone()),
                _ => {}
            }
            push(kind, group.key, index.with_wilds(group.naturals, group.wilds));
        }
    }
    for pair in index.joker_pairs() {
        push(ComboKind::Pair, pair.key, pair.naturals);
    }
    if index.small_jokers.len() >= 2 && index.big_jokers.len() >= 2 {
        let mut cards = index.small_jokers[..2].to_vec();
        cards.extend_from_slice(&index.big_jokers[..2]);
        push(ComboKind::JokerBomb, BIG_JOKER_VALUE, cards);
    }

    // Full houses
    for triple in &triples {
        for pair in &pairs {
            if pair.rank.is_some() && pair.rank == triple.rank {
                continue;
            }
            let wilds = triple.wilds + pair.wilds;
            if wilds > index.wilds.len() {
                continue;
            }
            let mut cards = triple.naturals.clone();
            cards.extend_from_slice(&pair.naturals);
            push(ComboKind::FullHouse, triple.key, index.with_wilds(cards, wilds));
        }
    }

    // Sequences
    for top in 5..=14u8 {
        if let Some(cards) = index.run(top, 5, 1, None) {
            let kind = if is_flush(&cards, level) {
                ComboKind::StraightFlush
            } else {
                ComboKind::Straight
            };
            push(kind, top, cards);
        }
        for suit in Suit::ALL {
            if let Some(cards) = index.run(top, 5, 1, Some(suit)) {
                push(ComboKind::StraightFlush, top, cards);
            }
        }
    }
    for top in 3..=14u8 {
        if let Some(cards) = index.run(top, 3, 2, None) {
            push(ComboKind::Tube, top, cards);
        }
    }
    for top in 2..=14u8 {
        if let Some(cards) = index.run(top, 2, 3, None) {
            push(ComboKind::Plate, top, cards);
        }
    }

    out
}

/// A five-card run whose naturals share a suit and has no wildcards.
fn is_flush(cards: &[Card], level: Rank) -> bool {
    if cards.iter().any(|&c| is_wildcard(c, level)) {
        return false;
    }
    let first = cards.first().and_then(|c| c.suit());
    cards.iter().all(|c| c.suit() == first)
}

/// Plays from `hand` that top `current`.
pub fn plays_beating(hand: &[Card], level: Rank, current: &Combination) -> Vec<Combination> {
    enumerate_plays(hand, level)
        .into_iter()
        .filter(|c| beats(c, current))
        .collect()
}

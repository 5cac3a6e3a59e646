//! Combination classification and comparison.
//!
//! A play is a multiset of cards. [`classify_all`] lists every way the cards
//! can be read as a combination (wildcards may stand in for any non-joker
//! card), [`classify`] picks the strongest reading, and [`beats`] decides
//! whether one combination tops another within a trick.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::cards_logic::{card_value, is_wildcard, rank_value, sort_by_value, BIG_JOKER_VALUE};
use super::cards_parsing::format_cards;
use super::cards_types::{Card, Rank, Suit};
use super::rules::MAX_BOMB_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComboKind {
    Single,
    Pair,
    Triple,
    FullHouse,
    Straight,
    Tube,
    Plate,
    Bomb,
    StraightFlush,
    JokerBomb,
}

impl ComboKind {
    pub fn is_bomb(self) -> bool {
        matches!(
            self,
            ComboKind::Bomb | ComboKind::StraightFlush | ComboKind::JokerBomb
        )
    }
}

/// A classified play.
///
/// `key` orders combinations of the same kind: the level-aware value for
/// same-rank groups, the top natural rank for sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combination {
    pub kind: ComboKind,
    pub key: u8,
    pub cards: Vec<Card>,
}

impl Combination {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    /// Bomb ladder: 4 < 5 < straight flush < 6 < ... < 10 < joker bomb.
    pub fn bomb_tier(&self) -> Option<u8> {
        match self.kind {
            ComboKind::Bomb if self.len() <= 5 => Some(self.len() as u8),
            ComboKind::Bomb => Some(self.len() as u8 + 1),
            ComboKind::StraightFlush => Some(6),
            ComboKind::JokerBomb => Some(MAX_BOMB_SIZE as u8 + 2),
            _ => None,
        }
    }

    /// Total order used to pick among readings of the same cards.
    pub(crate) fn strength(&self) -> (u8, u8) {
        (self.bomb_tier().unwrap_or(0), self.key)
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) [{}]", self.kind, self.key, format_cards(&self.cards))
    }
}

/// Relative strength of two combinations, `None` when they cannot meet in a trick.
pub fn compare(a: &Combination, b: &Combination) -> Option<Ordering> {
    match (a.bomb_tier(), b.bomb_tier()) {
        (Some(ta), Some(tb)) => Some((ta, a.key).cmp(&(tb, b.key))),
        (Some(_), None) => Some(Ordering::Greater),
        (None, Some(_)) => Some(Ordering::Less),
        (None, None) if a.kind == b.kind && a.len() == b.len() => Some(a.key.cmp(&b.key)),
        (None, None) => None,
    }
}

/// Whether `candidate` may be played over `current`.
pub fn beats(candidate: &Combination, current: &Combination) -> bool {
    compare(candidate, current) == Some(Ordering::Greater)
}

/// Strongest reading of `cards`, or `None` if they form no combination.
pub fn classify(cards: &[Card], level: Rank) -> Option<Combination> {
    classify_all(cards, level).pop()
}

/// Every distinct reading of `cards`, weakest first.
pub fn classify_all(cards: &[Card], level: Rank) -> Vec<Combination> {
    if cards.is_empty() {
        return Vec::new();
    }

    let wild_positions: Vec<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, &c)| is_wildcard(c, level))
        .map(|(i, _)| i)
        .collect();

    let mut readings: Vec<(ComboKind, u8)> = Vec::new();
    if cards.len() == 1 || wild_positions.is_empty() {
        readings.extend(classify_natural(cards, level));
    } else {
        let mut options = Vec::with_capacity(53);
        options.push(Card::new(level, Suit::Hearts));
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let c = Card::new(rank, suit);
                if !options.contains(&c) {
                    options.push(c);
                }
            }
        }
        let mut working = cards.to_vec();
        substitute(&mut working, &wild_positions, 0, &options, level, &mut readings);
    }

    let mut sorted_cards = cards.to_vec();
    sort_by_value(&mut sorted_cards, level);

    let mut out: Vec<Combination> = Vec::new();
    for (kind, key) in readings {
        if out.iter().any(|c| c.kind == kind && c.key == key) {
            continue;
        }
        out.push(Combination {
            kind,
            key,
            cards: sorted_cards.clone(),
        });
    }
    out.sort_by_key(|c| c.strength());
    out
}

/// Assign substitutes to the wildcards at `positions[idx..]`, in non-decreasing
/// option order so that two wildcards are not tried in both orders.
fn substitute(
    working: &mut Vec<Card>,
    positions: &[usize],
    min_option: usize,
    options: &[Card],
    level: Rank,
    out: &mut Vec<(ComboKind, u8)>,
) {
    let Some((&pos, rest)) = positions.split_first() else {
        if let Some(reading) = classify_natural(working, level) {
            if !out.contains(&reading) {
                out.push(reading);
            }
        }
        return;
    };
    for (i, &option) in options.iter().enumerate().skip(min_option) {
        working[pos] = option;
        substitute(working, rest, i, options, level, out);
    }
}

/// Classify with every card taken at face value.
fn classify_natural(cards: &[Card], level: Rank) -> Option<(ComboKind, u8)> {
    let n = cards.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some((ComboKind::Single, card_value(cards[0], level)));
    }

    let small = cards.iter().filter(|&&c| c == Card::SmallJoker).count();
    let big = cards.iter().filter(|&&c| c == Card::BigJoker).count();
    let jokers = small + big;

    if jokers > 0 {
        if n == 4 && small == 2 && big == 2 {
            return Some((ComboKind::JokerBomb, BIG_JOKER_VALUE));
        }
        if n == 2 && (small == 2 || big == 2) {
            return Some((ComboKind::Pair, card_value(cards[0], level)));
        }
        if n == 5 && jokers == 2 && (small == 2 || big == 2) {
            let naturals: Vec<Rank> = cards.iter().filter_map(|c| c.rank()).collect();
            if naturals.iter().all(|&r| r == naturals[0]) {
                return Some((ComboKind::FullHouse, rank_value(naturals[0], level)));
            }
        }
        return None;
    }

    let mut counts = [0u8; 13];
    for card in cards {
        if let Some(rank) = card.rank() {
            counts[rank as usize] += 1;
        }
    }
    let distinct: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .copied()
        .filter(|&r| counts[r as usize] > 0)
        .map(|r| (r, counts[r as usize]))
        .collect();

    if distinct.len() == 1 {
        let key = rank_value(distinct[0].0, level);
        return match n {
            2 => Some((ComboKind::Pair, key)),
            3 => Some((ComboKind::Triple, key)),
            4..=MAX_BOMB_SIZE => Some((ComboKind::Bomb, key)),
            _ => None,
        };
    }

    let ranks: Vec<Rank> = distinct.iter().map(|(r, _)| *r).collect();
    match n {
        5 if distinct.len() == 2 => {
            let triple = distinct.iter().find(|(_, c)| *c == 3)?;
            distinct.iter().find(|(_, c)| *c == 2)?;
            Some((ComboKind::FullHouse, rank_value(triple.0, level)))
        }
        5 if distinct.len() == 5 => {
            let top = sequence_top(&ranks)?;
            let first_suit = cards[0].suit();
            let flush = cards.iter().all(|c| c.suit() == first_suit);
            if flush {
                Some((ComboKind::StraightFlush, top))
            } else {
                Some((ComboKind::Straight, top))
            }
        }
        6 if distinct.len() == 3 && distinct.iter().all(|(_, c)| *c == 2) => {
            Some((ComboKind::Tube, sequence_top(&ranks)?))
        }
        6 if distinct.len() == 2 && distinct.iter().all(|(_, c)| *c == 3) => {
            Some((ComboKind::Plate, sequence_top(&ranks)?))
        }
        _ => None,
    }
}

/// Top natural number of a run of distinct ranks; Ace may play low, never wraps.
pub(crate) fn sequence_top(ranks: &[Rank]) -> Option<u8> {
    let mut nums: Vec<u8> = ranks.iter().map(|r| r.natural()).collect();
    nums.sort_unstable();
    if is_consecutive(&nums) {
        return nums.last().copied();
    }
    if nums.contains(&14) {
        let mut low: Vec<u8> = nums.iter().map(|&n| if n == 14 { 1 } else { n }).collect();
        low.sort_unstable();
        if is_consecutive(&low) {
            return low.last().copied();
        }
    }
    None
}

fn is_consecutive(sorted: &[u8]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

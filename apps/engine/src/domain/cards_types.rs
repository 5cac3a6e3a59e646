//! Core card-related types: Card, Rank, Suit

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Face number: 2..=14, Ace high.
    pub fn natural(self) -> u8 {
        self as u8 + 2
    }

    /// Inverse of [`Rank::natural`]; 1 is accepted as a low Ace.
    pub fn from_natural(n: u8) -> Option<Rank> {
        match n {
            1 | 14 => Some(Rank::Ace),
            2..=13 => Some(Rank::ALL[(n - 2) as usize]),
            _ => None,
        }
    }
}

/// A single card from the double deck.
///
/// Two physical copies of every card exist, so equal `Card` values are
/// interchangeable and hands behave as multisets.
///
/// Ord is derived for stable storage order only (ranks, then suits, then
/// jokers). Use [`card_value`](super::cards_logic::card_value) for anything
/// that depends on the level.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    SmallJoker,
    BigJoker,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(*rank),
            _ => None,
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(*suit),
            _ => None,
        }
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Card::SmallJoker | Card::BigJoker)
    }
}

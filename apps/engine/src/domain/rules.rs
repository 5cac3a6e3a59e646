use crate::domain::Rank;
use crate::errors::domain::{DomainError, ValidationKind};

pub const PLAYERS: usize = 4;
pub const DECKS: usize = 2;
pub const DECK_SIZE: usize = 54 * DECKS;
pub const HAND_SIZE: usize = DECK_SIZE / PLAYERS;

/// Lowest team level (rank Two).
pub const MIN_LEVEL: u8 = 2;
/// Highest team level (rank Ace).
pub const MAX_LEVEL: u8 = 14;

/// Largest bomb a double deck can produce (8 naturals + 2 wildcards).
pub const MAX_BOMB_SIZE: usize = 10;

/// Rank whose cards are promoted (and whose Hearts card is wild) at `level`.
pub fn level_rank(level: u8) -> Result<Rank, DomainError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(DomainError::validation(
            ValidationKind::InvalidLevel,
            format!("Level must be {MIN_LEVEL}..={MAX_LEVEL}, got {level}"),
        ));
    }
    Rank::from_natural(level).ok_or_else(|| {
        DomainError::validation(ValidationKind::InvalidLevel, format!("No rank for {level}"))
    })
}

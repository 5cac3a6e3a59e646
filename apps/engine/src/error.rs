use thiserror::Error;

use crate::decision::DecisionError;
use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

/// Why a `play_turn` call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveViolation {
    OutOfTurn,
    CardsNotHeld,
    IllegalCombination,
    DoesNotBeat,
    LeaderMustPlay,
    EmptyPlay,
}

impl MoveViolation {
    pub fn code(&self) -> &'static str {
        match self {
            MoveViolation::OutOfTurn => "OUT_OF_TURN",
            MoveViolation::CardsNotHeld => "CARDS_NOT_HELD",
            MoveViolation::IllegalCombination => "ILLEGAL_COMBINATION",
            MoveViolation::DoesNotBeat => "DOES_NOT_BEAT",
            MoveViolation::LeaderMustPlay => "LEADER_MUST_PLAY",
            MoveViolation::EmptyPlay => "EMPTY_PLAY",
        }
    }
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid players: {detail}")]
    InvalidPlayers { detail: String },
    #[error("Invalid state: {detail}")]
    InvalidState { detail: String },
    #[error("Illegal move ({}): {detail}", .violation.code())]
    IllegalMove {
        violation: MoveViolation,
        detail: String,
    },
    #[error("Illegal selection: {detail}")]
    IllegalSelection { detail: String },
    #[error("Exhausted attempts: match unfinished after {deals} deals")]
    ExhaustedAttempts { deals: u32 },
    #[error("Decision failed for seat {seat}: {source}")]
    Decision {
        seat: Seat,
        #[source]
        source: DecisionError,
    },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl GameError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidPlayers { .. } => "INVALID_PLAYERS",
            GameError::InvalidState { .. } => "INVALID_STATE",
            GameError::IllegalMove { .. } => "ILLEGAL_MOVE",
            GameError::IllegalSelection { .. } => "ILLEGAL_SELECTION",
            GameError::ExhaustedAttempts { .. } => "EXHAUSTED_ATTEMPTS",
            GameError::Decision { .. } => "DECISION_FAILED",
            GameError::Config { .. } => "CONFIG_ERROR",
            GameError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn invalid_players(detail: impl Into<String>) -> Self {
        Self::InvalidPlayers {
            detail: detail.into(),
        }
    }

    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState {
            detail: detail.into(),
        }
    }

    pub fn illegal_move(violation: MoveViolation, detail: impl Into<String>) -> Self {
        Self::IllegalMove {
            violation,
            detail: detail.into(),
        }
    }

    pub fn illegal_selection(detail: impl Into<String>) -> Self {
        Self::IllegalSelection {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// The move violation carried by an `IllegalMove`, if any.
    pub fn violation(&self) -> Option<MoveViolation> {
        match self {
            GameError::IllegalMove { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}

impl From<DomainError> for GameError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation(ValidationKind::CardsNotHeld, detail) => {
                GameError::illegal_move(MoveViolation::CardsNotHeld, detail.clone())
            }
            DomainError::Validation(ValidationKind::EmptyPlay, detail) => {
                GameError::illegal_move(MoveViolation::EmptyPlay, detail.clone())
            }
            DomainError::Validation(ValidationKind::InvalidPlayerCount, detail)
            | DomainError::Validation(ValidationKind::InvalidSeat, detail) => {
                GameError::invalid_players(detail.clone())
            }
            DomainError::Validation(ValidationKind::InvalidLevel, detail) => {
                GameError::config(detail.clone())
            }
            DomainError::Validation(_, _) => GameError::invalid_state(err.to_string()),
            DomainError::Invariant(detail) => GameError::internal(detail.clone()),
        }
    }
}

//! Decision maker capability.

use std::fmt;

use crate::domain::player_view::PlayerView;
use crate::domain::tribute::TributeAction;
use crate::domain::tricks::PlayAction;
use crate::domain::Card;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// No answer arrived in time.
    Timeout,
    /// Decision maker failed internally.
    Internal(String),
    /// Asked to act when no legal action exists.
    InvalidMove(String),
}

impl fmt::Display for DecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionError::Timeout => write!(f, "decision timeout"),
            DecisionError::Internal(msg) => write!(f, "decision internal error: {msg}"),
            DecisionError::InvalidMove(msg) => write!(f, "decision invalid move: {msg}"),
        }
    }
}

impl std::error::Error for DecisionError {}

/// Anything that can take a seat: an automated algorithm or a human adapter.
///
/// Implementations see only the seat's [`PlayerView`] and must be usable
/// from several threads; keep mutable state (RNGs, channels) behind a mutex.
pub trait DecisionMaker: Send + Sync {
    /// Pick this seat's turn.
    ///
    /// Following seats may always pass; the leader must play.
    fn choose_play(&self, view: &PlayerView) -> Result<PlayAction, DecisionError>;

    /// Answer a tribute request for this seat.
    ///
    /// The default takes the first card the selection policy allows.
    fn choose_tribute(
        &self,
        _view: &PlayerView,
        request: &TributeAction,
    ) -> Result<Card, DecisionError> {
        request.options().first().copied().ok_or_else(|| {
            DecisionError::InvalidMove(format!(
                "no card allowed for tribute request of seat {}",
                request.seat()
            ))
        })
    }
}

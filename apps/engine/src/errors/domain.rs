//! Domain-level error type used by the pure rule modules.
//!
//! These errors describe rule or input violations detected below the engine
//! facade (card parsing, dealing input, hand bookkeeping). The facade converts
//! them into [`crate::error::GameError`] so callers see a single taxonomy.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule-validation kinds (extend as needed)
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    ParseCard,
    InvalidSeat,
    InvalidLevel,
    InvalidPlayerCount,
    CardsNotHeld,
    EmptyPlay,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input or rule violation
    Validation(ValidationKind, String),
    /// Internal bookkeeping went out of sync
    Invariant(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Invariant(d) => write!(f, "invariant violated: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    pub fn kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::Invariant(_) => None,
        }
    }
}

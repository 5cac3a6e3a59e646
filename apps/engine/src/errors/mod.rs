//! Error handling for the Guandan engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};

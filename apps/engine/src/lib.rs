//! Guandan rules engine and self-play harness.
//!
//! - [`domain`]: cards, combinations, deals, tricks, tribute, match state
//! - [`engine::GameEngine`]: the facade hosts drive
//! - [`decision`]: automated players and the human input adapter
//! - [`simulator`]: runs whole matches between decision makers

pub mod config;
pub mod decision;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod logging;
pub mod simulator;
pub mod test_bootstrap;

pub use config::MatchConfig;
pub use decision::{DecisionMaker, Difficulty};
pub use engine::{GameEngine, GameEvent, GameState};
pub use error::{GameError, MoveViolation};
pub use simulator::{simulate_match, MatchResult, MatchSimulator, Statistics};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}

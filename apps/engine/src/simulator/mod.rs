//! Self-play harness: runs whole matches between automated players.

mod observer;
mod result;
mod runner;

pub use observer::{EventRecorder, MatchObserver, TracingNarrator};
pub use result::{MatchResult, SeatStats, Statistics, TeamStats};
pub use runner::{simulate_match, MatchSimulator};

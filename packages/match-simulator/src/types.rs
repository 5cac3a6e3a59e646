//! Shared types for the simulator CLI.

use clap::ValueEnum;
use guandan_engine::Difficulty;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// One JSON line per match plus the CSV summary
    Jsonl,
    /// CSV summary only
    Csv,
}

/// Automated player for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeatKind {
    Random,
    Simple,
    Smart,
}

impl SeatKind {
    pub fn difficulty(self) -> Difficulty {
        match self {
            SeatKind::Random => Difficulty::Easy,
            SeatKind::Simple => Difficulty::Normal,
            SeatKind::Smart => Difficulty::Hard,
        }
    }
}

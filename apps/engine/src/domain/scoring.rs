//! Deal outcome and level progression.

use serde::Serialize;

use crate::domain::rules::{MAX_LEVEL, PLAYERS};
use crate::domain::state::{partner_of, team_of, Seat, Team};

/// How the winning team finished, read from where the first finisher's partner placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VictoryKind {
    /// Partners finished first and second.
    DoubleDown,
    /// Partner finished third.
    SingleLast,
    /// Partner finished last.
    PartnerLast,
}

impl VictoryKind {
    pub fn level_delta(self) -> u8 {
        match self {
            VictoryKind::DoubleDown => 3,
            VictoryKind::SingleLast => 2,
            VictoryKind::PartnerLast => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealOutcome {
    /// Seats from first finisher to last.
    pub finishing_order: [Seat; PLAYERS],
    pub winning_team: Team,
    pub victory: VictoryKind,
    /// Levels gained by the winning team, already capped.
    pub level_delta: u8,
}

impl DealOutcome {
    pub fn from_order(finishing_order: [Seat; PLAYERS], max_advance: u8) -> Self {
        let victory = victory_kind(&finishing_order);
        Self {
            finishing_order,
            winning_team: team_of(finishing_order[0]),
            victory,
            level_delta: victory.level_delta().min(max_advance),
        }
    }

    /// Seat that finished at `rank` (1-based).
    pub fn seat_at(&self, rank: usize) -> Seat {
        self.finishing_order[rank - 1]
    }

    /// 1-based finishing rank of `seat`.
    pub fn rank_of(&self, seat: Seat) -> usize {
        self.finishing_order
            .iter()
            .position(|&s| s == seat)
            .map(|i| i + 1)
            .unwrap_or(PLAYERS)
    }
}

pub fn victory_kind(finishing_order: &[Seat; PLAYERS]) -> VictoryKind {
    let partner = partner_of(finishing_order[0]);
    match finishing_order.iter().position(|&s| s == partner) {
        Some(1) => VictoryKind::DoubleDown,
        Some(2) => VictoryKind::SingleLast,
        _ => VictoryKind::PartnerLast,
    }
}

/// Add `delta` to `level`, never passing the Ace.
pub fn advance_level(level: u8, delta: u8) -> u8 {
    level.saturating_add(delta).min(MAX_LEVEL)
}

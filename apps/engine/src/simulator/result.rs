//! Match results and the statistics gathered while simulating.

use std::time::Duration;

use serde::Serialize;

use crate::domain::match_state::DealRecord;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::VictoryKind;
use crate::domain::state::Team;
use crate::engine::GameEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub deals_won: u32,
    pub double_downs: u32,
    pub single_lasts: u32,
    pub partner_lasts: u32,
    pub levels_gained: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeatStats {
    pub cards_played: u32,
    pub tricks_won: u32,
    pub passes: u32,
    /// How often the seat finished 1st..4th.
    pub finish_ranks: [u32; PLAYERS],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_deals: u32,
    pub total_tricks: u32,
    pub tributes_paid: u32,
    pub tributes_skipped: u32,
    pub team_stats: [TeamStats; 2],
    pub seat_stats: [SeatStats; PLAYERS],
    #[serde(skip)]
    last_levels: [u8; 2],
}

impl Statistics {
    /// Fold one engine event into the totals.
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MatchStarted { levels, .. } => self.last_levels = *levels,
            GameEvent::TributeImmunity { .. } => self.tributes_skipped += 1,
            GameEvent::TributeResolved { transfers, .. } => {
                self.tributes_paid += transfers.len() as u32
            }
            GameEvent::Played { seat, combo } => {
                self.seat_stats[*seat as usize].cards_played += combo.len() as u32
            }
            GameEvent::Passed { seat } => self.seat_stats[*seat as usize].passes += 1,
            GameEvent::TrickWon { winner, .. } => {
                self.total_tricks += 1;
                self.seat_stats[*winner as usize].tricks_won += 1;
            }
            GameEvent::DealEnded {
                outcome, levels, ..
            } => {
                self.total_deals += 1;
                let team = outcome.winning_team.index();
                let stats = &mut self.team_stats[team];
                stats.deals_won += 1;
                match outcome.victory {
                    VictoryKind::DoubleDown => stats.double_downs += 1,
                    VictoryKind::SingleLast => stats.single_lasts += 1,
                    VictoryKind::PartnerLast => stats.partner_lasts += 1,
                }
                stats.levels_gained += levels[team].saturating_sub(self.last_levels[team]) as u32;
                self.last_levels = *levels;
                for (i, &seat) in outcome.finishing_order.iter().enumerate() {
                    self.seat_stats[seat as usize].finish_ranks[i] += 1;
                }
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub seed: u64,
    pub winner: Team,
    pub final_levels: [u8; 2],
    pub duration: Duration,
    pub statistics: Statistics,
    pub history: Vec<DealRecord>,
}

impl MatchResult {
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

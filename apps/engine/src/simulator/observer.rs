//! Observers receive every engine event as the simulator drains it.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::domain::cards_parsing::format_cards;
use crate::engine::GameEvent;

pub trait MatchObserver: Send {
    fn on_event(&mut self, event: &GameEvent);
}

/// Narrates the match through `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingNarrator;

impl MatchObserver for TracingNarrator {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MatchStarted { players, levels } => {
                let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
                info!(?names, ?levels, "match begins");
            }
            GameEvent::DealStarted {
                deal_no,
                level,
                host_team,
                status,
            } => info!(deal_no, level, host = host_team.0, ?status, "new deal"),
            GameEvent::TributeImmunity { payers, .. } => {
                info!(?payers, "tribute refused: payers hold both big jokers")
            }
            GameEvent::TributeSelected { seat, card } => info!(seat, %card, "tribute offered"),
            GameEvent::TributeChosen { seat, card } => info!(seat, %card, "tribute taken"),
            GameEvent::TributeReturned { seat, to, card } => {
                info!(seat, to, %card, "card returned")
            }
            GameEvent::TributeResolved { first_leader, .. } => {
                info!(first_leader, "tribute complete")
            }
            GameEvent::TrickStarted { trick_no, leader } => info!(trick_no, leader, "trick"),
            GameEvent::Played { seat, combo } => info!(
                seat,
                kind = ?combo.kind,
                cards = %format_cards(&combo.cards),
                "plays"
            ),
            GameEvent::Passed { seat } => info!(seat, "passes"),
            GameEvent::TrickWon { trick_no, winner } => info!(trick_no, winner, "takes the trick"),
            GameEvent::SeatFinished { seat, rank } => info!(seat, rank, "out of cards"),
            GameEvent::DealEnded {
                deal_no,
                outcome,
                levels,
                forced,
            } => info!(
                deal_no,
                winner = outcome.winning_team.0,
                victory = ?outcome.victory,
                order = ?outcome.finishing_order,
                ?levels,
                forced,
                "deal over"
            ),
            GameEvent::MatchEnded {
                winner,
                levels,
                deals,
            } => info!(winner = winner.0, ?levels, deals, "match over"),
        }
    }
}

/// Keeps every event, in order. Clones share one log.
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventRecorder {
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().clone()
    }
}

impl MatchObserver for EventRecorder {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.lock().push(event.clone());
    }
}

//! Game engine facade.
//!
//! [`GameEngine`] owns one [`Match`] and exposes the operations a host needs
//! to run it: seating players, dealing, playing turns and walking the
//! tribute phase. Every state change is also appended to an event log that
//! observers read with [`GameEngine::drain_events`].

use serde::Serialize;
use tracing::debug;

use crate::config::MatchConfig;
use crate::domain::combos::Combination;
use crate::domain::deal::{DealStatus, TurnOutcome};
use crate::domain::match_state::{DealRecord, Match, MatchStatus, Player};
use crate::domain::player_view::PlayerView;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::DealOutcome;
use crate::domain::state::{Seat, Team};
use crate::domain::tribute::{Transfer, TributeAction, TributeStatus};
use crate::domain::tricks::{PlayAction, TrickAction};
use crate::domain::Card;
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    MatchStarted {
        players: Vec<Player>,
        levels: [u8; 2],
    },
    DealStarted {
        deal_no: u32,
        level: u8,
        host_team: Team,
        status: DealStatus,
    },
    TributeImmunity {
        deal_no: u32,
        payers: Vec<Seat>,
    },
    TributeSelected {
        seat: Seat,
        card: Card,
    },
    TributeChosen {
        seat: Seat,
        card: Card,
    },
    TributeReturned {
        seat: Seat,
        to: Seat,
        card: Card,
    },
    TributeResolved {
        transfers: Vec<Transfer>,
        returns: Vec<Transfer>,
        first_leader: Seat,
    },
    TrickStarted {
        trick_no: u32,
        leader: Seat,
    },
    Played {
        seat: Seat,
        combo: Combination,
    },
    Passed {
        seat: Seat,
    },
    TrickWon {
        trick_no: u32,
        winner: Seat,
    },
    SeatFinished {
        seat: Seat,
        rank: usize,
    },
    DealEnded {
        deal_no: u32,
        outcome: DealOutcome,
        levels: [u8; 2],
        forced: bool,
    },
    MatchEnded {
        winner: Team,
        levels: [u8; 2],
        deals: u32,
    },
}

/// Read-only snapshot of the whole match.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub status: MatchStatus,
    /// Match seed; rebuilding an engine with it replays the same deals.
    pub seed: u64,
    pub players: Vec<Player>,
    pub levels: [u8; 2],
    pub host_team: Team,
    pub deals_played: u32,
    pub history: Vec<DealRecord>,
    pub winner: Option<Team>,
    pub deal: Option<DealSnapshot>,
}

/// Public part of the current deal.
#[derive(Debug, Clone, Serialize)]
pub struct DealSnapshot {
    pub deal_no: u32,
    pub status: DealStatus,
    pub level: u8,
    pub hand_counts: [usize; PLAYERS],
    pub finishing_order: Vec<Seat>,
    pub tricks_played: usize,
    pub to_act: Option<Seat>,
    pub tribute: Option<TributeStatus>,
}

pub struct GameEngine {
    game: Match,
    events: Vec<GameEvent>,
}

impl GameEngine {
    pub fn new(config: MatchConfig) -> Result<Self, GameError> {
        Ok(Self {
            game: Match::new(config)?,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.game.config
    }

    /// Match seed, drawn from the OS when the config carried none.
    pub fn seed(&self) -> u64 {
        self.game.seed
    }

    /// The underlying match, for read-only inspection.
    pub fn match_state(&self) -> &Match {
        &self.game
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    pub fn start_match(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        self.game.start(players)?;
        self.events.push(GameEvent::MatchStarted {
            players: self.game.players.clone(),
            levels: self.game.levels,
        });
        Ok(())
    }

    /// Deal a new hand from the match seed.
    pub fn start_deal(&mut self) -> Result<DealStatus, GameError> {
        self.game.start_deal()?;
        self.after_deal_started()
    }

    /// Deal the given hands instead of shuffling.
    pub fn start_deal_with_hands(
        &mut self,
        hands: [Vec<Card>; PLAYERS],
    ) -> Result<DealStatus, GameError> {
        self.game.start_deal_with(hands)?;
        self.after_deal_started()
    }

    fn after_deal_started(&mut self) -> Result<DealStatus, GameError> {
        let deal = self.game.current_deal()?;
        self.events.push(GameEvent::DealStarted {
            deal_no: deal.deal_no,
            level: deal.level,
            host_team: deal.host_team,
            status: deal.status,
        });
        if let Some(phase) = &deal.tribute {
            if matches!(phase.status, TributeStatus::Skipped(_)) {
                self.events.push(GameEvent::TributeImmunity {
                    deal_no: deal.deal_no,
                    payers: phase.payers.clone(),
                });
            }
        }
        Ok(deal.status)
    }

    /// Advance the tribute phase as far as it goes without new input.
    ///
    /// Returns the next input needed, or `None` once play may begin. A deal
    /// without a pending tribute moves straight to `Playing`.
    pub fn process_tribute_phase(&mut self) -> Result<Option<TributeAction>, GameError> {
        let deal = self.game.current_deal_mut()?;
        match deal.status {
            DealStatus::Dealt => {
                if let Some((trick_no, leader)) = deal.begin_play() {
                    self.events.push(GameEvent::TrickStarted { trick_no, leader });
                }
                Ok(None)
            }
            DealStatus::TributeInProgress if deal.tribute_ready() => {
                let leader = deal.resolve_tribute()?;
                if let Some(phase) = &deal.tribute {
                    self.events.push(GameEvent::TributeResolved {
                        transfers: phase.transfers.clone(),
                        returns: phase.returns.clone(),
                        first_leader: leader,
                    });
                }
                self.events.push(GameEvent::TrickStarted {
                    trick_no: 1,
                    leader,
                });
                debug!(deal = deal.deal_no, leader, "tribute resolved");
                Ok(None)
            }
            DealStatus::TributeInProgress => Ok(deal.tribute_action()),
            DealStatus::Playing | DealStatus::Finished => Ok(None),
        }
    }

    pub fn select_tribute_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        self.game.current_deal_mut()?.select_tribute(seat, card)?;
        self.events.push(GameEvent::TributeSelected { seat, card });
        Ok(())
    }

    pub fn choose_tribute_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        self.game.current_deal_mut()?.choose_tribute(seat, card)?;
        self.events.push(GameEvent::TributeChosen { seat, card });
        Ok(())
    }

    pub fn return_tribute_card(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        let deal = self.game.current_deal_mut()?;
        deal.return_tribute(seat, card)?;
        let to = deal
            .tribute
            .as_ref()
            .and_then(|t| t.returns.last())
            .map(|r| r.to)
            .unwrap_or(seat);
        self.events.push(GameEvent::TributeReturned { seat, to, card });
        Ok(())
    }

    /// Answer a pending tribute action with `card`.
    pub fn answer_tribute(&mut self, action: &TributeAction, card: Card) -> Result<(), GameError> {
        match action {
            TributeAction::SelectTribute { seat, .. } => self.select_tribute_card(*seat, card),
            TributeAction::ChooseTribute { seat, .. } => self.choose_tribute_card(*seat, card),
            TributeAction::ReturnTribute { seat, .. } => self.return_tribute_card(*seat, card),
        }
    }

    /// Play one turn. A turn that ends the deal also scores it.
    pub fn play_turn(&mut self, seat: Seat, action: PlayAction) -> Result<TurnOutcome, GameError> {
        let deal = self.game.current_deal_mut()?;
        let was_dealt = deal.status == DealStatus::Dealt;
        let first_leader = deal.first_leader;
        let outcome = deal.play_turn(seat, action)?;
        if was_dealt {
            self.events.push(GameEvent::TrickStarted {
                trick_no: 1,
                leader: first_leader,
            });
        }
        self.record_turn(&outcome);
        if outcome.deal_finished {
            self.finish_deal()?;
        }
        Ok(outcome)
    }

    fn record_turn(&mut self, outcome: &TurnOutcome) {
        let seat = outcome.seat;
        self.events.push(match &outcome.action {
            TrickAction::Play(combo) => GameEvent::Played {
                seat,
                combo: combo.clone(),
            },
            TrickAction::Pass => GameEvent::Passed { seat },
        });
        if let Some(rank) = outcome.went_out {
            self.events.push(GameEvent::SeatFinished { seat, rank });
        }
        if let Some((trick_no, winner)) = outcome.trick_closed {
            self.events.push(GameEvent::TrickWon { trick_no, winner });
        }
        if let Some((trick_no, leader)) = outcome.trick_opened {
            self.events.push(GameEvent::TrickStarted { trick_no, leader });
        }
    }

    fn finish_deal(&mut self) -> Result<(), GameError> {
        let record = self.game.complete_deal()?;
        self.events.push(GameEvent::DealEnded {
            deal_no: record.deal_no,
            outcome: record.outcome.clone(),
            levels: record.levels_after,
            forced: record.forced_end,
        });
        if let Some(winner) = self.game.winner {
            self.events.push(GameEvent::MatchEnded {
                winner,
                levels: self.game.levels,
                deals: self.game.history.len() as u32,
            });
        }
        Ok(())
    }

    /// Seat whose turn it is in the current deal.
    pub fn next_to_act(&self) -> Option<Seat> {
        self.game.current.as_ref().and_then(|d| d.next_to_act())
    }

    pub fn current_deal_status(&self) -> Option<DealStatus> {
        self.game.current.as_ref().map(|d| d.status)
    }

    pub fn game_state(&self) -> GameState {
        GameState {
            status: self.game.status,
            seed: self.game.seed,
            players: self.game.players.clone(),
            levels: self.game.levels,
            host_team: self.game.host_team(),
            deals_played: self.game.history.len() as u32,
            history: self.game.history.clone(),
            winner: self.game.winner,
            deal: self.game.current.as_ref().map(|deal| DealSnapshot {
                deal_no: deal.deal_no,
                status: deal.status,
                level: deal.level,
                hand_counts: deal.hand_sizes(),
                finishing_order: deal.finishing_order.clone(),
                tricks_played: deal.tricks.len(),
                to_act: deal.next_to_act(),
                tribute: deal.tribute.as_ref().map(|t| t.status),
            }),
        }
    }

    /// What `seat` may see of the current deal.
    pub fn player_view(&self, seat: Seat) -> Result<PlayerView, GameError> {
        if seat as usize >= PLAYERS {
            return Err(GameError::invalid_players(format!("Seat {seat} is out of range")));
        }
        let deal = self.game.current_deal()?;
        Ok(PlayerView::for_seat(deal, seat, self.game.levels))
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

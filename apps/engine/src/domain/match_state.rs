//! Match lifecycle: players, team levels, deal history and termination.

use std::time::{Duration, Instant};

use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::config::MatchConfig;
use crate::domain::deal::{Deal, DealLimits};
use crate::domain::dealing::deal_hands;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{advance_level, DealOutcome};
use crate::domain::seed_derivation::{derive_dealing_seed, fresh_match_seed};
use crate::domain::state::{PlayerId, Seat, Team};
use crate::domain::tribute::{evaluate, Transfer, TributeStatus};
use crate::domain::Card;
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub seat: Seat,
    pub connected: bool,
    pub automated: bool,
}

impl Player {
    pub fn human(id: PlayerId, name: impl Into<String>, seat: Seat) -> Self {
        Self {
            id,
            name: name.into(),
            seat,
            connected: true,
            automated: false,
        }
    }

    pub fn automated(id: PlayerId, name: impl Into<String>, seat: Seat) -> Self {
        Self {
            automated: true,
            ..Self::human(id, name, seat)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Pending,
    Started,
    Finished,
}

/// Public summary of a deal's tribute phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TributeRecord {
    pub status: TributeStatus,
    pub payers: Vec<Seat>,
    pub transfers: Vec<Transfer>,
    pub returns: Vec<Transfer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealRecord {
    pub deal_no: u32,
    pub level: u8,
    pub host_team: Team,
    pub outcome: DealOutcome,
    pub levels_after: [u8; 2],
    pub tricks: u32,
    pub forced_end: bool,
    pub tribute: Option<TributeRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub config: MatchConfig,
    /// Seed every deal is derived from; drawn fresh when the config has none.
    pub seed: u64,
    pub status: MatchStatus,
    /// Indexed by seat once started.
    pub players: Vec<Player>,
    pub levels: [u8; 2],
    pub history: Vec<DealRecord>,
    pub current: Option<Deal>,
    pub winner: Option<Team>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub started_at: Option<OffsetDateTime>,
    pub duration: Option<Duration>,
    #[serde(skip)]
    clock: Option<Instant>,
}

impl Match {
    pub fn new(config: MatchConfig) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(fresh_match_seed);
        Ok(Self {
            config: config.with_seed(seed),
            seed,
            status: MatchStatus::Pending,
            players: Vec::new(),
            levels: [config.starting_level; 2],
            history: Vec::new(),
            current: None,
            winner: None,
            started_at: None,
            duration: None,
            clock: None,
        })
    }

    /// Seat the four players and move to `Started`.
    pub fn start(&mut self, mut players: Vec<Player>) -> Result<(), GameError> {
        if self.status != MatchStatus::Pending {
            return Err(GameError::invalid_state(format!(
                "Match already {:?}",
                self.status
            )));
        }
        validate_players(&players)?;
        players.sort_by_key(|p| p.seat);
        self.players = players;
        self.levels = [self.config.starting_level; 2];
        self.status = MatchStatus::Started;
        self.started_at = Some(OffsetDateTime::now_utc());
        self.clock = Some(Instant::now());
        info!(
            players = ?self.players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            level = self.config.starting_level,
            seed = self.seed,
            "match started"
        );
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Winner of the previous deal, team 0 before any deal.
    pub fn host_team(&self) -> Team {
        self.history
            .last()
            .map(|r| r.outcome.winning_team)
            .unwrap_or(Team(0))
    }

    pub fn deal_level(&self) -> u8 {
        self.levels[self.host_team().index()]
    }

    pub fn match_seed(&self) -> u64 {
        self.seed
    }

    /// Deal fresh hands and evaluate the tribute trigger.
    pub fn start_deal(&mut self) -> Result<&Deal, GameError> {
        let hands = deal_hands(derive_dealing_seed(
            self.match_seed(),
            self.history.len() as u32 + 1,
        ));
        self.start_deal_with(hands)
    }

    /// [`start_deal`](Self::start_deal) with caller-provided hands.
    pub fn start_deal_with(&mut self, hands: [Vec<Card>; PLAYERS]) -> Result<&Deal, GameError> {
        if self.status != MatchStatus::Started {
            return Err(GameError::invalid_state(format!(
                "Cannot deal while match is {:?}",
                self.status
            )));
        }
        if self.current.is_some() {
            return Err(GameError::invalid_state("A deal is already in progress"));
        }
        let deal_no = self.history.len() as u32 + 1;
        let previous = self.history.last().map(|r| &r.outcome);
        let tribute = match previous {
            Some(outcome) => evaluate(outcome, self.levels)?,
            None => None,
        };
        let default_leader = previous.map(|o| o.seat_at(1)).unwrap_or(0);
        let deal = Deal::new(
            deal_no,
            self.deal_level(),
            self.host_team(),
            hands,
            tribute,
            default_leader,
            DealLimits {
                max_tricks: self.config.max_tricks_per_deal,
                max_level_advance: self.config.max_level_advance,
            },
        )?;
        info!(
            deal = deal_no,
            level = deal.level,
            host = deal.host_team.0,
            status = ?deal.status,
            "deal started"
        );
        Ok(self.current.insert(deal))
    }

    pub fn current_deal(&self) -> Result<&Deal, GameError> {
        self.current
            .as_ref()
            .ok_or_else(|| GameError::invalid_state("No deal in progress"))
    }

    pub fn current_deal_mut(&mut self) -> Result<&mut Deal, GameError> {
        self.current
            .as_mut()
            .ok_or_else(|| GameError::invalid_state("No deal in progress"))
    }

    /// Score the finished current deal, archive it and check for a match winner.
    pub fn complete_deal(&mut self) -> Result<&DealRecord, GameError> {
        let finished = self.current_deal()?.is_finished();
        if !finished {
            return Err(GameError::invalid_state("Current deal is still in play"));
        }
        let deal = self
            .current
            .take()
            .ok_or_else(|| GameError::internal("deal vanished"))?;
        let outcome = deal
            .outcome
            .clone()
            .ok_or_else(|| GameError::internal("finished deal has no outcome"))?;

        let team = outcome.winning_team.index();
        self.levels[team] = advance_level(self.levels[team], outcome.level_delta);

        let record = DealRecord {
            deal_no: deal.deal_no,
            level: deal.level,
            host_team: deal.host_team,
            levels_after: self.levels,
            tricks: deal.tricks.len() as u32,
            forced_end: deal.forced_end,
            tribute: deal.tribute.map(|t| TributeRecord {
                status: t.status,
                payers: t.payers,
                transfers: t.transfers,
                returns: t.returns,
            }),
            outcome,
        };
        info!(
            deal = record.deal_no,
            winner = record.outcome.winning_team.0,
            victory = ?record.outcome.victory,
            levels = ?self.levels,
            "deal finished"
        );
        self.history.push(record);

        if let Some(winner) = Team::ALL
            .into_iter()
            .find(|t| self.levels[t.index()] > self.config.winning_threshold)
        {
            self.status = MatchStatus::Finished;
            self.winner = Some(winner);
            self.duration = self.clock.map(|c| c.elapsed());
            info!(winner = winner.0, deals = self.history.len(), "match finished");
        }
        self.history
            .last()
            .ok_or_else(|| GameError::internal("deal record missing"))
    }
}

fn validate_players(players: &[Player]) -> Result<(), GameError> {
    if players.len() != PLAYERS {
        return Err(GameError::invalid_players(format!(
            "Expected {PLAYERS} players, got {}",
            players.len()
        )));
    }
    let mut seen = [false; PLAYERS];
    for p in players {
        let slot = seen.get_mut(p.seat as usize).ok_or_else(|| {
            GameError::invalid_players(format!("Seat {} is out of range", p.seat))
        })?;
        if *slot {
            return Err(GameError::invalid_players(format!(
                "Seat {} is taken twice",
                p.seat
            )));
        }
        *slot = true;
    }
    Ok(())
}

//! One deal: hands, trick sequence, finish detection and scoring.

use std::borrow::Cow;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::cards_logic::{holds_all, remove_cards};
use crate::domain::rules::{level_rank, PLAYERS};
use crate::domain::scoring::DealOutcome;
use crate::domain::state::{nth_from, partner_of, rotation_from, seat_offset, team_of, Seat, Team};
use crate::domain::tricks::{interpret_play, PlayAction, Trick, TrickAction};
use crate::domain::tribute::{TributeAction, TributePhase, TributeStatus};
use crate::domain::{Card, Rank};
use crate::error::{GameError, MoveViolation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DealStatus {
    Dealt,
    TributeInProgress,
    Playing,
    Finished,
}

/// Per-deal limits taken from the match configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealLimits {
    pub max_tricks: u32,
    pub max_level_advance: u8,
}

/// What a successful `play_turn` changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub seat: Seat,
    pub action: TrickAction,
    /// Finishing rank (1-based) when this play emptied the seat's hand.
    pub went_out: Option<usize>,
    /// `(trick_no, winner)` when this turn closed a trick.
    pub trick_closed: Option<(u32, Seat)>,
    /// `(trick_no, leader)` of the trick opened after the close.
    pub trick_opened: Option<(u32, Seat)>,
    pub deal_finished: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deal {
    /// 1-based within the match.
    pub deal_no: u32,
    pub level: u8,
    pub level_rank: Rank,
    pub host_team: Team,
    pub status: DealStatus,
    pub hands: [Vec<Card>; PLAYERS],
    /// Closed tricks, oldest first.
    pub tricks: Vec<Trick>,
    pub current: Option<Trick>,
    pub finishing_order: Vec<Seat>,
    pub tribute: Option<TributePhase>,
    pub first_leader: Seat,
    pub outcome: Option<DealOutcome>,
    pub forced_end: bool,
    #[serde(skip)]
    limits: DealLimits,
}

impl Deal {
    /// Set up a freshly dealt deal.
    ///
    /// With a tribute phase the payers' hands are checked for immunity first;
    /// an immune or absent tribute leaves the deal `Dealt` and ready to play.
    pub fn new(
        deal_no: u32,
        level: u8,
        host_team: Team,
        hands: [Vec<Card>; PLAYERS],
        tribute: Option<TributePhase>,
        default_leader: Seat,
        limits: DealLimits,
    ) -> Result<Self, GameError> {
        let level_rank = level_rank(level)?;
        let mut deal = Self {
            deal_no,
            level,
            level_rank,
            host_team,
            status: DealStatus::Dealt,
            hands,
            tricks: Vec::new(),
            current: None,
            finishing_order: Vec::with_capacity(PLAYERS),
            tribute: None,
            first_leader: default_leader,
            outcome: None,
            forced_end: false,
            limits,
        };
        if let Some(mut phase) = tribute {
            if phase.apply_immunity(&deal.hands) {
                deal.first_leader = phase.first_leader.unwrap_or(default_leader);
            } else {
                deal.status = DealStatus::TributeInProgress;
            }
            deal.tribute = Some(phase);
        }
        Ok(deal)
    }

    pub fn is_finished(&self) -> bool {
        self.status == DealStatus::Finished
    }

    pub fn hand_sizes(&self) -> [usize; PLAYERS] {
        [0, 1, 2, 3].map(|s| self.hands[s].len())
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.current.as_ref()
    }

    /// Seat whose turn it is, `None` outside of play.
    pub fn next_to_act(&self) -> Option<Seat> {
        match self.status {
            DealStatus::Dealt => Some(self.first_leader),
            DealStatus::Playing => self.current.as_ref().and_then(Trick::expected_actor),
            _ => None,
        }
    }

    /// Every card the deal accounts for: hands plus every trick log.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.hands.iter().flatten().copied().collect();
        for trick in self.tricks.iter().chain(self.current.iter()) {
            cards.extend(trick.cards_played());
        }
        cards
    }

    fn ensure_tribute(&self) -> Result<&TributePhase, GameError> {
        match (&self.status, &self.tribute) {
            (DealStatus::TributeInProgress, Some(phase)) => Ok(phase),
            _ => Err(GameError::invalid_state(format!(
                "No tribute in progress (deal is {:?})",
                self.status
            ))),
        }
    }

    fn tribute_mut(&mut self) -> Result<&mut TributePhase, GameError> {
        self.ensure_tribute()?;
        self.tribute
            .as_mut()
            .ok_or_else(|| GameError::internal("tribute phase vanished"))
    }

    /// Next tribute input the deal is waiting for.
    pub fn tribute_action(&self) -> Option<TributeAction> {
        self.ensure_tribute()
            .ok()
            .and_then(|phase| phase.next_action(&self.hands))
    }

    pub fn tribute_ready(&self) -> bool {
        self.ensure_tribute().map(|p| p.is_ready()).unwrap_or(false)
    }

    pub fn select_tribute(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        let hand = self.hands[seat as usize % PLAYERS].clone();
        self.tribute_mut()?.select_tribute(seat, card, &hand)
    }

    pub fn choose_tribute(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        self.tribute_mut()?.choose_tribute(seat, card)
    }

    pub fn return_tribute(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        let hand = self.hands[seat as usize % PLAYERS].clone();
        self.tribute_mut()?.return_card(seat, card, &hand)
    }

    /// Apply the exchanges and open the first trick.
    pub fn resolve_tribute(&mut self) -> Result<Seat, GameError> {
        self.ensure_tribute()?;
        let mut hands = self.hands.clone();
        let phase = self.tribute_mut()?;
        let leader = phase.resolve(&mut hands)?;
        debug_assert_eq!(phase.status, TributeStatus::Resolved);
        self.hands = hands;
        self.first_leader = leader;
        self.status = DealStatus::Dealt;
        self.begin_play();
        Ok(leader)
    }

    /// Move a `Dealt` deal into play. Returns the opened trick, if any.
    pub fn begin_play(&mut self) -> Option<(u32, Seat)> {
        if self.status != DealStatus::Dealt {
            return None;
        }
        self.status = DealStatus::Playing;
        self.current = Some(Trick::open(1, self.first_leader, &self.hands));
        Some((1, self.first_leader))
    }

    /// Validate and apply one turn.
    pub fn play_turn(&mut self, seat: Seat, action: PlayAction) -> Result<TurnOutcome, GameError> {
        let validated = self.validate_turn(seat, &action)?;
        self.begin_play();
        self.apply_turn(seat, validated)
    }

    fn validate_turn(&self, seat: Seat, action: &PlayAction) -> Result<TrickAction, GameError> {
        let trick: Cow<'_, Trick> = match (self.status, &self.current) {
            (DealStatus::Playing, Some(trick)) => Cow::Borrowed(trick),
            (DealStatus::Dealt, _) => Cow::Owned(Trick::open(1, self.first_leader, &self.hands)),
            (status, _) => {
                return Err(GameError::invalid_state(format!(
                    "Deal is not in play (status {status:?})"
                )))
            }
        };
        let expected = trick
            .expected_actor()
            .ok_or_else(|| GameError::internal("open trick has no pending actor"))?;
        if seat != expected {
            return Err(GameError::illegal_move(
                MoveViolation::OutOfTurn,
                format!("Seat {seat} acted but seat {expected} is next"),
            ));
        }
        let best = trick.current_best().map(|(_, combo)| combo);
        match action {
            PlayAction::Pass if best.is_none() => Err(GameError::illegal_move(
                MoveViolation::LeaderMustPlay,
                format!("Seat {seat} leads and may not pass"),
            )),
            PlayAction::Pass => Ok(TrickAction::Pass),
            PlayAction::Play(cards) => {
                if cards.is_empty() {
                    return Err(GameError::illegal_move(
                        MoveViolation::EmptyPlay,
                        "A play needs at least one card",
                    ));
                }
                if !holds_all(&self.hands[seat as usize], cards) {
                    return Err(GameError::illegal_move(
                        MoveViolation::CardsNotHeld,
                        format!(
                            "Seat {seat} does not hold {}",
                            crate::domain::cards_parsing::format_cards(cards)
                        ),
                    ));
                }
                interpret_play(cards, self.level_rank, best).map(TrickAction::Play)
            }
        }
    }

    fn apply_turn(&mut self, seat: Seat, action: TrickAction) -> Result<TurnOutcome, GameError> {
        let mut outcome = TurnOutcome {
            seat,
            action: action.clone(),
            went_out: None,
            trick_closed: None,
            trick_opened: None,
            deal_finished: false,
        };

        if let TrickAction::Play(combo) = &action {
            remove_cards(&mut self.hands[seat as usize], &combo.cards)?;
            debug!(deal = self.deal_no, seat, play = %combo, "play");
            if self.hands[seat as usize].is_empty() {
                self.finishing_order.push(seat);
                outcome.went_out = Some(self.finishing_order.len());
            }
        } else {
            debug!(deal = self.deal_no, seat, "pass");
        }

        let trick = self
            .current
            .as_mut()
            .ok_or_else(|| GameError::internal("no open trick"))?;
        trick.actions.push((seat, action));

        let team_out = team_of(seat)
            .seats()
            .iter()
            .all(|s| self.finishing_order.contains(s));
        if !team_out && !trick.is_complete() {
            return Ok(outcome);
        }

        let winner = trick
            .close()
            .ok_or_else(|| GameError::internal("trick closed without a play"))?;
        let trick_no = trick.trick_no;
        outcome.trick_closed = Some((trick_no, winner));
        if let Some(closed) = self.current.take() {
            self.tricks.push(closed);
        }

        if team_out {
            self.finish(false);
        } else if self.tricks.len() as u32 >= self.limits.max_tricks {
            warn!(
                deal = self.deal_no,
                tricks = self.tricks.len(),
                "trick limit reached, forcing deal end"
            );
            self.finish(true);
        } else {
            let leader = self.next_leader(winner);
            self.current = Some(Trick::open(trick_no + 1, leader, &self.hands));
            outcome.trick_opened = Some((trick_no + 1, leader));
        }
        outcome.deal_finished = self.is_finished();
        Ok(outcome)
    }

    /// The trick winner leads; if out, the partner; otherwise the next seat holding cards.
    pub fn next_leader(&self, winner: Seat) -> Seat {
        if !self.hands[winner as usize].is_empty() {
            return winner;
        }
        let partner = partner_of(winner);
        if !self.hands[partner as usize].is_empty() {
            return partner;
        }
        (1..PLAYERS as u8)
            .map(|n| nth_from(winner, n))
            .find(|&s| !self.hands[s as usize].is_empty())
            .unwrap_or(winner)
    }

    fn finish(&mut self, forced: bool) {
        let anchor = self
            .finishing_order
            .last()
            .copied()
            .or_else(|| self.tricks.last().map(|t| t.leader))
            .unwrap_or(self.first_leader);
        let mut remaining: Vec<Seat> = rotation_from(seat_offset(anchor, 1))
            .into_iter()
            .filter(|s| !self.finishing_order.contains(s))
            .collect();
        // Stable sort keeps rotation order among equal card counts.
        remaining.sort_by_key(|&s| self.hands[s as usize].len());
        self.finishing_order.extend(remaining);

        let mut order = [0u8; PLAYERS];
        order.copy_from_slice(&self.finishing_order[..PLAYERS]);
        self.outcome = Some(DealOutcome::from_order(order, self.limits.max_level_advance));
        self.forced_end = forced;
        self.status = DealStatus::Finished;
        self.current = None;
    }
}

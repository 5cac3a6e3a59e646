//! What one seat may see of the current deal.
//!
//! [`PlayerView`] is the only input decision makers receive. It carries the
//! seat's own hand, card counts for everyone, the public trick log and the
//! levels. Other seats' cards are never copied into it.

use serde::Serialize;

use crate::domain::combo_search::{enumerate_plays, plays_beating};
use crate::domain::combos::Combination;
use crate::domain::deal::{Deal, DealStatus};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{partner_of, team_of, Seat, Team};
use crate::domain::tricks::Trick;
use crate::domain::{Card, Rank};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub seat: Seat,
    pub deal_no: u32,
    pub status: DealStatus,
    /// Level in effect for this deal.
    pub level: u8,
    pub level_rank: Rank,
    pub levels: [u8; 2],
    pub host_team: Team,
    pub hand: Vec<Card>,
    pub hand_counts: [usize; PLAYERS],
    pub finishing_order: Vec<Seat>,
    pub completed_tricks: Vec<Trick>,
    pub current_trick: Option<Trick>,
    /// Seat whose turn it is, if play is underway.
    pub to_act: Option<Seat>,
}

impl PlayerView {
    pub fn for_seat(deal: &Deal, seat: Seat, levels: [u8; 2]) -> Self {
        Self {
            seat,
            deal_no: deal.deal_no,
            status: deal.status,
            level: deal.level,
            level_rank: deal.level_rank,
            levels,
            host_team: deal.host_team,
            hand: deal.hands[seat as usize].clone(),
            hand_counts: deal.hand_sizes(),
            finishing_order: deal.finishing_order.clone(),
            completed_tricks: deal.tricks.clone(),
            current_trick: deal.current.clone(),
            to_act: deal.next_to_act(),
        }
    }

    pub fn team(&self) -> Team {
        team_of(self.seat)
    }

    pub fn partner(&self) -> Seat {
        partner_of(self.seat)
    }

    pub fn is_my_turn(&self) -> bool {
        self.to_act == Some(self.seat)
    }

    /// The play to beat, `None` when this seat would lead.
    pub fn current_best(&self) -> Option<(Seat, &Combination)> {
        self.current_trick.as_ref().and_then(Trick::current_best)
    }

    pub fn is_leading(&self) -> bool {
        self.current_best().is_none()
    }

    /// Fewest cards held by an opponent still in the deal.
    pub fn opponent_min_cards(&self) -> Option<usize> {
        self.team()
            .other()
            .seats()
            .iter()
            .map(|&s| self.hand_counts[s as usize])
            .filter(|&n| n > 0)
            .min()
    }

    /// Combinations this seat may play right now; empty when it is not its turn.
    ///
    /// Passing is legal whenever this seat follows.
    pub fn legal_plays(&self) -> Vec<Combination> {
        if !self.is_my_turn() {
            return Vec::new();
        }
        match self.current_best() {
            None => enumerate_plays(&self.hand, self.level_rank),
            Some((_, best)) => plays_beating(&self.hand, self.level_rank, best),
        }
    }
}

use serde::Serialize;

use crate::domain::combos::{beats, classify_all, Combination};
use crate::domain::rules::PLAYERS;
use crate::domain::state::{rotation_from, Seat};
use crate::domain::{Card, Rank};
use crate::error::{GameError, MoveViolation};

/// What a seat submits on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlayAction {
    Pass,
    Play(Vec<Card>),
}

/// What the trick log records for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TrickAction {
    Pass,
    Play(Combination),
}

/// One rotation of turns.
///
/// Every seat that holds cards when the trick opens acts exactly once, in
/// clockwise order from the leader. Each play must beat the previous one, so
/// the last play in the log is always the strongest.
#[derive(Debug, Clone, Serialize)]
pub struct Trick {
    /// 1-based within the deal.
    pub trick_no: u32,
    pub leader: Seat,
    pub participants: Vec<Seat>,
    pub actions: Vec<(Seat, TrickAction)>,
    pub winner: Option<Seat>,
}

impl Trick {
    pub fn open(trick_no: u32, leader: Seat, hands: &[Vec<Card>; PLAYERS]) -> Self {
        let participants = rotation_from(leader)
            .into_iter()
            .filter(|&s| !hands[s as usize].is_empty())
            .collect();
        Self {
            trick_no,
            leader,
            participants,
            actions: Vec::with_capacity(PLAYERS),
            winner: None,
        }
    }

    /// Seat expected to act next, `None` once every participant has acted.
    pub fn expected_actor(&self) -> Option<Seat> {
        self.participants.get(self.actions.len()).copied()
    }

    /// Strongest play so far and who made it.
    pub fn current_best(&self) -> Option<(Seat, &Combination)> {
        self.actions.iter().rev().find_map(|(seat, action)| match action {
            TrickAction::Play(combo) => Some((*seat, combo)),
            TrickAction::Pass => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.actions.len() >= self.participants.len()
    }

    /// Fix the winner from the current best play.
    pub fn close(&mut self) -> Option<Seat> {
        self.winner = self.current_best().map(|(seat, _)| seat);
        self.winner
    }

    pub fn cards_played(&self) -> impl Iterator<Item = Card> + '_ {
        self.actions.iter().flat_map(|(_, action)| match action {
            TrickAction::Play(combo) => combo.cards.clone(),
            TrickAction::Pass => Vec::new(),
        })
    }
}

/// Read `cards` as a combination that is legal against `current`.
///
/// Picks the strongest reading that qualifies: any reading when leading,
/// otherwise one that beats `current`.
pub fn interpret_play(
    cards: &[Card],
    level: Rank,
    current: Option<&Combination>,
) -> Result<Combination, GameError> {
    if cards.is_empty() {
        return Err(GameError::illegal_move(
            MoveViolation::EmptyPlay,
            "A play needs at least one card",
        ));
    }
    let readings = classify_all(cards, level);
    if readings.is_empty() {
        return Err(GameError::illegal_move(
            MoveViolation::IllegalCombination,
            format!(
                "Cards do not form a combination: {}",
                crate::domain::cards_parsing::format_cards(cards)
            ),
        ));
    }
    match current {
        None => readings.into_iter().next_back().ok_or_else(|| {
            GameError::internal("classification returned no reading")
        }),
        Some(current) => readings
            .into_iter()
            .rev()
            .find(|r| beats(r, current))
            .ok_or_else(|| {
                GameError::illegal_move(
                    MoveViolation::DoesNotBeat,
                    format!("Play does not beat {current}"),
                )
            }),
    }
}

//! Tribute exchange between deals.
//!
//! After a deal the losing side pays its best card to the winners and gets a
//! low card back. Who pays whom is read from [`TRIBUTE_TABLE`] using the
//! previous deal's victory kind; nothing else about the previous deal
//! influences the trigger.
//!
//! The phase collects inputs one at a time (tribute selections, the pool
//! choice in a double-down, return cards) without touching any hand, then
//! [`TributePhase::resolve`] applies every exchange at once.

use serde::Serialize;

use crate::domain::cards_logic::{card_value, count_card, holds_all, is_wildcard, sort_by_value};
use crate::domain::rules::{level_rank, PLAYERS};
use crate::domain::scoring::{DealOutcome, VictoryKind};
use crate::domain::state::{nth_from, Seat};
use crate::domain::{Card, Rank};
use crate::error::GameError;

/// One row of the trigger table: finishing ranks (1-based) of payers and receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TributeRule {
    pub victory: VictoryKind,
    pub payer_ranks: &'static [usize],
    pub receiver_ranks: &'static [usize],
    /// Tributes are pooled and the first finisher picks one.
    pub pooled: bool,
}

pub static TRIBUTE_TABLE: [TributeRule; 3] = [
    TributeRule {
        victory: VictoryKind::DoubleDown,
        payer_ranks: &[3, 4],
        receiver_ranks: &[1, 2],
        pooled: true,
    },
    TributeRule {
        victory: VictoryKind::SingleLast,
        payer_ranks: &[4],
        receiver_ranks: &[1],
        pooled: false,
    },
    TributeRule {
        victory: VictoryKind::PartnerLast,
        payer_ranks: &[3],
        receiver_ranks: &[1],
        pooled: false,
    },
];

pub fn rule_for(victory: VictoryKind) -> Option<&'static TributeRule> {
    TRIBUTE_TABLE.iter().find(|r| r.victory == victory)
}

/// Big jokers the payers must hold between them to refuse tribute.
pub const IMMUNITY_BIG_JOKERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Payers hold both big jokers.
    Immunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TributeStatus {
    /// Waiting on tribute selections or return cards.
    Pending,
    /// Waiting for the first finisher to pick from the pooled tributes.
    AwaitingSelection,
    Resolved,
    Skipped(SkipReason),
}

/// A card moving from one seat to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub from: Seat,
    pub to: Seat,
    pub card: Card,
}

/// Next input the phase is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TributeAction {
    /// `seat` must nominate its tribute from `options`.
    SelectTribute { seat: Seat, options: Vec<Card> },
    /// `seat` picks one of the pooled tributes.
    ChooseTribute { seat: Seat, options: Vec<Card> },
    /// `seat` gives one of `options` back to `to`.
    ReturnTribute {
        seat: Seat,
        to: Seat,
        options: Vec<Card>,
    },
}

impl TributeAction {
    pub fn seat(&self) -> Seat {
        match self {
            TributeAction::SelectTribute { seat, .. }
            | TributeAction::ChooseTribute { seat, .. }
            | TributeAction::ReturnTribute { seat, .. } => *seat,
        }
    }

    pub fn options(&self) -> &[Card] {
        match self {
            TributeAction::SelectTribute { options, .. }
            | TributeAction::ChooseTribute { options, .. }
            | TributeAction::ReturnTribute { options, .. } => options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TributePhase {
    pub victory: VictoryKind,
    /// Level rank of the deal the tribute precedes.
    pub level: Rank,
    /// Previous deal's first finisher.
    pub top_seat: Seat,
    pub payers: Vec<Seat>,
    pub receivers: Vec<Seat>,
    pub pooled: bool,
    /// Tributes nominated so far, in payer order.
    pub tributes: Vec<(Seat, Card)>,
    /// Tributes matched to receivers.
    pub transfers: Vec<Transfer>,
    pub returns: Vec<Transfer>,
    pub status: TributeStatus,
    /// Leader of the first trick once the phase is resolved or skipped.
    pub first_leader: Option<Seat>,
}

/// Decide whether the deal after `previous` opens with a tribute.
///
/// `levels` are the team levels after `previous` was scored; the winning
/// team's level becomes the level rank that orders the tribute cards.
pub fn evaluate(previous: &DealOutcome, levels: [u8; 2]) -> Result<Option<TributePhase>, GameError> {
    let Some(rule) = rule_for(previous.victory) else {
        return Ok(None);
    };
    let level = level_rank(levels[previous.winning_team.index()])?;
    Ok(Some(TributePhase {
        victory: rule.victory,
        level,
        top_seat: previous.seat_at(1),
        payers: rule
            .payer_ranks
            .iter()
            .map(|&r| previous.seat_at(r))
            .collect(),
        receivers: rule
            .receiver_ranks
            .iter()
            .map(|&r| previous.seat_at(r))
            .collect(),
        pooled: rule.pooled,
        tributes: Vec::new(),
        transfers: Vec::new(),
        returns: Vec::new(),
        status: TributeStatus::Pending,
        first_leader: None,
    }))
}

/// Cards a payer may hand over: the highest value in hand, wildcard excluded.
pub fn allowed_tributes(hand: &[Card], level: Rank) -> Vec<Card> {
    let candidates: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| !is_wildcard(c, level))
        .collect();
    let Some(best) = candidates.iter().map(|&c| card_value(c, level)).max() else {
        return Vec::new();
    };
    distinct_sorted(
        candidates
            .into_iter()
            .filter(|&c| card_value(c, level) == best)
            .collect(),
        level,
    )
}

/// Cards a receiver may give back: a non-joker of ten or lower, or failing
/// that one of its lowest cards.
pub fn allowed_returns(hand: &[Card], level: Rank) -> Vec<Card> {
    let low: Vec<Card> = hand
        .iter()
        .copied()
        .filter(|&c| !c.is_joker() && card_value(c, level) <= 10)
        .collect();
    if !low.is_empty() {
        return distinct_sorted(low, level);
    }
    let Some(min) = hand.iter().map(|&c| card_value(c, level)).min() else {
        return Vec::new();
    };
    distinct_sorted(
        hand.iter()
            .copied()
            .filter(|&c| card_value(c, level) == min)
            .collect(),
        level,
    )
}

fn distinct_sorted(mut cards: Vec<Card>, level: Rank) -> Vec<Card> {
    sort_by_value(&mut cards, level);
    cards.dedup();
    cards
}

impl TributePhase {
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status,
            TributeStatus::Resolved | TributeStatus::Skipped(_)
        )
    }

    /// Skip the phase when the payers hold both big jokers between them.
    pub fn apply_immunity(&mut self, hands: &[Vec<Card>; PLAYERS]) -> bool {
        let big_jokers: usize = self
            .payers
            .iter()
            .map(|&s| count_card(&hands[s as usize], Card::BigJoker))
            .sum();
        if big_jokers >= IMMUNITY_BIG_JOKERS && self.status == TributeStatus::Pending {
            self.status = TributeStatus::Skipped(SkipReason::Immunity);
            self.first_leader = Some(self.top_seat);
            return true;
        }
        false
    }

    /// The input the phase needs next, `None` when settled or ready to resolve.
    pub fn next_action(&self, hands: &[Vec<Card>; PLAYERS]) -> Option<TributeAction> {
        match self.status {
            TributeStatus::Resolved | TributeStatus::Skipped(_) => None,
            TributeStatus::AwaitingSelection => Some(TributeAction::ChooseTribute {
                seat: self.top_seat,
                options: self.pool(),
            }),
            TributeStatus::Pending => {
                if let Some(&payer) = self.payers.iter().find(|&&p| !self.has_paid(p)) {
                    return Some(TributeAction::SelectTribute {
                        seat: payer,
                        options: allowed_tributes(&hands[payer as usize], self.level),
                    });
                }
                self.transfers
                    .iter()
                    .find(|t| !self.returns.iter().any(|r| r.from == t.to))
                    .map(|t| TributeAction::ReturnTribute {
                        seat: t.to,
                        to: t.from,
                        options: allowed_returns(&hands[t.to as usize], self.level),
                    })
            }
        }
    }

    /// Every input is present and [`resolve`](Self::resolve) may run.
    pub fn is_ready(&self) -> bool {
        self.status == TributeStatus::Pending
            && self.tributes.len() == self.payers.len()
            && self.transfers.len() == self.payers.len()
            && self.returns.len() == self.transfers.len()
    }

    fn has_paid(&self, seat: Seat) -> bool {
        self.tributes.iter().any(|(s, _)| *s == seat)
    }

    fn pool(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.tributes.iter().map(|(_, c)| *c).collect();
        sort_by_value(&mut cards, self.level);
        cards.dedup();
        cards
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        if self.is_settled() {
            return Err(GameError::invalid_state(format!(
                "Tribute phase already {:?}",
                self.status
            )));
        }
        Ok(())
    }

    /// A payer nominates its tribute card.
    pub fn select_tribute(&mut self, seat: Seat, card: Card, hand: &[Card]) -> Result<(), GameError> {
        self.ensure_open()?;
        if self.status != TributeStatus::Pending || !self.payers.contains(&seat) {
            return Err(GameError::illegal_selection(format!(
                "Seat {seat} does not owe a tribute"
            )));
        }
        if self.has_paid(seat) {
            return Err(GameError::illegal_selection(format!(
                "Seat {seat} already selected its tribute"
            )));
        }
        if !allowed_tributes(hand, self.level).contains(&card) {
            return Err(GameError::illegal_selection(format!(
                "{card} is not the highest card held by seat {seat}"
            )));
        }
        self.tributes.push((seat, card));

        if self.tributes.len() == self.payers.len() {
            if self.pooled {
                self.status = TributeStatus::AwaitingSelection;
            } else {
                self.transfers = self
                    .tributes
                    .iter()
                    .zip(self.receivers.iter())
                    .map(|(&(from, card), &to)| Transfer { from, to, card })
                    .collect();
            }
        }
        Ok(())
    }

    /// The first finisher takes one pooled tribute; the other goes to its partner.
    pub fn choose_tribute(&mut self, seat: Seat, card: Card) -> Result<(), GameError> {
        self.ensure_open()?;
        if self.status != TributeStatus::AwaitingSelection || seat != self.top_seat {
            return Err(GameError::illegal_selection(format!(
                "Seat {seat} has no tribute to choose"
            )));
        }
        let Some(idx) = self.tributes.iter().position(|(_, c)| *c == card) else {
            return Err(GameError::illegal_selection(format!(
                "{card} is not among the pooled tributes"
            )));
        };
        let (chosen_from, chosen) = self.tributes[idx];
        let mut transfers = vec![Transfer {
            from: chosen_from,
            to: self.top_seat,
            card: chosen,
        }];
        let second = self.receivers.iter().copied().find(|&r| r != self.top_seat);
        for (i, &(from, card)) in self.tributes.iter().enumerate() {
            if i == idx {
                continue;
            }
            if let Some(to) = second {
                transfers.push(Transfer { from, to, card });
            }
        }
        self.transfers = transfers;
        self.status = TributeStatus::Pending;
        Ok(())
    }

    /// A receiver hands a low card back to the seat that paid it.
    pub fn return_card(&mut self, seat: Seat, card: Card, hand: &[Card]) -> Result<(), GameError> {
        self.ensure_open()?;
        if self.status != TributeStatus::Pending || self.transfers.len() < self.payers.len() {
            return Err(GameError::illegal_selection(
                "Tributes must be assigned before cards are returned",
            ));
        }
        let Some(transfer) = self.transfers.iter().find(|t| t.to == seat).copied() else {
            return Err(GameError::illegal_selection(format!(
                "Seat {seat} received no tribute"
            )));
        };
        if self.returns.iter().any(|r| r.from == seat) {
            return Err(GameError::illegal_selection(format!(
                "Seat {seat} already returned a card"
            )));
        }
        if !allowed_returns(hand, self.level).contains(&card) {
            return Err(GameError::illegal_selection(format!(
                "{card} is not a valid return card for seat {seat}"
            )));
        }
        self.returns.push(Transfer {
            from: seat,
            to: transfer.from,
            card,
        });
        Ok(())
    }

    /// Apply every transfer and return to `hands` and mark the phase resolved.
    ///
    /// Hands are validated before anything moves so a failure leaves them untouched.
    pub fn resolve(&mut self, hands: &mut [Vec<Card>; PLAYERS]) -> Result<Seat, GameError> {
        self.ensure_open()?;
        if !self.is_ready() {
            return Err(GameError::invalid_state("Tribute phase is missing inputs"));
        }
        let moves: Vec<Transfer> = self
            .transfers
            .iter()
            .chain(self.returns.iter())
            .copied()
            .collect();
        for seat in 0..PLAYERS as Seat {
            let outgoing: Vec<Card> = moves
                .iter()
                .filter(|m| m.from == seat)
                .map(|m| m.card)
                .collect();
            if !holds_all(&hands[seat as usize], &outgoing) {
                return Err(GameError::internal(format!(
                    "Seat {seat} no longer holds its tribute cards"
                )));
            }
        }
        for m in &moves {
            let from = &mut hands[m.from as usize];
            if let Some(pos) = from.iter().position(|&c| c == m.card) {
                from.remove(pos);
            }
            hands[m.to as usize].push(m.card);
        }
        for hand in hands.iter_mut() {
            hand.sort();
        }

        let leader = self.lead_after_tribute();
        self.first_leader = Some(leader);
        self.status = TributeStatus::Resolved;
        Ok(leader)
    }

    /// The payer of the stronger tribute leads; ties go to the payer seated
    /// first clockwise after the previous first finisher.
    fn lead_after_tribute(&self) -> Seat {
        let best = self
            .tributes
            .iter()
            .map(|(_, c)| card_value(*c, self.level))
            .max()
            .unwrap_or(0);
        (1..PLAYERS as u8)
            .map(|n| nth_from(self.top_seat, n))
            .find(|s| {
                self.tributes
                    .iter()
                    .any(|(p, c)| p == s && card_value(*c, self.level) == best)
            })
            .unwrap_or(self.top_seat)
    }
}

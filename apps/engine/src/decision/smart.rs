//! Partner-aware auto play.

use super::simple::weakest;
use super::trait_def::{DecisionError, DecisionMaker};
use crate::domain::cards_logic::is_wildcard;
use crate::domain::combos::Combination;
use crate::domain::player_view::PlayerView;
use crate::domain::tricks::PlayAction;
use crate::domain::Rank;

/// Opponents holding this many cards or fewer are close to going out.
const DANGER_CARDS: usize = 5;

/// Leads keyed at or below this count as cheap.
const CHEAP_KEY: u8 = 10;

/// Rule-based player that keeps its bombs and wildcards for when they matter.
///
/// - Goes out whenever a single play empties its hand.
/// - Leads the largest cheap combination that leaves bombs intact.
/// - Never overtakes its partner.
/// - Bombs only when an opponent is close to going out.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmartAutoPlay;

impl SmartAutoPlay {
    pub const NAME: &'static str = "SmartAutoPlay";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(_seed: Option<u64>) -> Self {
        Self
    }
}

/// Natural ranks held four times or more.
fn bomb_ranks(view: &PlayerView) -> Vec<Rank> {
    Rank::ALL
        .into_iter()
        .filter(|&rank| {
            view.hand
                .iter()
                .filter(|&&c| c.rank() == Some(rank) && !is_wildcard(c, view.level_rank))
                .count()
                >= 4
        })
        .collect()
}

/// Whether playing `combo` spends a wildcard or breaks up a bomb.
fn spends_reserves(combo: &Combination, view: &PlayerView, bombs: &[Rank]) -> bool {
    combo.cards.iter().any(|&c| {
        is_wildcard(c, view.level_rank) || c.rank().is_some_and(|r| bombs.contains(&r))
    })
}

fn pick_lead(candidates: Vec<Combination>) -> Option<Combination> {
    let cheap = candidates
        .iter()
        .filter(|c| c.key <= CHEAP_KEY)
        .max_by_key(|c| (c.len(), std::cmp::Reverse(c.key)))
        .cloned();
    cheap.or_else(|| weakest(candidates))
}

impl DecisionMaker for SmartAutoPlay {
    fn choose_play(&self, view: &PlayerView) -> Result<PlayAction, DecisionError> {
        if !view.is_my_turn() {
            return Err(DecisionError::InvalidMove(format!(
                "seat {} asked to play out of turn",
                view.seat
            )));
        }
        let legal = view.legal_plays();
        if let Some(out) = legal.iter().find(|c| c.len() == view.hand.len()) {
            return Ok(PlayAction::Play(out.cards.clone()));
        }

        let bombs = bomb_ranks(view);
        let (plain, reserves): (Vec<Combination>, Vec<Combination>) = legal
            .into_iter()
            .partition(|c| !c.is_bomb() && !spends_reserves(c, view, &bombs));

        let Some((best_seat, _)) = view.current_best() else {
            return pick_lead(plain)
                .or_else(|| weakest(reserves))
                .map(|c| PlayAction::Play(c.cards))
                .ok_or_else(|| DecisionError::InvalidMove("No legal plays available".into()));
        };

        if best_seat == view.partner() {
            return Ok(PlayAction::Pass);
        }
        if let Some(combo) = weakest(plain) {
            return Ok(PlayAction::Play(combo.cards));
        }
        let danger = view.hand_counts[best_seat as usize] <= DANGER_CARDS
            || view.opponent_min_cards().is_some_and(|n| n <= DANGER_CARDS);
        if danger {
            if let Some(combo) = weakest(reserves) {
                return Ok(PlayAction::Play(combo.cards));
            }
        }
        Ok(PlayAction::Pass)
    }
}

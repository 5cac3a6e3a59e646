//! Weakest-first auto play.

use super::trait_def::{DecisionError, DecisionMaker};
use crate::domain::combos::Combination;
use crate::domain::player_view::PlayerView;
use crate::domain::tricks::PlayAction;

/// Leads the weakest combination it holds and follows with the weakest one
/// that beats the trick, passing when nothing does.
///
/// Also stands in for humans who run out of time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleAutoPlay;

impl SimpleAutoPlay {
    pub const NAME: &'static str = "SimpleAutoPlay";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(_seed: Option<u64>) -> Self {
        Self
    }
}

/// Weakest first: non-bombs before bombs, then by key, then fewer cards.
pub(crate) fn weakest(plays: Vec<Combination>) -> Option<Combination> {
    plays
        .into_iter()
        .min_by_key(|c| (c.strength(), c.len()))
}

impl DecisionMaker for SimpleAutoPlay {
    fn choose_play(&self, view: &PlayerView) -> Result<PlayAction, DecisionError> {
        if !view.is_my_turn() {
            return Err(DecisionError::InvalidMove(format!(
                "seat {} asked to play out of turn",
                view.seat
            )));
        }
        match weakest(view.legal_plays()) {
            Some(combo) => Ok(PlayAction::Play(combo.cards)),
            None if view.is_leading() => {
                Err(DecisionError::InvalidMove("No legal plays available".into()))
            }
            None => Ok(PlayAction::Pass),
        }
    }
}

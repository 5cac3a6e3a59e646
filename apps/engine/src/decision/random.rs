//! Random decision maker: uniformly random legal actions.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{DecisionError, DecisionMaker};
use crate::domain::player_view::PlayerView;
use crate::domain::tricks::PlayAction;

/// Picks uniformly among the legal plays, and passing when following.
///
/// Seeded instances are reproducible; unseeded ones draw from the OS.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl DecisionMaker for RandomPlayer {
    fn choose_play(&self, view: &PlayerView) -> Result<PlayAction, DecisionError> {
        if !view.is_my_turn() {
            return Err(DecisionError::InvalidMove(format!(
                "seat {} asked to play out of turn",
                view.seat
            )));
        }
        let mut options: Vec<PlayAction> = view
            .legal_plays()
            .into_iter()
            .map(|combo| PlayAction::Play(combo.cards))
            .collect();
        if !view.is_leading() {
            options.push(PlayAction::Pass);
        }
        if options.is_empty() {
            return Err(DecisionError::InvalidMove("No legal plays available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| DecisionError::Internal(format!("RNG lock poisoned: {e}")))?;
        options
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| DecisionError::Internal("Failed to choose random play".into()))
    }
}

//! Drive a full match with four decision makers.

use tracing::{debug, warn};

use super::observer::{MatchObserver, TracingNarrator};
use super::result::{MatchResult, Statistics};
use crate::config::MatchConfig;
use crate::decision::{create_automated, DecisionConfig, DecisionMaker, Difficulty};
use crate::domain::match_state::Player;
use crate::domain::rules::PLAYERS;
use crate::domain::seed_derivation::{derive_player_seed, fresh_match_seed};
use crate::domain::state::Seat;
use crate::engine::GameEngine;
use crate::error::GameError;

/// Runs matches between four decision makers without outside input.
///
/// The match seed is fixed at construction, so running the same simulator
/// (or one built from the same seed and difficulties) replays the match.
pub struct MatchSimulator {
    config: MatchConfig,
    seed: u64,
    makers: [Box<dyn DecisionMaker>; PLAYERS],
    names: [String; PLAYERS],
    verbose: bool,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl MatchSimulator {
    /// Automated players of the given difficulties, seeded from the match seed.
    pub fn new(config: MatchConfig, difficulties: [Difficulty; PLAYERS]) -> Result<Self, GameError> {
        let seed = config.seed.unwrap_or_else(fresh_match_seed);
        let makers = [0u8, 1, 2, 3].map(|seat| {
            let decision = DecisionConfig::with_seed(derive_player_seed(seed, seat));
            create_automated(difficulties[seat as usize], &decision)
        });
        let names = difficulties.map(|d| d.to_string());
        Self::with_makers(config.with_seed(seed), makers, names)
    }

    /// Use caller-built decision makers, one per seat.
    pub fn with_makers(
        config: MatchConfig,
        makers: [Box<dyn DecisionMaker>; PLAYERS],
        names: [String; PLAYERS],
    ) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(fresh_match_seed);
        Ok(Self {
            config: config.with_seed(seed),
            seed,
            makers,
            names,
            verbose: false,
            observers: Vec::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Narrate every event through `tracing`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn MatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play one match to the end.
    ///
    /// Fails with `ExhaustedAttempts` when no team has won after `max_deals`
    /// deals, and aborts on the first engine or decision error.
    pub fn run(&mut self) -> Result<MatchResult, GameError> {
        let mut engine = GameEngine::new(self.config)?;
        let players = (0..PLAYERS as Seat)
            .map(|seat| {
                Player::automated(
                    seat as u32 + 1,
                    format!("{} #{seat}", self.names[seat as usize]),
                    seat,
                )
            })
            .collect();
        engine.start_match(players)?;

        let mut stats = Statistics::default();
        let mut narrator = self.verbose.then_some(TracingNarrator);
        self.dispatch(&mut engine, &mut stats, narrator.as_mut());

        while !engine.is_finished() {
            let played = engine.match_state().history.len() as u32;
            if played >= self.config.max_deals {
                warn!(deals = played, seed = self.seed, "match did not finish");
                return Err(GameError::ExhaustedAttempts { deals: played });
            }
            engine.start_deal()?;
            self.dispatch(&mut engine, &mut stats, narrator.as_mut());

            self.run_tribute(&mut engine, &mut stats, narrator.as_mut())?;
            self.run_tricks(&mut engine, &mut stats, narrator.as_mut())?;
        }

        let game = engine.match_state();
        let winner = game
            .winner
            .ok_or_else(|| GameError::internal("finished match has no winner"))?;
        debug!(seed = self.seed, winner = winner.0, deals = game.history.len(), "simulation done");
        Ok(MatchResult {
            seed: self.seed,
            winner,
            final_levels: game.levels,
            duration: game.duration.unwrap_or_default(),
            statistics: stats,
            history: game.history.clone(),
        })
    }

    fn run_tribute(
        &mut self,
        engine: &mut GameEngine,
        stats: &mut Statistics,
        mut narrator: Option<&mut TracingNarrator>,
    ) -> Result<(), GameError> {
        while let Some(action) = engine.process_tribute_phase()? {
            let seat = action.seat();
            let view = engine.player_view(seat)?;
            let card = self.makers[seat as usize]
                .choose_tribute(&view, &action)
                .map_err(|source| GameError::Decision { seat, source })?;
            engine.answer_tribute(&action, card)?;
            self.dispatch(engine, stats, narrator.as_deref_mut());
        }
        self.dispatch(engine, stats, narrator);
        Ok(())
    }

    fn run_tricks(
        &mut self,
        engine: &mut GameEngine,
        stats: &mut Statistics,
        mut narrator: Option<&mut TracingNarrator>,
    ) -> Result<(), GameError> {
        while let Some(seat) = engine.next_to_act() {
            let view = engine.player_view(seat)?;
            let action = self.makers[seat as usize]
                .choose_play(&view)
                .map_err(|source| GameError::Decision { seat, source })?;
            engine.play_turn(seat, action)?;
            self.dispatch(engine, stats, narrator.as_deref_mut());
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        engine: &mut GameEngine,
        stats: &mut Statistics,
        mut narrator: Option<&mut TracingNarrator>,
    ) {
        for event in engine.drain_events() {
            stats.record(&event);
            if let Some(n) = narrator.as_deref_mut() {
                n.on_event(&event);
            }
            for observer in &mut self.observers {
                observer.on_event(&event);
            }
        }
    }
}

/// Run one match with freshly built automated players.
pub fn simulate_match(
    config: MatchConfig,
    difficulties: [Difficulty; PLAYERS],
) -> Result<MatchResult, GameError> {
    MatchSimulator::new(config, difficulties)?.run()
}

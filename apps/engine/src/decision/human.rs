//! Human input adapter.
//!
//! The engine side opens a numbered prompt for every decision and waits on it
//! with a timeout. A front end reads the open prompt from its [`HumanHandle`]
//! and answers it. Answers to expired prompts are dropped, so an answer that
//! arrives after its timeout never leaks into a later turn. Late, missing or
//! illegal answers forfeit the decision to [`SimpleAutoPlay`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::config::DecisionConfig;
use super::simple::SimpleAutoPlay;
use super::trait_def::{DecisionError, DecisionMaker};
use crate::domain::cards_logic::holds_all;
use crate::domain::player_view::PlayerView;
use crate::domain::tribute::TributeAction;
use crate::domain::tricks::{interpret_play, PlayAction};
use crate::domain::Card;

/// No prompt is open.
const NO_PROMPT: u64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HumanInput {
    Play(PlayAction),
    Tribute(Card),
}

/// Sending half handed to whatever collects the human's choices.
#[derive(Debug, Clone)]
pub struct HumanHandle {
    tx: Sender<(u64, HumanInput)>,
    open: Arc<AtomicU64>,
}

impl HumanHandle {
    /// Id of the prompt the adapter is waiting on, if any.
    pub fn open_prompt(&self) -> Option<u64> {
        match self.open.load(Ordering::Acquire) {
            NO_PROMPT => None,
            id => Some(id),
        }
    }

    pub fn send_play(&self, prompt: u64, action: PlayAction) -> Result<(), DecisionError> {
        self.send(prompt, HumanInput::Play(action))
    }

    pub fn send_tribute(&self, prompt: u64, card: Card) -> Result<(), DecisionError> {
        self.send(prompt, HumanInput::Tribute(card))
    }

    fn send(&self, prompt: u64, input: HumanInput) -> Result<(), DecisionError> {
        self.tx
            .send((prompt, input))
            .map_err(|_| DecisionError::Internal("human adapter dropped".into()))
    }
}

pub struct HumanAdapter {
    inbox: Mutex<Receiver<(u64, HumanInput)>>,
    open: Arc<AtomicU64>,
    last_prompt: AtomicU64,
    timeout: Duration,
    fallback: SimpleAutoPlay,
}

impl HumanAdapter {
    pub fn new(timeout: Duration) -> (Self, HumanHandle) {
        let (tx, rx) = mpsc::channel();
        let open = Arc::new(AtomicU64::new(NO_PROMPT));
        let adapter = Self {
            inbox: Mutex::new(rx),
            open: Arc::clone(&open),
            last_prompt: AtomicU64::new(NO_PROMPT),
            timeout,
            fallback: SimpleAutoPlay,
        };
        (adapter, HumanHandle { tx, open })
    }

    /// Adapter waiting as long as `config.human_timeout_ms` allows.
    pub fn from_config(config: &DecisionConfig) -> (Self, HumanHandle) {
        Self::new(config.human_timeout())
    }

    /// Open a fresh prompt and wait for its answer until the timeout.
    fn wait(&self, seat: u8) -> Option<HumanInput> {
        let inbox = self.inbox.lock();
        let prompt = self.last_prompt.fetch_add(1, Ordering::AcqRel) + 1;
        self.open.store(prompt, Ordering::Release);
        let deadline = Instant::now() + self.timeout;

        let answer = loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match inbox.recv_timeout(remaining) {
                Ok((id, input)) if id == prompt => break Some(input),
                Ok((id, input)) => {
                    debug!(seat, prompt, answered = id, ?input, "dropping answer to an expired prompt");
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(seat, timeout_ms = self.timeout.as_millis() as u64, "human decision timed out");
                    break None;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    warn!(seat, "human input channel closed");
                    break None;
                }
            }
        };
        self.open.store(NO_PROMPT, Ordering::Release);
        answer
    }
}

fn play_is_legal(view: &PlayerView, action: &PlayAction) -> bool {
    match action {
        PlayAction::Pass => !view.is_leading(),
        PlayAction::Play(cards) => {
            holds_all(&view.hand, cards)
                && interpret_play(cards, view.level_rank, view.current_best().map(|(_, c)| c))
                    .is_ok()
        }
    }
}

impl DecisionMaker for HumanAdapter {
    fn choose_play(&self, view: &PlayerView) -> Result<PlayAction, DecisionError> {
        match self.wait(view.seat) {
            Some(HumanInput::Play(action)) if play_is_legal(view, &action) => Ok(action),
            Some(other) => {
                warn!(seat = view.seat, input = ?other, "rejected human play, auto-playing");
                self.fallback.choose_play(view)
            }
            None => self.fallback.choose_play(view),
        }
    }

    fn choose_tribute(
        &self,
        view: &PlayerView,
        request: &TributeAction,
    ) -> Result<Card, DecisionError> {
        match self.wait(view.seat) {
            Some(HumanInput::Tribute(card)) if request.options().contains(&card) => Ok(card),
            Some(other) => {
                warn!(seat = view.seat, input = ?other, "rejected human tribute card");
                self.fallback.choose_tribute(view, request)
            }
            None => self.fallback.choose_tribute(view, request),
        }
    }
}

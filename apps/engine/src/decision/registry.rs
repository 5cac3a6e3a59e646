//! Registry of automated decision makers.
//!
//! To add one: implement `DecisionMaker`, give it stable `NAME`/`VERSION`
//! consts and append a `DecisionFactory` below. Keep the order stable and
//! constructors free of side effects; the same seed must give the same play.

use super::{DecisionMaker, Difficulty, RandomPlayer, SimpleAutoPlay, SmartAutoPlay};

pub struct DecisionFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub difficulty: Difficulty,
    pub make: fn(seed: Option<u64>) -> Box<dyn DecisionMaker>,
}

static DECISION_FACTORIES: &[DecisionFactory] = &[
    DecisionFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        difficulty: Difficulty::Easy,
        make: make_random_player,
    },
    DecisionFactory {
        name: SimpleAutoPlay::NAME,
        version: SimpleAutoPlay::VERSION,
        difficulty: Difficulty::Normal,
        make: make_simple,
    },
    DecisionFactory {
        name: SmartAutoPlay::NAME,
        version: SmartAutoPlay::VERSION,
        difficulty: Difficulty::Hard,
        make: make_smart,
    },
];

pub fn registered_makers() -> &'static [DecisionFactory] {
    DECISION_FACTORIES
}

pub fn by_name(name: &str) -> Option<&'static DecisionFactory> {
    registered_makers()
        .iter()
        .find(|factory| factory.name == name)
}

pub fn for_difficulty(difficulty: Difficulty) -> Option<&'static DecisionFactory> {
    registered_makers()
        .iter()
        .find(|factory| factory.difficulty == difficulty)
}

fn make_random_player(seed: Option<u64>) -> Box<dyn DecisionMaker> {
    Box::new(RandomPlayer::new(seed))
}

fn make_simple(seed: Option<u64>) -> Box<dyn DecisionMaker> {
    Box::new(SimpleAutoPlay::new(seed))
}

fn make_smart(seed: Option<u64>) -> Box<dyn DecisionMaker> {
    Box::new(SmartAutoPlay::new(seed))
}

#![allow(dead_code)]

// tests/common/mod.rs
pub mod proptest_prelude;

use guandan_engine::domain::cards_parsing::try_parse_cards;
use guandan_engine::domain::{Card, Player};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary that declares `mod common`.
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn players() -> Vec<Player> {
    (0..4u8)
        .map(|seat| Player::automated(seat as u32 + 1, format!("bot-{seat}"), seat))
        .collect()
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("valid card tokens")
}

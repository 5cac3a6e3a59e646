#![cfg(test)]

//! One-time test logging initialization.
//!
//! Level precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
//!
//! ```bash
//! TEST_LOG=debug cargo test -p guandan-engine deal
//! ```

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Idempotent and race-safe; never panics if a subscriber already exists.
pub fn init() {
    INITIALIZED.get_or_init(|| {
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

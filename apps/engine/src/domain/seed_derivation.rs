//! RNG seed derivation utilities for deterministic match behavior.
//!
//! Every random choice in a match (dealing, seeded automated players) is
//! derived from one match seed so a simulation can be replayed exactly.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::state::Seat;

/// Match seed drawn from the OS, for matches configured without one.
pub fn fresh_match_seed() -> u64 {
    ChaCha8Rng::from_os_rng().next_u64()
}

/// Derive a seed for dealing the cards of one deal.
///
/// # Arguments
///
/// * `match_seed` - Base RNG seed of the match
/// * `deal_no` - Deal number (1-based)
///
/// # Returns
///
/// Derived seed that is unique per (match, deal) combination.
pub fn derive_dealing_seed(match_seed: u64, deal_no: u32) -> u64 {
    mix(match_seed
        .wrapping_add((deal_no as u64).wrapping_mul(1_000_003))
        .wrapping_add(2))
}

/// Derive the seed handed to the automated player in `seat`.
pub fn derive_player_seed(match_seed: u64, seat: Seat) -> u64 {
    mix(match_seed
        .wrapping_add((seat as u64).wrapping_mul(7_919))
        .wrapping_add(1))
}

/// SplitMix64 finalizer so neighbouring inputs land far apart.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

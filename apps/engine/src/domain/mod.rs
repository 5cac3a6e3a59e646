//! Domain layer: pure game logic types and helpers.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod combo_search;
pub mod combos;
pub mod deal;
pub mod dealing;
pub mod match_state;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tribute;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_combos;
#[cfg(test)]
mod tests_deal;
#[cfg(test)]
mod tests_match;
#[cfg(test)]
mod tests_props_combos;
#[cfg(test)]
mod tests_props_deal;
#[cfg(test)]
mod tests_tribute;

// Re-exports for ergonomics
pub use cards_logic::{card_value, is_wildcard};
pub use cards_types::{Card, Rank, Suit};
pub use combos::{beats, classify, compare, ComboKind, Combination};
pub use deal::{Deal, DealStatus};
pub use dealing::deal_hands;
pub use match_state::{DealRecord, Match, MatchStatus, Player};
pub use player_view::PlayerView;
pub use scoring::{DealOutcome, VictoryKind};
pub use seed_derivation::{derive_dealing_seed, derive_player_seed};
pub use state::{PlayerId, Seat, Team};
pub use tribute::{TributeAction, TributePhase, TributeStatus};
pub use tricks::{PlayAction, Trick, TrickAction};

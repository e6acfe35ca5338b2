//! Core duel types: players, configuration, errors, RNG.
//!
//! Everything here is independent of cards and the board; the rest of the
//! crate builds on these building blocks.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{DuelConfig, DECK_SIZE, PLAYER_COUNT, ZONE_SLOTS};
pub use error::{DuelError, Result};
pub use player::{AuthProvider, Country, Player, PlayerId, PlayerIndex, PlayerPair};
pub use rng::GameRng;

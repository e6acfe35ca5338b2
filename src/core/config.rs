//! Duel configuration.
//!
//! Structural values (seats, zone slots, deck size) are constants: the board
//! and deck types are built around them. Tunable values live in
//! `DuelConfig`, which games construct at startup.

use serde::{Deserialize, Serialize};

/// Number of players in a duel.
pub const PLAYER_COUNT: usize = 2;

/// Slots in each monster and magic/trap zone.
pub const ZONE_SLOTS: usize = 5;

/// Cards in every deck for the whole duel.
pub const DECK_SIZE: usize = 40;

/// Tunable duel parameters.
///
/// ```
/// use duel_engine::core::DuelConfig;
///
/// let config = DuelConfig::default().with_starting_life_points(4000).with_seed(7);
/// assert_eq!(config.starting_life_points, 4000);
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DuelConfig {
    /// Life points both players start the duel with.
    pub starting_life_points: i64,

    /// Upper bound for a single `Deck::draw`.
    pub max_cards_per_draw: usize,

    /// Seed for the duel's shuffle stream.
    pub seed: u64,

    /// Most recent processed events a duel keeps; older ones are dropped.
    pub event_log_capacity: usize,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            starting_life_points: 8000,
            max_cards_per_draw: 5,
            seed: 0,
            event_log_capacity: 1024,
        }
    }
}

impl DuelConfig {
    #[must_use]
    pub fn with_starting_life_points(mut self, life_points: i64) -> Self {
        self.starting_life_points = life_points;
        self
    }

    #[must_use]
    pub fn with_max_cards_per_draw(mut self, max: usize) -> Self {
        self.max_cards_per_draw = max;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_event_log_capacity(mut self, capacity: usize) -> Self {
        self.event_log_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DuelConfig::default();
        assert_eq!(config.starting_life_points, 8000);
        assert_eq!(config.max_cards_per_draw, 5);
        assert_eq!(config.event_log_capacity, 1024);
    }

    #[test]
    fn test_config_partial_json() {
        let config: DuelConfig = serde_json::from_str(r#"{"startingLifePoints": 2000}"#).unwrap();
        assert_eq!(config.starting_life_points, 2000);
        assert_eq!(config.max_cards_per_draw, 5);
        assert_eq!(config.seed, 0);

        let config: DuelConfig = serde_json::from_str(r#"{"eventLogCapacity": 16}"#).unwrap();
        assert_eq!(config.event_log_capacity, 16);
    }
}

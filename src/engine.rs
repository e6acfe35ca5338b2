//! Process-wide registry of running duels.
//!
//! Only in-progress games are admitted and only finished games are reaped.
//! Reaping a game folds its duration into the engine metrics.
//!
//! ## Locking
//!
//! The registry lock is held only for the map operation and is never held
//! while waiting on a game's lock. Lock order is game first, then registry:
//! `add_game` keeps the game locked across the insert so it cannot finish
//! before it is tracked. `remove_game` checks the game's status with only the
//! game locked, then removes the entry if it still maps to the same game.
//! Callers must not call `add_game` or `remove_game` while holding the lock of
//! the game they pass.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::core::error::{DuelError, Result};
use crate::duel::{Game, GameId, GameStatus};

/// A game shared between the engine and its drivers.
pub type SharedGame = Arc<Mutex<Game>>;

#[derive(Default)]
struct Registry {
    games: FxHashMap<GameId, SharedGame>,
    processed: u64,
    reaped_duration: Duration,
}

/// Concurrent registry of in-progress duels.
///
/// ```
/// use duel_engine::engine::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.active_games_count(), 0);
/// assert_eq!(engine.average_duel_duration(), None);
/// ```
pub struct Engine {
    registry: RwLock<Registry>,
    started_at: DateTime<Utc>,
    clock: Instant,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            started_at: Utc::now(),
            clock: Instant::now(),
        }
    }

    /// Track an in-progress game.
    pub fn add_game(&self, game: SharedGame) -> Result<GameId> {
        let guard = game.lock();
        let status = guard.status();
        if status != GameStatus::InProgress {
            return Err(DuelError::NotAdmissible {
                expected: GameStatus::InProgress,
                got: status,
            });
        }

        let id = guard.id();
        let active = {
            let mut registry = self.registry.write();
            registry.games.insert(id, Arc::clone(&game));
            registry.games.len()
        };
        drop(guard);

        info!(game_id = %id, active, "game added to engine");
        Ok(id)
    }

    /// Reap a finished game and return it.
    pub fn remove_game(&self, id: GameId) -> Result<SharedGame> {
        let game = self.get_active_game(id)?;

        // Finished is terminal, so the check stays valid once the lock drops.
        let duration = {
            let game = game.lock();
            let status = game.status();
            if status != GameStatus::Finished {
                return Err(DuelError::NotRemovable {
                    expected: GameStatus::Finished,
                    got: status,
                });
            }
            game.duration()
        };

        let processed = {
            let mut registry = self.registry.write();
            match registry.games.get(&id) {
                Some(tracked) if Arc::ptr_eq(tracked, &game) => {}
                _ => return Err(DuelError::GameNotFound { game_id: id }),
            }
            registry.games.remove(&id);
            registry.processed += 1;
            registry.reaped_duration += duration;
            registry.processed
        };

        info!(game_id = %id, processed, duration_ms = duration.as_millis() as u64, "game removed from engine");
        Ok(game)
    }

    /// Look up a tracked game.
    pub fn get_active_game(&self, id: GameId) -> Result<SharedGame> {
        self.registry
            .read()
            .games
            .get(&id)
            .cloned()
            .ok_or(DuelError::GameNotFound { game_id: id })
    }

    #[must_use]
    pub fn active_games_count(&self) -> usize {
        self.registry.read().games.len()
    }

    /// IDs of every tracked game, in no particular order.
    #[must_use]
    pub fn active_game_ids(&self) -> Vec<GameId> {
        self.registry.read().games.keys().copied().collect()
    }

    /// Number of games reaped so far. Never decreases.
    #[must_use]
    pub fn total_games_processed(&self) -> u64 {
        self.registry.read().processed
    }

    /// Mean duration of reaped games; `None` before the first one.
    #[must_use]
    pub fn average_duel_duration(&self) -> Option<Duration> {
        let registry = self.registry.read();
        if registry.processed == 0 {
            return None;
        }
        Some(Duration::from_secs_f64(
            registry.reaped_duration.as_secs_f64() / registry.processed as f64,
        ))
    }

    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.clock.elapsed()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        f.debug_struct("Engine")
            .field("active", &registry.games.len())
            .field("processed", &registry.processed)
            .field("started_at", &self.started_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCategory, CardId, CardInstance, CardTemplate};
    use crate::core::Player;
    use crate::zones::Deck;

    fn game() -> SharedGame {
        let template = Arc::new(CardTemplate::new(CardId::new(1), "Card", CardCategory::Warrior));
        let deck = |name: &str| {
            let cards = (0..40).map(|_| CardInstance::new(Arc::clone(&template))).collect();
            Deck::new(Player::new(name).unwrap(), cards).unwrap()
        };
        Arc::new(Mutex::new(Game::new([deck("A"), deck("B")]).unwrap()))
    }

    #[test]
    fn test_new_engine() {
        let engine = Engine::new();
        assert_eq!(engine.active_games_count(), 0);
        assert_eq!(engine.total_games_processed(), 0);
        assert!(engine.uptime() < Duration::from_secs(60));
    }

    #[test]
    fn test_add_requires_in_progress() {
        let engine = Engine::new();
        let game = game();

        let err = engine.add_game(Arc::clone(&game)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "only games with state = IN_PROGRESS can be added to the engine, got READY_TO_START"
        );

        game.lock().start().unwrap();
        let id = engine.add_game(Arc::clone(&game)).unwrap();
        assert_eq!(engine.active_games_count(), 1);
        assert!(Arc::ptr_eq(&engine.get_active_game(id).unwrap(), &game));

        game.lock().finish().unwrap();
    }

    #[test]
    fn test_remove_requires_finished() {
        let engine = Engine::new();
        let game = game();
        game.lock().start().unwrap();
        let id = engine.add_game(Arc::clone(&game)).unwrap();

        let err = engine.remove_game(id).unwrap_err();
        assert!(matches!(err, DuelError::NotRemovable { got: GameStatus::InProgress, .. }));
        assert_eq!(engine.active_games_count(), 1);

        game.lock().finish().unwrap();
        engine.remove_game(id).unwrap();
        assert_eq!(engine.active_games_count(), 0);
        assert_eq!(engine.total_games_processed(), 1);
        assert!(engine.average_duel_duration().is_some());

        let err = engine.remove_game(id).unwrap_err();
        assert!(matches!(err, DuelError::GameNotFound { .. }));
        assert_eq!(engine.total_games_processed(), 1);
    }
}

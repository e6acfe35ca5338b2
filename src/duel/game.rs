//! The duel lifecycle.
//!
//! A game moves `ReadyToStart -> InProgress -> Finished`. Starting it spawns
//! the event worker; finishing it closes the event queue and waits for the
//! worker to drain.
//!
//! ## Locking
//!
//! Board, decks and RNG live in a `DuelState` behind a mutex shared with the
//! worker. Do not hold the guard returned by [`Game::duel`] while submitting
//! or flushing events: the worker needs that lock to make progress.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use std::str::FromStr;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use uuid::Uuid;

use super::pipeline::{self, EventSubmitter, Queue};
use super::state::{DuelState, ProcessedEvent};
use super::turn::{Phase, Turn};
use crate::core::error::{DuelError, Result};
use crate::core::{DuelConfig, GameRng, PlayerIndex, PlayerPair};
use crate::events::{Event, HandlerRegistry};
use crate::zones::Deck;

/// Unique identifier for a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(Uuid);

impl GameId {
    /// Create a new random game ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Lifecycle state of a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    ReadyToStart,
    InProgress,
    Finished,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::ReadyToStart => "READY_TO_START",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

/// A two-player duel.
///
/// ```
/// use duel_engine::cards::{CardCategory, CardId, CardInstance, CardTemplate};
/// use duel_engine::core::Player;
/// use duel_engine::duel::{Game, GameStatus};
/// use duel_engine::zones::Deck;
/// use std::sync::Arc;
///
/// let template = Arc::new(CardTemplate::new(CardId::new(1), "Card", CardCategory::Rock));
/// let deck = |name: &str| {
///     let cards = (0..40).map(|_| CardInstance::new(Arc::clone(&template))).collect();
///     Deck::new(Player::new(name).unwrap(), cards).unwrap()
/// };
///
/// let mut game = Game::new([deck("PlayerA"), deck("PlayerB")]).unwrap();
/// game.start().unwrap();
/// assert_eq!(game.status(), GameStatus::InProgress);
/// game.finish().unwrap();
/// ```
pub struct Game {
    id: GameId,
    status: GameStatus,
    turn: Turn,
    state: Arc<Mutex<DuelState>>,
    handlers: Arc<HandlerRegistry>,
    queue: Queue,
    worker: Option<JoinHandle<()>>,
    started_at: Option<DateTime<Utc>>,
    clock: Option<Instant>,
    duration: Duration,
}

impl Game {
    /// Create a duel with the default configuration and the built-in handlers.
    pub fn new(decks: [Deck; 2]) -> Result<Self> {
        Self::with_config(decks, &DuelConfig::default(), Arc::new(HandlerRegistry::standard()))
    }

    /// Create a duel with an explicit configuration and handler registry.
    ///
    /// Both players are reset to the configured starting life points and both
    /// decks adopt the configured draw limit. Seat 0 takes the first turn.
    pub fn with_config(decks: [Deck; 2], config: &DuelConfig, handlers: Arc<HandlerRegistry>) -> Result<Self> {
        let mut decks = PlayerPair::from(decks);
        for (_, deck) in decks.iter_mut() {
            deck.player_mut().life_points = config.starting_life_points;
            deck.set_max_draw(config.max_cards_per_draw);
        }

        let turn = Turn::new(decks[PlayerIndex::FIRST].player(), 0)?;
        let rng = GameRng::new(config.seed).for_context("deck-shuffle");

        Ok(Self {
            id: GameId::new(),
            status: GameStatus::ReadyToStart,
            turn,
            state: Arc::new(Mutex::new(
                DuelState::new(decks, rng).with_event_log_capacity(config.event_log_capacity),
            )),
            handlers,
            queue: Arc::new(Mutex::new(None)),
            worker: None,
            started_at: None,
            clock: None,
            duration: Duration::ZERO,
        })
    }

    /// Begin the duel and spawn its event worker.
    pub fn start(&mut self) -> Result<()> {
        if self.status != GameStatus::ReadyToStart {
            return Err(DuelError::CannotStart {
                expected: GameStatus::ReadyToStart,
                got: self.status,
            });
        }

        let (sender, worker) = pipeline::spawn_worker(self.id, Arc::clone(&self.state), Arc::clone(&self.handlers))?;
        *self.queue.lock() = Some(sender);
        self.worker = Some(worker);

        self.set_dueling(true);
        self.started_at = Some(Utc::now());
        self.clock = Some(Instant::now());
        self.status = GameStatus::InProgress;

        info!(game_id = %self.id, "duel started");
        Ok(())
    }

    /// End the duel, close the event queue and wait for the worker to drain it.
    pub fn finish(&mut self) -> Result<()> {
        if self.status != GameStatus::InProgress {
            return Err(DuelError::CannotFinish {
                expected: GameStatus::InProgress,
                got: self.status,
            });
        }

        self.duration = self.clock.map(|c| c.elapsed()).unwrap_or_default();
        self.status = GameStatus::Finished;

        self.queue.lock().take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!(game_id = %self.id, "event worker panicked");
            }
        }
        self.set_dueling(false);

        info!(game_id = %self.id, duration_ms = self.duration.as_millis() as u64, "duel finished");
        Ok(())
    }

    /// Advance the current turn's phase.
    pub fn next_phase(&mut self) -> Result<()> {
        self.turn.next_phase()
    }

    /// Hand the turn to the other player.
    ///
    /// Only allowed while the duel is in progress and the current turn has
    /// reached its end phase. The outgoing player's attack prohibition ticks
    /// down by one. Returns a snapshot of the incoming player's deck.
    pub fn next_turn(&mut self) -> Result<Deck> {
        if self.status != GameStatus::InProgress {
            return Err(DuelError::TurnOutsideDuel {
                expected: GameStatus::InProgress,
                got: self.status,
            });
        }
        if self.turn.phase() != Phase::End {
            return Err(DuelError::TurnNotOver {
                expected: Phase::End,
                got: self.turn.phase(),
            });
        }

        let mut state = self.state.lock();
        let outgoing = self.turn.player_index();
        let incoming = outgoing.opponent();

        let player = state.player_mut(outgoing);
        player.remaining_turns_to_attack = player.remaining_turns_to_attack.saturating_sub(1);

        self.turn = Turn::new(state.player(incoming), incoming.index())?;
        debug!(game_id = %self.id, player_index = %incoming, "turn changed");
        Ok(state.decks[incoming].clone())
    }

    /// Submit an event to the worker, blocking until it is received.
    pub fn add_event(&self, event: Event) -> Result<()> {
        if self.status != GameStatus::InProgress {
            return Err(DuelError::EventOutsideDuel {
                expected: GameStatus::InProgress,
                got: self.status,
            });
        }
        self.event_submitter().submit(event)
    }

    /// A handle for submitting events from other threads.
    ///
    /// Submissions fail once the game is finished.
    #[must_use]
    pub fn event_submitter(&self) -> EventSubmitter {
        EventSubmitter::new(self.id, Arc::clone(&self.queue))
    }

    /// Block until every event submitted so far has been processed.
    ///
    /// A finished game has already drained its queue, and a game that never
    /// started has nothing queued, so both return immediately.
    pub fn flush_events(&self) -> Result<()> {
        if self.status != GameStatus::InProgress {
            return Ok(());
        }
        self.event_submitter().flush()
    }

    /// Snapshot of the most recent processed events, oldest first.
    ///
    /// Only `DuelConfig::event_log_capacity` entries are kept. The snapshot
    /// shares structure with the live log, so taking it is cheap.
    #[must_use]
    pub fn event_log(&self) -> im::Vector<ProcessedEvent> {
        self.state.lock().event_log().clone()
    }

    /// Lock and borrow the board, decks and RNG.
    pub fn duel(&self) -> MutexGuard<'_, DuelState> {
        self.state.lock()
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    #[must_use]
    pub fn handlers(&self) -> &Arc<HandlerRegistry> {
        &self.handlers
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Elapsed duel time: final once finished, running while in progress.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match (self.status, self.clock) {
            (GameStatus::InProgress, Some(clock)) => clock.elapsed(),
            _ => self.duration,
        }
    }

    fn set_dueling(&self, dueling: bool) {
        let mut state = self.state.lock();
        for (_, deck) in state.decks.iter_mut() {
            deck.player_mut().is_dueling = dueling;
        }
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        // Let a still-running worker exit once outstanding submitters are gone.
        self.queue.lock().take();
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("turn", &self.turn)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCategory, CardId, CardInstance, CardTemplate};
    use crate::core::Player;

    fn deck(name: &str) -> Deck {
        let template = Arc::new(CardTemplate::new(CardId::new(1), "Card", CardCategory::Warrior));
        let cards = (0..40).map(|_| CardInstance::new(Arc::clone(&template))).collect();
        Deck::new(Player::new(name).unwrap(), cards).unwrap()
    }

    fn game() -> Game {
        Game::new([deck("PlayerA"), deck("PlayerB")]).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = game();
        assert_eq!(game.status(), GameStatus::ReadyToStart);
        assert_eq!(game.turn().player_index(), PlayerIndex::FIRST);
        assert_eq!(game.turn().phase(), Phase::Draw);
        assert_eq!(game.duel().player(PlayerIndex::SECOND).life_points, 8000);
        assert_eq!(game.duration(), Duration::ZERO);
    }

    #[test]
    fn test_with_config() {
        let config = DuelConfig::default().with_starting_life_points(4000).with_max_cards_per_draw(3);
        let game = Game::with_config([deck("A"), deck("B")], &config, Arc::new(HandlerRegistry::new())).unwrap();

        let duel = game.duel();
        assert_eq!(duel.player(PlayerIndex::FIRST).life_points, 4000);
        assert_eq!(duel.decks[PlayerIndex::SECOND].max_draw(), 3);
    }

    #[test]
    fn test_lifecycle_flags_players() {
        let mut game = game();
        game.start().unwrap();
        assert!(game.duel().player(PlayerIndex::FIRST).is_dueling);
        assert!(game.started_at().is_some());

        game.finish().unwrap();
        assert!(!game.duel().player(PlayerIndex::SECOND).is_dueling);
    }

    #[test]
    fn test_game_ids_parse() {
        let id = GameId::new();
        assert_eq!(id.to_string().parse::<GameId>().unwrap(), id);
        assert!("not-a-uuid".parse::<GameId>().is_err());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(GameStatus::ReadyToStart.to_string(), "READY_TO_START");
        assert_eq!(GameStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(GameStatus::Finished.to_string(), "FINISHED");
    }
}

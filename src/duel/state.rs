//! State mutated by a running duel.
//!
//! `DuelState` is everything event handlers may touch: the board, both decks
//! (and through them both players) and the shuffle RNG. A game keeps it
//! behind a mutex shared with its event worker, so direct calls and event
//! application never interleave.
//!
//! The event log is a bounded `im::Vector`: snapshots are cheap clones that
//! share structure with the live log.

use im::Vector;

use crate::core::{DuelConfig, GameRng, Player, PlayerIndex, PlayerPair};
use crate::events::Event;
use crate::zones::{Board, Deck};

/// What the event worker did with an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The handler accepted and applied it.
    Applied,
    /// The handler refused it; state is unchanged.
    Rejected(String),
    /// No handler is registered for its type.
    Ignored,
}

/// An event after the worker is done with it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedEvent {
    pub event: Event,
    pub outcome: EventOutcome,
}

/// Board, decks and RNG of one duel.
#[derive(Clone, Debug)]
pub struct DuelState {
    pub board: Board,
    pub decks: PlayerPair<Deck>,
    pub rng: GameRng,
    event_log: Vector<ProcessedEvent>,
    event_log_capacity: usize,
}

impl DuelState {
    #[must_use]
    pub fn new(decks: PlayerPair<Deck>, rng: GameRng) -> Self {
        Self {
            board: Board::new(),
            decks,
            rng,
            event_log: Vector::new(),
            event_log_capacity: DuelConfig::default().event_log_capacity,
        }
    }

    /// Keep at most `capacity` processed events, dropping the oldest first.
    #[must_use]
    pub fn with_event_log_capacity(mut self, capacity: usize) -> Self {
        self.event_log_capacity = capacity;
        self
    }

    #[must_use]
    pub fn player(&self, index: PlayerIndex) -> &Player {
        self.decks[index].player()
    }

    pub fn player_mut(&mut self, index: PlayerIndex) -> &mut Player {
        self.decks[index].player_mut()
    }

    /// The most recent processed events, oldest first.
    #[must_use]
    pub fn event_log(&self) -> &Vector<ProcessedEvent> {
        &self.event_log
    }

    pub(crate) fn record(&mut self, event: Event, outcome: EventOutcome) {
        self.event_log.push_back(ProcessedEvent { event, outcome });
        while self.event_log.len() > self.event_log_capacity {
            self.event_log.pop_front();
        }
    }
}

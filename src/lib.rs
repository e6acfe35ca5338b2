//! # duel-engine
//!
//! A two-player, turn-based trading-card duel engine.
//!
//! ## Design Principles
//!
//! 1. **One worker per duel**: Events for a duel are applied one at a time,
//!    in submission order, by a dedicated worker thread fed through a
//!    zero-capacity channel.
//!
//! 2. **Pluggable effects**: The engine dispatches events to handlers looked
//!    up by event type; what an event *does* lives in the handler.
//!
//! 3. **Explicit collaborators**: The card catalog, handler registry and
//!    configuration are values built at startup and passed in. Nothing is
//!    global.
//!
//! ## Architecture
//!
//! - **Persistent piles**: Deck piles are `im` vectors, so the deck snapshot
//!   returned on each turn change is cheap.
//!
//! - **Shared duel state**: Board, decks and RNG sit behind one mutex that
//!   the worker and direct callers share.
//!
//! ## Modules
//!
//! - `core`: Players, seats, configuration, errors, RNG
//! - `cards`: Card templates, instances and the catalog
//! - `zones`: Board zones and decks
//! - `events`: Events, handlers and the handler registry
//! - `duel`: Game lifecycle, turns and the event pipeline
//! - `engine`: Concurrent registry of running duels

pub mod cards;
pub mod core;
pub mod duel;
pub mod engine;
pub mod events;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    DuelConfig, DuelError, GameRng, Player, PlayerId, PlayerIndex, PlayerPair, Result,
};

pub use crate::cards::{CardCatalog, CardCategory, CardId, CardInstance, CardTemplate};

pub use crate::zones::{Archetype, Board, CardState, Deck, Zone};

pub use crate::events::{Event, EventHandler, EventStatus, EventType, EventValue, HandlerRegistry, Payload};

pub use crate::duel::{
    DuelState, EventOutcome, EventSubmitter, Game, GameId, GameStatus, Phase, ProcessedEvent, Turn,
};

pub use crate::engine::{Engine, SharedGame};

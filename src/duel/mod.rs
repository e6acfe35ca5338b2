//! Duels: lifecycle, turns and the event pipeline.
//!
//! ## Key Types
//!
//! - `Game`: One duel; owns its turn, state and event worker
//! - `GameId`: UUID identifying a duel
//! - `GameStatus`: `ReadyToStart -> InProgress -> Finished`
//! - `Turn` / `Phase`: Per-player phase state machine
//! - `DuelState`: Board, decks and RNG shared with the event worker
//! - `EventSubmitter`: Cloneable handle for submitting events across threads

pub mod game;
pub mod pipeline;
pub mod state;
pub mod turn;

pub use game::{Game, GameId, GameStatus};
pub use pipeline::EventSubmitter;
pub use state::{DuelState, EventOutcome, ProcessedEvent};
pub use turn::{Phase, Turn};

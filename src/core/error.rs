//! Error type shared by every duel operation.
//!
//! Every message carries the observed value and, where one exists, the
//! expected value or set, so callers can assert on precise failures.

use crate::cards::CardId;
use crate::duel::{GameId, GameStatus, Phase};
use crate::events::{EventStatus, EventType};
use crate::zones::{Archetype, Zone};

use super::player::PlayerIndex;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DuelError>;

/// Errors returned by board, turn, game, engine and catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum DuelError {
    // === Board ===
    #[error("invalid index position {got}: expected a slot in [0, {slots})")]
    InvalidIndexPosition { got: i32, slots: usize },

    #[error("invalid card type {got}: expected {expected}")]
    InvalidCardType { got: String, expected: &'static str },

    #[error("no card in {zone} slot {slot} for {player}")]
    EmptySlot {
        zone: Zone,
        player: PlayerIndex,
        slot: i32,
    },

    // === Turn ===
    #[error("invalid player index {got}: expected 0 or 1")]
    InvalidPlayerIndex { got: usize },

    #[error("cannot advance to next phase because current phase is {phase}")]
    CannotAdvancePhase { phase: Phase },

    #[error("unrecognized turn phase {got:?}: expected one of [{expected}]")]
    UnknownPhase { got: String, expected: String },

    // === Game lifecycle ===
    #[error("game cannot be started in its current state, expected: {expected}, got: {got}")]
    CannotStart { expected: GameStatus, got: GameStatus },

    #[error("game cannot be finished in its current state, expected: {expected}, got: {got}")]
    CannotFinish { expected: GameStatus, got: GameStatus },

    #[error("cannot advance turn in the current game state, expected: {expected}, got: {got}")]
    TurnOutsideDuel { expected: GameStatus, got: GameStatus },

    #[error("cannot advance turn in the current turn phase, expected: {expected}, got: {got}")]
    TurnNotOver { expected: Phase, got: Phase },

    #[error("events can be added only during {expected} state, got: {got}")]
    EventOutsideDuel { expected: GameStatus, got: GameStatus },

    #[error("event queue for game {game_id} is closed")]
    EventQueueClosed { game_id: GameId },

    #[error("cannot spawn the event worker for game {game_id}")]
    EventWorkerSpawn {
        game_id: GameId,
        #[source]
        source: std::io::Error,
    },

    // === Events ===
    #[error("invalid event type {got:?}: expected one of [{expected}]")]
    UnknownEventType { got: String, expected: String },

    #[error("invalid event type {got}: expected {expected}")]
    EventTypeMismatch { expected: EventType, got: EventType },

    #[error("invalid event status {got}: expected {expected}")]
    InvalidEventStatus { expected: EventStatus, got: EventStatus },

    #[error("invalid event status transition from {from} to {to}")]
    InvalidStatusTransition { from: EventStatus, to: EventStatus },

    #[error("{field} missing: expected a {expected} payload value")]
    MissingPayloadField { field: String, expected: &'static str },

    #[error("payload field {field} holds a {got} value: expected {expected}")]
    PayloadKindMismatch {
        field: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("payload field {field} out of range: got {got}, expected {expected}")]
    PayloadOutOfRange {
        field: String,
        got: i64,
        expected: &'static str,
    },

    // === Engine ===
    #[error("only games with state = {expected} can be added to the engine, got {got}")]
    NotAdmissible { expected: GameStatus, got: GameStatus },

    #[error("only games with state = {expected} can be removed from the engine, got {got}")]
    NotRemovable { expected: GameStatus, got: GameStatus },

    #[error("game {game_id} not found among active games")]
    GameNotFound { game_id: GameId },

    // === Cards ===
    #[error("no card template found for {id}")]
    TemplateNotFound { id: CardId },

    #[error("error parsing card records: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("{equip} is not an equip card: got category {category}")]
    NotAnEquip { equip: CardId, category: String },

    #[error("{target} is not a valid target for equip {equip}")]
    InvalidEquipTarget { equip: CardId, target: CardId },

    // === Deck ===
    #[error("invalid deck size {got}: expected exactly {expected} cards")]
    InvalidDeckSize { got: usize, expected: usize },

    #[error("cannot draw {got} cards: expected between 1 and {max}")]
    InvalidDrawCount { got: usize, max: usize },

    #[error("not enough remaining cards to draw: requested {requested}, remaining {remaining}")]
    NotEnoughCards { requested: usize, remaining: usize },

    #[error("no card at {pile} index {index}: pile holds {len} cards")]
    PileIndexOutOfRange {
        pile: &'static str,
        index: usize,
        len: usize,
    },

    #[error("deck archetype already set to {current}")]
    ArchetypeAlreadySet { current: Archetype },

    #[error("invalid deck archetype {got:?}: expected one of [{expected}]")]
    InvalidArchetype { got: String, expected: String },

    // === Player ===
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("invalid country {got:?}: expected one of [{expected}]")]
    InvalidCountry { got: String, expected: String },

    #[error("invalid auth provider {got:?}: expected one of [{expected}]")]
    InvalidAuthProvider { got: String, expected: String },
}

/// Render a closed set of values as `A, B, C` for error messages.
pub(crate) fn expected_list<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuelError>();
    }

    #[test]
    fn test_state_errors_report_expected_and_got() {
        let err = DuelError::CannotStart {
            expected: GameStatus::ReadyToStart,
            got: GameStatus::InProgress,
        };
        assert_eq!(
            err.to_string(),
            "game cannot be started in its current state, expected: READY_TO_START, got: IN_PROGRESS"
        );
    }

    #[test]
    fn test_index_error_reports_observed_value() {
        let err = DuelError::InvalidIndexPosition { got: -1, slots: 5 };
        assert_eq!(err.to_string(), "invalid index position -1: expected a slot in [0, 5)");
    }

    #[test]
    fn test_expected_list() {
        assert_eq!(expected_list(&["a", "b", "c"]), "a, b, c");
        assert_eq!(expected_list::<&str>(&[]), "");
    }
}

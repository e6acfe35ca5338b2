//! Duel events.
//!
//! An event is a typed, timestamped bag of named values. Its type comes from
//! a closed set; what each type means is decided by the handler registered
//! for it, not by the event itself.
//!
//! ## Processing status
//!
//! Every event moves forward through
//! `Pristine -> Enqueued -> Processing -> Completed`, one step at a time.
//! Each accepted transition is recorded with its timestamp.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::str::FromStr;

use crate::cards::CardId;
use crate::core::error::{expected_list, DuelError, Result};
use crate::core::PlayerIndex;

/// The closed set of event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    OneCardDroppedOrDestroyed,
    PlayerLifePointsUpdate,
    CardFusionFailed,
    CardFused,
    MonsterBattle,
    SacrificeOfferedForRitual,
    CardPositionChanged,
    GetOutOfCards,
    DirectDamageToLifePoints,
    TrapActivated,
    BulkCardDestruction,
    PlayerWins,
    PlayerLoses,
    ChangeFieldLand,
    OneCardPointsUpdate,
    BulkCardPointsUpdate,
    DeckShuffled,
    ProhibitOpponentToAttack,
}

impl EventType {
    pub const ALL: [EventType; 18] = [
        EventType::OneCardDroppedOrDestroyed,
        EventType::PlayerLifePointsUpdate,
        EventType::CardFusionFailed,
        EventType::CardFused,
        EventType::MonsterBattle,
        EventType::SacrificeOfferedForRitual,
        EventType::CardPositionChanged,
        EventType::GetOutOfCards,
        EventType::DirectDamageToLifePoints,
        EventType::TrapActivated,
        EventType::BulkCardDestruction,
        EventType::PlayerWins,
        EventType::PlayerLoses,
        EventType::ChangeFieldLand,
        EventType::OneCardPointsUpdate,
        EventType::BulkCardPointsUpdate,
        EventType::DeckShuffled,
        EventType::ProhibitOpponentToAttack,
    ];

    /// Wire name of the type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventType::OneCardDroppedOrDestroyed => "ONE_CARD_DROPPED_OR_DESTROYED",
            EventType::PlayerLifePointsUpdate => "PLAYER_LIFE_POINTS_UPDATE",
            EventType::CardFusionFailed => "CARD_FUSION_FAILED",
            EventType::CardFused => "CARD_FUSED",
            EventType::MonsterBattle => "MONSTER_BATTLE",
            EventType::SacrificeOfferedForRitual => "SACRIFICE_OFFERED_FOR_RITUAL",
            EventType::CardPositionChanged => "CARD_POSITION_CHANGED",
            EventType::GetOutOfCards => "GET_OUT_OF_CARDS",
            EventType::DirectDamageToLifePoints => "DIRECT_DAMAGE_TO_LIFE_POINTS",
            EventType::TrapActivated => "TRAP_ACTIVATED",
            EventType::BulkCardDestruction => "BULK_CARD_DESTRUCTION",
            EventType::PlayerWins => "PLAYER_WINS",
            EventType::PlayerLoses => "PLAYER_LOSES",
            EventType::ChangeFieldLand => "CHANGE_FIELD_LAND",
            EventType::OneCardPointsUpdate => "ONE_CARD_POINTS_UPDATE",
            EventType::BulkCardPointsUpdate => "BULK_CARD_POINTS_UPDATE",
            EventType::DeckShuffled => "DECK_SHUFFLED",
            EventType::ProhibitOpponentToAttack => "PROHIBIT_OPPONENT_TO_ATTACK",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventType {
    type Err = DuelError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| DuelError::UnknownEventType {
                got: name.to_string(),
                expected: expected_list(&Self::ALL),
            })
    }
}

/// Processing status, ordered by lifecycle position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventStatus {
    #[default]
    Pristine,
    Enqueued,
    Processing,
    Completed,
}

impl EventStatus {
    /// The only status this one may move to.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            EventStatus::Pristine => Some(EventStatus::Enqueued),
            EventStatus::Enqueued => Some(EventStatus::Processing),
            EventStatus::Processing => Some(EventStatus::Completed),
            EventStatus::Completed => None,
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventStatus::Pristine => "PRISTINE",
            EventStatus::Enqueued => "ENQUEUED",
            EventStatus::Processing => "PROCESSING",
            EventStatus::Completed => "COMPLETED",
        };
        f.write_str(name)
    }
}

/// A payload value.
///
/// Players and decks are referenced by seat rather than by pointer; handlers
/// resolve them against the duel state they are given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventValue {
    Int(i64),
    Bool(bool),
    Text(String),
    Player(PlayerIndex),
    Deck(PlayerIndex),
    Card(CardId),
}

impl EventValue {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            EventValue::Int(_) => "number",
            EventValue::Bool(_) => "flag",
            EventValue::Text(_) => "text",
            EventValue::Player(_) => "player",
            EventValue::Deck(_) => "deck",
            EventValue::Card(_) => "card",
        }
    }
}

impl From<i64> for EventValue {
    fn from(value: i64) -> Self {
        EventValue::Int(value)
    }
}

impl From<i32> for EventValue {
    fn from(value: i32) -> Self {
        EventValue::Int(i64::from(value))
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Bool(value)
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::Text(value.to_string())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        EventValue::Text(value)
    }
}

impl From<CardId> for EventValue {
    fn from(value: CardId) -> Self {
        EventValue::Card(value)
    }
}

/// Named event values.
pub type Payload = FxHashMap<String, EventValue>;

/// A duel event.
///
/// ```
/// use duel_engine::core::PlayerIndex;
/// use duel_engine::events::{Event, EventStatus, EventType, EventValue};
///
/// let event = Event::new(EventType::DirectDamageToLifePoints, Default::default())
///     .with("player", EventValue::Player(PlayerIndex::SECOND))
///     .with("damage", 500);
///
/// assert_eq!(event.status(), EventStatus::Pristine);
/// assert_eq!(event.int("damage").unwrap(), 500);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    event_type: EventType,
    timestamp: DateTime<Utc>,
    payload: Payload,
    status: EventStatus,
    history: SmallVec<[(EventStatus, DateTime<Utc>); 4]>,
}

impl Event {
    /// Create a pristine event stamped with the current time.
    pub fn new(event_type: EventType, payload: Payload) -> Self {
        let timestamp = Utc::now();
        let mut history = SmallVec::new();
        history.push((EventStatus::Pristine, timestamp));
        Self {
            event_type,
            timestamp,
            payload,
            status: EventStatus::Pristine,
            history,
        }
    }

    /// Create an event from a type name, rejecting names outside the closed set.
    pub fn from_name(name: &str, payload: Payload) -> Result<Self> {
        Ok(Self::new(name.parse()?, payload))
    }

    /// Add a payload value (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<EventValue>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Every status the event has held, oldest first.
    pub fn status_history(&self) -> impl Iterator<Item = EventStatus> + '_ {
        self.history.iter().map(|(status, _)| *status)
    }

    /// When the event entered `status`, if it ever did.
    #[must_use]
    pub fn entered_at(&self, status: EventStatus) -> Option<DateTime<Utc>> {
        self.history.iter().find(|(s, _)| *s == status).map(|(_, at)| *at)
    }

    /// Move to the next status. Skipping or moving backwards is rejected.
    pub fn advance_to(&mut self, to: EventStatus) -> Result<()> {
        if self.status.successor() != Some(to) {
            return Err(DuelError::InvalidStatusTransition { from: self.status, to });
        }
        self.status = to;
        self.history.push((to, Utc::now()));
        Ok(())
    }

    /// Fail unless this event has the given type and is being processed.
    pub fn ensure(&self, event_type: EventType) -> Result<()> {
        if self.event_type != event_type {
            return Err(DuelError::EventTypeMismatch {
                expected: event_type,
                got: self.event_type,
            });
        }
        if self.status != EventStatus::Processing {
            return Err(DuelError::InvalidEventStatus {
                expected: EventStatus::Processing,
                got: self.status,
            });
        }
        Ok(())
    }

    fn field(&self, field: &str, expected: &'static str) -> Result<&EventValue> {
        self.payload.get(field).ok_or_else(|| DuelError::MissingPayloadField {
            field: field.to_string(),
            expected,
        })
    }

    fn mismatch(field: &str, expected: &'static str, got: &EventValue) -> DuelError {
        DuelError::PayloadKindMismatch {
            field: field.to_string(),
            expected,
            got: got.kind(),
        }
    }

    /// A required number.
    pub fn int(&self, field: &str) -> Result<i64> {
        match self.field(field, "number")? {
            EventValue::Int(value) => Ok(*value),
            other => Err(Self::mismatch(field, "number", other)),
        }
    }

    /// A required number that must be non-negative.
    pub fn non_negative(&self, field: &str) -> Result<i64> {
        let value = self.int(field)?;
        if value < 0 {
            return Err(DuelError::PayloadOutOfRange {
                field: field.to_string(),
                got: value,
                expected: "a non-negative number",
            });
        }
        Ok(value)
    }

    /// A required player seat.
    pub fn player(&self, field: &str) -> Result<PlayerIndex> {
        match self.field(field, "player")? {
            EventValue::Player(index) => Ok(*index),
            other => Err(Self::mismatch(field, "player", other)),
        }
    }

    /// A required deck, identified by its owner's seat.
    pub fn deck(&self, field: &str) -> Result<PlayerIndex> {
        match self.field(field, "deck")? {
            EventValue::Deck(index) => Ok(*index),
            other => Err(Self::mismatch(field, "deck", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names_round_trip() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.name().parse::<EventType>().unwrap(), event_type);
        }
    }

    #[test]
    fn test_unknown_event_name_rejected() {
        let err = Event::from_name("INVALID_EVENT_TYPE", Payload::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid event type \"INVALID_EVENT_TYPE\": expected one of ["));
        assert!(message.contains("DECK_SHUFFLED"));
    }

    #[test]
    fn test_new_event_is_pristine() {
        let event = Event::new(EventType::CardFused, Payload::default()).with("key", "value");
        assert_eq!(event.status(), EventStatus::Pristine);
        assert_eq!(event.payload().get("key"), Some(&EventValue::Text("value".into())));
        assert_eq!(event.entered_at(EventStatus::Pristine), Some(event.timestamp()));
    }

    #[test]
    fn test_status_moves_forward_one_step() {
        let mut event = Event::new(EventType::TrapActivated, Payload::default());

        let err = event.advance_to(EventStatus::Processing).unwrap_err();
        assert_eq!(err.to_string(), "invalid event status transition from PRISTINE to PROCESSING");

        event.advance_to(EventStatus::Enqueued).unwrap();
        event.advance_to(EventStatus::Processing).unwrap();
        event.advance_to(EventStatus::Completed).unwrap();
        assert!(event.advance_to(EventStatus::Completed).is_err());
        assert!(event.advance_to(EventStatus::Pristine).is_err());

        let history: Vec<_> = event.status_history().collect();
        assert_eq!(
            history,
            vec![
                EventStatus::Pristine,
                EventStatus::Enqueued,
                EventStatus::Processing,
                EventStatus::Completed
            ]
        );
    }

    #[test]
    fn test_ensure_checks_type_then_status() {
        let mut event = Event::new(EventType::DeckShuffled, Payload::default());

        let err = event.ensure(EventType::PlayerWins).unwrap_err();
        assert_eq!(err.to_string(), "invalid event type DECK_SHUFFLED: expected PLAYER_WINS");

        let err = event.ensure(EventType::DeckShuffled).unwrap_err();
        assert_eq!(err.to_string(), "invalid event status PRISTINE: expected PROCESSING");

        event.advance_to(EventStatus::Enqueued).unwrap();
        event.advance_to(EventStatus::Processing).unwrap();
        event.ensure(EventType::DeckShuffled).unwrap();
    }

    #[test]
    fn test_payload_accessors() {
        let event = Event::new(EventType::ProhibitOpponentToAttack, Payload::default())
            .with("turns", 3)
            .with("opponent", EventValue::Player(PlayerIndex::SECOND))
            .with("negative", -1);

        assert_eq!(event.int("turns").unwrap(), 3);
        assert_eq!(event.player("opponent").unwrap(), PlayerIndex::SECOND);

        let err = event.int("missing").unwrap_err();
        assert_eq!(err.to_string(), "missing missing: expected a number payload value");

        let err = event.deck("opponent").unwrap_err();
        assert_eq!(err.to_string(), "payload field opponent holds a player value: expected deck");

        assert!(matches!(
            event.non_negative("negative"),
            Err(DuelError::PayloadOutOfRange { got: -1, .. })
        ));
    }
}

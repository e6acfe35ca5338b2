//! Handler registry.
//!
//! Maps each event type to at most one handler. A registry is built once at
//! startup and shared immutably between every game's event worker.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::event::{Event, EventType};
use super::handlers;
use crate::core::error::Result;
use crate::duel::DuelState;

/// Applies one type of event to a duel.
///
/// Implementations validate the event (type, `Processing` status and every
/// payload field they read) before touching `state`. A validation failure
/// must leave `state` unchanged.
pub trait EventHandler: Send + Sync {
    /// The event type this handler accepts.
    fn event_type(&self) -> EventType;

    /// Apply the event.
    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()>;
}

/// Event type to handler lookup.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: FxHashMap<EventType, Arc<dyn EventHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry. Every event dispatched through it is ignored.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in handlers.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(handlers::DeckShuffled);
        registry.register(handlers::ProhibitOpponentToAttack);
        registry.register(handlers::PlayerLifePointsUpdate);
        registry.register(handlers::DirectDamageToLifePoints);
        registry.register(handlers::CardPositionChanged);
        registry.register(handlers::OneCardPointsUpdate);
        registry.register(handlers::PlayerWins);
        registry.register(handlers::PlayerLoses);
        registry
    }

    /// Register a handler, replacing any previous one for the same type.
    pub fn register(&mut self, handler: impl EventHandler + 'static) {
        self.handlers.insert(handler.event_type(), Arc::new(handler));
    }

    /// Builder-style `register`.
    #[must_use]
    pub fn with_handler(mut self, handler: impl EventHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    /// Get the handler for an event type.
    #[must_use]
    pub fn get(&self, event_type: EventType) -> Option<&Arc<dyn EventHandler>> {
        self.handlers.get(&event_type)
    }

    #[must_use]
    pub fn contains(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().map(|t| t.name()).collect();
        types.sort_unstable();
        f.debug_struct("HandlerRegistry").field("handlers", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl EventHandler for Noop {
        fn event_type(&self) -> EventType {
            EventType::CardFused
        }

        fn handle(&self, _event: &Event, _state: &mut DuelState) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_standard_registry() {
        let registry = HandlerRegistry::standard();
        assert_eq!(registry.len(), 8);
        assert!(registry.contains(EventType::DeckShuffled));
        assert!(registry.contains(EventType::ProhibitOpponentToAttack));
        assert!(!registry.contains(EventType::MonsterBattle));
    }

    #[test]
    fn test_register_custom_handler() {
        let registry = HandlerRegistry::new().with_handler(Noop);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(EventType::CardFused).unwrap().event_type(), EventType::CardFused);
        assert!(registry.get(EventType::PlayerWins).is_none());
    }

    #[test]
    fn test_registry_debug_lists_types() {
        let registry = HandlerRegistry::new().with_handler(Noop);
        assert_eq!(format!("{registry:?}"), "HandlerRegistry { handlers: [\"CARD_FUSED\"] }");
    }
}

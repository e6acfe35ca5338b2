//! Duel events and their handlers.
//!
//! ## Key Types
//!
//! - `EventType`: Closed set of event kinds
//! - `Event`: Typed, timestamped payload with a processing status
//! - `EventStatus`: `Pristine -> Enqueued -> Processing -> Completed`
//! - `EventHandler`: Applies one event type to a duel
//! - `HandlerRegistry`: Event type to handler lookup, shared by every game

pub mod event;
pub mod handlers;
pub mod registry;

pub use event::{Event, EventStatus, EventType, EventValue, Payload};
pub use registry::{EventHandler, HandlerRegistry};

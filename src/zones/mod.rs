//! Where cards live during a duel.
//!
//! ## Key Types
//!
//! - `Board`: Both players' monster, magic/trap and field zones
//! - `Zone`: Board region a placement landed in
//! - `CardState`: A card instance occupying a board slot
//! - `Deck`: A player's 40 cards across remaining/hand/on-board/destroyed piles
//! - `Archetype`: Optional deck theme

pub mod board;
pub mod deck;

pub use board::{Board, CardState, Zone};
pub use deck::{Archetype, Deck};

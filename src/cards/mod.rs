//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `CardCategory`: Monster race or Magic/Trap/Equip/Ritual
//! - `CardTemplate`: Immutable card data
//! - `CardInstance`: Per-duel card state (current stats, orientation)
//! - `CardCatalog`: Template lookup and instance factory

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardCategory, CardId, CardTemplate, EquipRule, GuardianStar, Rarity, RitualRule};
pub use instance::CardInstance;
pub use registry::CardCatalog;

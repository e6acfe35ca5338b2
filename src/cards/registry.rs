//! Card catalog for template lookup.
//!
//! The `CardCatalog` is an explicitly constructed value: games build one at
//! startup and pass it by reference to whatever materializes decks. There is
//! no process-wide instance, so tests can run isolated catalogs in parallel.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::definition::{CardId, CardTemplate};
use super::instance::CardInstance;
use crate::core::error::{DuelError, Result};

/// Catalog of card templates keyed by `CardId`.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardCatalog, CardId};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .load_cards(r#"[{"id": 4, "name": "Baby Dragon", "category": "Dragon", "baseAttack": 1200}]"#)
///     .unwrap();
///
/// let instance = catalog.new_instance(CardId::new(4)).unwrap();
/// assert_eq!(instance.current_attack, 1200);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    templates: FxHashMap<CardId, Arc<CardTemplate>>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of card records and index them by ID.
    ///
    /// Later records overwrite earlier ones with the same ID. The whole
    /// batch is parsed before anything is indexed, so a malformed batch
    /// leaves the catalog untouched. Returns the number of records read.
    pub fn load_cards(&mut self, raw: &str) -> Result<usize> {
        let records: Vec<CardTemplate> = serde_json::from_str(raw)?;
        let count = records.len();
        for template in records {
            self.register(template);
        }
        tracing::debug!(count, total = self.templates.len(), "loaded card records");
        Ok(count)
    }

    /// Add or replace a single template.
    pub fn register(&mut self, template: CardTemplate) {
        self.templates.insert(template.id, Arc::new(template));
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get_card(&self, id: CardId) -> Option<Arc<CardTemplate>> {
        self.templates.get(&id).cloned()
    }

    /// Materialize a template into a fresh card instance.
    pub fn new_instance(&self, id: CardId) -> Result<CardInstance> {
        self.get_card(id)
            .map(CardInstance::new)
            .ok_or(DuelError::TemplateNotFound { id })
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.templates.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values().map(|t| t.as_ref())
    }
}

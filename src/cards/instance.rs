//! Card instances - per-duel card state.
//!
//! A `CardInstance` is a template materialized into a duel. Many instances
//! share one template through an `Arc`; each carries its own current attack,
//! current defense and orientation.

use std::sync::Arc;

use super::definition::{CardCategory, CardId, CardTemplate};
use crate::core::error::{DuelError, Result};

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInstance {
    /// Shared, read-only template.
    pub template: Arc<CardTemplate>,

    pub current_attack: i64,
    pub current_defense: i64,

    /// `true` in attack position, `false` in defense position.
    pub attack_mode: bool,
}

impl CardInstance {
    /// Materialize a template with its base stats in defense position.
    #[must_use]
    pub fn new(template: Arc<CardTemplate>) -> Self {
        Self {
            current_attack: template.base_attack,
            current_defense: template.base_defense,
            attack_mode: false,
            template,
        }
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.template.id
    }

    #[must_use]
    pub fn category(&self) -> &CardCategory {
        &self.template.category
    }

    /// Toggle between attack and defense position.
    pub fn switch_position(&mut self) {
        self.attack_mode = !self.attack_mode;
    }

    /// Apply an equip card's bonus to this monster.
    ///
    /// Fails without changing stats if `equip` is not an equip card or this
    /// card is not one of its valid targets.
    pub fn apply_equip(&mut self, equip: &CardTemplate) -> Result<()> {
        let rule = match (&equip.category, &equip.equip_rule) {
            (CardCategory::Equip, Some(rule)) => rule,
            _ => {
                return Err(DuelError::NotAnEquip {
                    equip: equip.id,
                    category: equip.category.to_string(),
                })
            }
        };

        if !rule.valid_target_ids.contains(&self.card_id()) {
            return Err(DuelError::InvalidEquipTarget {
                equip: equip.id,
                target: self.card_id(),
            });
        }

        self.current_attack = self.current_attack.saturating_add(rule.bonus);
        self.current_defense = self.current_defense.saturating_add(rule.bonus);
        Ok(())
    }

    /// Restore base stats (e.g. when an equip is destroyed).
    pub fn reset_stats(&mut self) {
        self.current_attack = self.template.base_attack;
        self.current_defense = self.template.base_defense;
    }
}

//! The playing field shared by both players.
//!
//! Each player owns a five-slot monster zone, a five-slot combined
//! magic/trap/equip/ritual zone and a single field slot. Where a card may go
//! is decided solely by its category.

use crate::cards::{CardCategory, CardInstance};
use crate::core::config::ZONE_SLOTS;
use crate::core::error::{DuelError, Result};
use crate::core::player::{PlayerIndex, PlayerPair};

/// Board regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    Monster,
    MagicTrap,
    Field,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Monster => "MONSTER",
            Zone::MagicTrap => "MAGIC_TRAP_EQUIP",
            Zone::Field => "BATTLE_FIELD",
        };
        f.write_str(name)
    }
}

/// A board slot occupant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardState {
    pub card: CardInstance,
    pub face_up: bool,

    /// Zone-relative slot. Signed so that out-of-range requests can be
    /// expressed and rejected.
    pub slot: i32,
}

impl CardState {
    #[must_use]
    pub fn new(card: CardInstance, face_up: bool, slot: i32) -> Self {
        Self { card, face_up, slot }
    }

    #[must_use]
    pub fn face_up(card: CardInstance, slot: i32) -> Self {
        Self::new(card, true, slot)
    }

    #[must_use]
    pub fn face_down(card: CardInstance, slot: i32) -> Self {
        Self::new(card, false, slot)
    }
}

type ZoneRow = [Option<CardState>; ZONE_SLOTS];

/// Both players' zones.
///
/// Setting a card overwrites whatever occupied that exact slot; there is no
/// occupancy check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    monster_zones: PlayerPair<ZoneRow>,
    magic_trap_zones: PlayerPair<ZoneRow>,
    field_zones: PlayerPair<Option<CardState>>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card in the zone implied by its category.
    ///
    /// Magic, Trap, Equip and Ritual cards go to the magic/trap zone; monster
    /// races go to the monster zone. Returns the zone the card landed in.
    pub fn set_card_at_index_position(&mut self, state: CardState, player: PlayerIndex) -> Result<Zone> {
        let slot = slot_index(state.slot, ZONE_SLOTS)?;

        let category = state.card.category();
        let zone = if category.is_magic_trap() {
            Zone::MagicTrap
        } else if category.is_monster() {
            Zone::Monster
        } else {
            return Err(DuelError::InvalidCardType {
                got: category.to_string(),
                expected: "a monster race or one of [Magic, Trap, Equip, Ritual]",
            });
        };

        tracing::trace!(%zone, %player, slot, card = %state.card.card_id(), "card placed");
        self.slots_mut(zone, player)[slot] = Some(state);
        Ok(zone)
    }

    /// Place a Magic card in the player's field slot, replacing any previous one.
    pub fn set_field_card(&mut self, mut state: CardState, player: PlayerIndex) -> Result<()> {
        if *state.card.category() != CardCategory::Magic {
            return Err(DuelError::InvalidCardType {
                got: state.card.category().to_string(),
                expected: "Magic",
            });
        }
        state.slot = 0;
        self.field_zones[player] = Some(state);
        Ok(())
    }

    /// The occupant of a slot, if any. Out-of-range slots hold nothing.
    #[must_use]
    pub fn card_at(&self, zone: Zone, player: PlayerIndex, slot: i32) -> Option<&CardState> {
        let slots = self.slots(zone, player);
        let index = usize::try_from(slot).ok()?;
        slots.get(index)?.as_ref()
    }

    /// Mutable access to an occupied slot.
    pub fn card_at_mut(&mut self, zone: Zone, player: PlayerIndex, slot: i32) -> Result<&mut CardState> {
        let index = slot_index(slot, self.slots(zone, player).len())?;
        self.slots_mut(zone, player)[index]
            .as_mut()
            .ok_or(DuelError::EmptySlot { zone, player, slot })
    }

    /// Remove and return the occupant of a slot.
    pub fn take_card_at(&mut self, zone: Zone, player: PlayerIndex, slot: i32) -> Result<CardState> {
        let index = slot_index(slot, self.slots(zone, player).len())?;
        self.slots_mut(zone, player)[index]
            .take()
            .ok_or(DuelError::EmptySlot { zone, player, slot })
    }

    /// Number of occupied slots in a player's zone.
    #[must_use]
    pub fn occupied(&self, zone: Zone, player: PlayerIndex) -> usize {
        self.slots(zone, player).iter().filter(|s| s.is_some()).count()
    }

    /// All slots of a player's zone; the field zone has exactly one.
    #[must_use]
    pub fn slots(&self, zone: Zone, player: PlayerIndex) -> &[Option<CardState>] {
        match zone {
            Zone::Monster => &self.monster_zones[player],
            Zone::MagicTrap => &self.magic_trap_zones[player],
            Zone::Field => std::slice::from_ref(&self.field_zones[player]),
        }
    }

    fn slots_mut(&mut self, zone: Zone, player: PlayerIndex) -> &mut [Option<CardState>] {
        match zone {
            Zone::Monster => &mut self.monster_zones[player],
            Zone::MagicTrap => &mut self.magic_trap_zones[player],
            Zone::Field => std::slice::from_mut(&mut self.field_zones[player]),
        }
    }
}

fn slot_index(slot: i32, slots: usize) -> Result<usize> {
    usize::try_from(slot)
        .ok()
        .filter(|&index| index < slots)
        .ok_or(DuelError::InvalidIndexPosition { got: slot, slots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardTemplate};
    use std::sync::Arc;

    fn card(id: u32, category: CardCategory) -> CardInstance {
        CardInstance::new(Arc::new(CardTemplate::new(CardId::new(id), "Card", category)))
    }

    #[test]
    fn test_monster_goes_to_monster_zone() {
        let mut board = Board::new();
        let state = CardState::face_up(card(4, CardCategory::Dragon), 3);

        let zone = board.set_card_at_index_position(state.clone(), PlayerIndex::FIRST).unwrap();

        assert_eq!(zone, Zone::Monster);
        assert_eq!(board.card_at(Zone::Monster, PlayerIndex::FIRST, 3), Some(&state));
        assert!(board.card_at(Zone::Monster, PlayerIndex::FIRST, 2).is_none());
        assert!(board.card_at(Zone::Monster, PlayerIndex::FIRST, 4).is_none());
        assert!(board.card_at(Zone::Monster, PlayerIndex::SECOND, 3).is_none());
        assert_eq!(board.occupied(Zone::MagicTrap, PlayerIndex::FIRST), 0);
    }

    #[test]
    fn test_out_of_range_slots() {
        let mut board = Board::new();
        for slot in [-1, 5, 42] {
            let err = board
                .set_card_at_index_position(CardState::face_down(card(13, CardCategory::Fiend), slot), PlayerIndex::SECOND)
                .unwrap_err();
            assert!(err.to_string().contains("invalid index position"), "slot {slot}: {err}");
        }
        assert_eq!(board.occupied(Zone::Monster, PlayerIndex::SECOND), 0);
    }

    #[test]
    fn test_unrecognized_category() {
        let mut board = Board::new();
        let bogus = card(1, CardCategory::Unrecognized("Not a valid type".into()));

        let err = board
            .set_card_at_index_position(CardState::face_down(bogus, 3), PlayerIndex::FIRST)
            .unwrap_err();
        assert!(err.to_string().contains("invalid card type"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut board = Board::new();
        let first = CardState::face_up(card(1, CardCategory::Rock), 0);
        let second = CardState::face_down(card(2, CardCategory::Plant), 0);

        board.set_card_at_index_position(first, PlayerIndex::FIRST).unwrap();
        board.set_card_at_index_position(second.clone(), PlayerIndex::FIRST).unwrap();

        assert_eq!(board.card_at(Zone::Monster, PlayerIndex::FIRST, 0), Some(&second));
        assert_eq!(board.occupied(Zone::Monster, PlayerIndex::FIRST), 1);
    }

    #[test]
    fn test_take_card_at() {
        let mut board = Board::new();
        let state = CardState::face_up(card(1, CardCategory::Trap), 2);
        board.set_card_at_index_position(state.clone(), PlayerIndex::SECOND).unwrap();

        let taken = board.take_card_at(Zone::MagicTrap, PlayerIndex::SECOND, 2).unwrap();
        assert_eq!(taken, state);

        let err = board.take_card_at(Zone::MagicTrap, PlayerIndex::SECOND, 2).unwrap_err();
        assert!(matches!(err, DuelError::EmptySlot { slot: 2, .. }));
    }

    #[test]
    fn test_card_at_mut() {
        let mut board = Board::new();
        board
            .set_card_at_index_position(CardState::face_up(card(1, CardCategory::Aqua), 1), PlayerIndex::FIRST)
            .unwrap();

        board.card_at_mut(Zone::Monster, PlayerIndex::FIRST, 1).unwrap().card.switch_position();
        assert!(board.card_at(Zone::Monster, PlayerIndex::FIRST, 1).unwrap().card.attack_mode);

        assert!(board.card_at_mut(Zone::Monster, PlayerIndex::FIRST, 0).is_err());
        assert!(board.card_at_mut(Zone::Monster, PlayerIndex::FIRST, 9).is_err());
    }

    #[test]
    fn test_field_card() {
        let mut board = Board::new();
        let forest = CardState::face_up(card(330, CardCategory::Magic), 4);
        board.set_field_card(forest, PlayerIndex::FIRST).unwrap();

        let placed = board.card_at(Zone::Field, PlayerIndex::FIRST, 0).unwrap();
        assert_eq!(placed.slot, 0);
        assert_eq!(board.occupied(Zone::Field, PlayerIndex::SECOND), 0);

        let err = board
            .set_field_card(CardState::face_up(card(1, CardCategory::Dragon), 0), PlayerIndex::FIRST)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid card type Dragon: expected Magic");
    }
}

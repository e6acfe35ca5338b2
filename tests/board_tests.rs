//! Board placement integration tests.
//!
//! These tests verify that cards land in the zone implied by their category,
//! for both seats and every slot, and that bad slots and categories are
//! rejected without touching the board.

use duel_engine::cards::{CardCatalog, CardCategory, CardId, CardInstance, CardTemplate};
use duel_engine::core::PlayerIndex;
use duel_engine::zones::{Board, CardState, Zone};
use proptest::prelude::*;
use std::sync::Arc;

fn instance(category: CardCategory) -> CardInstance {
    CardInstance::new(Arc::new(CardTemplate::new(CardId::new(1), "Card", category)))
}

fn all_categories() -> Vec<CardCategory> {
    CardCategory::MONSTER_RACES
        .iter()
        .chain(CardCategory::NON_MONSTER.iter())
        .cloned()
        .collect()
}

// =============================================================================
// Placement
// =============================================================================

/// Every slot of both players accepts a monster and nothing else changes.
#[test]
fn test_monster_placement_every_slot() {
    for player in PlayerIndex::both() {
        for slot in 0..5 {
            let mut board = Board::new();
            let state = CardState::face_down(instance(CardCategory::Warrior), slot);

            let zone = board.set_card_at_index_position(state.clone(), player).unwrap();

            assert_eq!(zone, Zone::Monster);
            assert_eq!(board.card_at(Zone::Monster, player, slot), Some(&state));
            for other in (0..5).filter(|&s| s != slot) {
                assert!(board.card_at(Zone::Monster, player, other).is_none());
            }
            assert_eq!(board.occupied(Zone::Monster, player.opponent()), 0);
            assert_eq!(board.occupied(Zone::MagicTrap, player), 0);
        }
    }
}

/// Magic, Trap, Equip and Ritual all share the combined zone.
#[test]
fn test_combined_zone_routing() {
    let mut board = Board::new();
    let categories = [CardCategory::Magic, CardCategory::Trap, CardCategory::Equip, CardCategory::Ritual];

    for (slot, category) in categories.into_iter().enumerate() {
        let zone = board
            .set_card_at_index_position(CardState::face_down(instance(category), slot as i32), PlayerIndex::SECOND)
            .unwrap();
        assert_eq!(zone, Zone::MagicTrap);
    }

    assert_eq!(board.occupied(Zone::MagicTrap, PlayerIndex::SECOND), 4);
    assert_eq!(board.occupied(Zone::Monster, PlayerIndex::SECOND), 0);
}

/// Index 5 and -1 are both outside the zone.
#[test]
fn test_invalid_index_positions() {
    let mut board = Board::new();

    for slot in [5, -1] {
        let err = board
            .set_card_at_index_position(CardState::face_up(instance(CardCategory::Dragon), slot), PlayerIndex::FIRST)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid index position"), "{message}");
        assert!(message.contains(&slot.to_string()), "{message}");
    }

    assert_eq!(board, Board::new());
}

/// Categories read from card records that are not known are rejected.
#[test]
fn test_unrecognized_category_from_records() {
    let mut catalog = CardCatalog::new();
    catalog
        .load_cards(r#"[{"id": 900, "name": "Glitch", "category": "Not a valid type"}]"#)
        .unwrap();
    let card = catalog.new_instance(CardId::new(900)).unwrap();

    let err = Board::new()
        .set_card_at_index_position(CardState::face_down(card, 3), PlayerIndex::FIRST)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid card type Not a valid type: expected a monster race or one of [Magic, Trap, Equip, Ritual]"
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Any valid slot, seat and category lands exactly where the category says.
    #[test]
    fn prop_placement_routes_by_category(
        slot in 0i32..5,
        seat in 0usize..2,
        category_index in 0usize..24,
    ) {
        let category = all_categories()[category_index].clone();
        let player = PlayerIndex::new(seat).unwrap();
        let expected = if category.is_monster() { Zone::Monster } else { Zone::MagicTrap };

        let mut board = Board::new();
        let state = CardState::face_up(instance(category), slot);
        let zone = board.set_card_at_index_position(state.clone(), player).unwrap();

        prop_assert_eq!(zone, expected);
        prop_assert_eq!(board.card_at(zone, player, slot), Some(&state));
        prop_assert_eq!(board.occupied(Zone::Monster, player) + board.occupied(Zone::MagicTrap, player), 1);
        prop_assert_eq!(board.occupied(Zone::Monster, player.opponent()), 0);
    }

    /// Any slot outside [0, 5) is rejected and the board stays empty.
    #[test]
    fn prop_out_of_range_slots_rejected(
        slot in prop_oneof![i32::MIN..0, 5..i32::MAX],
        seat in 0usize..2,
    ) {
        let player = PlayerIndex::new(seat).unwrap();
        let mut board = Board::new();

        let result = board.set_card_at_index_position(CardState::face_up(instance(CardCategory::Beast), slot), player);

        prop_assert!(result.is_err());
        prop_assert_eq!(board, Board::new());
    }

    /// Repeated placements into one slot keep only the last card.
    #[test]
    fn prop_last_write_wins(ids in proptest::collection::vec(1u32..1000, 1..10), slot in 0i32..5) {
        let mut board = Board::new();
        for &id in &ids {
            let card = CardInstance::new(Arc::new(CardTemplate::new(CardId::new(id), "Card", CardCategory::Pyro)));
            board.set_card_at_index_position(CardState::face_up(card, slot), PlayerIndex::FIRST).unwrap();
        }

        let placed = board.card_at(Zone::Monster, PlayerIndex::FIRST, slot).unwrap();
        prop_assert_eq!(placed.card.card_id(), CardId::new(*ids.last().unwrap()));
        prop_assert_eq!(board.occupied(Zone::Monster, PlayerIndex::FIRST), 1);
    }
}

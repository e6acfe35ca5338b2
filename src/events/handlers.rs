//! Built-in event handlers.
//!
//! Each handler reads and validates every payload field it needs before
//! changing anything, so a rejected event leaves the duel untouched.
//!
//! | Event type | Payload |
//! |---|---|
//! | `DECK_SHUFFLED` | `deck` |
//! | `PROHIBIT_OPPONENT_TO_ATTACK` | `turns`, `opponent` |
//! | `PLAYER_LIFE_POINTS_UPDATE` | `player`, `life_points` |
//! | `DIRECT_DAMAGE_TO_LIFE_POINTS` | `player`, `damage` |
//! | `CARD_POSITION_CHANGED` | `player`, `slot` |
//! | `ONE_CARD_POINTS_UPDATE` | `player`, `slot`, `attack`, `defense` |
//! | `PLAYER_WINS` | `player` |
//! | `PLAYER_LOSES` | `player` |

use tracing::debug;

use super::event::{Event, EventType};
use super::registry::EventHandler;
use crate::core::error::{DuelError, Result};
use crate::duel::DuelState;
use crate::zones::Zone;

fn slot(event: &Event) -> Result<i32> {
    let raw = event.int("slot")?;
    i32::try_from(raw).map_err(|_| DuelError::PayloadOutOfRange {
        field: "slot".to_string(),
        got: raw,
        expected: "a board slot",
    })
}

/// Shuffles the remaining pile of one deck with the duel RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeckShuffled;

impl EventHandler for DeckShuffled {
    fn event_type(&self) -> EventType {
        EventType::DeckShuffled
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let owner = event.deck("deck")?;

        debug!(%owner, remaining = state.decks[owner].remaining().len(), "shuffling deck");
        state.decks[owner].shuffle_remaining(&mut state.rng);
        Ok(())
    }
}

/// Stops the opponent from attacking for a number of their own turns.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProhibitOpponentToAttack;

impl EventHandler for ProhibitOpponentToAttack {
    fn event_type(&self) -> EventType {
        EventType::ProhibitOpponentToAttack
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let raw = event.non_negative("turns")?;
        let turns = u32::try_from(raw).map_err(|_| DuelError::PayloadOutOfRange {
            field: "turns".to_string(),
            got: raw,
            expected: "a turn count",
        })?;
        let opponent = event.player("opponent")?;

        debug!(%opponent, turns, "prohibiting opponent to attack");
        state.player_mut(opponent).remaining_turns_to_attack = turns;
        Ok(())
    }
}

/// Sets a player's life points.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerLifePointsUpdate;

impl EventHandler for PlayerLifePointsUpdate {
    fn event_type(&self) -> EventType {
        EventType::PlayerLifePointsUpdate
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let player = event.player("player")?;
        let life_points = event.non_negative("life_points")?;

        state.player_mut(player).life_points = life_points;
        Ok(())
    }
}

/// Subtracts damage from a player's life points, bottoming out at zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectDamageToLifePoints;

impl EventHandler for DirectDamageToLifePoints {
    fn event_type(&self) -> EventType {
        EventType::DirectDamageToLifePoints
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let player = event.player("player")?;
        let damage = event.non_negative("damage")?;

        let target = state.player_mut(player);
        target.life_points = target.life_points.saturating_sub(damage).max(0);
        debug!(%player, damage, life_points = target.life_points, "direct damage");
        Ok(())
    }
}

/// Toggles the attack/defense position of a monster on the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct CardPositionChanged;

impl EventHandler for CardPositionChanged {
    fn event_type(&self) -> EventType {
        EventType::CardPositionChanged
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let player = event.player("player")?;
        let slot = slot(event)?;

        state.board.card_at_mut(Zone::Monster, player, slot)?.card.switch_position();
        Ok(())
    }
}

/// Overwrites the current attack and defense of a monster on the board.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneCardPointsUpdate;

impl EventHandler for OneCardPointsUpdate {
    fn event_type(&self) -> EventType {
        EventType::OneCardPointsUpdate
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let player = event.player("player")?;
        let slot = slot(event)?;
        let attack = event.non_negative("attack")?;
        let defense = event.non_negative("defense")?;

        let card = &mut state.board.card_at_mut(Zone::Monster, player, slot)?.card;
        card.current_attack = attack;
        card.current_defense = defense;
        Ok(())
    }
}

/// Counts a win for a player.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerWins;

impl EventHandler for PlayerWins {
    fn event_type(&self) -> EventType {
        EventType::PlayerWins
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let player = event.player("player")?;

        state.player_mut(player).record_win();
        Ok(())
    }
}

/// Counts a loss for a player.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerLoses;

impl EventHandler for PlayerLoses {
    fn event_type(&self) -> EventType {
        EventType::PlayerLoses
    }

    fn handle(&self, event: &Event, state: &mut DuelState) -> Result<()> {
        event.ensure(self.event_type())?;
        let player = event.player("player")?;

        state.player_mut(player).record_loss();
        Ok(())
    }
}

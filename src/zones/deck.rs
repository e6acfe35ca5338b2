//! A player's deck for one duel.
//!
//! The 40 card instances are partitioned into four piles. Cards move between
//! piles and never leave the deck, so `total_cards()` is constant.
//!
//! Piles are `im::Vector`s: a `Deck` clone shares structure with the
//! original, which keeps turn-change snapshots cheap.

use im::Vector;
use std::str::FromStr;

use crate::cards::{CardCatalog, CardId, CardInstance};
use crate::core::config::DECK_SIZE;
use crate::core::error::{expected_list, DuelError, Result};
use crate::core::{GameRng, Player};

/// Predefined deck archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    Female,
    Mountain,
    Yami,
    Forest,
    Aqua,
    Warrior,
    Wasteland,
    Generic,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Archetype::Female,
        Archetype::Mountain,
        Archetype::Yami,
        Archetype::Forest,
        Archetype::Aqua,
        Archetype::Warrior,
        Archetype::Wasteland,
        Archetype::Generic,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Archetype::Female => "FEMALE",
            Archetype::Mountain => "MOUNTAIN",
            Archetype::Yami => "YAMI",
            Archetype::Forest => "FOREST",
            Archetype::Aqua => "AQUA",
            Archetype::Warrior => "WARRIOR",
            Archetype::Wasteland => "WASTELAND",
            Archetype::Generic => "GENERIC",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = DuelError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| DuelError::InvalidArchetype {
                got: name.to_string(),
                expected: expected_list(&Self::ALL),
            })
    }
}

/// A player's 40 cards split across remaining, hand, on-board and destroyed piles.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    player: Player,
    archetype: Option<Archetype>,
    remaining: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    on_board: Vector<CardInstance>,
    destroyed: Vector<CardInstance>,
    max_draw: usize,
}

impl Deck {
    /// Build a deck with every card in the remaining pile, in the given order.
    pub fn new(player: Player, cards: Vec<CardInstance>) -> Result<Self> {
        if cards.len() != DECK_SIZE {
            return Err(DuelError::InvalidDeckSize {
                got: cards.len(),
                expected: DECK_SIZE,
            });
        }

        Ok(Self {
            player,
            archetype: None,
            remaining: cards.into_iter().collect(),
            hand: Vector::new(),
            on_board: Vector::new(),
            destroyed: Vector::new(),
            max_draw: 5,
        })
    }

    /// Materialize a deck from template IDs.
    pub fn from_template_ids(player: Player, catalog: &CardCatalog, ids: &[CardId]) -> Result<Self> {
        let cards = ids
            .iter()
            .map(|&id| catalog.new_instance(id))
            .collect::<Result<Vec<_>>>()?;
        Self::new(player, cards)
    }

    /// Change the per-draw upper bound.
    #[must_use]
    pub fn with_max_draw(mut self, max: usize) -> Self {
        self.max_draw = max;
        self
    }

    pub(crate) fn set_max_draw(&mut self, max: usize) {
        self.max_draw = max;
    }

    /// Move `count` cards from the top of the remaining pile to the hand.
    pub fn draw(&mut self, count: usize) -> Result<()> {
        if count == 0 || count > self.max_draw {
            return Err(DuelError::InvalidDrawCount {
                got: count,
                max: self.max_draw,
            });
        }
        if self.remaining.len() < count {
            return Err(DuelError::NotEnoughCards {
                requested: count,
                remaining: self.remaining.len(),
            });
        }

        let rest = self.remaining.split_off(count);
        let drawn = std::mem::replace(&mut self.remaining, rest);
        self.hand.append(drawn);
        Ok(())
    }

    /// Move a hand card onto the board pile and return a copy for placement.
    pub fn play_from_hand(&mut self, index: usize) -> Result<CardInstance> {
        let card = remove_at(&mut self.hand, "hand", index)?;
        self.on_board.push_back(card.clone());
        Ok(card)
    }

    /// Move an on-board card to the destroyed pile.
    pub fn destroy_from_board(&mut self, index: usize) -> Result<()> {
        let card = remove_at(&mut self.on_board, "on-board", index)?;
        self.destroyed.push_back(card);
        Ok(())
    }

    /// Shuffle the remaining pile; the other piles are untouched.
    pub fn shuffle_remaining(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<_> = self.remaining.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.remaining = cards.into_iter().collect();
    }

    /// Set the archetype from its name. Only allowed once.
    pub fn set_archetype(&mut self, name: &str) -> Result<()> {
        if let Some(current) = self.archetype {
            return Err(DuelError::ArchetypeAlreadySet { current });
        }
        self.archetype = Some(name.parse()?);
        Ok(())
    }

    #[must_use]
    pub fn archetype(&self) -> Option<Archetype> {
        self.archetype
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[must_use]
    pub fn remaining(&self) -> &Vector<CardInstance> {
        &self.remaining
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn on_board(&self) -> &Vector<CardInstance> {
        &self.on_board
    }

    #[must_use]
    pub fn destroyed(&self) -> &Vector<CardInstance> {
        &self.destroyed
    }

    #[must_use]
    pub fn max_draw(&self) -> usize {
        self.max_draw
    }

    /// Sum of all four piles; always 40.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.remaining.len() + self.hand.len() + self.on_board.len() + self.destroyed.len()
    }
}

fn remove_at(pile: &mut Vector<CardInstance>, name: &'static str, index: usize) -> Result<CardInstance> {
    if index >= pile.len() {
        return Err(DuelError::PileIndexOutOfRange {
            pile: name,
            index,
            len: pile.len(),
        });
    }
    Ok(pile.remove(index))
}

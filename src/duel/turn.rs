//! Turn and phase state machine.
//!
//! A turn belongs to one seat and walks `Draw -> Place -> Action -> End`.
//! `End` is terminal: the game replaces the turn instead of advancing it.

use std::str::FromStr;

use crate::core::error::{expected_list, DuelError, Result};
use crate::core::{Player, PlayerId, PlayerIndex};

/// Turn phases in play order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Draw,
    Place,
    Action,
    End,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Draw, Phase::Place, Phase::Action, Phase::End];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Draw => "DRAW_CARDS_PHASE",
            Phase::Place => "PLACE_CARDS_PHASE",
            Phase::Action => "ACTION_PHASE",
            Phase::End => "END_PHASE",
        }
    }

    /// The phase after this one; `None` from `End`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Phase::Draw => Some(Phase::Place),
            Phase::Place => Some(Phase::Action),
            Phase::Action => Some(Phase::End),
            Phase::End => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = DuelError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| DuelError::UnknownPhase {
                got: name.to_string(),
                expected: expected_list(&Self::ALL),
            })
    }
}

/// One player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    player: PlayerId,
    player_index: PlayerIndex,
    phase: Phase,
}

impl Turn {
    /// Start a turn for `player` in seat `index`, in the draw phase.
    pub fn new(player: &Player, index: usize) -> Result<Self> {
        Ok(Self {
            player: player.id,
            player_index: PlayerIndex::new(index)?,
            phase: Phase::Draw,
        })
    }

    /// Advance to the next phase.
    pub fn next_phase(&mut self) -> Result<()> {
        self.phase = self
            .phase
            .next()
            .ok_or(DuelError::CannotAdvancePhase { phase: self.phase })?;
        tracing::debug!(player_index = %self.player_index, phase = %self.phase, "phase advanced");
        Ok(())
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn player_index(&self) -> PlayerIndex {
        self.player_index
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

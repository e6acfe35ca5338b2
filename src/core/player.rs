//! Players, seats and per-seat storage.
//!
//! ## PlayerIndex
//!
//! A duel has exactly two seats. `PlayerIndex` is the 0-based seat a player
//! occupies for the duration of one duel.
//!
//! ## PlayerPair
//!
//! Fixed two-entry storage indexed by `PlayerIndex`.
//!
//! ## Player
//!
//! Profile data (identity, country, auth provider, counters) plus the
//! per-duel values the engine mutates: life points and the attack
//! prohibition counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use uuid::Uuid;

use super::config::PLAYER_COUNT;
use super::error::{expected_list, DuelError, Result};

/// Seat index of a player inside a duel (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerIndex(u8);

impl PlayerIndex {
    /// The player who takes the first turn.
    pub const FIRST: Self = Self(0);

    /// The player who takes the second turn.
    pub const SECOND: Self = Self(1);

    /// Create a player index, rejecting anything outside `{0, 1}`.
    pub fn new(index: usize) -> Result<Self> {
        if index < PLAYER_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(DuelError::InvalidPlayerIndex { got: index })
        }
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Both seats in turn order.
    pub fn both() -> impl Iterator<Item = PlayerIndex> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player index {}", self.0)
    }
}

/// Per-seat storage with O(1) access.
///
/// ```
/// use duel_engine::core::{PlayerIndex, PlayerPair};
///
/// let mut life = PlayerPair::new(8000, 8000);
/// life[PlayerIndex::SECOND] -= 500;
/// assert_eq!(life[PlayerIndex::SECOND], 7500);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerPair<T> {
    /// Create a pair from the first and second seat values.
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Get a reference to a seat's value.
    #[must_use]
    pub fn get(&self, player: PlayerIndex) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's value.
    pub fn get_mut(&mut self, player: PlayerIndex) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerIndex, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerIndex, &T)> {
        PlayerIndex::both().zip(self.data.iter())
    }

    /// Iterate over `(PlayerIndex, &mut T)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerIndex, &mut T)> {
        PlayerIndex::both().zip(self.data.iter_mut())
    }
}

impl<T> From<[T; PLAYER_COUNT]> for PlayerPair<T> {
    fn from(data: [T; PLAYER_COUNT]) -> Self {
        Self { data }
    }
}

impl<T> Index<PlayerIndex> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerIndex) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerIndex> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerIndex) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Globally unique player identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Create a new random player ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Countries a player may register from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    Canada,
    UnitedStates,
    Mexico,
    Colombia,
    Brazil,
    Chile,
    Peru,
    Argentina,
}

impl Country {
    pub const ALL: [Country; 8] = [
        Country::Canada,
        Country::UnitedStates,
        Country::Mexico,
        Country::Colombia,
        Country::Brazil,
        Country::Chile,
        Country::Peru,
        Country::Argentina,
    ];

    /// ISO 3166 alpha-2 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Country::Canada => "CA",
            Country::UnitedStates => "US",
            Country::Mexico => "MX",
            Country::Colombia => "CO",
            Country::Brazil => "BR",
            Country::Chile => "CL",
            Country::Peru => "PE",
            Country::Argentina => "AR",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = DuelError;

    fn from_str(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| DuelError::InvalidCountry {
                got: code.to_string(),
                expected: expected_list(&Self::ALL),
            })
    }
}

/// Authentication method used by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthProvider {
    Google,
    Facebook,
    Apple,
}

impl AuthProvider {
    pub const ALL: [AuthProvider; 3] = [AuthProvider::Google, AuthProvider::Facebook, AuthProvider::Apple];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AuthProvider::Google => "GOOGLE",
            AuthProvider::Facebook => "FACEBOOK",
            AuthProvider::Apple => "APPLE",
        }
    }
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AuthProvider {
    type Err = DuelError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| DuelError::InvalidAuthProvider {
                got: name.to_string(),
                expected: expected_list(&Self::ALL),
            })
    }
}

/// A duelist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub country: Option<Country>,
    pub auth_provider: Option<AuthProvider>,
    pub registered_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub is_online: bool,
    pub is_dueling: bool,

    /// Reset to the configured starting value when a duel is created.
    pub life_points: i64,

    pub total_duels: u32,
    pub win_count: u32,
    pub loss_count: u32,

    /// Own turns left before this player may attack again.
    pub remaining_turns_to_attack: u32,
}

impl Player {
    /// Create an online player with a fresh identity.
    pub fn new(username: impl Into<String>) -> Result<Self> {
        let username = username.into();
        if username.is_empty() {
            return Err(DuelError::EmptyUsername);
        }

        let now = Utc::now();
        Ok(Self {
            id: PlayerId::new(),
            username,
            country: None,
            auth_provider: None,
            registered_at: now,
            last_login: now,
            is_online: true,
            is_dueling: false,
            life_points: 0,
            total_duels: 0,
            win_count: 0,
            loss_count: 0,
            remaining_turns_to_attack: 0,
        })
    }

    /// Set the country from its two-letter code.
    pub fn set_country(&mut self, code: &str) -> Result<()> {
        self.country = Some(code.parse()?);
        Ok(())
    }

    /// Set the auth provider from its name (`GOOGLE`, `FACEBOOK`, `APPLE`).
    pub fn set_auth_provider(&mut self, name: &str) -> Result<()> {
        self.auth_provider = Some(name.parse()?);
        Ok(())
    }

    pub fn update_last_login(&mut self) {
        self.last_login = Utc::now();
    }

    /// Win rate as a percentage; 0 for a player with no duels.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_duels == 0 {
            return 0.0;
        }
        f64::from(self.win_count) / f64::from(self.total_duels) * 100.0
    }

    pub fn record_win(&mut self) {
        self.win_count += 1;
        self.total_duels += 1;
    }

    pub fn record_loss(&mut self) {
        self.loss_count += 1;
        self.total_duels += 1;
    }

    /// Whether attack-prohibition effects currently block this player.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.remaining_turns_to_attack == 0
    }
}

//! Player identification, roster entries, and per-player storage.
//!
//! ## PlayerId
//!
//! Player ids are 1-based (`Player 1` .. `Player N`) to match what the
//! players see on screen.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//! A `Roster` is a `PlayerMap<Player>`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::ConfigError;

/// Player identifier. The first player is `PlayerId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Storage slot for this player (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }

    /// Iterate over all player IDs of a roster with `roster_size` players.
    ///
    /// ```
    /// use click_brawl::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(roster_size: usize) -> impl Iterator<Item = PlayerId> {
        (1..=roster_size.min(u8::MAX as usize) as u8).map(PlayerId)
    }

    /// Name shown before a player edits it.
    #[must_use]
    pub fn default_name(self) -> String {
        format!("Player {}", self.0)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A fighter in the tournament.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub health: u32,
    pub clicks: u32,
}

impl Player {
    /// Create a player with the default name.
    #[must_use]
    pub fn new(id: PlayerId, health: u32) -> Self {
        Self {
            id,
            name: id.default_name(),
            health,
            clicks: 0,
        }
    }

    /// Restore full health and clear the click counter. The name is kept.
    pub fn reset(&mut self, health: u32) {
        self.health = health;
        self.clicks = 0;
    }

    /// Subtract damage, flooring at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Add health up to `cap`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32, cap: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(cap.max(before));
        self.health - before
    }

    /// Count registered punches.
    pub fn add_clicks(&mut self, clicks: u32) {
        self.clicks = self.clicks.saturating_add(clicks);
    }

    #[must_use]
    pub fn is_knocked_out(&self) -> bool {
        self.health == 0
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use click_brawl::core::{PlayerId, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// wins[PlayerId::new(2)] += 1;
/// assert_eq!(wins[PlayerId::new(2)], 1);
/// assert_eq!(wins.get(PlayerId::new(9)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's data, `None` for ids outside the map.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        if player.0 == 0 {
            return None;
        }
        self.data.get(player.index())
    }

    /// Get a player's data mutably, `None` for ids outside the map.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        if player.0 == 0 {
            return None;
        }
        self.data.get_mut(player.index())
    }

    /// Check whether `player` has an entry.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.get(player).is_some()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        let len = self.data.len();
        self.get(player)
            .unwrap_or_else(|| panic!("{} is outside a map of {} players", player, len))
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        let len = self.data.len();
        self.get_mut(player)
            .unwrap_or_else(|| panic!("{} is outside a map of {} players", player, len))
    }
}

/// All players of a tournament.
pub type Roster = PlayerMap<Player>;

impl PlayerMap<Player> {
    /// Roster of `size` players with default names.
    #[must_use]
    pub fn with_default_names(size: usize, health: u32) -> Self {
        Self::new(size, |id| Player::new(id, health))
    }

    /// Roster from explicit `(id, name)` entries.
    ///
    /// Every id in `1..=size` must appear exactly once.
    pub fn from_names(
        size: usize,
        health: u32,
        names: impl IntoIterator<Item = (PlayerId, String)>,
    ) -> Result<Self, ConfigError> {
        let mut slots: Vec<Option<String>> = vec![None; size];

        for (id, name) in names {
            let slot = if id.0 == 0 { None } else { slots.get_mut(id.index()) };
            match slot {
                None => return Err(ConfigError::UnknownPlayer(id)),
                Some(Some(_)) => return Err(ConfigError::DuplicatePlayer(id)),
                Some(entry) => *entry = Some(name),
            }
        }

        let mut data = Vec::with_capacity(size);
        for (id, name) in PlayerId::all(size).zip(slots) {
            let name = name.ok_or(ConfigError::MissingPlayer(id))?;
            data.push(Player {
                id,
                name,
                health,
                clicks: 0,
            });
        }

        Ok(Self { data })
    }

    /// Reset every player's health and clicks.
    pub fn reset_all(&mut self, health: u32) {
        for (_, player) in self.iter_mut() {
            player.reset(health);
        }
    }
}

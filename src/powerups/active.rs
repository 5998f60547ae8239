//! Power-ups currently in effect for one fighter.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::catalog::{PowerUpEffect, PowerUpKindId};
use crate::core::{PlayerId, Timestamp};

/// A collected power-up that is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKindId,
    pub effect: PowerUpEffect,
    pub owner: PlayerId,
    pub expires_at: Timestamp,
}

impl ActivePowerUp {
    #[must_use]
    pub fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

/// One fighter's running power-ups, in the order they were collected.
///
/// Collection order matters: combat applies attacker multipliers in this
/// order, and the oldest critical hit is the one spent first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSet {
    entries: SmallVec<[ActivePowerUp; 4]>,
}

impl ActiveSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly collected power-up.
    pub fn push(&mut self, power_up: ActivePowerUp) {
        self.entries.push(power_up);
    }

    /// Drop entries with `expires_at <= now`. Returns how many were removed.
    pub fn purge_expired(&mut self, now: Timestamp) -> usize {
        let before = self.entries.len();
        self.entries.retain(|p| p.is_live(now));
        before - self.entries.len()
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<ActivePowerUp> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Is any entry of `kind` running?
    #[must_use]
    pub fn contains(&self, kind: PowerUpKindId) -> bool {
        self.entries.iter().any(|p| p.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivePowerUp> {
        self.entries.iter()
    }

    /// Entries still live at `now`, for display.
    pub fn live_at(&self, now: Timestamp) -> impl Iterator<Item = &ActivePowerUp> {
        self.entries.iter().filter(move |p| p.is_live(now))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<ActivePowerUp> for ActiveSet {
    fn from_iter<I: IntoIterator<Item = ActivePowerUp>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

//! Punch lockouts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Timestamp};

/// When each stunned fighter may punch again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StunState {
    until: FxHashMap<PlayerId, Timestamp>,
}

impl StunState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock `player` out until `until`. An existing longer stun is kept.
    pub fn stun(&mut self, player: PlayerId, until: Timestamp) {
        let entry = self.until.entry(player).or_insert(until);
        *entry = (*entry).max(until);
    }

    /// Stunned while the expiry is still in the future.
    #[must_use]
    pub fn is_stunned(&self, player: PlayerId, now: Timestamp) -> bool {
        self.until.get(&player).is_some_and(|&until| until > now)
    }

    #[must_use]
    pub fn expires_at(&self, player: PlayerId) -> Option<Timestamp> {
        self.until.get(&player).copied()
    }

    /// Forget stuns that have run out. Returns how many were removed.
    pub fn purge_expired(&mut self, now: Timestamp) -> usize {
        let before = self.until.len();
        self.until.retain(|_, until| *until > now);
        before - self.until.len()
    }

    pub fn clear(&mut self) {
        self.until.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.until.is_empty()
    }
}

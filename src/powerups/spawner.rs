//! Power-up spawning and expiry.
//!
//! The spawner only decides *what* appears. The owning match decides *when*
//! by firing its spawn timer, and stops that timer whenever the match is not
//! in progress.

use serde::{Deserialize, Serialize};

use super::catalog::{PowerUpCatalog, PowerUpKindId};
use crate::core::{GameRng, PlayerId, SpawnConfig, SpawnPlacement, SpawnSchedule, Timestamp};

/// Identifier of one spawned power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnId(pub u32);

impl std::fmt::Display for SpawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spawn({})", self.0)
    }
}

/// On-screen position of a spawned power-up, in ring pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub left: u32,
    pub top: u32,
}

/// A power-up waiting to be collected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedPowerUp {
    pub instance_id: SpawnId,
    pub kind: PowerUpKindId,
    pub available_until: Timestamp,
    /// Fighter the offer is reserved for. `None` lets either fighter take it.
    pub claimed_by: Option<PlayerId>,
    pub position: Position,
}

impl SpawnedPowerUp {
    /// Can `player` take this offer at `now`?
    #[must_use]
    pub fn is_claimable_by(&self, player: PlayerId, now: Timestamp) -> bool {
        now < self.available_until && self.claimed_by.map_or(true, |owner| owner == player)
    }
}

/// Produces power-up offers and drops them when uncollected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSpawner {
    config: SpawnConfig,
    pending: Vec<SpawnedPowerUp>,
    next_id: u32,
}

impl PowerUpSpawner {
    #[must_use]
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// One scheduled spawn attempt.
    ///
    /// With the configured probability, creates an offer of a random kind for
    /// the given fighters. In assigned placement the offer replaces any older
    /// pending offer reserved for the same fighter.
    pub fn tick(
        &mut self,
        active_players: &[PlayerId],
        now: Timestamp,
        catalog: &PowerUpCatalog,
        rng: &mut GameRng,
    ) -> Option<SpawnedPowerUp> {
        if active_players.is_empty() || !rng.gen_bool(self.config.probability) {
            return None;
        }

        let kind = catalog.random_kind(rng).id;
        let claimed_by = match self.config.placement {
            SpawnPlacement::Assigned => rng.choose(active_players).copied(),
            SpawnPlacement::Shared => None,
        };
        let position = self.random_position(rng);

        let spawned = SpawnedPowerUp {
            instance_id: SpawnId(self.next_id),
            kind,
            available_until: now.after(self.config.timeout_ms),
            claimed_by,
            position,
        };
        self.next_id += 1;

        if let Some(owner) = claimed_by {
            self.pending.retain(|p| p.claimed_by != Some(owner));
        }
        self.pending.push(spawned.clone());

        log::debug!(
            "spawned {:?} as {} for {:?} until {}",
            spawned.kind,
            spawned.instance_id,
            spawned.claimed_by,
            spawned.available_until
        );
        Some(spawned)
    }

    /// Remove and return offers whose window has closed.
    pub fn expire(&mut self, now: Timestamp) -> Vec<SpawnedPowerUp> {
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|p| p.available_until <= now);
        self.pending = kept;
        expired
    }

    /// Take an offer for `player`. `None` if it is gone, expired, or reserved
    /// for someone else.
    pub fn claim(&mut self, instance_id: SpawnId, player: PlayerId, now: Timestamp) -> Option<SpawnedPowerUp> {
        let index = self
            .pending
            .iter()
            .position(|p| p.instance_id == instance_id && p.is_claimable_by(player, now))?;
        Some(self.pending.remove(index))
    }

    /// Oldest offer reserved for `player`, if any.
    #[must_use]
    pub fn offer_for(&self, player: PlayerId, now: Timestamp) -> Option<&SpawnedPowerUp> {
        self.pending
            .iter()
            .find(|p| p.claimed_by == Some(player) && now < p.available_until)
    }

    /// Delay until the next spawn attempt.
    pub fn next_delay(&self, rng: &mut GameRng) -> u64 {
        match self.config.schedule {
            SpawnSchedule::Fixed { interval_ms } => interval_ms.max(1),
            SpawnSchedule::Jittered { min_ms, max_ms } => rng.gen_range_u64(min_ms..max_ms).max(1),
        }
    }

    #[must_use]
    pub fn schedule(&self) -> SpawnSchedule {
        self.config.schedule
    }

    #[must_use]
    pub fn pending(&self) -> &[SpawnedPowerUp] {
        &self.pending
    }

    /// Drop every pending offer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn random_position(&self, rng: &mut GameRng) -> Position {
        let arena = self.config.arena;
        let max_left = arena.width.saturating_sub(arena.token_size);
        let max_top = arena.height.saturating_sub(arena.token_size);
        Position {
            left: rng.gen_range_u32(0..max_left),
            top: rng.gen_range_u32(0..max_top),
        }
    }
}

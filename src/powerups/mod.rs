//! Power-up system.
//!
//! - `PowerUpCatalog`: the static table of kinds and their effects
//! - `ActiveSet`: power-ups running for one fighter
//! - `PowerUpSpawner`: offers that appear during a match and time out
//!
//! Effects are a closed enum (`PowerUpEffect`). Combat and match code match
//! on it exhaustively.

mod active;
mod catalog;
mod spawner;

pub use active::{ActivePowerUp, ActiveSet};
pub use catalog::{PowerUpCatalog, PowerUpEffect, PowerUpKind, PowerUpKindId};
pub use spawner::{Position, PowerUpSpawner, SpawnId, SpawnedPowerUp};

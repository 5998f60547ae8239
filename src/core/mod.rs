//! Core types: players, time, RNG, configuration, errors.
//!
//! Everything above this module (power-ups, matches, the bracket) is built
//! from these pieces.

pub mod clock;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use clock::Timestamp;
pub use config::{
    ArenaSize, BrawlConfig, PowerUpActivation, PowerUpTuning, SpawnConfig, SpawnPlacement,
    SpawnSchedule, SpinnerConfig,
};
pub use error::{ConfigError, SnapshotError};
pub use player::{Player, PlayerId, PlayerMap, Roster};
pub use rng::{GameRng, GameRngState};

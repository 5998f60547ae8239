//! # click-brawl
//!
//! Tournament and power-up engine for a local "click battle" party game.
//!
//! Players tap to punch their opponent, grab power-ups that spawn during a
//! match, and fight through a single-elimination bracket until one champion
//! is left. This crate holds all of the game logic; a renderer reads
//! `TournamentSnapshot`s and forwards `Intent`s.
//!
//! ## Design Principles
//!
//! 1. **Explicit Time**: Nothing reads a clock. Every intent carries a
//!    `Timestamp`, and timers are data that fire when time advances.
//!
//! 2. **Owned State**: The controller owns one `TournamentState`. Matches
//!    borrow the roster for the duration of a call; there is no global state.
//!
//! 3. **Total Operations**: Late or stray intents are ignored, never errors.
//!    Errors only come from configuration and decoding saved state.
//!
//! ## Example
//!
//! ```
//! use click_brawl::{BrawlConfig, PlayerId, Timestamp, TournamentController, TournamentStage};
//!
//! let config = BrawlConfig::default().with_roster_size(2).with_countdown(0);
//! let mut tournament = TournamentController::new(config).unwrap();
//! tournament.start_tournament(Timestamp(0));
//!
//! for t in 1..=100 {
//!     tournament.punch(PlayerId::new(1), Timestamp(t));
//! }
//! assert_eq!(tournament.stage(), TournamentStage::Finished { champion: PlayerId::new(1) });
//! ```
//!
//! ## Modules
//!
//! - `core`: Players, time, RNG, configuration, errors
//! - `powerups`: Catalog, running effects, spawner
//! - `combat`: Damage and click resolution
//! - `timers`: Cancellable scheduled timers
//! - `matches`: Per-match state machine
//! - `tournament`: Bracket, controller, intents, snapshots
//! - `spinner`: Drink spinner

pub mod combat;
pub mod core;
pub mod matches;
pub mod powerups;
pub mod spinner;
pub mod timers;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    BrawlConfig, ConfigError, GameRng, GameRngState, Player, PlayerId, PlayerMap, PowerUpActivation,
    PowerUpTuning, Roster, SnapshotError, SpawnConfig, SpawnPlacement, SpawnSchedule, SpinnerConfig,
    Timestamp,
};

pub use crate::powerups::{
    ActivePowerUp, ActiveSet, PowerUpCatalog, PowerUpEffect, PowerUpKind, PowerUpKindId, PowerUpSpawner,
    SpawnId, SpawnedPowerUp,
};

pub use crate::combat::{resolve_damage, resolve_strike, Strike};

pub use crate::timers::{Scheduler, TimerId};

pub use crate::matches::{IgnoredReason, MatchEngine, MatchEvent, MatchId, MatchPhase, Pairing, PunchOutcome};

pub use crate::tournament::{
    Intent, MatchRecord, Round, TournamentController, TournamentEvent, TournamentSnapshot, TournamentStage,
    TournamentState,
};

pub use crate::spinner::DrinkSpinner;

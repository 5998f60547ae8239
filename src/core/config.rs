//! Tournament configuration.
//!
//! Every tunable number of the game lives here as a named field:
//! - `BrawlConfig`: roster, health, countdown, sweep cadence, seed
//! - `SpawnConfig`: when, where and for whom power-ups appear
//! - `PowerUpTuning`: durations and magnitudes of each power-up
//! - `SpinnerConfig`: the drink spinner's cadence
//!
//! Game variants (reduced health, jittered spawns, manual activation) are
//! expressed by overriding fields, not by separate code paths.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How the spawn schedule picks the delay between spawn attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSchedule {
    /// Attempt a spawn every `interval_ms`.
    Fixed { interval_ms: u64 },
    /// Draw a fresh delay in `min_ms..max_ms` before every attempt.
    Jittered { min_ms: u64, max_ms: u64 },
}

/// Who may claim a spawned power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPlacement {
    /// Reserved for one randomly chosen fighter of the match.
    Assigned,
    /// Placed in the shared ring; the first fighter to click it claims it.
    Shared,
}

/// What happens when a fighter collects a power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpActivation {
    /// Takes effect immediately.
    OnCollect,
    /// Held in the fighter's slot until they explicitly use it.
    Manual,
}

/// Ring dimensions used to place spawned power-ups on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaSize {
    pub width: u32,
    pub height: u32,
    /// Edge length of a power-up token, kept fully inside the ring.
    pub token_size: u32,
}

impl Default for ArenaSize {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            token_size: 50,
        }
    }
}

/// Power-up spawning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub schedule: SpawnSchedule,

    /// Chance that a scheduled attempt actually spawns something.
    pub probability: f64,

    /// How long an uncollected power-up stays available.
    pub timeout_ms: u64,

    pub placement: SpawnPlacement,

    pub activation: PowerUpActivation,

    pub arena: ArenaSize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            schedule: SpawnSchedule::Fixed { interval_ms: 3_000 },
            probability: 0.3,
            timeout_ms: 5_000,
            placement: SpawnPlacement::Assigned,
            activation: PowerUpActivation::OnCollect,
            arena: ArenaSize::default(),
        }
    }
}

impl SpawnConfig {
    /// Variant with a power-up every 5-10 seconds, always spawning.
    #[must_use]
    pub fn jittered() -> Self {
        Self {
            schedule: SpawnSchedule::Jittered {
                min_ms: 5_000,
                max_ms: 10_000,
            },
            probability: 1.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: SpawnSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: SpawnPlacement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_activation(mut self, activation: PowerUpActivation) -> Self {
        self.activation = activation;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Durations and magnitudes of the power-up catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpTuning {
    pub double_damage_multiplier: u32,
    pub double_damage_ms: u64,

    /// Percentage of incoming damage removed by a shield.
    pub shield_reduction_percent: u32,
    pub shield_ms: u64,

    /// Health restored instantly by a health boost.
    pub heal_amount: u32,

    pub rapid_fire_multiplier: u32,
    pub rapid_fire_ms: u64,

    /// How long a freeze locks the opponent out.
    pub freeze_ms: u64,

    pub crit_multiplier: u32,
    /// How long an unused critical hit stays armed.
    pub crit_window_ms: u64,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            double_damage_multiplier: 2,
            double_damage_ms: 5_000,
            shield_reduction_percent: 50,
            shield_ms: 4_000,
            heal_amount: 15,
            rapid_fire_multiplier: 2,
            rapid_fire_ms: 5_000,
            freeze_ms: 3_000,
            crit_multiplier: 5,
            crit_window_ms: 8_000,
        }
    }
}

/// Drink spinner cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinnerConfig {
    /// Number of random selections before the spinner stops.
    pub steps: u32,
    pub step_ms: u64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            step_ms: 150,
        }
    }
}

/// Complete tournament configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrawlConfig {
    /// Number of players (2 or 4).
    pub roster_size: usize,

    /// Health every fighter starts a match with.
    pub starting_health: u32,

    /// Upper bound for healing.
    pub max_health: u32,

    /// Countdown length in ticks (0 starts the fight immediately).
    pub countdown_secs: u32,

    pub countdown_tick_ms: u64,

    /// Cadence of the expired power-up and stun sweep.
    pub sweep_interval_ms: u64,

    pub spawn: SpawnConfig,

    pub powerups: PowerUpTuning,

    pub spinner: SpinnerConfig,

    /// Seed for pairings, spawns and the spinner.
    pub seed: u64,
}

impl Default for BrawlConfig {
    fn default() -> Self {
        Self {
            roster_size: 4,
            starting_health: 100,
            max_health: 100,
            countdown_secs: 3,
            countdown_tick_ms: 1_000,
            sweep_interval_ms: 500,
            spawn: SpawnConfig::default(),
            powerups: PowerUpTuning::default(),
            spinner: SpinnerConfig::default(),
            seed: 42,
        }
    }
}

impl BrawlConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_roster_size(mut self, size: usize) -> Self {
        self.roster_size = size;
        self
    }

    /// Set the starting health. Raises `max_health` if needed.
    #[must_use]
    pub fn with_starting_health(mut self, health: u32) -> Self {
        self.starting_health = health;
        self.max_health = self.max_health.max(health);
        self
    }

    #[must_use]
    pub fn with_max_health(mut self, health: u32) -> Self {
        self.max_health = health;
        self
    }

    #[must_use]
    pub fn with_countdown(mut self, secs: u32) -> Self {
        self.countdown_secs = secs;
        self
    }

    #[must_use]
    pub fn with_spawn(mut self, spawn: SpawnConfig) -> Self {
        self.spawn = spawn;
        self
    }

    #[must_use]
    pub fn with_powerups(mut self, tuning: PowerUpTuning) -> Self {
        self.powerups = tuning;
        self
    }

    #[must_use]
    pub fn with_spinner(mut self, spinner: SpinnerConfig) -> Self {
        self.spinner = spinner;
        self
    }

    /// Check every field. Called once when a tournament is built or restored.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.roster_size, 2 | 4) {
            return Err(ConfigError::UnsupportedRosterSize(self.roster_size));
        }
        if self.starting_health == 0 {
            return Err(ConfigError::ZeroStartingHealth);
        }
        if self.starting_health > self.max_health {
            return Err(ConfigError::StartingHealthAboveMax {
                starting: self.starting_health,
                max: self.max_health,
            });
        }
        if self.countdown_tick_ms == 0 {
            return Err(ConfigError::ZeroInterval("countdown tick"));
        }
        if self.sweep_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("expiry sweep"));
        }
        if self.spinner.step_ms == 0 {
            return Err(ConfigError::ZeroInterval("spinner step"));
        }
        if !(0.0..=1.0).contains(&self.spawn.probability) {
            return Err(ConfigError::InvalidSpawnProbability(self.spawn.probability));
        }
        match self.spawn.schedule {
            SpawnSchedule::Fixed { interval_ms: 0 } => {
                return Err(ConfigError::ZeroInterval("spawn"));
            }
            SpawnSchedule::Jittered { min_ms, max_ms } if min_ms == 0 || min_ms >= max_ms => {
                return Err(ConfigError::InvalidJitterWindow { min_ms, max_ms });
            }
            SpawnSchedule::Fixed { .. } | SpawnSchedule::Jittered { .. } => {}
        }
        if self.powerups.shield_reduction_percent > 100 {
            return Err(ConfigError::ShieldAboveHundred(self.powerups.shield_reduction_percent));
        }
        Ok(())
    }
}

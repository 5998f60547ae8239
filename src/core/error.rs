//! Error types.
//!
//! Gameplay operations are total: stray or late intents are ignored rather
//! than reported. Errors only exist at the edges: building a tournament from
//! a bad configuration or roster, and decoding saved state.

use thiserror::Error;

use super::PlayerId;

/// Invalid configuration or roster, detected at construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("roster size {0} is not supported (expected 2 or 4)")]
    UnsupportedRosterSize(usize),

    #[error("{0} appears more than once in the roster")]
    DuplicatePlayer(PlayerId),

    #[error("{0} is missing from the roster")]
    MissingPlayer(PlayerId),

    #[error("{0} is outside the roster")]
    UnknownPlayer(PlayerId),

    #[error("starting health must be positive")]
    ZeroStartingHealth,

    #[error("starting health {starting} exceeds maximum health {max}")]
    StartingHealthAboveMax { starting: u32, max: u32 },

    #[error("spawn probability {0} is outside 0.0..=1.0")]
    InvalidSpawnProbability(f64),

    #[error("jittered spawn window {min_ms}..{max_ms} is empty")]
    InvalidJitterWindow { min_ms: u64, max_ms: u64 },

    #[error("{0} interval must be positive")]
    ZeroInterval(&'static str),

    #[error("shield reduction of {0}% is above 100%")]
    ShieldAboveHundred(u32),
}

/// Failure to encode or decode saved state.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("restored configuration is invalid: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::DuplicatePlayer(PlayerId::new(2)).to_string(),
            "Player 2 appears more than once in the roster"
        );
        assert_eq!(
            ConfigError::StartingHealthAboveMax { starting: 150, max: 100 }.to_string(),
            "starting health 150 exceeds maximum health 100"
        );
        assert_eq!(
            ConfigError::ZeroInterval("countdown tick").to_string(),
            "countdown tick interval must be positive"
        );
    }

    #[test]
    fn test_snapshot_error_from_config() {
        let err: SnapshotError = ConfigError::ZeroStartingHealth.into();
        assert!(matches!(err, SnapshotError::Config(ConfigError::ZeroStartingHealth)));
    }
}

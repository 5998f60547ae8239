//! Matches: pairings, stuns and the per-match state machine.

mod engine;
mod pairing;
mod stun;

pub use engine::{IgnoredReason, MatchEngine, MatchEvent, MatchId, MatchPhase, MatchTimer, PunchOutcome};
pub use pairing::Pairing;
pub use stun::StunState;

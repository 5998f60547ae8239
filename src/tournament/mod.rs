//! Tournament layer: bracket, controller, intents and view model.
//!
//! - `Round` and `draw_pairings`: the single-elimination bracket
//! - `TournamentController`: owns `TournamentState` and applies intents
//! - `Intent`: the actions a renderer forwards
//! - `TournamentSnapshot`: what a renderer reads back

mod bracket;
mod controller;
mod intent;
mod snapshot;

pub use bracket::{draw_pairings, Round, RoundPairings};
pub use controller::{MatchRecord, TournamentController, TournamentEvent, TournamentStage, TournamentState};
pub use intent::Intent;
pub use snapshot::{MatchView, PlayerView, SpawnView, TournamentSnapshot};

//! Read-only view model for the presentation layer.

use serde::{Deserialize, Serialize};

use super::bracket::Round;
use super::controller::{MatchRecord, TournamentController, TournamentStage};
use crate::core::{PlayerId, SnapshotError, Timestamp};
use crate::matches::{MatchEngine, MatchId, MatchPhase, Pairing};
use crate::powerups::{Position, PowerUpKindId, SpawnId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub health: u32,
    pub clicks: u32,
    /// Icons of running power-ups, oldest first.
    pub active_power_up_icons: Vec<String>,
    pub held_power_up: Option<PowerUpKindId>,
    pub stunned: bool,
    pub in_match: Option<MatchId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnView {
    pub match_id: MatchId,
    pub instance_id: SpawnId,
    pub kind: PowerUpKindId,
    pub icon: String,
    pub claimed_by: Option<PlayerId>,
    pub available_until: Timestamp,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub pairing: Pairing,
    pub phase: MatchPhase,
    pub countdown: Option<u32>,
    pub winner: Option<PlayerId>,
}

impl From<&MatchEngine> for MatchView {
    fn from(engine: &MatchEngine) -> Self {
        Self {
            id: engine.id(),
            pairing: engine.pairing(),
            phase: engine.phase(),
            countdown: engine.countdown(),
            winner: engine.winner(),
        }
    }
}

/// Everything a renderer needs, captured at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub now: Timestamp,
    pub stage: TournamentStage,
    pub round: Round,
    pub round_label: String,
    pub players: Vec<PlayerView>,
    pub pairings: Vec<Pairing>,
    pub matches: Vec<MatchView>,
    pub spawned: Vec<SpawnView>,
    pub round_winners: Vec<PlayerId>,
    pub champion: Option<PlayerId>,
    /// Countdown of the current round; every match counts down together.
    pub countdown: Option<u32>,
    /// Phase of the round's first match.
    pub match_phase: Option<MatchPhase>,
    pub history: Vec<MatchRecord>,
    pub drink_selection: Option<PlayerId>,
}

impl TournamentSnapshot {
    pub(crate) fn capture(controller: &TournamentController) -> Self {
        let now = controller.now();
        let catalog = controller.catalog();

        let players = controller
            .roster()
            .iter()
            .map(|(id, player)| {
                let engine = controller.match_for(id);
                let active_power_up_icons = engine
                    .and_then(|m| m.active_power_ups(id))
                    .map(|set| {
                        set.live_at(now)
                            .map(|active| catalog.kind(active.kind).icon.to_string())
                            .collect()
                    })
                    .unwrap_or_default();

                PlayerView {
                    id,
                    name: player.name.clone(),
                    health: player.health,
                    clicks: player.clicks,
                    active_power_up_icons,
                    held_power_up: engine.and_then(|m| m.held_power_up(id)),
                    stunned: engine.is_some_and(|m| m.is_stunned(id, now)),
                    in_match: engine.map(MatchEngine::id),
                }
            })
            .collect();

        let spawned = controller
            .matches()
            .iter()
            .flat_map(|engine| {
                engine.spawned().iter().map(move |offer| SpawnView {
                    match_id: engine.id(),
                    instance_id: offer.instance_id,
                    kind: offer.kind,
                    icon: catalog.kind(offer.kind).icon.to_string(),
                    claimed_by: offer.claimed_by,
                    available_until: offer.available_until,
                    position: offer.position,
                })
            })
            .collect();

        let first = controller.matches().first();

        Self {
            now,
            stage: controller.stage(),
            round: controller.round(),
            round_label: controller.round().label().to_string(),
            players,
            pairings: controller.pairings().to_vec(),
            matches: controller.matches().iter().map(MatchView::from).collect(),
            spawned,
            round_winners: controller.round_winners().to_vec(),
            champion: controller.champion(),
            countdown: controller.matches().iter().find_map(MatchEngine::countdown),
            match_phase: first.map(MatchEngine::phase),
            history: controller.history().iter().cloned().collect(),
            drink_selection: controller.spinner().selected(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BrawlConfig;

    #[test]
    fn test_setup_snapshot() {
        let controller = TournamentController::new(BrawlConfig::default()).unwrap();
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.stage, TournamentStage::Setup);
        assert_eq!(snapshot.round_label, "SEMI-FINALS");
        assert_eq!(snapshot.players.len(), 4);
        assert_eq!(snapshot.player(PlayerId::new(3)).unwrap().name, "Player 3");
        assert!(snapshot.pairings.is_empty());
        assert_eq!(snapshot.match_phase, None);
    }

    #[test]
    fn test_countdown_visible() {
        let mut controller = TournamentController::new(BrawlConfig::default()).unwrap();
        controller.start_tournament(Timestamp(0));
        controller.advance_to(Timestamp(1_000));

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.countdown, Some(2));
        assert_eq!(snapshot.match_phase, Some(MatchPhase::Countdown { remaining: 2 }));
        assert!(snapshot.players.iter().all(|p| p.in_match.is_some()));
    }

    #[test]
    fn test_bincode_round_trip() {
        let mut controller = TournamentController::new(BrawlConfig::default()).unwrap();
        controller.start_tournament(Timestamp(0));
        let snapshot = controller.snapshot();

        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(TournamentSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }
}

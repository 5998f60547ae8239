//! Tournament controller: drives the bracket from setup to champion.
//!
//! ## Flow
//!
//! ```text
//! Setup --start_tournament--> InRound --all matches resolved--> RoundComplete
//!   ^                            |                                   |
//!   |                            | final resolved             advance_round
//!   |                            v                                   |
//!   +------- reset ------- Finished{champion} <----- InRound <-------+
//! ```
//!
//! All mutable state lives in one `TournamentState` value. Engines borrow
//! the roster from it for the duration of a call, and the whole value is
//! what `save` and `to_bytes` capture.
//!
//! Every entry point takes `now`. Timers due up to `now` fire, in order,
//! before the intent itself is applied.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::bracket::{draw_pairings, Round, RoundPairings};
use super::intent::Intent;
use super::snapshot::TournamentSnapshot;
use crate::core::{BrawlConfig, ConfigError, GameRng, Player, PlayerId, Roster, SnapshotError, Timestamp};
use crate::matches::{IgnoredReason, MatchEngine, MatchEvent, MatchId, Pairing, PunchOutcome};
use crate::powerups::{PowerUpCatalog, SpawnId};
use crate::spinner::DrinkSpinner;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStage {
    /// Names may be edited; no match exists.
    Setup,
    /// The current round's matches are running.
    InRound,
    /// Every match of a non-final round is resolved.
    RoundComplete,
    Finished { champion: PlayerId },
}

/// A resolved match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub round: Round,
    pub pairing: Pairing,
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub winner_clicks: u32,
    pub loser_clicks: u32,
    pub finished_at: Timestamp,
}

/// Something that happened while time advanced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TournamentEvent {
    Match { id: MatchId, event: MatchEvent },
    DrinkSelected(PlayerId),
}

/// Everything the controller owns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentState {
    config: BrawlConfig,
    roster: Roster,
    stage: TournamentStage,
    round: Round,
    matches: SmallVec<[MatchEngine; 2]>,
    round_winners: SmallVec<[PlayerId; 2]>,
    history: Vector<MatchRecord>,
    spinner: DrinkSpinner,
    rng: GameRng,
    clock: Timestamp,
    next_match_id: u32,
}

impl TournamentState {
    fn new(config: BrawlConfig, roster: Roster) -> Self {
        Self {
            stage: TournamentStage::Setup,
            round: Round::first_for(config.roster_size),
            matches: SmallVec::new(),
            round_winners: SmallVec::new(),
            history: Vector::new(),
            spinner: DrinkSpinner::new(config.spinner, config.seed),
            rng: GameRng::new(config.seed),
            clock: Timestamp::ZERO,
            next_match_id: 1,
            roster,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BrawlConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> Timestamp {
        self.clock
    }
}

/// Owns the tournament state and applies intents to it.
#[derive(Clone, Debug)]
pub struct TournamentController {
    state: TournamentState,
    catalog: PowerUpCatalog,
}

impl TournamentController {
    /// Tournament with default player names.
    pub fn new(config: BrawlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let roster = Roster::with_default_names(config.roster_size, config.starting_health);
        Ok(Self::from_state(TournamentState::new(config, roster)))
    }

    /// Tournament with an explicit name for every player.
    pub fn with_names(
        config: BrawlConfig,
        names: impl IntoIterator<Item = (PlayerId, String)>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let roster = Roster::from_names(config.roster_size, config.starting_health, names)?;
        Ok(Self::from_state(TournamentState::new(config, roster)))
    }

    fn from_state(state: TournamentState) -> Self {
        let catalog = PowerUpCatalog::from_tuning(&state.config.powerups);
        Self { state, catalog }
    }

    // === Time ===

    /// Fire every timer due up to `now`.
    pub fn advance_to(&mut self, now: Timestamp) -> Vec<TournamentEvent> {
        let now = self.observe(now);
        let mut events = Vec::new();

        for engine in &mut self.state.matches {
            let id = engine.id();
            events.extend(
                engine
                    .advance_to(&self.catalog, now)
                    .into_iter()
                    .map(|event| TournamentEvent::Match { id, event }),
            );
        }
        if let Some(player) = self.state.spinner.advance_to(now) {
            events.push(TournamentEvent::DrinkSelected(player));
        }
        events
    }

    /// Latest time seen. Earlier timestamps are clamped to it.
    fn observe(&mut self, now: Timestamp) -> Timestamp {
        if now < self.state.clock {
            log::trace!("clamped {} to {}", now, self.state.clock);
        }
        self.state.clock = self.state.clock.max(now);
        self.state.clock
    }

    fn sync(&mut self, now: Timestamp) -> Timestamp {
        let events = self.advance_to(now);
        if !events.is_empty() {
            log::trace!("{} timer events before intent at {}", events.len(), self.state.clock);
        }
        self.state.clock
    }

    // === Intents ===

    pub fn dispatch(&mut self, intent: Intent, now: Timestamp) -> bool {
        match intent {
            Intent::SetPlayerName { player, name } => self.set_player_name(player, name),
            Intent::StartTournament => self.start_tournament(now),
            Intent::Punch { player } => self.punch(player, now).landed(),
            Intent::CollectPowerUp { instance_id, player } => self.collect_power_up(instance_id, player, now),
            Intent::UsePowerUp { player } => self.use_power_up(player, now),
            Intent::AdvanceRound => self.advance_round(now),
            Intent::ResetTournament => {
                self.sync(now);
                self.reset();
                true
            }
            Intent::SpinDrink => self.spin_drink(now),
        }
    }

    /// Rename a player. Empty names are ignored.
    pub fn set_player_name(&mut self, player: PlayerId, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.trim().is_empty() {
            return false;
        }
        match self.state.roster.get_mut(player) {
            Some(entry) => {
                entry.name = name;
                true
            }
            None => {
                log::warn!("cannot rename unknown {}", player);
                false
            }
        }
    }

    /// Draw the opening pairings and start every match of the first round.
    ///
    /// A tournament already under way is torn down first.
    pub fn start_tournament(&mut self, now: Timestamp) -> bool {
        let now = self.sync(now);
        let torn_down = self.teardown();
        if torn_down > 0 {
            log::debug!("restart cancelled {} timers", torn_down);
        }

        let state = &mut self.state;
        state.history.clear();
        state.roster.reset_all(state.config.starting_health);

        let players: SmallVec<[PlayerId; 4]> = state.roster.player_ids().collect();
        let pairings = draw_pairings(&players, &mut state.rng);
        let round = Round::first_for(state.config.roster_size);

        log::info!("tournament started at {} with {} players", now, players.len());
        self.start_round(round, pairings, now);
        true
    }

    /// Punch the opponent of `player` in whichever match they are fighting.
    pub fn punch(&mut self, player: PlayerId, now: Timestamp) -> PunchOutcome {
        let now = self.sync(now);
        if self.state.stage != TournamentStage::InRound {
            return PunchOutcome::Ignored(IgnoredReason::NotInProgress);
        }
        let Some(index) = self.match_index_of(player) else {
            return PunchOutcome::Ignored(IgnoredReason::NotInMatch);
        };

        let state = &mut self.state;
        let outcome = state.matches[index].punch(&mut state.roster, player, now);
        if let PunchOutcome::KnockOut { .. } = outcome {
            self.record_result(index, now);
        }
        outcome
    }

    pub fn collect_power_up(&mut self, instance_id: SpawnId, player: PlayerId, now: Timestamp) -> bool {
        let now = self.sync(now);
        if self.state.stage != TournamentStage::InRound {
            return false;
        }
        let Some(index) = self.match_index_of(player) else {
            return false;
        };
        let state = &mut self.state;
        state.matches[index].collect_power_up(&mut state.roster, &self.catalog, instance_id, player, now)
    }

    pub fn use_power_up(&mut self, player: PlayerId, now: Timestamp) -> bool {
        let now = self.sync(now);
        if self.state.stage != TournamentStage::InRound {
            return false;
        }
        let Some(index) = self.match_index_of(player) else {
            return false;
        };
        let state = &mut self.state;
        state.matches[index].use_power_up(&mut state.roster, &self.catalog, player, now)
    }

    /// Pair this round's winners and start the next round.
    ///
    /// Only valid once every match of a non-final round is resolved.
    pub fn advance_round(&mut self, now: Timestamp) -> bool {
        let now = self.sync(now);
        if self.state.stage != TournamentStage::RoundComplete {
            log::debug!("advance_round ignored in {:?}", self.state.stage);
            return false;
        }
        let Some(next) = self.state.round.next() else {
            return false;
        };

        let pairings: RoundPairings = self
            .state
            .round_winners
            .chunks_exact(2)
            .filter_map(|pair| Pairing::new(pair[0], pair[1]))
            .collect();
        if pairings.is_empty() {
            log::warn!("no pairing could be formed from winners {:?}", self.state.round_winners);
            return false;
        }

        self.teardown();
        self.start_round(next, pairings, now);
        true
    }

    /// Start the final from the semi-final winners.
    pub fn start_final(&mut self, now: Timestamp) -> bool {
        if self.state.round.next() != Some(Round::Final) {
            return false;
        }
        self.advance_round(now)
    }

    /// Back to setup: timers cancelled, players restored, history cleared.
    ///
    /// Names survive. Returns how many timers were cancelled.
    pub fn reset(&mut self) -> usize {
        let cancelled = self.teardown() + usize::from(self.state.spinner.cancel());
        let state = &mut self.state;
        state.roster.reset_all(state.config.starting_health);
        state.history.clear();
        state.stage = TournamentStage::Setup;
        state.round = Round::first_for(state.config.roster_size);
        log::info!("tournament reset ({} timers cancelled)", cancelled);
        cancelled
    }

    /// Spin for the player who drinks. Ignored while a spin is running.
    pub fn spin_drink(&mut self, now: Timestamp) -> bool {
        let now = self.sync(now);
        let players: SmallVec<[PlayerId; 4]> = self.state.roster.player_ids().collect();
        self.state.spinner.spin(&players, now)
    }

    // === Save / restore ===

    /// Copy of the full state, including pending timers and RNG positions.
    #[must_use]
    pub fn save(&self) -> TournamentState {
        self.state.clone()
    }

    /// Rebuild a controller from saved state.
    pub fn restore(state: TournamentState) -> Result<Self, SnapshotError> {
        state.config.validate()?;
        if state.roster.player_count() != state.config.roster_size {
            return Err(ConfigError::UnsupportedRosterSize(state.roster.player_count()).into());
        }
        Ok(Self::from_state(state))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.state)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: TournamentState = bincode::deserialize(bytes)?;
        Self::restore(state)
    }

    /// View model of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot::capture(self)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &BrawlConfig {
        &self.state.config
    }

    #[must_use]
    pub fn catalog(&self) -> &PowerUpCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Player> {
        self.state.roster.get(player)
    }

    #[must_use]
    pub fn stage(&self) -> TournamentStage {
        self.state.stage
    }

    #[must_use]
    pub fn round(&self) -> Round {
        self.state.round
    }

    #[must_use]
    pub fn matches(&self) -> &[MatchEngine] {
        &self.state.matches
    }

    /// Match `player` is fighting in this round.
    #[must_use]
    pub fn match_for(&self, player: PlayerId) -> Option<&MatchEngine> {
        self.match_index_of(player).map(|i| &self.state.matches[i])
    }

    #[must_use]
    pub fn pairings(&self) -> RoundPairings {
        self.state.matches.iter().map(MatchEngine::pairing).collect()
    }

    /// Winners of the current round, in the order they won.
    #[must_use]
    pub fn round_winners(&self) -> &[PlayerId] {
        &self.state.round_winners
    }

    #[must_use]
    pub fn champion(&self) -> Option<PlayerId> {
        match self.state.stage {
            TournamentStage::Finished { champion } => Some(champion),
            _ => None,
        }
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MatchRecord> {
        &self.state.history
    }

    #[must_use]
    pub fn spinner(&self) -> &DrinkSpinner {
        &self.state.spinner
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.state.clock
    }

    /// Timers scheduled across every match and the spinner.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.state.matches.iter().map(MatchEngine::pending_timers).sum::<usize>()
            + self.state.spinner.pending_timers()
    }

    // === Internals ===

    fn match_index_of(&self, player: PlayerId) -> Option<usize> {
        self.state.matches.iter().position(|m| m.involves(player))
    }

    fn start_round(&mut self, round: Round, pairings: RoundPairings, now: Timestamp) {
        let state = &mut self.state;
        state.round = round;
        state.round_winners.clear();
        state.matches.clear();

        for pairing in pairings {
            let id = MatchId(state.next_match_id);
            state.next_match_id += 1;
            let mut engine = MatchEngine::new(id, pairing, &state.config, state.rng.fork());
            engine.start(&mut state.roster, now);
            state.matches.push(engine);
        }

        state.stage = TournamentStage::InRound;
        log::info!("{} started with {} matches at {}", round, state.matches.len(), now);
    }

    /// Stop every match. Returns how many timers were cancelled.
    fn teardown(&mut self) -> usize {
        let state = &mut self.state;
        let cancelled = state.matches.iter_mut().map(MatchEngine::stop).sum();
        state.matches.clear();
        state.round_winners.clear();
        cancelled
    }

    fn record_result(&mut self, index: usize, now: Timestamp) {
        let state = &mut self.state;
        let engine = &state.matches[index];
        let Some(winner) = engine.winner() else {
            log::warn!("{} reported a knockout without a winner", engine.id());
            return;
        };
        let pairing = engine.pairing();
        let Some(loser) = pairing.opponent_of(winner) else {
            log::warn!("{} winner {} is not in {}", engine.id(), winner, pairing);
            return;
        };

        let clicks = |player: PlayerId| state.roster.get(player).map_or(0, |p| p.clicks);
        state.history.push_back(MatchRecord {
            match_id: engine.id(),
            round: state.round,
            pairing,
            winner,
            loser,
            winner_clicks: clicks(winner),
            loser_clicks: clicks(loser),
            finished_at: now,
        });
        state.round_winners.push(winner);

        if state.round.next().is_none() {
            state.stage = TournamentStage::Finished { champion: winner };
            log::info!("{} is the champion", winner);
        } else if state.matches.iter().all(|m| m.winner().is_some()) {
            state.stage = TournamentStage::RoundComplete;
            log::info!("{} complete, winners {:?}", state.round, state.round_winners);
        }
    }
}

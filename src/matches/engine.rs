//! Per-match state machine.
//!
//! ```text
//! Idle --start--> Countdown{n} --ticks--> InProgress --knockout--> Resolved{winner}
//! ```
//!
//! The engine owns everything scoped to one pairing: running power-ups,
//! held power-ups, stuns, pending offers, and the timers that drive the
//! countdown, spawn attempts and expiry sweeps. Player health and clicks
//! live in the tournament's `Roster`, which is passed in by reference.
//!
//! Calls that arrive in the wrong phase are ignored, never errors.

use serde::{Deserialize, Serialize};

use super::pairing::Pairing;
use super::stun::StunState;
use crate::combat::resolve_strike;
use crate::core::{BrawlConfig, GameRng, PlayerId, PowerUpActivation, Roster, SpawnSchedule, Timestamp};
use crate::powerups::{
    ActivePowerUp, ActiveSet, PowerUpCatalog, PowerUpEffect, PowerUpKindId, PowerUpSpawner, SpawnId,
    SpawnedPowerUp,
};
use crate::timers::{FiredTimer, Scheduler, TimerId};

/// Match identifier, unique within a tournament run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub u32);

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Idle,
    Countdown { remaining: u32 },
    InProgress,
    Resolved { winner: PlayerId },
}

/// Timers a match schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTimer {
    CountdownTick,
    SpawnAttempt,
    ExpirySweep,
}

/// Why a punch had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoredReason {
    NotInProgress,
    NotInMatch,
    Stunned,
}

/// Result of a punch intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PunchOutcome {
    Ignored(IgnoredReason),
    Hit {
        clicks: u32,
        damage: u32,
        remaining_health: u32,
    },
    KnockOut {
        winner: PlayerId,
        loser: PlayerId,
        clicks: u32,
        damage: u32,
    },
}

impl PunchOutcome {
    /// The punch changed state.
    #[must_use]
    pub fn landed(&self) -> bool {
        !matches!(self, PunchOutcome::Ignored(_))
    }
}

/// Something that happened while timers fired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchEvent {
    CountdownTick { remaining: u32 },
    FightStarted,
    PowerUpSpawned(SpawnedPowerUp),
    PowerUpExpired(SpawnedPowerUp),
    EffectsExpired { power_ups: usize, stuns: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct MatchSettings {
    starting_health: u32,
    max_health: u32,
    countdown_secs: u32,
    countdown_tick_ms: u64,
    sweep_interval_ms: u64,
    activation: PowerUpActivation,
}

impl From<&BrawlConfig> for MatchSettings {
    fn from(config: &BrawlConfig) -> Self {
        Self {
            starting_health: config.starting_health,
            max_health: config.max_health,
            countdown_secs: config.countdown_secs,
            countdown_tick_ms: config.countdown_tick_ms,
            sweep_interval_ms: config.sweep_interval_ms,
            activation: config.spawn.activation,
        }
    }
}

/// One side of the ring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Corner {
    player: PlayerId,
    active: ActiveSet,
    held: Option<PowerUpKindId>,
}

impl Corner {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            active: ActiveSet::new(),
            held: None,
        }
    }

    fn clear(&mut self) {
        self.active.clear();
        self.held = None;
    }
}

/// State machine for one pairing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchEngine {
    id: MatchId,
    pairing: Pairing,
    phase: MatchPhase,
    corners: [Corner; 2],
    stuns: StunState,
    spawner: PowerUpSpawner,
    rng: GameRng,
    timers: Scheduler<MatchTimer>,
    countdown_timer: Option<TimerId>,
    spawn_timer: Option<TimerId>,
    sweep_timer: Option<TimerId>,
    settings: MatchSettings,
}

impl MatchEngine {
    /// Create an idle match.
    #[must_use]
    pub fn new(id: MatchId, pairing: Pairing, config: &BrawlConfig, rng: GameRng) -> Self {
        let [a, b] = pairing.players();
        Self {
            id,
            pairing,
            phase: MatchPhase::Idle,
            corners: [Corner::new(a), Corner::new(b)],
            stuns: StunState::new(),
            spawner: PowerUpSpawner::new(config.spawn.clone()),
            rng,
            timers: Scheduler::new(),
            countdown_timer: None,
            spawn_timer: None,
            sweep_timer: None,
            settings: MatchSettings::from(config),
        }
    }

    // === Lifecycle ===

    /// Reset both fighters and begin the countdown.
    ///
    /// Ignored unless the match is Idle or Resolved.
    pub fn start(&mut self, roster: &mut Roster, now: Timestamp) -> bool {
        if !matches!(self.phase, MatchPhase::Idle | MatchPhase::Resolved { .. }) {
            log::debug!("{} start ignored in {:?}", self.id, self.phase);
            return false;
        }

        self.stop();
        for player in self.pairing.players() {
            match roster.get_mut(player) {
                Some(fighter) => fighter.reset(self.settings.starting_health),
                None => log::warn!("{} is not on the roster of {}", player, self.id),
            }
        }
        for corner in &mut self.corners {
            corner.clear();
        }
        self.stuns.clear();
        self.spawner.clear();

        log::debug!("{} ({}) starting at {}", self.id, self.pairing, now);

        if self.settings.countdown_secs == 0 {
            self.begin_fight(now);
        } else {
            let tick = self.settings.countdown_tick_ms;
            self.phase = MatchPhase::Countdown {
                remaining: self.settings.countdown_secs,
            };
            self.countdown_timer = Some(self.timers.schedule_repeating(
                MatchTimer::CountdownTick,
                now.after(tick),
                tick,
            ));
        }
        true
    }

    /// Fire every timer due at or before `now`, in time order.
    pub fn advance_to(&mut self, catalog: &PowerUpCatalog, now: Timestamp) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            self.on_timer(fired, catalog, &mut events);
        }
        events
    }

    /// Cancel every timer. Returns how many were pending.
    pub fn stop(&mut self) -> usize {
        self.countdown_timer = None;
        self.spawn_timer = None;
        self.sweep_timer = None;
        self.timers.cancel_all()
    }

    // === Intents ===

    /// Resolve a punch by `player` against their opponent.
    pub fn punch(&mut self, roster: &mut Roster, player: PlayerId, now: Timestamp) -> PunchOutcome {
        if self.phase != MatchPhase::InProgress {
            return PunchOutcome::Ignored(IgnoredReason::NotInProgress);
        }
        let Some(side) = self.pairing.side_of(player) else {
            log::warn!("{} punched in {} without being in it", player, self.id);
            return PunchOutcome::Ignored(IgnoredReason::NotInMatch);
        };
        if self.stuns.is_stunned(player, now) {
            log::trace!("{} is stunned until {:?}", player, self.stuns.expires_at(player));
            return PunchOutcome::Ignored(IgnoredReason::Stunned);
        }

        let opponent = self.corners[1 - side].player;
        if !roster.contains(player) || !roster.contains(opponent) {
            log::warn!("{} references players missing from the roster", self.id);
            return PunchOutcome::Ignored(IgnoredReason::NotInMatch);
        }

        for corner in &mut self.corners {
            corner.active.purge_expired(now);
        }
        let [first, second] = &mut self.corners;
        let (attacker, defender) = if side == 0 { (first, second) } else { (second, first) };
        let strike = resolve_strike(1, &mut attacker.active, &defender.active);

        roster[player].add_clicks(strike.clicks);
        let remaining_health = roster[opponent].take_damage(strike.damage);

        if remaining_health == 0 {
            self.resolve(player, opponent, now);
            PunchOutcome::KnockOut {
                winner: player,
                loser: opponent,
                clicks: strike.clicks,
                damage: strike.damage,
            }
        } else {
            PunchOutcome::Hit {
                clicks: strike.clicks,
                damage: strike.damage,
                remaining_health,
            }
        }
    }

    /// Claim a spawned power-up.
    ///
    /// With `OnCollect` activation it takes effect immediately; with `Manual`
    /// it goes into the player's held slot, replacing whatever was there.
    pub fn collect_power_up(
        &mut self,
        roster: &mut Roster,
        catalog: &PowerUpCatalog,
        instance_id: SpawnId,
        player: PlayerId,
        now: Timestamp,
    ) -> bool {
        if self.phase != MatchPhase::InProgress {
            return false;
        }
        let Some(side) = self.pairing.side_of(player) else {
            log::warn!("{} collected in {} without being in it", player, self.id);
            return false;
        };
        let Some(spawned) = self.spawner.claim(instance_id, player, now) else {
            log::debug!("{} could not claim {}", player, instance_id);
            return false;
        };

        match self.settings.activation {
            PowerUpActivation::OnCollect => self.activate(side, spawned.kind, roster, catalog, now),
            PowerUpActivation::Manual => {
                if let Some(replaced) = self.corners[side].held.replace(spawned.kind) {
                    log::debug!("{} dropped held {:?} for {:?}", player, replaced, spawned.kind);
                }
            }
        }
        true
    }

    /// Activate the player's held power-up, or else the offer reserved for
    /// them.
    pub fn use_power_up(
        &mut self,
        roster: &mut Roster,
        catalog: &PowerUpCatalog,
        player: PlayerId,
        now: Timestamp,
    ) -> bool {
        if self.phase != MatchPhase::InProgress {
            return false;
        }
        let Some(side) = self.pairing.side_of(player) else {
            log::warn!("{} used a power-up in {} without being in it", player, self.id);
            return false;
        };

        if let Some(kind) = self.corners[side].held.take() {
            self.activate(side, kind, roster, catalog, now);
            return true;
        }

        let Some(instance_id) = self.spawner.offer_for(player, now).map(|s| s.instance_id) else {
            return false;
        };
        match self.spawner.claim(instance_id, player, now) {
            Some(spawned) => {
                self.activate(side, spawned.kind, roster, catalog, now);
                true
            }
            None => false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    #[must_use]
    pub fn pairing(&self) -> Pairing {
        self.pairing
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            MatchPhase::Resolved { winner } => Some(winner),
            _ => None,
        }
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn countdown(&self) -> Option<u32> {
        match self.phase {
            MatchPhase::Countdown { remaining } => Some(remaining),
            _ => None,
        }
    }

    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        self.pairing.contains(player)
    }

    #[must_use]
    pub fn is_stunned(&self, player: PlayerId, now: Timestamp) -> bool {
        self.stuns.is_stunned(player, now)
    }

    #[must_use]
    pub fn active_power_ups(&self, player: PlayerId) -> Option<&ActiveSet> {
        self.corner(player).map(|c| &c.active)
    }

    #[must_use]
    pub fn held_power_up(&self, player: PlayerId) -> Option<PowerUpKindId> {
        self.corner(player).and_then(|c| c.held)
    }

    /// Offers waiting to be collected.
    #[must_use]
    pub fn spawned(&self) -> &[SpawnedPowerUp] {
        self.spawner.pending()
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // === Internals ===

    fn corner(&self, player: PlayerId) -> Option<&Corner> {
        self.pairing.side_of(player).map(|side| &self.corners[side])
    }

    fn on_timer(
        &mut self,
        fired: FiredTimer<MatchTimer>,
        catalog: &PowerUpCatalog,
        events: &mut Vec<MatchEvent>,
    ) {
        let at = fired.fired_at;
        match fired.kind {
            MatchTimer::CountdownTick => {
                let MatchPhase::Countdown { remaining } = self.phase else {
                    self.drop_stale(fired.id, fired.kind);
                    return;
                };
                let remaining = remaining.saturating_sub(1);
                events.push(MatchEvent::CountdownTick { remaining });
                if remaining == 0 {
                    self.begin_fight(at);
                    events.push(MatchEvent::FightStarted);
                } else {
                    self.phase = MatchPhase::Countdown { remaining };
                }
            }
            MatchTimer::SpawnAttempt => {
                if self.phase != MatchPhase::InProgress {
                    self.drop_stale(fired.id, fired.kind);
                    return;
                }
                let fighters = self.pairing.players();
                if let Some(spawned) = self.spawner.tick(&fighters, at, catalog, &mut self.rng) {
                    events.push(MatchEvent::PowerUpSpawned(spawned));
                }
                if let SpawnSchedule::Jittered { .. } = self.spawner.schedule() {
                    let delay = self.spawner.next_delay(&mut self.rng);
                    self.spawn_timer = at
                        .millis()
                        .checked_add(delay)
                        .filter(|&next| next > at.millis())
                        .map(|next| self.timers.schedule_once(MatchTimer::SpawnAttempt, Timestamp(next)));
                    if self.spawn_timer.is_none() {
                        log::debug!("{} spawn schedule ran out of time at {}", self.id, at);
                    }
                }
            }
            MatchTimer::ExpirySweep => {
                if self.phase != MatchPhase::InProgress {
                    self.drop_stale(fired.id, fired.kind);
                    return;
                }
                self.sweep(at, events);
            }
        }
    }

    fn drop_stale(&mut self, id: TimerId, kind: MatchTimer) {
        self.timers.cancel(id);
        log::warn!("{} dropped stale {:?} timer in {:?}", self.id, kind, self.phase);
    }

    fn begin_fight(&mut self, at: Timestamp) {
        if let Some(id) = self.countdown_timer.take() {
            self.timers.cancel(id);
        }
        self.phase = MatchPhase::InProgress;

        let first_attempt = at.after(self.spawner.next_delay(&mut self.rng));
        self.spawn_timer = Some(match self.spawner.schedule() {
            SpawnSchedule::Fixed { interval_ms } => {
                self.timers
                    .schedule_repeating(MatchTimer::SpawnAttempt, first_attempt, interval_ms)
            }
            SpawnSchedule::Jittered { .. } => self.timers.schedule_once(MatchTimer::SpawnAttempt, first_attempt),
        });

        let sweep = self.settings.sweep_interval_ms;
        self.sweep_timer = Some(self.timers.schedule_repeating(MatchTimer::ExpirySweep, at.after(sweep), sweep));

        log::info!("{} ({}) fight started at {}", self.id, self.pairing, at);
    }

    fn sweep(&mut self, now: Timestamp, events: &mut Vec<MatchEvent>) {
        let power_ups: usize = self.corners.iter_mut().map(|c| c.active.purge_expired(now)).sum();
        let stuns = self.stuns.purge_expired(now);

        for expired in self.spawner.expire(now) {
            log::debug!("{} expired uncollected {}", self.id, expired.instance_id);
            events.push(MatchEvent::PowerUpExpired(expired));
        }
        if power_ups + stuns > 0 {
            events.push(MatchEvent::EffectsExpired { power_ups, stuns });
        }
    }

    fn activate(
        &mut self,
        side: usize,
        kind_id: PowerUpKindId,
        roster: &mut Roster,
        catalog: &PowerUpCatalog,
        now: Timestamp,
    ) {
        let kind = catalog.kind(kind_id);
        let owner = self.corners[side].player;
        let opponent = self.corners[1 - side].player;

        match kind.effect {
            PowerUpEffect::InstantHeal(amount) => {
                if let Some(fighter) = roster.get_mut(owner) {
                    let healed = fighter.heal(amount, self.settings.max_health);
                    log::debug!("{} healed {} with {}", owner, healed, kind.name);
                }
            }
            PowerUpEffect::FreezeOpponent => {
                let until = now.after(kind.duration_ms);
                self.stuns.stun(opponent, until);
                log::debug!("{} froze {} until {}", owner, opponent, until);
            }
            PowerUpEffect::DamageMultiplier(_)
            | PowerUpEffect::DamageReduction { .. }
            | PowerUpEffect::CritMultiplierOnce(_)
            | PowerUpEffect::ClickMultiplier(_) => {
                self.corners[side].active.push(ActivePowerUp {
                    kind: kind.id,
                    effect: kind.effect,
                    owner,
                    expires_at: now.after(kind.duration_ms),
                });
                log::debug!("{} activated {}", owner, kind.name);
            }
        }
    }

    fn resolve(&mut self, winner: PlayerId, loser: PlayerId, now: Timestamp) {
        self.phase = MatchPhase::Resolved { winner };
        let cancelled = self.stop();
        self.spawner.clear();
        log::info!(
            "{} won by knockout over {} in {} at {} ({} timers cancelled)",
            winner,
            loser,
            self.id,
            now,
            cancelled
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SpawnConfig, SpawnPlacement};

    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn quiet_config() -> BrawlConfig {
        BrawlConfig::default()
            .with_roster_size(2)
            .with_spawn(SpawnConfig::default().with_probability(0.0))
    }

    fn setup(config: &BrawlConfig) -> (MatchEngine, Roster, PowerUpCatalog) {
        let pairing = Pairing::new(P1, P2).unwrap();
        let engine = MatchEngine::new(MatchId(1), pairing, config, GameRng::new(config.seed));
        let roster = Roster::with_default_names(2, config.starting_health);
        (engine, roster, PowerUpCatalog::from_tuning(&config.powerups))
    }

    fn fighting(config: &BrawlConfig) -> (MatchEngine, Roster, PowerUpCatalog) {
        let (mut engine, mut roster, catalog) = setup(config);
        engine.start(&mut roster, Timestamp(0));
        engine.advance_to(&catalog, Timestamp(3_000));
        assert_eq!(engine.phase(), MatchPhase::InProgress);
        (engine, roster, catalog)
    }

    #[test]
    fn test_countdown_runs_three_ticks() {
        let config = quiet_config();
        let (mut engine, mut roster, catalog) = setup(&config);

        assert!(engine.start(&mut roster, Timestamp(0)));
        assert_eq!(engine.countdown(), Some(3));

        assert!(engine.advance_to(&catalog, Timestamp(999)).is_empty());
        engine.advance_to(&catalog, Timestamp(1_000));
        assert_eq!(engine.countdown(), Some(2));

        let events = engine.advance_to(&catalog, Timestamp(3_000));
        assert!(events.contains(&MatchEvent::FightStarted));
        assert_eq!(engine.phase(), MatchPhase::InProgress);
        // spawn schedule + sweep, countdown cancelled
        assert_eq!(engine.pending_timers(), 2);
    }

    #[test]
    fn test_zero_countdown_starts_immediately() {
        let config = quiet_config().with_countdown(0);
        let (mut engine, mut roster, _) = setup(&config);
        engine.start(&mut roster, Timestamp(0));
        assert_eq!(engine.phase(), MatchPhase::InProgress);
    }

    #[test]
    fn test_punch_ignored_before_fight() {
        let config = quiet_config();
        let (mut engine, mut roster, _) = setup(&config);

        assert_eq!(
            engine.punch(&mut roster, P1, Timestamp(0)),
            PunchOutcome::Ignored(IgnoredReason::NotInProgress)
        );
        engine.start(&mut roster, Timestamp(0));
        let before = roster.clone();
        assert_eq!(
            engine.punch(&mut roster, P1, Timestamp(500)),
            PunchOutcome::Ignored(IgnoredReason::NotInProgress)
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_punch_from_outsider_is_ignored() {
        let config = quiet_config();
        let (mut engine, mut roster, _) = fighting(&config);
        assert_eq!(
            engine.punch(&mut roster, PlayerId::new(3), Timestamp(3_000)),
            PunchOutcome::Ignored(IgnoredReason::NotInMatch)
        );
    }

    #[test]
    fn test_knockout_resolves_and_cancels_timers() {
        let config = quiet_config().with_starting_health(3).with_max_health(3);
        let (mut engine, mut roster, _) = fighting(&config);

        assert!(matches!(engine.punch(&mut roster, P2, Timestamp(3_001)), PunchOutcome::Hit { .. }));
        engine.punch(&mut roster, P2, Timestamp(3_002));
        let outcome = engine.punch(&mut roster, P2, Timestamp(3_003));

        assert_eq!(
            outcome,
            PunchOutcome::KnockOut {
                winner: P2,
                loser: P1,
                clicks: 1,
                damage: 1
            }
        );
        assert_eq!(engine.winner(), Some(P2));
        assert_eq!(engine.pending_timers(), 0);
        assert_eq!(roster[P1].health, 0);
        assert_eq!(roster[P2].clicks, 3);

        assert!(!engine.punch(&mut roster, P1, Timestamp(3_004)).landed());
    }

    #[test]
    fn test_start_ignored_mid_match() {
        let config = quiet_config();
        let (mut engine, mut roster, _) = fighting(&config);
        engine.punch(&mut roster, P1, Timestamp(3_001));
        assert!(!engine.start(&mut roster, Timestamp(3_002)));
        assert_eq!(roster[P2].health, 99);
    }

    #[test]
    fn test_collect_and_use_in_manual_mode() {
        let spawn = SpawnConfig::default()
            .with_probability(1.0)
            .with_placement(SpawnPlacement::Shared)
            .with_activation(PowerUpActivation::Manual);
        let config = quiet_config().with_spawn(spawn);
        let (mut engine, mut roster, catalog) = fighting(&config);

        engine.advance_to(&catalog, Timestamp(6_000));
        let offer = engine.spawned()[0].clone();

        assert!(engine.collect_power_up(&mut roster, &catalog, offer.instance_id, P1, Timestamp(6_000)));
        assert_eq!(engine.held_power_up(P1), Some(offer.kind));
        assert!(!engine.collect_power_up(&mut roster, &catalog, offer.instance_id, P2, Timestamp(6_000)));

        assert!(engine.use_power_up(&mut roster, &catalog, P1, Timestamp(6_001)));
        assert_eq!(engine.held_power_up(P1), None);
    }

    #[test]
    fn test_freeze_stuns_opponent() {
        let config = quiet_config();
        let (mut engine, mut roster, catalog) = fighting(&config);

        engine.activate(0, PowerUpKindId::Freeze, &mut roster, &catalog, Timestamp(4_000));
        assert!(engine.is_stunned(P2, Timestamp(4_000)));
        assert!(!engine.is_stunned(P1, Timestamp(4_000)));
        assert_eq!(
            engine.punch(&mut roster, P2, Timestamp(6_999)),
            PunchOutcome::Ignored(IgnoredReason::Stunned)
        );
        assert!(engine.punch(&mut roster, P2, Timestamp(7_000)).landed());
    }

    #[test]
    fn test_heal_is_instant_and_capped() {
        let config = quiet_config();
        let (mut engine, mut roster, catalog) = fighting(&config);
        roster[P1].health = 90;

        engine.activate(0, PowerUpKindId::HealthBoost, &mut roster, &catalog, Timestamp(4_000));
        assert_eq!(roster[P1].health, 100);
        assert!(engine.active_power_ups(P1).unwrap().is_empty());
    }

    #[test]
    fn test_sweep_purges_expired_effects() {
        let config = quiet_config();
        let (mut engine, mut roster, catalog) = fighting(&config);

        engine.activate(0, PowerUpKindId::Shield, &mut roster, &catalog, Timestamp(3_000));
        assert_eq!(engine.active_power_ups(P1).unwrap().len(), 1);

        let events = engine.advance_to(&catalog, Timestamp(7_000));
        assert!(events.contains(&MatchEvent::EffectsExpired { power_ups: 1, stuns: 0 }));
        assert!(engine.active_power_ups(P1).unwrap().is_empty());
    }

    #[test]
    fn test_timers_drain_at_end_of_time() {
        let config = quiet_config()
            .with_countdown(2)
            .with_spawn(SpawnConfig::jittered().with_probability(0.0));
        let (mut engine, mut roster, catalog) = setup(&config);
        engine.start(&mut roster, Timestamp(u64::MAX - 2_000));

        engine.advance_to(&catalog, Timestamp(u64::MAX));
        assert_eq!(engine.phase(), MatchPhase::InProgress);
        assert_eq!(engine.pending_timers(), 0);
        assert!(engine.punch(&mut roster, P1, Timestamp(u64::MAX)).landed());
    }

    #[test]
    fn test_jittered_schedule_rearms_single_timer() {
        let config = quiet_config().with_spawn(SpawnConfig::jittered().with_probability(0.0));
        let (mut engine, mut roster, catalog) = fighting(&config);

        for t in (3_000..60_000).step_by(500) {
            engine.advance_to(&catalog, Timestamp(t));
            // one spawn attempt + one sweep, never more
            assert_eq!(engine.pending_timers(), 2);
        }
    }
}

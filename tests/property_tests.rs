//! Property tests.
//!
//! - Damage laws over arbitrary power-up combinations
//! - Semi-final pairings partition the roster for every seed
//! - Health and clicks stay in bounds under random intent sequences

use proptest::prelude::*;

use click_brawl::combat::{resolve_damage, resolve_strike};
use click_brawl::core::{BrawlConfig, PlayerId, SpawnConfig, SpawnPlacement, Timestamp};
use click_brawl::powerups::{ActivePowerUp, ActiveSet, PowerUpEffect, PowerUpKindId};
use click_brawl::tournament::{Intent, TournamentController, TournamentStage};

fn active(effect: PowerUpEffect) -> ActivePowerUp {
    let kind = match effect {
        PowerUpEffect::DamageMultiplier(_) => PowerUpKindId::DoubleDamage,
        PowerUpEffect::DamageReduction { .. } => PowerUpKindId::Shield,
        PowerUpEffect::InstantHeal(_) => PowerUpKindId::HealthBoost,
        PowerUpEffect::CritMultiplierOnce(_) => PowerUpKindId::CriticalHit,
        PowerUpEffect::ClickMultiplier(_) => PowerUpKindId::RapidFire,
        PowerUpEffect::FreezeOpponent => PowerUpKindId::Freeze,
    };
    ActivePowerUp {
        kind,
        effect,
        owner: PlayerId::new(1),
        expires_at: Timestamp(u64::MAX),
    }
}

fn effect_strategy() -> impl Strategy<Value = PowerUpEffect> {
    prop_oneof![
        (1u32..6).prop_map(PowerUpEffect::DamageMultiplier),
        (0u32..=100).prop_map(|percent| PowerUpEffect::DamageReduction { percent }),
        (1u32..6).prop_map(PowerUpEffect::CritMultiplierOnce),
        (1u32..4).prop_map(PowerUpEffect::ClickMultiplier),
        Just(PowerUpEffect::FreezeOpponent),
    ]
}

fn set_strategy() -> impl Strategy<Value = ActiveSet> {
    prop::collection::vec(effect_strategy(), 0..5).prop_map(|effects| effects.into_iter().map(active).collect())
}

#[test]
fn test_baseline_damage_laws() {
    let double = || ActiveSet::from_iter([active(PowerUpEffect::DamageMultiplier(2))]);
    let shield = || ActiveSet::from_iter([active(PowerUpEffect::DamageReduction { percent: 50 })]);

    assert_eq!(resolve_damage(1, &mut ActiveSet::new(), &ActiveSet::new()), 1);
    assert_eq!(resolve_damage(1, &mut double(), &ActiveSet::new()), 2);
    assert_eq!(resolve_damage(1, &mut ActiveSet::new(), &shield()), 1);
    assert_eq!(resolve_damage(1, &mut double(), &shield()), 1);
}

proptest! {
    #[test]
    fn damage_is_always_positive(base in 1u32..20, mut attacker in set_strategy(), defender in set_strategy()) {
        prop_assert!(resolve_damage(base, &mut attacker, &defender) >= 1);
    }

    #[test]
    fn no_power_ups_means_damage_equals_clicks(base in 1u32..1000) {
        let strike = resolve_strike(base, &mut ActiveSet::new(), &ActiveSet::new());
        prop_assert_eq!(strike.clicks, base);
        prop_assert_eq!(strike.damage, base);
        prop_assert!(!strike.critical);
    }

    #[test]
    fn shield_rounds_up(base in 1u32..1000, percent in 0u32..=100) {
        let shield = ActiveSet::from_iter([active(PowerUpEffect::DamageReduction { percent })]);
        let expected = ((base * (100 - percent)) + 99) / 100;
        prop_assert_eq!(resolve_damage(base, &mut ActiveSet::new(), &shield), expected.max(1));
    }

    #[test]
    fn freeze_never_changes_damage(base in 1u32..100) {
        let frozen = ActiveSet::from_iter([active(PowerUpEffect::FreezeOpponent)]);
        prop_assert_eq!(resolve_damage(base, &mut frozen.clone(), &frozen), base);
    }

    #[test]
    fn crit_is_spent_once(base in 1u32..50) {
        let mut attacker = ActiveSet::from_iter([active(PowerUpEffect::CritMultiplierOnce(5))]);
        prop_assert_eq!(resolve_damage(base, &mut attacker, &ActiveSet::new()), base * 5);
        prop_assert!(attacker.is_empty());
        prop_assert_eq!(resolve_damage(base, &mut attacker, &ActiveSet::new()), base);
    }

    #[test]
    fn semi_finals_partition_the_roster(seed in any::<u64>()) {
        let mut tournament = TournamentController::new(BrawlConfig::default().with_seed(seed)).unwrap();
        tournament.start_tournament(Timestamp(0));

        let pairings = tournament.pairings();
        prop_assert_eq!(pairings.len(), 2);
        let mut seen: Vec<PlayerId> = pairings.iter().flat_map(|p| p.players()).collect();
        seen.sort();
        prop_assert_eq!(seen, PlayerId::all(4).collect::<Vec<_>>());
    }
}

#[derive(Clone, Debug)]
enum Step {
    Wait(u64),
    Punch(u8),
    Collect(u8),
    Use(u8),
    Advance,
    Start,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (1u64..2_000).prop_map(Step::Wait),
        8 => (1u8..=4).prop_map(Step::Punch),
        2 => (1u8..=4).prop_map(Step::Collect),
        1 => (1u8..=4).prop_map(Step::Use),
        1 => Just(Step::Advance),
        1 => Just(Step::Start),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn health_stays_in_bounds(seed in any::<u64>(), steps in prop::collection::vec(step_strategy(), 1..300)) {
        let spawn = SpawnConfig::default()
            .with_probability(0.8)
            .with_placement(SpawnPlacement::Shared);
        let config = BrawlConfig::default()
            .with_seed(seed)
            .with_starting_health(20)
            .with_countdown(1)
            .with_spawn(spawn);
        let max_health = config.max_health;
        let mut tournament = TournamentController::new(config).unwrap();
        tournament.start_tournament(Timestamp(0));
        let mut now = Timestamp(0);

        for step in steps {
            match step {
                Step::Wait(ms) => {
                    now = now.after(ms);
                    tournament.advance_to(now);
                }
                Step::Punch(p) => {
                    tournament.punch(PlayerId::new(p), now);
                }
                Step::Collect(p) => {
                    let offer = tournament.snapshot().spawned.first().map(|s| s.instance_id);
                    if let Some(instance_id) = offer {
                        tournament.dispatch(Intent::CollectPowerUp { instance_id, player: PlayerId::new(p) }, now);
                    }
                }
                Step::Use(p) => {
                    tournament.use_power_up(PlayerId::new(p), now);
                }
                Step::Advance => {
                    tournament.advance_round(now);
                }
                Step::Start => {
                    if matches!(tournament.stage(), TournamentStage::Finished { .. }) {
                        tournament.start_tournament(now);
                    }
                }
            }

            for (_, player) in tournament.roster().iter() {
                prop_assert!(player.health <= max_health);
            }
            for engine in tournament.matches() {
                let knocked_out = engine
                    .pairing()
                    .players()
                    .iter()
                    .filter(|&&p| tournament.player(p).map_or(false, |pl| pl.health == 0))
                    .count();
                prop_assert!(knocked_out <= 1);
                prop_assert_eq!(engine.winner().is_some(), knocked_out == 1);
            }
            if let Some(champion) = tournament.champion() {
                prop_assert!(tournament.roster().contains(champion));
            }
        }
    }
}

//! Tournament controller tests.
//!
//! These tests verify the bracket end to end:
//! - Semi-finals, final and champion
//! - Reset back to setup
//! - Save/restore keeping timers and RNG position
//! - Snapshot serialization

use click_brawl::core::{BrawlConfig, PlayerId, SpawnConfig, SpawnPlacement, Timestamp};
use click_brawl::matches::{MatchPhase, PunchOutcome};
use click_brawl::tournament::{Intent, Round, TournamentController, TournamentSnapshot, TournamentStage};

fn knock_out(tournament: &mut TournamentController, attacker: PlayerId, now: Timestamp) {
    let mut outcome = tournament.punch(attacker, now);
    while let PunchOutcome::Hit { .. } = outcome {
        outcome = tournament.punch(attacker, now);
    }
    assert!(matches!(outcome, PunchOutcome::KnockOut { winner, .. } if winner == attacker));
}

/// Scenario D: a four-player bracket produces one champion, and reset restores setup.
#[test]
fn test_full_bracket_then_reset() {
    let config = BrawlConfig::default().with_seed(7);
    let mut tournament = TournamentController::new(config).unwrap();
    tournament.set_player_name(PlayerId::new(1), "Ann");

    assert!(tournament.start_tournament(Timestamp(0)));
    assert_eq!(tournament.round(), Round::SemiFinal);
    assert_eq!(tournament.stage(), TournamentStage::InRound);

    let fight_at = Timestamp(3_000);
    tournament.advance_to(fight_at);
    assert!(tournament.matches().iter().all(|m| m.phase() == MatchPhase::InProgress));

    let semis = tournament.pairings();
    let winners = [semis[0].players()[1], semis[1].players()[0]];
    knock_out(&mut tournament, winners[0], fight_at);
    knock_out(&mut tournament, winners[1], fight_at.after(10));

    assert_eq!(tournament.stage(), TournamentStage::RoundComplete);
    assert_eq!(tournament.round_winners(), &winners);

    assert!(tournament.dispatch(Intent::AdvanceRound, Timestamp(20_000)));
    assert_eq!(tournament.round(), Round::Final);
    let final_pairing = tournament.pairings()[0];
    assert!(final_pairing.contains(winners[0]) && final_pairing.contains(winners[1]));
    for winner in winners {
        assert_eq!(tournament.player(winner).unwrap().health, 100);
        assert_eq!(tournament.player(winner).unwrap().clicks, 0);
    }

    tournament.advance_to(Timestamp(23_000));
    knock_out(&mut tournament, winners[1], Timestamp(23_000));
    assert_eq!(tournament.champion(), Some(winners[1]));
    assert_eq!(tournament.history().len(), 3);
    assert_eq!(tournament.pending_timers(), 0);

    tournament.reset();
    assert_eq!(tournament.stage(), TournamentStage::Setup);
    assert_eq!(tournament.round(), Round::SemiFinal);
    assert!(tournament.matches().is_empty());
    assert!(tournament.history().is_empty());
    assert_eq!(tournament.pending_timers(), 0);
    for (_, player) in tournament.roster().iter() {
        assert_eq!(player.health, 100);
        assert_eq!(player.clicks, 0);
    }
    assert_eq!(tournament.player(PlayerId::new(1)).unwrap().name, "Ann");
}

/// Intents that do not fit the current stage are dropped.
#[test]
fn test_out_of_stage_intents_are_ignored() {
    let mut tournament = TournamentController::new(BrawlConfig::default()).unwrap();
    let before = tournament.snapshot();

    assert!(!tournament.punch(PlayerId::new(1), Timestamp(10)).landed());
    assert!(!tournament.use_power_up(PlayerId::new(1), Timestamp(10)));
    assert!(!tournament.advance_round(Timestamp(10)));
    assert!(!tournament.start_final(Timestamp(10)));

    let after = tournament.snapshot();
    assert_eq!(after.players, before.players);
    assert_eq!(after.stage, TournamentStage::Setup);
}

/// Losers of a semi-final cannot punch in the final.
#[test]
fn test_eliminated_players_sit_out_the_final() {
    let config = BrawlConfig::default().with_countdown(0).with_starting_health(3);
    let mut tournament = TournamentController::new(config).unwrap();
    tournament.start_tournament(Timestamp(0));

    let semis = tournament.pairings();
    let losers = [semis[0].players()[1], semis[1].players()[1]];
    knock_out(&mut tournament, semis[0].players()[0], Timestamp(1));
    knock_out(&mut tournament, semis[1].players()[0], Timestamp(2));
    tournament.advance_round(Timestamp(3));

    for loser in losers {
        assert!(!tournament.punch(loser, Timestamp(4)).landed());
        assert!(tournament.match_for(loser).is_none());
    }
}

/// A restored tournament replays exactly like the original, and cancelled timers stay cancelled.
#[test]
fn test_save_restore_continues_identically() {
    let spawn = SpawnConfig::jittered().with_placement(SpawnPlacement::Assigned);
    let config = BrawlConfig::default().with_seed(11).with_spawn(spawn);
    let mut original = TournamentController::new(config).unwrap();
    original.start_tournament(Timestamp(0));
    original.advance_to(Timestamp(3_000));

    let semis = original.pairings();
    knock_out(&mut original, semis[0].players()[0], Timestamp(3_500));
    let resolved = original.matches()[0].id();
    assert_eq!(original.matches()[0].pending_timers(), 0);

    let bytes = original.to_bytes().unwrap();
    let mut restored = TournamentController::from_bytes(&bytes).unwrap();
    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.pending_timers(), original.pending_timers());

    for t in (4_000..40_000).step_by(700) {
        let now = Timestamp(t);
        assert_eq!(original.advance_to(now), restored.advance_to(now));
        let attacker = semis[1].players()[(t as usize / 700) % 2];
        assert_eq!(original.punch(attacker, now), restored.punch(attacker, now));
        assert_eq!(restored.snapshot(), original.snapshot());
    }

    let finished = restored.matches().iter().find(|m| m.id() == resolved).unwrap();
    assert_eq!(finished.pending_timers(), 0);
}

/// `save` and `restore` work without going through bytes.
#[test]
fn test_restore_from_saved_state() {
    let mut tournament = TournamentController::new(BrawlConfig::default()).unwrap();
    tournament.start_tournament(Timestamp(0));
    tournament.advance_to(Timestamp(1_000));

    let restored = TournamentController::restore(tournament.save()).unwrap();
    assert_eq!(restored.snapshot(), tournament.snapshot());
    assert_eq!(restored.snapshot().countdown, Some(2));
}

/// Timers near the end of the clock drain instead of firing forever.
#[test]
fn test_intents_return_at_end_of_time() {
    let config = BrawlConfig::default().with_countdown(2);
    let mut tournament = TournamentController::new(config).unwrap();
    let end = Timestamp(u64::MAX);

    tournament.start_tournament(Timestamp(u64::MAX - 2_000));
    tournament.advance_to(end);
    assert!(tournament.matches().iter().all(|m| m.phase() == MatchPhase::InProgress));
    assert_eq!(tournament.pending_timers(), 0);

    let attacker = tournament.pairings()[0].players()[0];
    assert!(tournament.punch(attacker, end).landed());

    assert!(tournament.spin_drink(end));
    tournament.advance_to(end);
    assert!(tournament.spinner().selected().is_some());
    assert_eq!(tournament.pending_timers(), 0);
}

/// Garbage bytes are a decode error, not a panic.
#[test]
fn test_from_bytes_rejects_garbage() {
    assert!(TournamentController::from_bytes(&[1, 2, 3]).is_err());
}

/// Snapshots survive a JSON round trip unchanged.
#[test]
fn test_snapshot_json_round_trip() {
    let config = BrawlConfig::default().with_spawn(SpawnConfig::default().with_probability(1.0));
    let mut tournament = TournamentController::new(config).unwrap();
    tournament.start_tournament(Timestamp(0));
    tournament.advance_to(Timestamp(6_000));
    let semis = tournament.pairings();
    tournament.punch(semis[0].players()[0], Timestamp(6_000));

    let snapshot = tournament.snapshot();
    assert!(!snapshot.spawned.is_empty());

    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: TournamentSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);
}

/// The drink spinner picks a roster player and cleans up its timer.
#[test]
fn test_drink_spinner() {
    let mut tournament = TournamentController::new(BrawlConfig::default()).unwrap();
    assert!(tournament.dispatch(Intent::SpinDrink, Timestamp(0)));
    assert!(!tournament.dispatch(Intent::SpinDrink, Timestamp(10)));

    tournament.advance_to(Timestamp(10_000));
    let chosen = tournament.snapshot().drink_selection.unwrap();
    assert!(tournament.roster().contains(chosen));
    assert_eq!(tournament.pending_timers(), 0);
}

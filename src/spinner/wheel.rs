//! Spinning selection of the player who drinks.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId, SpinnerConfig, Timestamp};
use crate::timers::{Scheduler, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinnerTimer {
    Step,
}

/// Highlights a random player every step, then settles on the last one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrinkSpinner {
    config: SpinnerConfig,
    rng: GameRng,
    timers: Scheduler<SpinnerTimer>,
    step_timer: Option<TimerId>,
    candidates: SmallVec<[PlayerId; 4]>,
    steps_taken: u32,
    highlighted: Option<PlayerId>,
    selected: Option<PlayerId>,
}

impl DrinkSpinner {
    /// Spinner with its own stream derived from `seed`.
    #[must_use]
    pub fn new(config: SpinnerConfig, seed: u64) -> Self {
        Self {
            config,
            rng: GameRng::new(seed).for_context("spinner"),
            timers: Scheduler::new(),
            step_timer: None,
            candidates: SmallVec::new(),
            steps_taken: 0,
            highlighted: None,
            selected: None,
        }
    }

    /// Start a spin over `players`. Ignored while spinning or with nobody to pick.
    pub fn spin(&mut self, players: &[PlayerId], now: Timestamp) -> bool {
        if self.is_spinning() || players.is_empty() {
            return false;
        }

        self.candidates = players.iter().copied().collect();
        self.steps_taken = 0;
        self.selected = None;

        if self.config.steps == 0 {
            self.highlighted = self.rng.choose(&self.candidates).copied();
            self.selected = self.highlighted;
            return true;
        }

        let step = self.config.step_ms;
        self.step_timer = Some(self.timers.schedule_repeating(SpinnerTimer::Step, now.after(step), step));
        log::debug!("spinner started over {} players at {}", self.candidates.len(), now);
        true
    }

    /// Run due steps. Returns the chosen player if the spin settled.
    pub fn advance_to(&mut self, now: Timestamp) -> Option<PlayerId> {
        let mut settled = None;
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.kind {
                SpinnerTimer::Step => {
                    self.highlighted = self.rng.choose(&self.candidates).copied();
                    self.steps_taken += 1;
                    if self.steps_taken >= self.config.steps {
                        self.stop();
                        self.selected = self.highlighted;
                        settled = self.selected;
                        log::info!("spinner settled on {:?} at {}", self.selected, fired.fired_at);
                    }
                }
            }
        }
        if self.step_timer.is_some_and(|id| !self.timers.is_scheduled(id)) {
            self.step_timer = None;
            self.selected = self.highlighted;
            settled = self.selected;
            log::debug!("spinner ran out of time after {} steps", self.steps_taken);
        }
        settled
    }

    /// Stop a running spin without choosing anyone.
    pub fn cancel(&mut self) -> bool {
        let was_spinning = self.is_spinning();
        self.stop();
        self.highlighted = None;
        was_spinning
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.step_timer.is_some()
    }

    /// Player currently lit up by the wheel.
    #[must_use]
    pub fn highlighted(&self) -> Option<PlayerId> {
        self.highlighted
    }

    /// Result of the last finished spin.
    #[must_use]
    pub fn selected(&self) -> Option<PlayerId> {
        self.selected
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    fn stop(&mut self) {
        if let Some(id) = self.step_timer.take() {
            self.timers.cancel(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> Vec<PlayerId> {
        PlayerId::all(4).collect()
    }

    #[test]
    fn test_spin_settles_after_configured_steps() {
        let mut spinner = DrinkSpinner::new(SpinnerConfig::default(), 42);
        assert!(spinner.spin(&players(), Timestamp(0)));
        assert!(spinner.is_spinning());

        assert_eq!(spinner.advance_to(Timestamp(1_349)), None);
        assert!(spinner.is_spinning());
        assert!(spinner.highlighted().is_some());

        let chosen = spinner.advance_to(Timestamp(1_500));
        assert!(chosen.is_some());
        assert_eq!(spinner.selected(), chosen);
        assert!(!spinner.is_spinning());
        assert_eq!(spinner.pending_timers(), 0);
        assert!(players().contains(&chosen.unwrap()));
    }

    #[test]
    fn test_spin_ignored_while_spinning() {
        let mut spinner = DrinkSpinner::new(SpinnerConfig::default(), 1);
        assert!(spinner.spin(&players(), Timestamp(0)));
        assert!(!spinner.spin(&players(), Timestamp(10)));
        assert_eq!(spinner.pending_timers(), 1);
    }

    #[test]
    fn test_cancel_stops_timer() {
        let mut spinner = DrinkSpinner::new(SpinnerConfig::default(), 1);
        spinner.spin(&players(), Timestamp(0));
        assert!(spinner.cancel());
        assert_eq!(spinner.pending_timers(), 0);
        assert_eq!(spinner.advance_to(Timestamp(10_000)), None);
        assert_eq!(spinner.selected(), None);
        assert!(!spinner.cancel());
    }

    #[test]
    fn test_spin_settles_when_time_runs_out() {
        let mut spinner = DrinkSpinner::new(SpinnerConfig::default(), 3);
        assert!(spinner.spin(&players(), Timestamp(u64::MAX - 200)));

        let chosen = spinner.advance_to(Timestamp(u64::MAX));
        assert!(chosen.is_some());
        assert_eq!(spinner.selected(), chosen);
        assert!(!spinner.is_spinning());
        assert_eq!(spinner.pending_timers(), 0);
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let mut spinner = DrinkSpinner::new(SpinnerConfig::default(), 1);
        assert!(!spinner.spin(&[], Timestamp(0)));
    }

    #[test]
    fn test_same_seed_same_pick() {
        let mut a = DrinkSpinner::new(SpinnerConfig::default(), 9);
        let mut b = DrinkSpinner::new(SpinnerConfig::default(), 9);
        a.spin(&players(), Timestamp(0));
        b.spin(&players(), Timestamp(0));
        assert_eq!(a.advance_to(Timestamp(5_000)), b.advance_to(Timestamp(5_000)));
    }
}

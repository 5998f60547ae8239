//! Cancellable timers over explicit time.

use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// Handle returned when a timer is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct ScheduledTimer<K> {
    id: TimerId,
    kind: K,
    fires_at: Timestamp,
    /// Re-arm interval for repeating timers.
    every_ms: Option<u64>,
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiredTimer<K> {
    pub id: TimerId,
    pub kind: K,
    /// When the timer was due, which may be earlier than the time passed to
    /// [`Scheduler::pop_due`].
    pub fired_at: Timestamp,
}

/// Pending timers of kind `K`.
///
/// Timers are plain data: the owner fires them with [`Scheduler::pop_due`]
/// and handles each one against its *current* state. Cancellation always
/// goes through the `TimerId` handed out at scheduling time.
///
/// ## Example
///
/// ```
/// use click_brawl::core::Timestamp;
/// use click_brawl::timers::Scheduler;
///
/// let mut timers = Scheduler::new();
/// let tick = timers.schedule_repeating("tick", Timestamp(1_000), 1_000);
/// timers.schedule_once("alarm", Timestamp(1_500));
///
/// let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(Timestamp(2_000)))
///     .map(|t| t.kind)
///     .collect();
/// assert_eq!(fired, vec!["tick", "alarm", "tick"]);
///
/// assert!(timers.cancel(tick));
/// assert!(timers.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler<K> {
    timers: Vec<ScheduledTimer<K>>,
    next_id: u64,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }
}

impl<K: Clone> Scheduler<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire once at `at`.
    pub fn schedule_once(&mut self, kind: K, at: Timestamp) -> TimerId {
        self.insert(kind, at, None)
    }

    /// Fire at `first_at`, then every `every_ms` until cancelled.
    pub fn schedule_repeating(&mut self, kind: K, first_at: Timestamp, every_ms: u64) -> TimerId {
        self.insert(kind, first_at, Some(every_ms.max(1)))
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    /// Cancel everything. Returns how many timers were pending.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Earliest pending due time.
    #[must_use]
    pub fn next_fire_at(&self) -> Option<Timestamp> {
        self.timers.iter().map(|t| t.fires_at).min()
    }

    /// Pop the earliest timer due at or before `now`.
    ///
    /// Ties fire in scheduling order. A repeating timer is re-armed one
    /// interval after its due time, so calling this in a loop replays every
    /// firing that `now` has passed. A repeating timer whose next due time
    /// would not move past the end of time is dropped after this firing.
    pub fn pop_due(&mut self, now: Timestamp) -> Option<FiredTimer<K>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.fires_at <= now)
            .min_by_key(|(_, t)| (t.fires_at, t.id))
            .map(|(i, _)| i)?;

        let timer = &self.timers[index];
        let fired = FiredTimer {
            id: timer.id,
            kind: timer.kind.clone(),
            fired_at: timer.fires_at,
        };
        let every_ms = timer.every_ms;

        match every_ms.and_then(|every| fired.fired_at.millis().checked_add(every)) {
            Some(next) => self.timers[index].fires_at = Timestamp(next),
            None => {
                self.timers.remove(index);
            }
        }

        Some(fired)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn insert(&mut self, kind: K, fires_at: Timestamp, every_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(ScheduledTimer {
            id,
            kind,
            fires_at,
            every_ms,
        });
        id
    }
}

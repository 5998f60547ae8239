//! Timer scheduling.
//!
//! Countdowns, spawn attempts, expiry sweeps and the drink spinner all run on
//! `Scheduler`, a list of pending timers keyed by `TimerId`. Nothing runs in
//! the background: owners fire due timers when time advances and handle each
//! one against their current state.

mod scheduler;

pub use scheduler::{FiredTimer, Scheduler, TimerId};

//! Combat resolution.
//!
//! Pure functions that turn one punch plus both fighters' running power-ups
//! into registered clicks and damage. Stuns are enforced by the match, not
//! here.

mod resolver;

pub use resolver::{registered_clicks, resolve_damage, resolve_strike, Strike};

//! Drink spinner shown between matches.

mod wheel;

pub use wheel::{DrinkSpinner, SpinnerTimer};

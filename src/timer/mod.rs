pub mod commands;
pub mod controller;
pub mod state;

#[cfg(test)]
mod state_tests;

pub use controller::{TimerController, TimerSnapshot};
pub use state::{Effect, Interval, TimerState, TimerStatus};

//! Phase domain: health-driven phase state machine.

mod controller;
#[cfg(test)]
mod tests;

pub use controller::{PhaseChange, PhaseController, determine_phase_index};

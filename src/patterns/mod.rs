//! Patterns domain: attack patterns, their timelines and the selector.

mod pattern;
mod selector;
mod timeline;

pub use pattern::{MIN_PATTERN_WEIGHT, Pattern};
pub use selector::{MIN_CONSECUTIVE_LIMIT, MIN_COOLDOWN_MULTIPLIER, PatternSelector};
pub use timeline::{
    PatternContext, PatternEffect, PatternFault, PatternProgress, PatternRun, PatternStep,
};

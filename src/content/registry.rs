//! ContentRegistry resource providing lookups for loaded boss content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded encounter content.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub bosses: HashMap<String, BossDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let phases: usize = self.bosses.values().map(|b| b.phases.len()).sum();
        let patterns: usize = self.bosses.values().map(|b| b.patterns.len()).sum();
        format!(
            "ContentRegistry loaded:\n\
             - Bosses: {}\n\
             - Phases: {}\n\
             - Patterns: {}",
            self.bosses.len(),
            phases,
            patterns,
        )
    }

    pub fn boss(&self, id: &str) -> Option<&BossDef> {
        self.bosses.get(id)
    }
}

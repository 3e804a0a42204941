//! Content domain: RON boss definitions, loading and validation.

mod data;
mod loader;
mod registry;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    BossDef, CombatDefaults, DataFile, PatternCategory, PatternDef, PhaseDef, PhaseEligibility,
};
pub use loader::{ContentLoadError, load_all_content, parse_data_file, parse_single_file};
pub use registry::ContentRegistry;
pub use validation::{Severity, ValidationError, validate_boss, validate_content};

use bevy::prelude::*;
use std::path::PathBuf;

/// Where the content loader looks for its RON files.
#[derive(Resource, Debug, Clone)]
pub struct ContentSettings {
    pub data_dir: PathBuf,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("assets/data"),
        }
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentSettings>()
            .init_resource::<ContentRegistry>()
            .init_resource::<CombatDefaults>()
            .add_systems(Startup, load_content);
    }
}

/// Loads and validates content. Broken files are reported and skipped so the
/// game can still start with whatever loaded.
pub fn load_content(
    settings: Res<ContentSettings>,
    mut registry: ResMut<ContentRegistry>,
    mut defaults: ResMut<CombatDefaults>,
) {
    let (loaded, loaded_defaults, load_errors) = load_all_content(&settings.data_dir);
    for error in &load_errors {
        warn!("{}", error);
    }

    let mut rejected = Vec::new();
    for issue in validate_content(&loaded) {
        match issue.severity {
            Severity::Warning => warn!("{}", issue),
            Severity::Error => {
                error!("{}", issue);
                rejected.push(issue.boss_id);
            }
        }
    }

    *registry = loaded;
    for boss_id in rejected {
        if registry.bosses.remove(&boss_id).is_some() {
            warn!("Boss '{}' skipped due to validation errors", boss_id);
        }
    }
    *defaults = loaded_defaults;

    info!("{}", registry.summary());
}

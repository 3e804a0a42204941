//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron and are used for deserialization.
//! The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::patterns::PatternStep;

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

fn one() -> f32 {
    1.0
}

// ============================================================================
// Bosses (bosses.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BossDef {
    pub id: String,
    pub name: String,
    pub max_health: f32,
    #[serde(default)]
    pub defense: f32,
    pub detection_range: f32,
    /// Seconds before the fight stops on its own; 0 means unlimited
    #[serde(default)]
    pub time_limit: f32,
    pub phases: Vec<PhaseDef>,
    pub patterns: Vec<PatternDef>,
}

/// One health band of an encounter.
///
/// Phases are matched by scanning from the last entry back to the first and
/// taking the first whose threshold is at or above the current health ratio,
/// so thresholds read naturally when authored in descending order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhaseDef {
    pub health_threshold: f32,
    #[serde(default = "one")]
    pub attack_multiplier: f32,
    #[serde(default = "one")]
    pub speed_multiplier: f32,
    #[serde(default = "one")]
    pub attack_speed_multiplier: f32,
    /// Pattern ids usable in this phase; empty allows every pattern
    #[serde(default)]
    pub allowed_pattern_ids: Vec<String>,
    #[serde(default)]
    pub invulnerability_duration: f32,
}

impl PhaseDef {
    /// Single full-health phase with neutral multipliers.
    pub fn safe_default() -> Self {
        Self {
            health_threshold: 1.0,
            attack_multiplier: 1.0,
            speed_multiplier: 1.0,
            attack_speed_multiplier: 1.0,
            allowed_pattern_ids: Vec::new(),
            invulnerability_duration: 0.0,
        }
    }

    pub fn with_threshold(health_threshold: f32) -> Self {
        Self {
            health_threshold,
            ..Self::safe_default()
        }
    }
}

/// Which 1-based phase numbers a pattern may run in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum PhaseEligibility {
    #[default]
    All,
    Phases(Vec<u32>),
}

impl PhaseEligibility {
    pub fn allows(&self, phase_number: u32) -> bool {
        match self {
            PhaseEligibility::All => true,
            PhaseEligibility::Phases(phases) => phases.contains(&phase_number),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PatternCategory {
    Melee,
    Ranged,
    Area,
    Movement,
    Signature,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatternDef {
    pub id: String,
    pub weight: f32,
    pub cooldown: f32,
    pub range: f32,
    #[serde(default)]
    pub phases: PhaseEligibility,
    pub category: PatternCategory,
    #[serde(default)]
    pub steps: Vec<PatternStep>,
}

impl PatternDef {
    /// Short-range strike used when a boss is authored without any patterns.
    pub fn fallback_strike() -> Self {
        Self {
            id: "fallback_strike".to_string(),
            weight: 1.0,
            cooldown: 2.0,
            range: 120.0,
            phases: PhaseEligibility::All,
            category: PatternCategory::Melee,
            steps: vec![
                PatternStep::Telegraph {
                    duration: 0.5,
                    radius: 80.0,
                },
                PatternStep::Strike {
                    damage: 10.0,
                    radius: 80.0,
                    duration: 0.2,
                },
                PatternStep::Recovery { duration: 0.6 },
            ],
        }
    }
}

// ============================================================================
// Combat defaults (combat_defaults.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct CombatDefaults {
    /// Back-to-back picks of one pattern before it is set aside
    pub consecutive_limit: u32,
    pub cooldown_multiplier: f32,
    /// Seconds between defeat and removal of the encounter
    pub teardown_delay: f32,
    /// Fixed selector seed; omitted means a fresh seed per encounter
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            consecutive_limit: 2,
            cooldown_multiplier: 1.0,
            teardown_delay: 3.0,
            seed: None,
        }
    }
}

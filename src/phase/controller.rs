//! Phase domain: maps the boss's health ratio onto its authored phases.

use bevy::log::warn;

use crate::content::PhaseDef;

/// Reported whenever the active phase index moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub previous: usize,
    pub current: usize,
}

/// Scan from the last phase down to the first and return the first index whose
/// threshold is at or above `health_ratio`. Falls back to 0.
pub fn determine_phase_index(phases: &[PhaseDef], health_ratio: f32) -> usize {
    phases
        .iter()
        .enumerate()
        .rev()
        .find(|(_, phase)| phase.health_threshold >= health_ratio)
        .map(|(index, _)| index)
        .unwrap_or(0)
}

fn positive_or_one(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

#[derive(Debug, Clone)]
pub struct PhaseController {
    phases: Vec<PhaseDef>,
    current: usize,
    previous: usize,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PhaseController {
    pub fn new(phases: Vec<PhaseDef>) -> Self {
        let mut controller = Self {
            phases: Vec::new(),
            current: 0,
            previous: 0,
        };
        controller.initialize(phases);
        controller
    }

    /// Replace the phase table. An empty table gets one neutral phase.
    pub fn initialize(&mut self, phases: Vec<PhaseDef>) {
        if phases.is_empty() {
            warn!("No phase definitions supplied, using a single default phase");
            self.phases = vec![PhaseDef::safe_default()];
        } else {
            self.phases = phases;
        }
        self.current = 0;
        self.previous = 0;
    }

    pub fn determine_phase_index(&self, health_ratio: f32) -> usize {
        determine_phase_index(&self.phases, health_ratio)
    }

    pub fn update_phase(&mut self, health_ratio: f32) -> Option<PhaseChange> {
        let index = self.determine_phase_index(health_ratio);
        self.change_to(index)
    }

    /// Adopt the phase for `health_ratio` without reporting a transition.
    pub fn reset_to(&mut self, health_ratio: f32) {
        let index = self.determine_phase_index(health_ratio);
        self.current = index;
        self.previous = index;
    }

    pub fn force_phase(&mut self, index: usize) -> Option<PhaseChange> {
        if index >= self.phases.len() {
            warn!(
                "Rejected forced phase {}: only {} phase(s) defined",
                index,
                self.phases.len()
            );
            return None;
        }
        self.change_to(index)
    }

    fn change_to(&mut self, index: usize) -> Option<PhaseChange> {
        if index == self.current {
            return None;
        }
        self.previous = self.current;
        self.current = index;
        Some(PhaseChange {
            previous: self.previous,
            current: self.current,
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn previous_index(&self) -> usize {
        self.previous
    }

    pub fn total_phases(&self) -> usize {
        self.phases.len()
    }

    pub fn current_phase(&self) -> &PhaseDef {
        &self.phases[self.current]
    }

    pub fn phases(&self) -> &[PhaseDef] {
        &self.phases
    }

    pub fn attack_multiplier(&self) -> f32 {
        positive_or_one(self.current_phase().attack_multiplier)
    }

    pub fn speed_multiplier(&self) -> f32 {
        positive_or_one(self.current_phase().speed_multiplier)
    }

    pub fn attack_speed_multiplier(&self) -> f32 {
        positive_or_one(self.current_phase().attack_speed_multiplier)
    }

    pub fn invulnerability_duration(&self) -> f32 {
        self.current_phase().invulnerability_duration.max(0.0)
    }

    /// Open policy when the current phase has no allow-list.
    pub fn is_pattern_available(&self, pattern_id: &str) -> bool {
        let allowed = &self.current_phase().allowed_pattern_ids;
        allowed.is_empty() || allowed.iter().any(|id| id == pattern_id)
    }
}

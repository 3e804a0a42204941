//! Patterns domain: a single attack behavior with its cooldown and run state.

use crate::content::{PatternCategory, PatternDef, PhaseEligibility};

use super::timeline::{
    PatternContext, PatternFault, PatternProgress, PatternRun, PatternStep, advance_timeline,
};

/// Weights are floored here so a pattern is never dead weight unless its
/// eligibility rules it out.
pub const MIN_PATTERN_WEIGHT: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct Pattern {
    id: String,
    weight: f32,
    cooldown_duration: f32,
    remaining_cooldown: f32,
    usable_range: f32,
    phases: PhaseEligibility,
    category: PatternCategory,
    steps: Vec<PatternStep>,
    run: Option<PatternRun>,
}

impl Pattern {
    pub fn new(
        id: impl Into<String>,
        weight: f32,
        cooldown_duration: f32,
        usable_range: f32,
        category: PatternCategory,
    ) -> Self {
        Self {
            id: id.into(),
            weight: if weight.is_finite() {
                weight.max(MIN_PATTERN_WEIGHT)
            } else {
                MIN_PATTERN_WEIGHT
            },
            cooldown_duration: cooldown_duration.max(0.0),
            remaining_cooldown: 0.0,
            usable_range,
            phases: PhaseEligibility::All,
            category,
            steps: Vec::new(),
            run: None,
        }
    }

    pub fn from_def(def: &PatternDef) -> Self {
        Self::new(&def.id, def.weight, def.cooldown, def.range, def.category)
            .with_phases(def.phases.clone())
            .with_steps(def.steps.clone())
    }

    pub fn with_phases(mut self, phases: PhaseEligibility) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_steps(mut self, steps: Vec<PatternStep>) -> Self {
        self.steps = steps;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn category(&self) -> PatternCategory {
        self.category
    }

    pub fn usable_range(&self) -> f32 {
        self.usable_range
    }

    pub fn cooldown_duration(&self) -> f32 {
        self.cooldown_duration
    }

    pub fn remaining_cooldown(&self) -> f32 {
        self.remaining_cooldown
    }

    pub fn steps(&self) -> &[PatternStep] {
        &self.steps
    }

    /// `phase_number` is 1-based.
    pub fn can_use(&self, phase_number: u32, distance_to_target: f32) -> bool {
        self.remaining_cooldown == 0.0
            && self.phases.allows(phase_number)
            && distance_to_target <= self.usable_range
    }

    pub(crate) fn arm_cooldown(&mut self, multiplier: f32) {
        self.remaining_cooldown = self.cooldown_duration * multiplier;
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.remaining_cooldown > 0.0 {
            self.remaining_cooldown = (self.remaining_cooldown - dt).max(0.0);
        }
    }

    pub fn force_cooldown_complete(&mut self) {
        self.remaining_cooldown = 0.0;
    }

    /// Start (or restart) the timeline from its first step.
    pub fn begin(&mut self) {
        self.run = Some(PatternRun::default());
    }

    /// Advance the running timeline. Not running reads as finished.
    pub fn advance(
        &mut self,
        dt: f32,
        ctx: &mut PatternContext,
    ) -> Result<PatternProgress, PatternFault> {
        let Some(run) = self.run.as_mut() else {
            return Ok(PatternProgress::Finished);
        };
        let result = advance_timeline(&self.steps, run, dt, ctx);
        if !matches!(result, Ok(PatternProgress::Running)) {
            self.run = None;
        }
        result
    }

    /// Safe at any time; a pattern that is not running is left untouched.
    pub fn cancel(&mut self) {
        self.run = None;
    }

    pub fn is_executing(&self) -> bool {
        self.run.is_some()
    }

    pub fn current_step(&self) -> Option<usize> {
        self.run.as_ref().map(|run| run.step)
    }
}

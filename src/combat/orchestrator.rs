//! Combat domain: the boss itself, driving phases, patterns, damage and death.

use bevy::log::{debug, error, info, warn};
use bevy::math::Vec2;

use crate::content::{BossDef, CombatDefaults, PatternCategory, PatternDef, PhaseDef};
use crate::patterns::{
    Pattern, PatternContext, PatternEffect, PatternProgress, PatternSelector,
};
use crate::phase::{PhaseChange, PhaseController};

use super::notifications::{CombatNotification, EndReason, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombatState {
    #[default]
    PreCombat,
    InCombat,
    /// Stopped without a defeat; `start_combat` may resume it
    Ended,
    Dead,
}

/// Authored setup for one encounter.
#[derive(Debug, Clone)]
pub struct EncounterConfig {
    pub phases: Vec<PhaseDef>,
    pub patterns: Vec<PatternDef>,
    pub max_health: f32,
    pub defense: f32,
    pub detection_range: f32,
    /// 0 means unlimited
    pub time_limit: f32,
}

impl EncounterConfig {
    pub fn from_boss(def: &BossDef) -> Self {
        Self {
            phases: def.phases.clone(),
            patterns: def.patterns.clone(),
            max_health: def.max_health,
            defense: def.defense,
            detection_range: def.detection_range,
            time_limit: def.time_limit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CombatOrchestrator {
    name: String,
    phases: PhaseController,
    selector: PatternSelector,
    max_health: f32,
    current_health: f32,
    defense: f32,
    detection_range: f32,
    time_limit: f32,
    teardown_delay: f32,
    state: CombatState,
    invulnerable: bool,
    invulnerable_remaining: f32,
    executing: Option<String>,
    current_phase_index: usize,
    elapsed: f32,
    was_hit: bool,
    target_hit: bool,
    position: Vec2,
    notifications: Vec<CombatNotification>,
}

impl CombatOrchestrator {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            phases: PhaseController::new(vec![PhaseDef::safe_default()]),
            selector: PatternSelector::new(seed),
            max_health: 1.0,
            current_health: 1.0,
            defense: 0.0,
            detection_range: 0.0,
            time_limit: 0.0,
            teardown_delay: CombatDefaults::default().teardown_delay,
            state: CombatState::PreCombat,
            invulnerable: false,
            invulnerable_remaining: 0.0,
            executing: None,
            current_phase_index: 0,
            elapsed: 0.0,
            was_hit: false,
            target_hit: false,
            position: Vec2::ZERO,
            notifications: Vec::new(),
        }
    }

    pub fn from_boss(def: &BossDef, defaults: &CombatDefaults) -> Self {
        let seed = defaults.seed.unwrap_or_else(rand::random::<u64>);
        let mut boss = Self::new(&def.name, seed);
        boss.apply_defaults(defaults);
        boss.initialize_with_config(EncounterConfig::from_boss(def));
        boss
    }

    pub fn apply_defaults(&mut self, defaults: &CombatDefaults) {
        self.selector.set_consecutive_limit(defaults.consecutive_limit);
        self.selector
            .set_cooldown_multiplier(defaults.cooldown_multiplier);
        self.teardown_delay = defaults.teardown_delay.max(0.0);
    }

    /// Rebuild phases, catalog and stats. Missing data is replaced with safe
    /// defaults; a defeated boss is left as it is.
    pub fn initialize_with_config(&mut self, config: EncounterConfig) {
        if self.is_dead() {
            warn!("{}: refusing to reinitialize a defeated boss", self.name);
            return;
        }

        self.phases.initialize(config.phases);

        self.selector.clear_patterns();
        let patterns = if config.patterns.is_empty() {
            warn!("{}: no pattern definitions, using fallback strike", self.name);
            vec![PatternDef::fallback_strike()]
        } else {
            config.patterns
        };
        for def in &patterns {
            if !self.selector.add_pattern(Pattern::from_def(def)) {
                warn!("{}: duplicate pattern '{}' ignored", self.name, def.id);
            }
        }

        self.max_health = if config.max_health > 0.0 {
            config.max_health
        } else {
            warn!(
                "{}: max health {} is not positive, using 1",
                self.name, config.max_health
            );
            1.0
        };
        self.current_health = self.max_health;
        self.defense = config.defense.max(0.0);
        self.detection_range = config.detection_range.max(0.0);
        self.time_limit = config.time_limit.max(0.0);

        self.phases.reset_to(1.0);
        self.current_phase_index = self.phases.current_index();
        self.state = CombatState::PreCombat;
        self.invulnerable = false;
        self.invulnerable_remaining = 0.0;
        self.executing = None;
        self.elapsed = 0.0;
        self.was_hit = false;
        self.target_hit = false;
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn start_combat(&mut self) {
        match self.state {
            CombatState::InCombat => return,
            CombatState::Dead => {
                warn!("{}: cannot start combat, already defeated", self.name);
                return;
            }
            CombatState::PreCombat | CombatState::Ended => {}
        }

        self.state = CombatState::InCombat;
        self.elapsed = 0.0;
        self.was_hit = false;
        self.target_hit = false;
        info!(
            "{}: combat started at {:.0}/{:.0} HP, phase {}/{}",
            self.name,
            self.current_health,
            self.max_health,
            self.current_phase(),
            self.total_phases()
        );

        self.notifications.push(CombatNotification::CombatStarted);
        self.push_hp();
        self.push_phase();
    }

    pub fn end_combat(&mut self) {
        self.stop(EndReason::Stopped);
    }

    fn stop(&mut self, reason: EndReason) {
        if self.state != CombatState::InCombat {
            debug!("{}: end_combat ignored in {:?}", self.name, self.state);
            return;
        }
        self.cancel_executing();
        self.set_invulnerable(false);
        self.state = CombatState::Ended;
        info!(
            "{}: combat ended ({:?}) after {:.1}s",
            self.name, reason, self.elapsed
        );
        self.notifications.push(CombatNotification::CombatEnded {
            reason,
            elapsed: self.elapsed,
        });
    }

    /// One step of the decision loop. Does nothing outside of combat.
    pub fn tick(&mut self, dt: f32, target: Option<Target>) {
        if self.state != CombatState::InCombat {
            return;
        }
        if !dt.is_finite() || dt < 0.0 {
            warn!("{}: ignoring tick with delta {}", self.name, dt);
            return;
        }

        self.elapsed += dt;
        if self.time_limit > 0.0 && self.elapsed >= self.time_limit {
            self.stop(EndReason::TimeLimit);
            return;
        }

        self.selector.tick_cooldowns(dt);

        if self.invulnerable {
            self.invulnerable_remaining -= dt;
            if self.invulnerable_remaining <= 0.0 {
                self.set_invulnerable(false);
            }
        }

        let target = target.filter(|t| t.valid);
        if self.executing.is_some() {
            self.advance_pattern(dt, target);
        } else if !self.invulnerable {
            if let Some(target) = target {
                if self.position.distance(target.position) <= self.detection_range {
                    self.try_start_pattern(None, target);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------

    /// Ask for a pattern of one category. Dropped while another pattern runs.
    pub fn request_pattern_of_type(&mut self, category: PatternCategory, target: Target) -> bool {
        if self.state != CombatState::InCombat || self.invulnerable || !target.valid {
            debug!("{}: pattern request for {:?} dropped", self.name, category);
            return false;
        }
        self.try_start_pattern(Some(category), target)
    }

    fn try_start_pattern(&mut self, category: Option<PatternCategory>, target: Target) -> bool {
        if self.executing.is_some() {
            return false;
        }

        let distance = self.position.distance(target.position);
        let phases = &self.phases;
        let selected = self.selector.select_pattern_where(
            self.current_phase_index,
            distance,
            |p| {
                category.is_none_or(|c| p.category() == c) && phases.is_pattern_available(p.id())
            },
        );
        let Some(pattern_id) = selected else {
            return false;
        };
        let Some(pattern) = self.selector.pattern_mut(&pattern_id) else {
            return false;
        };

        pattern.begin();
        debug!("{}: starting pattern '{}'", self.name, pattern_id);
        self.executing = Some(pattern_id.clone());
        self.notifications
            .push(CombatNotification::PatternStarted { pattern_id });
        self.advance_pattern(0.0, Some(target));
        true
    }

    fn advance_pattern(&mut self, dt: f32, target: Option<Target>) {
        let Some(pattern_id) = self.executing.clone() else {
            return;
        };

        let mut effects = Vec::new();
        let budget = dt * self.phases.attack_speed_multiplier();
        let attack_multiplier = self.phases.attack_multiplier();
        let speed_multiplier = self.phases.speed_multiplier();

        let result = match self.selector.pattern_mut(&pattern_id) {
            Some(pattern) => {
                let mut ctx = PatternContext {
                    origin: &mut self.position,
                    target: target.map(|t| t.position),
                    attack_multiplier,
                    speed_multiplier,
                    effects: &mut effects,
                };
                pattern.advance(budget, &mut ctx)
            }
            None => {
                warn!(
                    "{}: running pattern '{}' was removed from the catalog",
                    self.name, pattern_id
                );
                Ok(PatternProgress::Finished)
            }
        };

        for effect in effects {
            self.apply_pattern_effect(&pattern_id, effect);
        }

        match result {
            Ok(PatternProgress::Running) => {}
            Ok(PatternProgress::Finished) => self.finish_pattern(pattern_id),
            Err(fault) => {
                error!("{}: pattern '{}' faulted: {}", self.name, pattern_id, fault);
                self.finish_pattern(pattern_id);
            }
        }
    }

    fn finish_pattern(&mut self, pattern_id: String) {
        self.executing = None;
        self.notifications
            .push(CombatNotification::PatternFinished { pattern_id });
    }

    fn apply_pattern_effect(&mut self, pattern_id: &str, effect: PatternEffect) {
        match effect {
            PatternEffect::Telegraph {
                position,
                radius,
                duration,
            } => self.notifications.push(CombatNotification::Telegraph {
                pattern_id: pattern_id.to_string(),
                position,
                radius,
                duration,
            }),
            PatternEffect::Strike {
                damage,
                position,
                hit,
            } => {
                if hit {
                    self.target_hit = true;
                    self.notifications.push(CombatNotification::TargetStruck {
                        pattern_id: pattern_id.to_string(),
                        damage,
                        position,
                    });
                }
            }
        }
    }

    fn cancel_executing(&mut self) {
        let Some(pattern_id) = self.executing.take() else {
            return;
        };
        if let Some(pattern) = self.selector.pattern_mut(&pattern_id) {
            pattern.cancel();
        }
        debug!("{}: cancelled pattern '{}'", self.name, pattern_id);
        self.notifications
            .push(CombatNotification::PatternCancelled { pattern_id });
    }

    // ------------------------------------------------------------------
    // Damage, phases and death
    // ------------------------------------------------------------------

    pub fn take_damage(&mut self, amount: f32) {
        self.take_hit(amount, false);
    }

    pub fn take_hit(&mut self, amount: f32, critical: bool) {
        if self.is_dead() {
            debug!("{}: ignored {} damage, already defeated", self.name, amount);
            return;
        }
        if self.invulnerable {
            debug!("{}: ignored {} damage while invulnerable", self.name, amount);
            return;
        }
        if !(amount > 0.0) {
            debug!("{}: ignored non-positive damage {}", self.name, amount);
            return;
        }

        // Chip damage always lands, whatever the defense.
        let final_damage = (amount - self.defense).max(1.0);
        self.current_health = (self.current_health - final_damage).max(0.0);
        self.was_hit = true;

        self.notifications.push(CombatNotification::DamageNumber {
            amount: final_damage,
            position: self.position,
            critical,
        });
        self.push_hp();

        if let Some(change) = self.phases.update_phase(self.health_ratio()) {
            self.on_phase_changed(change);
        }

        if self.current_health <= 0.0 {
            self.die();
        }
    }

    /// Administrative override routed through the normal transition path.
    pub fn force_phase(&mut self, index: usize) {
        if self.is_dead() {
            warn!("{}: force_phase ignored, already defeated", self.name);
            return;
        }
        if let Some(change) = self.phases.force_phase(index) {
            self.on_phase_changed(change);
        }
    }

    fn on_phase_changed(&mut self, change: PhaseChange) {
        if change.current == self.current_phase_index {
            return;
        }
        self.current_phase_index = change.current;
        info!(
            "{}: phase {} -> {} of {}",
            self.name,
            change.previous + 1,
            change.current + 1,
            self.total_phases()
        );
        self.push_phase();

        // Nothing may stay mid-flight across the boundary.
        self.cancel_executing();
        self.set_invulnerable(true);
        self.invulnerable_remaining = self.phases.invulnerability_duration();
        if self.invulnerable_remaining <= 0.0 {
            self.set_invulnerable(false);
        }
    }

    fn die(&mut self) {
        if self.state == CombatState::Dead {
            return;
        }
        self.cancel_executing();
        self.set_invulnerable(false);
        self.state = CombatState::Dead;

        let clear_time = self.elapsed;
        let no_hit = !self.target_hit;
        info!(
            "{}: defeated in {:.1}s (no hit: {})",
            self.name, clear_time, no_hit
        );

        self.notifications
            .push(CombatNotification::RewardRequested { no_hit, clear_time });
        self.notifications.push(CombatNotification::Defeated);
        self.notifications.push(CombatNotification::TeardownScheduled {
            delay: self.teardown_delay,
        });
    }

    fn set_invulnerable(&mut self, value: bool) {
        if !value {
            self.invulnerable_remaining = 0.0;
        }
        if self.invulnerable != value {
            self.invulnerable = value;
            self.notifications
                .push(CombatNotification::InvulnerableChanged(value));
        }
    }

    fn push_hp(&mut self) {
        self.notifications.push(CombatNotification::HpChanged {
            current: self.current_health,
            max: self.max_health,
        });
    }

    fn push_phase(&mut self) {
        self.notifications.push(CombatNotification::PhaseChanged {
            phase: self.current_phase(),
            total: self.total_phases(),
        });
    }

    // ------------------------------------------------------------------
    // Read-only state
    // ------------------------------------------------------------------

    pub fn drain_notifications(&mut self) -> Vec<CombatNotification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn health_ratio(&self) -> f32 {
        self.current_health / self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.state == CombatState::Dead
    }

    pub fn is_in_combat(&self) -> bool {
        self.state == CombatState::InCombat
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// 1-based, as shown to observers.
    pub fn current_phase(&self) -> usize {
        self.current_phase_index + 1
    }

    pub fn current_phase_index(&self) -> usize {
        self.current_phase_index
    }

    pub fn total_phases(&self) -> usize {
        self.phases.total_phases()
    }

    pub fn is_executing_pattern(&self) -> bool {
        self.executing.is_some()
    }

    pub fn executing_pattern(&self) -> Option<&str> {
        self.executing.as_deref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn was_hit(&self) -> bool {
        self.was_hit
    }

    pub fn defense(&self) -> f32 {
        self.defense
    }

    pub fn teardown_delay(&self) -> f32 {
        self.teardown_delay
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn phase_controller(&self) -> &PhaseController {
        &self.phases
    }

    pub fn selector(&self) -> &PatternSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut PatternSelector {
        &mut self.selector
    }
}

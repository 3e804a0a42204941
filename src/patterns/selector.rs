//! Patterns domain: eligibility filtering, anti-repetition and weighted draws.

use bevy::log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::content::PatternCategory;

use super::pattern::Pattern;

pub const MIN_COOLDOWN_MULTIPLIER: f32 = 0.1;
pub const MIN_CONSECUTIVE_LIMIT: u32 = 1;

/// Picks the next pattern for one boss.
///
/// The catalog order matters: cumulative weights are walked in insertion
/// order, so a fixed seed plus a fixed catalog always yields the same picks.
#[derive(Debug, Clone)]
pub struct PatternSelector {
    patterns: Vec<Pattern>,
    last_used: Option<String>,
    consecutive_count: u32,
    consecutive_limit: u32,
    cooldown_multiplier: f32,
    rng: ChaCha8Rng,
}

impl Default for PatternSelector {
    fn default() -> Self {
        Self::new(rand::random::<u64>())
    }
}

impl PatternSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            patterns: Vec::new(),
            last_used: None,
            consecutive_count: 0,
            consecutive_limit: 2,
            cooldown_multiplier: 1.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns false if a pattern with the same id is already registered.
    pub fn add_pattern(&mut self, pattern: Pattern) -> bool {
        if self.patterns.iter().any(|p| p.id() == pattern.id()) {
            debug!("Pattern '{}' already registered", pattern.id());
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    pub fn remove_pattern(&mut self, id: &str) -> Option<Pattern> {
        let index = self.patterns.iter().position(|p| p.id() == id)?;
        Some(self.patterns.remove(index))
    }

    pub fn clear_patterns(&mut self) {
        self.patterns.clear();
        self.last_used = None;
        self.consecutive_count = 0;
    }

    pub fn select_pattern(&mut self, phase_index: usize, distance: f32) -> Option<String> {
        self.select_pattern_where(phase_index, distance, |_| true)
    }

    pub fn select_pattern_of_type(
        &mut self,
        category: PatternCategory,
        phase_index: usize,
        distance: f32,
    ) -> Option<String> {
        self.select_pattern_where(phase_index, distance, |p| p.category() == category)
    }

    /// Full selection pipeline with an extra eligibility predicate.
    ///
    /// On success the chosen pattern's cooldown is armed immediately, so an
    /// interrupted run still cannot be re-picked on the next tick.
    pub fn select_pattern_where<F>(
        &mut self,
        phase_index: usize,
        distance: f32,
        filter: F,
    ) -> Option<String>
    where
        F: Fn(&Pattern) -> bool,
    {
        let phase_number = phase_index as u32 + 1;
        let mut available: Vec<usize> = self
            .patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| p.can_use(phase_number, distance) && filter(*p))
            .map(|(index, _)| index)
            .collect();

        if available.is_empty() {
            return None;
        }

        if let Some(last) = &self.last_used {
            if self.consecutive_count >= self.consecutive_limit {
                let without_last: Vec<usize> = available
                    .iter()
                    .copied()
                    .filter(|&index| self.patterns[index].id() != last)
                    .collect();
                // Keep the repeat rather than go idle when it is the only option.
                if !without_last.is_empty() {
                    available = without_last;
                }
            }
        }

        let chosen = self.weighted_pick(&available);
        let pattern = &mut self.patterns[chosen];
        pattern.arm_cooldown(self.cooldown_multiplier);
        let id = pattern.id().to_string();

        if self.last_used.as_deref() == Some(id.as_str()) {
            self.consecutive_count += 1;
        } else {
            self.last_used = Some(id.clone());
            self.consecutive_count = 1;
        }

        Some(id)
    }

    fn weighted_pick(&mut self, candidates: &[usize]) -> usize {
        let total: f32 = candidates.iter().map(|&i| self.patterns[i].weight()).sum();
        // Overflowing or non-finite sums cannot be rolled against.
        if !(total > 0.0) || !total.is_finite() {
            return candidates[self.rng.random_range(0..candidates.len())];
        }

        let roll: f32 = self.rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for &index in candidates {
            cumulative += self.patterns[index].weight();
            if cumulative > roll {
                return index;
            }
        }
        // Rounding can leave the roll just past the final sum.
        candidates[candidates.len() - 1]
    }

    pub fn set_cooldown_multiplier(&mut self, multiplier: f32) {
        if !(multiplier >= MIN_COOLDOWN_MULTIPLIER) {
            warn!(
                "Cooldown multiplier {} clamped to {}",
                multiplier, MIN_COOLDOWN_MULTIPLIER
            );
            self.cooldown_multiplier = MIN_COOLDOWN_MULTIPLIER;
            return;
        }
        self.cooldown_multiplier = multiplier;
    }

    pub fn set_consecutive_limit(&mut self, limit: u32) {
        self.consecutive_limit = limit.max(MIN_CONSECUTIVE_LIMIT);
    }

    pub fn cooldown_multiplier(&self) -> f32 {
        self.cooldown_multiplier
    }

    pub fn consecutive_limit(&self) -> u32 {
        self.consecutive_limit
    }

    pub fn last_used(&self) -> Option<&str> {
        self.last_used.as_deref()
    }

    pub fn consecutive_count(&self) -> u32 {
        self.consecutive_count
    }

    pub fn tick_cooldowns(&mut self, dt: f32) {
        for pattern in &mut self.patterns {
            pattern.tick_cooldown(dt);
        }
    }

    pub fn reset_all_cooldowns(&mut self) {
        for pattern in &mut self.patterns {
            pattern.force_cooldown_complete();
        }
    }

    pub fn reset_cooldowns_by_type(&mut self, category: PatternCategory) {
        for pattern in self.patterns.iter_mut().filter(|p| p.category() == category) {
            pattern.force_cooldown_complete();
        }
    }

    /// Patterns that pass `can_use` right now, before anti-repetition.
    pub fn available_pattern_count(&self, phase_index: usize, distance: f32) -> usize {
        let phase_number = phase_index as u32 + 1;
        self.patterns
            .iter()
            .filter(|p| p.can_use(phase_number, distance))
            .count()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pattern(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    pub fn pattern_mut(&mut self, id: &str) -> Option<&mut Pattern> {
        self.patterns.iter_mut().find(|p| p.id() == id)
    }
}

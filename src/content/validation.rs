//! Validation for boss definitions and the references between their parts.

use std::collections::HashSet;

use super::data::*;
use super::registry::ContentRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Loads, but likely not what the designer meant
    Warning,
    Error,
}

/// A validation finding with context about what failed.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub severity: Severity,
    pub boss_id: String,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(
            f,
            "{}: boss '{}' field '{}': {}",
            level, self.boss_id, self.field, self.message
        )
    }
}

impl std::error::Error for ValidationError {}

macro_rules! push_issue {
    ($errors:expr, $severity:expr, $boss:expr, $field:expr, $($arg:tt)*) => {
        $errors.push(ValidationError {
            severity: $severity,
            boss_id: $boss.to_string(),
            field: $field.to_string(),
            message: format!($($arg)*),
        })
    };
}

/// Validate every boss in the registry.
/// Returns all findings, empty if the content is clean.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for boss in registry.bosses.values() {
        errors.extend(validate_boss(boss));
    }
    errors
}

fn is_finite_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

pub fn validate_boss(boss: &BossDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let id = &boss.id;

    if !(boss.max_health > 0.0) {
        push_issue!(
            errors,
            Severity::Error,
            id,
            "max_health",
            "must be positive, got {}",
            boss.max_health
        );
    }
    if boss.defense < 0.0 {
        push_issue!(
            errors,
            Severity::Error,
            id,
            "defense",
            "must not be negative, got {}",
            boss.defense
        );
    }
    if boss.time_limit < 0.0 {
        push_issue!(
            errors,
            Severity::Error,
            id,
            "time_limit",
            "must not be negative, got {}",
            boss.time_limit
        );
    }
    if boss.phases.is_empty() {
        push_issue!(
            errors,
            Severity::Warning,
            id,
            "phases",
            "no phases authored, a single default phase will be used"
        );
    }
    if boss.patterns.is_empty() {
        push_issue!(
            errors,
            Severity::Warning,
            id,
            "patterns",
            "no patterns authored, a fallback strike will be used"
        );
    }

    let mut pattern_ids = HashSet::new();
    for pattern in &boss.patterns {
        if !pattern_ids.insert(pattern.id.as_str()) {
            push_issue!(
                errors,
                Severity::Error,
                id,
                "patterns",
                "duplicate pattern id '{}'",
                pattern.id
            );
        }
        for (field, value) in [
            ("patterns.weight", pattern.weight),
            ("patterns.range", pattern.range),
            ("patterns.cooldown", pattern.cooldown),
        ] {
            if !is_finite_non_negative(value) {
                push_issue!(
                    errors,
                    Severity::Error,
                    id,
                    field,
                    "pattern '{}' needs a finite, non-negative value, got {}",
                    pattern.id,
                    value
                );
            }
        }
        if let PhaseEligibility::Phases(numbers) = &pattern.phases {
            for number in numbers {
                if *number == 0 || *number as usize > boss.phases.len().max(1) {
                    push_issue!(
                        errors,
                        Severity::Error,
                        id,
                        "patterns.phases",
                        "pattern '{}' names phase {} but the boss has {} phase(s)",
                        pattern.id,
                        number,
                        boss.phases.len().max(1)
                    );
                }
            }
        }
    }

    for (index, phase) in boss.phases.iter().enumerate() {
        if !(0.0..=1.0).contains(&phase.health_threshold) {
            push_issue!(
                errors,
                Severity::Error,
                id,
                "phases.health_threshold",
                "phase {} threshold {} is outside 0..=1",
                index,
                phase.health_threshold
            );
        }
        for (field, value) in [
            ("phases.attack_multiplier", phase.attack_multiplier),
            ("phases.speed_multiplier", phase.speed_multiplier),
            ("phases.attack_speed_multiplier", phase.attack_speed_multiplier),
            ("phases.invulnerability_duration", phase.invulnerability_duration),
        ] {
            if !is_finite_non_negative(value) {
                push_issue!(
                    errors,
                    Severity::Error,
                    id,
                    field,
                    "phase {} needs a finite, non-negative value, got {}",
                    index,
                    value
                );
            }
        }
        for allowed in &phase.allowed_pattern_ids {
            if !pattern_ids.contains(allowed.as_str()) {
                push_issue!(
                    errors,
                    Severity::Error,
                    id,
                    "phases.allowed_pattern_ids",
                    "phase {} allows unknown pattern '{}'",
                    index,
                    allowed
                );
            }
        }
    }

    // The backward scan only reaches earlier phases when later thresholds are lower.
    if boss
        .phases
        .windows(2)
        .any(|pair| pair[1].health_threshold > pair[0].health_threshold)
    {
        push_issue!(
            errors,
            Severity::Warning,
            id,
            "phases",
            "thresholds are not in descending order; later phases will shadow earlier ones"
        );
    }

    errors
}

//! Debug domain: administrative overrides for a running encounter.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::{CombatOrchestrator, EncounterId};
use crate::content::PatternCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    /// Jump to a 0-based phase index through the normal transition path
    ForcePhase(usize),
    ResetAllCooldowns,
    ResetCooldownsOfType(PatternCategory),
    CompleteCooldown(String),
    SetConsecutiveLimit(u32),
    SetCooldownMultiplier(f32),
    EndCombat,
}

/// Sent by tooling to poke at a live encounter.
#[derive(Debug, Clone)]
pub struct AdminCommand {
    pub encounter: EncounterId,
    pub action: AdminAction,
}

impl Message for AdminCommand {}

/// Apply one action and describe what happened.
pub fn apply_admin_action(boss: &mut CombatOrchestrator, action: &AdminAction) -> String {
    match action {
        AdminAction::ForcePhase(index) => {
            boss.force_phase(*index);
            format!(
                "{} now in phase {}/{}",
                boss.name(),
                boss.current_phase(),
                boss.total_phases()
            )
        }
        AdminAction::ResetAllCooldowns => {
            boss.selector_mut().reset_all_cooldowns();
            format!("{}: all cooldowns reset", boss.name())
        }
        AdminAction::ResetCooldownsOfType(category) => {
            boss.selector_mut().reset_cooldowns_by_type(*category);
            format!("{}: {:?} cooldowns reset", boss.name(), category)
        }
        AdminAction::CompleteCooldown(pattern_id) => {
            match boss.selector_mut().pattern_mut(pattern_id) {
                Some(pattern) => {
                    pattern.force_cooldown_complete();
                    format!("{}: '{}' ready", boss.name(), pattern_id)
                }
                None => format!("{}: no pattern '{}'", boss.name(), pattern_id),
            }
        }
        AdminAction::SetConsecutiveLimit(limit) => {
            boss.selector_mut().set_consecutive_limit(*limit);
            format!(
                "{}: consecutive limit {}",
                boss.name(),
                boss.selector().consecutive_limit()
            )
        }
        AdminAction::SetCooldownMultiplier(multiplier) => {
            boss.selector_mut().set_cooldown_multiplier(*multiplier);
            format!(
                "{}: cooldown multiplier {}",
                boss.name(),
                boss.selector().cooldown_multiplier()
            )
        }
        AdminAction::EndCombat => {
            boss.end_combat();
            format!("{}: combat ended by admin", boss.name())
        }
    }
}

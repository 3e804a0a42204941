//! Debug domain: systems applying admin commands to the scheduler.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::EncounterScheduler;
use crate::debug::commands::{AdminCommand, apply_admin_action};

/// Resource tracking the last admin action for tooling to display.
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub applied: u32,
    pub status_message: Option<String>,
}

pub(crate) fn handle_admin_commands(
    mut commands: MessageReader<AdminCommand>,
    mut scheduler: ResMut<EncounterScheduler>,
    mut debug_state: ResMut<DebugState>,
) {
    for command in commands.read() {
        let Some(boss) = scheduler.get_mut(command.encounter) else {
            warn!("[DEBUG] No encounter {:?} for {:?}", command.encounter, command.action);
            continue;
        };
        let msg = apply_admin_action(boss, &command.action);
        info!("[DEBUG] {}", msg);
        debug_state.applied += 1;
        debug_state.status_message = Some(msg);
    }
}

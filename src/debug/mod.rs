//! Debug domain: dev-tools overrides for live encounters.
//!
//! Features:
//! - Force a phase transition
//! - Reset cooldowns, all at once or per category
//! - Make a single pattern ready
//! - Tune the selector's consecutive limit and cooldown multiplier
//! - End combat early

mod commands;
mod systems;


pub use commands::{AdminAction, AdminCommand, apply_admin_action};
pub use systems::DebugState;

use bevy::prelude::*;

use crate::combat::CombatSystems;
use crate::debug::systems::handle_admin_commands;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_message::<AdminCommand>()
            // Overrides land before the encounters advance this frame.
            .add_systems(Update, handle_admin_commands.before(CombatSystems));
    }
}

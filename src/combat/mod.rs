//! Combat domain: boss orchestration, the encounter scheduler and engine wiring.

mod components;
mod events;
mod notifications;
mod orchestrator;
mod scheduler;
mod systems;


pub use components::{BossBody, CombatTarget};
pub use events::{
    BossDamageRequest, BossDefeatedEvent, BossHealthChanged, BossInvulnerabilityChanged,
    BossPhaseChanged, BossRewardEvent, CombatEndedEvent, DamageNumberEvent,
    EncounterStartedEvent, EncounterTornDownEvent, StartEncounterRequest, TargetStruckEvent,
    TelegraphEvent,
};
pub use notifications::{CombatNotification, EndReason, Target};
pub use orchestrator::{CombatOrchestrator, CombatState, EncounterConfig};
pub use scheduler::{EncounterId, EncounterScheduler};

use bevy::prelude::*;

use crate::combat::systems::{
    apply_boss_damage, despawn_torn_down_bosses, publish_combat_notifications,
    start_requested_encounters, sync_boss_transforms, tick_encounters,
};

/// Every per-frame combat system runs in this set, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatSystems;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EncounterScheduler>()
            .add_message::<StartEncounterRequest>()
            .add_message::<BossDamageRequest>()
            .add_message::<EncounterStartedEvent>()
            .add_message::<BossHealthChanged>()
            .add_message::<BossPhaseChanged>()
            .add_message::<BossInvulnerabilityChanged>()
            .add_message::<BossDefeatedEvent>()
            .add_message::<BossRewardEvent>()
            .add_message::<DamageNumberEvent>()
            .add_message::<TelegraphEvent>()
            .add_message::<TargetStruckEvent>()
            .add_message::<CombatEndedEvent>()
            .add_message::<EncounterTornDownEvent>()
            .add_systems(
                Update,
                (
                    start_requested_encounters,
                    apply_boss_damage,
                    tick_encounters,
                    sync_boss_transforms,
                    publish_combat_notifications,
                    despawn_torn_down_bosses,
                )
                    .chain()
                    .in_set(CombatSystems),
            );
    }
}

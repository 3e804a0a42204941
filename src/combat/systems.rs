//! Combat domain: systems bridging the frame loop and the encounter scheduler.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{BossBody, CombatTarget};
use crate::combat::events::{
    BossDamageRequest, BossDefeatedEvent, BossHealthChanged, BossInvulnerabilityChanged,
    BossPhaseChanged, BossRewardEvent, CombatEndedEvent, DamageNumberEvent,
    EncounterStartedEvent, EncounterTornDownEvent, StartEncounterRequest, TargetStruckEvent,
    TelegraphEvent,
};
use crate::combat::notifications::{CombatNotification, Target};
use crate::combat::orchestrator::CombatOrchestrator;
use crate::combat::scheduler::EncounterScheduler;
use crate::content::{CombatDefaults, ContentRegistry};

/// Build, engage and register bosses named by start requests.
pub(crate) fn start_requested_encounters(
    mut commands: Commands,
    mut requests: MessageReader<StartEncounterRequest>,
    mut started: MessageWriter<EncounterStartedEvent>,
    registry: Option<Res<ContentRegistry>>,
    defaults: Option<Res<CombatDefaults>>,
    mut scheduler: ResMut<EncounterScheduler>,
) {
    let fallback = CombatDefaults::default();
    let defaults = defaults.as_deref().unwrap_or(&fallback);

    for request in requests.read() {
        let Some(def) = registry.as_deref().and_then(|r| r.boss(&request.boss_id)) else {
            warn!("Boss '{}' not found in registry", request.boss_id);
            continue;
        };

        let mut boss = CombatOrchestrator::from_boss(def, defaults);
        boss.set_position(request.position);
        boss.start_combat();
        let encounter = scheduler.spawn(boss);

        let entity = commands
            .spawn((
                BossBody { encounter },
                Transform::from_xyz(request.position.x, request.position.y, 0.0),
            ))
            .id();
        started.write(EncounterStartedEvent {
            encounter,
            boss: entity,
        });
    }
}

pub(crate) fn apply_boss_damage(
    mut requests: MessageReader<BossDamageRequest>,
    mut scheduler: ResMut<EncounterScheduler>,
) {
    for request in requests.read() {
        scheduler.damage(request.encounter, request.amount, request.critical);
    }
}

pub(crate) fn tick_encounters(
    time: Res<Time>,
    targets: Query<(&Transform, &CombatTarget)>,
    mut scheduler: ResMut<EncounterScheduler>,
) {
    let dt = time.delta_secs();
    let target = targets.iter().next().map(|(transform, target)| Target {
        position: transform.translation.truncate(),
        valid: !target.untargetable,
    });
    scheduler.tick(dt, target);
}

/// Dashes move the simulated boss; mirror that onto its body.
pub(crate) fn sync_boss_transforms(
    scheduler: Res<EncounterScheduler>,
    mut bodies: Query<(&BossBody, &mut Transform)>,
) {
    for (body, mut transform) in &mut bodies {
        if let Some(boss) = scheduler.get(body.encounter) {
            let position = boss.position();
            transform.translation.x = position.x;
            transform.translation.y = position.y;
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn publish_combat_notifications(
    mut scheduler: ResMut<EncounterScheduler>,
    mut health_events: MessageWriter<BossHealthChanged>,
    mut phase_events: MessageWriter<BossPhaseChanged>,
    mut invulnerability_events: MessageWriter<BossInvulnerabilityChanged>,
    mut defeated_events: MessageWriter<BossDefeatedEvent>,
    mut reward_events: MessageWriter<BossRewardEvent>,
    mut damage_numbers: MessageWriter<DamageNumberEvent>,
    mut telegraphs: MessageWriter<TelegraphEvent>,
    mut strikes: MessageWriter<TargetStruckEvent>,
    mut ended_events: MessageWriter<CombatEndedEvent>,
    mut torn_down_events: MessageWriter<EncounterTornDownEvent>,
) {
    for (encounter, notification) in scheduler.drain_notifications() {
        match notification {
            CombatNotification::HpChanged { current, max } => {
                health_events.write(BossHealthChanged {
                    encounter,
                    current,
                    max,
                });
            }
            CombatNotification::PhaseChanged { phase, total } => {
                phase_events.write(BossPhaseChanged {
                    encounter,
                    phase,
                    total,
                });
            }
            CombatNotification::InvulnerableChanged(invulnerable) => {
                invulnerability_events.write(BossInvulnerabilityChanged {
                    encounter,
                    invulnerable,
                });
            }
            CombatNotification::Defeated => {
                defeated_events.write(BossDefeatedEvent { encounter });
            }
            CombatNotification::RewardRequested { no_hit, clear_time } => {
                reward_events.write(BossRewardEvent {
                    encounter,
                    no_hit,
                    clear_time,
                });
            }
            CombatNotification::DamageNumber {
                amount,
                position,
                critical,
            } => {
                damage_numbers.write(DamageNumberEvent {
                    encounter,
                    amount,
                    position,
                    critical,
                });
            }
            CombatNotification::Telegraph {
                pattern_id,
                position,
                radius,
                duration,
            } => {
                telegraphs.write(TelegraphEvent {
                    encounter,
                    pattern_id,
                    position,
                    radius,
                    duration,
                });
            }
            CombatNotification::TargetStruck {
                pattern_id,
                damage,
                position,
            } => {
                strikes.write(TargetStruckEvent {
                    encounter,
                    pattern_id,
                    damage,
                    position,
                });
            }
            CombatNotification::CombatEnded { reason, elapsed } => {
                ended_events.write(CombatEndedEvent {
                    encounter,
                    reason,
                    elapsed,
                });
            }
            other => debug!("Encounter {:?}: {:?}", encounter, other),
        }
    }

    for encounter in scheduler.reap() {
        torn_down_events.write(EncounterTornDownEvent { encounter });
    }
}

pub(crate) fn despawn_torn_down_bosses(
    mut commands: Commands,
    mut torn_down_events: MessageReader<EncounterTornDownEvent>,
    bodies: Query<(Entity, &BossBody)>,
) {
    for event in torn_down_events.read() {
        for (entity, body) in &bodies {
            if body.encounter == event.encounter {
                commands.entity(entity).despawn();
            }
        }
    }
}

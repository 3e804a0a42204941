//! Headless demo: loads the boss content, starts one encounter and fights it
//! with scripted player attacks until the boss is torn down or time runs out.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::log::LogPlugin;
use bevy::prelude::*;

use boss_encounter::combat::{
    BossDamageRequest, BossPhaseChanged, BossRewardEvent, CombatEndedEvent, CombatPlugin,
    CombatSystems, CombatTarget, EncounterId, EncounterStartedEvent, EncounterTornDownEvent,
    StartEncounterRequest, TargetStruckEvent,
};
use boss_encounter::content::{ContentPlugin, ContentRegistry};

/// Seconds between scripted player attacks
const ATTACK_INTERVAL: f32 = 0.4;
const ATTACK_DAMAGE: f32 = 24.0;

#[derive(Resource, Debug)]
struct DemoConfig {
    boss_id: Option<String>,
}

#[derive(Resource, Debug, Default)]
struct DemoState {
    encounter: Option<EncounterId>,
    attack_timer: f32,
    attacks: u32,
}

fn main() {
    let boss_id = std::env::args().nth(1);

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins(LogPlugin::default())
    .add_plugins((ContentPlugin, CombatPlugin))
    .insert_resource(DemoConfig { boss_id })
    .init_resource::<DemoState>()
    .add_systems(Startup, spawn_player)
    .add_systems(PostStartup, request_encounter)
    .add_systems(
        Update,
        (track_encounter, attack_boss, report_combat, exit_when_done).after(CombatSystems),
    );

    #[cfg(feature = "dev-tools")]
    app.add_plugins(boss_encounter::debug::DebugPlugin);

    app.run();
}

fn spawn_player(mut commands: Commands) {
    commands.spawn((CombatTarget::default(), Transform::from_xyz(120.0, 0.0, 0.0)));
}

fn request_encounter(
    config: Res<DemoConfig>,
    registry: Res<ContentRegistry>,
    mut requests: MessageWriter<StartEncounterRequest>,
    mut exit: MessageWriter<AppExit>,
) {
    let boss_id = match &config.boss_id {
        Some(id) => Some(id.clone()),
        None => {
            let mut ids: Vec<&String> = registry.bosses.keys().collect();
            ids.sort();
            ids.first().map(|id| (*id).clone())
        }
    };
    let Some(boss_id) = boss_id else {
        error!("No bosses loaded, nothing to fight");
        exit.write(AppExit::error());
        return;
    };

    info!("Requesting encounter with '{}'", boss_id);
    requests.write(StartEncounterRequest {
        boss_id,
        position: Vec2::ZERO,
    });
}

fn track_encounter(
    mut started: MessageReader<EncounterStartedEvent>,
    mut state: ResMut<DemoState>,
) {
    for event in started.read() {
        info!("Encounter {:?} started (entity {:?})", event.encounter, event.boss);
        state.encounter = Some(event.encounter);
    }
}

fn attack_boss(
    time: Res<Time>,
    mut state: ResMut<DemoState>,
    mut damage: MessageWriter<BossDamageRequest>,
) {
    let Some(encounter) = state.encounter else {
        return;
    };
    state.attack_timer += time.delta_secs();
    if state.attack_timer < ATTACK_INTERVAL {
        return;
    }
    state.attack_timer -= ATTACK_INTERVAL;
    state.attacks += 1;

    damage.write(BossDamageRequest {
        encounter,
        amount: ATTACK_DAMAGE,
        critical: state.attacks % 5 == 0,
    });
}

fn report_combat(
    mut phases: MessageReader<BossPhaseChanged>,
    mut strikes: MessageReader<TargetStruckEvent>,
    mut rewards: MessageReader<BossRewardEvent>,
) {
    for event in phases.read() {
        info!("Phase {}/{}", event.phase, event.total);
    }
    for event in strikes.read() {
        info!("Player struck by '{}' for {:.1}", event.pattern_id, event.damage);
    }
    for event in rewards.read() {
        info!(
            "Reward: cleared in {:.1}s, no hit: {}",
            event.clear_time, event.no_hit
        );
    }
}

fn exit_when_done(
    mut ended: MessageReader<CombatEndedEvent>,
    mut torn_down: MessageReader<EncounterTornDownEvent>,
    mut state: ResMut<DemoState>,
    mut exit: MessageWriter<AppExit>,
) {
    for event in ended.read() {
        info!(
            "Combat ended ({:?}) after {:.1}s",
            event.reason, event.elapsed
        );
        state.encounter = None;
        exit.write(AppExit::Success);
    }
    for event in torn_down.read() {
        info!("Encounter {:?} torn down", event.encounter);
        state.encounter = None;
        exit.write(AppExit::Success);
    }
}

//! Combat domain: owns every active encounter and advances them each frame.

use bevy::prelude::*;

use super::notifications::{CombatNotification, Target};
use super::orchestrator::{CombatOrchestrator, CombatState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EncounterId(pub u32);

#[derive(Debug)]
struct ActiveEncounter {
    id: EncounterId,
    boss: CombatOrchestrator,
    /// Counts down once the boss is defeated or its combat has ended
    teardown_in: Option<f32>,
}

/// The explicit driver for boss encounters: the frame loop hands it a delta
/// and it ticks each encounter it owns, in spawn order.
#[derive(Resource, Debug, Default)]
pub struct EncounterScheduler {
    next_id: u32,
    encounters: Vec<ActiveEncounter>,
}

impl EncounterScheduler {
    pub fn spawn(&mut self, boss: CombatOrchestrator) -> EncounterId {
        let id = EncounterId(self.next_id);
        self.next_id += 1;
        info!("Encounter {:?} registered for '{}'", id, boss.name());
        self.encounters.push(ActiveEncounter {
            id,
            boss,
            teardown_in: None,
        });
        id
    }

    pub fn get(&self, id: EncounterId) -> Option<&CombatOrchestrator> {
        self.encounters
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.boss)
    }

    pub fn get_mut(&mut self, id: EncounterId) -> Option<&mut CombatOrchestrator> {
        self.encounters
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.boss)
    }

    pub fn ids(&self) -> Vec<EncounterId> {
        self.encounters.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    /// Apply damage to one encounter. Returns false if it does not exist.
    pub fn damage(&mut self, id: EncounterId, amount: f32, critical: bool) -> bool {
        match self.get_mut(id) {
            Some(boss) => {
                boss.take_hit(amount, critical);
                true
            }
            None => {
                warn!("Damage for unknown encounter {:?} dropped", id);
                false
            }
        }
    }

    pub fn tick(&mut self, dt: f32, target: Option<Target>) {
        for encounter in &mut self.encounters {
            encounter.boss.tick(dt, target);

            if matches!(
                encounter.boss.state(),
                CombatState::Dead | CombatState::Ended
            ) {
                let remaining = encounter
                    .teardown_in
                    .get_or_insert(encounter.boss.teardown_delay());
                *remaining -= dt;
            }
        }
    }

    /// Collect pending notifications from every encounter, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<(EncounterId, CombatNotification)> {
        let mut drained = Vec::new();
        for encounter in &mut self.encounters {
            let id = encounter.id;
            drained.extend(
                encounter
                    .boss
                    .drain_notifications()
                    .into_iter()
                    .map(|n| (id, n)),
            );
        }
        drained
    }

    /// Remove finished encounters whose teardown delay has run out.
    ///
    /// Call after `drain_notifications` so nothing they reported is lost.
    pub fn reap(&mut self) -> Vec<EncounterId> {
        let mut removed = Vec::new();
        self.encounters.retain(|e| {
            let expired = e.teardown_in.is_some_and(|t| t <= 0.0);
            if expired {
                info!("Encounter {:?} ('{}') torn down", e.id, e.boss.name());
                removed.push(e.id);
            }
            !expired
        });
        removed
    }
}

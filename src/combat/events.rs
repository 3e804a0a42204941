//! Combat domain: messages exchanged with the rest of the game.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::notifications::EndReason;
use super::scheduler::EncounterId;

/// Ask for a boss from the content registry to be spawned and engaged
#[derive(Debug)]
pub struct StartEncounterRequest {
    pub boss_id: String,
    pub position: Vec2,
}

impl Message for StartEncounterRequest {}

/// Damage dealt to a boss by the player or the environment
#[derive(Debug)]
pub struct BossDamageRequest {
    pub encounter: EncounterId,
    pub amount: f32,
    pub critical: bool,
}

impl Message for BossDamageRequest {}

#[derive(Debug)]
pub struct EncounterStartedEvent {
    pub encounter: EncounterId,
    pub boss: Entity,
}

impl Message for EncounterStartedEvent {}

#[derive(Debug)]
pub struct BossHealthChanged {
    pub encounter: EncounterId,
    pub current: f32,
    pub max: f32,
}

impl Message for BossHealthChanged {}

#[derive(Debug)]
pub struct BossPhaseChanged {
    pub encounter: EncounterId,
    pub phase: usize,
    pub total: usize,
}

impl Message for BossPhaseChanged {}

#[derive(Debug)]
pub struct BossInvulnerabilityChanged {
    pub encounter: EncounterId,
    pub invulnerable: bool,
}

impl Message for BossInvulnerabilityChanged {}

#[derive(Debug)]
pub struct BossDefeatedEvent {
    pub encounter: EncounterId,
}

impl Message for BossDefeatedEvent {}

/// Handed to the reward pipeline once per defeat
#[derive(Debug)]
pub struct BossRewardEvent {
    pub encounter: EncounterId,
    pub no_hit: bool,
    pub clear_time: f32,
}

impl Message for BossRewardEvent {}

/// Fire-and-forget floating number
#[derive(Debug)]
pub struct DamageNumberEvent {
    pub encounter: EncounterId,
    pub amount: f32,
    pub position: Vec2,
    pub critical: bool,
}

impl Message for DamageNumberEvent {}

#[derive(Debug)]
pub struct TelegraphEvent {
    pub encounter: EncounterId,
    pub pattern_id: String,
    pub position: Vec2,
    pub radius: f32,
    pub duration: f32,
}

impl Message for TelegraphEvent {}

/// A boss pattern landed on the combat target
#[derive(Debug)]
pub struct TargetStruckEvent {
    pub encounter: EncounterId,
    pub pattern_id: String,
    pub damage: f32,
    pub position: Vec2,
}

impl Message for TargetStruckEvent {}

#[derive(Debug)]
pub struct CombatEndedEvent {
    pub encounter: EncounterId,
    pub reason: EndReason,
    pub elapsed: f32,
}

impl Message for CombatEndedEvent {}

#[derive(Debug)]
pub struct EncounterTornDownEvent {
    pub encounter: EncounterId,
}

impl Message for EncounterTornDownEvent {}

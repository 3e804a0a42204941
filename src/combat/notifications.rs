//! Combat domain: what an encounter reports to the outside world.

use bevy::math::Vec2;

/// Where the boss is aiming, as supplied by the target locator each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec2,
    pub valid: bool,
}

impl Target {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            valid: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeLimit,
    Stopped,
}

/// Everything observers, sinks and pipelines hear from an orchestrator.
///
/// Phases are reported 1-based here; internal indices stay 0-based.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatNotification {
    CombatStarted,
    HpChanged {
        current: f32,
        max: f32,
    },
    PhaseChanged {
        phase: usize,
        total: usize,
    },
    InvulnerableChanged(bool),
    PatternStarted {
        pattern_id: String,
    },
    PatternFinished {
        pattern_id: String,
    },
    PatternCancelled {
        pattern_id: String,
    },
    /// Advisory only; never read back into selection
    Telegraph {
        pattern_id: String,
        position: Vec2,
        radius: f32,
        duration: f32,
    },
    TargetStruck {
        pattern_id: String,
        damage: f32,
        position: Vec2,
    },
    DamageNumber {
        amount: f32,
        position: Vec2,
        critical: bool,
    },
    RewardRequested {
        no_hit: bool,
        clear_time: f32,
    },
    Defeated,
    TeardownScheduled {
        delay: f32,
    },
    CombatEnded {
        reason: EndReason,
        elapsed: f32,
    },
}

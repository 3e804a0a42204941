//! Combat domain: components linking entities to encounters.

use bevy::prelude::*;

use super::scheduler::EncounterId;

/// The entity bosses aim at; its transform is the target locator
#[derive(Component, Debug, Default)]
pub struct CombatTarget {
    /// Untargetable targets are ignored by boss selection
    pub untargetable: bool,
}

/// Visual body of a boss whose simulation lives in the scheduler
#[derive(Component, Debug, Clone, Copy)]
pub struct BossBody {
    pub encounter: EncounterId,
}

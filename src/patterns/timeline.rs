//! Patterns domain: authored attack steps and their resumable execution.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Individual step in a pattern timeline
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum PatternStep {
    /// Advisory warning shown before an effect lands
    Telegraph { duration: f32, radius: f32 },
    /// Hit everything within `radius` of the boss once, on entry
    Strike {
        damage: f32,
        radius: f32,
        duration: f32,
    },
    /// `count` ranged shots, one every `interval` seconds
    Volley {
        damage: f32,
        count: u32,
        interval: f32,
    },
    /// Close distance toward the target
    Dash { speed: f32, duration: f32 },
    Wait { duration: f32 },
    /// Recovery period (vulnerable)
    Recovery { duration: f32 },
}

impl PatternStep {
    pub fn duration(&self) -> f32 {
        match self {
            PatternStep::Telegraph { duration, .. } => *duration,
            PatternStep::Strike { duration, .. } => *duration,
            PatternStep::Volley {
                count, interval, ..
            } => *count as f32 * *interval,
            PatternStep::Dash { duration, .. } => *duration,
            PatternStep::Wait { duration } => *duration,
            PatternStep::Recovery { duration } => *duration,
        }
    }

    fn needs_target(&self) -> bool {
        matches!(
            self,
            PatternStep::Strike { .. } | PatternStep::Volley { .. } | PatternStep::Dash { .. }
        )
    }
}

/// A fault raised while advancing a pattern timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternFault {
    InvalidStep { index: usize, reason: String },
    TargetLost { index: usize },
}

impl std::fmt::Display for PatternFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternFault::InvalidStep { index, reason } => {
                write!(f, "step {} is invalid: {}", index, reason)
            }
            PatternFault::TargetLost { index } => {
                write!(f, "step {} needs a target but none is valid", index)
            }
        }
    }
}

impl std::error::Error for PatternFault {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternProgress {
    Running,
    Finished,
}

/// Side effects a timeline asks its owner to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternEffect {
    Telegraph {
        position: Vec2,
        radius: f32,
        duration: f32,
    },
    Strike {
        damage: f32,
        position: Vec2,
        hit: bool,
    },
}

/// What the owner lends a pattern while it advances.
#[derive(Debug)]
pub struct PatternContext<'a> {
    pub origin: &'a mut Vec2,
    pub target: Option<Vec2>,
    pub attack_multiplier: f32,
    pub speed_multiplier: f32,
    pub effects: &'a mut Vec<PatternEffect>,
}

/// Cursor into a running timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternRun {
    pub step: usize,
    pub elapsed: f32,
    pub entered: bool,
    pub shots_fired: u32,
}

impl PatternRun {
    fn next_step(&mut self) {
        self.step += 1;
        self.elapsed = 0.0;
        self.entered = false;
        self.shots_fired = 0;
    }
}

/// Advance `run` through `steps` by `budget` seconds of timeline time.
///
/// Step entries and volley shots are the cancellation checkpoints: nothing is
/// emitted between them, so dropping the run between calls stops all effects.
pub(crate) fn advance_timeline(
    steps: &[PatternStep],
    run: &mut PatternRun,
    mut budget: f32,
    ctx: &mut PatternContext,
) -> Result<PatternProgress, PatternFault> {
    loop {
        let Some(step) = steps.get(run.step) else {
            return Ok(PatternProgress::Finished);
        };
        let duration = step.duration();
        if !duration.is_finite() || duration < 0.0 {
            return Err(PatternFault::InvalidStep {
                index: run.step,
                reason: format!("duration {} is not a finite non-negative value", duration),
            });
        }
        if step.needs_target() && ctx.target.is_none() {
            return Err(PatternFault::TargetLost { index: run.step });
        }

        if !run.entered {
            run.entered = true;
            enter_step(step, ctx);
        }

        let remaining = (duration - run.elapsed).max(0.0);
        if budget < remaining {
            run.elapsed += budget;
            during_step(step, run, budget, ctx);
            return Ok(PatternProgress::Running);
        }
        budget -= remaining;
        run.elapsed = duration;
        during_step(step, run, remaining, ctx);
        run.next_step();
    }
}

fn enter_step(step: &PatternStep, ctx: &mut PatternContext) {
    match step {
        PatternStep::Telegraph { duration, radius } => {
            ctx.effects.push(PatternEffect::Telegraph {
                position: ctx.target.unwrap_or(*ctx.origin),
                radius: *radius,
                duration: *duration,
            });
        }
        PatternStep::Strike { damage, radius, .. } => {
            let hit = ctx
                .target
                .is_some_and(|target| target.distance(*ctx.origin) <= *radius);
            ctx.effects.push(PatternEffect::Strike {
                damage: damage * ctx.attack_multiplier,
                position: *ctx.origin,
                hit,
            });
        }
        PatternStep::Volley { .. }
        | PatternStep::Dash { .. }
        | PatternStep::Wait { .. }
        | PatternStep::Recovery { .. } => {}
    }
}

fn during_step(step: &PatternStep, run: &mut PatternRun, consumed: f32, ctx: &mut PatternContext) {
    match step {
        PatternStep::Volley {
            damage,
            count,
            interval,
        } => {
            // Shots land at 0, interval, 2*interval, ... within the step.
            while run.shots_fired < *count && run.shots_fired as f32 * interval <= run.elapsed {
                run.shots_fired += 1;
                if let Some(target) = ctx.target {
                    ctx.effects.push(PatternEffect::Strike {
                        damage: damage * ctx.attack_multiplier,
                        position: target,
                        hit: true,
                    });
                }
            }
        }
        PatternStep::Dash { speed, .. } => {
            if let Some(target) = ctx.target {
                let to_target = target - *ctx.origin;
                let travel = (speed * ctx.speed_multiplier * consumed).min(to_target.length());
                *ctx.origin += to_target.normalize_or_zero() * travel;
            }
        }
        _ => {}
    }
}

//! Slime chase controller: Idle/Chasing state machine, chase velocity,
//! dominant-axis facing and the anti-stuck nudge.

use bevy::prelude::*;

use super::{AnimationChange, CollisionReport, MotionStep, Pose, Resolution, SlimeAnimation, scale_to_speed};
use crate::components::Direction;

/// Whether the slime is chasing, and whom. The target is a plain entity id;
/// the slime never owns it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChaseState {
    chasing: bool,
    target: Option<Entity>,
}

impl ChaseState {
    /// Something entered the detection area: chase it.
    pub fn engage(&mut self, target: Entity) {
        self.chasing = true;
        self.target = Some(target);
    }

    /// Something left the detection area. Only the tracked target (or an
    /// empty state) drops the chase; returns whether the state changed.
    pub fn disengage(&mut self, leaving: Entity) -> bool {
        match self.target {
            Some(target) if target != leaving => false,
            _ => {
                let was_chasing = self.chasing;
                self.chasing = false;
                self.target = None;
                was_chasing
            }
        }
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    /// The tracked target, only while chasing.
    pub fn target(&self) -> Option<Entity> {
        if self.chasing { self.target } else { None }
    }
}

/// Facing from a movement vector: the longer axis wins, ties go to the
/// vertical axis, zero faces down.
pub fn facing_from_vector(v: Vec2) -> Direction {
    if v.x.abs() > v.y.abs() {
        if v.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if v.y < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ChaseController {
    pub speed: f32,
}

impl ChaseController {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Decide this tick's velocity and animation. Without a target position
    /// the slime idles toward its stored facing.
    pub fn resolve(
        &self,
        state: &ChaseState,
        position: Vec2,
        target_position: Option<Vec2>,
        facing: Direction,
    ) -> Resolution<SlimeAnimation> {
        let velocity = match target_position {
            Some(target) if state.is_chasing() => scale_to_speed(target - position, self.speed),
            _ => Vec2::ZERO,
        };

        let (direction, pose) = if velocity == Vec2::ZERO {
            (facing, Pose::Idle)
        } else {
            (facing_from_vector(velocity), Pose::Walk)
        };

        Resolution {
            direction,
            animation: AnimationChange::from_lookup(SlimeAnimation::for_pose(pose, direction)),
            velocity,
        }
    }

    /// Offset applied after a step that did not reach the target.
    ///
    /// `(target - position) / speed`. Not scaled by dt.
    pub fn anti_stuck_nudge(
        &self,
        position: Vec2,
        target_position: Option<Vec2>,
        velocity: Vec2,
        report: CollisionReport,
    ) -> Option<Vec2> {
        let target = target_position?;
        if report.hit_target || velocity == Vec2::ZERO || self.speed == 0.0 {
            return None;
        }
        Some((target - position) / self.speed)
    }

    /// Resolve, move the body, then nudge it toward the target if the step
    /// did not make contact.
    pub fn step(
        &self,
        state: &ChaseState,
        target_position: Option<Vec2>,
        facing: Direction,
        body: &mut impl MotionStep,
    ) -> Resolution<SlimeAnimation> {
        let target_position = target_position.filter(|_| state.is_chasing());
        let resolution = self.resolve(state, body.position(), target_position, facing);
        let report = body.apply_velocity(resolution.velocity);

        let position = body.position();
        if let Some(offset) =
            self.anti_stuck_nudge(position, target_position, resolution.velocity, report)
        {
            body.set_position(position + offset);
        }
        resolution
    }
}

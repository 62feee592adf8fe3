//! Engine-independent decision logic for the player and slime controllers.
//!
//! Nothing in here touches the Bevy world. The host feeds an action snapshot
//! or a target position in, and gets a [`Resolution`] back. Movement itself
//! goes through the [`MotionStep`] collaborator.

pub mod animation;
pub mod chase;
pub mod input_map;
pub mod resolver;

use std::collections::HashSet;

use bevy::prelude::*;

use crate::components::Direction;

pub use animation::{Clip, PlayerAnimation, Pose, SlimeAnimation};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Anything that can answer "is this named action held right now?".
pub trait ActionSource {
    fn is_active(&self, action: &str) -> bool;
}

/// The set of actions held during one tick.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSnapshot {
    active: HashSet<String>,
}

impl ActionSnapshot {
    pub fn press(&mut self, action: &str) {
        self.active.insert(action.to_string());
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ActionSnapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

impl ActionSource for ActionSnapshot {
    fn is_active(&self, action: &str) -> bool {
        self.active.contains(action)
    }
}

// ---------------------------------------------------------------------------
// Resolution output
// ---------------------------------------------------------------------------

/// What the sprite should do this tick. `Keep` is the explicit result of a
/// lookup miss: the previously playing clip stays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationChange<A> {
    Play(A),
    Keep,
}

impl<A> AnimationChange<A> {
    pub fn from_lookup(found: Option<A>) -> Self {
        match found {
            Some(animation) => AnimationChange::Play(animation),
            None => AnimationChange::Keep,
        }
    }
}

/// One tick's decision: where the entity faces, what it plays, how it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<A> {
    pub direction: Direction,
    pub animation: AnimationChange<A>,
    pub velocity: Vec2,
}

impl<A> Resolution<A> {
    pub fn flip_x(&self) -> bool {
        self.direction.flip_x()
    }
}

/// Normalize a raw direction and scale it to `speed`. Zero stays zero, so the
/// result always has magnitude 0 or exactly `speed`.
pub fn scale_to_speed(raw: Vec2, speed: f32) -> Vec2 {
    if raw.length() > 0.0 {
        raw.normalize() * speed
    } else {
        Vec2::ZERO
    }
}

// ---------------------------------------------------------------------------
// Motion collaborator
// ---------------------------------------------------------------------------

/// Result of one motion step, as far as the controllers care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub hit_target: bool,
}

/// The host's movement step. Controllers hand it a velocity and read back
/// whether the body touched its target.
pub trait MotionStep {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn apply_velocity(&mut self, velocity: Vec2) -> CollisionReport;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Integrates with a fixed dt and reports a scripted collision result.
    pub struct FakeBody {
        pub position: Vec2,
        pub dt: f32,
        pub report: CollisionReport,
        pub applied: Vec<Vec2>,
    }

    impl FakeBody {
        pub fn at(position: Vec2, dt: f32) -> Self {
            Self {
                position,
                dt,
                report: CollisionReport::default(),
                applied: Vec::new(),
            }
        }
    }

    impl MotionStep for FakeBody {
        fn position(&self) -> Vec2 {
            self.position
        }

        fn set_position(&mut self, position: Vec2) {
            self.position = position;
        }

        fn apply_velocity(&mut self, velocity: Vec2) -> CollisionReport {
            self.applied.push(velocity);
            self.position += velocity * self.dt;
            self.report
        }
    }
}

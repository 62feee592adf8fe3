//! Player direction/animation/velocity resolution.

use bevy::prelude::*;

use super::input_map::{ActionKind, InputMap};
use super::{ActionSource, AnimationChange, MotionStep, PlayerAnimation, Resolution, scale_to_speed};
use crate::components::Direction;
use crate::resources::Viewport;

/// Resolve one tick of player input.
///
/// `facing` is the stored direction from previous ticks. Attacks and death
/// keep it; moves and face actions replace it; no input idles toward it.
pub fn resolve(
    map: &InputMap,
    actions: &impl ActionSource,
    facing: Direction,
    speed: f32,
) -> Resolution<PlayerAnimation> {
    let Some(binding) = map.first_active(actions) else {
        return Resolution {
            direction: facing,
            animation: AnimationChange::from_lookup(map.animation_for("face", facing)),
            velocity: Vec2::ZERO,
        };
    };

    match binding.kind {
        ActionKind::Move => Resolution {
            direction: binding.direction,
            animation: AnimationChange::Play(binding.animation),
            velocity: scale_to_speed(binding.vector, speed),
        },
        ActionKind::Face => Resolution {
            direction: binding.direction,
            animation: AnimationChange::Play(binding.animation),
            velocity: Vec2::ZERO,
        },
        ActionKind::Attack => Resolution {
            direction: facing,
            animation: AnimationChange::from_lookup(map.animation_for("attack", facing)),
            velocity: Vec2::ZERO,
        },
        ActionKind::Death => Resolution {
            direction: facing,
            animation: AnimationChange::Play(binding.animation),
            velocity: Vec2::ZERO,
        },
    }
}

/// Keep a position inside the viewport, leaving `bottom_padding` free at
/// the bottom edge.
pub fn clamp_to_viewport(position: Vec2, viewport: &Viewport) -> Vec2 {
    let max_x = viewport.size.x.max(0.0);
    let max_y = (viewport.size.y - viewport.bottom_padding).max(0.0);
    Vec2::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Per-player controller state, built once at spawn.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    pub speed: f32,
    pub input_map: InputMap,
}

impl PlayerController {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            input_map: InputMap::player(),
        }
    }

    /// Resolve, move the body, then clamp it into the viewport.
    pub fn step(
        &self,
        actions: &impl ActionSource,
        facing: Direction,
        body: &mut impl MotionStep,
        viewport: &Viewport,
    ) -> Resolution<PlayerAnimation> {
        let resolution = resolve(&self.input_map, actions, facing, self.speed);
        body.apply_velocity(resolution.velocity);
        body.set_position(clamp_to_viewport(body.position(), viewport));
        resolution
    }
}

//! Kinematic movement in screen space.
//!
//! Controllers move their entities through [`KinematicStep`], which integrates
//! `ScreenPosition` by velocity and reports hitbox contact with the target.
//! `Transform` is derived from `ScreenPosition` every frame.

use bevy::prelude::*;
use micromegas_tracing::prelude::*;

use crate::components::ScreenPosition;
use crate::control::{CollisionReport, MotionStep};
use crate::resources::{Viewport, screen_to_world};

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_transform_to_screen);
    }
}

/// One entity's movement for one fixed tick.
pub struct KinematicStep<'a> {
    pub position: &'a mut Vec2,
    pub dt: f32,
    pub radius: f32,
    /// Target position and hitbox radius, if the mover tracks one.
    pub target: Option<(Vec2, f32)>,
}

impl MotionStep for KinematicStep<'_> {
    fn position(&self) -> Vec2 {
        *self.position
    }

    fn set_position(&mut self, position: Vec2) {
        *self.position = position;
    }

    fn apply_velocity(&mut self, velocity: Vec2) -> CollisionReport {
        *self.position += velocity * self.dt;
        let hit_target = self
            .target
            .is_some_and(|(pos, radius)| self.position.distance(pos) <= self.radius + radius);
        CollisionReport { hit_target }
    }
}

/// Keep `Transform` in line with `ScreenPosition`, preserving z.
#[span_fn]
fn sync_transform_to_screen(
    viewport: Res<Viewport>,
    mut query: Query<(&ScreenPosition, &mut Transform)>,
) {
    for (pos, mut transform) in &mut query {
        let world = screen_to_world(pos.0, &viewport);
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_velocity_over_dt() {
        let mut pos = Vec2::new(10.0, 10.0);
        let mut step = KinematicStep {
            position: &mut pos,
            dt: 0.5,
            radius: 4.0,
            target: None,
        };
        let report = step.apply_velocity(Vec2::new(20.0, -10.0));
        assert!(!report.hit_target);
        assert_eq!(pos, Vec2::new(20.0, 5.0));
    }

    #[test]
    fn reports_overlap_with_target() {
        let mut pos = Vec2::ZERO;
        let mut step = KinematicStep {
            position: &mut pos,
            dt: 1.0,
            radius: 8.0,
            target: Some((Vec2::new(30.0, 0.0), 8.0)),
        };
        assert!(!step.apply_velocity(Vec2::new(10.0, 0.0)).hit_target);
        assert!(step.apply_velocity(Vec2::new(5.0, 0.0)).hit_target);
    }

    #[test]
    fn transform_follows_screen_position() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(Viewport::default());
        app.add_plugins(MotionPlugin);

        let entity = app
            .world_mut()
            .spawn((ScreenPosition(Vec2::new(400.0, 0.0)), Transform::from_xyz(0.0, 0.0, 5.0)))
            .id();
        app.update();

        let transform = app.world().entity(entity).get::<Transform>().unwrap();
        assert_eq!(transform.translation, Vec3::new(0.0, 300.0, 5.0));
    }
}

//! Slime spawning, detection areas, and the chase controller.

use bevy::prelude::*;
use micromegas_tracing::prelude::{imetric, info, span_fn, span_scope};

use crate::app_state::{AppState, TickSet, ensure_tick_sets};
use crate::components::*;
use crate::config::ControllerConfig;
use crate::control::chase::{ChaseController, ChaseState};
use crate::control::{Clip, SlimeAnimation};
use crate::events::{DetectionEntered, DetectionExited};
use crate::plugins::motion::KinematicStep;
use crate::plugins::sprites::{
    AnimationState, AnimationTimer, CharacterSheetRef, SpriteSheetLibrary,
};

pub const SLIME_SHEET: &str = "slime";
const SLIME_SPRITE_SIZE: f32 = 32.0;

pub struct SlimePlugin;

impl Plugin for SlimePlugin {
    fn build(&self, app: &mut App) {
        ensure_tick_sets(app);
        app.add_systems(OnEnter(AppState::Playing), spawn_slimes);
        app.add_systems(
            FixedUpdate,
            (
                update_detection_areas.in_set(TickSet::Detect),
                drive_slimes.in_set(TickSet::Chase),
            )
                .run_if(in_state(AppState::Playing)),
        );
        app.add_observer(on_detection_entered);
        app.add_observer(on_detection_exited);
    }
}

/// Trigger region around a slime. Remembers who was inside last tick so
/// only edges produce events.
#[derive(Component, Debug, Clone, Copy)]
pub struct DetectionArea {
    pub radius: f32,
    pub occupant: Option<Entity>,
}

impl DetectionArea {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            occupant: None,
        }
    }
}

/// Everything a slime needs except its sprite.
pub fn slime_bundle(config: &ControllerConfig, position: Vec2) -> impl Bundle {
    (
        Slime,
        ChaseController::new(config.slime_speed),
        ChaseState::default(),
        DetectionArea::new(config.detection_radius),
        ScreenPosition(position),
        Facing(Direction::Down),
        Velocity::default(),
        Hitbox {
            radius: config.slime_hitbox_radius,
        },
        AnimationState::new(SlimeAnimation::FrontIdle),
        Transform::from_xyz(0.0, 0.0, 5.0),
    )
}

#[span_fn]
pub fn spawn_slimes(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    library: Option<Res<SpriteSheetLibrary>>,
) {
    for position in config.slime_spawns() {
        let mut entity = commands.spawn(slime_bundle(&config, position));

        let sprite = library.as_ref().and_then(|lib| {
            lib.sprite(
                SLIME_SHEET,
                SlimeAnimation::FrontIdle.clip(),
                Vec2::splat(SLIME_SPRITE_SIZE),
            )
        });
        if let Some(sprite) = sprite {
            entity.insert((
                sprite,
                CharacterSheetRef(SLIME_SHEET.to_string()),
                AnimationTimer::default(),
            ));
        }
    }
    info!("spawned {} slimes", config.slime_spawns.len());
}

/// Compare who is inside each detection area with last tick and trigger
/// enter/exit events on change. The closest player counts.
#[allow(clippy::type_complexity)]
#[span_fn]
fn update_detection_areas(
    mut commands: Commands,
    mut areas: Query<(Entity, &ScreenPosition, &mut DetectionArea), With<Slime>>,
    players: Query<(Entity, &ScreenPosition), (With<Player>, Without<Slime>)>,
) {
    for (area_entity, pos, mut area) in &mut areas {
        let inside = players
            .iter()
            .map(|(entity, player_pos)| (entity, player_pos.0.distance(pos.0)))
            .filter(|(_, distance)| *distance <= area.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        if inside == area.occupant {
            continue;
        }

        if let Some(previous) = area.occupant {
            commands.trigger(DetectionExited {
                area: area_entity,
                target: previous,
            });
        }
        if let Some(next) = inside {
            commands.trigger(DetectionEntered {
                area: area_entity,
                target: next,
            });
        }
        area.occupant = inside;
    }
}

fn on_detection_entered(trigger: On<DetectionEntered>, mut slimes: Query<&mut ChaseState>) {
    let event = trigger.event();
    let Ok(mut state) = slimes.get_mut(event.area) else {
        return;
    };
    state.engage(event.target);
    imetric!("slime_chase_started", "count", 1);
    info!("slime {:?} chasing {:?}", event.area, event.target);
}

fn on_detection_exited(trigger: On<DetectionExited>, mut slimes: Query<&mut ChaseState>) {
    let event = trigger.event();
    let Ok(mut state) = slimes.get_mut(event.area) else {
        return;
    };
    if state.disengage(event.target) {
        imetric!("slime_chase_stopped", "count", 1);
        info!("slime {:?} lost {:?}", event.area, event.target);
    }
}

/// Chase, move, then nudge. A target that no longer exists idles the slime.
#[allow(clippy::type_complexity)]
#[span_fn]
fn drive_slimes(
    time: Res<Time>,
    targets: Query<(&ScreenPosition, Option<&Hitbox>), With<Player>>,
    mut slimes: Query<
        (
            &ChaseController,
            &ChaseState,
            &Hitbox,
            &mut ScreenPosition,
            &mut Facing,
            &mut Velocity,
            &mut AnimationState,
        ),
        (With<Slime>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();
    for (controller, state, hitbox, mut pos, mut facing, mut velocity, mut anim) in &mut slimes {
        let target = state
            .target()
            .and_then(|entity| targets.get(entity).ok())
            .map(|(target_pos, target_box)| (target_pos.0, target_box.map_or(0.0, |b| b.radius)));

        let mut body = KinematicStep {
            position: &mut pos.0,
            dt,
            radius: hitbox.radius,
            target,
        };
        let resolution = controller.step(state, target.map(|(p, _)| p), facing.0, &mut body);

        facing.set_if_neq(Facing(resolution.direction));
        velocity.set_if_neq(Velocity(resolution.velocity));

        let mut next = anim.clone();
        next.apply(resolution.animation, resolution.flip_x());
        anim.set_if_neq(next);
    }
}

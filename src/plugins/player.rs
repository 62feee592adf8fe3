//! Player spawning and the per-tick player controller.

use bevy::prelude::*;
use micromegas_tracing::prelude::{info, span_fn, span_scope};

use crate::app_state::{AppState, TickSet, ensure_tick_sets};
use crate::components::*;
use crate::config::ControllerConfig;
use crate::control::resolver::PlayerController;
use crate::control::{ActionSnapshot, Clip, PlayerAnimation};
use crate::plugins::motion::KinematicStep;
use crate::plugins::sprites::{
    AnimationState, AnimationTimer, CharacterSheetRef, SpriteSheetLibrary,
};
use crate::resources::Viewport;

pub const PLAYER_SHEET: &str = "player";
const PLAYER_SPRITE_SIZE: f32 = 48.0;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        ensure_tick_sets(app);
        app.add_systems(OnEnter(AppState::Playing), spawn_player);
        app.add_systems(
            FixedUpdate,
            drive_player
                .in_set(TickSet::Player)
                .run_if(in_state(AppState::Playing)),
        );
    }
}

/// Everything a player needs except its sprite.
pub fn player_bundle(config: &ControllerConfig) -> impl Bundle {
    (
        Player,
        PlayerController::new(config.player_speed),
        ScreenPosition(config.player_spawn()),
        Facing(Direction::Down),
        Velocity::default(),
        Hitbox {
            radius: config.player_hitbox_radius,
        },
        AnimationState::new(PlayerAnimation::FrontIdle),
        Transform::from_xyz(0.0, 0.0, 10.0),
    )
}

#[span_fn]
pub fn spawn_player(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    library: Option<Res<SpriteSheetLibrary>>,
) {
    let mut entity = commands.spawn(player_bundle(&config));

    let sprite = library.and_then(|lib| {
        lib.sprite(
            PLAYER_SHEET,
            PlayerAnimation::FrontIdle.clip(),
            Vec2::splat(PLAYER_SPRITE_SIZE),
        )
    });
    if let Some(sprite) = sprite {
        entity.insert((
            sprite,
            CharacterSheetRef(PLAYER_SHEET.to_string()),
            AnimationTimer::default(),
        ));
    }

    info!("player spawned at {:?}", config.player_spawn());
}

/// Resolve held actions, move, clamp into the viewport.
#[allow(clippy::type_complexity)]
#[span_fn]
fn drive_player(
    time: Res<Time>,
    actions: Res<ActionSnapshot>,
    viewport: Res<Viewport>,
    mut query: Query<
        (
            &PlayerController,
            &Hitbox,
            &mut ScreenPosition,
            &mut Facing,
            &mut Velocity,
            &mut AnimationState,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (controller, hitbox, mut pos, mut facing, mut velocity, mut anim) in &mut query {
        let mut body = KinematicStep {
            position: &mut pos.0,
            dt,
            radius: hitbox.radius,
            target: None,
        };
        let resolution = controller.step(&*actions, facing.0, &mut body, &viewport);

        facing.set_if_neq(Facing(resolution.direction));
        velocity.set_if_neq(Velocity(resolution.velocity));

        let mut next = anim.clone();
        next.apply(resolution.animation, resolution.flip_x());
        anim.set_if_neq(next);
    }
}

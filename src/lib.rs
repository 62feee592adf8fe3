pub mod app_state;
pub mod components;
pub mod config;
pub mod control;
pub mod events;
pub mod plugins;
pub mod resources;

use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use micromegas_tracing::prelude::{info, span_fn, span_scope, warn};

use app_state::AppState;
use config::{ControllerConfig, DEFAULT_CONFIG_PATH};
use plugins::camera::CameraPlugin;
use plugins::input::ActionInputPlugin;
use plugins::motion::MotionPlugin;
use plugins::player::{PLAYER_SHEET, PlayerPlugin, spawn_player};
use plugins::slime::{SLIME_SHEET, SlimePlugin, spawn_slimes};
use plugins::sprites::{SpriteSheetLibrary, SpriteSheetPlugin};
use plugins::telemetry::TelemetryPlugin;
use resources::{SpriteAssets, Viewport};

pub struct SlimewoodPlugin;

impl Plugin for SlimewoodPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>();

        // Tests and tools may insert their own config first.
        if !app.world().contains_resource::<ControllerConfig>() {
            app.insert_resource(load_config());
        }
        let padding = app.world().resource::<ControllerConfig>().screen_padding;
        app.insert_resource(Viewport {
            bottom_padding: padding,
            ..default()
        });

        app.add_plugins(SpriteSheetPlugin);
        app.add_plugins(CameraPlugin);
        app.add_plugins(MotionPlugin);
        app.add_plugins(ActionInputPlugin);
        app.add_plugins(PlayerPlugin);
        app.add_plugins(SlimePlugin);
        app.add_plugins(TelemetryPlugin);

        app.add_systems(
            OnEnter(AppState::Playing),
            register_sprite_sheets.before(spawn_player).before(spawn_slimes),
        );

        // A missing sheet only costs the sprite; controllers still run.
        app.add_loading_state(
            LoadingState::new(AppState::Loading)
                .continue_to_state(AppState::Playing)
                .on_failure_continue_to_state(AppState::Playing)
                .load_collection::<SpriteAssets>(),
        );
    }
}

fn load_config() -> ControllerConfig {
    match ControllerConfig::load(DEFAULT_CONFIG_PATH) {
        Ok(config) => {
            info!("loaded controller config from {}", DEFAULT_CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("using default controller config: {}", e);
            ControllerConfig::default()
        }
    }
}

/// Pair the loaded images with their JSON sidecars.
#[span_fn]
fn register_sprite_sheets(
    assets: Option<Res<SpriteAssets>>,
    mut library: ResMut<SpriteSheetLibrary>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let Some(assets) = assets else {
        warn!("sprite assets missing, entities will spawn without sprites");
        return;
    };
    for (name, image) in [
        (PLAYER_SHEET, assets.player.clone()),
        (SLIME_SHEET, assets.slime.clone()),
    ] {
        if let Err(e) = library.register(name, image, &mut layouts) {
            warn!("sprite sheet {}: {}", name, e);
        }
    }
}

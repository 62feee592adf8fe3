use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use micromegas_tracing::prelude::*;

use crate::resources::Viewport;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>();
        app.add_systems(Startup, spawn_camera);
        app.add_systems(PreUpdate, track_window_size);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Follow the primary window so clamping uses the visible area.
#[span_fn]
fn track_window_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if viewport.size != size {
        viewport.size = size;
    }
}

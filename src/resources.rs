use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

/// Size of the playfield in pixels, tracked from the primary window.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
    pub bottom_padding: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Vec2::new(800.0, 600.0),
            bottom_padding: 20.0,
        }
    }
}

/// Convert a screen-space position (origin top-left, y down) into a world
/// position for a camera centred on the viewport.
pub fn screen_to_world(position: Vec2, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        position.x - viewport.size.x / 2.0,
        viewport.size.y / 2.0 - position.y,
    )
}

#[derive(AssetCollection, Resource)]
pub struct SpriteAssets {
    #[asset(path = "sprites/player.png")]
    pub player: Handle<Image>,
    #[asset(path = "sprites/slime.png")]
    pub slime: Handle<Image>,
}

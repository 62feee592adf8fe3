use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Direction and spatial
// ---------------------------------------------------------------------------

/// Cardinal facing direction. Screen space: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

impl Direction {
    /// Unit vector for this direction in screen space.
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
        }
    }

    /// Suffix used in action names ("move_left", "attack_up", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Left and right share the side clips; left plays them mirrored.
    pub fn flip_x(&self) -> bool {
        matches!(self, Direction::Left)
    }
}

/// Position in viewport pixels, origin top-left, y down.
/// `Transform` is derived from this every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref, DerefMut)]
pub struct ScreenPosition(pub Vec2);

/// Last-known facing. Only changes when movement resolves to a direction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Facing(pub Direction);

/// Velocity resolved on the last tick, in pixels per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Deref)]
pub struct Velocity(pub Vec2);

/// Circle used for contact checks in the kinematic step.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub radius: f32,
}

// ---------------------------------------------------------------------------
// Entity markers
// ---------------------------------------------------------------------------

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug)]
pub struct Slime;

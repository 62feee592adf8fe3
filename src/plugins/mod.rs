pub mod camera;
pub mod input;
pub mod motion;
pub mod player;
pub mod slime;
pub mod sprites;
pub mod telemetry;

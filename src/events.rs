//! Detection-area events triggered by the slime plugin and observed by the
//! chase state machine.

use bevy::prelude::*;

/// `target` walked into `area`'s detection radius.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionEntered {
    pub area: Entity,
    pub target: Entity,
}

/// `target` left `area`'s detection radius.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionExited {
    pub area: Entity,
    pub target: Entity,
}

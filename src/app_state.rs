use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, States)]
pub enum AppState {
    #[default]
    Loading,
    Playing,
}

/// Order of work inside one fixed tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Keyboard → action snapshot.
    Input,
    /// Detection-area enter/exit edges.
    Detect,
    /// The player controller resolves actions and moves.
    Player,
    /// Slimes chase the player's post-move position.
    Chase,
}

/// Chains the tick sets in `FixedUpdate`. Added by every plugin that
/// schedules work in them.
pub struct TickPlugin;

impl Plugin for TickPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                TickSet::Input,
                TickSet::Detect,
                TickSet::Player,
                TickSet::Chase,
            )
                .chain(),
        );
    }
}

pub(crate) fn ensure_tick_sets(app: &mut App) {
    if !app.is_plugin_added::<TickPlugin>() {
        app.add_plugins(TickPlugin);
    }
}

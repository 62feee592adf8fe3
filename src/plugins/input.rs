//! Keyboard → named actions.

use bevy::prelude::*;
use micromegas_tracing::prelude::*;

use crate::app_state::{AppState, TickSet, ensure_tick_sets};
use crate::control::ActionSnapshot;

pub struct ActionInputPlugin;

impl Plugin for ActionInputPlugin {
    fn build(&self, app: &mut App) {
        ensure_tick_sets(app);
        app.init_resource::<KeyBindings>()
            .init_resource::<ActionSnapshot>()
            .add_systems(
                FixedUpdate,
                poll_actions
                    .in_set(TickSet::Input)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}

/// Which keys hold which action. Several keys may share one action.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub bindings: Vec<(String, Vec<KeyCode>)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let rows: [(&str, &[KeyCode]); 13] = [
            ("move_right", &[KeyCode::ArrowRight, KeyCode::KeyD]),
            ("move_left", &[KeyCode::ArrowLeft, KeyCode::KeyA]),
            ("move_down", &[KeyCode::ArrowDown, KeyCode::KeyS]),
            ("move_up", &[KeyCode::ArrowUp, KeyCode::KeyW]),
            ("face_right", &[KeyCode::KeyH]),
            ("face_left", &[KeyCode::KeyF]),
            ("face_down", &[KeyCode::KeyG]),
            ("face_up", &[KeyCode::KeyT]),
            ("attack_right", &[KeyCode::KeyL]),
            ("attack_left", &[KeyCode::KeyJ]),
            ("attack_down", &[KeyCode::KeyK]),
            ("attack_up", &[KeyCode::KeyI]),
            ("death", &[KeyCode::KeyX]),
        ];
        Self {
            bindings: rows
                .into_iter()
                .map(|(action, keys)| (action.to_string(), keys.to_vec()))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Fold the currently held keys into `snapshot`.
    pub fn snapshot_into(&self, keyboard: &ButtonInput<KeyCode>, snapshot: &mut ActionSnapshot) {
        snapshot.clear();
        for (action, keys) in &self.bindings {
            if keyboard.any_pressed(keys.iter().copied()) {
                snapshot.press(action);
            }
        }
    }
}

#[span_fn]
fn poll_actions(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<KeyBindings>,
    mut snapshot: ResMut<ActionSnapshot>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    bindings.snapshot_into(&keyboard, &mut snapshot);
}

//! Ordered action → (animation, direction vector, facing) table.

use bevy::prelude::*;

use super::ActionSource;
use super::animation::{PlayerAnimation, Pose};
use crate::components::Direction;

/// How a binding affects the player, derived from its action name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// `move_*`: face and walk.
    Move,
    /// `face_*`: face without moving.
    Face,
    /// `attack_*`: attack toward the current facing.
    Attack,
    /// `death`
    Death,
}

impl ActionKind {
    pub fn from_action(action: &str) -> Option<Self> {
        if action == "death" {
            Some(ActionKind::Death)
        } else if action.starts_with("move_") {
            Some(ActionKind::Move)
        } else if action.starts_with("face_") {
            Some(ActionKind::Face)
        } else if action.starts_with("attack_") {
            Some(ActionKind::Attack)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub action: String,
    pub kind: ActionKind,
    pub animation: PlayerAnimation,
    pub vector: Vec2,
    pub direction: Direction,
}

/// Immutable once built. First match in table order wins.
#[derive(Debug, Clone, PartialEq)]
pub struct InputMap {
    bindings: Vec<Binding>,
}

impl InputMap {
    /// Build from `(action, animation, direction)` rows. Rows whose action
    /// name has no recognised prefix are dropped.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = (&'a str, PlayerAnimation, Direction)>,
    ) -> Self {
        let bindings = rows
            .into_iter()
            .filter_map(|(action, animation, direction)| {
                let kind = ActionKind::from_action(action)?;
                let vector = match kind {
                    ActionKind::Move => direction.unit(),
                    _ => Vec2::ZERO,
                };
                Some(Binding {
                    action: action.to_string(),
                    kind,
                    animation,
                    vector,
                    direction,
                })
            })
            .collect();
        Self { bindings }
    }

    /// The player's table: right, left, down, up, then facing, attacks, death.
    pub fn player() -> Self {
        const ORDER: [Direction; 4] = [
            Direction::Right,
            Direction::Left,
            Direction::Down,
            Direction::Up,
        ];

        let mut rows: Vec<(String, PlayerAnimation, Direction)> = Vec::new();
        for (prefix, pose) in [("move", Pose::Walk), ("face", Pose::Idle), ("attack", Pose::Attack)] {
            for dir in ORDER {
                rows.push((
                    format!("{}_{}", prefix, dir.name()),
                    PlayerAnimation::for_pose(pose, dir),
                    dir,
                ));
            }
        }
        rows.push(("death".to_string(), PlayerAnimation::Death, Direction::Down));

        Self::from_rows(rows.iter().map(|(a, anim, dir)| (a.as_str(), *anim, *dir)))
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn get(&self, action: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.action == action)
    }

    /// First binding whose action is currently held.
    pub fn first_active(&self, actions: &impl ActionSource) -> Option<&Binding> {
        self.bindings.iter().find(|b| actions.is_active(&b.action))
    }

    /// Animation of the `<prefix>_<direction>` binding, if the table has one.
    pub fn animation_for(&self, prefix: &str, direction: Direction) -> Option<PlayerAnimation> {
        self.get(&format!("{}_{}", prefix, direction.name()))
            .map(|b| b.animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ActionSnapshot;

    #[test]
    fn player_table_order_is_fixed() {
        let map = InputMap::player();
        let actions: Vec<&str> = map.bindings().iter().map(|b| b.action.as_str()).collect();
        assert_eq!(
            actions,
            vec![
                "move_right",
                "move_left",
                "move_down",
                "move_up",
                "face_right",
                "face_left",
                "face_down",
                "face_up",
                "attack_right",
                "attack_left",
                "attack_down",
                "attack_up",
                "death",
            ]
        );
    }

    #[test]
    fn kinds_follow_prefixes() {
        assert_eq!(ActionKind::from_action("move_up"), Some(ActionKind::Move));
        assert_eq!(ActionKind::from_action("face_left"), Some(ActionKind::Face));
        assert_eq!(ActionKind::from_action("attack_down"), Some(ActionKind::Attack));
        assert_eq!(ActionKind::from_action("death"), Some(ActionKind::Death));
        assert_eq!(ActionKind::from_action("jump"), None);
    }

    #[test]
    fn only_move_bindings_carry_a_vector() {
        let map = InputMap::player();
        for binding in map.bindings() {
            if binding.kind == ActionKind::Move {
                assert_eq!(binding.vector, binding.direction.unit());
            } else {
                assert_eq!(binding.vector, Vec2::ZERO);
            }
        }
    }

    #[test]
    fn unknown_rows_are_dropped() {
        let map = InputMap::from_rows([
            ("jump", PlayerAnimation::Walk, Direction::Up),
            ("move_up", PlayerAnimation::BackWalk, Direction::Up),
        ]);
        assert_eq!(map.bindings().len(), 1);
        assert!(map.get("jump").is_none());
    }

    #[test]
    fn first_active_prefers_table_order() {
        let map = InputMap::player();
        let held: ActionSnapshot = ["move_left", "move_right"].into_iter().collect();
        let binding = map.first_active(&held).unwrap();
        assert_eq!(binding.action, "move_right");
    }

    #[test]
    fn animation_lookup_by_prefix() {
        let map = InputMap::player();
        assert_eq!(
            map.animation_for("attack", Direction::Up),
            Some(PlayerAnimation::BackAttack)
        );
        assert_eq!(
            map.animation_for("face", Direction::Left),
            Some(PlayerAnimation::SideIdle)
        );
        assert_eq!(map.animation_for("dance", Direction::Left), None);
    }
}

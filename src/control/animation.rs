//! Named animation clips for each entity kind.
//!
//! Clip names match the keys in the sprite sheet JSON sidecars.

use crate::components::Direction;

/// What the entity is doing, independent of which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Walk,
    Attack,
}

/// A playable clip.
pub trait Clip: Copy {
    fn clip(&self) -> &'static str;

    /// Idle and walk cycles loop; one-shot clips hold their last frame.
    fn looping(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAnimation {
    BackAttack,
    BackIdle,
    BackWalk,
    Death,
    FrontAttack,
    FrontIdle,
    FrontWalk,
    SideAttack,
    SideIdle,
    SideWalk,
    Walk,
}

impl PlayerAnimation {
    pub fn for_pose(pose: Pose, direction: Direction) -> Self {
        match (pose, direction) {
            (Pose::Idle, Direction::Up) => PlayerAnimation::BackIdle,
            (Pose::Idle, Direction::Down) => PlayerAnimation::FrontIdle,
            (Pose::Idle, _) => PlayerAnimation::SideIdle,
            (Pose::Walk, Direction::Up) => PlayerAnimation::BackWalk,
            (Pose::Walk, Direction::Down) => PlayerAnimation::FrontWalk,
            (Pose::Walk, _) => PlayerAnimation::SideWalk,
            (Pose::Attack, Direction::Up) => PlayerAnimation::BackAttack,
            (Pose::Attack, Direction::Down) => PlayerAnimation::FrontAttack,
            (Pose::Attack, _) => PlayerAnimation::SideAttack,
        }
    }
}

impl Clip for PlayerAnimation {
    fn clip(&self) -> &'static str {
        match self {
            PlayerAnimation::BackAttack => "back_attack",
            PlayerAnimation::BackIdle => "back_idle",
            PlayerAnimation::BackWalk => "back_walk",
            PlayerAnimation::Death => "death",
            PlayerAnimation::FrontAttack => "front_attack",
            PlayerAnimation::FrontIdle => "front_idle",
            PlayerAnimation::FrontWalk => "front_walk",
            PlayerAnimation::SideAttack => "side_attack",
            PlayerAnimation::SideIdle => "side_idle",
            PlayerAnimation::SideWalk => "side_walk",
            PlayerAnimation::Walk => "walk",
        }
    }

    fn looping(&self) -> bool {
        !matches!(
            self,
            PlayerAnimation::BackAttack
                | PlayerAnimation::FrontAttack
                | PlayerAnimation::SideAttack
                | PlayerAnimation::Death
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlimeAnimation {
    BackIdle,
    BackWalk,
    Death,
    FrontIdle,
    FrontWalk,
    SideIdle,
    SideWalk,
}

impl SlimeAnimation {
    /// Slimes have no attack clips, so `Pose::Attack` is a miss.
    pub fn for_pose(pose: Pose, direction: Direction) -> Option<Self> {
        let animation = match (pose, direction) {
            (Pose::Idle, Direction::Up) => SlimeAnimation::BackIdle,
            (Pose::Idle, Direction::Down) => SlimeAnimation::FrontIdle,
            (Pose::Idle, _) => SlimeAnimation::SideIdle,
            (Pose::Walk, Direction::Up) => SlimeAnimation::BackWalk,
            (Pose::Walk, Direction::Down) => SlimeAnimation::FrontWalk,
            (Pose::Walk, _) => SlimeAnimation::SideWalk,
            (Pose::Attack, _) => return None,
        };
        Some(animation)
    }
}

impl Clip for SlimeAnimation {
    fn clip(&self) -> &'static str {
        match self {
            SlimeAnimation::BackIdle => "back_idle",
            SlimeAnimation::BackWalk => "back_walk",
            SlimeAnimation::Death => "death",
            SlimeAnimation::FrontIdle => "front_idle",
            SlimeAnimation::FrontWalk => "front_walk",
            SlimeAnimation::SideIdle => "side_idle",
            SlimeAnimation::SideWalk => "side_walk",
        }
    }

    fn looping(&self) -> bool {
        !matches!(self, SlimeAnimation::Death)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_directions_share_side_clips() {
        assert_eq!(
            PlayerAnimation::for_pose(Pose::Walk, Direction::Left),
            PlayerAnimation::for_pose(Pose::Walk, Direction::Right),
        );
        assert_eq!(
            SlimeAnimation::for_pose(Pose::Idle, Direction::Left),
            Some(SlimeAnimation::SideIdle),
        );
    }

    #[test]
    fn slime_has_no_attack_pose() {
        assert_eq!(SlimeAnimation::for_pose(Pose::Attack, Direction::Down), None);
    }

    #[test]
    fn one_shot_clips_do_not_loop() {
        assert!(!PlayerAnimation::SideAttack.looping());
        assert!(!PlayerAnimation::Death.looping());
        assert!(PlayerAnimation::FrontWalk.looping());
        assert!(!SlimeAnimation::Death.looping());
    }

    #[test]
    fn clip_names() {
        assert_eq!(PlayerAnimation::BackWalk.clip(), "back_walk");
        assert_eq!(PlayerAnimation::Walk.clip(), "walk");
        assert_eq!(SlimeAnimation::FrontIdle.clip(), "front_idle");
    }
}

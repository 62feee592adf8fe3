//! Sprite sheet loading and clip playback for the player and slimes.
//!
//! Each character has a PNG sprite sheet and a JSON metadata sidecar naming
//! its clips (`front_idle`, `side_walk`, ...). Controllers only choose which
//! clip plays and whether it is mirrored; this plugin turns that into atlas
//! frames.

use bevy::prelude::*;
use micromegas_tracing::prelude::*;
use std::collections::HashMap;

use crate::control::{AnimationChange, Clip};

/// Seconds each frame stays on screen.
pub const FRAME_SECONDS: f32 = 0.12;

/// Plugin that registers sprite loading and animation systems.
pub struct SpriteSheetPlugin;

impl Plugin for SpriteSheetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteSheetLibrary>().add_systems(
            Update,
            (restart_changed_animations, animate_sprites).chain(),
        );
    }
}

// ---------------------------------------------------------------------------
// JSON metadata
// ---------------------------------------------------------------------------

/// Deserialized from the JSON sidecar next to each sprite sheet PNG.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SpriteSheetMeta {
    pub frame_size: [u32; 2],
    pub columns: u32,
    pub rows: u32,
    pub animations: HashMap<String, AnimationRange>,
}

/// A contiguous range of frames in the sprite sheet.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct AnimationRange {
    pub start: usize,
    pub count: usize,
}

impl AnimationRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.start + self.count
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Loaded sheets, keyed by character name ("player", "slime").
#[derive(Resource, Default)]
pub struct SpriteSheetLibrary {
    pub sheets: HashMap<String, CharacterSheet>,
}

#[derive(Debug, Clone)]
pub struct CharacterSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub meta: SpriteSheetMeta,
}

impl SpriteSheetLibrary {
    /// Register an already-loading image together with its JSON sidecar
    /// (`assets/sprites/<name>.json`).
    pub fn register(
        &mut self,
        name: &str,
        image: Handle<Image>,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) -> Result<(), String> {
        let json_path = std::path::Path::new("assets/sprites").join(format!("{name}.json"));
        let json_str = std::fs::read_to_string(&json_path)
            .map_err(|e| format!("Failed to read {}: {}", json_path.display(), e))?;
        let meta: SpriteSheetMeta = serde_json::from_str(&json_str)
            .map_err(|e| format!("Failed to parse {}: {}", json_path.display(), e))?;

        let layout = TextureAtlasLayout::from_grid(
            UVec2::new(meta.frame_size[0], meta.frame_size[1]),
            meta.columns,
            meta.rows,
            None,
            None,
        );
        let layout = layouts.add(layout);

        self.sheets.insert(
            name.to_string(),
            CharacterSheet {
                image,
                layout,
                meta,
            },
        );
        Ok(())
    }

    /// Sprite showing the first frame of `clip`, if the sheet is loaded.
    pub fn sprite(&self, name: &str, clip: &str, size: Vec2) -> Option<Sprite> {
        let sheet = self.sheets.get(name)?;
        let start = sheet.meta.animations.get(clip).map(|r| r.start).unwrap_or(0);
        Some(Sprite {
            image: sheet.image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: sheet.layout.clone(),
                index: start,
            }),
            custom_size: Some(size),
            ..default()
        })
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// The clip an entity should be showing.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Key into `SpriteSheetMeta.animations`.
    pub current: String,
    pub looping: bool,
    /// Set once a non-looping clip has played through.
    pub finished: bool,
    pub flip_x: bool,
}

impl AnimationState {
    pub fn new(clip: impl Clip) -> Self {
        Self {
            current: clip.clip().to_string(),
            looping: clip.looping(),
            finished: false,
            flip_x: false,
        }
    }

    /// Apply one tick's animation decision. `Keep` leaves the clip alone but
    /// the mirror flag still follows the facing.
    pub fn apply<A: Clip>(&mut self, change: AnimationChange<A>, flip_x: bool) {
        if let AnimationChange::Play(clip) = change
            && self.current != clip.clip()
        {
            self.current = clip.clip().to_string();
            self.looping = clip.looping();
            self.finished = false;
        }
        self.flip_x = flip_x;
    }
}

/// Timer that controls animation frame rate.
#[derive(Component, Deref, DerefMut)]
pub struct AnimationTimer(pub Timer);

impl Default for AnimationTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(FRAME_SECONDS, TimerMode::Repeating))
    }
}

/// Which character sheet this entity uses (key into `SpriteSheetLibrary`).
#[derive(Component)]
pub struct CharacterSheetRef(pub String);

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Jump to the first frame when the clip changed and copy the mirror flag.
#[span_fn]
fn restart_changed_animations(
    library: Res<SpriteSheetLibrary>,
    mut query: Query<(&CharacterSheetRef, &AnimationState, &mut Sprite), Changed<AnimationState>>,
) {
    for (sheet_ref, anim_state, mut sprite) in &mut query {
        sprite.flip_x = anim_state.flip_x;

        let Some(sheet) = library.sheets.get(&sheet_ref.0) else {
            continue;
        };
        let Some(range) = sheet.meta.animations.get(&anim_state.current) else {
            continue;
        };
        if let Some(atlas) = &mut sprite.texture_atlas
            && !range.contains(atlas.index)
        {
            atlas.index = range.start;
        }
    }
}

/// Advances sprite animation frames based on timer and current state.
#[span_fn]
fn animate_sprites(
    time: Res<Time>,
    library: Res<SpriteSheetLibrary>,
    mut query: Query<(
        &CharacterSheetRef,
        &mut AnimationState,
        &mut AnimationTimer,
        &mut Sprite,
    )>,
) {
    for (sheet_ref, mut anim_state, mut timer, mut sprite) in &mut query {
        if anim_state.finished {
            continue;
        }

        timer.tick(time.delta());
        if !timer.just_finished() {
            continue;
        }

        let Some(sheet) = library.sheets.get(&sheet_ref.0) else {
            continue;
        };
        let Some(range) = sheet.meta.animations.get(&anim_state.current) else {
            continue;
        };
        let Some(atlas) = &mut sprite.texture_atlas else {
            continue;
        };

        let next_offset = atlas.index.saturating_sub(range.start) + 1;
        if next_offset >= range.count {
            if anim_state.looping {
                atlas.index = range.start;
            } else {
                anim_state.finished = true;
            }
        } else {
            atlas.index = range.start + next_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{PlayerAnimation, SlimeAnimation};
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    const SHEET_JSON: &str = r#"{"frame_size":[48,48],"columns":6,"rows":2,
        "animations":{"front_idle":{"start":0,"count":2},
                      "side_walk":{"start":4,"count":2},
                      "death":{"start":8,"count":3}}}"#;

    /// Headless app with the playback systems and one "player" sheet.
    /// Every update advances time by `step`.
    fn playback_app(step: Duration) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
        app.add_plugins(SpriteSheetPlugin);

        let meta: SpriteSheetMeta = serde_json::from_str(SHEET_JSON).unwrap();
        app.world_mut().resource_mut::<SpriteSheetLibrary>().sheets.insert(
            "player".to_string(),
            CharacterSheet {
                image: Handle::default(),
                layout: Handle::default(),
                meta,
            },
        );
        app
    }

    fn spawn_animated(app: &mut App, clip: PlayerAnimation, index: usize) -> Entity {
        app.world_mut()
            .spawn((
                CharacterSheetRef("player".to_string()),
                AnimationState::new(clip),
                AnimationTimer::default(),
                Sprite {
                    texture_atlas: Some(TextureAtlas {
                        layout: Handle::default(),
                        index,
                    }),
                    ..default()
                },
            ))
            .id()
    }

    fn atlas_index(app: &App, entity: Entity) -> usize {
        app.world()
            .get::<Sprite>(entity)
            .and_then(|s| s.texture_atlas.as_ref())
            .map(|a| a.index)
            .unwrap()
    }

    #[test]
    fn clip_change_jumps_to_first_frame_and_mirrors() {
        // Steps far shorter than a frame, so only the restart moves the index.
        let mut app = playback_app(Duration::from_millis(1));
        let entity = spawn_animated(&mut app, PlayerAnimation::FrontIdle, 1);
        app.update();
        assert_eq!(atlas_index(&app, entity), 1);

        app.world_mut()
            .get_mut::<AnimationState>(entity)
            .unwrap()
            .apply(AnimationChange::Play(PlayerAnimation::SideWalk), true);
        app.update();

        assert_eq!(atlas_index(&app, entity), 4);
        assert!(app.world().get::<Sprite>(entity).unwrap().flip_x);
    }

    #[test]
    fn looping_clip_wraps_to_its_start() {
        let mut app = playback_app(Duration::from_secs_f32(FRAME_SECONDS + 0.01));
        let entity = spawn_animated(&mut app, PlayerAnimation::SideWalk, 4);

        let mut seen = Vec::new();
        for _ in 0..6 {
            app.update();
            seen.push(atlas_index(&app, entity));
        }

        assert!(seen.iter().all(|i| (4..6).contains(i)), "left the clip: {seen:?}");
        let wrapped = seen.windows(2).any(|w| w == [5, 4]);
        assert!(wrapped, "never wrapped: {seen:?}");
        assert!(!app.world().get::<AnimationState>(entity).unwrap().finished);
    }

    #[test]
    fn one_shot_clip_holds_last_frame() {
        let mut app = playback_app(Duration::from_secs_f32(FRAME_SECONDS + 0.01));
        let entity = spawn_animated(&mut app, PlayerAnimation::Death, 8);

        for _ in 0..8 {
            app.update();
        }

        assert!(app.world().get::<AnimationState>(entity).unwrap().finished);
        assert_eq!(atlas_index(&app, entity), 10);
    }

    #[test]
    fn play_switches_clip_and_resets_finished() {
        let mut state = AnimationState::new(PlayerAnimation::SideAttack);
        state.finished = true;
        state.apply(AnimationChange::Play(PlayerAnimation::FrontWalk), false);
        assert_eq!(state.current, "front_walk");
        assert!(state.looping);
        assert!(!state.finished);
    }

    #[test]
    fn replaying_same_clip_keeps_progress() {
        let mut state = AnimationState::new(PlayerAnimation::Death);
        state.finished = true;
        state.apply(AnimationChange::Play(PlayerAnimation::Death), false);
        assert!(state.finished);
    }

    #[test]
    fn keep_only_updates_mirror() {
        let mut state = AnimationState::new(SlimeAnimation::SideWalk);
        state.apply(AnimationChange::<SlimeAnimation>::Keep, true);
        assert_eq!(state.current, "side_walk");
        assert!(state.flip_x);
    }

    #[test]
    fn metadata_parses() {
        let meta: SpriteSheetMeta = serde_json::from_str(
            r#"{"frame_size":[48,48],"columns":6,"rows":2,
                "animations":{"front_idle":{"start":0,"count":6},"side_walk":{"start":6,"count":6}}}"#,
        )
        .unwrap();
        let walk = meta.animations["side_walk"];
        assert!(walk.contains(6));
        assert!(walk.contains(11));
        assert!(!walk.contains(12));
    }
}

//! One playable area: its entities, camera, background and lifecycle.
//!
//! The owning driver calls, per frame and in this order: intent handlers
//! (`move_player`, `player_attack`, ...), `update`, `detect_collisions`,
//! `check_level_finished`, `display`.

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::error::{EngineError, EngineResult};
use crate::api::types::{Direction, EntityId, EntityKind, Movement};
use crate::assets::registry::Surface;
use crate::components::entity::Entity;
use crate::components::text::TextOverlay;
use crate::core::rect::Rect;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::level::factory;
use crate::renderer::camera::Camera;
use crate::renderer::traits::{Composite, Renderer};
use crate::systems::{ai, collision};

pub const DEATH_MESSAGE: &str = "NaCl -> Na+(aq) + Cl-(aq)";
pub const DEATH_MESSAGE_MS: f32 = 2000.0;
pub const END_OF_GAME: &str = "End Of Game";
pub const FROZEN_REMINDER: &str = "Frozen";
pub const SALT_DISSOLVING_INSTRUCTIONS: &str = "Schagel monsters are made of NaCl (aka common salt), \
to kill one, try and hit it with water it might dissolve enough to kill it";
pub const TUTORIAL_TEXT_MS: f32 = 10_000.0;

/// Horizontal speed of a thrown vial.
pub const VIAL_THROW_SPEED: f32 = 30.0;
/// Upward speed of a thrown vial.
pub const VIAL_LIFT: f32 = 12.0;

/// Why the level is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freeze {
    /// After the first attack; thaws on its own after `remaining` updates.
    Tutorial { remaining: u32 },
    /// Debug toggle; thaws only when toggled again.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    Loading,
    Active,
    Frozen(Freeze),
    /// The player is gone; the level shows its final text and stands still.
    Ending,
    Unloaded,
}

/// Artwork for entities spawned during play, resolved when the level is built
/// so spawning cannot fail on a missing resource mid-frame.
#[derive(Debug, Clone)]
pub struct Prototypes {
    pub schagel: Vec<Surface>,
    pub vial: Surface,
}

pub struct Level {
    pub name: String,
    pub id: i32,
    size: Vec2,
    scene: Scene,
    player: Option<EntityId>,
    background: Composite,
    camera: Camera,
    state: LevelState,
    kills: u32,
    kill_target: u32,
    rng: Rng,
    tutorial_freeze_frames: u32,
    first_attack: bool,
    reminder: Option<EntityId>,
    prototypes: Prototypes,
}

impl Level {
    /// An empty level in the `Loading` state.
    pub fn new(
        id: i32,
        name: impl Into<String>,
        size: Vec2,
        prototypes: Prototypes,
        config: &GameConfig,
    ) -> EngineResult<Self> {
        if !(size.x > 0.0 && size.y > 0.0) || !size.is_finite() {
            return Err(EngineError::InvalidSize {
                width: size.x,
                height: size.y,
            });
        }
        let camera_size = Vec2::new(config.camera_width, config.camera_height);
        Ok(Self {
            name: name.into(),
            id,
            size,
            scene: Scene::new(),
            player: None,
            background: Composite::new(size),
            camera: Camera::new(camera_size, size),
            state: LevelState::Loading,
            kills: 0,
            kill_target: config.kill_target,
            rng: Rng::new(config.spawn_seed),
            tutorial_freeze_frames: config.tutorial_freeze_frames,
            first_attack: true,
            reminder: None,
            prototypes,
        })
    }

    /// Finish loading: start simulating and point the camera at the player.
    pub fn activate(&mut self) {
        if self.state != LevelState::Loading {
            return;
        }
        self.state = LevelState::Active;
        self.track_player();
        log::info!("level '{}' ({}) loaded: {} entities", self.name, self.id, self.scene.len());
    }

    // -- Accessors --

    pub fn state(&self) -> LevelState {
        self.state
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.x, self.size.y)
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.scene.get(id))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.scene.get_mut(id)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn background(&self) -> &Composite {
        &self.background
    }

    pub fn next_id(&mut self) -> EntityId {
        self.scene.next_id()
    }

    // -- Component management --

    /// Add a player or monster. The first player added becomes the level's player.
    pub fn add_character(&mut self, entity: Entity) -> EntityId {
        if entity.kind == EntityKind::Player && self.player.is_none() {
            self.player = Some(entity.id);
        }
        self.scene.spawn(entity)
    }

    /// Add a vial or text overlay.
    pub fn add_component(&mut self, entity: Entity) -> EntityId {
        self.scene.spawn(entity)
    }

    /// Add static geometry. Backgrounds and grounds join the composite.
    pub fn add_world_component(&mut self, entity: Entity) -> EntityId {
        if matches!(entity.kind, EntityKind::Background | EntityKind::Ground) {
            if let Some(surface) = entity.sprite.frame(0) {
                self.background.push(surface.clone(), entity.rect);
            }
        }
        self.scene.spawn(entity)
    }

    /// Show a text overlay unless the same content is already shown.
    pub fn add_text(&mut self, pos: Vec2, size: Vec2, overlay: TextOverlay) -> Option<EntityId> {
        let shown = self
            .scene
            .dynamic_components()
            .any(|e| e.text.as_ref().is_some_and(|t| t.content == overlay.content));
        if shown {
            log::debug!("text already shown: {:?}", overlay.content);
            return None;
        }
        let id = self.scene.next_id();
        match factory::text(id, pos, size, overlay) {
            Ok(entity) => Some(self.scene.spawn(entity)),
            Err(e) => {
                log::warn!("text not added: {}", e);
                None
            }
        }
    }

    /// The single removal routine. Keeps the kill counter and player
    /// reference in step with the scene.
    fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let Some(entity) = self.scene.despawn(id) else {
            log::warn!("level '{}': no component {:?} to remove", self.name, id);
            return None;
        };
        if entity.kind.is_monster() {
            self.kills += 1;
        }
        if self.player == Some(id) {
            log::info!("player removed from level '{}'", self.name);
            self.player = None;
        }
        Some(entity)
    }

    pub fn del_character(&mut self, id: EntityId) -> bool {
        self.remove(id).is_some()
    }

    pub fn del_component(&mut self, id: EntityId) -> bool {
        self.remove(id).is_some()
    }

    /// Drop everything that died, expired or was used up.
    fn reap(&mut self) {
        for id in self.scene.ids_where(Entity::should_despawn) {
            let Some(entity) = self.remove(id) else {
                continue;
            };
            if entity.kind.is_monster() && !entity.is_alive() {
                self.death_message(entity.rect.top_left());
            }
        }
    }

    fn death_message(&mut self, at: Vec2) {
        let overlay = TextOverlay::timed(DEATH_MESSAGE, 20, DEATH_MESSAGE_MS).with_rise(1.0);
        self.add_text(at, Vec2::new(200.0, 100.0), overlay);
    }

    // -- Frame phases --

    /// Advance every dynamic entity by `elapsed_ms` and recenter the camera.
    /// Collisions are a separate phase.
    pub fn update(&mut self, elapsed_ms: f32) {
        match self.state {
            LevelState::Loading | LevelState::Ending | LevelState::Unloaded => return,
            LevelState::Active if self.player.is_none() => {
                self.end();
                return;
            }
            LevelState::Active => {}
            LevelState::Frozen(Freeze::Tutorial { remaining }) if remaining == 0 => self.thaw(),
            LevelState::Frozen(Freeze::Tutorial { remaining }) => {
                self.state = LevelState::Frozen(Freeze::Tutorial {
                    remaining: remaining - 1,
                });
                self.show_reminder();
                return;
            }
            LevelState::Frozen(Freeze::Manual) => {
                self.show_reminder();
                return;
            }
        }

        self.spawn_opposition();

        for id in self.scene.ids_where(|e| e.kind.is_character()) {
            let enemy = self.player_entity().map(|p| p.rect);
            if let Some(character) = self.scene.get_mut(id) {
                character.update(elapsed_ms);
                ai::think(character, enemy.as_ref());
            }
        }
        for id in self.scene.ids_where(|e| e.kind.is_dynamic_component()) {
            if let Some(component) = self.scene.get_mut(id) {
                component.update(elapsed_ms);
            }
        }

        self.reap();
        self.track_player();
    }

    /// Run the collision passes in order, then reap casualties.
    pub fn detect_collisions(&mut self) {
        if self.state != LevelState::Active {
            return;
        }
        let bounds = self.bounds();
        for id in collision::out_of_bounds(&mut self.scene, &bounds) {
            log::debug!("{:?} left level '{}'", id, self.name);
            self.del_character(id);
        }
        collision::character_pass(&mut self.scene);
        collision::ground_pass(&mut self.scene);
        collision::projectile_pass(&mut self.scene);
        self.reap();
    }

    /// Keep one opponent around while the player lives.
    fn spawn_opposition(&mut self) {
        if self.player.is_none() || self.scene.characters().count() > 1 {
            return;
        }
        let width = self
            .prototypes
            .schagel
            .first()
            .map(|s| s.width)
            .unwrap_or(0.0);
        let x = self.rng.range_f32(0.0, (self.size.x - width).max(0.0));
        let id = self.scene.next_id();
        match factory::schagel(id, Vec2::new(x, 0.0), self.prototypes.schagel.clone()) {
            Ok(monster) => {
                self.add_character(monster);
            }
            Err(e) => log::error!("could not spawn schagel: {}", e),
        }
    }

    fn track_player(&mut self) {
        if let Some(rect) = self.player_entity().map(|p| p.rect) {
            self.camera.update(&rect);
        }
    }

    /// Kill target reached.
    pub fn check_level_finished(&self) -> bool {
        self.kills >= self.kill_target
    }

    // -- Player control --

    pub fn move_player(&mut self, movement: Movement) {
        if let Some(player) = self.player.and_then(|id| self.scene.get_mut(id)) {
            player.move_towards(movement);
        }
    }

    pub fn stop_player(&mut self, movement: Movement) {
        if let Some(player) = self.player.and_then(|id| self.scene.get_mut(id)) {
            player.stop_move(movement);
        }
    }

    /// Throw a vial toward a screen-space point. The first attack also
    /// shows the tutorial and freezes the level for a while.
    pub fn player_attack(&mut self, screen_point: Vec2) {
        let Some(player_id) = self.player else {
            return;
        };
        if matches!(self.state, LevelState::Ending | LevelState::Unloaded) {
            return;
        }
        let target = self.camera.screen_to_world(screen_point);

        if self.first_attack {
            self.first_attack = false;
            self.show_tutorial();
            self.state = LevelState::Frozen(Freeze::Tutorial {
                remaining: self.tutorial_freeze_frames,
            });
        }

        let Some(player) = self.scene.get_mut(player_id) else {
            return;
        };
        let loaded = player
            .character
            .as_mut()
            .and_then(|c| c.weapon.as_mut())
            .is_some_and(|w| w.load());
        if !loaded {
            log::info!("attack at {:?}: out of ammo", target);
            return;
        }
        let center = player.center();
        let direction = if target.x > center.x {
            Direction::Right
        } else {
            Direction::Left
        };

        let id = self.scene.next_id();
        let mut vial = factory::vial(id, center, self.prototypes.vial.clone());
        vial.throw(direction, VIAL_THROW_SPEED, VIAL_LIFT);
        self.add_component(vial);
        log::debug!("attack at {:?}, vial thrown {:?}", target, direction);
    }

    fn show_tutorial(&mut self) {
        let Some(anchor) = self.player_entity().map(|p| p.rect.top_left()) else {
            return;
        };
        let (first, second) = split_sentence(SALT_DISSOLVING_INSTRUCTIONS);
        let size = Vec2::new(200.0, 50.0);
        self.add_text(anchor - Vec2::new(0.0, 30.0), size, TextOverlay::timed(first, 22, TUTORIAL_TEXT_MS));
        self.add_text(anchor - Vec2::new(0.0, 10.0), size, TextOverlay::timed(second, 22, TUTORIAL_TEXT_MS));
    }

    // -- Freezing --

    /// Debug freeze: freeze an active level, thaw a frozen one.
    pub fn toggle_freeze(&mut self) {
        match self.state {
            LevelState::Active => {
                self.state = LevelState::Frozen(Freeze::Manual);
                log::info!("level '{}' frozen", self.name);
            }
            LevelState::Frozen(_) => self.thaw(),
            _ => {}
        }
    }

    pub fn is_frozen(&self) -> bool {
        matches!(self.state, LevelState::Frozen(_) | LevelState::Ending)
    }

    fn thaw(&mut self) {
        self.state = LevelState::Active;
        if let Some(id) = self.reminder.take() {
            self.del_component(id);
        }
        log::info!("level '{}' thawed", self.name);
    }

    fn show_reminder(&mut self) {
        if self.reminder.is_some_and(|id| self.scene.contains(id)) {
            return;
        }
        let pos = self.camera.position + Vec2::new(20.0, 20.0);
        self.reminder = self.add_text(pos, Vec2::new(100.0, 30.0), TextOverlay::permanent(FROZEN_REMINDER, 24));
    }

    /// The player is gone: stop and say so.
    fn end(&mut self) {
        self.state = LevelState::Ending;
        let size = Vec2::new(100.0, 50.0);
        let pos = self.size / 2.0 - size / 2.0;
        self.add_text(pos, size, TextOverlay::permanent(END_OF_GAME, 30));
        log::info!("level '{}' ended after {} kills", self.name, self.kills);
    }

    // -- Display --

    /// Draw the background composite, then every visible entity, back to front.
    pub fn display(&self, renderer: &mut dyn Renderer) {
        let viewport = self.camera.viewport();
        self.background.display(&viewport, renderer);

        let layers: [fn(&Entity) -> bool; 4] = [
            |e| matches!(e.kind, EntityKind::BuildingBlock | EntityKind::Portal),
            |e| e.kind.is_character(),
            |e| e.kind.is_dynamic_component(),
            |e| e.kind == EntityKind::Foreground,
        ];
        for layer in layers {
            for entity in self.scene.iter().filter(|e| layer(e)) {
                self.display_entity(entity, &viewport, renderer);
            }
        }
    }

    fn display_entity(&self, entity: &Entity, viewport: &Rect, renderer: &mut dyn Renderer) {
        if !entity.sprite.visible || !viewport.touches(&entity.rect) {
            return;
        }
        let dest = entity.rect.relative_to(viewport.top_left());
        if let Some(text) = &entity.text {
            renderer.draw_text(&text.content, text.font_size, dest);
        } else if let Some(surface) = entity.sprite.frame(entity.frame_index()) {
            renderer.blit(surface, dest, entity.sprite.flipped);
        }
    }

    /// Tear down: release every entity. The level no longer simulates.
    pub fn unload(&mut self) {
        self.scene.clear();
        self.player = None;
        self.reminder = None;
        self.state = LevelState::Unloaded;
    }
}

impl Drop for Level {
    fn drop(&mut self) {
        log::info!("level '{}' unloaded", self.name);
    }
}

/// Split a sentence in two lines near its middle, on a char boundary.
fn split_sentence(text: &str) -> (&str, &str) {
    let middle = text.chars().count() / 2 + 2;
    let at = text
        .char_indices()
        .nth(middle)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(at)
}

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::error::{EngineError, EngineResult};
use crate::api::types::EntityKind;
use crate::assets::registry::ResourceTable;
use crate::components::entity::Entity;
use crate::components::sprite::SpriteComponent;
use crate::components::text::TextOverlay;
use crate::core::rect::Rect;
use crate::level::factory;
use crate::level::world::{Level, Prototypes};

pub const MOVEMENT_INSTRUCTIONS: &str =
    "You can move around with 'wasd', jump with 'space', and attack with 'mouse button'";

/// Where the player enters every level.
pub const PLAYER_START: Vec2 = Vec2::new(50.0, 50.0);
/// Top of the forest ground strips.
pub const FOREST_GROUND_Y: f32 = 500.0;

struct LevelPlan {
    name: &'static str,
    /// None takes the size of the background artwork.
    size: Option<Vec2>,
    grounds: &'static [(&'static str, f32)],
    instructions_ms: f32,
}

fn plan(id: i32) -> EngineResult<LevelPlan> {
    const FOREST_GROUNDS: &[(&str, f32)] = &[("forest_ground01", 0.0), ("forest_ground02", 850.0)];
    match id {
        // testing
        -1 => Ok(LevelPlan {
            name: "forest",
            size: Some(Vec2::new(1920.0, 1080.0)),
            grounds: FOREST_GROUNDS,
            instructions_ms: 1_000.0,
        }),
        0 => Ok(LevelPlan {
            name: "forest",
            size: None,
            grounds: FOREST_GROUNDS,
            instructions_ms: 10_000.0,
        }),
        other => Err(EngineError::UnimplementedLevel(other)),
    }
}

/// Build a ready-to-play level. Unknown ids and missing artwork fail fast.
pub fn build_level(id: i32, resources: &ResourceTable, config: &GameConfig) -> EngineResult<Level> {
    let plan = plan(id)?;

    let background = resources.require(&format!("{}_background", plan.name))?.clone();
    let size = plan.size.unwrap_or_else(|| background.size());
    let prototypes = Prototypes {
        schagel: resources.frames("schagel")?,
        vial: resources.require("erlemeyer1")?.clone(),
    };
    let mut level = Level::new(id, plan.name, size, prototypes, config)?;

    // stretched over the level, and at least over the camera
    let camera = Vec2::new(config.camera_width, config.camera_height);
    let id = level.next_id();
    let backdrop = Entity::new(
        id,
        EntityKind::Background,
        Rect::try_new(Vec2::ZERO, size.max(camera))?,
        SpriteComponent::single(background),
    );
    level.add_world_component(backdrop);

    for &(name, x) in plan.grounds {
        let surface = resources.require(name)?.clone();
        let id = level.next_id();
        let ground = factory::scenery(id, EntityKind::Ground, Vec2::new(x, FOREST_GROUND_Y), surface)?;
        level.add_world_component(ground);
    }

    let id = level.next_id();
    let player = factory::player(id, PLAYER_START, resources.frames("player")?)?;
    level.add_character(player);

    level.add_text(
        Vec2::new(100.0, 100.0),
        Vec2::new(300.0, 100.0),
        TextOverlay::timed(MOVEMENT_INSTRUCTIONS, 20, plan.instructions_ms),
    );

    level.activate();
    Ok(level)
}

//! Entity constructors. Sizes come from the artwork unless stated.

use glam::Vec2;

use crate::api::error::{EngineError, EngineResult};
use crate::api::types::{Direction, EntityId, EntityKind, MonsterKind};
use crate::assets::registry::Surface;
use crate::components::animation::WalkCycle;
use crate::components::character::{CharacterState, Weapon};
use crate::components::entity::Entity;
use crate::components::sprite::SpriteComponent;
use crate::components::text::TextOverlay;
use crate::core::physics::{PhysicsParams, PhysicsState};
use crate::core::rect::Rect;

/// Vials are drawn at a fixed size whatever the artwork.
pub const VIAL_SIZE: Vec2 = Vec2::new(14.0, 14.0);

fn sized_like(pos: Vec2, frames: &[Surface]) -> EngineResult<Rect> {
    let first = frames
        .first()
        .ok_or_else(|| EngineError::MissingResource("walk frames".into()))?;
    Rect::try_new(pos, first.size())
}

fn character(
    id: EntityId,
    kind: EntityKind,
    pos: Vec2,
    frames: Vec<Surface>,
    params: PhysicsParams,
    facing: Direction,
    state: CharacterState,
) -> EngineResult<Entity> {
    let rect = sized_like(pos, &frames)?;
    let walk = WalkCycle::new(frames.len());
    Ok(Entity::new(id, kind, rect, SpriteComponent::animated(frames, facing))
        .with_physics(PhysicsState::new(params, facing))
        .with_character(state)
        .with_walk(walk))
}

/// The player, facing right, armed with a full weapon.
pub fn player(id: EntityId, pos: Vec2, frames: Vec<Surface>) -> EngineResult<Entity> {
    character(
        id,
        EntityKind::Player,
        pos,
        frames,
        PhysicsParams::PLAYER,
        Direction::Right,
        CharacterState::new().with_weapon(Weapon::default()),
    )
}

/// A Schagel. Its artwork faces left.
pub fn schagel(id: EntityId, pos: Vec2, frames: Vec<Surface>) -> EngineResult<Entity> {
    character(
        id,
        EntityKind::Monster(MonsterKind::Schagel),
        pos,
        frames,
        PhysicsParams::MONSTER,
        Direction::Left,
        CharacterState::new(),
    )
}

/// A vial centered on `center`, not yet thrown.
pub fn vial(id: EntityId, center: Vec2, surface: Surface) -> Entity {
    let rect = Rect::new(
        center.x - VIAL_SIZE.x / 2.0,
        center.y - VIAL_SIZE.y / 2.0,
        VIAL_SIZE.x,
        VIAL_SIZE.y,
    );
    Entity::new(id, EntityKind::Vial, rect, SpriteComponent::single(surface))
        .with_physics(PhysicsState::new(PhysicsParams::VIAL, Direction::Right))
}

/// Immovable level geometry placed at `pos`, sized like its surface.
pub fn scenery(id: EntityId, kind: EntityKind, pos: Vec2, surface: Surface) -> EngineResult<Entity> {
    let rect = Rect::try_new(pos, surface.size())?;
    Ok(Entity::new(id, kind, rect, SpriteComponent::single(surface)))
}

pub fn text(id: EntityId, pos: Vec2, size: Vec2, overlay: TextOverlay) -> EngineResult<Entity> {
    let rect = Rect::try_new(pos, size)?;
    Ok(Entity::new(id, EntityKind::Text, rect, SpriteComponent::empty()).with_text(overlay))
}

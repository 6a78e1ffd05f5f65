//! Collision passes and the response table.
//!
//! Rect overlap is the only primitive; there is no swept test, so a fast
//! vial can tunnel through thin geometry. Responses are keyed on the pair
//! of entity kinds and always read the other party through a `Contact`
//! snapshot, so both sides of a pair can be mutated in turn.

use crate::api::types::{Direction, EntityId, EntityKind};
use crate::components::character::{CONTACT_DAMAGE, VIAL_DAMAGE};
use crate::components::entity::Entity;
use crate::core::physics::{GroundRef, CONTACT_MARGIN};
use crate::core::rect::Rect;
use crate::core::scene::Scene;

/// What a collision response may know about the other party.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub kind: EntityKind,
    pub rect: Rect,
}

impl Contact {
    pub fn of(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            rect: entity.rect,
        }
    }
}

/// React to touching `other`.
pub fn respond(entity: &mut Entity, other: &Contact) {
    use EntityKind::*;
    match (entity.kind, other.kind) {
        (me, Ground) if me.is_character() => ground_contact(entity, other),
        (me, BuildingBlock) if me.is_character() => {
            log::debug!("{} touched building block {:?}; not resolved", me.name(), other.id);
        }
        (Player, Monster(_)) => {
            let hit = entity
                .character
                .as_mut()
                .is_some_and(|c| c.take_contact_hit(CONTACT_DAMAGE));
            if hit {
                entity.knock_back(away_from(&entity.rect, &other.rect));
            }
        }
        (Monster(_), Player) => {
            if let Some(physics) = entity.physics.as_mut() {
                physics.x_accel /= 2.0;
            }
        }
        (Monster(_), Vial) => {
            if let Some(character) = entity.character.as_mut() {
                character.take_damage(VIAL_DAMAGE);
            }
        }
        (Vial, Monster(_) | Ground | BuildingBlock) => entity.spent = true,
        _ => {}
    }
}

/// Direction pointing from `other`'s center toward `me`'s center.
/// Coincident centers push to the right.
fn away_from(me: &Rect, other: &Rect) -> Direction {
    Direction::of(me.center_x() - other.center_x()).unwrap_or(Direction::Right)
}

/// Stand on the ground when above it, otherwise treat it as a wall.
fn ground_contact(entity: &mut Entity, ground: &Contact) {
    let cx = entity.rect.center_x();
    if ground.rect.left() < cx && cx < ground.rect.right() {
        entity.set_ground(GroundRef {
            id: ground.id,
            rect: ground.rect,
        });
        return;
    }
    let Some(physics) = entity.physics.as_mut() else {
        return;
    };
    if cx <= ground.rect.left() {
        // wall on our right
        physics.x_accel = physics.x_accel.min(0.0);
        physics.x_speed = physics.x_speed.min(0.0);
    } else {
        physics.x_accel = physics.x_accel.max(0.0);
        physics.x_speed = physics.x_speed.max(0.0);
    }
}

/// Every unordered pair of strictly overlapping rects, each visited once.
pub fn overlapping_pairs(bodies: &[(EntityId, Rect)]) -> Vec<(EntityId, EntityId)> {
    let mut pairs = Vec::new();
    let mut rest = bodies;
    while let Some(((id, rect), tail)) = rest.split_first() {
        for (other_id, other_rect) in tail {
            if rect.intersects(other_rect) {
                pairs.push((*id, *other_id));
            }
        }
        rest = tail;
    }
    pairs
}

/// Run `respond` on `id` if it still exists.
fn respond_by_id(scene: &mut Scene, id: EntityId, other: &Contact) {
    if let Some(entity) = scene.get_mut(id) {
        respond(entity, other);
    }
}

/// Pass 1: clamp characters horizontally into the world and collect those
/// that left `bounds` entirely. Vials that left are marked spent.
pub fn out_of_bounds(scene: &mut Scene, bounds: &Rect) -> Vec<EntityId> {
    let mut gone = Vec::new();
    for entity in scene.iter_mut() {
        if entity.kind.is_character() {
            if !bounds.intersects(&entity.rect) {
                gone.push(entity.id);
                continue;
            }
            if entity.rect.left() < bounds.left() {
                entity.rect.set_left(bounds.left());
            } else if entity.rect.right() > bounds.right() {
                entity.rect.set_right(bounds.right());
            }
        } else if entity.kind == EntityKind::Vial && !bounds.intersects(&entity.rect) {
            entity.spent = true;
        }
    }
    gone
}

/// Pass 2: characters against each other. Returns the pairs that touched.
pub fn character_pass(scene: &mut Scene) -> Vec<(EntityId, EntityId)> {
    let bodies: Vec<(EntityId, Rect)> = scene.characters().map(|e| (e.id, e.rect)).collect();
    let pairs = overlapping_pairs(&bodies);
    for &(a, b) in &pairs {
        let (Some(ca), Some(cb)) = (scene.get(a).map(Contact::of), scene.get(b).map(Contact::of)) else {
            continue;
        };
        respond_by_id(scene, a, &cb);
        respond_by_id(scene, b, &ca);
    }
    pairs
}

/// Pass 3: characters against solid geometry. The first solid in contact
/// wins; a character touching none loses its ground.
pub fn ground_pass(scene: &mut Scene) {
    let solids: Vec<Contact> = scene.solids().map(Contact::of).collect();
    for entity in scene.iter_mut().filter(|e| e.kind.is_character()) {
        let hit = solids
            .iter()
            .find(|solid| entity.rect.in_contact(&solid.rect, CONTACT_MARGIN));
        match hit {
            Some(solid) => respond(entity, solid),
            None => entity.clear_ground(),
        }
    }
}

/// Pass 4: vials against solids, then characters against vials.
pub fn projectile_pass(scene: &mut Scene) {
    let solids: Vec<Contact> = scene.solids().map(Contact::of).collect();
    for vial in scene
        .iter_mut()
        .filter(|e| e.kind == EntityKind::Vial && !e.spent)
    {
        if let Some(solid) = solids.iter().find(|s| vial.rect.intersects(&s.rect)) {
            respond(vial, solid);
        }
    }

    let characters: Vec<Contact> = scene.characters().map(Contact::of).collect();
    for character in &characters {
        let vials = scene.ids_where(|e| e.kind == EntityKind::Vial && !e.spent);
        for vial_id in vials {
            let Some(vial) = scene.get(vial_id).map(Contact::of) else {
                continue;
            };
            if !character.rect.intersects(&vial.rect) {
                continue;
            }
            respond_by_id(scene, vial_id, character);
            respond_by_id(scene, character.id, &vial);
        }
    }
}

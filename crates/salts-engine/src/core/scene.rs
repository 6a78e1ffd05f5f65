use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity arena for one level, using a flat Vec in insertion order.
/// Designed for small entity counts (tens, not thousands).
///
/// Typed views (characters, statics, ...) are derived by filtering on
/// `EntityKind`, so removal through `despawn` is the only bookkeeping.
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Reserve a fresh handle. Handles are never reused within a scene.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        log::debug!("spawn {} {:?} at ({}, {})", entity.kind.name(), id, entity.rect.x, entity.rect.y);
        self.entities.push(entity);
        id
    }

    /// Remove an entity by ID, keeping the order of the rest.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        let entity = self.entities.remove(idx);
        log::debug!("despawn {} {:?}", entity.kind.name(), id);
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// IDs of entities matching `pred`, in scene order.
    pub fn ids_where(&self, pred: impl Fn(&Entity) -> bool) -> Vec<EntityId> {
        self.entities.iter().filter(|e| pred(e)).map(|e| e.id).collect()
    }

    // -- Typed views --

    /// Player and monsters.
    pub fn characters(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_character())
    }

    /// Vials and text overlays.
    pub fn dynamic_components(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_dynamic_component())
    }

    pub fn statics(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_static())
    }

    /// Static geometry that bodies can stand on or bump into.
    pub fn solids(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_solid())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity. Handles keep counting up.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

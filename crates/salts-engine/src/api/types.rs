/// Stable handle for an entity living in a level's scene.
/// Handles are never reused within one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Horizontal facing. The discriminant is the sign of motion along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = -1,
    Right = 1,
}

impl Direction {
    /// +1.0 for right, -1.0 for left.
    pub fn sign(self) -> f32 {
        self as i32 as f32
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction of a signed quantity. Zero has no direction.
    pub fn of(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Right)
        } else if value < 0.0 {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

/// High-level movement intents a character understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    Jump,
}

/// Monster subtypes. Each subtype carries its own decision routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonsterKind {
    /// Sheep + hedgehog. Chases the player and jumps.
    Schagel,
}

/// Closed set of entity variants. Collision responses are keyed on
/// `(EntityKind, EntityKind)` pairs instead of type inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Background,
    Foreground,
    Ground,
    BuildingBlock,
    Portal,
    Player,
    Monster(MonsterKind),
    Vial,
    Text,
}

impl EntityKind {
    /// Immovable level geometry; never updated.
    pub fn is_static(self) -> bool {
        matches!(
            self,
            EntityKind::Background
                | EntityKind::Foreground
                | EntityKind::Ground
                | EntityKind::BuildingBlock
                | EntityKind::Portal
        )
    }

    pub fn is_character(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Monster(_))
    }

    pub fn is_monster(self) -> bool {
        matches!(self, EntityKind::Monster(_))
    }

    /// Geometry a character can stand on.
    pub fn is_solid(self) -> bool {
        matches!(self, EntityKind::Ground | EntityKind::BuildingBlock)
    }

    /// Updated every frame but not a character (projectiles, overlays).
    pub fn is_dynamic_component(self) -> bool {
        matches!(self, EntityKind::Vial | EntityKind::Text)
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Background => "Background",
            EntityKind::Foreground => "Foreground",
            EntityKind::Ground => "Ground",
            EntityKind::BuildingBlock => "BuildingBlock",
            EntityKind::Portal => "Portal",
            EntityKind::Player => "Player",
            EntityKind::Monster(MonsterKind::Schagel) => "Schagel",
            EntityKind::Vial => "Vial",
            EntityKind::Text => "Text",
        }
    }
}

use glam::Vec2;
use crate::api::types::{Direction, EntityId, EntityKind, Movement};
use crate::components::animation::WalkCycle;
use crate::components::character::{CharacterState, KNOCKBACK_SPEED};
use crate::components::sprite::SpriteComponent;
use crate::components::text::TextOverlay;
use crate::core::physics::{GroundRef, PhysicsState};
use crate::core::rect::Rect;
use crate::core::time::game_time_scale;

/// Fat Entity: one struct, behaviour selected by which components are present.
///
/// Static geometry has only a rect and a sprite. Characters add physics, a
/// character state and a walk cycle; vials add physics; overlays add text.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Stable handle inside the owning scene.
    pub id: EntityId,
    pub kind: EntityKind,
    /// Spatial footprint in world space.
    pub rect: Rect,
    pub sprite: SpriteComponent,
    pub physics: Option<PhysicsState>,
    pub character: Option<CharacterState>,
    pub walk: Option<WalkCycle>,
    pub text: Option<TextOverlay>,
    /// Marked for removal at the next reap (used-up vial, expired text).
    pub spent: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, rect: Rect, sprite: SpriteComponent) -> Self {
        Self {
            id,
            kind,
            rect,
            sprite,
            physics: None,
            character: None,
            walk: None,
            text: None,
            spent: false,
        }
    }

    // -- Builder pattern --

    pub fn with_physics(mut self, physics: PhysicsState) -> Self {
        self.sprite.face(physics.direction);
        self.physics = Some(physics);
        self
    }

    pub fn with_character(mut self, character: CharacterState) -> Self {
        self.character = Some(character);
        self
    }

    pub fn with_walk(mut self, walk: WalkCycle) -> Self {
        self.walk = Some(walk);
        self
    }

    pub fn with_text(mut self, text: TextOverlay) -> Self {
        self.text = Some(text);
        self
    }

    // -- Queries --

    pub fn is_static(&self) -> bool {
        self.kind.is_static()
    }

    pub fn is_character(&self) -> bool {
        self.kind.is_character()
    }

    /// Characters live while they have life points; everything else until spent.
    pub fn is_alive(&self) -> bool {
        match &self.character {
            Some(c) => c.is_alive(),
            None => !self.spent,
        }
    }

    pub fn should_despawn(&self) -> bool {
        self.spent || !self.is_alive()
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_grounded(&self) -> bool {
        self.physics.as_ref().is_some_and(|p| p.is_grounded())
    }

    /// Index of the sprite frame to draw this tick.
    pub fn frame_index(&self) -> usize {
        self.walk.map(|w| w.index).unwrap_or(0)
    }

    // -- Character behaviour --

    /// Apply a movement intent.
    pub fn move_towards(&mut self, movement: Movement) {
        let on_stairs = self.character.as_ref().is_some_and(|c| c.on_stairs);
        let Some(physics) = self.physics.as_mut() else {
            return;
        };
        match movement {
            Movement::Right => {
                physics.x_accel = physics.params.x_acceleration;
                physics.x_movement = true;
            }
            Movement::Left => {
                physics.x_accel = -physics.params.x_acceleration;
                physics.x_movement = true;
            }
            Movement::Up => {
                if on_stairs {
                    physics.y_accel = -physics.params.y_acceleration;
                }
            }
            Movement::Down => {
                if on_stairs {
                    physics.y_accel = physics.params.y_acceleration;
                }
            }
            Movement::Jump => {
                if !physics.jumping {
                    physics.jumping = true;
                }
            }
        }

        if physics.x_accel * physics.direction.sign() < 0.0 {
            physics.direction = physics.direction.flipped();
            self.turn_around();
        }
    }

    /// Cancel a movement intent. Motion that has since reversed is kept.
    pub fn stop_move(&mut self, movement: Movement) {
        let Some(physics) = self.physics.as_mut() else {
            return;
        };
        let stopped = match movement {
            Movement::Right if physics.x_speed > 0.0 || physics.x_accel > 0.0 => {
                physics.x_speed = 0.0;
                physics.x_accel = 0.0;
                true
            }
            Movement::Left if physics.x_speed < 0.0 || physics.x_accel < 0.0 => {
                physics.x_speed = 0.0;
                physics.x_accel = 0.0;
                true
            }
            Movement::Up if physics.y_accel < 0.0 && !physics.jumping => {
                physics.y_accel = 0.0;
                false
            }
            Movement::Down if physics.y_accel > 0.0 && !physics.jumping => {
                physics.y_accel = 0.0;
                false
            }
            _ => false,
        };
        if stopped {
            physics.x_movement = false;
            if let Some(walk) = self.walk.as_mut() {
                walk.reset();
            }
        }
    }

    /// Face the current physics direction and restart the walk cycle.
    pub fn turn_around(&mut self) {
        if let Some(direction) = self.physics.as_ref().map(|p| p.direction) {
            self.sprite.face(direction);
        }
        if let Some(walk) = self.walk.as_mut() {
            walk.reset();
        }
    }

    /// Rest on a piece of ground.
    pub fn set_ground(&mut self, ground: GroundRef) {
        if let Some(physics) = self.physics.as_mut() {
            physics.land_on(&mut self.rect, ground);
        }
    }

    pub fn clear_ground(&mut self) {
        if let Some(physics) = self.physics.as_mut() {
            physics.ground = None;
        }
    }

    /// Throw the body away from an attacker and into the air.
    pub fn knock_back(&mut self, away: Direction) {
        if let Some(physics) = self.physics.as_mut() {
            physics.x_speed = KNOCKBACK_SPEED * away.sign();
            physics.x_accel = 0.0;
            physics.y_accel = -physics.params.jump_acceleration / 2.0;
            physics.jumping = true;
        }
    }

    /// Launch as a projectile toward `direction`.
    pub fn throw(&mut self, direction: Direction, speed: f32, lift: f32) {
        if let Some(physics) = self.physics.as_mut() {
            physics.direction = direction;
            physics.x_speed = speed * direction.sign();
            physics.y_speed = -lift;
            physics.ground = None;
        }
    }

    // -- Per-frame update --

    /// Advance one frame. Static entities ignore this.
    pub fn update(&mut self, elapsed_ms: f32) {
        if self.is_static() || game_time_scale(elapsed_ms) == 0.0 {
            return;
        }
        if let Some(physics) = self.physics.as_mut() {
            physics.integrate(&mut self.rect, elapsed_ms);
        }
        if let Some(text) = self.text.as_mut() {
            if text.tick(&mut self.rect, elapsed_ms) {
                self.spent = true;
            }
        }
        self.next_image();
        if let Some(character) = self.character.as_mut() {
            character.tick_invulnerability();
        }
    }

    fn next_image(&mut self) {
        let walking = self.physics.as_ref().is_some_and(|p| p.x_movement);
        if let Some(walk) = self.walk.as_mut() {
            if walking {
                walk.advance();
            }
        }
        if let Some(character) = &self.character {
            self.sprite.visible = if character.is_invulnerable() {
                !self.sprite.visible
            } else {
                true
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::Surface;
    use crate::components::character::INVULNERABILITY_TICKS;
    use crate::core::physics::PhysicsParams;

    fn walker() -> Entity {
        let frames = (1..=7)
            .map(|i| Surface::new(format!("player{}", i), 40.0, 64.0))
            .collect();
        Entity::new(
            EntityId(1),
            EntityKind::Player,
            Rect::new(50.0, 50.0, 40.0, 64.0),
            SpriteComponent::animated(frames, Direction::Right),
        )
        .with_physics(PhysicsState::new(PhysicsParams::PLAYER, Direction::Right))
        .with_character(CharacterState::new())
        .with_walk(WalkCycle::new(7))
    }

    fn physics(e: &Entity) -> &PhysicsState {
        e.physics.as_ref().unwrap()
    }

    #[test]
    fn move_then_stop_round_trips_to_zero() {
        let mut e = walker();
        e.move_towards(Movement::Right);
        assert_eq!(physics(&e).x_accel, PhysicsParams::PLAYER.x_acceleration);
        e.stop_move(Movement::Right);
        assert_eq!(physics(&e).x_speed, 0.0);
        assert_eq!(physics(&e).x_accel, 0.0);
        assert!(!physics(&e).x_movement);
    }

    #[test]
    fn stop_ignores_reversed_motion() {
        let mut e = walker();
        e.move_towards(Movement::Left);
        e.stop_move(Movement::Right);
        assert!(physics(&e).x_accel < 0.0);
    }

    #[test]
    fn reversing_flips_sprite_and_resets_walk() {
        let mut e = walker();
        e.move_towards(Movement::Right);
        e.update(33.0);
        e.update(33.0);
        assert_eq!(e.frame_index(), 2);
        assert!(!e.sprite.flipped);

        e.move_towards(Movement::Left);
        assert_eq!(physics(&e).direction, Direction::Left);
        assert!(e.sprite.flipped);
        assert_eq!(e.frame_index(), 0);
    }

    #[test]
    fn vertical_moves_need_stairs() {
        let mut e = walker();
        e.move_towards(Movement::Up);
        assert_eq!(physics(&e).y_accel, 0.0);

        e.character.as_mut().unwrap().on_stairs = true;
        e.move_towards(Movement::Up);
        assert_eq!(physics(&e).y_accel, -PhysicsParams::PLAYER.y_acceleration);
    }

    #[test]
    fn jump_sets_flag_once() {
        let mut e = walker();
        e.move_towards(Movement::Jump);
        assert!(physics(&e).jumping);
        // the impulse is only granted by integration from the ground
        assert_eq!(physics(&e).y_accel, 0.0);
    }

    #[test]
    fn invulnerable_character_blinks_then_shows() {
        let mut e = walker();
        e.character.as_mut().unwrap().take_contact_hit(10);
        e.update(33.0);
        assert!(!e.sprite.visible);
        e.update(33.0);
        assert!(e.sprite.visible);

        for _ in 0..INVULNERABILITY_TICKS {
            e.update(33.0);
        }
        assert!(e.sprite.visible);
        assert!(!e.character.as_ref().unwrap().is_invulnerable());
    }

    #[test]
    fn zero_time_update_changes_nothing() {
        let mut e = walker();
        e.move_towards(Movement::Right);
        e.character.as_mut().unwrap().invulnerable = 5;
        let before_rect = e.rect;
        e.update(0.0);
        assert_eq!(e.rect, before_rect);
        assert_eq!(e.character.as_ref().unwrap().invulnerable, 5);
        assert_eq!(e.frame_index(), 0);
    }

    #[test]
    fn knock_back_pushes_away_and_up() {
        let mut e = walker();
        e.knock_back(Direction::Left);
        let p = physics(&e);
        assert_eq!(p.x_speed, -KNOCKBACK_SPEED);
        assert!(p.y_accel < 0.0);
        assert!(p.jumping);
    }
}

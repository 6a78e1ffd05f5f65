//! Kinematic state and the per-frame integration step.
//!
//! Speed and acceleration are kept separately per axis so that bodies which
//! move without accelerating (thrown vials, a knocked-back character) and
//! bodies which accelerate up to a cap (walking) share one step.

use crate::api::types::{Direction, EntityId};
use crate::core::rect::Rect;
use crate::core::time::game_time_scale;

/// Downward acceleration of an airborne body, per reference frame.
pub const GRAVITY: f32 = 6.0;
/// Amount an upward jump acceleration decays toward zero each reference frame.
pub const JUMP_DECAY: f32 = 3.0;
/// Speed lost per reference frame while moving faster than the body's cap.
pub const AIR_DRAG: f32 = 1.0;
/// Speed lost per reference frame by a grounded body that stopped pushing.
pub const GROUND_FRICTION: f32 = 1.0;
/// Gap tolerated between a body and the ground it rests on.
pub const CONTACT_MARGIN: f32 = 1.0;
/// Push applied when a body hits the left world edge.
pub const BOUNDARY_NUDGE: f32 = 1.0;

/// Per-subtype movement constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    /// Horizontal acceleration granted by a move intent.
    pub x_acceleration: f32,
    /// Vertical acceleration granted by up/down intents on stairs.
    pub y_acceleration: f32,
    /// Initial upward acceleration of a jump.
    pub jump_acceleration: f32,
    pub x_max_speed: f32,
    pub y_max_speed: f32,
}

impl PhysicsParams {
    pub const PLAYER: PhysicsParams = PhysicsParams {
        x_acceleration: 14.0,
        y_acceleration: 20.0,
        jump_acceleration: 30.0,
        x_max_speed: 18.0,
        y_max_speed: 14.0,
    };

    pub const MONSTER: PhysicsParams = PhysicsParams {
        x_acceleration: 5.0,
        y_acceleration: 15.0,
        jump_acceleration: 20.0,
        x_max_speed: 10.0,
        y_max_speed: 10.0,
    };

    pub const VIAL: PhysicsParams = PhysicsParams {
        x_acceleration: 0.0,
        y_acceleration: 0.0,
        jump_acceleration: 0.0,
        x_max_speed: 30.0,
        y_max_speed: 50.0,
    };
}

/// Non-owning reference to the geometry currently supporting a body.
/// The rect is a snapshot refreshed by every ground collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundRef {
    pub id: EntityId,
    pub rect: Rect,
}

/// Kinematic state owned by one dynamic entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsState {
    pub direction: Direction,
    pub x_speed: f32,
    pub y_speed: f32,
    pub x_accel: f32,
    pub y_accel: f32,
    pub ground: Option<GroundRef>,
    pub jumping: bool,
    pub x_movement: bool,
    pub params: PhysicsParams,
}

impl PhysicsState {
    pub fn new(params: PhysicsParams, direction: Direction) -> Self {
        Self {
            direction,
            x_speed: 0.0,
            y_speed: 0.0,
            x_accel: 0.0,
            y_accel: 0.0,
            ground: None,
            jumping: false,
            x_movement: false,
            params,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.ground.is_some()
    }

    /// No speed and no acceleration on either axis.
    pub fn is_at_rest(&self) -> bool {
        self.x_speed == 0.0 && self.y_speed == 0.0 && self.x_accel == 0.0 && self.y_accel == 0.0
    }

    /// Rest on `ground`: snap the bottom edge just above it and stop falling.
    /// A launch already under way (jump or knockback) keeps its upward push.
    pub fn land_on(&mut self, rect: &mut Rect, ground: GroundRef) {
        self.y_speed = 0.0;
        if !(self.jumping && self.y_accel < 0.0) {
            self.y_accel = 0.0;
        }
        rect.set_bottom(ground.rect.top() - CONTACT_MARGIN);
        self.ground = Some(ground);
    }

    /// Advance one frame of `elapsed_ms` and move `rect` accordingly.
    ///
    /// Zero elapsed time is a no-op: nothing about the body changes.
    pub fn integrate(&mut self, rect: &mut Rect, elapsed_ms: f32) {
        let scale = game_time_scale(elapsed_ms);
        if scale == 0.0 {
            log::debug!("integrate skipped: elapsed {}ms", elapsed_ms);
            return;
        }

        // platforms may have moved out from under us
        if let Some(ground) = self.ground {
            if !rect.in_contact(&ground.rect, CONTACT_MARGIN) {
                self.ground = None;
            }
        }

        if !self.jumping && self.is_grounded() && self.is_at_rest() {
            return;
        }

        self.integrate_horizontal(scale);
        self.integrate_vertical(scale);

        let mut dx = self.x_speed * scale;
        let dy = self.y_speed * scale;

        // always nudged rightward; the right edge is clamped by the level
        if rect.left() + dx < 0.0 {
            self.x_speed = 0.0;
            self.x_accel = 0.0;
            dx = BOUNDARY_NUDGE;
        }

        rect.translate(dx, dy);
    }

    fn integrate_horizontal(&mut self, scale: f32) {
        let max = self.params.x_max_speed;
        if self.x_speed.abs() <= max {
            if self.x_accel != 0.0 {
                self.x_speed = (self.x_speed + self.x_accel * scale).clamp(-max, max);
            } else if self.is_grounded() && self.x_speed != 0.0 {
                let loss = (GROUND_FRICTION * scale).min(self.x_speed.abs());
                self.x_speed -= loss * self.x_speed.signum();
            }
        } else {
            self.x_speed -= AIR_DRAG * scale * self.x_speed.signum();
        }
    }

    fn integrate_vertical(&mut self, scale: f32) {
        if self.jumping {
            // launch only from solid ground, and only once per jump
            if self.ground.take().is_some() && self.y_accel >= 0.0 {
                self.y_accel = -self.params.jump_acceleration;
            }
            if self.y_accel < 0.0 {
                self.y_accel = (self.y_accel + JUMP_DECAY * scale).min(0.0);
            }
            if self.y_accel >= 0.0 {
                self.jumping = false;
                self.y_accel = GRAVITY;
            }
        } else if self.is_grounded() {
            self.y_accel = 0.0;
        } else {
            self.y_accel = GRAVITY;
        }

        if self.is_grounded() {
            self.y_speed = 0.0;
        } else {
            let max = self.params.y_max_speed;
            self.y_speed = (self.y_speed + self.y_accel * scale).clamp(-max, max);
        }
    }
}

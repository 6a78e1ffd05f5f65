//! Monster decision making, run once per update after the monster moved.

use crate::api::types::{Direction, EntityKind, Movement, MonsterKind};
use crate::components::entity::Entity;
use crate::core::rect::Rect;

/// Horizontal distance within which a Schagel keeps its current heading.
pub const CHASE_DEAD_ZONE: f32 = 15.0;
/// A Schagel jumps at an enemy below it when this close horizontally.
pub const POUNCE_RANGE: f32 = 200.0;
/// A Schagel jumps when this close to either edge of its ground.
pub const EDGE_MARGIN: f32 = 20.0;

/// Let a monster pick its next moves. `enemy` is the player's rect.
pub fn think(monster: &mut Entity, enemy: Option<&Rect>) {
    if let EntityKind::Monster(kind) = monster.kind {
        match kind {
            MonsterKind::Schagel => schagel(monster, enemy),
        }
    }
}

/// Chase the enemy, pounce when it is below, hop over ground edges.
fn schagel(me: &mut Entity, enemy: Option<&Rect>) {
    let Some(enemy) = enemy else {
        return;
    };
    let Some(direction) = me.physics.as_ref().map(|p| p.direction) else {
        return;
    };
    let dx = enemy.center_x() - me.rect.center_x();

    if dx < -CHASE_DEAD_ZONE {
        if direction == Direction::Right {
            me.stop_move(Movement::Right);
        }
        me.move_towards(Movement::Left);
    } else if dx > CHASE_DEAD_ZONE {
        if direction == Direction::Left {
            me.stop_move(Movement::Left);
        }
        me.move_towards(Movement::Right);
    }

    // y grows downward
    if enemy.center_y() > me.rect.center_y() && dx.abs() < POUNCE_RANGE {
        me.move_towards(Movement::Jump);
    }

    let near_edge = me
        .physics
        .as_ref()
        .and_then(|p| p.ground)
        .is_some_and(|g| {
            let cx = me.rect.center_x();
            g.rect.right() - EDGE_MARGIN < cx || cx < g.rect.left() + EDGE_MARGIN
        });
    if near_edge {
        me.move_towards(Movement::Jump);
    }
}

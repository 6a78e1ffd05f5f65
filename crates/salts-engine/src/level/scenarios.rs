//! Whole-frame behaviour: several systems driven together the way the
//! game loop drives them.

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::{Direction, EntityId, EntityKind, Movement};
use crate::assets::registry::Surface;
use crate::components::character::CONTACT_DAMAGE;
use crate::components::entity::Entity;
use crate::core::rect::Rect;
use crate::core::scene::Scene;
use crate::level::builder::tests::forest_resources;
use crate::level::builder::{build_level, PLAYER_START};
use crate::level::factory;
use crate::level::world::{Freeze, Level, LevelState, Prototypes, DEATH_MESSAGE};
use crate::renderer::camera::Camera;
use crate::systems::collision;

const DT: f32 = 33.0;

fn player_frames() -> Vec<Surface> {
    (1..=7).map(|i| Surface::new(format!("player{}", i), 40.0, 64.0)).collect()
}

fn schagel_frames() -> Vec<Surface> {
    (1..=3).map(|i| Surface::new(format!("schagel{}", i), 48.0, 48.0)).collect()
}

fn ground01(id: EntityId) -> Entity {
    factory::scenery(
        id,
        EntityKind::Ground,
        Vec2::new(0.0, 500.0),
        Surface::new("forest_ground01", 800.0, 100.0),
    )
    .unwrap()
}

fn config() -> GameConfig {
    GameConfig {
        tutorial_freeze_frames: 0,
        ..GameConfig::default()
    }
}

/// A level with one ground strip and a player standing at `player_pos`.
fn small_level(player_pos: Vec2) -> Level {
    let prototypes = Prototypes {
        schagel: schagel_frames(),
        vial: Surface::new("erlemeyer1", 30.0, 40.0),
    };
    let mut level = Level::new(-1, "forest", Vec2::new(1920.0, 1080.0), prototypes, &config()).unwrap();
    let id = level.next_id();
    level.add_world_component(ground01(id));
    let id = level.next_id();
    level.add_character(factory::player(id, player_pos, player_frames()).unwrap());
    level.activate();
    level
}

fn frame(level: &mut Level) {
    level.update(DT);
    level.detect_collisions();
}

fn vials(level: &Level) -> Vec<&Entity> {
    level
        .scene()
        .dynamic_components()
        .filter(|e| e.kind == EntityKind::Vial)
        .collect()
}

#[test]
fn player_settles_one_unit_above_ground() {
    let mut scene = Scene::new();
    let ground = scene.next_id();
    scene.spawn(ground01(ground));
    let id = scene.next_id();
    scene.spawn(factory::player(id, PLAYER_START, player_frames()).unwrap());

    let tick = |scene: &mut Scene| {
        if let Some(player) = scene.get_mut(id) {
            player.update(DT);
        }
        collision::ground_pass(scene);
    };

    for _ in 0..50 {
        tick(&mut scene);
    }
    assert_eq!(scene.get(id).unwrap().rect.bottom(), 499.0);
    assert!(scene.get(id).unwrap().is_grounded());

    for _ in 0..10 {
        tick(&mut scene);
        assert_eq!(scene.get(id).unwrap().rect.bottom(), 499.0);
    }
}

#[test]
fn thrown_vial_breaks_on_the_ground() {
    let mut level = small_level(PLAYER_START);
    let center = level.player_entity().unwrap().center();

    level.player_attack(Vec2::new(1000.0, 100.0));
    assert_eq!(level.state(), LevelState::Frozen(Freeze::Tutorial { remaining: 0 }));

    let thrown = vials(&level);
    assert_eq!(thrown.len(), 1);
    let vial_id = thrown[0].id;
    assert_eq!(thrown[0].center(), center);
    let physics = thrown[0].physics.as_ref().unwrap();
    assert_eq!(physics.direction, Direction::Right);
    assert!(physics.x_speed > 0.0);

    let mut last_seen = None;
    for _ in 0..60 {
        level.update(DT);
        match level.scene().get(vial_id) {
            Some(vial) => last_seen = Some(vial.rect),
            None => break,
        }
        level.detect_collisions();
        if !level.scene().contains(vial_id) {
            break;
        }
    }

    assert!(!level.scene().contains(vial_id));
    assert!(vials(&level).is_empty());
    let ground = Rect::new(0.0, 500.0, 800.0, 100.0);
    assert!(last_seen.is_some_and(|r| r.intersects(&ground)));
}

#[test]
fn dissolved_monster_is_removed_and_counted() {
    let mut level = small_level(Vec2::new(50.0, 435.0));
    let id = level.next_id();
    let monster = factory::schagel(id, Vec2::new(400.0, 451.0), schagel_frames()).unwrap();
    let monster_center = monster.center();
    let monster_id = level.add_character(monster);

    let id = level.next_id();
    let vial = factory::vial(id, monster_center, Surface::new("erlemeyer1", 30.0, 40.0));
    level.add_component(vial);

    level.detect_collisions();
    level.update(DT);

    assert!(level.scene().characters().all(|c| c.id != monster_id));
    assert_eq!(level.kills(), 1);
    let message = level
        .scene()
        .dynamic_components()
        .filter_map(|e| e.text.as_ref())
        .any(|t| t.content == DEATH_MESSAGE);
    assert!(message);
}

#[test]
fn knockback_launches_half_a_jump_from_the_ground() {
    let mut level = small_level(Vec2::new(50.0, 435.0));
    let player = level.player().unwrap();
    let id = level.next_id();
    level.add_character(factory::schagel(id, Vec2::new(70.0, 451.0), schagel_frames()).unwrap());

    level.detect_collisions();
    let physics = level.player_entity().unwrap().physics.clone().unwrap();
    assert!(physics.is_grounded());
    assert!(physics.jumping);
    assert_eq!(physics.y_accel, -15.0);

    level.update(DT);
    let physics = level.scene().get(player).unwrap().physics.clone().unwrap();
    assert_eq!(physics.y_accel, -12.0);
    assert_eq!(physics.y_speed, -12.0);
    assert!(!physics.is_grounded());
}

#[test]
fn player_killed_by_contact_is_removed_and_ends_the_level() {
    let mut level = small_level(Vec2::new(50.0, 435.0));
    let player = level.player().unwrap();
    if let Some(c) = level.get_mut(player).and_then(|p| p.character.as_mut()) {
        c.life_points = CONTACT_DAMAGE;
    }
    let id = level.next_id();
    level.add_character(factory::schagel(id, Vec2::new(70.0, 451.0), schagel_frames()).unwrap());

    frame(&mut level);
    assert!(!level.scene().contains(player));
    assert_eq!(level.player(), None);
    assert_eq!(level.kills(), 0);
    assert_eq!(level.state(), LevelState::Active);

    level.update(DT);
    assert_eq!(level.state(), LevelState::Ending);
}

#[test]
fn lone_player_gets_one_opponent() {
    let mut level = small_level(Vec2::new(50.0, 435.0));
    assert_eq!(level.scene().characters().count(), 1);

    level.update(DT);

    let monsters: Vec<_> = level.scene().characters().filter(|c| c.kind.is_monster()).collect();
    assert_eq!(monsters.len(), 1);
    let x = monsters[0].rect.left();
    assert!((0.0..=1920.0).contains(&x));

    level.update(DT);
    assert_eq!(level.scene().characters().filter(|c| c.kind.is_monster()).count(), 1);
}

#[test]
fn vanished_player_ends_the_level() {
    let mut level = small_level(PLAYER_START);
    let player = level.player().unwrap();
    assert!(level.del_character(player));

    level.update(DT);
    assert_eq!(level.state(), LevelState::Ending);
    assert!(level.is_frozen());

    let before = level.scene().len();
    frame(&mut level);
    assert_eq!(level.scene().len(), before);
}

#[test]
fn built_level_survives_many_frames() {
    let mut level = build_level(-1, &forest_resources(), &config()).unwrap();
    for i in 0..300 {
        if i % 40 == 0 {
            level.move_player(Movement::Right);
        }
        if i % 40 == 20 {
            level.stop_player(Movement::Right);
        }
        frame(&mut level);
        if level.state() != LevelState::Active {
            break;
        }
        let camera = level.camera().viewport();
        assert!(camera.left() >= 0.0 && camera.right() <= level.size().x);
        assert!(camera.top() >= 0.0 && camera.bottom() <= level.size().y);
    }
}

#[test]
fn camera_stays_inside_world_for_any_target() {
    let mut camera = Camera::new(Vec2::new(1280.0, 720.0), Vec2::new(2400.0, 1000.0));
    let coords = [-1.0e9, -5000.0, -1.0, 0.0, 300.0, 1199.5, 2400.0, 9999.0, 1.0e9];
    for &x in &coords {
        for &y in &coords {
            camera.update(&Rect::new(x, y, 40.0, 64.0));
            let v = camera.viewport();
            assert!(v.left() >= 0.0 && v.right() <= 2400.0, "x {} -> {:?}", x, v);
            assert!(v.top() >= 0.0 && v.bottom() <= 1000.0, "y {} -> {:?}", y, v);
        }
    }
}

#[test]
fn every_overlapping_pair_is_visited_once() {
    let bodies: Vec<(EntityId, Rect)> = (1..=6)
        .map(|i| (EntityId(i), Rect::new(i as f32, 0.0, 50.0, 50.0)))
        .collect();
    let pairs = collision::overlapping_pairs(&bodies);
    assert_eq!(pairs.len(), 6 * 5 / 2);

    let mut seen = std::collections::HashSet::new();
    for (a, b) in pairs {
        assert_ne!(a, b);
        assert!(seen.insert((a.min(b), a.max(b))));
    }
}

#[test]
fn move_then_stop_comes_to_rest() {
    let mut player = factory::player(EntityId(1), PLAYER_START, player_frames()).unwrap();
    player.move_towards(Movement::Right);
    player.stop_move(Movement::Right);
    let physics = player.physics.as_ref().unwrap();
    assert_eq!(physics.x_speed, 0.0);
    assert_eq!(physics.x_accel, 0.0);

    player.move_towards(Movement::Left);
    player.stop_move(Movement::Left);
    let physics = player.physics.as_ref().unwrap();
    assert_eq!(physics.x_speed, 0.0);
    assert_eq!(physics.x_accel, 0.0);
}

#[test]
fn zero_elapsed_time_changes_nothing() {
    let mut thrown = factory::vial(EntityId(1), Vec2::new(100.0, 100.0), Surface::new("erlemeyer1", 30.0, 40.0));
    thrown.throw(Direction::Left, 30.0, 12.0);
    let mut walking = factory::player(EntityId(2), PLAYER_START, player_frames()).unwrap();
    walking.move_towards(Movement::Right);
    walking.move_towards(Movement::Jump);
    let monster = factory::schagel(EntityId(3), Vec2::new(300.0, 0.0), schagel_frames()).unwrap();

    for mut entity in [thrown, walking, monster] {
        let before = entity.clone();
        entity.update(0.0);
        assert_eq!(entity.rect, before.rect);
        assert_eq!(entity.physics, before.physics);
    }
}

pub mod runner;

pub use runner::{GameRunner, RunnerState};

use std::cell::RefCell;

use salts_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Load resources and the first level. Returns false when the manifest,
/// config or first level is unusable; the reason is logged.
#[wasm_bindgen]
pub fn game_init(manifest_json: &str, config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match GameRunner::new(manifest_json, config_json) {
        Ok(runner) => {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("mad-salts: initialized");
            true
        }
        Err(e) => {
            log::error!("mad-salts: init failed: {}", e);
            false
        }
    }
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_texts_json() -> String {
    with_runner(|r| r.texts_json())
}

#[wasm_bindgen]
pub fn get_camera_x() -> f32 {
    with_runner(|r| r.camera_x())
}

#[wasm_bindgen]
pub fn get_camera_y() -> f32 {
    with_runner(|r| r.camera_y())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

#[wasm_bindgen]
pub fn get_fps() -> f32 {
    with_runner(|r| r.fps())
}

/// 0 running, 1 game over, 2 completed, 3 failed.
#[wasm_bindgen]
pub fn get_state() -> u32 {
    with_runner(|r| match r.state() {
        RunnerState::Running => 0,
        RunnerState::GameOver => 1,
        RunnerState::Completed => 2,
        RunnerState::Failed => 3,
    })
}

#[wasm_bindgen]
pub fn get_level_id() -> i32 {
    with_runner(|r| r.level_id())
}

#[wasm_bindgen]
pub fn get_kills() -> u32 {
    with_runner(|r| r.kills())
}

#[wasm_bindgen]
pub fn get_ammo() -> u32 {
    with_runner(|r| r.ammo())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

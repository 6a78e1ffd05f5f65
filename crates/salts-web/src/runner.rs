use glam::Vec2;
use salts_engine::bridge::protocol::HEADER_FLOATS;
use salts_engine::{
    build_level, AssetManifest, DrawBuffer, EngineError, EngineResult, FrameHeader, FrameTimer,
    GameConfig, InputEvent, InputQueue, Intent, IntentQueue, KeyBindings, Level, LevelState,
    ProtocolLayout, Renderer, ResourceTable,
};

/// Level loaded at startup.
pub const FIRST_LEVEL: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Running,
    /// The player is gone; only a reset brings the game back.
    GameOver,
    /// Every implemented level was finished.
    Completed,
    /// A level could not be built from the loaded resources.
    Failed,
}

/// Drives the current level once per animation frame.
///
/// The web crate keeps a single `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`. Nothing here talks to the browser
/// directly, so the whole frame loop runs in native tests too.
pub struct GameRunner {
    resources: ResourceTable,
    config: GameConfig,
    layout: ProtocolLayout,
    level: Option<Level>,
    level_id: i32,
    state: RunnerState,
    input: InputQueue,
    intents: IntentQueue,
    bindings: KeyBindings,
    draw: DrawBuffer,
    timer: FrameTimer,
    frame_counter: u32,
    header: [f32; HEADER_FLOATS],
}

impl GameRunner {
    /// Parse the asset manifest and config, then load the first level.
    /// An empty config string means all defaults.
    pub fn new(manifest_json: &str, config_json: &str) -> EngineResult<Self> {
        let config = if config_json.trim().is_empty() {
            GameConfig::default()
        } else {
            GameConfig::from_json(config_json)?
        };
        let manifest = AssetManifest::from_json(manifest_json)?;
        Self::with_resources(ResourceTable::from_manifest(&manifest), config)
    }

    pub fn with_resources(resources: ResourceTable, config: GameConfig) -> EngineResult<Self> {
        config.validate()?;
        let level = build_level(FIRST_LEVEL, &resources, &config)?;
        let draw = DrawBuffer::with_capacity(config.max_instances);
        log::info!("drawing through {} ({} instances max)", draw.backend(), config.max_instances);
        Ok(Self {
            layout: ProtocolLayout::from_config(&config),
            intents: IntentQueue::new(config.event_capacity, config.event_soft_cap),
            bindings: KeyBindings::new(config.debug_controls),
            draw,
            resources,
            config,
            level: Some(level),
            level_id: FIRST_LEVEL,
            state: RunnerState::Running,
            input: InputQueue::new(),
            timer: FrameTimer::new(),
            frame_counter: 0,
            header: [0.0; HEADER_FLOATS],
        })
    }

    /// Push a raw input event. It is translated on the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `dt` milliseconds.
    pub fn tick(&mut self, dt: f32) {
        if self.config.show_fps {
            self.timer.record(dt);
        }

        for event in self.input.drain() {
            if let Some(intent) = self.bindings.translate(&event) {
                self.intents.push(intent);
            }
        }
        for intent in self.intents.drain_frame() {
            self.handle(intent);
        }

        if self.state == RunnerState::Running {
            if let Some(level) = self.level.as_mut() {
                level.update(dt);
                level.detect_collisions();
            }
            self.check_transitions();
        }

        self.present();
    }

    fn handle(&mut self, intent: Intent) {
        if intent == Intent::Reset {
            log::info!("reset: rebuilding level {}", self.level_id);
            self.load_level(self.level_id);
            return;
        }
        if self.state != RunnerState::Running {
            return;
        }
        let Some(level) = self.level.as_mut() else {
            return;
        };
        match intent {
            Intent::Move(movement) => level.move_player(movement),
            Intent::StopMove(movement) => level.stop_player(movement),
            Intent::Attack { x, y } => level.player_attack(Vec2::new(x, y)),
            Intent::ToggleFreeze => level.toggle_freeze(),
            Intent::Reset => {}
        }
    }

    fn check_transitions(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        if level.state() == LevelState::Ending {
            log::info!("game over on level {}", self.level_id);
            self.state = RunnerState::GameOver;
        } else if level.check_level_finished() {
            log::info!("level {} finished with {} kills", self.level_id, level.kills());
            self.load_level(self.level_id + 1);
        }
    }

    /// Replace the current level. The old one stays when the new one
    /// cannot be built.
    fn load_level(&mut self, id: i32) {
        match build_level(id, &self.resources, &self.config) {
            Ok(level) => {
                if let Some(mut old) = self.level.replace(level) {
                    old.unload();
                }
                self.level_id = id;
                self.state = RunnerState::Running;
                self.intents.clear();
            }
            Err(EngineError::UnimplementedLevel(id)) => {
                log::info!("no more levels after {}", id - 1);
                self.state = RunnerState::Completed;
            }
            Err(e) => {
                log::error!("could not build level {}: {}", id, e);
                self.state = RunnerState::Failed;
            }
        }
    }

    fn present(&mut self) {
        self.draw.clear();
        self.frame_counter = self.frame_counter.wrapping_add(1);
        let Some(level) = self.level.as_ref() else {
            return;
        };
        level.display(&mut self.draw);

        let camera = level.camera();
        FrameHeader {
            frame_counter: self.frame_counter,
            instance_count: self.draw.instance_count(),
            text_count: self.draw.texts.len() as u32,
            viewport_width: camera.width,
            viewport_height: camera.height,
            world_width: level.size().x,
            world_height: level.size().y,
            level_id: self.level_id,
            kills: level.kills(),
            fps: self.fps(),
        }
        .write(&self.layout, &mut self.header);
    }

    // ---- Accessors read by the wasm exports ----

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn level_id(&self) -> i32 {
        self.level_id
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.draw.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.draw.instance_count()
    }

    pub fn texts_json(&self) -> String {
        self.draw.texts_json()
    }

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn camera_x(&self) -> f32 {
        self.level.as_ref().map_or(0.0, |l| l.camera().position.x)
    }

    pub fn camera_y(&self) -> f32 {
        self.level.as_ref().map_or(0.0, |l| l.camera().position.y)
    }

    pub fn world_width(&self) -> f32 {
        self.level.as_ref().map_or(0.0, |l| l.size().x)
    }

    pub fn world_height(&self) -> f32 {
        self.level.as_ref().map_or(0.0, |l| l.size().y)
    }

    pub fn kills(&self) -> u32 {
        self.level.as_ref().map_or(0, |l| l.kills())
    }

    /// Vials left in the player's weapon, 0 without a player.
    pub fn ammo(&self) -> u32 {
        self.level
            .as_ref()
            .and_then(|l| l.player_entity())
            .and_then(|p| p.character.as_ref())
            .and_then(|c| c.weapon.as_ref())
            .map_or(0, |w| w.ammo())
    }

    /// Rolling average FPS, 0 unless `show_fps` is set.
    pub fn fps(&self) -> f32 {
        if self.config.show_fps {
            self.timer.fps()
        } else {
            0.0
        }
    }
}

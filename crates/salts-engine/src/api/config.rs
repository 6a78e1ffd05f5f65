use serde::Deserialize;

use crate::api::error::{EngineError, EngineResult};

/// Configuration for the game, normally supplied once at startup.
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in world units (default: 1280).
    pub camera_width: f32,
    /// Viewport height in world units (default: 720).
    pub camera_height: f32,
    /// Target frame rate of the driver loop (default: 30).
    pub target_fps: u32,
    /// Events handled per frame before backlog handling kicks in (default: 10).
    pub event_soft_cap: usize,
    /// Events held before new ones are dropped (default: 64).
    pub event_capacity: usize,
    /// Monster removals needed to finish a level (default: 8).
    pub kill_target: u32,
    /// Seed for monster spawn positions (default: 42).
    pub spawn_seed: u64,
    /// Frames the level stays frozen after the first attack (default: 90).
    pub tutorial_freeze_frames: u32,
    /// Enables the reset and freeze-toggle keys.
    pub debug_controls: bool,
    /// Track a rolling frame-time average for an FPS overlay.
    pub show_fps: bool,
    /// Sprite draw calls the display buffer holds per frame (default: 256).
    pub max_instances: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            camera_width: 1280.0,
            camera_height: 720.0,
            target_fps: 30,
            event_soft_cap: 10,
            event_capacity: 64,
            kill_target: 8,
            spawn_seed: 42,
            tutorial_freeze_frames: 90,
            debug_controls: cfg!(debug_assertions),
            show_fps: false,
            max_instances: 256,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !(self.camera_width > 0.0 && self.camera_height > 0.0)
            || !self.camera_width.is_finite()
            || !self.camera_height.is_finite()
        {
            return Err(EngineError::InvalidSize {
                width: self.camera_width,
                height: self.camera_height,
            });
        }
        if self.target_fps == 0 {
            return Err(EngineError::Config("target_fps must be positive".into()));
        }
        if self.event_soft_cap == 0 || self.event_capacity == 0 {
            return Err(EngineError::Config("event queue sizes must be positive".into()));
        }
        if self.max_instances == 0 {
            return Err(EngineError::Config("max_instances must be positive".into()));
        }
        Ok(())
    }

    /// Nominal milliseconds per frame at the target rate.
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.target_fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "kill_target": 3 }"#).unwrap();
        assert_eq!(config.kill_target, 3);
        assert_eq!(config.camera_width, 1280.0);
        assert_eq!(config.event_soft_cap, 10);
    }

    #[test]
    fn rejects_zero_camera() {
        let err = GameConfig::from_json(r#"{ "camera_width": 0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSize { .. }));
    }

    #[test]
    fn rejects_zero_fps() {
        assert!(GameConfig::from_json(r#"{ "target_fps": 0 }"#).is_err());
    }

    #[test]
    fn frame_ms_matches_rate() {
        let config = GameConfig::default();
        assert!((config.frame_ms() - 33.333).abs() < 0.01);
    }
}

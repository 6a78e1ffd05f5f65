pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod level;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::error::{EngineError, EngineResult};
pub use api::types::{Direction, EntityId, EntityKind, MonsterKind, Movement};
pub use components::entity::Entity;
pub use components::character::{CharacterState, Weapon};
pub use components::sprite::SpriteComponent;
pub use components::text::TextOverlay;
pub use core::rect::Rect;
pub use core::scene::Scene;
pub use core::time::FrameTimer;
pub use renderer::camera::Camera;
pub use renderer::instance::{DrawBuffer, DrawInstance, TextCommand};
pub use renderer::traits::{Composite, Renderer};
pub use input::bindings::KeyBindings;
pub use input::queue::{InputEvent, InputQueue, Intent, IntentQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{ResourceTable, Surface};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use level::{build_level, Freeze, Level, LevelState};

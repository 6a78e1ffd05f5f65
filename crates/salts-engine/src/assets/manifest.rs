use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::api::error::EngineResult;

/// Asset manifest describing every atlas and named surface of the game.
/// Loaded from JSON once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    /// Named surfaces: name → atlas cell + native pixel size.
    #[serde(default)]
    pub surfaces: HashMap<String, SurfaceDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "forest").
    pub name: String,
    /// Relative path to the image file.
    pub path: String,
}

/// Describes a named surface within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    /// Index into the atlases array.
    #[serde(default)]
    pub atlas: u32,
    /// Column in the atlas grid.
    #[serde(default)]
    pub col: u32,
    /// Row in the atlas grid.
    #[serde(default)]
    pub row: u32,
    /// Native width in world units.
    pub width: f32,
    /// Native height in world units.
    pub height: f32,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

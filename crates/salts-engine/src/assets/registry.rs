use std::collections::HashMap;
use glam::Vec2;

use crate::api::error::{EngineError, EngineResult};
use crate::assets::manifest::AssetManifest;

/// A drawable surface as the display layer knows it: an atlas cell plus
/// its native size. The core only carries these around.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub name: String,
    pub atlas: u32,
    pub col: u32,
    pub row: u32,
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            atlas: 0,
            col: 0,
            row: 0,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Name-keyed table of pre-loaded surfaces, populated once at startup.
/// Entity construction fails fast when a name is missing.
#[derive(Debug, Clone, Default)]
pub struct ResourceTable {
    surfaces: HashMap<String, Surface>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a parsed manifest. Names are stored lower case.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut surfaces = HashMap::with_capacity(manifest.surfaces.len());
        for (name, desc) in &manifest.surfaces {
            let name = name.to_lowercase();
            surfaces.insert(name.clone(), Surface {
                name,
                atlas: desc.atlas,
                col: desc.col,
                row: desc.row,
                width: desc.width,
                height: desc.height,
            });
        }
        log::info!("resource table loaded: {} surfaces", surfaces.len());
        Self { surfaces }
    }

    pub fn insert(&mut self, surface: Surface) {
        self.surfaces.insert(surface.name.to_lowercase(), surface);
    }

    /// Look up a surface by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&Surface> {
        self.surfaces.get(&name.to_lowercase())
    }

    /// Look up a surface that must exist.
    pub fn require(&self, name: &str) -> EngineResult<&Surface> {
        self.get(name)
            .ok_or_else(|| EngineError::MissingResource(name.to_string()))
    }

    /// All surfaces whose name starts with `prefix`, sorted by name.
    /// Used for animation frame sets such as `player1..player7`.
    pub fn frames(&self, prefix: &str) -> EngineResult<Vec<Surface>> {
        let prefix = prefix.to_lowercase();
        let mut frames: Vec<Surface> = self
            .surfaces
            .values()
            .filter(|s| s.name.starts_with(&prefix))
            .cloned()
            .collect();
        if frames.is_empty() {
            return Err(EngineError::MissingResource(format!("{}*", prefix)));
        }
        frames.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(frames)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

use crate::api::types::Direction;
use crate::assets::registry::Surface;

/// Sprite component: what the display layer draws for an entity.
///
/// Visibility (the damage blink) and frame selection (the walk cycle) are
/// independent: this component only knows whether to draw and which way to
/// face; the frame index comes from the entity's walk cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Frames in playback order. Empty for entities drawn without a surface.
    pub frames: Vec<Surface>,
    /// Direction the artwork faces when not flipped.
    pub facing: Direction,
    /// Draw mirrored horizontally.
    pub flipped: bool,
    /// Drawn this tick.
    pub visible: bool,
}

impl SpriteComponent {
    pub fn single(surface: Surface) -> Self {
        Self::animated(vec![surface], Direction::Right)
    }

    pub fn animated(frames: Vec<Surface>, facing: Direction) -> Self {
        Self {
            frames,
            facing,
            flipped: false,
            visible: true,
        }
    }

    /// A sprite with nothing to blit (text overlays).
    pub fn empty() -> Self {
        Self::animated(Vec::new(), Direction::Right)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Surface for a walk-cycle index, wrapping around the frame set.
    pub fn frame(&self, index: usize) -> Option<&Surface> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(index % self.frames.len())
    }

    /// Mirror the artwork so it looks toward `direction`.
    pub fn face(&mut self, direction: Direction) {
        self.flipped = direction != self.facing;
    }
}

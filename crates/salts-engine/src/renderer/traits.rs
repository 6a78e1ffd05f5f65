//! Display boundary.
//!
//! The core never draws. Each frame it hands the display layer a surface
//! and a placement rect in screen space (viewport-relative); the display
//! layer composites and presents. `DrawBuffer` implements `Renderer` by
//! packing these calls into a flat buffer for the JS side.

use glam::Vec2;

use crate::assets::registry::Surface;
use crate::core::rect::Rect;

/// Receiver of per-frame draw calls.
pub trait Renderer {
    /// Backend name, for logs.
    fn backend(&self) -> &'static str;

    /// Draw `surface` stretched over `dest` (screen space).
    fn blit(&mut self, surface: &Surface, dest: Rect, flipped: bool);

    /// Draw a line of text with its top-left at `dest`.
    fn draw_text(&mut self, text: &str, font_size: u32, dest: Rect);
}

/// Pre-composed background: static layers drawn as one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composite {
    /// Extent of the composite in world units.
    pub size: Vec2,
    /// Layers in drawing order, with their placement in composite space.
    pub layers: Vec<(Surface, Rect)>,
}

impl Composite {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            layers: Vec::new(),
        }
    }

    pub fn push(&mut self, surface: Surface, placement: Rect) {
        self.layers.push((surface, placement));
    }

    /// Draw the part of the composite under `viewport`.
    pub fn display(&self, viewport: &Rect, renderer: &mut dyn Renderer) {
        for (surface, rect) in &self.layers {
            if viewport.touches(rect) {
                renderer.blit(surface, rect.relative_to(viewport.top_left()), false);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records draw calls in order.
    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub blits: Vec<(String, Rect, bool)>,
        pub texts: Vec<(String, Rect)>,
    }

    impl Renderer for RecordingRenderer {
        fn backend(&self) -> &'static str {
            "recording"
        }

        fn blit(&mut self, surface: &Surface, dest: Rect, flipped: bool) {
            self.blits.push((surface.name.clone(), dest, flipped));
        }

        fn draw_text(&mut self, text: &str, _font_size: u32, dest: Rect) {
            self.texts.push((text.to_string(), dest));
        }
    }

    fn forest() -> Composite {
        let mut composite = Composite::new(Vec2::new(1000.0, 600.0));
        composite.push(
            Surface::new("forest_background", 1000.0, 600.0),
            Rect::new(0.0, 0.0, 1000.0, 600.0),
        );
        composite.push(
            Surface::new("forest_ground01", 800.0, 100.0),
            Rect::new(0.0, 500.0, 800.0, 100.0),
        );
        composite
    }

    #[test]
    fn display_is_viewport_relative_and_ordered() {
        let composite = forest();
        let mut renderer = RecordingRenderer::default();
        composite.display(&Rect::new(100.0, 50.0, 400.0, 300.0), &mut renderer);
        assert_eq!(renderer.blits.len(), 1);
        assert_eq!(renderer.blits[0].1, Rect::new(-100.0, -50.0, 1000.0, 600.0));

        renderer.blits.clear();
        composite.display(&Rect::new(0.0, 300.0, 400.0, 300.0), &mut renderer);
        let names: Vec<_> = renderer.blits.iter().map(|b| b.0.as_str()).collect();
        assert_eq!(names, vec!["forest_background", "forest_ground01"]);
    }
}

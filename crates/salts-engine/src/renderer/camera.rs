use glam::Vec2;

use crate::core::rect::Rect;

/// 2D camera tracking a focus rect inside a bounded world.
/// World space has its origin top-left with Y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Top-left corner of the viewport in world space.
    pub position: Vec2,
    /// Extent of the world the viewport is clamped to.
    pub world_size: Vec2,
}

impl Camera {
    /// A viewport larger than the world is shrunk to fit it.
    pub fn new(viewport_size: Vec2, world_size: Vec2) -> Self {
        let world_size = world_size.max(Vec2::ZERO);
        let size = viewport_size.max(Vec2::ZERO).min(world_size);
        Self {
            width: size.x,
            height: size.y,
            position: Vec2::ZERO,
            world_size,
        }
    }

    /// Center the viewport on `target`, clamped per axis to the world.
    /// No smoothing: the position is a function of the target alone.
    pub fn update(&mut self, target: &Rect) {
        let center = target.center();
        if center.is_nan() {
            return;
        }
        self.look_at(center);
    }

    /// Move the viewport center to a world point.
    pub fn look_at(&mut self, center: Vec2) {
        let max = (self.world_size - Vec2::new(self.width, self.height)).max(Vec2::ZERO);
        let top_left = center - Vec2::new(self.width, self.height) / 2.0;
        // clamp() would propagate NaN; max/min saturate infinities to the bounds
        self.position = Vec2::new(
            top_left.x.max(0.0).min(max.x),
            top_left.y.max(0.0).min(max.y),
        );
    }

    /// The visible sub-rectangle of the world.
    pub fn viewport(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect: &Rect) -> bool {
        self.viewport().touches(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(1280.0, 720.0), Vec2::new(2000.0, 1000.0))
    }

    fn assert_inside_world(cam: &Camera) {
        let v = cam.viewport();
        assert!(v.left() >= 0.0, "left {}", v.left());
        assert!(v.top() >= 0.0, "top {}", v.top());
        assert!(v.right() <= cam.world_size.x, "right {}", v.right());
        assert!(v.bottom() <= cam.world_size.y, "bottom {}", v.bottom());
    }

    #[test]
    fn centers_on_target() {
        let mut cam = camera();
        cam.update(&Rect::new(990.0, 490.0, 20.0, 20.0));
        assert_eq!(cam.viewport().center(), Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn corners_clamp_both_axes() {
        let mut cam = camera();
        cam.update(&Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(cam.position, Vec2::ZERO);

        cam.update(&Rect::new(1990.0, 990.0, 10.0, 10.0));
        assert_eq!(cam.position, Vec2::new(720.0, 280.0));
    }

    #[test]
    fn any_target_stays_inside_world() {
        let mut cam = camera();
        let targets = [
            (-5000.0, -5000.0),
            (5000.0, -10.0),
            (-10.0, 5000.0),
            (1e9, 1e9),
            (f32::INFINITY, f32::NEG_INFINITY),
            (640.0, 360.0),
        ];
        for (x, y) in targets {
            cam.update(&Rect::new(x, y, 40.0, 64.0));
            assert_inside_world(&cam);
        }
    }

    #[test]
    fn nan_target_is_ignored() {
        let mut cam = camera();
        cam.update(&Rect::new(1000.0, 500.0, 0.0, 0.0));
        let before = cam.position;
        cam.update(&Rect::new(f32::NAN, 0.0, 1.0, 1.0));
        assert_eq!(cam.position, before);
    }

    #[test]
    fn oversized_viewport_shrinks_to_world() {
        let mut cam = Camera::new(Vec2::new(1280.0, 720.0), Vec2::new(800.0, 600.0));
        assert_eq!(cam.width, 800.0);
        assert_eq!(cam.height, 600.0);
        cam.update(&Rect::new(700.0, 500.0, 10.0, 10.0));
        assert_eq!(cam.position, Vec2::ZERO);
        assert_inside_world(&cam);
    }

    #[test]
    fn screen_world_conversion() {
        let mut cam = camera();
        cam.update(&Rect::new(1000.0, 500.0, 0.0, 0.0));
        let world = Vec2::new(1100.0, 600.0);
        assert_eq!(cam.screen_to_world(cam.world_to_screen(world)), world);
        assert!(cam.is_rect_visible(&Rect::new(1000.0, 500.0, 5.0, 5.0)));
        assert!(!cam.is_rect_visible(&Rect::new(0.0, 0.0, 5.0, 5.0)));
    }
}

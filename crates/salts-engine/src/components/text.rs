use crate::core::rect::Rect;
use crate::core::time::game_time_scale;

/// A text overlay placed in the world, optionally timed and drifting upward.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub content: String,
    pub font_size: u32,
    /// Milliseconds left before removal. `None` means permanent.
    pub remaining_ms: Option<f32>,
    /// Upward drift per reference frame.
    pub rise_speed: f32,
}

impl TextOverlay {
    pub fn permanent(content: impl Into<String>, font_size: u32) -> Self {
        Self {
            content: content.into(),
            font_size,
            remaining_ms: None,
            rise_speed: 0.0,
        }
    }

    pub fn timed(content: impl Into<String>, font_size: u32, lifetime_ms: f32) -> Self {
        Self {
            remaining_ms: Some(lifetime_ms),
            ..Self::permanent(content, font_size)
        }
    }

    pub fn with_rise(mut self, rise_speed: f32) -> Self {
        self.rise_speed = rise_speed;
        self
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.remaining_ms, Some(ms) if ms <= 0.0)
    }

    /// Count down and drift. Returns true once the overlay has expired.
    pub fn tick(&mut self, rect: &mut Rect, elapsed_ms: f32) -> bool {
        let scale = game_time_scale(elapsed_ms);
        if scale > 0.0 {
            rect.translate(0.0, -self.rise_speed * scale);
            if let Some(ms) = self.remaining_ms.as_mut() {
                *ms -= elapsed_ms;
            }
        }
        self.is_expired()
    }
}

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::assets::registry::Surface;
use crate::bridge::protocol::{FLAG_FLIPPED, INSTANCE_FLOATS};
use crate::core::rect::Rect;
use crate::renderer::traits::Renderer;

/// One blit as the JS renderer reads it: 8 floats = 32 bytes stride.
/// Positions are screen space (viewport-relative).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Atlas index.
    pub atlas: f32,
    /// Atlas column.
    pub col: f32,
    /// Atlas row.
    pub row: f32,
    /// Bit flags, see `bridge::protocol`.
    pub flags: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = INSTANCE_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn is_flipped(&self) -> bool {
        (self.flags as u32) & FLAG_FLIPPED != 0
    }
}

/// A text draw call. Text is rare, so it travels as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextCommand {
    pub text: String,
    pub font_size: u32,
    pub x: f32,
    pub y: f32,
}

/// Per-frame draw calls, rebuilt from scratch every display pass.
pub struct DrawBuffer {
    pub instances: Vec<DrawInstance>,
    pub texts: Vec<TextCommand>,
    max_instances: usize,
    dropped: usize,
}

impl DrawBuffer {
    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            texts: Vec::new(),
            max_instances,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        if self.dropped > 0 {
            log::warn!("draw buffer full: {} blits dropped last frame", self.dropped);
        }
        self.instances.clear();
        self.texts.clear();
        self.dropped = 0;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for the JS side.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn texts_json(&self) -> String {
        serde_json::to_string(&self.texts).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl Renderer for DrawBuffer {
    fn backend(&self) -> &'static str {
        "draw-buffer"
    }

    fn blit(&mut self, surface: &Surface, dest: Rect, flipped: bool) {
        if self.instances.len() >= self.max_instances {
            self.dropped += 1;
            return;
        }
        self.instances.push(DrawInstance {
            x: dest.x,
            y: dest.y,
            width: dest.width,
            height: dest.height,
            atlas: surface.atlas as f32,
            col: surface.col as f32,
            row: surface.row as f32,
            flags: if flipped { FLAG_FLIPPED as f32 } else { 0.0 },
        });
    }

    fn draw_text(&mut self, text: &str, font_size: u32, dest: Rect) {
        self.texts.push(TextCommand {
            text: text.to_string(),
            font_size,
            x: dest.x,
            y: dest.y,
        });
    }
}

/// Frame data layout shared with the JS renderer.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Instances: max_instances × 8 floats]
/// ```
///
/// Text draw calls are not part of the float buffer; they are read as JSON.
use crate::api::config::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TEXT_COUNT: usize = 4;
pub const HEADER_VIEWPORT_WIDTH: usize = 5;
pub const HEADER_VIEWPORT_HEIGHT: usize = 6;
pub const HEADER_WORLD_WIDTH: usize = 7;
pub const HEADER_WORLD_HEIGHT: usize = 8;
pub const HEADER_LEVEL_ID: usize = 9;
pub const HEADER_KILLS: usize = 10;
pub const HEADER_FPS: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per draw instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = 8;

/// Draw instance flag: mirror horizontally.
pub const FLAG_FLIPPED: u32 = 1;

/// Buffer layout computed from the configured capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;
        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances)
    }
}

/// Per-frame values written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame_counter: u32,
    pub instance_count: u32,
    pub text_count: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_width: f32,
    pub world_height: f32,
    pub level_id: i32,
    pub kills: u32,
    pub fps: f32,
}

impl FrameHeader {
    pub fn write(&self, layout: &ProtocolLayout, header: &mut [f32; HEADER_FLOATS]) {
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = self.instance_count as f32;
        header[HEADER_TEXT_COUNT] = self.text_count as f32;
        header[HEADER_VIEWPORT_WIDTH] = self.viewport_width;
        header[HEADER_VIEWPORT_HEIGHT] = self.viewport_height;
        header[HEADER_WORLD_WIDTH] = self.world_width;
        header[HEADER_WORLD_HEIGHT] = self.world_height;
        header[HEADER_LEVEL_ID] = self.level_id as f32;
        header[HEADER_KILLS] = self.kills as f32;
        header[HEADER_FPS] = self.fps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_instances, 256);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 256 * 8);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn header_indices_are_unique() {
        let indices = [
            HEADER_PROTOCOL_VERSION,
            HEADER_FRAME_COUNTER,
            HEADER_MAX_INSTANCES,
            HEADER_INSTANCE_COUNT,
            HEADER_TEXT_COUNT,
            HEADER_VIEWPORT_WIDTH,
            HEADER_VIEWPORT_HEIGHT,
            HEADER_WORLD_WIDTH,
            HEADER_WORLD_HEIGHT,
            HEADER_LEVEL_ID,
            HEADER_KILLS,
            HEADER_FPS,
        ];
        let mut sorted = indices.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), HEADER_FLOATS);
        assert!(indices.iter().all(|&i| i < HEADER_FLOATS));
    }

    #[test]
    fn header_write() {
        let layout = ProtocolLayout::new(8);
        let mut header = [0.0; HEADER_FLOATS];
        FrameHeader {
            frame_counter: 3,
            instance_count: 2,
            level_id: -1,
            kills: 5,
            ..Default::default()
        }
        .write(&layout, &mut header);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_INSTANCES], 8.0);
        assert_eq!(header[HEADER_LEVEL_ID], -1.0);
        assert_eq!(header[HEADER_KILLS], 5.0);
    }
}

/// Milliseconds of a reference frame (30 FPS). Speeds and accelerations
/// are expressed per reference frame.
pub const REFERENCE_FRAME_MS: f32 = 33.0;

/// Frames kept by [`FrameTimer`] for its rolling average.
pub const FRAME_WINDOW: usize = 15;

/// Dimensionless multiplier turning per-reference-frame quantities into
/// per-elapsed-time quantities. Zero, negative or NaN time yields 0.
pub fn game_time_scale(elapsed_ms: f32) -> f32 {
    if elapsed_ms > 0.0 && elapsed_ms.is_finite() {
        elapsed_ms / REFERENCE_FRAME_MS
    } else {
        0.0
    }
}

/// Rolling average of measured frame times, for the debug FPS overlay.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: [f32; FRAME_WINDOW],
    cursor: usize,
    filled: usize,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            samples: [0.0; FRAME_WINDOW],
            cursor: 0,
            filled: 0,
        }
    }

    /// Record the elapsed time of one frame.
    pub fn record(&mut self, elapsed_ms: f32) {
        self.samples[self.cursor] = elapsed_ms.max(0.0);
        self.cursor = (self.cursor + 1) % FRAME_WINDOW;
        self.filled = (self.filled + 1).min(FRAME_WINDOW);
    }

    /// Average frame time over the window, or 0 before any frame.
    pub fn average_ms(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        self.samples[..self.filled].iter().sum::<f32>() / self.filled as f32
    }

    /// Frames per second derived from the average.
    pub fn fps(&self) -> f32 {
        let avg = self.average_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_frame_scales_to_one() {
        assert!((game_time_scale(33.0) - 1.0).abs() < 1e-6);
        assert!((game_time_scale(66.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_time_scales_to_zero() {
        assert_eq!(game_time_scale(0.0), 0.0);
        assert_eq!(game_time_scale(-5.0), 0.0);
        assert_eq!(game_time_scale(f32::NAN), 0.0);
    }

    #[test]
    fn timer_averages_window() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.fps(), 0.0);
        for _ in 0..FRAME_WINDOW * 2 {
            timer.record(25.0);
        }
        assert!((timer.average_ms() - 25.0).abs() < 1e-4);
        assert!((timer.fps() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn timer_partial_window() {
        let mut timer = FrameTimer::new();
        timer.record(10.0);
        timer.record(30.0);
        assert!((timer.average_ms() - 20.0).abs() < 1e-4);
    }
}

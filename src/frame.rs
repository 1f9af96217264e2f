use std::time::Instant;

use cgmath::Vector2;

/// Values fed to the optional shader uniforms, owned by the run loop.
#[derive(Debug, Clone)]
pub struct FrameState {
    pub resolution: Vector2<f32>,
    pub mouse: Vector2<f32>,
    pub time: f32,
    pub frame: u32,
    started: Instant,
}

impl FrameState {
    pub fn new(resolution: Vector2<f32>, started: Instant) -> Self {
        Self {
            resolution,
            mouse: Vector2::new(0.5, 0.5),
            time: 0.0,
            frame: 0,
            started,
        }
    }

    /// Normalizes a cursor position given in logical window coordinates.
    /// The y axis is flipped so 0 is the bottom edge.
    pub fn move_mouse(&mut self, x: f64, y: f64, window: Vector2<f32>) {
        self.mouse = Vector2::new(x as f32 / window.x, 1.0 - y as f32 / window.y);
    }

    pub fn update_time(&mut self, now: Instant) {
        self.time = now.saturating_duration_since(self.started).as_secs_f32();
    }

    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }
}

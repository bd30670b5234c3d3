use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Purely visual decay timer left behind by a destroyed asteroid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub duration: u32,
    pub total_duration: u32,
    pub active: bool,
}

impl Explosion {
    pub fn new(x: f32, y: f32, size: f32, config: &GameConfig) -> Self {
        Self {
            x,
            y,
            size,
            duration: config.explosion_duration,
            total_duration: config.explosion_duration,
            active: true,
        }
    }

    pub fn advance(&mut self) {
        self.duration = self.duration.saturating_sub(1);
        if self.duration == 0 {
            self.active = false;
        }
    }

    /// 0.0 when fresh, 1.0 when spent.
    pub fn progress(&self) -> f32 {
        if self.total_duration == 0 {
            return 1.0;
        }
        1.0 - self.duration as f32 / self.total_duration as f32
    }

    /// Outer ring radius, growing from half size to full size.
    pub fn current_radius(&self) -> f32 {
        self.size * (0.5 + self.progress() * 0.5)
    }
}

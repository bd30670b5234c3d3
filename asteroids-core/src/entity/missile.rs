use serde::{Deserialize, Serialize};

use crate::collision::{Aabb, Collider};
use crate::config::GameConfig;
use crate::kinematics::Body;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub body: Body,
    pub size: f32,
    pub lifetime: u32,
    pub active: bool,
}

impl Missile {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, config: &GameConfig) -> Self {
        Self {
            body: Body::moving(x, y, vx, vy),
            size: config.missile_size,
            lifetime: config.missile_lifetime,
            active: true,
        }
    }

    pub fn advance(&mut self, config: &GameConfig) {
        self.body.advance(config.screen_width, config.screen_height);
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.active = false;
        }
    }
}

impl Collider for Missile {
    fn bounds(&self) -> Aabb {
        Aabb::centered(self.body.x, self.body.y, self.size * 2.0, self.size * 2.0)
    }
}

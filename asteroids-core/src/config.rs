use serde::{Deserialize, Serialize};

use crate::constants::{
    ASTEROID_COUNT, ASTEROID_MAX_ROTATION, ASTEROID_MAX_SIZE, ASTEROID_MAX_SPEED,
    ASTEROID_MIN_ROTATION, ASTEROID_MIN_SIZE, ASTEROID_MIN_SPEED, ASTEROID_SPAWN_RATE,
    EXPLOSION_DURATION, FPS, INITIAL_LIVES, MISSILE_LIFETIME, MISSILE_SIZE, MISSILE_SPEED,
    SCREEN_HEIGHT, SCREEN_WIDTH, SHIP_ACCELERATION, SHIP_DRAG, SHIP_ROTATION_SPEED, SHIP_SIZE,
    TITLE_HEIGHT, TITLE_SCREEN_DURATION, TITLE_WIDTH,
};
use crate::error::ConfigError;

/// Read-only tuning for one game. Partial JSON documents only override the
/// fields they name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    pub ship_size: f32,
    pub ship_rotation_speed: f32,
    pub ship_acceleration: f32,
    pub ship_drag: f32,
    pub missile_speed: f32,
    pub missile_lifetime: u32,
    pub missile_size: f32,
    pub asteroid_min_size: i32,
    pub asteroid_max_size: i32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_min_rotation: f32,
    pub asteroid_max_rotation: f32,
    pub asteroid_count: u32,
    pub asteroid_spawn_rate: u32,
    pub explosion_duration: u32,
    pub initial_lives: i32,
    pub title_screen_duration: u32,
    pub title_width: f32,
    pub title_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,
            ship_size: SHIP_SIZE,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_acceleration: SHIP_ACCELERATION,
            ship_drag: SHIP_DRAG,
            missile_speed: MISSILE_SPEED,
            missile_lifetime: MISSILE_LIFETIME,
            missile_size: MISSILE_SIZE,
            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_max_size: ASTEROID_MAX_SIZE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_min_rotation: ASTEROID_MIN_ROTATION,
            asteroid_max_rotation: ASTEROID_MAX_ROTATION,
            asteroid_count: ASTEROID_COUNT,
            asteroid_spawn_rate: ASTEROID_SPAWN_RATE,
            explosion_duration: EXPLOSION_DURATION,
            initial_lives: INITIAL_LIVES,
            title_screen_duration: TITLE_SCREEN_DURATION,
            title_width: TITLE_WIDTH,
            title_height: TITLE_HEIGHT,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("ship_size", self.ship_size),
            ("missile_size", self.missile_size),
            ("title_width", self.title_width),
            ("title_height", self.title_height),
            ("asteroid_min_size", self.asteroid_min_size as f32),
        ];
        for (field, value) in positive {
            if value <= 0.0 || value.is_nan() {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let nonzero = [
            ("fps", self.fps),
            ("missile_lifetime", self.missile_lifetime),
            ("asteroid_spawn_rate", self.asteroid_spawn_rate),
            ("explosion_duration", self.explosion_duration),
            ("title_screen_duration", self.title_screen_duration),
        ];
        for (field, value) in nonzero {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }

        if self.initial_lives <= 0 {
            return Err(ConfigError::NonPositive {
                field: "initial_lives",
                value: self.initial_lives as f32,
            });
        }

        if !(self.ship_drag > 0.0 && self.ship_drag <= 1.0) {
            return Err(ConfigError::DragOutOfRange {
                value: self.ship_drag,
            });
        }

        let ranges = [
            (
                "asteroid_size",
                self.asteroid_min_size as f32,
                self.asteroid_max_size as f32,
            ),
            (
                "asteroid_speed",
                self.asteroid_min_speed,
                self.asteroid_max_speed,
            ),
            (
                "asteroid_rotation",
                self.asteroid_min_rotation,
                self.asteroid_max_rotation,
            ),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange { field, min, max });
            }
        }

        if self.title_width > self.screen_width || self.title_height > self.screen_height {
            return Err(ConfigError::TitleExceedsScreen);
        }

        Ok(())
    }

    /// Screen centre, where the ship spawns.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.screen_width / 2.0).floor(),
            (self.screen_height / 2.0).floor(),
        )
    }
}

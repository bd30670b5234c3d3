//! Built-in tuning values. `GameConfig::default()` is assembled from these.

// World dimensions
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const FPS: u32 = 60;

// Ship
pub const SHIP_SIZE: f32 = 20.0;
pub const SHIP_ROTATION_SPEED: f32 = 5.0; // degrees per tick
pub const SHIP_ACCELERATION: f32 = 0.2;
pub const SHIP_DRAG: f32 = 0.98;

// Missiles
pub const MISSILE_SPEED: f32 = 10.0;
pub const MISSILE_LIFETIME: u32 = 60; // 1s * 60fps
pub const MISSILE_SIZE: f32 = 3.0;

// Asteroids
pub const ASTEROID_MIN_SIZE: i32 = 20;
pub const ASTEROID_MAX_SIZE: i32 = 50;
pub const ASTEROID_MIN_SPEED: f32 = 1.0;
pub const ASTEROID_MAX_SPEED: f32 = 3.0;
pub const ASTEROID_MIN_ROTATION: f32 = -3.0;
pub const ASTEROID_MAX_ROTATION: f32 = 3.0;
pub const ASTEROID_COUNT: u32 = 5;
pub const ASTEROID_SPAWN_RATE: u32 = 120; // 2s * 60fps
pub const ASTEROID_VERTEX_COUNT: usize = 8;
pub const ASTEROID_JITTER_MIN: f32 = 0.7;
pub const ASTEROID_JITTER_MAX: f32 = 1.3;

// Effects and flow
pub const EXPLOSION_DURATION: u32 = 30;
pub const INITIAL_LIVES: i32 = 3;
pub const TITLE_SCREEN_DURATION: u32 = 300; // 5s * 60fps
pub const TITLE_WIDTH: f32 = 400.0;
pub const TITLE_HEIGHT: f32 = 200.0;

// Tape format
pub const TAPE_MAGIC: u32 = 0x3154_5341; // "AST1" little-endian
pub const TAPE_VERSION: u8 = 1;
pub const TAPE_HEADER_SIZE: usize = 16;
pub const TAPE_FOOTER_SIZE: usize = 12;
pub const MAX_FRAMES_DEFAULT: u32 = 108_000; // 30 min at 60fps

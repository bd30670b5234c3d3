//! Game configuration for the command line: built-in defaults, an optional
//! JSON file naming only the fields it changes, then environment overrides.

use anyhow::{Context, Result};
use asteroids_core::constants::MAX_FRAMES_DEFAULT;
use asteroids_core::GameConfig;
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_FPS: &str = "ASTEROIDS_FPS";
pub const ENV_MAX_FRAMES: &str = "ASTEROIDS_MAX_FRAMES";
pub const ENV_ASTEROID_COUNT: &str = "ASTEROIDS_ASTEROID_COUNT";
pub const ENV_SPAWN_RATE: &str = "ASTEROIDS_SPAWN_RATE";
pub const ENV_INITIAL_LIVES: &str = "ASTEROIDS_INITIAL_LIVES";

pub fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn read_env_i32(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn default_max_frames() -> u32 {
    read_env_u32(ENV_MAX_FRAMES, MAX_FRAMES_DEFAULT)
}

pub fn read_config_file(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("invalid config json {}", path.display()))
}

pub fn apply_env_overrides(config: GameConfig) -> GameConfig {
    GameConfig {
        fps: read_env_u32(ENV_FPS, config.fps),
        asteroid_count: read_env_u32(ENV_ASTEROID_COUNT, config.asteroid_count),
        asteroid_spawn_rate: read_env_u32(ENV_SPAWN_RATE, config.asteroid_spawn_rate),
        initial_lives: read_env_i32(ENV_INITIAL_LIVES, config.initial_lives),
        ..config
    }
}

pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let config = apply_env_overrides(read_config_file(path)?);
    config.validate().context("invalid game config")?;
    tracing::debug!(?config, "game config loaded");
    Ok(config)
}

use asteroids_core::game::WorldSnapshot;
use asteroids_core::input::FrameInput;
use asteroids_core::GameConfig;

use super::{start_if_on_title, Pilot};

/// Starts the game and then never touches the controls.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Clicks start, then drifts without input."
    }

    fn reset(&mut self, _seed: u32, _config: &GameConfig) {}

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        start_if_on_title(world).unwrap_or(FrameInput::IDLE)
    }
}

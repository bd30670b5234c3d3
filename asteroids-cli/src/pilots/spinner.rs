use asteroids_core::game::WorldSnapshot;
use asteroids_core::input::FrameInput;
use asteroids_core::rng::SeededRng;
use asteroids_core::GameConfig;

use super::{start_if_on_title, Pilot};

const MIN_FIRE_INTERVAL: i32 = 6;
const MAX_FIRE_INTERVAL: i32 = 14;

/// Turns in place and fires on a fixed cadence picked from the seed.
#[derive(Clone, Debug)]
pub struct SpinnerPilot {
    fire_interval: u32,
    clockwise: bool,
    ticks: u32,
}

impl SpinnerPilot {
    pub fn new() -> Self {
        Self {
            fire_interval: MIN_FIRE_INTERVAL as u32,
            clockwise: true,
            ticks: 0,
        }
    }
}

impl Default for SpinnerPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pilot for SpinnerPilot {
    fn id(&self) -> &'static str {
        "spinner"
    }

    fn description(&self) -> &'static str {
        "Rotates continuously and fires on a seed-chosen cadence."
    }

    fn reset(&mut self, seed: u32, _config: &GameConfig) {
        let mut rng = SeededRng::new(seed);
        self.fire_interval = rng.range_inclusive(MIN_FIRE_INTERVAL, MAX_FIRE_INTERVAL) as u32;
        self.clockwise = rng.next() & 1 == 0;
        self.ticks = 0;
    }

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        if let Some(start) = start_if_on_title(world) {
            return start;
        }

        self.ticks += 1;
        FrameInput {
            left: !self.clockwise,
            right: self.clockwise,
            fire: self.ticks % self.fire_interval == 0,
            ..FrameInput::IDLE
        }
    }
}

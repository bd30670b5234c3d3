use asteroids_core::game::WorldSnapshot;
use asteroids_core::input::FrameInput;
use asteroids_core::kinematics::shortest_delta;
use asteroids_core::rng::SeededRng;
use asteroids_core::GameConfig;

use super::{signed_angle_delta, start_if_on_title, Pilot};

const AIM_TOLERANCE_DEG: f32 = 8.0;
const ENGAGE_RANGE: f32 = 220.0;
const MAX_CRUISE_SPEED: f32 = 2.5;
const THRUST_BURST: u32 = 4;
const THRUST_PERIOD: u32 = 24;

/// Target offset on the torus, measured from the ship.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Bearing {
    dx: f32,
    dy: f32,
}

impl Bearing {
    fn distance(&self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Nose angle that points at the target. Zero is up the screen.
    fn heading_deg(&self) -> f32 {
        self.dx.atan2(-self.dy).to_degrees()
    }
}

/// Turns toward the nearest asteroid, fires when lined up and closes distance
/// with short thrust bursts.
#[derive(Clone, Debug)]
pub struct HunterPilot {
    config: GameConfig,
    fire_cooldown: u32,
    cooldown_left: u32,
    ticks: u32,
}

impl HunterPilot {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            fire_cooldown: 5,
            cooldown_left: 0,
            ticks: 0,
        }
    }

    fn nearest_target(&self, world: &WorldSnapshot) -> Option<Bearing> {
        let (sx, sy) = (world.ship.body.x, world.ship.body.y);
        world
            .asteroids
            .iter()
            .map(|asteroid| Bearing {
                dx: shortest_delta(sx, asteroid.body.x, self.config.screen_width),
                dy: shortest_delta(sy, asteroid.body.y, self.config.screen_height),
            })
            .min_by(|a, b| a.distance().total_cmp(&b.distance()))
    }
}

impl Default for HunterPilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Pilot for HunterPilot {
    fn id(&self) -> &'static str {
        "hunter"
    }

    fn description(&self) -> &'static str {
        "Aims at the nearest asteroid across screen edges and fires when aligned."
    }

    fn reset(&mut self, seed: u32, config: &GameConfig) {
        self.config = *config;
        let mut rng = SeededRng::new(seed);
        self.fire_cooldown = rng.range_inclusive(4, 8) as u32;
        self.cooldown_left = 0;
        self.ticks = 0;
    }

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        if let Some(start) = start_if_on_title(world) {
            return start;
        }

        self.ticks += 1;
        self.cooldown_left = self.cooldown_left.saturating_sub(1);

        let Some(target) = self.nearest_target(world) else {
            return FrameInput::IDLE;
        };

        let delta = signed_angle_delta(world.ship.body.angle, target.heading_deg());
        let turn_step = self.config.ship_rotation_speed / 2.0;
        let aligned = delta.abs() <= AIM_TOLERANCE_DEG;

        let fire = aligned && self.cooldown_left == 0;
        if fire {
            self.cooldown_left = self.fire_cooldown;
        }

        let speed = world.ship.body.vx.hypot(world.ship.body.vy);
        let thrust = aligned
            && target.distance() > ENGAGE_RANGE
            && speed < MAX_CRUISE_SPEED
            && self.ticks % THRUST_PERIOD < THRUST_BURST;

        FrameInput {
            left: delta < -turn_step,
            right: delta > turn_step,
            thrust,
            fire,
            start: false,
        }
    }
}

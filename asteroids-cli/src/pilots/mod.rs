//! Scripted pilots that play the game from world snapshots.

mod hunter;
mod idle;
mod spinner;

use asteroids_core::game::WorldSnapshot;
use asteroids_core::input::FrameInput;
use asteroids_core::{GameConfig, StateId};

pub use hunter::HunterPilot;
pub use idle::IdlePilot;
pub use spinner::SpinnerPilot;

pub trait Pilot: Send {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Called before every run with the seed and the config the game uses.
    fn reset(&mut self, seed: u32, config: &GameConfig);
    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput;
}

pub fn pilot_ids() -> Vec<&'static str> {
    vec!["idle", "spinner", "hunter"]
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    pilot_ids()
        .into_iter()
        .filter_map(|id| create_pilot(id).map(|pilot| (id, pilot.description())))
        .collect()
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot>> {
    match id {
        "idle" => Some(Box::new(IdlePilot)),
        "spinner" => Some(Box::new(SpinnerPilot::new())),
        "hunter" => Some(Box::new(HunterPilot::new())),
        _ => None,
    }
}

/// Every pilot clicks through the title screen.
fn start_if_on_title(world: &WorldSnapshot) -> Option<FrameInput> {
    (world.state == StateId::Title).then_some(FrameInput {
        start: true,
        ..FrameInput::IDLE
    })
}

/// Wraps a heading difference into `[-180, 180)`.
#[inline]
fn signed_angle_delta(current: f32, target: f32) -> f32 {
    (target - current + 180.0).rem_euclid(360.0) - 180.0
}

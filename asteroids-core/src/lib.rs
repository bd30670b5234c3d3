pub mod collision;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod frame_loop;
pub mod game;
pub mod input;
pub mod kinematics;
pub mod render;
pub mod rng;
pub mod tape;
pub mod verify;

pub use config::GameConfig;
pub use error::{ConfigError, TapeError, UnknownState};
pub use game::{Game, StateId};
pub use verify::{verify_tape, VerificationReport};

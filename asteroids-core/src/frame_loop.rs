//! Single-threaded fixed-rate loop: poll, dispatch, update, draw, present,
//! pace. Input, drawing and timing are supplied by the caller.

use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::game::{Game, ReplayResult};
use crate::input::{FrameInput, HeldKeys, InputEvent};
use crate::render::Canvas;

/// Everything a source reports for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolledInput {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl PolledInput {
    /// Expands a compact frame input, clicking at `click_at` for a start.
    pub fn from_frame(input: FrameInput, click_at: (f32, f32)) -> Self {
        Self {
            held: input.held(),
            events: input.events(click_at),
        }
    }

    pub fn quit() -> Self {
        Self {
            held: HeldKeys::default(),
            events: vec![InputEvent::Quit],
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.events.iter().any(|event| matches!(event, InputEvent::Quit))
    }
}

pub trait InputSource {
    /// Called once at the top of every frame. The game is visible so scripted
    /// sources can react to it.
    fn poll(&mut self, game: &Game) -> PolledInput;
}

pub trait FrameClock {
    fn wait_for_next_frame(&mut self);
}

/// Sleeps out whatever is left of each frame's time slice.
#[derive(Clone, Debug)]
pub struct FixedRateClock {
    frame: Duration,
    deadline: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            deadline: None,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl FrameClock for FixedRateClock {
    fn wait_for_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.deadline.unwrap_or(now) + self.frame;
        if deadline > now {
            thread::sleep(deadline - now);
            self.deadline = Some(deadline);
        } else {
            // Fell behind: restart pacing from now instead of bursting.
            self.deadline = Some(now);
        }
    }
}

/// Never sleeps. Counts frames for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnpacedClock {
    frames: u64,
}

impl UnpacedClock {
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameClock for UnpacedClock {
    fn wait_for_next_frame(&mut self) {
        self.frames += 1;
    }
}

/// Replays a fixed list of input bytes, then asks to quit.
#[derive(Clone, Debug)]
pub struct ScriptedInput {
    inputs: Vec<u8>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<u8>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, game: &Game) -> PolledInput {
        let Some(&byte) = self.inputs.get(self.cursor) else {
            return PolledInput::quit();
        };
        self.cursor += 1;
        PolledInput::from_frame(
            crate::input::decode_input_byte(byte),
            game.title().title_rect().center(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Quit,
    FrameLimit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopOutcome {
    pub frames_run: u32,
    pub stop_reason: StopReason,
    pub result: ReplayResult,
}

/// Runs until a quit event or `max_frames` ticks. A frame that carries a quit
/// still completes; the flag is observed at the top of the next iteration.
pub fn run_frames(
    game: &mut Game,
    input: &mut dyn InputSource,
    canvas: &mut dyn Canvas,
    clock: &mut dyn FrameClock,
    max_frames: Option<u32>,
) -> LoopOutcome {
    let mut frames_run = 0u32;
    let mut running = true;

    let stop_reason = loop {
        if !running {
            break StopReason::Quit;
        }
        if max_frames.is_some_and(|limit| frames_run >= limit) {
            break StopReason::FrameLimit;
        }

        let polled = input.poll(game);
        if polled.quit_requested() {
            tracing::info!(frame = game.frame_count(), "quit requested");
            running = false;
        }

        game.handle_events(&polled.events);
        game.update(polled.held);
        game.draw(canvas);
        canvas.present();
        clock.wait_for_next_frame();
        frames_run += 1;
    };

    LoopOutcome {
        frames_run,
        stop_reason,
        result: game.result(),
    }
}

use crate::pilots::{create_pilot, Pilot};
use anyhow::{anyhow, Result};
use asteroids_core::collision::Aabb;
use asteroids_core::frame_loop::{
    run_frames, FixedRateClock, FrameClock, InputSource, PolledInput, StopReason, UnpacedClock,
};
use asteroids_core::input::{encode_input_byte, INPUT_FIRE, INPUT_LEFT, INPUT_RIGHT, INPUT_THRUST};
use asteroids_core::render::{Canvas, Color, DrawCommand, DrawList};
use asteroids_core::tape::serialize_tape;
use asteroids_core::{verify_tape, Game, GameConfig, StateId};
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub pilot_id: String,
    pub seed: u32,
    pub max_frames: u32,
    pub config: GameConfig,
    pub realtime: bool,
    /// 1-based frame whose draw list is kept.
    pub dump_frame: Option<u32>,
}

impl RunOptions {
    pub fn headless(pilot_id: &str, seed: u32, max_frames: u32) -> Self {
        Self {
            pilot_id: pilot_id.to_string(),
            seed,
            max_frames,
            config: GameConfig::default(),
            realtime: false,
            dump_frame: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub pilot_id: String,
    pub seed: u32,
    pub max_frames: u32,
    pub frame_count: u32,
    pub final_score: u32,
    pub final_lives: i32,
    pub final_state: StateId,
    pub game_over: bool,
    pub stop_reason: StopReason,
    pub action_frames: u32,
    pub turn_frames: u32,
    pub thrust_frames: u32,
    pub fire_frames: u32,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    pub inputs: Vec<u8>,
    pub tape: Vec<u8>,
    pub dumped_frame: Option<Vec<DrawCommand>>,
}

pub fn run_pilot(pilot_id: &str, seed: u32, max_frames: u32) -> Result<RunArtifact> {
    run_with_options(&RunOptions::headless(pilot_id, seed, max_frames))
}

pub fn run_with_options(options: &RunOptions) -> Result<RunArtifact> {
    let mut pilot = create_pilot(&options.pilot_id)
        .ok_or_else(|| anyhow!("unknown pilot '{}'", options.pilot_id))?;
    run_pilot_instance(pilot.as_mut(), options)
}

pub fn run_pilot_instance(pilot: &mut dyn Pilot, options: &RunOptions) -> Result<RunArtifact> {
    if options.max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }

    pilot.reset(options.seed, &options.config);
    let pilot_id = pilot.id();
    let mut game = Game::new(options.config, options.seed);
    let mut source = PilotInput::new(pilot, options.max_frames);
    let mut canvas = CapturingCanvas::new(options.dump_frame);
    let mut clock: Box<dyn FrameClock> = if options.realtime {
        Box::new(FixedRateClock::new(options.config.fps))
    } else {
        Box::new(UnpacedClock::default())
    };

    let outcome = run_frames(
        &mut game,
        &mut source,
        &mut canvas,
        clock.as_mut(),
        Some(options.max_frames),
    );
    let inputs = source.inputs;
    let result = outcome.result;

    let tape = serialize_tape(options.seed, &inputs, result.final_score, result.final_lives);
    verify_tape(&tape, options.config, options.max_frames)
        .map_err(|err| anyhow!("generated tape failed verification: {err}"))?;

    let mut action_frames = 0u32;
    let mut turn_frames = 0u32;
    let mut thrust_frames = 0u32;
    let mut fire_frames = 0u32;
    for byte in &inputs {
        if *byte != 0 {
            action_frames += 1;
        }
        if (*byte & (INPUT_LEFT | INPUT_RIGHT)) != 0 {
            turn_frames += 1;
        }
        if (*byte & INPUT_THRUST) != 0 {
            thrust_frames += 1;
        }
        if (*byte & INPUT_FIRE) != 0 {
            fire_frames += 1;
        }
    }

    tracing::info!(
        pilot = pilot_id,
        seed = options.seed,
        frames = result.frame_count,
        score = result.final_score,
        "run finished"
    );

    Ok(RunArtifact {
        metrics: RunMetrics {
            pilot_id: pilot_id.to_string(),
            seed: options.seed,
            max_frames: options.max_frames,
            frame_count: result.frame_count,
            final_score: result.final_score,
            final_lives: result.final_lives,
            final_state: result.final_state,
            game_over: result.final_lives <= 0,
            stop_reason: outcome.stop_reason,
            action_frames,
            turn_frames,
            thrust_frames,
            fire_frames,
        },
        inputs,
        tape,
        dumped_frame: canvas.captured,
    })
}

/// Feeds a pilot's choices into the frame loop and records them as tape
/// bytes. Asks to quit once a started game has fallen back to the title.
struct PilotInput<'a> {
    pilot: &'a mut dyn Pilot,
    inputs: Vec<u8>,
    started: bool,
}

impl<'a> PilotInput<'a> {
    fn new(pilot: &'a mut dyn Pilot, max_frames: u32) -> Self {
        Self {
            pilot,
            inputs: Vec::with_capacity(max_frames as usize),
            started: false,
        }
    }
}

impl InputSource for PilotInput<'_> {
    fn poll(&mut self, game: &Game) -> PolledInput {
        match game.state() {
            StateId::Gameplay => self.started = true,
            StateId::Title if self.started => {
                self.inputs.push(0);
                return PolledInput::quit();
            }
            StateId::Title => {}
        }

        let input = self.pilot.next_input(&game.snapshot());
        self.inputs.push(encode_input_byte(input));
        PolledInput::from_frame(input, game.title().title_rect().center())
    }
}

/// Records every frame and keeps a copy of one of them.
struct CapturingCanvas {
    list: DrawList,
    capture_at: Option<u32>,
    captured: Option<Vec<DrawCommand>>,
}

impl CapturingCanvas {
    fn new(capture_at: Option<u32>) -> Self {
        Self {
            list: DrawList::new(),
            capture_at,
            captured: None,
        }
    }
}

impl Canvas for CapturingCanvas {
    fn fill(&mut self, color: Color) {
        self.list.fill(color);
    }

    fn polygon(&mut self, color: Color, points: &[(f32, f32)], width: u32) {
        self.list.polygon(color, points, width);
    }

    fn circle(&mut self, color: Color, center: (f32, f32), radius: f32, width: u32) {
        self.list.circle(color, center, radius, width);
    }

    fn rect(&mut self, color: Color, rect: Aabb, width: u32) {
        self.list.rect(color, rect, width);
    }

    fn text(&mut self, color: Color, text: &str, size: u32, at: (f32, f32)) {
        self.list.text(color, text, size, at);
    }

    fn text_width(&self, text: &str, size: u32) -> f32 {
        self.list.text_width(text, size)
    }

    fn present(&mut self) {
        self.list.present();
        if self.capture_at == Some(self.list.frames_presented()) {
            self.captured = Some(self.list.last_frame().to_vec());
        }
    }
}

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::entity::{Asteroid, Explosion, Missile, Ship};
use crate::error::UnknownState;
use crate::input::{decode_input_byte, FrameInput, HeldKeys, InputEvent};
use crate::render::{self, Canvas};
use crate::rng::SeededRng;

mod gameplay;
mod title;

pub use gameplay::GameplayState;
pub use title::TitleScreen;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateId {
    Title,
    Gameplay,
}

impl StateId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Gameplay => "gameplay",
        }
    }
}

impl FromStr for StateId {
    type Err = UnknownState;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "title" => Ok(Self::Title),
            "gameplay" => Ok(Self::Gameplay),
            other => Err(UnknownState {
                name: other.to_string(),
            }),
        }
    }
}

/// Score, lives and which state is in charge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    pub lives: i32,
    pub state: StateId,
}

impl Session {
    fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            lives: config.initial_lives,
            state: StateId::Title,
        }
    }

    /// A session that has been played at least once shows its result on the title.
    pub fn has_played(&self, config: &GameConfig) -> bool {
        self.score > 0 || self.lives < config.initial_lives
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame_count: u32,
    pub state: StateId,
    pub score: u32,
    pub lives: i32,
    pub asteroid_timer: u32,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub missiles: Vec<Missile>,
    pub explosions: Vec<Explosion>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayCheckpoint {
    pub frame_count: u32,
    pub state: StateId,
    pub score: u32,
    pub lives: i32,
    pub asteroids: usize,
    pub missiles: usize,
    pub explosions: usize,
    pub ship_x: f32,
    pub ship_y: f32,
    pub ship_vx: f32,
    pub ship_vy: f32,
    pub ship_angle: f32,
    pub rng_state: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayResult {
    pub frame_count: u32,
    pub final_score: u32,
    pub final_lives: i32,
    pub final_state: StateId,
}

/// Two-state flow controller owning the session and both states.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    session: Session,
    title: TitleScreen,
    gameplay: GameplayState,
    rng: SeededRng,
    frame_count: u32,
}

impl Game {
    /// Starts on the title screen with a gameplay state already built behind it.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let mut rng = SeededRng::new(seed);
        let gameplay = GameplayState::new(config, rng.fork());
        Self {
            config,
            session: Session::new(&config),
            title: TitleScreen::new(&config),
            gameplay,
            rng,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> StateId {
        self.session.state
    }

    pub fn title(&self) -> &TitleScreen {
        &self.title
    }

    pub fn gameplay(&self) -> &GameplayState {
        &self.gameplay
    }

    pub fn gameplay_mut(&mut self) -> &mut GameplayState {
        &mut self.gameplay
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Milliseconds of simulated time, used by background animation. An
    /// unvalidated `fps` of zero is treated as one.
    pub fn ticks_ms(&self) -> u64 {
        self.frame_count as u64 * 1_000 / self.config.fps.max(1) as u64
    }

    pub fn change_state(&mut self, state: StateId) {
        if self.session.state != state {
            tracing::info!(
                from = self.session.state.as_str(),
                to = state.as_str(),
                "state change"
            );
        }
        self.session.state = state;
    }

    pub fn change_state_by_name(&mut self, name: &str) -> Result<(), UnknownState> {
        let state = name.parse::<StateId>()?;
        self.change_state(state);
        Ok(())
    }

    /// Full reset: fresh score and lives, and a newly built gameplay state.
    pub fn reset_game(&mut self) {
        self.session.score = 0;
        self.session.lives = self.config.initial_lives;
        self.gameplay = GameplayState::new(self.config, self.rng.fork());
        tracing::info!(lives = self.session.lives, "session reset");
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) {
        match self.session.state {
            StateId::Title => {
                if self.title.handle_events(events) {
                    self.reset_game();
                    self.change_state(StateId::Gameplay);
                }
            }
            StateId::Gameplay => self.gameplay.handle_events(events),
        }
    }

    pub fn update(&mut self, held: HeldKeys) {
        self.frame_count += 1;
        match self.session.state {
            StateId::Title => self.title.update(),
            StateId::Gameplay => {
                if let Some(next) = self.gameplay.update(held, &mut self.session) {
                    self.change_state(next);
                }
            }
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.session.state {
            StateId::Title => render::draw_title(
                canvas,
                &self.config,
                &self.title,
                &self.session,
                self.ticks_ms(),
            ),
            StateId::Gameplay => render::draw_gameplay(
                canvas,
                &self.config,
                &self.gameplay,
                &self.session,
                self.ticks_ms(),
            ),
        }
    }

    /// One tick from a compact input: dispatch its events, then update.
    pub fn step(&mut self, input: FrameInput) {
        let events = input.events(self.title.title_rect().center());
        self.handle_events(&events);
        self.update(input.held());
    }

    #[inline]
    pub fn step_byte(&mut self, input_byte: u8) {
        self.step(decode_input_byte(input_byte));
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame_count: self.frame_count,
            state: self.session.state,
            score: self.session.score,
            lives: self.session.lives,
            asteroid_timer: self.gameplay.asteroid_timer(),
            ship: *self.gameplay.ship(),
            asteroids: self.gameplay.asteroids().to_vec(),
            missiles: self.gameplay.missiles().to_vec(),
            explosions: self.gameplay.explosions().to_vec(),
        }
    }

    pub fn checkpoint(&self) -> ReplayCheckpoint {
        let ship = self.gameplay.ship();
        ReplayCheckpoint {
            frame_count: self.frame_count,
            state: self.session.state,
            score: self.session.score,
            lives: self.session.lives,
            asteroids: self.gameplay.asteroids().len(),
            missiles: self.gameplay.missiles().len(),
            explosions: self.gameplay.explosions().len(),
            ship_x: ship.body.x,
            ship_y: ship.body.y,
            ship_vx: ship.body.vx,
            ship_vy: ship.body.vy,
            ship_angle: ship.body.angle,
            rng_state: self.gameplay.rng_state(),
        }
    }

    pub fn result(&self) -> ReplayResult {
        ReplayResult {
            frame_count: self.frame_count,
            final_score: self.session.score,
            final_lives: self.session.lives,
            final_state: self.session.state,
        }
    }
}

pub fn replay(config: GameConfig, seed: u32, inputs: &[u8]) -> ReplayResult {
    let mut game = Game::new(config, seed);

    for input in inputs {
        game.step_byte(*input);
    }

    game.result()
}

pub fn replay_with_checkpoints(
    config: GameConfig,
    seed: u32,
    inputs: &[u8],
    sample_every: u32,
) -> Vec<ReplayCheckpoint> {
    let mut game = Game::new(config, seed);
    let stride = if sample_every == 0 { 1 } else { sample_every };
    let total_frames = inputs.len() as u32;
    let mut checkpoints = Vec::new();
    checkpoints.push(game.checkpoint());

    for (index, input) in inputs.iter().enumerate() {
        game.step_byte(*input);
        let frame = (index + 1) as u32;
        if frame % stride == 0 || frame == total_frames {
            checkpoints.push(game.checkpoint());
        }
    }

    checkpoints
}

#[cfg(test)]
mod tests;

//! Draw-instruction layer. The simulation never owns a surface; it issues
//! shape and text instructions to a `Canvas` supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::collision::Aabb;
use crate::config::GameConfig;
use crate::entity::{Asteroid, EntityRef, Explosion, Missile, Ship};
use crate::game::{GameplayState, Session, TitleScreen};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BLACK: Color = Color(0, 0, 0);
pub const WHITE: Color = Color(255, 255, 255);
pub const RED: Color = Color(255, 0, 0);
pub const GRAY: Color = Color(128, 128, 128);
pub const DIM: Color = Color(30, 30, 30);

pub const TITLE_FONT_SIZE: u32 = 48;
pub const PROMPT_FONT_SIZE: u32 = 24;
pub const HUD_FONT_SIZE: u32 = 36;
pub const HUD_MARGIN: f32 = 20.0;

const OUTLINE_WIDTH: u32 = 2;
const THIN_WIDTH: u32 = 1;
const FILLED: u32 = 0;

/// A drawing surface. Widths are outline thickness in pixels; 0 means filled.
pub trait Canvas {
    fn fill(&mut self, color: Color);

    fn polygon(&mut self, color: Color, points: &[(f32, f32)], width: u32);

    fn circle(&mut self, color: Color, center: (f32, f32), radius: f32, width: u32);

    fn rect(&mut self, color: Color, rect: Aabb, width: u32);

    /// `at` is the top-left corner of the rendered text.
    fn text(&mut self, color: Color, text: &str, size: u32, at: (f32, f32));

    fn text_width(&self, text: &str, size: u32) -> f32;

    fn present(&mut self);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Fill {
        color: Color,
    },
    Polygon {
        color: Color,
        points: Vec<(f32, f32)>,
        width: u32,
    },
    Circle {
        color: Color,
        center: (f32, f32),
        radius: f32,
        width: u32,
    },
    Rect {
        color: Color,
        rect: Aabb,
        width: u32,
    },
    Text {
        color: Color,
        text: String,
        size: u32,
        x: f32,
        y: f32,
    },
}

/// Recording canvas. Commands accumulate until `present`, which moves them
/// into `last_frame`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DrawList {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u32,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u32 {
        self.frames_presented
    }

    /// Every text string drawn in the pending frame, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.pending
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DrawList {
    fn fill(&mut self, color: Color) {
        self.pending.push(DrawCommand::Fill { color });
    }

    fn polygon(&mut self, color: Color, points: &[(f32, f32)], width: u32) {
        self.pending.push(DrawCommand::Polygon {
            color,
            points: points.to_vec(),
            width,
        });
    }

    fn circle(&mut self, color: Color, center: (f32, f32), radius: f32, width: u32) {
        self.pending.push(DrawCommand::Circle {
            color,
            center,
            radius,
            width,
        });
    }

    fn rect(&mut self, color: Color, rect: Aabb, width: u32) {
        self.pending.push(DrawCommand::Rect { color, rect, width });
    }

    fn text(&mut self, color: Color, text: &str, size: u32, at: (f32, f32)) {
        self.pending.push(DrawCommand::Text {
            color,
            text: text.to_string(),
            size,
            x: at.0,
            y: at.1,
        });
    }

    /// Fixed-advance estimate of half the font size per glyph.
    fn text_width(&self, text: &str, size: u32) -> f32 {
        text.chars().count() as f32 * size as f32 * 0.5
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
    }
}

/// Nose, left wing, right wing.
pub fn ship_hull(ship: &Ship) -> [(f32, f32); 3] {
    let (sin, cos) = ship.body.angle.to_radians().sin_cos();
    let (x, y, size) = (ship.body.x, ship.body.y, ship.size);
    [
        (x + sin * size, y - cos * size),
        (x - cos * size / 2.0, y - sin * size / 2.0),
        (x + cos * size / 2.0, y + sin * size / 2.0),
    ]
}

/// Base, left, tip, right. Points out of the tail, opposite the nose.
pub fn ship_flame(ship: &Ship) -> [(f32, f32); 4] {
    let (sin, cos) = ship.body.angle.to_radians().sin_cos();
    let (x, y, size) = (ship.body.x, ship.body.y, ship.size);
    let back = size / 1.5;
    let side = size / 4.0;
    [
        (x - sin * size / 2.0, y + cos * size / 2.0),
        (x - sin * back - cos * side, y + cos * back - sin * side),
        (x - sin * size, y + cos * size),
        (x - sin * back + cos * side, y + cos * back + sin * side),
    ]
}

pub fn draw_ship(canvas: &mut dyn Canvas, ship: &Ship) {
    canvas.polygon(WHITE, &ship_hull(ship), OUTLINE_WIDTH);
    if ship.thrusting {
        canvas.polygon(RED, &ship_flame(ship), FILLED);
    }
}

pub fn draw_asteroid(canvas: &mut dyn Canvas, asteroid: &Asteroid) {
    canvas.polygon(WHITE, &asteroid.outline(), OUTLINE_WIDTH);
}

pub fn draw_missile(canvas: &mut dyn Canvas, missile: &Missile) {
    canvas.circle(
        WHITE,
        (missile.body.x.trunc(), missile.body.y.trunc()),
        missile.size,
        FILLED,
    );
}

pub fn draw_explosion(canvas: &mut dyn Canvas, explosion: &Explosion) {
    let center = (explosion.x.trunc(), explosion.y.trunc());
    let radius = explosion.current_radius();
    canvas.circle(RED, center, radius.trunc(), OUTLINE_WIDTH);
    canvas.circle(WHITE, center, (radius * 0.7).trunc(), THIN_WIDTH);
}

pub fn draw_entity(canvas: &mut dyn Canvas, entity: EntityRef<'_>) {
    match entity {
        EntityRef::Ship(ship) => draw_ship(canvas, ship),
        EntityRef::Asteroid(asteroid) => draw_asteroid(canvas, asteroid),
        EntityRef::Missile(missile) => draw_missile(canvas, missile),
        EntityRef::Explosion(explosion) => draw_explosion(canvas, explosion),
    }
}

/// "Score: N" top-left and "Lives: N" top-right.
pub fn draw_hud(canvas: &mut dyn Canvas, config: &GameConfig, session: &Session) {
    let score = format!("Score: {}", session.score);
    let lives = format!("Lives: {}", session.lives);
    canvas.text(WHITE, &score, HUD_FONT_SIZE, (HUD_MARGIN, HUD_MARGIN));
    let lives_x = config.screen_width - canvas.text_width(&lives, HUD_FONT_SIZE) - HUD_MARGIN;
    canvas.text(WHITE, &lives, HUD_FONT_SIZE, (lives_x, HUD_MARGIN));
}

fn centred_text(canvas: &mut dyn Canvas, text: &str, size: u32, center_x: f32, y: f32) {
    let x = center_x - (canvas.text_width(text, size) / 2.0).floor();
    canvas.text(WHITE, text, size, (x, y));
}

pub fn draw_title(
    canvas: &mut dyn Canvas,
    config: &GameConfig,
    title: &TitleScreen,
    session: &Session,
    ticks_ms: u64,
) {
    canvas.fill(BLACK);

    let height = (config.screen_height as u64).max(1);
    for i in 0..5u64 {
        let y = (ticks_ms / 50 + i * 100) % height;
        canvas.circle(GRAY, (100.0 + i as f32 * 150.0, y as f32), 30.0, THIN_WIDTH);
    }

    let rect = title.title_rect();
    canvas.rect(WHITE, rect, OUTLINE_WIDTH);
    let (cx, cy) = rect.center();
    centred_text(canvas, "ASTEROIDS", TITLE_FONT_SIZE, cx, cy - 30.0);
    centred_text(canvas, "Click to Start", PROMPT_FONT_SIZE, cx, cy + 20.0);

    if session.has_played(config) {
        draw_hud(canvas, config, session);
    }
}

pub fn draw_gameplay(
    canvas: &mut dyn Canvas,
    config: &GameConfig,
    gameplay: &GameplayState,
    session: &Session,
    ticks_ms: u64,
) {
    canvas.fill(BLACK);

    let width = (config.screen_width as u64).max(1);
    for i in 0..3u64 {
        let x = (ticks_ms / 20 + i * 200) % width;
        canvas.circle(DIM, (x as f32, 100.0 + i as f32 * 150.0), 20.0, THIN_WIDTH);
    }

    for entity in gameplay.entities() {
        draw_entity(canvas, entity);
    }

    draw_hud(canvas, config, session);
}

use serde::{Deserialize, Serialize};

/// Position, velocity and heading shared by everything that moves.
///
/// Units are screen pixels and pixels per tick; `angle` is in degrees and is
/// never normalised, since it only ever feeds periodic trig functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub angle: f32,
}

impl Body {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn moving(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            angle: 0.0,
        }
    }

    /// One fixed tick: integrate velocity, then wrap each axis independently.
    #[inline]
    pub fn advance(&mut self, width: f32, height: f32) {
        self.x = wrap_axis(self.x + self.vx, width);
        self.y = wrap_axis(self.y + self.vy, height);
    }
}

/// Toroidal wrap: below zero teleports to `bound`, past `bound` teleports to zero.
#[inline]
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value < 0.0 {
        bound
    } else if value > bound {
        0.0
    } else {
        value
    }
}

/// Unit heading for a nose angle in degrees. Zero points up the screen.
#[inline]
pub fn heading(angle_deg: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (rad.sin(), -rad.cos())
}

/// Shortest signed offset from `from` to `to` on a ring of length `span`.
#[inline]
pub fn shortest_delta(from: f32, to: f32, span: f32) -> f32 {
    let mut delta = to - from;
    if delta > span / 2.0 {
        delta -= span;
    } else if delta < -span / 2.0 {
        delta += span;
    }
    delta
}

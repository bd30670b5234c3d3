use core::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::collision::{Aabb, Collider};
use crate::config::GameConfig;
use crate::constants::{ASTEROID_JITTER_MAX, ASTEROID_JITTER_MIN, ASTEROID_VERTEX_COUNT};
use crate::kinematics::Body;
use crate::rng::SeededRng;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: f32,
    pub rotation_speed: f32,
    pub alive: bool,
    /// Local, unrotated outline offsets. Fixed at creation.
    pub points: [(f32, f32); ASTEROID_VERTEX_COUNT],
}

impl Asteroid {
    /// Rolls size (unless given), spin, drift and outline from `rng`, in that order.
    pub fn spawn(
        x: f32,
        y: f32,
        size: Option<f32>,
        config: &GameConfig,
        rng: &mut SeededRng,
    ) -> Self {
        let size = size.unwrap_or_else(|| {
            rng.range_inclusive(config.asteroid_min_size, config.asteroid_max_size) as f32
        });
        let rotation_speed =
            rng.range_f32(config.asteroid_min_rotation, config.asteroid_max_rotation);

        let move_angle = rng.range_f32(0.0, TAU);
        let speed = rng.range_f32(config.asteroid_min_speed, config.asteroid_max_speed);
        let body = Body::moving(x, y, move_angle.cos() * speed, move_angle.sin() * speed);

        let mut points = [(0.0, 0.0); ASTEROID_VERTEX_COUNT];
        for (index, point) in points.iter_mut().enumerate() {
            let vertex_angle = TAU * index as f32 / ASTEROID_VERTEX_COUNT as f32;
            let distance = size * rng.range_f32(ASTEROID_JITTER_MIN, ASTEROID_JITTER_MAX);
            *point = (vertex_angle.cos() * distance, vertex_angle.sin() * distance);
        }

        Self {
            body,
            size,
            rotation_speed,
            alive: true,
            points,
        }
    }

    pub fn advance(&mut self, config: &GameConfig) {
        self.body.angle += self.rotation_speed;
        self.body.advance(config.screen_width, config.screen_height);
    }

    /// Outline in screen space, rotated by the accumulated angle.
    pub fn outline(&self) -> [(f32, f32); ASTEROID_VERTEX_COUNT] {
        let (sin, cos) = self.body.angle.to_radians().sin_cos();
        let mut out = [(0.0, 0.0); ASTEROID_VERTEX_COUNT];
        for (slot, (px, py)) in out.iter_mut().zip(self.points) {
            *slot = (
                self.body.x + px * cos - py * sin,
                self.body.y + px * sin + py * cos,
            );
        }
        out
    }
}

impl Collider for Asteroid {
    fn bounds(&self) -> Aabb {
        Aabb::centered(self.body.x, self.body.y, self.size * 2.0, self.size * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_has_jittered_vertices_every_45_degrees() {
        let config = GameConfig::default();
        let mut rng = SeededRng::new(0xA57E_0001);

        for _ in 0..50 {
            let asteroid = Asteroid::spawn(0.0, 0.0, None, &config, &mut rng);
            assert!(asteroid.size >= config.asteroid_min_size as f32);
            assert!(asteroid.size <= config.asteroid_max_size as f32);
            assert!(asteroid.rotation_speed >= config.asteroid_min_rotation);
            assert!(asteroid.rotation_speed <= config.asteroid_max_rotation);

            let speed = asteroid.body.vx.hypot(asteroid.body.vy);
            assert!(speed >= config.asteroid_min_speed - 1e-4);
            assert!(speed <= config.asteroid_max_speed + 1e-4);

            for (index, (px, py)) in asteroid.points.iter().enumerate() {
                let radius = px.hypot(*py);
                assert!(radius >= asteroid.size * ASTEROID_JITTER_MIN - 1e-3);
                assert!(radius <= asteroid.size * ASTEROID_JITTER_MAX + 1e-3);

                let expected = (index as f32 * 45.0).to_radians();
                let actual = py.atan2(*px).rem_euclid(TAU);
                let diff = (actual - expected).abs();
                assert!(diff < 1e-3 || (TAU - diff) < 1e-3, "vertex {index} off angle");
            }
        }
    }

    #[test]
    fn explicit_size_is_kept() {
        let config = GameConfig::default();
        let mut rng = SeededRng::new(3);
        let asteroid = Asteroid::spawn(10.0, 20.0, Some(12.0), &config, &mut rng);
        assert_eq!(asteroid.size, 12.0);
        assert_eq!((asteroid.body.x, asteroid.body.y), (10.0, 20.0));
    }

    #[test]
    fn spin_rotates_outline_but_not_stored_points() {
        let config = GameConfig::default();
        let mut rng = SeededRng::new(99);
        let mut asteroid = Asteroid::spawn(400.0, 300.0, Some(30.0), &config, &mut rng);
        asteroid.rotation_speed = 90.0;
        asteroid.body.vx = 0.0;
        asteroid.body.vy = 0.0;
        let local = asteroid.points;

        asteroid.advance(&config);
        assert_eq!(asteroid.points, local);

        let rotated = asteroid.outline();
        let (px, py) = local[0];
        assert!((rotated[0].0 - (400.0 - py)).abs() < 1e-3);
        assert!((rotated[0].1 - (300.0 + px)).abs() < 1e-3);
    }
}

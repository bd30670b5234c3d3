use serde::{Deserialize, Serialize};

use super::Missile;
use crate::collision::{Aabb, Collider};
use crate::config::GameConfig;
use crate::kinematics::{heading, Body};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    pub size: f32,
    pub thrusting: bool,
    pub acceleration: f32,
}

impl Ship {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            body: Body::at(x, y),
            size: config.ship_size,
            thrusting: false,
            acceleration: 0.0,
        }
    }

    /// `direction` is -1 (counter-clockwise) or +1 (clockwise).
    pub fn rotate(&mut self, direction: i32, config: &GameConfig) {
        self.body.angle += direction as f32 * config.ship_rotation_speed;
    }

    /// Additive per call: holding thrust compounds every tick with no top speed.
    pub fn thrust(&mut self, config: &GameConfig) {
        self.thrusting = true;
        self.acceleration = config.ship_acceleration;
        let (hx, hy) = heading(self.body.angle);
        self.body.vx += hx * self.acceleration;
        self.body.vy += hy * self.acceleration;
    }

    pub fn stop_thrust(&mut self) {
        self.thrusting = false;
        self.acceleration = 0.0;
    }

    pub fn advance(&mut self, config: &GameConfig) {
        if !self.thrusting {
            self.body.vx *= config.ship_drag;
            self.body.vy *= config.ship_drag;
        }
        self.body.advance(config.screen_width, config.screen_height);
    }

    pub fn nose(&self) -> (f32, f32) {
        let (hx, hy) = heading(self.body.angle);
        (self.body.x + hx * self.size, self.body.y + hy * self.size)
    }

    /// The missile inherits the ship's velocity on top of the muzzle speed.
    pub fn fire_missile(&self, config: &GameConfig) -> Missile {
        let (hx, hy) = heading(self.body.angle);
        let (x, y) = self.nose();
        Missile::new(
            x,
            y,
            hx * config.missile_speed + self.body.vx,
            hy * config.missile_speed + self.body.vy,
            config,
        )
    }

    pub fn speed(&self) -> f32 {
        self.body.vx.hypot(self.body.vy)
    }
}

impl Collider for Ship {
    fn bounds(&self) -> Aabb {
        Aabb::centered(self.body.x, self.body.y, self.size, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn rotation_is_unbounded() {
        let config = config();
        let mut ship = Ship::new(400.0, 300.0, &config);
        for _ in 0..100 {
            ship.rotate(1, &config);
        }
        assert_eq!(ship.body.angle, 100.0 * config.ship_rotation_speed);

        for _ in 0..200 {
            ship.rotate(-1, &config);
        }
        assert_eq!(ship.body.angle, -100.0 * config.ship_rotation_speed);
    }

    #[test]
    fn held_thrust_compounds_without_cap() {
        let config = config();
        let mut ship = Ship::new(400.0, 300.0, &config);
        for tick in 1..=50 {
            ship.thrust(&config);
            ship.advance(&config);
            let expected = tick as f32 * config.ship_acceleration;
            assert!((ship.speed() - expected).abs() < 1e-3, "tick {tick}");
        }
        assert!(ship.thrusting);
        assert!(ship.body.vy < 0.0, "zero heading accelerates up the screen");
    }

    #[test]
    fn drag_decays_geometrically_without_sign_flip() {
        let config = config();
        let mut ship = Ship::new(400.0, 300.0, &config);
        ship.body.vx = 3.0;
        ship.body.vy = -2.0;
        ship.stop_thrust();

        let mut previous = ship.speed();
        while previous > 1e-3 {
            ship.advance(&config);
            let current = ship.speed();
            assert!(current < previous);
            assert!((current - previous * config.ship_drag).abs() < 1e-4);
            assert!(ship.body.vx >= 0.0);
            assert!(ship.body.vy <= 0.0);
            previous = current;
        }
    }

    #[test]
    fn missile_spawns_at_nose_with_inherited_velocity() {
        let config = config();
        let mut ship = Ship::new(400.0, 300.0, &config);
        ship.body.angle = 90.0;
        ship.body.vx = 1.5;
        ship.body.vy = 0.5;

        let missile = ship.fire_missile(&config);
        assert!((missile.body.x - (400.0 + config.ship_size)).abs() < 1e-3);
        assert!((missile.body.y - 300.0).abs() < 1e-3);
        assert!((missile.body.vx - (config.missile_speed + 1.5)).abs() < 1e-3);
        assert!((missile.body.vy - 0.5).abs() < 1e-3);
        assert_eq!(missile.lifetime, config.missile_lifetime);
        assert!(missile.active);
    }
}

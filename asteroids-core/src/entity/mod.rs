//! The four things that live in a gameplay field. Each type owns its own
//! kinematic and shape payload; `EntityRef` is the tagged view used where
//! code needs to treat them uniformly.

mod asteroid;
mod explosion;
mod missile;
mod ship;

pub use asteroid::Asteroid;
pub use explosion::Explosion;
pub use missile::Missile;
pub use ship::Ship;

use serde::{Deserialize, Serialize};

use crate::collision::Aabb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Ship,
    Asteroid,
    Missile,
    Explosion,
}

#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Ship(&'a Ship),
    Asteroid(&'a Asteroid),
    Missile(&'a Missile),
    Explosion(&'a Explosion),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Ship(_) => EntityKind::Ship,
            Self::Asteroid(_) => EntityKind::Asteroid,
            Self::Missile(_) => EntityKind::Missile,
            Self::Explosion(_) => EntityKind::Explosion,
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match self {
            Self::Ship(ship) => (ship.body.x, ship.body.y),
            Self::Asteroid(asteroid) => (asteroid.body.x, asteroid.body.y),
            Self::Missile(missile) => (missile.body.x, missile.body.y),
            Self::Explosion(explosion) => (explosion.x, explosion.y),
        }
    }

    /// Explosions are visual only and have no collision box.
    pub fn bounds(&self) -> Option<Aabb> {
        use crate::collision::Collider;

        match self {
            Self::Ship(ship) => Some(ship.bounds()),
            Self::Asteroid(asteroid) => Some(asteroid.bounds()),
            Self::Missile(missile) => Some(missile.bounds()),
            Self::Explosion(_) => None,
        }
    }

    pub fn collides_with(&self, other: &EntityRef<'_>) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some(a), Some(b)) => a.overlaps(&b),
            _ => false,
        }
    }
}

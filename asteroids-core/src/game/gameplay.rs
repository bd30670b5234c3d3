use super::{Session, StateId};
use crate::collision::collides;
use crate::config::GameConfig;
use crate::entity::{Asteroid, EntityRef, Explosion, Missile, Ship};
use crate::input::{HeldKeys, InputEvent, Key};
use crate::rng::SeededRng;

const ASTEROID_VEC_CAPACITY: usize = 32;
const MISSILE_VEC_CAPACITY: usize = 16;

/// The live field: one ship plus unordered asteroid, missile and explosion sets.
#[derive(Clone, Debug)]
pub struct GameplayState {
    config: GameConfig,
    rng: SeededRng,
    ship: Ship,
    asteroids: Vec<Asteroid>,
    missiles: Vec<Missile>,
    explosions: Vec<Explosion>,
    asteroid_timer: u32,
}

impl GameplayState {
    /// Ship at screen centre and the configured number of edge-spawned asteroids.
    pub fn new(config: GameConfig, rng: SeededRng) -> Self {
        let (cx, cy) = config.center();
        let mut state = Self {
            config,
            rng,
            ship: Ship::new(cx, cy, &config),
            asteroids: Vec::with_capacity(ASTEROID_VEC_CAPACITY),
            missiles: Vec::with_capacity(MISSILE_VEC_CAPACITY),
            explosions: Vec::new(),
            asteroid_timer: 0,
        };

        for _ in 0..config.asteroid_count {
            state.spawn_asteroid();
        }

        state
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn asteroid_timer(&self) -> u32 {
        self.asteroid_timer
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    pub fn clear_asteroids(&mut self) {
        self.asteroids.clear();
    }

    pub fn push_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    pub fn push_missile(&mut self, missile: Missile) {
        self.missiles.push(missile);
    }

    /// Every entity in draw order: asteroids, missiles, explosions, ship.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.asteroids
            .iter()
            .map(EntityRef::Asteroid)
            .chain(self.missiles.iter().map(EntityRef::Missile))
            .chain(self.explosions.iter().map(EntityRef::Explosion))
            .chain(core::iter::once(EntityRef::Ship(&self.ship)))
    }

    /// Picks a random edge and drops a new asteroid just outside it.
    pub fn spawn_asteroid(&mut self) {
        let width = self.config.screen_width as i32;
        let height = self.config.screen_height as i32;
        let margin = self.config.asteroid_max_size as f32;

        let (x, y) = match self.rng.range_inclusive(0, 3) {
            0 => (self.rng.range_inclusive(0, width) as f32, -margin),
            1 => (
                width as f32 + margin,
                self.rng.range_inclusive(0, height) as f32,
            ),
            2 => (
                self.rng.range_inclusive(0, width) as f32,
                height as f32 + margin,
            ),
            _ => (-margin, self.rng.range_inclusive(0, height) as f32),
        };

        let asteroid = Asteroid::spawn(x, y, None, &self.config, &mut self.rng);
        tracing::debug!(x, y, size = asteroid.size, "asteroid spawned");
        self.asteroids.push(asteroid);
    }

    /// Firing is edge-triggered: one missile per fire key-down event.
    pub fn handle_events(&mut self, events: &[InputEvent]) {
        for event in events {
            if let InputEvent::KeyDown(Key::Fire) = event {
                let missile = self.ship.fire_missile(&self.config);
                self.missiles.push(missile);
            }
        }
    }

    /// One tick. Returns the state to switch to, if the session just ended.
    pub fn update(&mut self, held: HeldKeys, session: &mut Session) -> Option<StateId> {
        self.apply_controls(held);

        self.ship.advance(&self.config);
        for asteroid in &mut self.asteroids {
            asteroid.advance(&self.config);
        }

        for missile in &mut self.missiles {
            missile.advance(&self.config);
        }
        self.missiles.retain(|missile| missile.active);

        for explosion in &mut self.explosions {
            explosion.advance();
        }
        self.explosions.retain(|explosion| explosion.active);

        self.asteroid_timer += 1;
        if self.asteroid_timer >= self.config.asteroid_spawn_rate {
            self.spawn_asteroid();
            self.asteroid_timer = 0;
        }

        self.resolve_missile_hits(session);
        self.resolve_ship_hit(session)
    }

    fn apply_controls(&mut self, held: HeldKeys) {
        if held.left {
            self.ship.rotate(-1, &self.config);
        }
        if held.right {
            self.ship.rotate(1, &self.config);
        }
        if held.thrust {
            self.ship.thrust(&self.config);
        } else {
            self.ship.stop_thrust();
        }
    }

    /// First match wins: each missile destroys at most the first live asteroid
    /// it overlaps in scan order.
    fn resolve_missile_hits(&mut self, session: &mut Session) {
        let mut any_hit = false;

        for missile in &mut self.missiles {
            for asteroid in &mut self.asteroids {
                if !asteroid.alive {
                    continue;
                }
                if collides(&*missile, &*asteroid) {
                    self.explosions.push(Explosion::new(
                        asteroid.body.x,
                        asteroid.body.y,
                        asteroid.size,
                        &self.config,
                    ));
                    missile.active = false;
                    asteroid.alive = false;
                    session.score += 1;
                    any_hit = true;
                    tracing::debug!(score = session.score, "asteroid destroyed by missile");
                    break;
                }
            }
        }

        if any_hit {
            self.missiles.retain(|missile| missile.active);
            self.asteroids.retain(|asteroid| asteroid.alive);
        }
    }

    /// At most one ship hit per tick. The replacement ship has no grace period.
    fn resolve_ship_hit(&mut self, session: &mut Session) -> Option<StateId> {
        let index = self
            .asteroids
            .iter()
            .position(|asteroid| collides(&self.ship, asteroid))?;

        let asteroid = self.asteroids.remove(index);
        self.explosions.push(Explosion::new(
            asteroid.body.x,
            asteroid.body.y,
            asteroid.size,
            &self.config,
        ));
        session.lives -= 1;

        if session.lives <= 0 {
            tracing::info!(score = session.score, "ship destroyed, game over");
            return Some(StateId::Title);
        }

        tracing::info!(lives = session.lives, "ship destroyed, respawning");
        let (cx, cy) = self.config.center();
        self.ship = Ship::new(cx, cy, &self.config);
        None
    }
}

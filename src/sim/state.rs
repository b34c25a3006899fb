//! World state and entity types
//!
//! Everything a running game owns lives in `World`. Nothing in here touches
//! the host: input arrives through `InputSource`, randomness through the
//! world's seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::{Direction, InputSource};
use crate::{angle_to, colors, polar_to_cartesian};

/// Visible drawing surface (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Something that happened during a tick that the session reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Contact damage landed
    PlayerDamaged { health: u32 },
    /// Health reached zero
    PlayerDied,
    /// A projectile destroyed a zombie
    ZombieKilled { pos: Vec2 },
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
        }
    }

    /// Apply held movement keys, keeping the whole body inside the playfield
    pub fn move_with(&mut self, input: &impl InputSource, bounds: &Playfield) {
        let r = self.radius;
        if input.is_pressed(Direction::Up) && self.pos.y - r > 0.0 {
            self.pos.y = (self.pos.y - self.speed).max(r);
        }
        if input.is_pressed(Direction::Down) && self.pos.y + r < bounds.height {
            self.pos.y = (self.pos.y + self.speed).min(bounds.height - r);
        }
        if input.is_pressed(Direction::Left) && self.pos.x - r > 0.0 {
            self.pos.x = (self.pos.x - self.speed).max(r);
        }
        if input.is_pressed(Direction::Right) && self.pos.x + r < bounds.width {
            self.pos.x = (self.pos.x + self.speed).min(bounds.width - r);
        }
    }

    /// Facing angle toward a target (usually the pointer)
    pub fn aim_angle(&self, target: Vec2) -> f32 {
        angle_to(self.pos, target)
    }

    /// Shoot one projectile from the player's center toward `target`
    pub fn fire(&self, target: Vec2, projectiles: &mut Vec<Projectile>) {
        let vel = polar_to_cartesian(PROJECTILE_SPEED, self.aim_angle(target));
        projectiles.push(Projectile::new(self.pos, vel));
    }

    /// Subtract health, clamped at zero. Returns the remaining health.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Health bar fill, 0-100
    pub fn health_percent(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32 * 100.0
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub pos: Vec2,
    /// Last step taken (recomputed every tick)
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Zombie {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: ZOMBIE_RADIUS,
            speed,
        }
    }

    /// New zombie with a speed drawn from [ZOMBIE_MIN_SPEED, ZOMBIE_MAX_SPEED)
    pub fn spawn(pos: Vec2, rng: &mut impl Rng) -> Self {
        Self::new(pos, rng.random_range(ZOMBIE_MIN_SPEED..ZOMBIE_MAX_SPEED))
    }

    /// Step straight toward the target's current position
    pub fn advance(&mut self, target: Vec2) {
        self.vel = polar_to_cartesian(self.speed, angle_to(self.pos, target));
        self.pos += self.vel;
    }
}

/// A shot fired by the player. Velocity is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// True once the whole circle has left the playfield on any side
    pub fn is_out_of_bounds(&self, bounds: &Playfield) -> bool {
        self.pos.x + self.radius < 0.0
            || self.pos.x - self.radius > bounds.width
            || self.pos.y + self.radius < 0.0
            || self.pos.y - self.radius > bounds.height
    }
}

/// A particle for visual effects (no gameplay effect)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
    /// Opacity, starts at 1 and fades linearly
    pub alpha: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            alpha: 1.0,
        }
    }

    /// Random burst particle: small radius, velocity biased toward small magnitudes
    pub fn burst(pos: Vec2, color: [f32; 4], rng: &mut impl Rng) -> Self {
        let radius = rng.random::<f32>() * PARTICLE_MAX_RADIUS;
        let vx = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * PARTICLE_SPREAD);
        let vy = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * PARTICLE_SPREAD);
        Self::new(pos, Vec2::new(vx, vy), radius, color)
    }

    /// Damp velocity, move, fade
    pub fn advance(&mut self) {
        self.vel *= PARTICLE_DAMPING;
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE;
    }

    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Complete state of one running game
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current playfield (updated on host resize)
    pub bounds: Playfield,
    pub player: Player,
    /// Collections in insertion order (also draw order)
    pub zombies: Vec<Zombie>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub score: u32,
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Fresh world: player centered, no enemies, zero score
    pub fn new(bounds: Playfield, seed: u64) -> Self {
        Self {
            seed,
            bounds,
            player: Player::new(bounds.center()),
            zombies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            kills: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Emit a kill burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2) {
        for _ in 0..BURST_PARTICLES {
            let particle = Particle::burst(pos, colors::ZOMBIE, &mut self.rng);
            self.particles.push(particle);
        }
    }
}

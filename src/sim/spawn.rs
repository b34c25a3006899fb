//! Periodic zombie spawning
//!
//! Fired by the host's interval timer, not the frame loop. Every firing adds
//! one zombie just outside a random edge of the playfield.

use glam::Vec2;
use rand::Rng;

use super::state::{Playfield, World, Zombie};
use crate::consts::{SPAWN_INTERVAL_MS, ZOMBIE_RADIUS};

/// Spawns zombies at a constant rate while active
#[derive(Debug, Clone)]
pub struct Spawner {
    pub period_ms: u32,
    /// Distance outside the edge new zombies appear at
    pub radius: f32,
    active: bool,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            period_ms: SPAWN_INTERVAL_MS,
            radius: ZOMBIE_RADIUS,
            active: false,
        }
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop producing; later timer firings are ignored
    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle one timer firing. Returns whether a zombie was added.
    pub fn on_timer(&self, world: &mut World) -> bool {
        if !self.active {
            return false;
        }
        let pos = edge_position(&world.bounds, self.radius, &mut world.rng);
        let zombie = Zombie::spawn(pos, &mut world.rng);
        log::debug!(
            "Spawned zombie at ({:.0}, {:.0}) speed {:.2}",
            pos.x,
            pos.y,
            zombie.speed
        );
        world.zombies.push(zombie);
        true
    }
}

/// Uniform position along one of the four edges, `offset` outside the bounds
pub fn edge_position(bounds: &Playfield, offset: f32, rng: &mut impl Rng) -> Vec2 {
    if rng.random_bool(0.5) {
        // Left or right edge
        let x = if rng.random_bool(0.5) {
            -offset
        } else {
            bounds.width + offset
        };
        Vec2::new(x, rng.random::<f32>() * bounds.height)
    } else {
        // Top or bottom edge
        let y = if rng.random_bool(0.5) {
            -offset
        } else {
            bounds.height + offset
        };
        Vec2::new(rng.random::<f32>() * bounds.width, y)
    }
}

//! Dead Zone - a top-down zombie survival arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, spawning, combat, session lifecycle)
//! - `renderer`: Drawing interface plus the WebGPU implementation
//! - `platform`: Input state and host scheduling abstraction
//! - `ui`: HUD/screen synchronisation interface
//! - `settings`: Data-driven configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are in playfield units per tick (one tick per animation frame).
pub mod consts {
    /// Player body
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;

    /// Zombies
    pub const ZOMBIE_RADIUS: f32 = 20.0;
    /// Per-instance speed is drawn from [MIN, MAX)
    pub const ZOMBIE_MIN_SPEED: f32 = 1.0;
    pub const ZOMBIE_MAX_SPEED: f32 = 2.0;
    /// Damage dealt to the player per tick of overlap
    pub const CONTACT_DAMAGE: u32 = 1;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Kill burst particles
    pub const BURST_PARTICLES: usize = 8;
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;
    /// Velocity components are (U - 0.5) * U * SPREAD
    pub const PARTICLE_SPREAD: f32 = 6.0;
    pub const PARTICLE_DAMPING: f32 = 0.99;
    pub const PARTICLE_FADE: f32 = 0.01;

    /// Circles "touch" when the gap between them is below this
    pub const CONTACT_SLOP: f32 = 1.0;

    /// Score awarded per zombie kill
    pub const KILL_SCORE: u32 = 10;

    /// Spawn timer period
    pub const SPAWN_INTERVAL_MS: u32 = 1000;

    /// Opacity of the black fill drawn each frame (lower = longer trails)
    pub const TRAIL_FADE_ALPHA: f32 = 0.1;

    /// Facing indicator (gun barrel) dimensions
    pub const BARREL_LENGTH: f32 = 30.0;
    pub const BARREL_WIDTH: f32 = 10.0;

    /// Default playfield used before the host reports its size
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;
}

/// Entity colors (RGBA, authored in sRGB)
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.204, 0.596, 0.859, 1.0]; // #3498db
    pub const ZOMBIE: [f32; 4] = [0.180, 0.800, 0.443, 1.0]; // #2ecc71
    pub const PROJECTILE: [f32; 4] = [0.945, 0.769, 0.059, 1.0]; // #f1c40f
    pub const BARREL: [f32; 4] = [0.333, 0.333, 0.333, 1.0]; // #555
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

/// Angle (radians) of the direction from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Whether two circles overlap (within `CONTACT_SLOP`)
#[inline]
pub fn circles_touch(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) - (radius_a + radius_b) < consts::CONTACT_SLOP
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_to_axes() {
        let origin = Vec2::new(400.0, 300.0);
        assert!(angle_to(origin, Vec2::new(500.0, 300.0)).abs() < 1e-6);
        let down = angle_to(origin, Vec2::new(400.0, 400.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let v = polar_to_cartesian(10.0, 0.0);
        assert!((v.x - 10.0).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_circles_touch_threshold() {
        let a = Vec2::ZERO;
        // Gap of exactly 1 is not contact, anything smaller is
        assert!(!circles_touch(a, 10.0, Vec2::new(31.0, 0.0), 20.0));
        assert!(circles_touch(a, 10.0, Vec2::new(30.5, 0.0), 20.0));
        assert!(circles_touch(a, 10.0, Vec2::new(5.0, 0.0), 20.0));
    }
}

//! Simulation module
//!
//! All gameplay logic lives here. This module stays deterministic and
//! platform-free:
//! - One step per animation frame, no delta time
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - Drawing goes through the `Renderer` trait, scheduling through `Scheduler`

pub mod collision;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CombatRules, resolve_combat};
pub use session::{RunSummary, Session, SessionPhase};
pub use spawn::{Spawner, edge_position};
pub use state::{GameEvent, Particle, Playfield, Player, Projectile, World, Zombie};
pub use tick::{draw, tick};

//! Per-frame simulation step
//!
//! One tick per animation frame: move everything, resolve combat, drop dead
//! and out-of-bounds entities, then draw.

use glam::Vec2;

use super::collision::{CombatRules, resolve_combat};
use super::state::{GameEvent, World};
use crate::colors;
use crate::platform::InputSource;
use crate::renderer::Renderer;

/// Advance the world by one tick and report what happened
pub fn tick(world: &mut World, input: &impl InputSource, rules: &CombatRules) -> Vec<GameEvent> {
    world.time_ticks += 1;

    // Update order: player, projectiles, zombies, particles
    world.player.move_with(input, &world.bounds);

    for projectile in &mut world.projectiles {
        projectile.advance();
    }

    let target = world.player.pos;
    for zombie in &mut world.zombies {
        zombie.advance(target);
    }

    for particle in &mut world.particles {
        particle.advance();
    }

    let mut events = Vec::new();
    resolve_combat(world, rules, &mut events);

    // Cleanup against the bounds as they are now
    let bounds = world.bounds;
    world.projectiles.retain(|p| !p.is_out_of_bounds(&bounds));
    world.particles.retain(|p| !p.is_dead());

    events
}

/// Draw the world: fade the previous frame, then player, particles,
/// projectiles and zombies (collections in insertion order)
pub fn draw(world: &World, renderer: &mut impl Renderer, pointer: Vec2, fade_alpha: f32) {
    renderer.clear_with_trail(fade_alpha);

    let player = &world.player;
    renderer.draw_circle(player.pos, player.radius, colors::PLAYER, 1.0);
    renderer.draw_facing_indicator(player.pos, player.aim_angle(pointer));

    for particle in &world.particles {
        renderer.draw_circle(particle.pos, particle.radius, particle.color, particle.alpha);
    }
    for projectile in &world.projectiles {
        renderer.draw_circle(projectile.pos, projectile.radius, colors::PROJECTILE, 1.0);
    }
    for zombie in &world.zombies {
        renderer.draw_circle(zombie.pos, zombie.radius, colors::ZOMBIE, 1.0);
    }
}

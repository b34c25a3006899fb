//! Collision detection and combat resolution
//!
//! Two circle-overlap checks per zombie, in order: the player (contact
//! damage, every tick of overlap), then every projectile (kill). Deaths are
//! only marked during the scan; the collections are compacted afterwards so
//! no member is skipped or visited twice.

use super::state::{GameEvent, World};
use crate::circles_touch;
use crate::consts::{CONTACT_DAMAGE, KILL_SCORE};

/// Rule switches that change combat outcomes
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatRules {
    /// Spawn kill bursts
    pub particles: bool,
    /// A projectile stops scoring after its first kill in a tick
    pub single_kill_projectiles: bool,
}

/// Resolve zombie/player and zombie/projectile contact for this tick
pub fn resolve_combat(world: &mut World, rules: &CombatRules, events: &mut Vec<GameEvent>) {
    let mut zombie_dead = vec![false; world.zombies.len()];
    let mut projectile_dead = vec![false; world.projectiles.len()];
    let mut bursts = Vec::new();

    for (zi, zombie) in world.zombies.iter().enumerate() {
        // Zombie vs player: damage for every tick of overlap
        let player = &mut world.player;
        if !player.is_dead() && circles_touch(zombie.pos, zombie.radius, player.pos, player.radius) {
            let health = player.apply_damage(CONTACT_DAMAGE);
            events.push(GameEvent::PlayerDamaged { health });
            if health == 0 {
                events.push(GameEvent::PlayerDied);
            }
        }

        // Zombie vs projectiles
        for (pi, projectile) in world.projectiles.iter().enumerate() {
            if rules.single_kill_projectiles && projectile_dead[pi] {
                continue;
            }
            if circles_touch(zombie.pos, zombie.radius, projectile.pos, projectile.radius) {
                bursts.push(projectile.pos);
                world.score += KILL_SCORE;
                world.kills += 1;
                zombie_dead[zi] = true;
                projectile_dead[pi] = true;
                events.push(GameEvent::ZombieKilled { pos: zombie.pos });
            }
        }
    }

    if rules.particles {
        for pos in bursts {
            world.spawn_burst(pos);
        }
    }

    retain_unmarked(&mut world.zombies, &zombie_dead);
    retain_unmarked(&mut world.projectiles, &projectile_dead);
}

/// Drop every element whose mark is set, keeping order
fn retain_unmarked<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !marks[index];
        index += 1;
        keep
    });
}

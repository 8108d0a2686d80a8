#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative combat state for Keystrike.
//!
//! The world owns the weapon slots, the queue of delayed shots, every live
//! projectile and every live enemy. It is mutated exclusively through
//! [`apply`], and each tick runs in a fixed order: cooldowns, due shots,
//! projectiles, enemies and finally collisions.

mod combat;
mod enemies;
mod geometry;
mod projectiles;
mod schedule;
mod weapons;

use std::time::Duration;

use keystrike_core::{Battlefield, Command, Event, Point};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    enemies::EnemyPopulation, projectiles::ProjectileEngine, schedule::ShotSchedule,
    weapons::WeaponControl,
};

const DEFAULT_RNG_SEED: u64 = 0x6b65_7973_7472_696b;

/// Represents the authoritative Keystrike world state.
#[derive(Debug)]
pub struct World {
    battlefield: Battlefield,
    clock: Duration,
    tick_index: u64,
    weapons: WeaponControl,
    schedule: ShotSchedule,
    projectiles: ProjectileEngine,
    enemies: EnemyPopulation,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world with the default battle area and no equipped slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            battlefield: Battlefield::default(),
            clock: Duration::ZERO,
            tick_index: 0,
            weapons: WeaponControl::default(),
            schedule: ShotSchedule::default(),
            projectiles: ProjectileEngine::default(),
            enemies: EnemyPopulation::default(),
            rng: ChaCha8Rng::seed_from_u64(DEFAULT_RNG_SEED),
        }
    }

    fn fire_due_shots(&mut self, out_events: &mut Vec<Event>) {
        while let Some(shot) = self.schedule.pop_due(self.clock) {
            weapons::fire(
                shot,
                self.clock,
                &self.enemies,
                &mut self.projectiles,
                &mut self.schedule,
                &mut self.rng,
                out_events,
            );
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBattlefield {
            battlefield,
            rng_seed,
        } => {
            world.battlefield = battlefield;
            world.clock = Duration::ZERO;
            world.tick_index = 0;
            world.weapons.clear();
            world.schedule.clear();
            world.projectiles.clear();
            world.enemies.clear();
            world.rng = ChaCha8Rng::seed_from_u64(rng_seed);
            out_events.push(Event::BattlefieldConfigured { battlefield });
        }
        Command::EquipSlot {
            key,
            origin,
            weapon,
        } => {
            let weapon_id = weapon.id.clone();
            world.weapons.equip(key, origin, weapon);
            out_events.push(Event::SlotEquipped {
                key,
                weapon: weapon_id,
            });
        }
        Command::TriggerSlot { key } => {
            if world.weapons.trigger(
                key,
                world.clock,
                &world.enemies,
                &mut world.schedule,
                out_events,
            ) {
                world.fire_due_shots(out_events);
            }
        }
        Command::SpawnEnemy {
            archetype,
            side,
            y,
            speed,
        } => {
            let enemy = world.enemies.spawn(
                archetype,
                side,
                y,
                speed,
                world.clock,
                &world.battlefield,
            );
            out_events.push(Event::EnemySpawned {
                enemy: enemy.id(),
                kind: enemy.archetype().id.clone(),
                position: Point::new(enemy.bounds().x, enemy.bounds().y),
                side,
            });
        }
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                dt,
                now: world.clock,
            });

            world.weapons.refresh(world.clock, out_events);
            world.fire_due_shots(out_events);

            let mut detonations = Vec::new();
            world.projectiles.advance(
                world.clock,
                &world.battlefield,
                &world.enemies,
                &mut detonations,
                out_events,
            );
            world
                .enemies
                .advance(world.clock, &world.battlefield, out_events);
            combat::resolve(
                world.clock,
                &mut world.projectiles,
                &mut world.enemies,
                detonations,
                out_events,
            );

            tracing::trace!(
                tick = world.tick_index,
                projectiles = world.projectiles.len(),
                enemies = world.enemies.len(),
                pending_shots = world.schedule.len(),
                "tick resolved"
            );
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use keystrike_core::{Battlefield, CooldownView, EnemyView, ProjectileView};

    use super::World;

    /// Provides read-only access to the active battle area.
    #[must_use]
    pub fn battlefield(world: &World) -> &Battlefield {
        &world.battlefield
    }

    /// World time elapsed since the battle area was configured.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Number of ticks processed since the battle area was configured.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures a read-only view of the live enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        world.enemies.view()
    }

    /// Captures a read-only view of the live projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        world.projectiles.view()
    }

    /// Captures the cooldown state of every equipped slot.
    #[must_use]
    pub fn cooldown_view(world: &World) -> CooldownView {
        world.weapons.view(world.clock)
    }

    /// Number of burst repetitions waiting for their due time.
    #[must_use]
    pub fn pending_shots(world: &World) -> usize {
        world.schedule.len()
    }
}

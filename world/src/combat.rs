//! Collision resolution between projectiles and enemies.

use std::time::Duration;

use keystrike_core::{EnemyId, Event, Point, ProjectileId, WeaponArchetype};

use crate::{
    enemies::EnemyPopulation,
    geometry::projectile_contact,
    projectiles::{Detonation, ProjectileEngine},
};

/// Runs the collision pass for one tick.
///
/// Timed-out explosives detonate first. Every projectile then checks the
/// enemies in population order, skipping enemies it already hit, and stops
/// once its penetration is exhausted. A direct hit with an explosive weapon
/// splashes every other live enemy within the radius of the contact point.
/// Spent projectiles and killed enemies are removed at the end of the pass.
pub(crate) fn resolve(
    now: Duration,
    projectiles: &mut ProjectileEngine,
    enemies: &mut EnemyPopulation,
    detonations: Vec<Detonation>,
    out_events: &mut Vec<Event>,
) {
    for detonation in detonations {
        explode(
            detonation.projectile,
            detonation.position,
            &detonation.weapon,
            None,
            now,
            enemies,
            out_events,
        );
    }

    for projectile in projectiles.as_mut_slice() {
        if projectile.remaining_penetration == 0 {
            continue;
        }

        for index in 0..enemies.len() {
            let enemy = enemies.by_index(index);
            let id = enemy.id();
            if !enemy.is_alive() || projectile.hits.contains(&id) {
                continue;
            }

            let bounds = enemy.bounds();
            let bullet = &projectile.weapon.bullet;
            let Some(contact) = projectile_contact(
                projectile.previous,
                projectile.position,
                bullet.width,
                bullet.height,
                &bounds,
            ) else {
                continue;
            };

            let _ = projectile.hits.insert(id);
            projectile.remaining_penetration = projectile.remaining_penetration.saturating_sub(1);
            strike(
                projectile.id,
                projectile.weapon.damage,
                index,
                false,
                now,
                enemies,
                out_events,
            );

            if projectile.weapon.explosion_radius > 0.0 {
                explode(
                    projectile.id,
                    contact,
                    &projectile.weapon,
                    Some(id),
                    now,
                    enemies,
                    out_events,
                );
            }

            if projectile.remaining_penetration == 0 {
                projectile.spent = true;
                break;
            }
        }
    }

    projectiles.sweep_spent();
    enemies.sweep_dead();
}

fn explode(
    projectile: ProjectileId,
    position: Point,
    weapon: &WeaponArchetype,
    direct_hit: Option<EnemyId>,
    now: Duration,
    enemies: &mut EnemyPopulation,
    out_events: &mut Vec<Event>,
) {
    let radius = weapon.explosion_radius;
    tracing::debug!(
        projectile = projectile.get(),
        x = position.x,
        y = position.y,
        radius,
        "splash detonated"
    );
    out_events.push(Event::SplashDetonated {
        projectile,
        position,
        radius,
    });

    for index in 0..enemies.len() {
        let enemy = enemies.by_index(index);
        if !enemy.is_alive() || Some(enemy.id()) == direct_hit {
            continue;
        }

        if enemy.center().distance(position) <= radius {
            strike(
                projectile,
                weapon.damage,
                index,
                true,
                now,
                enemies,
                out_events,
            );
        }
    }
}

fn strike(
    projectile: ProjectileId,
    damage: f32,
    index: usize,
    splash: bool,
    now: Duration,
    enemies: &mut EnemyPopulation,
    out_events: &mut Vec<Event>,
) {
    let enemy = enemies.by_index_mut(index);
    let outcome = enemy.take_damage(damage, now);
    let position = enemy.center();

    out_events.push(Event::EnemyDamaged {
        enemy: enemy.id(),
        projectile,
        damage: outcome.damage,
        shielded: outcome.shielded,
        shield: enemy.shield(),
        health: enemy.health(),
        splash,
        position,
    });

    if outcome.lethal {
        let archetype = enemy.archetype();
        tracing::debug!(
            enemy = enemy.id().get(),
            kind = %archetype.id,
            score = archetype.score,
            splash,
            "enemy killed"
        );
        out_events.push(Event::EnemyKilled {
            enemy: enemy.id(),
            kind: archetype.id.clone(),
            position,
            score: archetype.score,
            credits: archetype.credits,
            heal: archetype.kill_heal,
        });
    }
}

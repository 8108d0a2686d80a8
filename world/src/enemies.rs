//! Live enemy population: admission, lateral flight, shield regeneration,
//! damage layering and escape detection.

use std::{sync::Arc, time::Duration};

use keystrike_core::{
    per_tick, Battlefield, EnemyArchetype, EnemyId, EnemySnapshot, EnemyView, Event, Point, Rect,
    Side,
};
use keystrike_system_targeting::Candidate;

/// Mutable state of a single enemy.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    archetype: Arc<EnemyArchetype>,
    position: Point,
    speed: f32,
    direction: f32,
    health: f32,
    shield: f32,
    last_damage_at: Duration,
    escape_penalty_applied: bool,
    alive: bool,
}

/// Result of applying one damage instance to an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DamageOutcome {
    /// Damage after block reduction.
    pub(crate) damage: f32,
    /// Indicates whether the shield took the damage.
    pub(crate) shielded: bool,
    /// Indicates whether this damage killed the enemy.
    pub(crate) lethal: bool,
}

impl Enemy {
    pub(crate) fn id(&self) -> EnemyId {
        self.id
    }

    pub(crate) fn archetype(&self) -> &EnemyArchetype {
        &self.archetype
    }

    pub(crate) fn health(&self) -> f32 {
        self.health
    }

    pub(crate) fn shield(&self) -> f32 {
        self.shield
    }

    pub(crate) fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.archetype.width,
            self.archetype.height,
        )
    }

    pub(crate) fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Alive and holding positive health; only such enemies can be hit or tracked.
    pub(crate) fn is_alive(&self) -> bool {
        self.alive && self.health > 0.0
    }

    /// Applies one hit of `raw` damage.
    ///
    /// Block reduces the damage first with a floor of one point. A standing
    /// shield then takes the whole hit and any overflow is discarded; only an
    /// unshielded enemy loses health.
    pub(crate) fn take_damage(&mut self, raw: f32, now: Duration) -> DamageOutcome {
        let damage = (raw - self.archetype.damage_block).max(1.0);
        let shielded = self.shield > 0.0;

        if shielded {
            self.shield = (self.shield - damage).max(0.0);
        } else {
            self.health = (self.health - damage).max(0.0);
        }
        self.last_damage_at = now;

        let lethal = self.alive && self.health <= 0.0;
        if lethal {
            self.alive = false;
        }

        DamageOutcome {
            damage,
            shielded,
            lethal,
        }
    }

    fn regenerate_shield(&mut self, now: Duration) {
        let maximum = self.archetype.shield;
        if self.shield >= maximum || self.archetype.shield_regen_rate <= 0.0 {
            return;
        }

        if now.saturating_sub(self.last_damage_at) >= self.archetype.shield_regen_delay() {
            self.shield = (self.shield + per_tick(self.archetype.shield_regen_rate)).min(maximum);
        }
    }

    fn has_left(&self, battlefield: &Battlefield) -> bool {
        if self.direction > 0.0 {
            self.position.x > battlefield.width
        } else {
            self.position.x + self.archetype.width < 0.0
        }
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.archetype.id.clone(),
            bounds: self.bounds(),
            direction: self.direction,
            health: self.health,
            max_health: self.archetype.health,
            shield: self.shield,
            max_shield: self.archetype.shield,
            color: self.archetype.color,
        }
    }
}

/// Owns every live enemy in insertion order.
#[derive(Debug, Default)]
pub(crate) struct EnemyPopulation {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyPopulation {
    pub(crate) fn clear(&mut self) {
        self.enemies.clear();
        self.next_id = 0;
    }

    /// Admits a new enemy just outside the edge it enters from.
    pub(crate) fn spawn(
        &mut self,
        archetype: Arc<EnemyArchetype>,
        side: Side,
        y: f32,
        speed: f32,
        now: Duration,
        battlefield: &Battlefield,
    ) -> &Enemy {
        let x = match side {
            Side::Left => -archetype.width,
            Side::Right => battlefield.width,
        };
        let id = EnemyId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.enemies.push(Enemy {
            id,
            health: archetype.health,
            shield: archetype.shield,
            archetype,
            position: Point::new(x, y),
            speed: per_tick(speed),
            direction: side.direction(),
            last_damage_at: now,
            escape_penalty_applied: false,
            alive: true,
        });

        &self.enemies[self.enemies.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.enemies.len()
    }

    pub(crate) fn by_index(&self, index: usize) -> &Enemy {
        &self.enemies[index]
    }

    pub(crate) fn by_index_mut(&mut self, index: usize) -> &mut Enemy {
        &mut self.enemies[index]
    }

    /// Looks up an enemy that can still be hit or tracked.
    pub(crate) fn live(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies
            .binary_search_by_key(&id, |enemy| enemy.id)
            .ok()
            .map(|index| &self.enemies[index])
            .filter(|enemy| enemy.is_alive())
    }

    /// Targeting candidates for every enemy that is still alive.
    pub(crate) fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| Candidate::new(enemy.id, enemy.center()))
    }

    /// Moves every enemy, regenerates shields and removes escaped enemies.
    pub(crate) fn advance(
        &mut self,
        now: Duration,
        battlefield: &Battlefield,
        out_events: &mut Vec<Event>,
    ) {
        for enemy in &mut self.enemies {
            if !enemy.alive {
                continue;
            }

            enemy.position.x += enemy.speed * enemy.direction;
            enemy.regenerate_shield(now);

            if enemy.has_left(battlefield) && !enemy.escape_penalty_applied {
                enemy.escape_penalty_applied = true;
                tracing::debug!(
                    enemy = enemy.id.get(),
                    kind = %enemy.archetype.id,
                    damage = enemy.archetype.escape_damage,
                    "enemy escaped"
                );
                out_events.push(Event::EnemyEscaped {
                    enemy: enemy.id,
                    kind: enemy.archetype.id.clone(),
                    position: enemy.center(),
                    damage: enemy.archetype.escape_damage,
                });
            }
        }

        self.enemies.retain(|enemy| !enemy.escape_penalty_applied);
    }

    /// Removes enemies killed during the resolution pass.
    pub(crate) fn sweep_dead(&mut self) {
        self.enemies.retain(|enemy| enemy.alive);
    }

    pub(crate) fn view(&self) -> EnemyView {
        EnemyView::from_snapshots(self.enemies.iter().map(Enemy::snapshot).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystrike_core::{EnemyColor, EnemyKindId};

    fn archetype(health: f32, shield: f32, block: f32) -> Arc<EnemyArchetype> {
        Arc::new(EnemyArchetype {
            id: EnemyKindId::new("test"),
            name: "Test".to_owned(),
            health,
            shield,
            shield_regen_delay_ms: 1_000,
            shield_regen_rate: 60.0,
            damage_block: block,
            speed_min: 60.0,
            speed_max: 60.0,
            spawn_height_min: 0.0,
            spawn_height_max: 1.0,
            spawn_weight: 1.0,
            kill_heal: 0.0,
            escape_damage: 3.0,
            score: 10,
            credits: 0,
            width: 20.0,
            height: 10.0,
            color: EnemyColor::from_rgb(1, 2, 3),
        })
    }

    fn population_with(archetype: Arc<EnemyArchetype>, side: Side) -> EnemyPopulation {
        let mut population = EnemyPopulation::default();
        let _ = population.spawn(
            archetype,
            side,
            100.0,
            60.0,
            Duration::ZERO,
            &Battlefield::new(200.0, 200.0),
        );
        population
    }

    #[test]
    fn shield_absorbs_whole_hit_and_discards_overflow() {
        let mut population = population_with(archetype(10.0, 5.0, 2.0), Side::Left);
        let enemy = population.by_index_mut(0);

        let outcome = enemy.take_damage(10.0, Duration::ZERO);

        assert_eq!(outcome.damage, 8.0);
        assert!(outcome.shielded);
        assert!(!outcome.lethal);
        assert_eq!(enemy.shield(), 0.0);
        assert_eq!(enemy.health(), 10.0);
    }

    #[test]
    fn block_never_reduces_damage_below_one() {
        let mut population = population_with(archetype(10.0, 0.0, 50.0), Side::Left);
        let enemy = population.by_index_mut(0);

        let outcome = enemy.take_damage(3.0, Duration::ZERO);

        assert_eq!(outcome.damage, 1.0);
        assert_eq!(enemy.health(), 9.0);
    }

    #[test]
    fn lethal_damage_reports_death_once() {
        let mut population = population_with(archetype(5.0, 0.0, 0.0), Side::Left);
        let enemy = population.by_index_mut(0);

        assert!(enemy.take_damage(10.0, Duration::ZERO).lethal);
        assert!(!enemy.take_damage(10.0, Duration::ZERO).lethal);
        assert!(!enemy.is_alive());
        assert_eq!(enemy.health(), 0.0);
    }

    #[test]
    fn shield_regenerates_only_after_delay() {
        let mut population = population_with(archetype(10.0, 5.0, 0.0), Side::Left);
        let battlefield = Battlefield::new(10_000.0, 200.0);
        let mut events = Vec::new();
        let _ = population
            .by_index_mut(0)
            .take_damage(4.0, Duration::from_millis(100));

        population.advance(Duration::from_millis(600), &battlefield, &mut events);
        assert_eq!(population.by_index(0).shield(), 1.0);

        population.advance(Duration::from_millis(1_100), &battlefield, &mut events);
        assert_eq!(population.by_index(0).shield(), 2.0);

        for _ in 0..10 {
            population.advance(Duration::from_millis(2_000), &battlefield, &mut events);
        }
        assert_eq!(population.by_index(0).shield(), 5.0);
    }

    #[test]
    fn right_side_enemy_escapes_past_left_edge() {
        let mut population = population_with(archetype(10.0, 0.0, 0.0), Side::Right);
        let battlefield = Battlefield::new(200.0, 200.0);
        let mut events = Vec::new();

        for _ in 0..250 {
            population.advance(Duration::ZERO, &battlefield, &mut events);
        }

        assert_eq!(population.len(), 0);
        let escapes = events
            .iter()
            .filter(|event| matches!(event, Event::EnemyEscaped { .. }))
            .count();
        assert_eq!(escapes, 1);
    }

    #[test]
    fn live_lookup_skips_dead_enemies() {
        let mut population = population_with(archetype(1.0, 0.0, 0.0), Side::Left);
        let id = population.by_index(0).id();
        assert!(population.live(id).is_some());

        let _ = population.by_index_mut(0).take_damage(5.0, Duration::ZERO);

        assert!(population.live(id).is_none());
        population.sweep_dead();
        assert_eq!(population.len(), 0);
    }
}

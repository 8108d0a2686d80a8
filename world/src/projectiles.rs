//! Projectile kinematics and lifecycle.

use std::{collections::HashSet, sync::Arc, time::Duration};

use keystrike_core::{
    heading_vector, normalize_degrees, per_tick, per_tick_squared, Battlefield, EnemyId, Event,
    Point, ProjectileId, ProjectileSnapshot, ProjectileView, SlotKey, WeaponArchetype,
};

use crate::enemies::EnemyPopulation;

/// Fraction of the lifetime after which fading projectiles start to vanish.
const FADE_START: f32 = 0.7;

/// Live projectile owned by the [`ProjectileEngine`].
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) key: SlotKey,
    pub(crate) weapon: Arc<WeaponArchetype>,
    pub(crate) position: Point,
    /// Position at the start of the last move; the launch point before the first.
    pub(crate) previous: Point,
    heading: f32,
    internal_speed: f32,
    speed: f32,
    pub(crate) remaining_penetration: u32,
    pub(crate) hits: HashSet<EnemyId>,
    homing: Option<EnemyId>,
    created_at: Duration,
    opacity: f32,
    pub(crate) spent: bool,
}

impl Projectile {
    fn steer(&mut self, enemies: &EnemyPopulation) {
        let Some(target) = self.homing else {
            return;
        };

        let Some(enemy) = enemies.live(target) else {
            self.homing = None;
            return;
        };

        let bearing = self.position.bearing_to(enemy.center());
        let difference = normalize_degrees(bearing - self.heading);
        let max_turn = per_tick(self.weapon.tracking_angular_speed).max(0.0);
        self.heading = normalize_degrees(self.heading + difference.clamp(-max_turn, max_turn));
    }

    fn fade(&mut self, age: Duration, lifetime: Duration) {
        let progress = age.as_secs_f32() / lifetime.as_secs_f32();
        self.opacity = if progress <= FADE_START {
            1.0
        } else {
            ((1.0 - progress) / (1.0 - FADE_START)).clamp(0.0, 1.0)
        };
    }

    fn integrate(&mut self) {
        let kinematics = &self.weapon.kinematics;
        self.internal_speed += per_tick_squared(kinematics.acceleration);
        self.speed = kinematics.displayed_speed(self.internal_speed);

        let (dx, dy) = heading_vector(self.heading);
        self.previous = self.position;
        self.position = self.position.offset(dx * self.speed, dy * self.speed);
    }

    fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            key: self.key,
            weapon: self.weapon.id.clone(),
            position: self.position,
            heading: self.heading,
            speed: self.speed,
            width: self.weapon.bullet.width,
            height: self.weapon.bullet.height,
            model: self.weapon.bullet.model.clone(),
            opacity: self.opacity,
            remaining_penetration: self.remaining_penetration,
            homing_target: self.homing,
        }
    }
}

/// Explosion owed by a projectile that timed out.
#[derive(Clone, Debug)]
pub(crate) struct Detonation {
    pub(crate) projectile: ProjectileId,
    pub(crate) position: Point,
    pub(crate) weapon: Arc<WeaponArchetype>,
}

/// Owns every live projectile in launch order.
#[derive(Debug, Default)]
pub(crate) struct ProjectileEngine {
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl ProjectileEngine {
    pub(crate) fn clear(&mut self) {
        self.projectiles.clear();
        self.next_id = 0;
    }

    /// Spawns a projectile at `origin` travelling along `heading`.
    pub(crate) fn launch(
        &mut self,
        key: SlotKey,
        weapon: Arc<WeaponArchetype>,
        origin: Point,
        heading: f32,
        homing: Option<EnemyId>,
        now: Duration,
    ) -> ProjectileId {
        let id = ProjectileId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let internal_speed = per_tick(weapon.kinematics.initial_speed);
        self.projectiles.push(Projectile {
            id,
            key,
            position: origin,
            previous: origin,
            heading: normalize_degrees(heading),
            speed: weapon.kinematics.displayed_speed(internal_speed),
            internal_speed,
            remaining_penetration: weapon.penetration,
            hits: HashSet::new(),
            homing,
            created_at: now,
            opacity: 1.0,
            spent: false,
            weapon,
        });

        id
    }

    pub(crate) fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }

    /// Advances every projectile by one tick.
    ///
    /// Projectiles whose lifetime elapsed are removed before moving; explosive
    /// ones leave a [`Detonation`] behind for the combat pass. Projectiles that
    /// leave the cull margin are dropped after moving.
    pub(crate) fn advance(
        &mut self,
        now: Duration,
        battlefield: &Battlefield,
        enemies: &EnemyPopulation,
        detonations: &mut Vec<Detonation>,
        out_events: &mut Vec<Event>,
    ) {
        self.projectiles.retain_mut(|projectile| {
            let age = now.saturating_sub(projectile.created_at);

            if let Some(lifetime) = projectile.weapon.lifetime() {
                if age > lifetime {
                    if projectile.weapon.explosion_radius > 0.0 {
                        detonations.push(Detonation {
                            projectile: projectile.id,
                            position: projectile.position,
                            weapon: Arc::clone(&projectile.weapon),
                        });
                    }
                    out_events.push(Event::ProjectileExpired {
                        projectile: projectile.id,
                        position: projectile.position,
                    });
                    return false;
                }

                if projectile.weapon.fade_out {
                    projectile.fade(age, lifetime);
                }
            }

            projectile.steer(enemies);
            projectile.integrate();

            if !battlefield.retains(projectile.position) {
                out_events.push(Event::ProjectileCulled {
                    projectile: projectile.id,
                });
                return false;
            }

            true
        });
    }

    /// Removes projectiles whose penetration was exhausted.
    pub(crate) fn sweep_spent(&mut self) {
        self.projectiles.retain(|projectile| !projectile.spent);
    }

    pub(crate) fn view(&self) -> ProjectileView {
        ProjectileView::from_snapshots(self.projectiles.iter().map(Projectile::snapshot).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystrike_core::{
        BulletGeometry, BulletKinematics, EnemyArchetype, EnemyColor, EnemyKindId, Side, WeaponId,
    };

    fn weapon(configure: impl FnOnce(&mut WeaponArchetype)) -> Arc<WeaponArchetype> {
        let mut weapon = WeaponArchetype {
            id: WeaponId::new("test"),
            name: "Test".to_owned(),
            damage: 1.0,
            cooldown_ms: 100,
            fire_delay_ms: 0,
            bullets_per_shot: 1,
            burst_count: 1,
            burst_interval_ms: 0,
            bullet: BulletGeometry {
                width: 2.0,
                height: 2.0,
                model: "dot".to_owned(),
            },
            kinematics: BulletKinematics {
                initial_speed: 600.0,
                acceleration: 0.0,
                min_speed: 0.0,
                max_speed: 0.0,
                speed_limit_enabled: false,
            },
            lifetime_ms: 0,
            fade_out: false,
            center_spread_angle: 0.0,
            bullet_spread_angle: 0.0,
            tracking_angular_speed: 0.0,
            explosion_radius: 0.0,
            penetration: 1,
            lock_on_range: 0.0,
            lock_on_target: false,
        };
        configure(&mut weapon);
        Arc::new(weapon)
    }

    fn step(engine: &mut ProjectileEngine, now: Duration) -> (Vec<Detonation>, Vec<Event>) {
        step_among(engine, now, &EnemyPopulation::default())
    }

    fn step_among(
        engine: &mut ProjectileEngine,
        now: Duration,
        enemies: &EnemyPopulation,
    ) -> (Vec<Detonation>, Vec<Event>) {
        let mut detonations = Vec::new();
        let mut events = Vec::new();
        engine.advance(
            now,
            &Battlefield::new(1_000.0, 1_000.0),
            enemies,
            &mut detonations,
            &mut events,
        );
        (detonations, events)
    }

    fn parked_enemy() -> EnemyPopulation {
        let mut enemies = EnemyPopulation::default();
        let _ = enemies.spawn(
            Arc::new(EnemyArchetype {
                id: EnemyKindId::new("target"),
                name: "Target".to_owned(),
                health: 10.0,
                shield: 0.0,
                shield_regen_delay_ms: 0,
                shield_regen_rate: 0.0,
                damage_block: 0.0,
                speed_min: 0.0,
                speed_max: 0.0,
                spawn_height_min: 0.0,
                spawn_height_max: 1.0,
                spawn_weight: 1.0,
                kill_heal: 0.0,
                escape_damage: 0.0,
                score: 0,
                credits: 0,
                width: 20.0,
                height: 10.0,
                color: EnemyColor::from_rgb(0, 0, 0),
            }),
            Side::Left,
            100.0,
            0.0,
            Duration::ZERO,
            &Battlefield::new(1_000.0, 1_000.0),
        );
        enemies
    }

    fn tick(index: u32) -> Duration {
        Duration::from_secs_f64(f64::from(index) / 60.0)
    }

    #[test]
    fn acceleration_is_clamped_by_speed_limit() {
        let mut engine = ProjectileEngine::default();
        let weapon = weapon(|weapon| {
            weapon.kinematics.initial_speed = 60.0;
            weapon.kinematics.acceleration = 3_600.0;
            weapon.kinematics.max_speed = 180.0;
            weapon.kinematics.speed_limit_enabled = true;
        });
        let _ = engine.launch(
            SlotKey::new('Q'),
            weapon,
            Point::new(500.0, 500.0),
            0.0,
            None,
            Duration::ZERO,
        );

        let mut speeds = Vec::new();
        for index in 1..=4 {
            let _ = step(&mut engine, tick(index));
            speeds.push(engine.view().iter().map(|p| p.speed).sum::<f32>());
        }

        assert_eq!(speeds, vec![2.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn fade_out_keeps_full_opacity_until_seventy_percent() {
        let mut engine = ProjectileEngine::default();
        let weapon = weapon(|weapon| {
            weapon.lifetime_ms = 1_000;
            weapon.fade_out = true;
            weapon.kinematics.initial_speed = 0.0;
        });
        let _ = engine.launch(
            SlotKey::new('Q'),
            weapon,
            Point::new(500.0, 500.0),
            0.0,
            None,
            Duration::ZERO,
        );

        let _ = step(&mut engine, Duration::from_millis(650));
        let opacity = engine.view().iter().map(|p| p.opacity).sum::<f32>();
        assert_eq!(opacity, 1.0);

        let _ = step(&mut engine, Duration::from_millis(850));
        let opacity = engine.view().iter().map(|p| p.opacity).sum::<f32>();
        assert!((opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn explosive_projectile_leaves_detonation_on_timeout() {
        let mut engine = ProjectileEngine::default();
        let weapon = weapon(|weapon| {
            weapon.lifetime_ms = 100;
            weapon.explosion_radius = 40.0;
            weapon.kinematics.initial_speed = 0.0;
        });
        let id = engine.launch(
            SlotKey::new('Q'),
            weapon,
            Point::new(300.0, 200.0),
            0.0,
            None,
            Duration::ZERO,
        );

        let (detonations, events) = step(&mut engine, Duration::from_millis(100));
        assert!(detonations.is_empty());
        assert!(events.is_empty());

        let (detonations, events) = step(&mut engine, Duration::from_millis(117));
        assert_eq!(detonations.len(), 1);
        assert_eq!(detonations[0].position, Point::new(300.0, 200.0));
        assert_eq!(
            events,
            vec![Event::ProjectileExpired {
                projectile: id,
                position: Point::new(300.0, 200.0),
            }]
        );
        assert_eq!(engine.len(), 0);
    }

    #[test]
    fn projectiles_beyond_cull_margin_are_dropped() {
        let mut engine = ProjectileEngine::default();
        let id = engine.launch(
            SlotKey::new('Q'),
            weapon(|_| {}),
            Point::new(500.0, -195.0),
            0.0,
            None,
            Duration::ZERO,
        );

        let (_, events) = step(&mut engine, tick(1));

        assert_eq!(events, vec![Event::ProjectileCulled { projectile: id }]);
        assert_eq!(engine.len(), 0);
    }

    #[test]
    fn homing_turn_is_limited_per_tick_towards_live_target() {
        let enemies = parked_enemy();
        let mut engine = ProjectileEngine::default();
        let _ = engine.launch(
            SlotKey::new('Q'),
            weapon(|weapon| weapon.tracking_angular_speed = 60.0),
            Point::new(500.0, 500.0),
            0.0,
            Some(EnemyId::new(0)),
            Duration::ZERO,
        );

        let mut headings = Vec::new();
        for index in 1..=5 {
            let _ = step_among(&mut engine, tick(index), &enemies);
            let snapshot = engine.view().into_vec().remove(0);
            assert_eq!(snapshot.homing_target, Some(EnemyId::new(0)));
            headings.push(snapshot.heading);
        }

        assert_eq!(headings, vec![-1.0, -2.0, -3.0, -4.0, -5.0]);
    }

    #[test]
    fn homing_settles_on_bearing_once_within_turn_limit() {
        let enemies = parked_enemy();
        let mut engine = ProjectileEngine::default();
        let _ = engine.launch(
            SlotKey::new('Q'),
            weapon(|weapon| {
                weapon.tracking_angular_speed = 600.0;
                weapon.kinematics.initial_speed = 0.0;
            }),
            Point::new(-10.0, 500.0),
            -4.0,
            Some(EnemyId::new(0)),
            Duration::ZERO,
        );

        let _ = step_among(&mut engine, tick(1), &enemies);

        let snapshot = engine.view().into_vec().remove(0);
        assert_eq!(snapshot.heading, 0.0);
    }

    #[test]
    fn missing_homing_target_is_forgotten() {
        let mut engine = ProjectileEngine::default();
        let _ = engine.launch(
            SlotKey::new('Q'),
            weapon(|weapon| weapon.tracking_angular_speed = 600.0),
            Point::new(500.0, 500.0),
            30.0,
            Some(EnemyId::new(7)),
            Duration::ZERO,
        );

        let _ = step(&mut engine, tick(1));

        let snapshot = engine.view().into_vec().remove(0);
        assert_eq!(snapshot.homing_target, None);
        assert_eq!(snapshot.heading, 30.0);
    }
}

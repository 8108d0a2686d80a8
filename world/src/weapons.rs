//! Per-key weapon slots: cooldown bookkeeping, lock-on and burst firing.

use std::{sync::Arc, time::Duration};

use keystrike_core::{
    CooldownSnapshot, CooldownView, Event, Point, SlotKey, TriggerRejection, WeaponArchetype,
};
use keystrike_system_targeting::{lock_on, nearest_horizontal};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{
    enemies::EnemyPopulation,
    projectiles::ProjectileEngine,
    schedule::{LockOn, ScheduledShot, ShotSchedule},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    Ready,
    Cooling { since: Duration },
}

/// Weapon bound to a key together with its cooldown state.
#[derive(Clone, Debug)]
struct CooldownSlot {
    key: SlotKey,
    origin: Point,
    weapon: Arc<WeaponArchetype>,
    state: SlotState,
}

impl CooldownSlot {
    fn remaining(&self, now: Duration) -> Duration {
        match self.state {
            SlotState::Ready => Duration::ZERO,
            SlotState::Cooling { since } => self
                .weapon
                .cooldown()
                .saturating_sub(now.saturating_sub(since)),
        }
    }

    fn snapshot(&self, now: Duration) -> CooldownSnapshot {
        CooldownSnapshot {
            key: self.key,
            weapon: self.weapon.id.clone(),
            origin: self.origin,
            ready: self.state == SlotState::Ready,
            remaining: self.remaining(now),
        }
    }
}

/// Cooldown table keyed by slot.
#[derive(Debug, Default)]
pub(crate) struct WeaponControl {
    slots: Vec<CooldownSlot>,
}

impl WeaponControl {
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Binds `weapon` to `key`, replacing any previous binding with a ready slot.
    pub(crate) fn equip(&mut self, key: SlotKey, origin: Point, weapon: Arc<WeaponArchetype>) {
        let slot = CooldownSlot {
            key,
            origin,
            weapon,
            state: SlotState::Ready,
        };

        match self.slots.binary_search_by_key(&key, |slot| slot.key) {
            Ok(index) => self.slots[index] = slot,
            Err(index) => self.slots.insert(index, slot),
        }
    }

    /// Returns slots whose cooldown elapsed to the ready state.
    pub(crate) fn refresh(&mut self, now: Duration, out_events: &mut Vec<Event>) {
        for slot in &mut self.slots {
            if let SlotState::Cooling { since } = slot.state {
                if now.saturating_sub(since) >= slot.weapon.cooldown() {
                    slot.state = SlotState::Ready;
                    out_events.push(Event::SlotReady { key: slot.key });
                }
            }
        }
    }

    /// Attempts to fire the slot bound to `key`.
    ///
    /// The cooldown starts immediately, before any fire delay elapses. A lock
    /// is resolved once here and every repetition of the burst is queued on
    /// `schedule`. Returns `false` when the key is unmapped or still cooling.
    pub(crate) fn trigger(
        &mut self,
        key: SlotKey,
        now: Duration,
        enemies: &EnemyPopulation,
        schedule: &mut ShotSchedule,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Ok(index) = self.slots.binary_search_by_key(&key, |slot| slot.key) else {
            tracing::trace!(%key, "trigger ignored: key is not mapped");
            out_events.push(Event::TriggerRejected {
                key,
                reason: TriggerRejection::UnmappedKey,
            });
            return false;
        };

        let slot = &mut self.slots[index];
        if slot.state != SlotState::Ready {
            let remaining = slot.remaining(now);
            tracing::trace!(%key, ?remaining, "trigger ignored: slot is cooling");
            out_events.push(Event::TriggerRejected {
                key,
                reason: TriggerRejection::Cooling { remaining },
            });
            return false;
        }

        slot.state = SlotState::Cooling { since: now };
        out_events.push(Event::SlotTriggered {
            key,
            weapon: slot.weapon.id.clone(),
            at: now,
        });

        let weapon = &slot.weapon;
        let lock = lock_on(enemies.candidates(), slot.origin, weapon.lock_on_range).map(
            |candidate| LockOn {
                enemy: candidate.id,
                last_known: candidate.center,
            },
        );
        if let Some(lock) = lock {
            tracing::debug!(%key, enemy = lock.enemy.get(), "lock acquired");
            out_events.push(Event::LockAcquired {
                key,
                enemy: lock.enemy,
                position: lock.last_known,
            });
        }

        let burst = schedule.allocate_burst(lock);
        let start = now.saturating_add(weapon.fire_delay());
        for repetition in 0..weapon.burst_count {
            let due = start.saturating_add(weapon.burst_interval() * repetition);
            schedule.schedule(
                due,
                ScheduledShot {
                    burst,
                    key,
                    origin: slot.origin,
                    weapon: Arc::clone(weapon),
                },
            );
        }

        true
    }

    pub(crate) fn view(&self, now: Duration) -> CooldownView {
        CooldownView::from_snapshots(self.slots.iter().map(|slot| slot.snapshot(now)).collect())
    }
}

/// Emits one repetition of a burst.
///
/// A locked repetition aims at the target's current center while it lives and
/// at its last known position once it is gone; only a living target becomes a
/// homing reference. Unlocked repetitions aim straight up with a random
/// offset and home on the horizontally nearest enemy when the weapon tracks.
pub(crate) fn fire(
    shot: ScheduledShot,
    now: Duration,
    enemies: &EnemyPopulation,
    projectiles: &mut ProjectileEngine,
    schedule: &mut ShotSchedule,
    rng: &mut ChaCha8Rng,
    out_events: &mut Vec<Event>,
) {
    let weapon = &shot.weapon;

    let (aim, homing) = match schedule.lock(shot.burst) {
        Some(lock) => match enemies.live(lock.enemy) {
            Some(enemy) => {
                let center = enemy.center();
                schedule.remember(shot.burst, center);
                let homing = weapon.lock_on_target.then_some(lock.enemy);
                (shot.origin.bearing_to(center), homing)
            }
            None => (shot.origin.bearing_to(lock.last_known), None),
        },
        None => {
            let aim = spread(rng, weapon.center_spread_angle);
            let homing = if weapon.lock_on_target {
                nearest_horizontal(enemies.candidates(), shot.origin.x).map(|target| target.id)
            } else {
                None
            };
            (aim, homing)
        }
    };

    for _ in 0..weapon.bullets_per_shot {
        let heading = aim + spread(rng, weapon.bullet_spread_angle);
        let _ = projectiles.launch(
            shot.key,
            Arc::clone(weapon),
            shot.origin,
            heading,
            homing,
            now,
        );
    }

    out_events.push(Event::ShotFired {
        key: shot.key,
        weapon: weapon.id.clone(),
        position: shot.origin,
        heading: aim,
        projectiles: weapon.bullets_per_shot,
    });

    schedule.settle(shot.burst);
}

/// Random offset within half of `angle` on either side; a zero spread draws nothing.
fn spread(rng: &mut ChaCha8Rng, angle: f32) -> f32 {
    let half = angle / 2.0;
    if half <= 0.0 {
        0.0
    } else {
        rng.gen_range(-half..=half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystrike_core::{BulletGeometry, BulletKinematics, WeaponId};

    fn weapon(cooldown_ms: u32, burst_count: u32) -> Arc<WeaponArchetype> {
        Arc::new(WeaponArchetype {
            id: WeaponId::new("test"),
            name: "Test".to_owned(),
            damage: 1.0,
            cooldown_ms,
            fire_delay_ms: 50,
            bullets_per_shot: 1,
            burst_count,
            burst_interval_ms: 20,
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
        })
    }

    #[test]
    fn cooling_slot_rejects_with_remaining_time() {
        let mut control = WeaponControl::default();
        let mut schedule = ShotSchedule::default();
        let enemies = EnemyPopulation::default();
        let key = SlotKey::new('Q');
        control.equip(key, Point::new(10.0, 500.0), weapon(300, 1));
        let mut events = Vec::new();

        assert!(control.trigger(key, Duration::ZERO, &enemies, &mut schedule, &mut events));
        assert!(!control.trigger(
            key,
            Duration::from_millis(100),
            &enemies,
            &mut schedule,
            &mut events
        ));

        assert_eq!(
            events.last(),
            Some(&Event::TriggerRejected {
                key,
                reason: TriggerRejection::Cooling {
                    remaining: Duration::from_millis(200),
                },
            })
        );
    }

    #[test]
    fn refresh_readies_slot_once_cooldown_elapses() {
        let mut control = WeaponControl::default();
        let mut schedule = ShotSchedule::default();
        let enemies = EnemyPopulation::default();
        let key = SlotKey::new('W');
        control.equip(key, Point::new(10.0, 500.0), weapon(300, 1));
        let mut events = Vec::new();
        let _ = control.trigger(key, Duration::ZERO, &enemies, &mut schedule, &mut events);
        events.clear();

        control.refresh(Duration::from_millis(299), &mut events);
        assert!(events.is_empty());

        control.refresh(Duration::from_millis(300), &mut events);
        assert_eq!(events, vec![Event::SlotReady { key }]);
        assert!(control.view(Duration::from_millis(300)).get(key).is_some_and(|slot| slot.ready));
    }

    #[test]
    fn burst_repetitions_follow_fire_delay_and_interval() {
        let mut control = WeaponControl::default();
        let mut schedule = ShotSchedule::default();
        let enemies = EnemyPopulation::default();
        let key = SlotKey::new('E');
        control.equip(key, Point::new(10.0, 500.0), weapon(300, 3));
        let mut events = Vec::new();
        let _ = control.trigger(key, Duration::ZERO, &enemies, &mut schedule, &mut events);

        assert_eq!(schedule.len(), 3);
        assert!(schedule.pop_due(Duration::from_millis(49)).is_none());
        assert!(schedule.pop_due(Duration::from_millis(50)).is_some());
        assert!(schedule.pop_due(Duration::from_millis(69)).is_none());
        assert!(schedule.pop_due(Duration::from_millis(70)).is_some());
        assert!(schedule.pop_due(Duration::from_millis(90)).is_some());
        assert_eq!(schedule.len(), 0);
    }

    #[test]
    fn unmapped_key_is_rejected() {
        let mut control = WeaponControl::default();
        let mut schedule = ShotSchedule::default();
        let mut events = Vec::new();
        let key = SlotKey::new('Z');

        assert!(!control.trigger(
            key,
            Duration::ZERO,
            &EnemyPopulation::default(),
            &mut schedule,
            &mut events
        ));
        assert_eq!(
            events,
            vec![Event::TriggerRejected {
                key,
                reason: TriggerRejection::UnmappedKey,
            }]
        );
    }
}

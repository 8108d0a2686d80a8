#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Translates combat events into fire-and-forget audio and visual cues.

use std::collections::BTreeSet;

use keystrike_core::{Event, Point};
use serde::{Deserialize, Serialize};

/// Category tag attached to every cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CueCategory {
    /// A burst repetition left its slot.
    ShotFired,
    /// A trigger locked onto an enemy.
    LockAcquired,
    /// A projectile damaged an enemy's health.
    Hit,
    /// A projectile was absorbed by an enemy's shield.
    ShieldHit,
    /// An enemy was destroyed.
    Kill,
    /// An explosive projectile detonated.
    Splash,
    /// An enemy left the battle area unharmed.
    Escape,
}

/// Discrete cue delivered to an [`EffectsSink`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Category of the cue.
    pub category: CueCategory,
    /// Screen-space position the cue originates from.
    pub position: Point,
}

/// Audio/visual collaborator notified of combat cues.
pub trait EffectsSink {
    /// Receives a single cue. Return values are never consumed.
    fn notify(&mut self, cue: Cue);
}

impl<F> EffectsSink for F
where
    F: FnMut(Cue),
{
    fn notify(&mut self, cue: Cue) {
        self(cue);
    }
}

/// Pure system that dispatches cues for combat events.
#[derive(Debug, Default)]
pub struct Cues {
    muted: BTreeSet<CueCategory>,
}

impl Cues {
    /// Creates a cue dispatcher with every category enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses cues of the provided category.
    pub fn mute(&mut self, category: CueCategory) {
        let _ = self.muted.insert(category);
    }

    /// Re-enables cues of the provided category.
    pub fn unmute(&mut self, category: CueCategory) {
        let _ = self.muted.remove(&category);
    }

    /// Consumes world events and forwards the matching cues to `sink`.
    pub fn handle<S>(&self, events: &[Event], sink: &mut S)
    where
        S: EffectsSink + ?Sized,
    {
        for event in events {
            let Some(cue) = cue_for(event) else {
                continue;
            };
            if !self.muted.contains(&cue.category) {
                sink.notify(cue);
            }
        }
    }
}

fn cue_for(event: &Event) -> Option<Cue> {
    let (category, position) = match event {
        Event::ShotFired { position, .. } => (CueCategory::ShotFired, *position),
        Event::LockAcquired { position, .. } => (CueCategory::LockAcquired, *position),
        Event::EnemyDamaged {
            shielded, position, ..
        } => {
            let category = if *shielded {
                CueCategory::ShieldHit
            } else {
                CueCategory::Hit
            };
            (category, *position)
        }
        Event::SplashDetonated { position, .. } => (CueCategory::Splash, *position),
        Event::EnemyKilled { position, .. } => (CueCategory::Kill, *position),
        Event::EnemyEscaped { position, .. } => (CueCategory::Escape, *position),
        _ => return None,
    };

    Some(Cue { category, position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystrike_core::{EnemyId, EnemyKindId, ProjectileId, SlotKey, WeaponId};

    fn damaged(shielded: bool) -> Event {
        Event::EnemyDamaged {
            enemy: EnemyId::new(1),
            projectile: ProjectileId::new(2),
            damage: 3.0,
            shielded,
            shield: 0.0,
            health: 4.0,
            splash: false,
            position: Point::new(5.0, 6.0),
        }
    }

    #[test]
    fn shielded_damage_maps_to_shield_hit() {
        let mut cues = Vec::new();
        Cues::new().handle(&[damaged(true), damaged(false)], &mut |cue: Cue| cues.push(cue));

        let categories: Vec<CueCategory> = cues.iter().map(|cue| cue.category).collect();
        assert_eq!(categories, vec![CueCategory::ShieldHit, CueCategory::Hit]);
        assert_eq!(cues[0].position, Point::new(5.0, 6.0));
    }

    #[test]
    fn bookkeeping_events_produce_no_cues() {
        let mut count = 0;
        Cues::new().handle(
            &[
                Event::SlotReady {
                    key: SlotKey::new('Q'),
                },
                Event::SlotEquipped {
                    key: SlotKey::new('Q'),
                    weapon: WeaponId::new("blaster"),
                },
            ],
            &mut |_: Cue| count += 1,
        );

        assert_eq!(count, 0);
    }

    #[test]
    fn muted_categories_are_suppressed() {
        let mut dispatcher = Cues::new();
        dispatcher.mute(CueCategory::Kill);
        let kill = Event::EnemyKilled {
            enemy: EnemyId::new(1),
            kind: EnemyKindId::new("drone"),
            position: Point::new(0.0, 0.0),
            score: 1,
            credits: 0,
            heal: 0.0,
        };
        let mut delivered = Vec::new();

        dispatcher.handle(&[kill.clone()], &mut |cue: Cue| delivered.push(cue));
        assert!(delivered.is_empty());

        dispatcher.unmute(CueCategory::Kill);
        dispatcher.handle(&[kill], &mut |cue: Cue| delivered.push(cue));
        assert_eq!(delivered.len(), 1);
    }
}

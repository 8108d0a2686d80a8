#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Routes kill and escape events to the player's progression ledger.
//!
//! The world never touches player state directly. This system observes
//! `EnemyKilled` and `EnemyEscaped` events and turns them into calls on an
//! injected [`PlayerLedger`], keeping running totals for run summaries.

use keystrike_core::Event;

/// Resources granted for destroying enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Run score.
    Score,
    /// Currency spent on meta-progression.
    Credits,
}

/// Player collaborator that owns health and resource bookkeeping.
pub trait PlayerLedger {
    /// Applies damage to the player.
    fn take_damage(&mut self, amount: f32);

    /// Restores player health.
    fn heal(&mut self, amount: f32);

    /// Grants an amount of the provided resource.
    fn add_resource(&mut self, kind: ResourceKind, amount: u32);
}

/// Running totals accumulated by [`Rewards`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RewardTotals {
    /// Enemies destroyed.
    pub kills: u32,
    /// Enemies that escaped.
    pub escapes: u32,
    /// Score granted.
    pub score: u64,
    /// Credits granted.
    pub credits: u64,
    /// Health restored to the player.
    pub healed: f32,
    /// Damage dealt to the player.
    pub damage_taken: f32,
}

/// Pure system that forwards combat outcomes to a [`PlayerLedger`].
#[derive(Debug, Default)]
pub struct Rewards {
    totals: RewardTotals,
}

impl Rewards {
    /// Creates a new rewards system with zeroed totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals accumulated since the system was created.
    #[must_use]
    pub const fn totals(&self) -> RewardTotals {
        self.totals
    }

    /// Consumes world events and settles them against `ledger`.
    pub fn handle<L>(&mut self, events: &[Event], ledger: &mut L)
    where
        L: PlayerLedger + ?Sized,
    {
        for event in events {
            match event {
                Event::EnemyKilled {
                    kind,
                    score,
                    credits,
                    heal,
                    ..
                } => {
                    self.totals.kills = self.totals.kills.saturating_add(1);
                    if *score > 0 {
                        ledger.add_resource(ResourceKind::Score, *score);
                        self.totals.score = self.totals.score.saturating_add(u64::from(*score));
                    }
                    if *credits > 0 {
                        ledger.add_resource(ResourceKind::Credits, *credits);
                        self.totals.credits =
                            self.totals.credits.saturating_add(u64::from(*credits));
                    }
                    if *heal > 0.0 {
                        ledger.heal(*heal);
                        self.totals.healed += *heal;
                    }
                    tracing::trace!(%kind, score, credits, heal, "kill rewarded");
                }
                Event::EnemyEscaped { kind, damage, .. } => {
                    self.totals.escapes = self.totals.escapes.saturating_add(1);
                    if *damage > 0.0 {
                        ledger.take_damage(*damage);
                        self.totals.damage_taken += *damage;
                    }
                    tracing::trace!(%kind, damage, "escape penalised");
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystrike_core::{EnemyId, EnemyKindId, Point};

    #[derive(Default)]
    struct Journal {
        entries: Vec<String>,
    }

    impl PlayerLedger for Journal {
        fn take_damage(&mut self, amount: f32) {
            self.entries.push(format!("damage {amount}"));
        }

        fn heal(&mut self, amount: f32) {
            self.entries.push(format!("heal {amount}"));
        }

        fn add_resource(&mut self, kind: ResourceKind, amount: u32) {
            self.entries.push(format!("{kind:?} {amount}"));
        }
    }

    fn killed(score: u32, credits: u32, heal: f32) -> Event {
        Event::EnemyKilled {
            enemy: EnemyId::new(1),
            kind: EnemyKindId::new("drone"),
            position: Point::new(0.0, 0.0),
            score,
            credits,
            heal,
        }
    }

    #[test]
    fn kill_grants_resources_and_heal() {
        let mut rewards = Rewards::new();
        let mut journal = Journal::default();

        rewards.handle(&[killed(10, 2, 1.5)], &mut journal);

        assert_eq!(journal.entries, vec!["Score 10", "Credits 2", "heal 1.5"]);
        assert_eq!(rewards.totals().score, 10);
        assert_eq!(rewards.totals().kills, 1);
    }

    #[test]
    fn zero_rewards_are_not_forwarded() {
        let mut rewards = Rewards::new();
        let mut journal = Journal::default();

        rewards.handle(&[killed(0, 0, 0.0)], &mut journal);

        assert!(journal.entries.is_empty());
        assert_eq!(rewards.totals().kills, 1);
    }

    #[test]
    fn escape_damages_player() {
        let mut rewards = Rewards::new();
        let mut journal = Journal::default();

        rewards.handle(
            &[Event::EnemyEscaped {
                enemy: EnemyId::new(4),
                kind: EnemyKindId::new("drone"),
                position: Point::new(0.0, 0.0),
                damage: 3.0,
            }],
            &mut journal,
        );

        assert_eq!(journal.entries, vec!["damage 3"]);
        assert_eq!(rewards.totals().escapes, 1);
        assert_eq!(rewards.totals().damage_taken, 3.0);
    }
}

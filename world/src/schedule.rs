//! Queue of delayed shots produced by fire delays and burst spacing.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use keystrike_core::{EnemyId, Point, SlotKey, WeaponArchetype};

/// Identifier shared by every repetition of one trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct BurstId(u64);

/// Target a trigger committed to, with the position it was last seen at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LockOn {
    pub(crate) enemy: EnemyId,
    pub(crate) last_known: Point,
}

/// One repetition of a burst awaiting its due time.
#[derive(Clone, Debug)]
pub(crate) struct ScheduledShot {
    pub(crate) burst: BurstId,
    pub(crate) key: SlotKey,
    pub(crate) origin: Point,
    pub(crate) weapon: Arc<WeaponArchetype>,
}

/// Pending shots ordered by due time, then by insertion.
#[derive(Debug, Default)]
pub(crate) struct ShotSchedule {
    queue: BTreeMap<(Duration, u64), ScheduledShot>,
    locks: BTreeMap<BurstId, LockOn>,
    next_sequence: u64,
    next_burst: u64,
}

impl ShotSchedule {
    pub(crate) fn clear(&mut self) {
        self.queue.clear();
        self.locks.clear();
        self.next_sequence = 0;
        self.next_burst = 0;
    }

    /// Reserves an identifier for a new trigger, remembering its lock if any.
    pub(crate) fn allocate_burst(&mut self, lock: Option<LockOn>) -> BurstId {
        let burst = BurstId(self.next_burst);
        self.next_burst = self.next_burst.wrapping_add(1);
        if let Some(lock) = lock {
            let _ = self.locks.insert(burst, lock);
        }
        burst
    }

    pub(crate) fn schedule(&mut self, due: Duration, shot: ScheduledShot) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        let _ = self.queue.insert((due, sequence), shot);
    }

    /// Removes the earliest shot due at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<ScheduledShot> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > now {
            return None;
        }

        let (_, shot) = self.queue.pop_first()?;
        Some(shot)
    }

    pub(crate) fn lock(&self, burst: BurstId) -> Option<LockOn> {
        self.locks.get(&burst).copied()
    }

    /// Records where a locked target was last seen alive.
    pub(crate) fn remember(&mut self, burst: BurstId, position: Point) {
        if let Some(lock) = self.locks.get_mut(&burst) {
            lock.last_known = position;
        }
    }

    /// Drops lock bookkeeping once the last repetition of a burst has fired.
    pub(crate) fn settle(&mut self, burst: BurstId) {
        if !self.queue.values().any(|shot| shot.burst == burst) {
            let _ = self.locks.remove(&burst);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}

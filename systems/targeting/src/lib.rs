#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects deterministic targets for firing slots.
//!
//! Two policies are offered. [`lock_on`] resolves the target a slot commits
//! to when it is triggered, and [`nearest_horizontal`] resolves the fallback
//! homing target for unlocked shots. Both break distance ties by preferring
//! the smaller enemy identifier so replays never depend on iteration order.

use keystrike_core::{EnemyId, Point};

/// Enemy considered as a potential target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Center of the enemy.
    pub center: Point,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    pub const fn new(id: EnemyId, center: Point) -> Self {
        Self { id, center }
    }
}

/// Resolves the lock-on target for a slot firing from `origin`.
///
/// Only enemies whose center lies within `range` pixels of the firing point
/// along the horizontal axis are eligible. Among those the enemy with the
/// smallest Euclidean distance to the firing point wins. A non-positive range
/// disables lock-on.
pub fn lock_on<I>(candidates: I, origin: Point, range: f32) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    if range <= 0.0 {
        return None;
    }

    select(
        candidates
            .into_iter()
            .filter(|candidate| (candidate.center.x - origin.x).abs() <= range),
        |candidate| origin.distance(candidate.center),
    )
}

/// Resolves the enemy whose center is horizontally closest to `x`.
pub fn nearest_horizontal<I>(candidates: I, x: f32) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    select(candidates, |candidate| (candidate.center.x - x).abs())
}

fn select<I, F>(candidates: I, mut distance: F) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
    F: FnMut(&Candidate) -> f32,
{
    let mut best: Option<BestCandidate> = None;

    for candidate in candidates {
        let current = BestCandidate {
            distance: distance(&candidate),
            candidate,
        };

        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map(|best| best.candidate)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance: f32,
    candidate: Candidate,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }

        self.candidate.id < other.candidate.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u32, x: f32, y: f32) -> Candidate {
        Candidate::new(EnemyId::new(id), Point::new(x, y))
    }

    #[test]
    fn lock_on_prefers_nearest_within_horizontal_range() {
        let origin = Point::new(100.0, 500.0);
        let pool = vec![
            candidate(1, 100.0, 50.0),
            candidate(2, 140.0, 300.0),
            candidate(3, 400.0, 480.0),
        ];

        let target = lock_on(pool, origin, 60.0).expect("target in range");

        assert_eq!(target.id, EnemyId::new(2));
    }

    #[test]
    fn lock_on_ignores_enemies_outside_horizontal_range() {
        let origin = Point::new(100.0, 500.0);
        let pool = vec![candidate(1, 300.0, 490.0)];

        assert!(lock_on(pool, origin, 150.0).is_none());
    }

    #[test]
    fn lock_on_disabled_for_zero_range() {
        let origin = Point::new(100.0, 500.0);
        let pool = vec![candidate(1, 100.0, 490.0)];

        assert!(lock_on(pool, origin, 0.0).is_none());
    }

    #[test]
    fn equal_distances_prefer_smaller_identifier() {
        let origin = Point::new(100.0, 500.0);
        let pool = vec![candidate(9, 130.0, 460.0), candidate(4, 70.0, 460.0)];

        let target = lock_on(pool, origin, 100.0).expect("target in range");

        assert_eq!(target.id, EnemyId::new(4));
    }

    #[test]
    fn nearest_horizontal_ignores_vertical_distance() {
        let pool = vec![candidate(1, 210.0, 490.0), candidate(2, 195.0, 10.0)];

        let target = nearest_horizontal(pool, 200.0).expect("non-empty pool");

        assert_eq!(target.id, EnemyId::new(2));
    }

    #[test]
    fn empty_pool_produces_no_target() {
        assert!(nearest_horizontal(Vec::new(), 10.0).is_none());
        assert!(lock_on(Vec::new(), Point::new(0.0, 0.0), 10.0).is_none());
    }
}

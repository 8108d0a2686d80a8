#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.
//!
//! Spawns are paced by an interval accumulator fed from `TimeAdvanced`
//! events. Each spawn draws an archetype by weight, flips a coin for the
//! entry side and samples speed and height from the archetype's ranges.

use std::{sync::Arc, time::Duration};

use keystrike_core::{Battlefield, Command, EnemyArchetype, EnemyKindId, Event, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
    ramp_step: Duration,
    minimum_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
            ramp_step: Duration::ZERO,
            minimum_interval: spawn_interval,
        }
    }

    /// Shrinks the interval by `step` after every spawn until it reaches `minimum`.
    #[must_use]
    pub fn with_ramp(mut self, step: Duration, minimum: Duration) -> Self {
        self.ramp_step = step;
        self.minimum_interval = minimum;
        self
    }
}

/// Wave descriptor supplied by the level collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaveDirective {
    /// Interval that replaces the ramped default while the wave is active.
    pub spawn_interval: Option<Duration>,
    /// Archetypes allowed to spawn; `None` allows every archetype.
    pub allowed: Option<Vec<EnemyKindId>>,
}

impl WaveDirective {
    fn allows(&self, kind: &EnemyKindId) -> bool {
        self.allowed
            .as_ref()
            .map_or(true, |allowed| allowed.contains(kind))
    }
}

/// Pure system that deterministically emits spawn commands.
#[derive(Debug)]
pub struct Spawning {
    archetypes: Vec<Arc<EnemyArchetype>>,
    spawn_interval: Duration,
    ramp_step: Duration,
    minimum_interval: Duration,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system drawing from the supplied archetype pool.
    #[must_use]
    pub fn new(config: Config, archetypes: Vec<Arc<EnemyArchetype>>) -> Self {
        Self {
            archetypes,
            spawn_interval: config.spawn_interval,
            ramp_step: config.ramp_step,
            minimum_interval: config.minimum_interval.min(config.spawn_interval),
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Interval the system currently spawns at when no wave overrides it.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Consumes events and the active battle area to emit spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        battlefield: &Battlefield,
        wave: Option<&WaveDirective>,
        out: &mut Vec<Command>,
    ) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::BattlefieldConfigured { .. } => {
                    self.accumulator = Duration::ZERO;
                    accumulated = Duration::ZERO;
                }
                Event::TimeAdvanced { dt, .. } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if accumulated.is_zero() {
            return;
        }
        self.accumulator = self.accumulator.saturating_add(accumulated);

        loop {
            let interval = wave
                .and_then(|wave| wave.spawn_interval)
                .unwrap_or(self.spawn_interval);
            if interval.is_zero() || self.accumulator < interval {
                break;
            }
            self.accumulator -= interval;

            if let Some(command) = self.spawn(battlefield, wave) {
                out.push(command);
            }

            if wave.and_then(|wave| wave.spawn_interval).is_none() {
                self.ramp();
            }
        }
    }

    fn spawn(&mut self, battlefield: &Battlefield, wave: Option<&WaveDirective>) -> Option<Command> {
        let pool: Vec<&Arc<EnemyArchetype>> = self
            .archetypes
            .iter()
            .filter(|archetype| wave.map_or(true, |wave| wave.allows(&archetype.id)))
            .collect();
        let weights: Vec<f32> = pool.iter().map(|archetype| archetype.spawn_weight).collect();

        let Some(index) = weighted_pick(&mut self.rng, &weights) else {
            tracing::trace!("spawn skipped: no eligible archetype");
            return None;
        };
        let archetype = Arc::clone(pool[index]);

        let side = pick_side(&mut self.rng);
        let speed = sample(&mut self.rng, archetype.speed_min, archetype.speed_max);
        let fraction = sample(
            &mut self.rng,
            archetype.spawn_height_min,
            archetype.spawn_height_max,
        );
        let y = spawn_height(battlefield, archetype.height, fraction);

        tracing::debug!(kind = %archetype.id, ?side, y, speed, "spawning enemy");
        Some(Command::SpawnEnemy {
            archetype,
            side,
            y,
            speed,
        })
    }

    fn ramp(&mut self) {
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(self.ramp_step)
            .max(self.minimum_interval);
    }
}

/// Draws an index with probability proportional to its weight.
///
/// A value `r` is drawn uniformly from `[0, total)` and the first index whose
/// cumulative weight reaches `r` wins. Non-positive weights are never drawn;
/// `None` is returned when no weight is positive.
pub fn weighted_pick<R: Rng>(rng: &mut R, weights: &[f32]) -> Option<usize> {
    let total: f64 = weights
        .iter()
        .filter(|weight| **weight > 0.0)
        .map(|weight| f64::from(*weight))
        .sum();
    if total <= 0.0 {
        return None;
    }

    let r = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (index, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += f64::from(*weight);
        if cumulative >= r {
            return Some(index);
        }
        last = Some(index);
    }

    last
}

/// Flips a fair coin for the edge an enemy enters from.
pub fn pick_side<R: Rng>(rng: &mut R) -> Side {
    if rng.gen_bool(0.5) {
        Side::Left
    } else {
        Side::Right
    }
}

/// Maps a spawn height fraction onto the spawn band; `0` rests the enemy on
/// the bottom of the band and `1` aligns it with the top.
#[must_use]
pub fn spawn_height(battlefield: &Battlefield, enemy_height: f32, fraction: f32) -> f32 {
    let travel = (battlefield.spawn_band_bottom - battlefield.spawn_band_top - enemy_height).max(0.0);
    battlefield.spawn_band_bottom - enemy_height - fraction * travel
}

fn sample(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_pick_matches_weights_over_many_draws() {
        let weights = [20.0, 8.0, 10.0, 2.0];
        let total: f32 = weights.iter().sum();
        let mut rng = ChaCha8Rng::seed_from_u64(0x00c0_ffee);
        let mut counts = [0_u32; 4];
        let draws = 100_000;

        for _ in 0..draws {
            let index = weighted_pick(&mut rng, &weights).expect("positive weights");
            counts[index] += 1;
        }

        for (count, weight) in counts.iter().zip(weights.iter()) {
            let observed = f64::from(*count) / f64::from(draws);
            let expected = f64::from(*weight / total);
            assert!(
                (observed - expected).abs() < 0.01,
                "observed {observed} expected {expected}"
            );
        }
    }

    #[test]
    fn spawn_side_is_a_fair_coin() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x51de);
        let draws: u32 = 100_000;

        let left = (0..draws)
            .filter(|_| pick_side(&mut rng) == Side::Left)
            .count();

        let observed = left as f64 / f64::from(draws);
        assert!((observed - 0.5).abs() < 0.01, "left ratio {observed}");
    }

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1_000 {
            assert_eq!(weighted_pick(&mut rng, &[0.0, 5.0, 0.0]), Some(1));
        }
        assert_eq!(weighted_pick(&mut rng, &[0.0, 0.0]), None);
        assert_eq!(weighted_pick(&mut rng, &[]), None);
    }

    #[test]
    fn spawn_height_inverts_fraction() {
        let battlefield = Battlefield::new(800.0, 600.0).with_spawn_band(100.0, 400.0);

        assert_eq!(spawn_height(&battlefield, 20.0, 0.0), 380.0);
        assert_eq!(spawn_height(&battlefield, 20.0, 1.0), 100.0);
        assert_eq!(spawn_height(&battlefield, 20.0, 0.5), 240.0);
    }

    #[test]
    fn ramp_stops_at_minimum() {
        let config = Config::new(Duration::from_millis(1_000), 1)
            .with_ramp(Duration::from_millis(300), Duration::from_millis(500));
        let mut spawning = Spawning::new(config, Vec::new());

        spawning.ramp();
        assert_eq!(spawning.spawn_interval(), Duration::from_millis(700));
        spawning.ramp();
        assert_eq!(spawning.spawn_interval(), Duration::from_millis(500));
        spawning.ramp();
        assert_eq!(spawning.spawn_interval(), Duration::from_millis(500));
    }
}

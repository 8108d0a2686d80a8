//! Drives the world, systems and player collaborators for one run.

use std::{collections::BTreeMap, fmt, time::Duration};

use keystrike_core::{Battlefield, Command, Event};
use keystrike_rendering::{FrameInput, Scene};
use keystrike_system_cues::{Cue, CueCategory, Cues, EffectsSink};
use keystrike_system_rewards::{PlayerLedger, ResourceKind, Rewards};
use keystrike_system_spawning::Spawning;
use keystrike_world::{self as world, query, World};

/// Health the pilot starts each run with.
const STARTING_HEALTH: f32 = 100.0;

/// Player collaborator owning health and the run's resources.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Pilot {
    health: f32,
    max_health: f32,
    score: u64,
    credits: u64,
}

impl Pilot {
    fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            score: 0,
            credits: 0,
        }
    }
}

impl PlayerLedger for Pilot {
    fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    fn add_resource(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Score => self.score += u64::from(amount),
            ResourceKind::Credits => self.credits += u64::from(amount),
        }
    }
}

/// Effects sink that counts cues per category.
#[derive(Debug, Default)]
struct CueTally {
    counts: BTreeMap<CueCategory, u32>,
}

impl CueTally {
    fn count(&self, category: CueCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

impl EffectsSink for CueTally {
    fn notify(&mut self, cue: Cue) {
        *self.counts.entry(cue.category).or_insert(0) += 1;
    }
}

/// Outcome of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) ticks: u64,
    pub(crate) elapsed: Duration,
    pub(crate) health: f32,
    pub(crate) score: u64,
    pub(crate) credits: u64,
    pub(crate) kills: u32,
    pub(crate) escapes: u32,
    pub(crate) shots: u32,
    pub(crate) hits: u32,
    pub(crate) rejected: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== RUN SUMMARY ===")?;
        writeln!(
            f,
            "  Time:     {:.2}s ({} ticks)",
            self.elapsed.as_secs_f64(),
            self.ticks
        )?;
        writeln!(f, "  Health:   {:.1}", self.health)?;
        writeln!(f, "  Score:    {}", self.score)?;
        writeln!(f, "  Credits:  {}", self.credits)?;
        writeln!(f, "  Kills:    {}", self.kills)?;
        writeln!(f, "  Escapes:  {}", self.escapes)?;
        writeln!(f, "  Shots:    {}", self.shots)?;
        writeln!(f, "  Hits:     {}", self.hits)?;
        write!(f, "  Rejected: {}", self.rejected)
    }
}

/// Live run combining the authoritative world with its systems.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    spawning: Spawning,
    rewards: Rewards,
    cues: Cues,
    pilot: Pilot,
    tally: CueTally,
    rejected: u32,
}

impl Session {
    /// Configures a fresh world and equips it with `loadout` commands.
    pub(crate) fn new(
        battlefield: Battlefield,
        seed: u64,
        loadout: Vec<Command>,
        spawning: Spawning,
    ) -> Self {
        let mut session = Self {
            world: World::new(),
            spawning,
            rewards: Rewards::new(),
            cues: Cues::new(),
            pilot: Pilot::new(STARTING_HEALTH),
            tally: CueTally::default(),
            rejected: 0,
        };

        let _ = session.submit(Command::ConfigureBattlefield {
            battlefield,
            rng_seed: seed,
        });
        for command in loadout {
            let _ = session.submit(command);
        }
        session
    }

    /// Applies one command and dispatches the resulting events to collaborators.
    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        self.rejected += events
            .iter()
            .filter(|event| matches!(event, Event::TriggerRejected { .. }))
            .count() as u32;
        self.rewards.handle(&events, &mut self.pilot);
        self.cues.handle(&events, &mut self.tally);
        events
    }

    /// Runs one frame: key presses, one tick, spawning, then a scene refresh.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        for key in input.pressed_keys {
            let _ = self.submit(Command::TriggerSlot { key });
        }

        let events = self.submit(Command::Tick { dt });
        let mut commands = Vec::new();
        self.spawning.handle(
            &events,
            query::battlefield(&self.world),
            None,
            &mut commands,
        );
        for command in commands {
            let _ = self.submit(command);
        }

        scene.refresh(
            &query::enemy_view(&self.world),
            &query::projectile_view(&self.world),
            &query::cooldown_view(&self.world),
        );
    }

    /// Summarises the run so far.
    pub(crate) fn summary(&self) -> Summary {
        let totals = self.rewards.totals();
        Summary {
            ticks: query::tick_index(&self.world),
            elapsed: query::clock(&self.world),
            health: self.pilot.health,
            score: self.pilot.score,
            credits: self.pilot.credits,
            kills: totals.kills,
            escapes: totals.escapes,
            shots: self.tally.count(CueCategory::ShotFired),
            hits: self.tally.count(CueCategory::Hit) + self.tally.count(CueCategory::ShieldHit),
            rejected: self.rejected,
        }
    }
}

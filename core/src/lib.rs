#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Keystrike combat engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches or calls into
//! injected collaborators.

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

/// Nominal simulation rate used to convert per-second archetype rates.
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Converts a per-second rate into the equivalent per-tick rate.
#[must_use]
pub fn per_tick(rate_per_second: f32) -> f32 {
    rate_per_second / TICKS_PER_SECOND
}

/// Converts a per-second-squared rate into the equivalent per-tick-squared rate.
#[must_use]
pub fn per_tick_squared(rate_per_second_squared: f32) -> f32 {
    rate_per_second_squared / (TICKS_PER_SECOND * TICKS_PER_SECOND)
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the world and configures the battle area.
    ConfigureBattlefield {
        /// Layout of the battle area and its spawn band.
        battlefield: Battlefield,
        /// Seed for the world's spread randomness.
        rng_seed: u64,
    },
    /// Binds a weapon archetype to a key slot, resetting its cooldown.
    EquipSlot {
        /// Key that triggers the slot.
        key: SlotKey,
        /// Screen-space firing point of the slot.
        origin: Point,
        /// Weapon archetype after meta-progression modifiers were applied.
        weapon: Arc<WeaponArchetype>,
    },
    /// Requests that the slot mapped to `key` fires at the current world time.
    TriggerSlot {
        /// Key that was pressed.
        key: SlotKey,
    },
    /// Requests that a new enemy enters the battle area.
    SpawnEnemy {
        /// Archetype describing the enemy.
        archetype: Arc<EnemyArchetype>,
        /// Edge the enemy enters from.
        side: Side,
        /// Vertical position of the enemy's top edge.
        y: f32,
        /// Horizontal speed in pixels per second.
        speed: f32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the battle area was (re)configured.
    BattlefieldConfigured {
        /// Layout that became active.
        battlefield: Battlefield,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// World time after the tick.
        now: Duration,
    },
    /// Confirms that a weapon was bound to a slot.
    SlotEquipped {
        /// Key of the slot.
        key: SlotKey,
        /// Weapon bound to the slot.
        weapon: WeaponId,
    },
    /// Confirms that a slot accepted a trigger and began cooling down.
    SlotTriggered {
        /// Key of the slot.
        key: SlotKey,
        /// Weapon bound to the slot.
        weapon: WeaponId,
        /// World time at which the cooldown started.
        at: Duration,
    },
    /// Reports that a trigger was ignored.
    TriggerRejected {
        /// Key that was pressed.
        key: SlotKey,
        /// Reason the trigger was ignored.
        reason: TriggerRejection,
    },
    /// Announces that a slot finished cooling down.
    SlotReady {
        /// Key of the slot.
        key: SlotKey,
    },
    /// Announces that a trigger locked onto an enemy.
    LockAcquired {
        /// Key of the slot that acquired the lock.
        key: SlotKey,
        /// Enemy that was locked.
        enemy: EnemyId,
        /// Center of the enemy at lock time.
        position: Point,
    },
    /// Announces that one repetition of a burst emitted projectiles.
    ShotFired {
        /// Key of the firing slot.
        key: SlotKey,
        /// Weapon that fired.
        weapon: WeaponId,
        /// Firing point.
        position: Point,
        /// Aim heading in degrees, 0 pointing up.
        heading: f32,
        /// Number of projectiles emitted by the repetition.
        projectiles: u32,
    },
    /// Reports that a projectile reached the end of its lifetime.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
        /// Last position of the projectile.
        position: Point,
    },
    /// Reports that a projectile left the battle area and was discarded.
    ProjectileCulled {
        /// Identifier of the culled projectile.
        projectile: ProjectileId,
    },
    /// Confirms that an enemy entered the battle area.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyKindId,
        /// Top-left corner of the enemy at spawn time.
        position: Point,
        /// Edge the enemy entered from.
        side: Side,
    },
    /// Reports damage applied to an enemy, either directly or by splash.
    EnemyDamaged {
        /// Enemy that took damage.
        enemy: EnemyId,
        /// Projectile responsible for the damage.
        projectile: ProjectileId,
        /// Damage after block reduction.
        damage: f32,
        /// Indicates whether the shield absorbed the damage.
        shielded: bool,
        /// Remaining shield after the hit.
        shield: f32,
        /// Remaining health after the hit.
        health: f32,
        /// Indicates whether the damage came from an explosion.
        splash: bool,
        /// Center of the enemy at the time of the hit.
        position: Point,
    },
    /// Reports that an explosive projectile detonated.
    SplashDetonated {
        /// Projectile that detonated.
        projectile: ProjectileId,
        /// Center of the explosion.
        position: Point,
        /// Radius of the explosion in pixels.
        radius: f32,
    },
    /// Reports that an enemy was destroyed.
    EnemyKilled {
        /// Enemy that was destroyed.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyKindId,
        /// Center of the enemy at the time of death.
        position: Point,
        /// Score awarded for the kill.
        score: u32,
        /// Credits awarded for the kill.
        credits: u32,
        /// Health restored to the player.
        heal: f32,
    },
    /// Reports that an enemy left the battle area unharmed.
    EnemyEscaped {
        /// Enemy that escaped.
        enemy: EnemyId,
        /// Archetype of the enemy.
        kind: EnemyKindId,
        /// Center of the enemy when it escaped.
        position: Point,
        /// Damage dealt to the player.
        damage: f32,
    },
}

/// Reasons a slot trigger may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerRejection {
    /// No slot is bound to the pressed key.
    UnmappedKey,
    /// The slot is still cooling down.
    Cooling {
        /// Time left until the slot becomes ready.
        remaining: Duration,
    },
}

/// Keyboard key that identifies a weapon slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(char);

impl SlotKey {
    /// Creates a slot key, normalising letters to upper case.
    #[must_use]
    pub fn new(key: char) -> Self {
        Self(key.to_ascii_uppercase())
    }

    /// Parses a slot key from a single-character string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let mut chars = value.trim().chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(key))
    }

    /// Retrieves the key character.
    #[must_use]
    pub const fn get(&self) -> char {
        self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Catalog identifier of a weapon archetype.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponId(String);

impl WeaponId {
    /// Creates a new weapon identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog identifier of an enemy archetype.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyKindId(String);

impl EnemyKindId {
    /// Creates a new enemy archetype identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Screen-space position measured in pixels, with `y` growing downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading in degrees from this point towards `other`, 0 pointing up and
    /// positive angles turning clockwise.
    #[must_use]
    pub fn bearing_to(self, other: Point) -> f32 {
        (other.x - self.x).atan2(self.y - other.y).to_degrees()
    }

    /// Offsets the point by the provided displacement.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Unit displacement for a heading in degrees, 0 pointing up.
#[must_use]
pub fn heading_vector(heading: f32) -> (f32, f32) {
    let radians = heading.to_radians();
    (radians.sin(), -radians.cos())
}

/// Wraps an angle in degrees into the half-open range `(-180, 180]`.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the provided size centred on `center`.
    #[must_use]
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Geometric center.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Grows the rectangle by `dx` on the left and right and `dy` on the top and bottom.
    #[must_use]
    pub fn expanded(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Reports whether two rectangles overlap, touching edges included.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// Layout of the battle area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Battlefield {
    /// Width of the battle area in pixels.
    pub width: f32,
    /// Height of the battle area in pixels.
    pub height: f32,
    /// Upper edge of the band enemies spawn within.
    pub spawn_band_top: f32,
    /// Lower edge of the band enemies spawn within.
    pub spawn_band_bottom: f32,
    /// Distance beyond the battle area a projectile may travel before it is culled.
    pub cull_margin: f32,
}

impl Battlefield {
    /// Creates a battle area with a spawn band covering the upper two thirds.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            spawn_band_top: height * 0.05,
            spawn_band_bottom: height * 0.7,
            cull_margin: 200.0,
        }
    }

    /// Overrides the spawn band.
    #[must_use]
    pub fn with_spawn_band(mut self, top: f32, bottom: f32) -> Self {
        self.spawn_band_top = top;
        self.spawn_band_bottom = bottom;
        self
    }

    /// Overrides the cull margin.
    #[must_use]
    pub fn with_cull_margin(mut self, margin: f32) -> Self {
        self.cull_margin = margin;
        self
    }

    /// Reports whether a point lies within the cull margin around the battle area.
    #[must_use]
    pub fn retains(&self, point: Point) -> bool {
        point.x >= -self.cull_margin
            && point.x <= self.width + self.cull_margin
            && point.y >= -self.cull_margin
            && point.y <= self.height + self.cull_margin
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new(960.0, 640.0)
    }
}

/// Edge an enemy enters the battle area from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Enters from the left edge and flies right.
    Left,
    /// Enters from the right edge and flies left.
    Right,
}

impl Side {
    /// Horizontal direction of travel for enemies entering from this side.
    #[must_use]
    pub const fn direction(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

/// Visual appearance of a projectile: its footprint and model tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletGeometry {
    /// Width of the projectile in pixels.
    pub width: f32,
    /// Height of the projectile in pixels.
    pub height: f32,
    /// Model tag consumed by renderers.
    pub model: String,
}

/// Speed profile of a projectile. Rates are expressed per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletKinematics {
    /// Launch speed in pixels per second.
    pub initial_speed: f32,
    /// Acceleration in pixels per second squared.
    #[serde(default)]
    pub acceleration: f32,
    /// Lower speed clamp in pixels per second; zero disables the clamp.
    #[serde(default)]
    pub min_speed: f32,
    /// Upper speed clamp in pixels per second; zero disables the clamp.
    #[serde(default)]
    pub max_speed: f32,
    /// Enables the `min_speed`/`max_speed` clamps.
    #[serde(default)]
    pub speed_limit_enabled: bool,
}

impl BulletKinematics {
    /// Clamps an internal per-tick speed into the displayed per-tick speed.
    #[must_use]
    pub fn displayed_speed(&self, internal_per_tick: f32) -> f32 {
        if !self.speed_limit_enabled {
            return internal_per_tick;
        }

        let mut speed = internal_per_tick;
        if self.min_speed > 0.0 {
            speed = speed.max(per_tick(self.min_speed));
        }
        if self.max_speed > 0.0 {
            speed = speed.min(per_tick(self.max_speed));
        }
        speed
    }
}

/// Immutable weapon archetype definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponArchetype {
    /// Catalog identifier.
    pub id: WeaponId,
    /// Display name.
    pub name: String,
    /// Raw damage applied per hit.
    pub damage: f32,
    /// Cooldown between triggers in milliseconds.
    pub cooldown_ms: u32,
    /// Delay between trigger and the first shot in milliseconds.
    #[serde(default)]
    pub fire_delay_ms: u32,
    /// Projectiles emitted per burst repetition.
    pub bullets_per_shot: u32,
    /// Repetitions per trigger.
    pub burst_count: u32,
    /// Delay between burst repetitions in milliseconds.
    #[serde(default)]
    pub burst_interval_ms: u32,
    /// Projectile footprint and model.
    pub bullet: BulletGeometry,
    /// Projectile speed profile.
    pub kinematics: BulletKinematics,
    /// Projectile lifetime in milliseconds; zero never expires.
    pub lifetime_ms: u32,
    /// Fades projectiles out over the final 30% of their lifetime.
    #[serde(default)]
    pub fade_out: bool,
    /// Random aim spread per repetition in degrees.
    #[serde(default)]
    pub center_spread_angle: f32,
    /// Random spread per projectile in degrees.
    #[serde(default)]
    pub bullet_spread_angle: f32,
    /// Maximum homing turn rate in degrees per second.
    #[serde(default)]
    pub tracking_angular_speed: f32,
    /// Explosion radius in pixels; zero disables splash damage.
    #[serde(default)]
    pub explosion_radius: f32,
    /// Maximum number of enemies a projectile may hit.
    pub penetration: u32,
    /// Horizontal lock-on range in pixels; zero disables lock-on.
    #[serde(default)]
    pub lock_on_range: f32,
    /// Enables homing towards the locked or nearest enemy.
    #[serde(default)]
    pub lock_on_target: bool,
}

impl WeaponArchetype {
    /// Cooldown as a duration.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(u64::from(self.cooldown_ms))
    }

    /// Fire delay as a duration.
    #[must_use]
    pub fn fire_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.fire_delay_ms))
    }

    /// Burst interval as a duration.
    #[must_use]
    pub fn burst_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.burst_interval_ms))
    }

    /// Lifetime as a duration, `None` when projectiles never expire.
    #[must_use]
    pub fn lifetime(&self) -> Option<Duration> {
        if self.lifetime_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(u64::from(self.lifetime_ms)))
        }
    }
}

/// RGB appearance of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl EnemyColor {
    /// Creates a new enemy color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Immutable enemy archetype definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    /// Catalog identifier.
    pub id: EnemyKindId,
    /// Display name.
    pub name: String,
    /// Starting health.
    pub health: f32,
    /// Starting and maximum shield.
    #[serde(default)]
    pub shield: f32,
    /// Time without damage before the shield regenerates, in milliseconds.
    #[serde(default)]
    pub shield_regen_delay_ms: u32,
    /// Shield regeneration in points per second.
    #[serde(default)]
    pub shield_regen_rate: f32,
    /// Flat damage reduction applied to every hit.
    #[serde(default)]
    pub damage_block: f32,
    /// Lower bound of the horizontal speed in pixels per second.
    pub speed_min: f32,
    /// Upper bound of the horizontal speed in pixels per second.
    pub speed_max: f32,
    /// Lower bound of the spawn height as a fraction of the spawn band.
    pub spawn_height_min: f32,
    /// Upper bound of the spawn height as a fraction of the spawn band.
    pub spawn_height_max: f32,
    /// Relative spawn weight.
    pub spawn_weight: f32,
    /// Health restored to the player on kill.
    #[serde(default)]
    pub kill_heal: f32,
    /// Damage dealt to the player on escape.
    #[serde(default)]
    pub escape_damage: f32,
    /// Score awarded on kill.
    pub score: u32,
    /// Credits awarded on kill.
    #[serde(default)]
    pub credits: u32,
    /// Width of the enemy in pixels.
    pub width: f32,
    /// Height of the enemy in pixels.
    pub height: f32,
    /// Appearance of the enemy.
    pub color: EnemyColor,
}

impl EnemyArchetype {
    /// Shield regeneration delay as a duration.
    #[must_use]
    pub fn shield_regen_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.shield_regen_delay_ms))
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKindId,
    /// Footprint of the enemy.
    pub bounds: Rect,
    /// Horizontal direction of travel, `1.0` or `-1.0`.
    pub direction: f32,
    /// Current health.
    pub health: f32,
    /// Starting health.
    pub max_health: f32,
    /// Current shield.
    pub shield: f32,
    /// Maximum shield.
    pub max_shield: f32,
    /// Appearance of the enemy.
    pub color: EnemyColor,
}

impl EnemySnapshot {
    /// Center of the enemy.
    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Remaining health as a fraction of the starting health.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        ratio(self.health, self.max_health)
    }

    /// Remaining shield as a fraction of the maximum shield.
    #[must_use]
    pub fn shield_ratio(&self) -> f32 {
        ratio(self.shield, self.max_shield)
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max).clamp(0.0, 1.0)
    }
}

/// Read-only snapshot describing all live enemies in population order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Slot that fired the projectile.
    pub key: SlotKey,
    /// Weapon that fired the projectile.
    pub weapon: WeaponId,
    /// Center of the projectile.
    pub position: Point,
    /// Heading in degrees, 0 pointing up.
    pub heading: f32,
    /// Displayed speed in pixels per tick.
    pub speed: f32,
    /// Width of the projectile.
    pub width: f32,
    /// Height of the projectile.
    pub height: f32,
    /// Model tag consumed by renderers.
    pub model: String,
    /// Opacity derived from the fade policy.
    pub opacity: f32,
    /// Number of further enemies the projectile may hit.
    pub remaining_penetration: u32,
    /// Enemy the projectile is steering towards, if any.
    pub homing_target: Option<EnemyId>,
}

/// Read-only snapshot describing all live projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Cooldown state of a single slot.
#[derive(Clone, Debug, PartialEq)]
pub struct CooldownSnapshot {
    /// Key of the slot.
    pub key: SlotKey,
    /// Weapon bound to the slot.
    pub weapon: WeaponId,
    /// Firing point of the slot.
    pub origin: Point,
    /// Indicates whether the slot accepts triggers.
    pub ready: bool,
    /// Time left until the slot becomes ready.
    pub remaining: Duration,
}

/// Read-only snapshot describing every slot in key order.
#[derive(Clone, Debug, Default)]
pub struct CooldownView {
    snapshots: Vec<CooldownSnapshot>,
}

impl CooldownView {
    /// Creates a new cooldown view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CooldownSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.key);
        Self { snapshots }
    }

    /// Iterator over the captured slot snapshots in key order.
    pub fn iter(&self) -> impl Iterator<Item = &CooldownSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot for a key.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> Option<&CooldownSnapshot> {
        self.snapshots
            .binary_search_by_key(&key, |snapshot| snapshot.key)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<CooldownSnapshot> {
        self.snapshots
    }
}

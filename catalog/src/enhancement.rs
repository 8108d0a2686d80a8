use std::collections::BTreeMap;

use keystrike_core::{SlotKey, WeaponArchetype};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Multipliers a slot applies to the weapon it equips.
///
/// A factor of `1.0` leaves the matching attribute untouched. The cooldown
/// factor scales the cooldown itself, so values below one fire faster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enhancement {
    /// Multiplier applied to raw damage.
    pub damage: f32,
    /// Multiplier applied to the cooldown.
    pub cooldown: f32,
    /// Multiplier applied to projectile speed and acceleration.
    pub projectile_speed: f32,
}

impl Enhancement {
    /// Enhancement that leaves weapons unchanged.
    pub const NEUTRAL: Self = Self {
        damage: 1.0,
        cooldown: 1.0,
        projectile_speed: 1.0,
    };

    /// Produces the post-modifier archetype equipped into a slot.
    #[must_use]
    pub fn apply(&self, weapon: &WeaponArchetype) -> WeaponArchetype {
        let mut enhanced = weapon.clone();
        let speed = self.projectile_speed.max(0.0);

        enhanced.damage = weapon.damage * self.damage.max(0.0);
        enhanced.cooldown_ms = (weapon.cooldown_ms as f32 * self.cooldown.max(0.0)).round() as u32;
        enhanced.kinematics.initial_speed *= speed;
        enhanced.kinematics.acceleration *= speed;
        enhanced.kinematics.min_speed *= speed;
        enhanced.kinematics.max_speed *= speed;
        enhanced
    }
}

impl Default for Enhancement {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Per-key enhancement factors earned through meta-progression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Enhancements {
    by_key: BTreeMap<SlotKey, Enhancement>,
}

impl Enhancements {
    /// Creates an empty set where every key is neutral.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses enhancements from a TOML document with one table per key.
    ///
    /// Tables whose name is not a single character are ignored.
    pub fn from_toml_str(document: &str) -> Result<Self, CatalogError> {
        let tables: BTreeMap<String, Enhancement> = toml::from_str(document)?;
        let mut enhancements = Self::new();
        for (name, enhancement) in tables {
            match SlotKey::parse(&name) {
                Some(key) => enhancements.set(key, enhancement),
                None => tracing::trace!(%name, "ignoring enhancement for unknown key"),
            }
        }
        Ok(enhancements)
    }

    /// Replaces the enhancement of a key.
    pub fn set(&mut self, key: SlotKey, enhancement: Enhancement) {
        let _ = self.by_key.insert(key, enhancement);
    }

    /// Enhancement of a key, neutral when none was set.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> Enhancement {
        self.by_key.get(&key).copied().unwrap_or_default()
    }
}

use std::{collections::HashSet, sync::Arc};

use keystrike_core::{BulletGeometry, BulletKinematics, WeaponArchetype, WeaponId};
use serde::Deserialize;

use crate::CatalogError;

/// Immutable collection of weapon archetypes in definition order.
#[derive(Clone, Debug)]
pub struct WeaponCatalog {
    weapons: Vec<Arc<WeaponArchetype>>,
}

#[derive(Deserialize)]
struct WeaponDocument {
    #[serde(default, rename = "weapon")]
    weapons: Vec<WeaponArchetype>,
}

impl WeaponCatalog {
    /// Weapons shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            weapons: builtin_weapons().into_iter().map(Arc::new).collect(),
        }
    }

    /// Builds a catalog from archetypes, rejecting duplicate identifiers.
    pub fn from_archetypes<I>(archetypes: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = WeaponArchetype>,
    {
        let mut seen = HashSet::new();
        let mut weapons = Vec::new();
        for archetype in archetypes {
            if !seen.insert(archetype.id.clone()) {
                return Err(CatalogError::DuplicateWeapon(archetype.id));
            }
            weapons.push(Arc::new(archetype));
        }

        Ok(Self { weapons })
    }

    /// Parses a catalog from a TOML document made of `[[weapon]]` tables.
    pub fn from_toml_str(document: &str) -> Result<Self, CatalogError> {
        let parsed: WeaponDocument = toml::from_str(document)?;
        let catalog = Self::from_archetypes(parsed.weapons)?;
        tracing::debug!(weapons = catalog.len(), "weapon catalog parsed");
        Ok(catalog)
    }

    /// Looks up a weapon archetype.
    #[must_use]
    pub fn get(&self, id: &WeaponId) -> Option<&Arc<WeaponArchetype>> {
        self.weapons.iter().find(|weapon| &weapon.id == id)
    }

    /// Looks up a weapon archetype, reporting unknown identifiers as errors.
    pub fn require(&self, id: &WeaponId) -> Result<Arc<WeaponArchetype>, CatalogError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownWeapon(id.clone()))
    }

    /// Iterator over the archetypes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<WeaponArchetype>> {
        self.weapons.iter()
    }

    /// Number of archetypes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    /// Reports whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

impl Default for WeaponCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn base(id: &str, name: &str, damage: f32, cooldown_ms: u32, speed: f32) -> WeaponArchetype {
    WeaponArchetype {
        id: WeaponId::new(id),
        name: name.to_owned(),
        damage,
        cooldown_ms,
        fire_delay_ms: 0,
        bullets_per_shot: 1,
        burst_count: 1,
        burst_interval_ms: 0,
        bullet: BulletGeometry {
            width: 4.0,
            height: 12.0,
            model: "bolt".to_owned(),
        },
        kinematics: BulletKinematics {
            initial_speed: speed,
            acceleration: 0.0,
            min_speed: 0.0,
            max_speed: 0.0,
            speed_limit_enabled: false,
        },
        lifetime_ms: 2_000,
        fade_out: false,
        center_spread_angle: 0.0,
        bullet_spread_angle: 0.0,
        tracking_angular_speed: 0.0,
        explosion_radius: 0.0,
        penetration: 1,
        lock_on_range: 0.0,
        lock_on_target: false,
    }
}

fn builtin_weapons() -> Vec<WeaponArchetype> {
    vec![
        base("blaster", "Blaster", 10.0, 300, 600.0),
        WeaponArchetype {
            bullets_per_shot: 5,
            center_spread_angle: 6.0,
            bullet_spread_angle: 30.0,
            lifetime_ms: 900,
            fade_out: true,
            bullet: BulletGeometry {
                width: 5.0,
                height: 5.0,
                model: "pellet".to_owned(),
            },
            ..base("scatter", "Scatter Cannon", 6.0, 700, 540.0)
        },
        WeaponArchetype {
            fire_delay_ms: 250,
            penetration: 4,
            bullet: BulletGeometry {
                width: 3.0,
                height: 28.0,
                model: "rail".to_owned(),
            },
            ..base("railgun", "Railgun", 40.0, 1_500, 1_500.0)
        },
        WeaponArchetype {
            explosion_radius: 60.0,
            lifetime_ms: 2_500,
            kinematics: BulletKinematics {
                initial_speed: 240.0,
                acceleration: 900.0,
                min_speed: 0.0,
                max_speed: 900.0,
                speed_limit_enabled: true,
            },
            bullet: BulletGeometry {
                width: 8.0,
                height: 18.0,
                model: "rocket".to_owned(),
            },
            ..base("rocket", "Rocket Pod", 25.0, 1_200, 240.0)
        },
        WeaponArchetype {
            burst_count: 3,
            burst_interval_ms: 90,
            tracking_angular_speed: 240.0,
            lock_on_range: 220.0,
            lock_on_target: true,
            lifetime_ms: 3_000,
            fade_out: true,
            bullet: BulletGeometry {
                width: 6.0,
                height: 10.0,
                model: "missile".to_owned(),
            },
            ..base("seeker", "Seeker Swarm", 12.0, 900, 420.0)
        },
        WeaponArchetype {
            burst_count: 4,
            burst_interval_ms: 60,
            center_spread_angle: 4.0,
            lifetime_ms: 1_500,
            ..base("burst_rifle", "Burst Rifle", 8.0, 600, 720.0)
        },
    ]
}

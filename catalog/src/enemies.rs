use std::{collections::HashSet, sync::Arc};

use keystrike_core::{EnemyArchetype, EnemyColor, EnemyKindId};
use serde::Deserialize;

use crate::CatalogError;

/// Immutable collection of enemy archetypes in definition order.
#[derive(Clone, Debug)]
pub struct EnemyCatalog {
    enemies: Vec<Arc<EnemyArchetype>>,
}

#[derive(Deserialize)]
struct EnemyDocument {
    #[serde(default, rename = "enemy")]
    enemies: Vec<EnemyArchetype>,
}

impl EnemyCatalog {
    /// Enemies shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            enemies: builtin_enemies().into_iter().map(Arc::new).collect(),
        }
    }

    /// Builds a catalog from archetypes, rejecting duplicate identifiers.
    pub fn from_archetypes<I>(archetypes: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = EnemyArchetype>,
    {
        let mut seen = HashSet::new();
        let mut enemies = Vec::new();
        for archetype in archetypes {
            if !seen.insert(archetype.id.clone()) {
                return Err(CatalogError::DuplicateEnemy(archetype.id));
            }
            enemies.push(Arc::new(archetype));
        }

        Ok(Self { enemies })
    }

    /// Parses a catalog from a TOML document made of `[[enemy]]` tables.
    pub fn from_toml_str(document: &str) -> Result<Self, CatalogError> {
        let parsed: EnemyDocument = toml::from_str(document)?;
        let catalog = Self::from_archetypes(parsed.enemies)?;
        tracing::debug!(enemies = catalog.len(), "enemy catalog parsed");
        Ok(catalog)
    }

    /// Looks up an enemy archetype.
    #[must_use]
    pub fn get(&self, id: &EnemyKindId) -> Option<&Arc<EnemyArchetype>> {
        self.enemies.iter().find(|enemy| &enemy.id == id)
    }

    /// Looks up an enemy archetype, reporting unknown identifiers as errors.
    pub fn require(&self, id: &EnemyKindId) -> Result<Arc<EnemyArchetype>, CatalogError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownEnemy(id.clone()))
    }

    /// Shared handles to every archetype, suitable as a spawn pool.
    #[must_use]
    pub fn spawn_pool(&self) -> Vec<Arc<EnemyArchetype>> {
        self.enemies.clone()
    }

    /// Iterator over the archetypes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EnemyArchetype>> {
        self.enemies.iter()
    }

    /// Number of archetypes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

impl Default for EnemyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_enemies() -> Vec<EnemyArchetype> {
    vec![
        EnemyArchetype {
            id: EnemyKindId::new("drone"),
            name: "Drone".to_owned(),
            health: 15.0,
            shield: 0.0,
            shield_regen_delay_ms: 0,
            shield_regen_rate: 0.0,
            damage_block: 0.0,
            speed_min: 60.0,
            speed_max: 110.0,
            spawn_height_min: 0.0,
            spawn_height_max: 1.0,
            spawn_weight: 20.0,
            kill_heal: 0.0,
            escape_damage: 5.0,
            score: 10,
            credits: 1,
            width: 36.0,
            height: 20.0,
            color: EnemyColor::from_rgb(214, 76, 76),
        },
        EnemyArchetype {
            id: EnemyKindId::new("interceptor"),
            name: "Interceptor".to_owned(),
            health: 10.0,
            shield: 0.0,
            shield_regen_delay_ms: 0,
            shield_regen_rate: 0.0,
            damage_block: 0.0,
            speed_min: 160.0,
            speed_max: 240.0,
            spawn_height_min: 0.4,
            spawn_height_max: 1.0,
            spawn_weight: 8.0,
            kill_heal: 1.0,
            escape_damage: 8.0,
            score: 15,
            credits: 2,
            width: 30.0,
            height: 14.0,
            color: EnemyColor::from_rgb(240, 180, 60),
        },
        EnemyArchetype {
            id: EnemyKindId::new("gunship"),
            name: "Gunship".to_owned(),
            health: 40.0,
            shield: 20.0,
            shield_regen_delay_ms: 2_000,
            shield_regen_rate: 10.0,
            damage_block: 0.0,
            speed_min: 40.0,
            speed_max: 70.0,
            spawn_height_min: 0.2,
            spawn_height_max: 0.8,
            spawn_weight: 10.0,
            kill_heal: 3.0,
            escape_damage: 12.0,
            score: 30,
            credits: 5,
            width: 56.0,
            height: 28.0,
            color: EnemyColor::from_rgb(80, 140, 230),
        },
        EnemyArchetype {
            id: EnemyKindId::new("dreadnought"),
            name: "Dreadnought".to_owned(),
            health: 160.0,
            shield: 60.0,
            shield_regen_delay_ms: 3_000,
            shield_regen_rate: 15.0,
            damage_block: 4.0,
            speed_min: 20.0,
            speed_max: 35.0,
            spawn_height_min: 0.0,
            spawn_height_max: 0.5,
            spawn_weight: 2.0,
            kill_heal: 10.0,
            escape_damage: 30.0,
            score: 120,
            credits: 25,
            width: 96.0,
            height: 44.0,
            color: EnemyColor::from_rgb(150, 90, 200),
        },
    ]
}

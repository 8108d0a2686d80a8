use std::{collections::BTreeMap, sync::Arc};

use keystrike_core::{Command, SlotKey, WeaponId};

use crate::{CatalogError, Enhancements, KeyboardLayout, WeaponCatalog};

/// Weapon selection keyed by slot.
///
/// Loadouts persist as a flat TOML table of key to weapon identifier. Entries
/// with unrecognised keys, unknown weapons or non-string values are skipped
/// so that documents written by newer versions still load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    slots: BTreeMap<SlotKey, WeaponId>,
}

impl Loadout {
    /// Creates an empty loadout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loadout granted at the start of a fresh profile: the built-in weapons
    /// on the leftmost keys of the top row.
    #[must_use]
    pub fn starter(catalog: &WeaponCatalog) -> Self {
        let mut loadout = Self::new();
        for (key, weapon) in "QWERTYUIOP".chars().zip(catalog.iter()) {
            let _ = loadout.assign(SlotKey::new(key), weapon.id.clone());
        }
        loadout
    }

    /// Binds a weapon to a key, returning the weapon previously bound.
    pub fn assign(&mut self, key: SlotKey, weapon: WeaponId) -> Option<WeaponId> {
        self.slots.insert(key, weapon)
    }

    /// Weapon bound to a key.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> Option<&WeaponId> {
        self.slots.get(&key)
    }

    /// Iterator over bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotKey, &WeaponId)> {
        self.slots.iter().map(|(key, weapon)| (*key, weapon))
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Reports whether no key is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Parses a persisted loadout, keeping only weapons present in `catalog`.
    pub fn from_toml_str(document: &str, catalog: &WeaponCatalog) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, toml::Value> = toml::from_str(document)?;
        let mut loadout = Self::new();
        for (name, value) in entries {
            let Some(key) = SlotKey::parse(&name) else {
                tracing::trace!(%name, "ignoring loadout entry for unknown key");
                continue;
            };
            let Some(id) = value.as_str() else {
                tracing::trace!(%key, "ignoring non-string loadout entry");
                continue;
            };
            let weapon = WeaponId::new(id);
            if catalog.get(&weapon).is_none() {
                tracing::trace!(%key, %weapon, "ignoring loadout entry for unknown weapon");
                continue;
            }
            let _ = loadout.assign(key, weapon);
        }
        Ok(loadout)
    }

    /// Renders the loadout as a flat TOML table.
    pub fn to_toml_string(&self) -> Result<String, CatalogError> {
        let entries: BTreeMap<String, &str> = self
            .slots
            .iter()
            .map(|(key, weapon)| (key.to_string(), weapon.as_str()))
            .collect();
        Ok(toml::to_string(&entries)?)
    }

    /// Builds the equip commands for every binding the layout can place.
    ///
    /// Each weapon is resolved through `catalog` and passed through the key's
    /// enhancement before it is handed to the world.
    #[must_use]
    pub fn equip_commands(
        &self,
        catalog: &WeaponCatalog,
        layout: &KeyboardLayout,
        enhancements: &Enhancements,
    ) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.slots.len());
        for (key, id) in &self.slots {
            let Some(origin) = layout.origin(*key) else {
                tracing::trace!(%key, "key has no firing point");
                continue;
            };
            let Some(weapon) = catalog.get(id) else {
                tracing::trace!(%key, weapon = %id, "weapon missing from catalog");
                continue;
            };
            commands.push(Command::EquipSlot {
                key: *key,
                origin,
                weapon: Arc::new(enhancements.get(*key).apply(weapon)),
            });
        }
        commands
    }
}

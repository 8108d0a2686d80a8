use keystrike_core::{EnemyKindId, WeaponId};
use thiserror::Error;

/// Errors raised while assembling catalogs or slot configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The TOML document could not be parsed.
    #[error("malformed catalog document: {0}")]
    Parse(#[from] toml::de::Error),
    /// A document could not be rendered as TOML.
    #[error("failed to serialize catalog document: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Two weapon archetypes share an identifier.
    #[error("weapon `{0}` is defined more than once")]
    DuplicateWeapon(WeaponId),
    /// Two enemy archetypes share an identifier.
    #[error("enemy `{0}` is defined more than once")]
    DuplicateEnemy(EnemyKindId),
    /// A strict lookup named a weapon the catalog does not contain.
    #[error("unknown weapon `{0}`")]
    UnknownWeapon(WeaponId),
    /// A strict lookup named an enemy the catalog does not contain.
    #[error("unknown enemy `{0}`")]
    UnknownEnemy(EnemyKindId),
}

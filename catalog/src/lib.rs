#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Archetype catalogs and slot configuration for the Keystrike combat engine.
//!
//! The catalogs hold immutable weapon and enemy archetypes, either compiled in
//! or parsed from TOML documents. Slot configuration (keyboard layout,
//! loadouts and per-key enhancement factors) is combined into
//! [`Command::EquipSlot`](keystrike_core::Command::EquipSlot) batches for the
//! world.

mod enemies;
mod enhancement;
mod error;
mod layout;
mod loadout;
mod weapons;

pub use enemies::EnemyCatalog;
pub use enhancement::{Enhancement, Enhancements};
pub use error::CatalogError;
pub use layout::{KeyboardLayout, KEYBOARD_ROWS};
pub use loadout::Loadout;
pub use weapons::WeaponCatalog;

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Keystrike session.
//!
//! Catalogs, loadout and enhancements load from TOML files when provided and
//! fall back to the built-in data otherwise. Set `RUST_LOG` to inspect the
//! simulation, e.g. `RUST_LOG=keystrike_world=debug`.

mod headless;
mod session;

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use keystrike_catalog::{EnemyCatalog, Enhancements, KeyboardLayout, Loadout, WeaponCatalog};
use keystrike_core::Battlefield;
use keystrike_rendering::{Color, Presentation, RenderingBackend, Scene};
use keystrike_system_spawning::{Config, Spawning};
use tracing_subscriber::EnvFilter;

use crate::{
    headless::{HeadlessBackend, KeyScript},
    session::Session,
};

#[derive(Debug, Parser)]
#[command(name = "keystrike")]
#[command(about = "Run a seeded Keystrike combat session without a window")]
struct Args {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 3_600)]
    ticks: u32,
    /// Seed shared by the world and the spawner
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// TOML file of `[[weapon]]` tables replacing the built-in weapons
    #[arg(long)]
    weapons: Option<PathBuf>,
    /// TOML file of `[[enemy]]` tables replacing the built-in enemies
    #[arg(long)]
    enemies: Option<PathBuf>,
    /// TOML file mapping keys to weapon ids
    #[arg(long)]
    loadout: Option<PathBuf>,
    /// TOML file of per-key enhancement tables
    #[arg(long)]
    enhancements: Option<PathBuf>,
    /// Keys pressed in order, cycling when exhausted
    #[arg(long, default_value = "QWERTY")]
    keys: String,
    /// Ticks between scripted key presses
    #[arg(long, default_value_t = 12)]
    press_interval: u32,
    /// Initial milliseconds between enemy spawns
    #[arg(long, default_value_t = 1_200)]
    spawn_interval_ms: u64,
    /// Battle area width in pixels
    #[arg(long, default_value_t = 960.0)]
    width: f32,
    /// Battle area height in pixels
    #[arg(long, default_value_t = 640.0)]
    height: f32,
}

/// Simulated duration of one frame.
const FRAME_TIME: Duration = Duration::from_micros(16_667);

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_weapons(path: Option<&Path>) -> Result<WeaponCatalog> {
    match path {
        Some(path) => WeaponCatalog::from_toml_str(&read(path)?)
            .with_context(|| format!("invalid weapon catalog {}", path.display())),
        None => Ok(WeaponCatalog::builtin()),
    }
}

fn load_enemies(path: Option<&Path>) -> Result<EnemyCatalog> {
    match path {
        Some(path) => EnemyCatalog::from_toml_str(&read(path)?)
            .with_context(|| format!("invalid enemy catalog {}", path.display())),
        None => Ok(EnemyCatalog::builtin()),
    }
}

fn load_loadout(path: Option<&Path>, weapons: &WeaponCatalog) -> Result<Loadout> {
    match path {
        Some(path) => Loadout::from_toml_str(&read(path)?, weapons)
            .with_context(|| format!("invalid loadout {}", path.display())),
        None => Ok(Loadout::starter(weapons)),
    }
}

fn load_enhancements(path: Option<&Path>) -> Result<Enhancements> {
    match path {
        Some(path) => Enhancements::from_toml_str(&read(path)?)
            .with_context(|| format!("invalid enhancements {}", path.display())),
        None => Ok(Enhancements::new()),
    }
}

/// Entry point for the Keystrike command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let battlefield = Battlefield::new(args.width, args.height);
    let scene = Scene::new(&battlefield).context("invalid battle area")?;

    let weapons = load_weapons(args.weapons.as_deref())?;
    let enemies = load_enemies(args.enemies.as_deref())?;
    let loadout = load_loadout(args.loadout.as_deref(), &weapons)?;
    let enhancements = load_enhancements(args.enhancements.as_deref())?;
    let equip = loadout.equip_commands(
        &weapons,
        &KeyboardLayout::qwerty(&battlefield),
        &enhancements,
    );
    tracing::info!(
        weapons = weapons.len(),
        enemies = enemies.len(),
        slots = equip.len(),
        "session configured"
    );

    let spawning = Spawning::new(
        Config::new(Duration::from_millis(args.spawn_interval_ms), args.seed)
            .with_ramp(Duration::from_millis(20), Duration::from_millis(350)),
        enemies.spawn_pool(),
    );
    let session = Rc::new(RefCell::new(Session::new(
        battlefield,
        args.seed,
        equip,
        spawning,
    )));

    let backend = HeadlessBackend::new(
        args.ticks,
        FRAME_TIME,
        KeyScript::new(&args.keys, args.press_interval),
    );
    let presentation = Presentation::new("Keystrike", Color::from_rgb_u8(8, 10, 24), scene);
    let driver = Rc::clone(&session);
    backend.run(presentation, move |dt, input, scene| {
        driver.borrow_mut().frame(dt, input, scene);
    })?;

    println!("{}", session.borrow().summary());
    Ok(())
}

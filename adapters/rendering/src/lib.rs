#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Keystrike adapters.
//!
//! Backends never read the world. They receive a [`Scene`] assembled from the
//! read-only snapshot views the world exposes, draw it, and report the keys
//! pressed during the frame back to the adapter that drives the simulation.

use std::{error::Error, fmt, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;
use keystrike_core::{
    Battlefield, CooldownView, EnemyColor, EnemyId, EnemyView, ProjectileId, ProjectileView,
    SlotKey, WeaponId,
};

/// Tint of projectiles at full opacity.
const PROJECTILE_COLOR: Color = Color::from_rgb_u8(255, 226, 122);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with its alpha replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<EnemyColor> for Color {
    fn from(color: EnemyColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Keys pressed since the previous frame, in press order.
    pub pressed_keys: Vec<SlotKey>,
}

/// Enemy ship drawn by the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Top-left corner of the hull.
    pub position: Vec2,
    /// Width and height of the hull.
    pub size: Vec2,
    /// Hull color.
    pub color: Color,
    /// Remaining health as a fraction of the starting health.
    pub health_ratio: f32,
    /// Remaining shield as a fraction of the maximum shield.
    pub shield_ratio: f32,
}

/// Projectile drawn by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Center of the projectile.
    pub center: Vec2,
    /// Width and height of the projectile before rotation.
    pub size: Vec2,
    /// Heading in degrees, 0 pointing up and increasing clockwise.
    pub heading: f32,
    /// Model tag used to select artwork.
    pub model: String,
    /// Tint whose alpha carries the opacity derived from the fade policy.
    pub color: Color,
}

/// Weapon slot marker drawn at its firing point.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotPresentation {
    /// Key bound to the slot.
    pub key: SlotKey,
    /// Weapon equipped in the slot.
    pub weapon: WeaponId,
    /// Firing point of the slot.
    pub origin: Vec2,
    /// Indicates whether the slot accepts triggers.
    pub ready: bool,
    /// Time left until the slot becomes ready.
    pub remaining: Duration,
}

/// Scene description of the battle area and everything inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width and height of the battle area in pixels.
    pub size: Vec2,
    /// Enemies in population order.
    pub enemies: Vec<EnemyPresentation>,
    /// Projectiles in identifier order.
    pub projectiles: Vec<ProjectilePresentation>,
    /// Slots in key order.
    pub slots: Vec<SlotPresentation>,
}

impl Scene {
    /// Creates an empty scene covering the battle area.
    ///
    /// Returns an error when the battle area has a non-positive dimension.
    pub fn new(battlefield: &Battlefield) -> std::result::Result<Self, RenderingError> {
        if !(battlefield.width > 0.0 && battlefield.height > 0.0) {
            return Err(RenderingError::InvalidDimensions {
                width: battlefield.width,
                height: battlefield.height,
            });
        }

        Ok(Self {
            size: Vec2::new(battlefield.width, battlefield.height),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            slots: Vec::new(),
        })
    }

    /// Replaces the scene's inhabitants with the provided world snapshots.
    pub fn refresh(
        &mut self,
        enemies: &EnemyView,
        projectiles: &ProjectileView,
        cooldowns: &CooldownView,
    ) {
        self.enemies = enemies
            .iter()
            .map(|enemy| EnemyPresentation {
                id: enemy.id,
                position: Vec2::new(enemy.bounds.x, enemy.bounds.y),
                size: Vec2::new(enemy.bounds.width, enemy.bounds.height),
                color: enemy.color.into(),
                health_ratio: enemy.health_ratio(),
                shield_ratio: enemy.shield_ratio(),
            })
            .collect();

        self.projectiles = projectiles
            .iter()
            .map(|projectile| ProjectilePresentation {
                id: projectile.id,
                center: Vec2::new(projectile.position.x, projectile.position.y),
                size: Vec2::new(projectile.width, projectile.height),
                heading: projectile.heading,
                model: projectile.model.clone(),
                color: PROJECTILE_COLOR.with_alpha(projectile.opacity),
            })
            .collect();

        self.slots = cooldowns
            .iter()
            .map(|slot| SlotPresentation {
                key: slot.key,
                weapon: slot.weapon.clone(),
                origin: Vec2::new(slot.origin.x, slot.origin.y),
                ready: slot.ready,
                remaining: slot.remaining,
            })
            .collect();
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Keystrike scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// the keys pressed during the frame, and refreshes the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The battle area must have a positive width and height.
    InvalidDimensions {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "battle area must have positive dimensions (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

//! Rendering backend that runs a fixed number of frames without a window.

use std::time::Duration;

use anyhow::{ensure, Result};
use keystrike_core::SlotKey;
use keystrike_rendering::{FrameInput, Presentation, RenderingBackend, Scene};

/// Scripted key presses replayed by the headless backend.
///
/// Every `interval` frames the next key of the script is pressed, cycling
/// back to the first key once the script is exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyScript {
    keys: Vec<SlotKey>,
    interval: u32,
}

impl KeyScript {
    /// Builds a script from the characters of `keys`, skipping whitespace.
    pub(crate) fn new(keys: &str, interval: u32) -> Self {
        Self {
            keys: keys
                .chars()
                .filter(|key| !key.is_whitespace())
                .map(SlotKey::new)
                .collect(),
            interval,
        }
    }

    /// Keys pressed during the provided frame.
    pub(crate) fn input(&self, frame: u32) -> FrameInput {
        let mut input = FrameInput::default();
        if self.keys.is_empty() || self.interval == 0 || frame % self.interval != 0 {
            return input;
        }

        let press = (frame / self.interval) as usize % self.keys.len();
        input.pressed_keys.push(self.keys[press]);
        input
    }
}

/// Backend that advances the scene at a fixed frame time and discards the output.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frames: u32,
    frame_time: Duration,
    script: KeyScript,
}

impl HeadlessBackend {
    /// Creates a backend that runs `frames` frames of `frame_time` each.
    pub(crate) fn new(frames: u32, frame_time: Duration, script: KeyScript) -> Self {
        Self {
            frames,
            frame_time,
            script,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        ensure!(!self.frame_time.is_zero(), "frame time must be positive");

        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;
        tracing::debug!(%window_title, frames = self.frames, "headless session started");

        for frame in 0..self.frames {
            update_scene(self.frame_time, self.script.input(frame), &mut scene);
            tracing::trace!(
                frame,
                enemies = scene.enemies.len(),
                projectiles = scene.projectiles.len(),
                "frame presented"
            );
        }

        Ok(())
    }
}

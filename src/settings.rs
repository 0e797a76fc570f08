//! Game settings and tunables
//!
//! Loaded from an optional JSON file; anything missing falls back to the
//! defaults in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for shape draws, colors and decorations
    pub seed: u64,

    // === Play area ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub floor_thickness: f32,

    // === Stacking ===
    /// Spawn height above the bar, and the camera scroll trigger
    pub head_room: f32,
    pub variance_threshold: f32,
    pub spawn_delay_ms: f32,
    pub nudge_step: f32,

    // === Camera ===
    pub scroll_step: f32,
    pub decoration_chance: f32,
    pub end_shake_ms: f32,
    pub end_shake_intensity: f32,
    pub end_fade_ms: f32,

    // === HUD ===
    pub bar_label_offset: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            floor_thickness: FLOOR_THICKNESS,

            head_room: HEAD_ROOM,
            variance_threshold: VAR_THRESHOLD,
            spawn_delay_ms: SPAWN_DELAY_MS,
            nudge_step: NUDGE_STEP,

            scroll_step: CAMERA_SCROLL_STEP,
            decoration_chance: DECORATION_CHANCE,
            end_shake_ms: END_SHAKE_MS,
            end_shake_intensity: END_SHAKE_INTENSITY,
            end_fade_ms: END_FADE_MS,

            bar_label_offset: BAR_LABEL_OFFSET,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp values that would break the play loop
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(self.screen_width > 0.0) {
            self.screen_width = defaults.screen_width;
        }
        if !(self.screen_height > 0.0) {
            self.screen_height = defaults.screen_height;
        }
        if !(self.floor_thickness > 0.0) {
            self.floor_thickness = defaults.floor_thickness;
        }
        self.head_room = self.head_room.max(0.0);
        self.variance_threshold = self.variance_threshold.max(0.0);
        self.spawn_delay_ms = self.spawn_delay_ms.max(0.0);
        self.end_shake_ms = self.end_shake_ms.max(0.0);
        self.end_fade_ms = self.end_fade_ms.max(0.0);
        self.scroll_step = self.scroll_step.max(0.0);
        self.decoration_chance = self.decoration_chance.clamp(0.0, 1.0);
        self
    }
}

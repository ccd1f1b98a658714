//! Configuration file support for regionmark.
//!
//! Settings are loaded from `~/.config/regionmark/config.toml` (honoring
//! `XDG_CONFIG_HOME`). Every section is optional; missing values fall back to
//! defaults and out-of-range values are clamped with a warning.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ArrowConfig, DrawingConfig, InteractionConfig, ReadoutConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// stroke_width = 3.0
/// font_size = 24.0
///
/// [arrow]
/// length = 20.0
/// angle_degrees = 30.0
///
/// [interaction]
/// paste_offset = 20.0
///
/// [readout]
/// interval_ms = 16
///
/// [keybindings]
/// toggle_region_select = ["Tab"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Appearance of new annotations
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead appearance
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Paste offset and minimum draw sizes
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Live coordinate readout
    #[serde(default)]
    pub readout: ReadoutConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `drawing.stroke_width`: 1.0 - 20.0
    /// - `drawing.font_size`: 8.0 - 72.0
    /// - `drawing.text_background_padding`: 0.0 - 20.0
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `interaction.paste_offset`: 0.0 - 200.0
    /// - `interaction.min_*`: 0.0 - 100.0
    /// - `readout.interval_ms`: 4 - 100
    /// - `readout.font_size`: 8.0 - 72.0
    /// - `readout.padding`: 0.0 - 20.0
    pub fn validate_and_clamp(&mut self) {
        clamp_f64("drawing.stroke_width", &mut self.drawing.stroke_width, 1.0, 20.0);
        clamp_f64("drawing.font_size", &mut self.drawing.font_size, 8.0, 72.0);
        clamp_f64(
            "drawing.text_background_padding",
            &mut self.drawing.text_background_padding,
            0.0,
            20.0,
        );
        clamp_f64("arrow.length", &mut self.arrow.length, 5.0, 50.0);
        clamp_f64("arrow.angle_degrees", &mut self.arrow.angle_degrees, 15.0, 60.0);
        clamp_f64(
            "interaction.paste_offset",
            &mut self.interaction.paste_offset,
            0.0,
            200.0,
        );
        clamp_f64(
            "interaction.min_rectangle_size",
            &mut self.interaction.min_rectangle_size,
            0.0,
            100.0,
        );
        clamp_f64(
            "interaction.min_arrow_length",
            &mut self.interaction.min_arrow_length,
            0.0,
            100.0,
        );
        clamp_f64(
            "interaction.min_region_size",
            &mut self.interaction.min_region_size,
            0.0,
            100.0,
        );

        if !(4..=100).contains(&self.readout.interval_ms) {
            log::warn!(
                "Invalid readout.interval_ms {}, clamping to 4-100 range",
                self.readout.interval_ms
            );
            self.readout.interval_ms = self.readout.interval_ms.clamp(4, 100);
        }
        clamp_f64("readout.font_size", &mut self.readout.font_size, 8.0, 72.0);
        clamp_f64("readout.padding", &mut self.readout.padding, 0.0, 20.0);
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("regionmark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`; a missing file yields defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing config.toml, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}

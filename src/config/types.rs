//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the appearance of newly drawn annotations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Annotation color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Stroke width for rectangles and arrows in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Font size for text annotations in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Paint a semi-transparent box behind text annotations
    #[serde(default = "default_text_background")]
    pub text_background_enabled: bool,

    /// Space between the text and the edge of its background box (valid range: 0.0 - 20.0)
    #[serde(default = "default_text_background_padding")]
    pub text_background_padding: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            stroke_width: default_stroke_width(),
            font_size: default_font_size(),
            text_background_enabled: default_text_background(),
            text_background_padding: default_text_background_padding(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    /// Smaller angles create narrower arrowheads, larger angles create wider ones
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Editing thresholds.
///
/// Draws smaller than the per-kind minimum are discarded on release.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InteractionConfig {
    /// Offset applied in both axes when pasting without a target point (valid range: 0.0 - 200.0)
    #[serde(default = "default_paste_offset")]
    pub paste_offset: f64,

    /// A drawn rectangle must exceed this width and height (valid range: 0.0 - 100.0)
    #[serde(default = "default_min_rectangle_size")]
    pub min_rectangle_size: f64,

    /// A drawn arrow must exceed this length (valid range: 0.0 - 100.0)
    #[serde(default = "default_min_arrow_length")]
    pub min_arrow_length: f64,

    /// A region selection must exceed this width and height to complete (valid range: 0.0 - 100.0)
    #[serde(default = "default_min_region_size")]
    pub min_region_size: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            paste_offset: default_paste_offset(),
            min_rectangle_size: default_min_rectangle_size(),
            min_arrow_length: default_min_arrow_length(),
            min_region_size: default_min_region_size(),
        }
    }
}

/// Live coordinate readout next to the crosshair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadoutConfig {
    /// Show the readout at all
    #[serde(default = "default_readout_enabled")]
    pub enabled: bool,

    /// Poll interval in milliseconds (valid range: 4 - 100)
    #[serde(default = "default_readout_interval")]
    pub interval_ms: u64,

    /// Label font size (valid range: 8.0 - 72.0)
    #[serde(default = "default_readout_font_size")]
    pub font_size: f64,

    /// Padding around the label (valid range: 0.0 - 20.0)
    #[serde(default = "default_readout_padding")]
    pub padding: f64,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self {
            enabled: default_readout_enabled(),
            interval_ms: default_readout_interval(),
            font_size: default_readout_font_size(),
            padding: default_readout_padding(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_stroke_width() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    24.0
}

fn default_text_background() -> bool {
    false
}

fn default_text_background_padding() -> f64 {
    4.0
}

fn default_arrow_length() -> f64 {
    20.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_paste_offset() -> f64 {
    20.0
}

fn default_min_rectangle_size() -> f64 {
    5.0
}

fn default_min_arrow_length() -> f64 {
    10.0
}

fn default_min_region_size() -> f64 {
    10.0
}

fn default_readout_enabled() -> bool {
    true
}

fn default_readout_interval() -> u64 {
    16 // ~60 Hz
}

fn default_readout_font_size() -> f64 {
    12.0
}

fn default_readout_padding() -> f64 {
    4.0
}

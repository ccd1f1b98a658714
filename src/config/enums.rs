//! Configuration enum types.

use crate::draw::{Color, color::RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the name or RGB triple to a [`Color`].
    ///
    /// Unknown names fall back to red with a warning; RGB components are
    /// scaled to 0.0-1.0 with full opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::new(
                *r as f64 / 255.0,
                *g as f64 / 255.0,
                *b as f64 / 255.0,
                1.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLUE;

    #[test]
    fn named_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Name("Blue".into()).to_color(), BLUE);
        let rgb = ColorSpec::Rgb([255, 0, 255]).to_color();
        assert_eq!(rgb, Color::new(1.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn unknown_name_falls_back_to_red() {
        assert_eq!(ColorSpec::Name("mauve-ish".into()).to_color(), RED);
    }
}

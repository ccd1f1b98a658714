//! Pre-measured glyph metrics for text that must be laid out cheaply.
//!
//! Measuring text through a real shaping engine is far too slow for work done
//! on every readout tick, so the renderer measures a fixed character set once
//! and the engine sums cached advances afterwards.

use std::collections::HashMap;

/// Characters that appear in coordinate readouts.
pub const READOUT_CHARSET: &str = "0123456789-.,:() xy";

/// Advance width per character as a fraction of font size when no renderer
/// measurement is available.
pub const ESTIMATED_ADVANCE_RATIO: f64 = 0.6;

/// Line height as a multiple of font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Cached advance widths for one font size.
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    font_size: f64,
    advances: HashMap<char, f64>,
    fallback_advance: f64,
}

impl GlyphMetrics {
    /// Measures every character of `charset` once through `measure`.
    ///
    /// Characters missing from the set are later laid out with the mean
    /// advance of the measured ones.
    pub fn measure<F>(font_size: f64, charset: &str, mut measure: F) -> Self
    where
        F: FnMut(char) -> f64,
    {
        let advances: HashMap<char, f64> = charset.chars().map(|c| (c, measure(c))).collect();
        let fallback_advance = if advances.is_empty() {
            font_size * ESTIMATED_ADVANCE_RATIO
        } else {
            advances.values().sum::<f64>() / advances.len() as f64
        };
        log::debug!(
            "Measured {} glyphs at {:.1}pt (fallback advance {:.2})",
            advances.len(),
            font_size,
            fallback_advance
        );
        Self {
            font_size,
            advances,
            fallback_advance,
        }
    }

    /// Metrics estimated from the font size alone (monospace assumption).
    pub fn estimated(font_size: f64) -> Self {
        Self::measure(font_size, READOUT_CHARSET, |_| {
            font_size * ESTIMATED_ADVANCE_RATIO
        })
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT_RATIO
    }

    pub fn advance(&self, c: char) -> f64 {
        self.advances.get(&c).copied().unwrap_or(self.fallback_advance)
    }

    /// Width of a single line of text.
    pub fn text_width(&self, text: &str) -> f64 {
        text.chars().map(|c| self.advance(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_each_character_once() {
        let mut calls = 0;
        let metrics = GlyphMetrics::measure(10.0, "01", |c| {
            calls += 1;
            if c == '0' { 4.0 } else { 6.0 }
        });
        assert_eq!(calls, 2);
        assert_eq!(metrics.text_width("0101"), 20.0);
        assert_eq!(calls, 2);
    }

    #[test]
    fn unknown_characters_use_mean_advance() {
        let metrics = GlyphMetrics::measure(10.0, "01", |c| if c == '0' { 4.0 } else { 6.0 });
        assert_eq!(metrics.advance('W'), 5.0);
    }

    #[test]
    fn estimated_metrics_scale_with_font_size() {
        let metrics = GlyphMetrics::estimated(20.0);
        assert!((metrics.text_width("123") - 36.0).abs() < 1e-9);
        assert!((metrics.line_height() - 24.0).abs() < 1e-9);
    }
}

//! Font measurement capability.
//!
//! Layout never touches font data itself. Whatever surface paints the
//! display list supplies a [`FontMetrics`] implementation so that word
//! widths used for wrapping match the widths it will draw.

use crate::style::TextStyle;

/// Font metrics interface for text measurement during layout.
pub trait FontMetrics {
    /// Advance width, in pixels, of `text` drawn in `style`.
    fn text_width(&self, text: &str, style: TextStyle) -> i32;

    /// Distance, in pixels, from one baseline to the next for `style`.
    fn line_height(&self, style: TextStyle) -> i32;
}

/// Approximate font metrics using fixed ratios.
///
/// Implementation note: without access to actual font data, every character
/// is assumed to be 0.6 times the font size wide (typical for proportional
/// Latin body text) and lines are 1.2 times the font size tall. Bold and
/// italic do not change the measurements.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateFontMetrics {
    /// Font size in pixels.
    pub font_size: f32,
}

impl ApproximateFontMetrics {
    /// Metrics for a font of `font_size` pixels.
    #[must_use]
    pub const fn new(font_size: f32) -> Self {
        Self { font_size }
    }
}

impl Default for ApproximateFontMetrics {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl FontMetrics for ApproximateFontMetrics {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, _style: TextStyle) -> i32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        (text.chars().count() as f32 * self.font_size * CHAR_WIDTH_RATIO).round() as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    fn line_height(&self, _style: TextStyle) -> i32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        (self.font_size * LINE_HEIGHT_RATIO).round() as i32
    }
}

//! Font metrics backed by fontdue for accurate text measurement during layout.

use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};
use wren_layout::{FontMetrics, TextStyle};

use crate::LoadError;

/// Extra advance, in pixels, added to each glyph drawn in synthetic bold.
pub const SYNTHETIC_BOLD_ADVANCE: f32 = 1.0;

/// Font metrics implementation backed by fontdue's per-glyph metrics.
///
/// One regular face serves every style. Bold is synthesized by widening each
/// glyph by [`SYNTHETIC_BOLD_ADVANCE`]; italic is a shear and leaves widths
/// unchanged. Lines are 1.2 times the font size tall.
pub struct FontdueFontMetrics {
    font: Font,
    font_size: f32,
}

impl FontdueFontMetrics {
    /// Parse a TrueType or OpenType font from memory.
    ///
    /// # Errors
    ///
    /// [`LoadError::Font`] if fontdue cannot parse `bytes`.
    pub fn from_bytes(bytes: &[u8], font_size: f32) -> Result<Self, LoadError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|message| LoadError::Font(message.to_string()))?;
        Ok(Self { font, font_size })
    }

    /// Read and parse a font file.
    ///
    /// # Errors
    ///
    /// [`LoadError::Font`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>, font_size: f32) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|error| LoadError::Font(format!("{}: {error}", path.display())))?;
        Self::from_bytes(&bytes, font_size)
    }
}

impl FontMetrics for FontdueFontMetrics {
    #[allow(clippy::cast_possible_truncation)]
    fn text_width(&self, text: &str, style: TextStyle) -> i32 {
        // Font::metrics() measures without rasterizing.
        let bold_advance = if style.bold {
            SYNTHETIC_BOLD_ADVANCE
        } else {
            0.0
        };
        let width: f32 = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, self.font_size).advance_width + bold_advance)
            .sum();
        width.round() as i32
    }

    #[allow(clippy::cast_possible_truncation)]
    fn line_height(&self, _style: TextStyle) -> i32 {
        (self.font_size * 1.2).round() as i32
    }
}

impl std::fmt::Debug for FontdueFontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueFontMetrics")
            .field("name", &self.font.name())
            .field("font_size", &self.font_size)
            .finish()
    }
}

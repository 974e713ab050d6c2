//! Word-wrapping layout.
//!
//! Words are placed left to right starting at `(hstep, line_height)`. A word
//! that would cross the right margin moves to the start of the next line.
//! `<b>`/`<i>` tags switch the style of the words after them; every other
//! tag is ignored, so there are no block-level breaks.

use wren_html::{Token, lex};

use crate::display_list::{DisplayList, LayoutItem};
use crate::font_metrics::FontMetrics;
use crate::style::TextStyle;

/// Default left and right margin, in pixels.
pub const DEFAULT_HSTEP: i32 = 10;

/// Default extra space between lines, in pixels.
pub const DEFAULT_VPAD: i32 = 8;

/// Default viewport width, in pixels.
pub const DEFAULT_WIDTH: i32 = 800;

/// Viewport and spacing parameters for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Viewport width in pixels.
    pub width: i32,
    /// Left and right margin in pixels.
    pub hstep: i32,
    /// Extra space added between lines, in pixels.
    pub vpad: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl LayoutConfig {
    /// Default margins for a viewport `width` pixels wide.
    #[must_use]
    pub const fn new(width: i32) -> Self {
        Self {
            width,
            hstep: DEFAULT_HSTEP,
            vpad: DEFAULT_VPAD,
        }
    }

    /// Set the horizontal margin.
    #[must_use]
    pub const fn with_hstep(mut self, hstep: i32) -> Self {
        self.hstep = hstep;
        self
    }

    /// Set the extra line spacing.
    #[must_use]
    pub const fn with_vpad(mut self, vpad: i32) -> Self {
        self.vpad = vpad;
        self
    }

    /// A word wraps when its right edge would pass this x coordinate.
    ///
    /// Never less than `hstep + 10`, so very narrow viewports still fit a
    /// little text per line.
    #[must_use]
    pub fn wrap_limit(&self) -> i32 {
        (self.hstep + 10).max(self.width - self.hstep)
    }
}

/// Position of the next word and the style it will be drawn in.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: i32,
    y: i32,
    style: TextStyle,
}

/// The fixed parts of one layout pass.
struct Flow<'a> {
    metrics: &'a dyn FontMetrics,
    config: &'a LayoutConfig,
    /// Added to `y` on every wrap.
    line_advance: i32,
}

impl Flow<'_> {
    /// Place `word` at or after `cursor`, returning where the next word goes.
    fn place_word(&self, cursor: Cursor, word: &str, display_list: &mut DisplayList) -> Cursor {
        let width = self.metrics.text_width(word, cursor.style);

        let (x, y) = if cursor.x + width > self.config.wrap_limit() {
            (self.config.hstep, cursor.y + self.line_advance)
        } else {
            (cursor.x, cursor.y)
        };

        display_list.push(LayoutItem {
            x,
            y,
            text: word.to_string(),
            style: cursor.style,
        });

        Cursor {
            x: x + width + self.metrics.text_width(" ", cursor.style),
            y,
            style: cursor.style,
        }
    }
}

/// Lay out `tokens` into a display list.
///
/// Text is split on whitespace; each word is measured in the current style
/// and wrapped when `x + width > max(hstep + 10, width - hstep)`. A wrap
/// moves down by `round(line_height * 1.25) + vpad` and back to `hstep`.
/// The style starts upright and normal-weight on every call.
#[must_use]
pub fn layout(tokens: &[Token], metrics: &dyn FontMetrics, config: &LayoutConfig) -> DisplayList {
    let line_height = metrics.line_height(TextStyle::NORMAL);
    let flow = Flow {
        metrics,
        config,
        line_advance: line_spacing(line_height) + config.vpad,
    };
    let start = Cursor {
        x: config.hstep,
        y: line_height,
        style: TextStyle::NORMAL,
    };

    let (_, display_list) = tokens.iter().fold(
        (start, DisplayList::new()),
        |(cursor, mut display_list), token| {
            let cursor = match token {
                Token::Tag { name, .. } => Cursor {
                    style: cursor.style.apply_tag(name),
                    ..cursor
                },
                Token::Text { content } => content
                    .split_whitespace()
                    .fold(cursor, |cursor, word| {
                        flow.place_word(cursor, word, &mut display_list)
                    }),
            };
            (cursor, display_list)
        },
    );

    display_list
}

/// Tokenize `source` and lay it out. Same result as
/// `layout(&lex(source), metrics, config)`.
#[must_use]
pub fn layout_html(source: &str, metrics: &dyn FontMetrics, config: &LayoutConfig) -> DisplayList {
    layout(&lex(source), metrics, config)
}

/// `round(line_height * 1.25)`, with halves rounded up.
const fn line_spacing(line_height: i32) -> i32 {
    (line_height * 5 + 2).div_euclid(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spacing_rounds() {
        assert_eq!(line_spacing(16), 20);
        assert_eq!(line_spacing(10), 13); // 12.5
        assert_eq!(line_spacing(19), 24); // 23.75
        assert_eq!(line_spacing(17), 21); // 21.25
        assert_eq!(line_spacing(0), 0);
    }

    #[test]
    fn test_wrap_limit_has_a_floor() {
        assert_eq!(LayoutConfig::new(800).wrap_limit(), 790);
        assert_eq!(LayoutConfig::new(20).wrap_limit(), 20);
        assert_eq!(LayoutConfig::new(0).with_hstep(5).wrap_limit(), 15);
    }
}

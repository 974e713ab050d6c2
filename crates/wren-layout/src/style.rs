//! Text style state.
//!
//! Layout threads a [`TextStyle`] value through the token stream, replacing
//! it at each `<b>`, `</b>`, `<i>`, or `</i>`.

use serde::Serialize;

/// Font variation for a run of words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TextStyle {
    /// Set by `<b>`, cleared by `</b>`.
    pub bold: bool,
    /// Set by `<i>`, cleared by `</i>`.
    pub italic: bool,
}

impl TextStyle {
    /// Upright, normal weight.
    pub const NORMAL: Self = Self {
        bold: false,
        italic: false,
    };

    /// The style in effect after a tag named `tag_name`.
    ///
    /// Tags do not nest: `</b>` clears bold no matter how many `<b>` tags
    /// came before it. Unrecognized tags leave the style unchanged.
    #[must_use]
    pub fn apply_tag(self, tag_name: &str) -> Self {
        match tag_name {
            "b" => Self { bold: true, ..self },
            "/b" => Self {
                bold: false,
                ..self
            },
            "i" => Self {
                italic: true,
                ..self
            },
            "/i" => Self {
                italic: false,
                ..self
            },
            _ => self,
        }
    }
}

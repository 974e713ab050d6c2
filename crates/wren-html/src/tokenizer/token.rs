//! Tokenizer output: text runs and tags.

use std::fmt;

use serde::Serialize;

/// A unit of tokenizer output.
///
/// Tokens form a flat sequence in document order. There is no nesting and no
/// distinction between start and end tags beyond the leading `/` in an end
/// tag's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Token {
    /// A run of text between tags, with `&lt;`/`&gt;` already decoded.
    Text {
        /// The text, whitespace preserved.
        content: String,
    },

    /// Everything between `<` and `>`, trimmed and lowercased.
    Tag {
        /// The first whitespace-delimited word, e.g. `p` or `/b`.
        name: String,
        /// The rest of the tag, trimmed and unparsed.
        attributes: String,
    },
}

impl Token {
    /// Create a text token.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Create a tag token from the content between the brackets.
    ///
    /// The content is trimmed and lowercased, then split at the first
    /// whitespace into name and attributes.
    #[must_use]
    pub fn tag(content: &str) -> Self {
        let content = content.trim().to_lowercase();
        let (name, attributes) = content
            .split_once(char::is_whitespace)
            .unwrap_or((content.as_str(), ""));
        Self::Tag {
            name: name.to_string(),
            attributes: attributes.trim().to_string(),
        }
    }

    /// The tag name, or `None` for text.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Tag { name, .. } => Some(name),
            Self::Text { .. } => None,
        }
    }

    /// The text content, or `None` for tags.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Tag { .. } => None,
        }
    }

    /// Returns true if this is a text token.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { content } => f.write_str(content),
            Self::Tag { name, attributes } if attributes.is_empty() => write!(f, "<{name}>"),
            Self::Tag { name, attributes } => write!(f, "<{name} {attributes}>"),
        }
    }
}

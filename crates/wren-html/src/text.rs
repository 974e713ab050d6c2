//! Plain-text rendering.
//!
//! Strips tags and drops `<script>`/`<style>` content, leaving the text a
//! reader would see. Whitespace is kept as written.

use crate::tokenizer::{Token, lex};

/// Render `body` as plain text: the concatenated content of its text tokens.
#[must_use]
pub fn render_text(body: &str) -> String {
    text_content(&lex(body))
}

/// Concatenate the content of every [`Token::Text`] in `tokens`.
#[must_use]
pub fn text_content(tokens: &[Token]) -> String {
    tokens.iter().filter_map(Token::as_text).collect()
}

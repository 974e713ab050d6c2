//! HTML tokenizer for the Wren browser.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single left-to-right scan that splits markup into
//!   [`Token::Text`] and [`Token::Tag`] tokens
//!   - `<script>` and `<style>` content is skipped entirely
//!   - `&lt;` and `&gt;` are decoded in text; nothing else is
//! - **Plain-text rendering** - tag stripping built on the tokenizer
//!
//! # Not Implemented
//!
//! - DOM tree construction
//! - Attribute parsing (tag attributes are kept as one raw string)
//! - Named and numeric character references beyond `&lt;`/`&gt;`

/// Plain-text rendering of a document.
pub mod text;
/// Tokenizer for converting markup into tokens.
pub mod tokenizer;

pub use text::render_text;
pub use tokenizer::{HTMLTokenizer, Token, lex, lex_with_issues};

//! Markup tokenizer.
//!
//! Splits a document into text runs and tags, in document order.

/// Character reference decoding for text runs.
pub mod character_reference;
/// Scanning and emission helpers.
mod helpers;
/// The scanner itself.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::{HTMLTokenizer, lex, lex_with_issues};
pub use token::Token;

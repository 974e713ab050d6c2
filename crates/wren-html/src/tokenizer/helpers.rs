//! Helper methods for the tokenizer.
//!
//! Input handling (the unscanned remainder, substring search) and token
//! emission (flushing the pending text buffer).

use super::scanner::HTMLTokenizer;
use super::token::Token;

// =============================================================================
// Input Helpers
// =============================================================================

impl HTMLTokenizer {
    /// The input that has not been scanned yet.
    pub(super) fn remaining(&self) -> &str {
        &self.input[self.current_pos..]
    }

    /// Move the next `length` bytes into the pending text buffer.
    pub(super) fn consume_text(&mut self, length: usize) {
        let end = self.current_pos + length;
        self.text_buffer.push_str(&self.input[self.current_pos..end]);
        self.current_pos = end;
    }

    /// Byte offset of `needle` in the remaining input, comparing ASCII
    /// letters case-insensitively.
    ///
    /// `needle` must start with an ASCII byte so the offset lands on a char
    /// boundary.
    pub(super) fn find_ignoring_ascii_case(&self, needle: &str) -> Option<usize> {
        let needle = needle.as_bytes();
        self.remaining()
            .as_bytes()
            .windows(needle.len())
            .position(|window| window.eq_ignore_ascii_case(needle))
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Append a token to the output.
    pub(super) fn emit(&mut self, token: Token) {
        self.token_stream.push(token);
    }

    /// Emit the pending text as a [`Token::Text`], if there is any.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let content = std::mem::take(&mut self.text_buffer);
            self.emit(Token::Text { content });
        }
    }
}
